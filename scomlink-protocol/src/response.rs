//! Classification of validated frames
//!
//! A frame that passed both checksums is one of three things: an error
//! response carrying a device error code, a request from another bus
//! master, or a property response.

use crate::error::{ApplicationError, Error};
use crate::frame::Frame;
use crate::property::{self, PropertyHeader, ServiceId, PROPERTY_BODY_SIZE};

/// A successful read/write property response
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PropertyResponse<'a> {
    /// Address of the responding device
    pub source: u32,
    /// Service the response answers
    pub service_id: u8,
    /// Property the response carries
    pub property: PropertyHeader,
    /// Raw value bytes
    pub value: &'a [u8],
}

impl<'a> PropertyResponse<'a> {
    /// Service as a known id
    pub fn service(&self) -> Option<ServiceId> {
        ServiceId::from_u8(self.service_id)
    }

    /// Copy the value into a caller buffer
    ///
    /// Fails with `BufferTooSmall`, copying nothing, if the value does
    /// not fit. When `dst` has room to spare, a zero byte is written right
    /// after the value so string values come out terminated.
    pub fn copy_value(&self, dst: &mut [u8]) -> Result<usize, Error> {
        let len = self.value.len();
        if len > dst.len() {
            return Err(Error::BufferTooSmall);
        }
        dst[..len].copy_from_slice(self.value);
        if let Some(terminator) = dst.get_mut(len) {
            *terminator = 0;
        }
        Ok(len)
    }

    /// Value as an unsigned integer, see [`property::as_integer`]
    pub fn as_integer(&self) -> u32 {
        property::as_integer(self.value)
    }

    /// Value as a float, see [`property::as_float`]
    pub fn as_float(&self) -> f32 {
        property::as_float(self.value)
    }
}

impl Frame {
    /// Classify a validated frame
    ///
    /// - error bit set: the 2-byte value is the device error code,
    ///   reported as `Error::Application`; any other length is
    ///   `InvalidFrame`
    /// - response bit clear: `ForeignRequest`
    /// - otherwise a property response, borrowing the value from the frame
    pub fn classify(&self) -> Result<PropertyResponse<'_>, Error> {
        let flags = self.body_flags();

        if flags.is_error() {
            return match self.body().get(PROPERTY_BODY_SIZE..) {
                Some(&[lo, hi]) => Err(Error::Application(ApplicationError(
                    u16::from_le_bytes([lo, hi]),
                ))),
                _ => Err(Error::InvalidFrame),
            };
        }

        if !flags.is_response() {
            return Err(Error::ForeignRequest);
        }

        let property = self.property_header().ok_or(Error::InvalidFrame)?;
        let service_id = self.service_id().ok_or(Error::InvalidFrame)?;

        Ok(PropertyResponse {
            source: self.header().source,
            service_id,
            property,
            value: self.value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::BodyFlags;

    fn frame(flags: BodyFlags, value: &[u8]) -> Frame {
        Frame::property(101, 1, flags, 1, PropertyHeader::new(1, 3023, 1), value).unwrap()
    }

    #[test]
    fn test_classify_response() {
        let frame = frame(BodyFlags::response(), &230.5f32.to_le_bytes());
        let response = frame.classify().unwrap();

        assert_eq!(response.source, 101);
        assert_eq!(response.service(), Some(ServiceId::ReadProperty));
        assert_eq!(response.property, PropertyHeader::new(1, 3023, 1));
        assert_eq!(response.as_float(), 230.5);
    }

    #[test]
    fn test_classify_application_error() {
        let frame = frame(BodyFlags(0x01), &[0x07, 0x00]);
        assert_eq!(
            frame.classify(),
            Err(Error::Application(ApplicationError(7)))
        );

        // Error bit wins over response bit
        let frame = frame_with_code(0x0022);
        assert_eq!(
            frame.classify(),
            Err(Error::Application(ApplicationError::OBJECT_ID_NOT_FOUND))
        );
    }

    fn frame_with_code(code: u16) -> Frame {
        frame(BodyFlags::error_response(), &code.to_le_bytes())
    }

    #[test]
    fn test_classify_malformed_error() {
        assert_eq!(
            frame(BodyFlags::error_response(), &[0x07]).classify(),
            Err(Error::InvalidFrame)
        );
        assert_eq!(
            frame(BodyFlags::error_response(), &[0x07, 0x00, 0x00]).classify(),
            Err(Error::InvalidFrame)
        );
        let short = Frame::new(101, 1, &[0x03, 0x01]).unwrap();
        assert_eq!(short.classify(), Err(Error::InvalidFrame));
    }

    #[test]
    fn test_classify_foreign_request() {
        let frame = frame(BodyFlags::REQUEST, &[]);
        assert_eq!(frame.classify(), Err(Error::ForeignRequest));
    }

    #[test]
    fn test_classify_short_response() {
        let frame = Frame::new(101, 1, &[0x02, 0x01, 0x01, 0x00]).unwrap();
        assert_eq!(frame.classify(), Err(Error::InvalidFrame));
    }

    #[test]
    fn test_copy_value_terminates() {
        let frame = frame(BodyFlags::response(), b"XTM");
        let response = frame.classify().unwrap();

        let mut buf = [0xEEu8; 8];
        assert_eq!(response.copy_value(&mut buf), Ok(3));
        assert_eq!(&buf[..5], &[b'X', b'T', b'M', 0, 0xEE]);
    }

    #[test]
    fn test_copy_value_exact_fit() {
        let frame = frame(BodyFlags::response(), &[1, 2, 3, 4]);
        let response = frame.classify().unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(response.copy_value(&mut buf), Ok(4));
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_copy_value_too_small() {
        let frame = frame(BodyFlags::response(), &[1, 2, 3, 4]);
        let response = frame.classify().unwrap();

        let mut buf = [0xEEu8; 3];
        assert_eq!(response.copy_value(&mut buf), Err(Error::BufferTooSmall));
        assert_eq!(buf, [0xEE; 3]);
    }
}
