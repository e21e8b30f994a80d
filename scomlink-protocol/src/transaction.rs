//! Outbound transactions
//!
//! A [`Transaction`] describes one read or write property request. It
//! borrows its value bytes and encodes straight into a caller buffer, so
//! the caller decides where the frame lives.

use heapless::Vec;

use crate::address::GATEWAY_ADDRESS;
use crate::error::Error;
use crate::frame::{BodyFlags, Frame, MAX_FRAME_SIZE};
use crate::property::{
    ObjectType, ParameterProperty, PropertyHeader, ServiceId, MESSAGE_VALUE, USER_INFO_VALUE,
};

/// One request to a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transaction<'a> {
    /// Device address
    pub destination: u32,
    /// Read or write
    pub service: ServiceId,
    /// Addressed property
    pub property: PropertyHeader,
    /// Value to write, empty for reads
    pub value: &'a [u8],
}

impl<'a> Transaction<'a> {
    /// Read any property
    pub fn read_property(
        destination: u32,
        object_type: u16,
        object_id: u32,
        property_id: u16,
    ) -> Self {
        Self {
            destination,
            service: ServiceId::ReadProperty,
            property: PropertyHeader::new(object_type, object_id, property_id),
            value: &[],
        }
    }

    /// Write any property
    pub fn write_property(
        destination: u32,
        object_type: u16,
        object_id: u32,
        property_id: u16,
        value: &'a [u8],
    ) -> Self {
        Self {
            destination,
            service: ServiceId::WriteProperty,
            property: PropertyHeader::new(object_type, object_id, property_id),
            value,
        }
    }

    /// Read a read-only user info value
    pub fn read_user_info(destination: u32, object_id: u32) -> Self {
        Self::read_property(
            destination,
            ObjectType::UserInfo.to_u16(),
            object_id,
            USER_INFO_VALUE,
        )
    }

    /// Read one property of an adjustable parameter
    pub fn read_parameter(destination: u32, object_id: u32, property: ParameterProperty) -> Self {
        Self::read_property(
            destination,
            ObjectType::Parameter.to_u16(),
            object_id,
            property.to_u16(),
        )
    }

    /// Write a parameter value, persisted by the device
    pub fn write_parameter_value(destination: u32, object_id: u32, value: &'a [u8]) -> Self {
        Self::write_property(
            destination,
            ObjectType::Parameter.to_u16(),
            object_id,
            ParameterProperty::ValueQsp.to_u16(),
            value,
        )
    }

    /// Write a parameter value to RAM only
    ///
    /// Use for values rewritten often; flash wears out.
    pub fn write_parameter_unsaved_value(
        destination: u32,
        object_id: u32,
        value: &'a [u8],
    ) -> Self {
        Self::write_property(
            destination,
            ObjectType::Parameter.to_u16(),
            object_id,
            ParameterProperty::UnsavedValueQsp.to_u16(),
            value,
        )
    }

    /// Read a stored message by index
    pub fn read_message(destination: u32, index: u32) -> Self {
        Self::read_property(
            destination,
            ObjectType::Message.to_u16(),
            index,
            MESSAGE_VALUE,
        )
    }

    /// Build the request frame, sent from the gateway address
    pub fn to_frame(&self) -> Result<Frame, Error> {
        Frame::property(
            GATEWAY_ADDRESS,
            self.destination,
            BodyFlags::REQUEST,
            self.service.to_u8(),
            self.property,
            self.value,
        )
    }

    /// Encode this transaction into a byte buffer
    ///
    /// Returns the number of bytes written. Fails with `BufferTooSmall`
    /// before writing anything if the value does not fit a frame or the
    /// frame does not fit `buffer`.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        self.to_frame()?.encode(buffer)
    }

    /// Encode this transaction into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, Error> {
        self.to_frame()?.encode_to_vec()
    }
}
