//! Frame layout and encoding
//!
//! Frame format (all multi-byte fields little-endian):
//! - START (1 byte): 0xAA synchronization byte
//! - HEADER (11 bytes): flags(1) + source(4) + destination(4) + body length(2)
//! - HEADER_SUM (2 bytes): checksum of HEADER
//! - BODY (body length bytes): body flags(1) + service id(1) + service data
//! - BODY_SUM (2 bytes): checksum of BODY
//!
//! The body length covers BODY only, never the start byte or checksums.

use heapless::Vec;

use crate::checksum::{checksum, CHECKSUM_SIZE};
use crate::error::Error;
use crate::property::{
    PropertyHeader, MAX_VALUE_SIZE, PROPERTY_BODY_SIZE, PROPERTY_HEADER_SIZE, SERVICE_HEADER_SIZE,
};

/// Frame synchronization byte
pub const START_MARKER: u8 = 0xAA;

/// Header size without start byte and checksum
pub const HEADER_SIZE: usize = 11;

/// Header plus its checksum, the first block read after the start byte
pub const HEADER_BLOCK_SIZE: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Bytes a frame adds around its body (START + HEADER + both checksums)
pub const OVERHEAD_SIZE: usize = 1 + HEADER_SIZE + 2 * CHECKSUM_SIZE;

/// Maximum complete frame size, the gateway's buffer capacity
pub const MAX_FRAME_SIZE: usize = 256;

/// Maximum body size
pub const MAX_BODY_SIZE: usize = MAX_FRAME_SIZE - OVERHEAD_SIZE;

/// Frame header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameHeader {
    /// Gateway status flags, 0 in requests
    pub flags: u8,
    /// Sender address
    pub source: u32,
    /// Receiver address
    pub destination: u32,
    /// Exact byte length of the body
    pub body_length: u16,
}

impl FrameHeader {
    /// Serialize to wire layout
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0] = self.flags;
        bytes[1..5].copy_from_slice(&self.source.to_le_bytes());
        bytes[5..9].copy_from_slice(&self.destination.to_le_bytes());
        bytes[9..11].copy_from_slice(&self.body_length.to_le_bytes());
        bytes
    }

    /// Parse from wire layout
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            flags: bytes[0],
            source: u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
            destination: u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]),
            body_length: u16::from_le_bytes([bytes[9], bytes[10]]),
        }
    }
}

/// Body flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BodyFlags(pub u8);

impl BodyFlags {
    /// Request sent by a bus master
    pub const REQUEST: Self = Self(0x00);
    /// Bit 0: the service failed, value holds an error code
    pub const ERROR: u8 = 0x01;
    /// Bit 1: frame answers a request
    pub const RESPONSE: u8 = 0x02;

    /// Successful response
    pub fn response() -> Self {
        Self(Self::RESPONSE)
    }

    /// Error response
    pub fn error_response() -> Self {
        Self(Self::RESPONSE | Self::ERROR)
    }

    /// Check the error bit
    pub fn is_error(&self) -> bool {
        self.0 & Self::ERROR != 0
    }

    /// Check the response bit
    pub fn is_response(&self) -> bool {
        self.0 & Self::RESPONSE != 0
    }
}

/// A complete frame: header plus body
///
/// Frames built by [`Frame::new`] or [`Frame::property`] and frames
/// yielded by the parser always satisfy `header.body_length == body.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: FrameHeader,
    body: Vec<u8, MAX_BODY_SIZE>,
}

impl Frame {
    /// Create a frame around a raw body
    pub fn new(source: u32, destination: u32, body: &[u8]) -> Result<Self, Error> {
        if body.len() > MAX_BODY_SIZE {
            return Err(Error::BufferTooSmall);
        }

        let mut body_vec = Vec::new();
        body_vec
            .extend_from_slice(body)
            .map_err(|_| Error::BufferTooSmall)?;

        Ok(Self {
            header: FrameHeader {
                flags: 0,
                source,
                destination,
                body_length: body.len() as u16,
            },
            body: body_vec,
        })
    }

    /// Create a read/write property frame
    ///
    /// Fails with `BufferTooSmall` if `value` cannot fit in a frame.
    pub fn property(
        source: u32,
        destination: u32,
        flags: BodyFlags,
        service_id: u8,
        property: PropertyHeader,
        value: &[u8],
    ) -> Result<Self, Error> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(Error::BufferTooSmall);
        }

        let mut body = Vec::<u8, MAX_BODY_SIZE>::new();
        body.push(flags.0).map_err(|_| Error::BufferTooSmall)?;
        body.push(service_id).map_err(|_| Error::BufferTooSmall)?;
        body.extend_from_slice(&property.to_bytes())
            .map_err(|_| Error::BufferTooSmall)?;
        body.extend_from_slice(value)
            .map_err(|_| Error::BufferTooSmall)?;

        Self::new(source, destination, &body)
    }

    /// Assemble a frame from parts the parser has already validated
    pub(crate) fn from_parts(header: FrameHeader, body: &[u8]) -> Result<Self, Error> {
        let mut body_vec = Vec::new();
        body_vec
            .extend_from_slice(body)
            .map_err(|_| Error::BufferTooSmall)?;
        Ok(Self {
            header,
            body: body_vec,
        })
    }

    /// Frame header
    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Raw body bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body flags, empty for a body too short to carry them
    pub fn body_flags(&self) -> BodyFlags {
        BodyFlags(self.body.first().copied().unwrap_or(0))
    }

    /// Service id of the body
    pub fn service_id(&self) -> Option<u8> {
        self.body.get(1).copied()
    }

    /// Property header, if the body is long enough to hold one
    pub fn property_header(&self) -> Option<PropertyHeader> {
        let bytes = self
            .body
            .get(SERVICE_HEADER_SIZE..PROPERTY_BODY_SIZE)?
            .try_into()
            .ok()?;
        Some(PropertyHeader::from_bytes(bytes))
    }

    /// Bytes following the property header
    pub fn value(&self) -> &[u8] {
        self.body.get(PROPERTY_BODY_SIZE..).unwrap_or(&[])
    }

    /// Size of this frame on the wire
    pub fn encoded_len(&self) -> usize {
        OVERHEAD_SIZE + self.body.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written. Nothing is written if the
    /// buffer is too small.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, Error> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(Error::BufferTooSmall);
        }

        let header = self.header.to_bytes();
        let body_start = 1 + HEADER_BLOCK_SIZE;
        let body_end = body_start + self.body.len();

        buffer[0] = START_MARKER;
        buffer[1..1 + HEADER_SIZE].copy_from_slice(&header);
        buffer[1 + HEADER_SIZE..body_start].copy_from_slice(&checksum(&header));
        buffer[body_start..body_end].copy_from_slice(&self.body);
        buffer[body_end..frame_len].copy_from_slice(&checksum(&self.body));

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, Error> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| Error::BufferTooSmall)?;
        Ok(vec)
    }
}
