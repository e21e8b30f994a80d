//! Property addressing and scalar value codec
//!
//! Read/write property services carry a fixed 8-byte property header
//! after the 2-byte service header:
//!
//! ```text
//! ┌─────────────┬───────────┬─────────────┬────────────┐
//! │ OBJECT_TYPE │ OBJECT_ID │ PROPERTY_ID │ VALUE      │
//! │ 2B (LE)     │ 4B (LE)   │ 2B (LE)     │ 0–230B     │
//! └─────────────┴───────────┴─────────────┴────────────┘
//! ```
//!
//! Values are opaque bytes on the wire. The scalar helpers below read them
//! as the little-endian integers and IEEE-754 floats devices actually send.

use crate::frame::{MAX_FRAME_SIZE, OVERHEAD_SIZE};

/// Property header size (object type + object id + property id)
pub const PROPERTY_HEADER_SIZE: usize = 8;

/// Service header size (body flags + service id)
pub const SERVICE_HEADER_SIZE: usize = 2;

/// Body size of a property frame with an empty value
pub const PROPERTY_BODY_SIZE: usize = SERVICE_HEADER_SIZE + PROPERTY_HEADER_SIZE;

/// Largest value that fits in a frame
pub const MAX_VALUE_SIZE: usize = MAX_FRAME_SIZE - OVERHEAD_SIZE - PROPERTY_BODY_SIZE;

/// Property id of the single property of user info objects
pub const USER_INFO_VALUE: u16 = 0x01;

/// Property id of message objects
pub const MESSAGE_VALUE: u16 = 0x00;

/// Service identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ServiceId {
    ReadProperty = 0x01,
    WriteProperty = 0x02,
}

impl ServiceId {
    /// Parse from wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(ServiceId::ReadProperty),
            0x02 => Some(ServiceId::WriteProperty),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Object types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ObjectType {
    /// Read-only device state ("user info")
    UserInfo = 0x0001,
    /// Adjustable parameters
    Parameter = 0x0002,
    /// Stored messages, indexed by object id
    Message = 0x0003,
    /// Datalog transfer
    Datalog = 0x0101,
}

impl ObjectType {
    /// Parse from wire value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(ObjectType::UserInfo),
            0x0002 => Some(ObjectType::Parameter),
            0x0003 => Some(ObjectType::Message),
            0x0101 => Some(ObjectType::Datalog),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

/// Properties of parameter objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ParameterProperty {
    /// Value (legacy access)
    Value = 0x01,
    /// Value as adjustable from the remote control, persisted to flash
    ValueQsp = 0x05,
    /// Minimum accepted value
    MinQsp = 0x06,
    /// Maximum accepted value
    MaxQsp = 0x07,
    /// Access level, see [`QspLevel`]
    LevelQsp = 0x08,
    /// Value held in RAM only, lost on restart
    UnsavedValueQsp = 0x0D,
}

impl ParameterProperty {
    /// Parse from wire value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x01 => Some(ParameterProperty::Value),
            0x05 => Some(ParameterProperty::ValueQsp),
            0x06 => Some(ParameterProperty::MinQsp),
            0x07 => Some(ParameterProperty::MaxQsp),
            0x08 => Some(ParameterProperty::LevelQsp),
            0x0D => Some(ParameterProperty::UnsavedValueQsp),
            _ => None,
        }
    }

    /// Convert to wire value
    pub fn to_u16(self) -> u16 {
        self as u16
    }
}

/// Access tier gating which clients may adjust a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum QspLevel {
    ViewOnly = 0x00,
    Basic = 0x10,
    Expert = 0x20,
    Installer = 0x30,
    Qsp = 0x40,
}

impl QspLevel {
    /// Parse from the integer value of a `LevelQsp` property
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0x00 => Some(QspLevel::ViewOnly),
            0x10 => Some(QspLevel::Basic),
            0x20 => Some(QspLevel::Expert),
            0x30 => Some(QspLevel::Installer),
            0x40 => Some(QspLevel::Qsp),
            _ => None,
        }
    }
}

/// Identifies one property on a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PropertyHeader {
    pub object_type: u16,
    pub object_id: u32,
    pub property_id: u16,
}

impl PropertyHeader {
    /// Create a property header
    pub fn new(object_type: u16, object_id: u32, property_id: u16) -> Self {
        Self {
            object_type,
            object_id,
            property_id,
        }
    }

    /// Serialize to wire layout
    pub fn to_bytes(&self) -> [u8; PROPERTY_HEADER_SIZE] {
        let mut bytes = [0u8; PROPERTY_HEADER_SIZE];
        bytes[0..2].copy_from_slice(&self.object_type.to_le_bytes());
        bytes[2..6].copy_from_slice(&self.object_id.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.property_id.to_le_bytes());
        bytes
    }

    /// Parse from wire layout
    pub fn from_bytes(bytes: &[u8; PROPERTY_HEADER_SIZE]) -> Self {
        Self {
            object_type: u16::from_le_bytes([bytes[0], bytes[1]]),
            object_id: u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]),
            property_id: u16::from_le_bytes([bytes[6], bytes[7]]),
        }
    }
}

/// Read a value as an unsigned integer
///
/// Four or more bytes read as a little-endian `u32`, two or three bytes
/// as a widened `u16`. Anything shorter yields 0, so check the decode
/// outcome before trusting the number.
pub fn as_integer(value: &[u8]) -> u32 {
    match value {
        [a, b, c, d, ..] => u32::from_le_bytes([*a, *b, *c, *d]),
        [a, b, ..] => u16::from_le_bytes([*a, *b]) as u32,
        _ => 0,
    }
}

/// Read a value as an IEEE-754 single precision float
///
/// Needs at least four bytes, otherwise 0.0.
pub fn as_float(value: &[u8]) -> f32 {
    match value {
        [a, b, c, d, ..] => f32::from_le_bytes([*a, *b, *c, *d]),
        _ => 0.0,
    }
}

/// Read a value as a boolean (non-zero integer)
pub fn as_bool(value: &[u8]) -> bool {
    as_integer(value) != 0
}

/// Encode a `u16` write payload
pub fn encode_u16(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

/// Encode a `u32` write payload
pub fn encode_u32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Encode an `f32` write payload
pub fn encode_f32(value: f32) -> [u8; 4] {
    value.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_value_size() {
        assert_eq!(MAX_VALUE_SIZE, 230);
    }

    #[test]
    fn test_as_integer_widths() {
        assert_eq!(as_integer(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(as_integer(&[0x78, 0x56, 0x34, 0x12, 0xFF]), 0x1234_5678);
        assert_eq!(as_integer(&[0x34, 0x12]), 0x1234);
        assert_eq!(as_integer(&[0x34, 0x12, 0xFF]), 0x1234);
        assert_eq!(as_integer(&[0x34]), 0);
        assert_eq!(as_integer(&[]), 0);
    }

    #[test]
    fn test_as_float() {
        assert_eq!(as_float(&230.5f32.to_le_bytes()), 230.5);
        assert_eq!(as_float(&[0x00, 0x00, 0x48, 0x42]), 50.0);
        assert_eq!(as_float(&[0x00, 0x00, 0x48]), 0.0);
    }

    #[test]
    fn test_as_bool() {
        assert!(as_bool(&[0x01, 0x00, 0x00, 0x00]));
        assert!(!as_bool(&[0x00, 0x00]));
        assert!(!as_bool(&[0x01]));
    }

    #[test]
    fn test_encoders() {
        assert_eq!(encode_u16(0x1234), [0x34, 0x12]);
        assert_eq!(encode_u32(3023), [0xCF, 0x0B, 0x00, 0x00]);
        assert_eq!(as_float(&encode_f32(-12.25)), -12.25);
    }

    #[test]
    fn test_property_header_layout() {
        let header = PropertyHeader::new(ObjectType::UserInfo.to_u16(), 3023, USER_INFO_VALUE);
        let bytes = header.to_bytes();
        assert_eq!(bytes, [0x01, 0x00, 0xCF, 0x0B, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(PropertyHeader::from_bytes(&bytes), header);
    }

    #[test]
    fn test_wire_enums() {
        assert_eq!(ServiceId::from_u8(2), Some(ServiceId::WriteProperty));
        assert_eq!(ServiceId::from_u8(3), None);
        assert_eq!(ObjectType::from_u16(0x0101), Some(ObjectType::Datalog));
        assert_eq!(ObjectType::Message.to_u16(), 3);
        assert_eq!(
            ParameterProperty::from_u16(0x0D),
            Some(ParameterProperty::UnsavedValueQsp)
        );
        assert_eq!(QspLevel::from_u32(0x30), Some(QspLevel::Installer));
        assert_eq!(QspLevel::from_u32(0x31), None);
        assert!(QspLevel::Expert > QspLevel::Basic);
    }
}
