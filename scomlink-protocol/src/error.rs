//! Error taxonomy for the Xcom protocol
//!
//! Transport, integrity and capacity failures are protocol errors raised on
//! this side of the line. [`ApplicationError`] carries the code a remote
//! device put in an error response.

use core::fmt;

/// Errors that can occur while encoding, decoding or exchanging frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Transport accepted fewer bytes than the frame holds, or failed
    PortWriteFailed,
    /// Short read, hard read fault, or foreign traffic retries exhausted
    PortReadFailed,
    /// No start marker arrived before the transport timed out
    PortTimeout,
    /// Header checksum does not match the received header
    HeaderChecksumMismatch,
    /// Body checksum does not match the received body
    BodyChecksumMismatch,
    /// Frame is well-formed on the wire but its body layout is not
    InvalidFrame,
    /// Frame or value does not fit the available buffer
    BufferTooSmall,
    /// A request from another device was observed instead of a response
    ForeignRequest,
    /// Response addresses a different property than the request
    PropertyHeaderMismatch,
    /// The remote device answered with an error response
    Application(ApplicationError),
}

impl Error {
    /// True for checksum and layout failures
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            Error::HeaderChecksumMismatch | Error::BodyChecksumMismatch | Error::InvalidFrame
        )
    }

    /// True for failures raised by the transport
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::PortWriteFailed | Error::PortReadFailed | Error::PortTimeout
        )
    }

    /// The remote device's error code, if this is an application error
    pub fn application(&self) -> Option<ApplicationError> {
        match self {
            Error::Application(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<ApplicationError> for Error {
    fn from(code: ApplicationError) -> Self {
        Error::Application(code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PortWriteFailed => f.write_str("port write failed"),
            Error::PortReadFailed => f.write_str("port read failed"),
            Error::PortTimeout => f.write_str("port timeout"),
            Error::HeaderChecksumMismatch => f.write_str("header checksum mismatch"),
            Error::BodyChecksumMismatch => f.write_str("body checksum mismatch"),
            Error::InvalidFrame => f.write_str("invalid frame"),
            Error::BufferTooSmall => f.write_str("buffer too small"),
            Error::ForeignRequest => f.write_str("foreign request on the bus"),
            Error::PropertyHeaderMismatch => f.write_str("property header doesn't match"),
            Error::Application(code) => write!(f, "device error {:#06x}: {}", code.0, code),
        }
    }
}

/// Error code reported by a remote device
///
/// Code semantics are defined by the device firmware. The named constants
/// cover the codes documented for the Xcom gateway; other values pass
/// through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApplicationError(pub u16);

impl ApplicationError {
    pub const INVALID_FRAME: Self = Self(0x0001);
    pub const DEVICE_NOT_FOUND: Self = Self(0x0002);
    pub const RESPONSE_TIMEOUT: Self = Self(0x0003);
    pub const SERVICE_NOT_SUPPORTED: Self = Self(0x0011);
    pub const INVALID_SERVICE_ARGUMENT: Self = Self(0x0012);
    pub const GATEWAY_BUSY: Self = Self(0x0013);
    pub const TYPE_NOT_SUPPORTED: Self = Self(0x0021);
    pub const OBJECT_ID_NOT_FOUND: Self = Self(0x0022);
    pub const PROPERTY_NOT_SUPPORTED: Self = Self(0x0023);
    pub const INVALID_DATA_LENGTH: Self = Self(0x0024);
    pub const PROPERTY_IS_READ_ONLY: Self = Self(0x0025);
    pub const INVALID_DATA: Self = Self(0x0026);
    pub const DATA_TOO_SMALL: Self = Self(0x0027);
    pub const DATA_TOO_BIG: Self = Self(0x0028);
    pub const WRITE_PROPERTY_FAILED: Self = Self(0x0029);
    pub const READ_PROPERTY_FAILED: Self = Self(0x002A);
    pub const ACCESS_DENIED: Self = Self(0x002B);
    pub const OBJECT_NOT_SUPPORTED: Self = Self(0x002C);
    pub const MULTICAST_READ_NOT_SUPPORTED: Self = Self(0x002D);

    /// Raw code as sent on the wire
    pub fn code(&self) -> u16 {
        self.0
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match *self {
            Self::INVALID_FRAME => "invalid frame",
            Self::DEVICE_NOT_FOUND => "device not found",
            Self::RESPONSE_TIMEOUT => "response timeout",
            Self::SERVICE_NOT_SUPPORTED => "service not supported",
            Self::INVALID_SERVICE_ARGUMENT => "invalid service argument",
            Self::GATEWAY_BUSY => "gateway busy",
            Self::TYPE_NOT_SUPPORTED => "type not supported",
            Self::OBJECT_ID_NOT_FOUND => "object id not found",
            Self::PROPERTY_NOT_SUPPORTED => "property not supported",
            Self::INVALID_DATA_LENGTH => "invalid data length",
            Self::PROPERTY_IS_READ_ONLY => "property is read-only",
            Self::INVALID_DATA => "invalid data",
            Self::DATA_TOO_SMALL => "data too small",
            Self::DATA_TOO_BIG => "data too big",
            Self::WRITE_PROPERTY_FAILED => "write property failed",
            Self::READ_PROPERTY_FAILED => "read property failed",
            Self::ACCESS_DENIED => "access denied",
            Self::OBJECT_NOT_SUPPORTED => "object not supported",
            Self::MULTICAST_READ_NOT_SUPPORTED => "multicast read not supported",
            _ => "unknown error",
        }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
