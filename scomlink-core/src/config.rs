//! Channel configuration
//!
//! Defaults match the gateway's documented behavior: three extra decode
//! attempts when another master's request is on the line, and fail-fast
//! reads. With the `toml` feature a configuration can be loaded from text;
//! keys left out keep their defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extra decode attempts after a foreign request, before giving up
pub const DEFAULT_FOREIGN_REQUEST_RETRIES: u8 = 3;

/// How header and body reads treat a short transport read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReadMode {
    /// One read per phase; fewer bytes than requested fails the frame
    #[default]
    FailFast,
    /// Keep reading within a phase until the count is met or a read
    /// times out. For transports that hand data over in fragments.
    Accumulate,
}

/// Transaction channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelConfig {
    /// Extra decode attempts after a foreign request
    pub foreign_request_retries: u8,
    /// Short read handling
    pub read_mode: ReadMode,
    /// Reject responses addressing a different property than the request
    pub check_property_header: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            foreign_request_retries: DEFAULT_FOREIGN_REQUEST_RETRIES,
            read_mode: ReadMode::FailFast,
            check_property_header: false,
        }
    }
}

/// Configuration load error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input is not valid TOML or does not match the schema
    Parse,
}

#[cfg(feature = "toml")]
impl ChannelConfig {
    /// Parse a configuration from TOML
    ///
    /// ```toml
    /// foreign_request_retries = 5
    /// read_mode = "accumulate"
    /// check_property_header = true
    /// ```
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|_| ConfigError::Parse)
    }
}
