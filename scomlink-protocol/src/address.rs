//! Bus addresses
//!
//! Every device on the bus has a 32-bit address. Device families occupy
//! fixed ranges; `idx` is the zero-based position of a unit within its
//! family (set on the device itself).

/// Address of the local controller talking through the gateway
pub const GATEWAY_ADDRESS: u32 = 1;

/// Communication bridge for third-party solar controllers
pub const XCOM_MS: u32 = 401;

/// Battery status processor
pub const BSP: u32 = 601;

/// Inverter/charger (XTH, XTM, XTS)
pub const fn xtender(idx: u32) -> u32 {
    101 + idx
}

/// Solar charge controller
pub const fn vario_track(idx: u32) -> u32 {
    301 + idx
}

/// RS-232 gateway
pub const fn xcom_232i(idx: u32) -> u32 {
    501 + idx
}
