//! Transaction channel for Xcom serial devices
//!
//! Drives request/response exchanges over a serial line using the
//! `scomlink-protocol` codec:
//!
//! ```text
//! ┌──────────────┐  Transaction  ┌─────────┐  frame bytes  ┌────────┐
//! │ typed access │ ────────────► │ Channel │ ────────────► │ Serial │
//! │ (access.rs)  │ ◄──────────── │         │ ◄──────────── │ (HAL)  │
//! └──────────────┘     Reply     └─────────┘               └────────┘
//! ```
//!
//! The channel is blocking and single-flight: one transaction at a time
//! per serial line, enforced by `&mut self`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod access;
pub mod channel;
pub mod config;

#[cfg(test)]
mod mock;

pub use channel::{Channel, Reply};
pub use config::{ChannelConfig, ConfigError, ReadMode};
pub use scomlink_hal::{Io, Serial, SerialRx, SerialTx};
pub use scomlink_protocol::{ApplicationError, Error, Transaction};
