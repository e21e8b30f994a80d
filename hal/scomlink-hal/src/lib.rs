//! Scomlink Hardware Abstraction Layer
//!
//! This crate defines the serial transport traits the Xcom protocol stack
//! is written against. Chip HALs, host serial ports and test doubles all
//! plug in underneath the same transaction channel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  scomlink-core (transaction channel)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  scomlink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-io   │       │ custom UART / │
//! │ types (Io<T>) │       │ test double   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialTx`], [`serial::SerialRx`] - Half-duplex serial line
//! - [`serial::Serial`] - Both directions on one peripheral

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod serial;

// Re-export key traits at crate root for convenience
pub use serial::{Io, Serial, SerialRx, SerialTx};
