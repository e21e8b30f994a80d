//! Xcom Serial Property Protocol
//!
//! This crate implements the binary framing used to read and write typed
//! properties on power electronics (inverters, solar charge controllers,
//! battery monitors) sharing one half-duplex serial bus behind an Xcom
//! gateway. It is sans-IO: frames are encoded into caller buffers and
//! decoded from bytes the caller feeds in.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌───────┬──────────┬────────────┬────────────┬──────────┐
//! │ START │ HEADER   │ HEADER_SUM │ BODY       │ BODY_SUM │
//! │ 1B    │ 11B      │ 2B         │ 10+N B     │ 2B       │
//! └───────┴──────────┴────────────┴────────────┴──────────┘
//! ```
//!
//! The header carries source/destination addresses and the body length;
//! the body carries a service id and the property being read or written.
//! Requests come from the gateway address, responses set the response bit,
//! and a request from another bus master may show up while a response is
//! awaited.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod checksum;
pub mod error;
pub mod frame;
pub mod parser;
pub mod property;
pub mod response;
pub mod transaction;

pub use address::GATEWAY_ADDRESS;
pub use checksum::checksum;
pub use error::{ApplicationError, Error};
pub use frame::{BodyFlags, Frame, FrameHeader, MAX_FRAME_SIZE, START_MARKER};
pub use parser::FrameParser;
pub use property::{
    as_float, as_integer, ObjectType, ParameterProperty, PropertyHeader, QspLevel, ServiceId,
    MAX_VALUE_SIZE,
};
pub use response::PropertyResponse;
pub use transaction::Transaction;
