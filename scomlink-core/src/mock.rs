//! Scripted serial line for channel tests

use std::collections::VecDeque;
use std::vec::Vec;

use scomlink_hal::{SerialRx, SerialTx};
use scomlink_protocol::{BodyFlags, Frame, PropertyHeader, ServiceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Serial line that records writes and replays queued bytes
///
/// An empty receive queue reads as a timeout (0 bytes).
#[derive(Debug, Default)]
pub struct MockSerial {
    rx: VecDeque<u8>,
    pub written: Vec<u8>,
    /// Accept at most this many bytes per write
    pub write_limit: Option<usize>,
    /// Hand out at most this many bytes per read
    pub read_chunk: Option<usize>,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl SerialTx for MockSerial {
    type Error = MockError;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(MockError);
        }
        let n = self.write_limit.map_or(data.len(), |limit| limit.min(data.len()));
        self.written.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerialRx for MockSerial {
    type Error = MockError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(MockError);
        }
        let mut n = buf.len().min(self.rx.len());
        if let Some(chunk) = self.read_chunk {
            n = n.min(chunk);
        }
        for slot in &mut buf[..n] {
            if let Some(byte) = self.rx.pop_front() {
                *slot = byte;
            }
        }
        Ok(n)
    }
}

/// A read property response as device 101 would send it
pub fn device_response(flags: BodyFlags, property: PropertyHeader, value: &[u8]) -> Vec<u8> {
    Frame::property(101, 1, flags, ServiceId::ReadProperty.to_u8(), property, value)
        .unwrap()
        .encode_to_vec()
        .unwrap()
        .to_vec()
}

/// A read request from another master on the bus
pub fn foreign_request() -> Vec<u8> {
    Frame::property(
        2,
        101,
        BodyFlags::REQUEST,
        ServiceId::ReadProperty.to_u8(),
        PropertyHeader::new(1, 3000, 1),
        &[],
    )
    .unwrap()
    .encode_to_vec()
    .unwrap()
    .to_vec()
}
