//! Request/response transaction channel
//!
//! One [`Channel`] owns one serial line and the scratch buffer frames are
//! built and read in. Every operation takes `&mut self`, so at most one
//! transaction is ever in flight on a channel; callers sharing a line
//! across tasks wrap the channel in their own lock.
//!
//! # Exchange
//!
//! 1. Encode the request (nothing is sent if it does not fit)
//! 2. Write it; a partial write fails, since half a frame cannot be resumed
//! 3. Read until a start byte, then the header block, then the body
//! 4. Skip requests from other bus masters, at most
//!    [`ChannelConfig::foreign_request_retries`] times
//!
//! No other failure is retried here. Re-sending a write after a partially
//! processed exchange could apply it twice, so that call belongs to the
//! caller.

use scomlink_hal::{Serial, SerialRx};
use scomlink_protocol::{
    as_float, as_integer, Error, Frame, FrameParser, PropertyHeader, PropertyResponse,
    Transaction, MAX_FRAME_SIZE,
};

use crate::config::{ChannelConfig, ReadMode};

/// Outcome of a successful transaction
///
/// The value itself was copied into the buffer passed to
/// [`Channel::perform`]; `value_len` says how much of it is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reply {
    /// Address of the responding device
    pub source: u32,
    /// Service the response answers
    pub service_id: u8,
    /// Property the response carries
    pub property: PropertyHeader,
    /// Value bytes copied
    pub value_len: usize,
}

impl Reply {
    /// The copied value within the buffer given to `perform`
    pub fn value<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        buf.get(..self.value_len).unwrap_or(buf)
    }

    /// Value as an unsigned integer
    pub fn as_integer(&self, buf: &[u8]) -> u32 {
        as_integer(self.value(buf))
    }

    /// Value as a float
    pub fn as_float(&self, buf: &[u8]) -> f32 {
        as_float(self.value(buf))
    }
}

/// Transaction channel over one serial line
pub struct Channel<S> {
    serial: S,
    config: ChannelConfig,
    scratch: [u8; MAX_FRAME_SIZE],
}

impl<S: Serial> Channel<S> {
    /// Create a channel with the default configuration
    pub fn new(serial: S) -> Self {
        Self::with_config(serial, ChannelConfig::default())
    }

    /// Create a channel with a specific configuration
    pub fn with_config(serial: S, config: ChannelConfig) -> Self {
        Self {
            serial,
            config,
            scratch: [0u8; MAX_FRAME_SIZE],
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Access the serial line, e.g. to drain it between transactions
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Give the serial line back
    pub fn release(self) -> S {
        self.serial
    }

    /// Run one request/response exchange
    ///
    /// The response value is copied into `value`; its length is the
    /// receive capacity for this transaction. A value longer than that
    /// fails with `BufferTooSmall` and nothing is copied.
    pub fn perform(&mut self, tx: &Transaction<'_>, value: &mut [u8]) -> Result<Reply, Error> {
        trace!(
            "perform service {=u8} on {=u32}: object {=u32} property {=u16}",
            tx.service.to_u8(),
            tx.destination,
            tx.property.object_id,
            tx.property.property_id
        );

        self.send(tx)?;

        let mut skipped = 0u8;
        loop {
            let frame = self.receive()?;
            match frame.classify() {
                Ok(response) => return self.accept(tx, &response, value),
                Err(Error::ForeignRequest) if skipped < self.config.foreign_request_retries => {
                    skipped += 1;
                    warn!(
                        "skipping request from {=u32} while awaiting response",
                        frame.header().source
                    );
                }
                Err(Error::ForeignRequest) => {
                    warn!("gave up after {=u8} foreign requests", skipped + 1);
                    return Err(Error::PortReadFailed);
                }
                Err(e) => {
                    debug!("transaction failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    fn send(&mut self, tx: &Transaction<'_>) -> Result<(), Error> {
        let len = tx.encode(&mut self.scratch)?;

        let written = self
            .serial
            .write(&self.scratch[..len])
            .map_err(|_| Error::PortWriteFailed)?;
        if written != len {
            warn!("short write: {=usize} of {=usize} bytes", written, len);
            return Err(Error::PortWriteFailed);
        }
        self.serial.flush().map_err(|_| Error::PortWriteFailed)?;

        trace!("sent {=usize} byte frame", len);
        Ok(())
    }

    /// Read one checksum-valid frame
    ///
    /// While seeking the start byte, reads go one byte at a time and a
    /// timeout is `PortTimeout`. Afterwards each phase asks for exactly
    /// the bytes the parser needs; getting fewer is `PortReadFailed`.
    fn receive(&mut self) -> Result<Frame, Error> {
        let mut parser = FrameParser::new();
        loop {
            let seeking = parser.is_seeking();
            let wanted = parser.remaining();
            let block = &mut self.scratch[..wanted];

            let got = read_block(&mut self.serial, block, self.config.read_mode)
                .map_err(|_| Error::PortReadFailed)?;
            if got < wanted {
                return Err(if seeking {
                    Error::PortTimeout
                } else {
                    Error::PortReadFailed
                });
            }

            match parser.feed_bytes(&self.scratch[..wanted]) {
                Ok(Some(frame)) => return Ok(frame),
                Ok(None) => {}
                Err(e) => {
                    warn!("dropping frame: {}", e);
                    return Err(e);
                }
            }
        }
    }

    fn accept(
        &self,
        tx: &Transaction<'_>,
        response: &PropertyResponse<'_>,
        value: &mut [u8],
    ) -> Result<Reply, Error> {
        if self.config.check_property_header && response.property != tx.property {
            warn!(
                "response for object {=u32}, expected {=u32}",
                response.property.object_id, tx.property.object_id
            );
            return Err(Error::PropertyHeaderMismatch);
        }

        let value_len = response.copy_value(value)?;
        Ok(Reply {
            source: response.source,
            service_id: response.service_id,
            property: response.property,
            value_len,
        })
    }
}

/// Fill `buf` from the line according to `mode`
///
/// Returns the number of bytes read, which is below `buf.len()` only when
/// the transport came up short. Errors are hard transport faults.
fn read_block<R: SerialRx>(
    serial: &mut R,
    buf: &mut [u8],
    mode: ReadMode,
) -> Result<usize, R::Error> {
    match mode {
        ReadMode::FailFast => serial.read(buf),
        ReadMode::Accumulate => {
            let mut filled = 0;
            while filled < buf.len() {
                match serial.read(&mut buf[filled..])? {
                    0 => break,
                    n => filled += n,
                }
            }
            Ok(filled)
        }
    }
}
