//! Resynchronizing frame parser
//!
//! Bytes are fed in one at a time or in slices. The parser hunts for the
//! start byte, collects the 13-byte header block, and only then knows how
//! many body bytes to collect. Garbage before a start byte is skipped, and
//! any validation failure drops the parser back to hunting.
//!
//! [`FrameParser::remaining`] reports how many bytes complete the current
//! phase, so a blocking reader can ask the transport for exactly that many
//! and treat a short read as a failure.

use heapless::Vec;

use crate::checksum::{verify, CHECKSUM_SIZE};
use crate::error::Error;
use crate::frame::{
    Frame, FrameHeader, HEADER_BLOCK_SIZE, HEADER_SIZE, MAX_BODY_SIZE, START_MARKER,
};
use crate::property::SERVICE_HEADER_SIZE;

/// Largest block the parser buffers: a full body plus its checksum
const MAX_BLOCK_SIZE: usize = MAX_BODY_SIZE + CHECKSUM_SIZE;

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_BLOCK_SIZE>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Discarding bytes until START
    SeekStart,
    /// Collecting header and header checksum
    ReadingHeader,
    /// Collecting body and body checksum
    ReadingBody(FrameHeader),
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::SeekStart,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::SeekStart;
        self.buffer.clear();
    }

    /// True while hunting for a start byte
    pub fn is_seeking(&self) -> bool {
        self.state == ParseState::SeekStart
    }

    /// Bytes needed to finish the current phase
    ///
    /// 1 while seeking, then the rest of the header block, then the rest
    /// of the body and its checksum.
    pub fn remaining(&self) -> usize {
        match self.state {
            ParseState::SeekStart => 1,
            ParseState::ReadingHeader => HEADER_BLOCK_SIZE - self.buffer.len(),
            ParseState::ReadingBody(header) => {
                header.body_length as usize + CHECKSUM_SIZE - self.buffer.len()
            }
        }
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, Error> {
        match self.state {
            ParseState::SeekStart => {
                if byte == START_MARKER {
                    self.buffer.clear();
                    self.state = ParseState::ReadingHeader;
                }
                // Silently ignore non-START bytes while waiting
                Ok(None)
            }
            ParseState::ReadingHeader => {
                self.push(byte)?;
                if self.buffer.len() == HEADER_BLOCK_SIZE {
                    let header = self.validate_header()?;
                    self.buffer.clear();
                    self.state = ParseState::ReadingBody(header);
                }
                Ok(None)
            }
            ParseState::ReadingBody(header) => {
                self.push(byte)?;
                if self.buffer.len() == header.body_length as usize + CHECKSUM_SIZE {
                    let frame = self.validate_body(header);
                    self.reset();
                    return frame.map(Some);
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, Error> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    fn push(&mut self, byte: u8) -> Result<(), Error> {
        if self.buffer.push(byte).is_err() {
            // Unreachable while body_length is bounded by validate_header
            self.reset();
            return Err(Error::BufferTooSmall);
        }
        Ok(())
    }

    fn validate_header(&mut self) -> Result<FrameHeader, Error> {
        let (header_bytes, sum) = self.buffer.split_at(HEADER_SIZE);
        let header_bytes: &[u8; HEADER_SIZE] =
            header_bytes.try_into().map_err(|_| Error::InvalidFrame)?;

        if !verify(header_bytes, [sum[0], sum[1]]) {
            self.reset();
            return Err(Error::HeaderChecksumMismatch);
        }

        let header = FrameHeader::from_bytes(header_bytes);
        let body_length = header.body_length as usize;
        if body_length < SERVICE_HEADER_SIZE {
            self.reset();
            return Err(Error::InvalidFrame);
        }
        if body_length > MAX_BODY_SIZE {
            self.reset();
            return Err(Error::BufferTooSmall);
        }

        Ok(header)
    }

    fn validate_body(&self, header: FrameHeader) -> Result<Frame, Error> {
        let (body, sum) = self.buffer.split_at(header.body_length as usize);
        if !verify(body, [sum[0], sum[1]]) {
            return Err(Error::BodyChecksumMismatch);
        }
        Frame::from_parts(header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{BodyFlags, MAX_FRAME_SIZE};
    use crate::property::PropertyHeader;

    fn response_bytes(value: &[u8]) -> Vec<u8, MAX_FRAME_SIZE> {
        Frame::property(
            101,
            1,
            BodyFlags::response(),
            1,
            PropertyHeader::new(1, 3000, 1),
            value,
        )
        .unwrap()
        .encode_to_vec()
        .unwrap()
    }

    #[test]
    fn test_parser_roundtrip() {
        let encoded = response_bytes(&[1, 2, 3, 4]);

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&encoded).unwrap().unwrap();

        assert_eq!(parsed.header().source, 101);
        assert_eq!(parsed.header().destination, 1);
        assert_eq!(parsed.value(), &[1, 2, 3, 4]);
        assert!(parser.is_seeking());
    }

    #[test]
    fn test_parser_remaining_phases() {
        let encoded = response_bytes(&[9, 9]);
        let mut parser = FrameParser::new();

        assert_eq!(parser.remaining(), 1);
        parser.feed(encoded[0]).unwrap();
        assert_eq!(parser.remaining(), 13);

        parser.feed_bytes(&encoded[1..5]).unwrap();
        assert_eq!(parser.remaining(), 9);

        parser.feed_bytes(&encoded[5..14]).unwrap();
        // body of 12 bytes plus checksum
        assert_eq!(parser.remaining(), 14);

        let frame = parser.feed_bytes(&encoded[14..]).unwrap();
        assert!(frame.is_some());
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let encoded = response_bytes(&[]);

        let mut data = Vec::<u8, 64>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12, 0x34]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.property_header(), Some(PropertyHeader::new(1, 3000, 1)));
    }

    #[test]
    fn test_parser_invalid_header_checksum() {
        let mut encoded = response_bytes(&[]);
        encoded[12] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(Error::HeaderChecksumMismatch));
        assert!(parser.is_seeking());
    }

    #[test]
    fn test_parser_invalid_body_checksum() {
        let mut encoded = response_bytes(&[1, 2]);
        let last_idx = encoded.len() - 1;
        encoded[last_idx] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(Error::BodyChecksumMismatch));
        assert!(parser.is_seeking());
    }

    #[test]
    fn test_parser_recovers_after_error() {
        let mut corrupt = response_bytes(&[]);
        corrupt[3] ^= 0x10;
        let good = response_bytes(&[7]);

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&corrupt), Err(Error::HeaderChecksumMismatch));
        let frame = parser.feed_bytes(&good).unwrap().unwrap();
        assert_eq!(frame.value(), &[7]);
    }

    #[test]
    fn test_parser_rejects_oversized_body_length() {
        let header = FrameHeader {
            flags: 0,
            source: 101,
            destination: 1,
            body_length: (MAX_BODY_SIZE + 1) as u16,
        };
        let bytes = header.to_bytes();
        let sum = crate::checksum::checksum(&bytes);

        let mut parser = FrameParser::new();
        parser.feed(START_MARKER).unwrap();
        parser.feed_bytes(&bytes).unwrap();
        assert_eq!(parser.feed_bytes(&sum), Err(Error::BufferTooSmall));
    }

    #[test]
    fn test_parser_rejects_empty_body() {
        let header = FrameHeader {
            flags: 0,
            source: 101,
            destination: 1,
            body_length: 1,
        };
        let bytes = header.to_bytes();
        let sum = crate::checksum::checksum(&bytes);

        let mut parser = FrameParser::new();
        parser.feed(START_MARKER).unwrap();
        parser.feed_bytes(&bytes).unwrap();
        assert_eq!(parser.feed_bytes(&sum), Err(Error::InvalidFrame));
    }

    #[test]
    fn test_parser_leaves_trailing_bytes() {
        let first = response_bytes(&[1]);
        let second = response_bytes(&[2]);

        let mut data = Vec::<u8, 128>::new();
        data.extend_from_slice(&first).unwrap();
        data.extend_from_slice(&second).unwrap();

        let mut parser = FrameParser::new();
        let frame = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(frame.value(), &[1]);

        let frame = parser.feed_bytes(&data[first.len()..]).unwrap().unwrap();
        assert_eq!(frame.value(), &[2]);
    }
}
