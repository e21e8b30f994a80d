//! Two-byte frame checksum
//!
//! Fletcher-style running sum: accumulator A starts at 0xFF, B at 0. For
//! each byte, `A = A + byte` then `B = B + A`, both modulo 256. The result
//! is `[A, B]` in that order on the wire.
//!
//! A single altered byte changes A, and the change then propagates into B
//! for every following byte. This is an integrity check, not
//! authentication.

/// Checksum size on the wire
pub const CHECKSUM_SIZE: usize = 2;

/// Calculate the checksum of a byte span
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let mut a = 0xFFu8;
    let mut b = 0u8;
    for &byte in data {
        a = a.wrapping_add(byte);
        b = b.wrapping_add(a);
    }
    [a, b]
}

/// Check `data` against a received checksum
pub fn verify(data: &[u8], expected: [u8; CHECKSUM_SIZE]) -> bool {
    checksum(data) == expected
}
