//! Sentinel payload helpers.
//!
//! Transfers carry synthetic, verifiable data instead of real payloads:
//! server-generated read data is filled with one fixed byte, client-generated
//! write data with another. Correctness is then a pure scan of the buffer.

/// Every byte of a read reply's payload must equal this value (ASCII 'D').
pub const READ_SENTINEL: u8 = 68;

/// Every byte of a write request's payload must equal this value (ASCII 'E').
pub const WRITE_SENTINEL: u8 = 69;

/// Allocate a buffer of exactly `len` bytes, each set to `sentinel`.
pub fn fill(len: usize, sentinel: u8) -> Vec<u8> {
    vec![sentinel; len]
}

/// Scan `data` and return the first byte that differs from `sentinel`,
/// as `(index, actual_value)`. The scan stops at the first mismatch.
pub fn first_mismatch(data: &[u8], sentinel: u8) -> Option<(usize, u8)> {
    data.iter()
        .enumerate()
        .find(|(_, byte)| **byte != sentinel)
        .map(|(index, byte)| (index, *byte))
}
