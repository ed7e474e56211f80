//! Single-bit reads and writes on the LSB plane.
//!
//! Both primitives address channels by logical index, so alpha bytes are
//! unreachable by construction. Only bit 0 of a channel is ever observed
//! or modified; bits 1-7 pass through untouched.

use crate::{channels, error::CodecError};

/// Read the least-significant bit of the channel at `logical`.
///
/// # Errors
///
/// - `CodecError::OutOfRange` if `logical` is past the buffer's channel
///   capacity
pub fn read_lsb(pixels: &[u8], logical: usize) -> Result<u8, CodecError> {
    let capacity = channels::buffer_capacity(pixels);
    if logical >= capacity {
        return Err(CodecError::OutOfRange { index: logical, capacity });
    }
    Ok(pixels[channels::physical_index(logical)] & 1)
}

/// Overwrite the least-significant bit of the channel at `logical`.
///
/// Only bit 0 of `bit` is used.
///
/// # Errors
///
/// - `CodecError::OutOfRange` if `logical` is past the buffer's channel
///   capacity
pub fn write_lsb(pixels: &mut [u8], logical: usize, bit: u8) -> Result<(), CodecError> {
    let capacity = channels::buffer_capacity(pixels);
    if logical >= capacity {
        return Err(CodecError::OutOfRange { index: logical, capacity });
    }
    let byte = &mut pixels[channels::physical_index(logical)];
    *byte = (*byte & !1) | (bit & 1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let mut pixels = vec![0u8; 4 * 4];
        for logical in 0..12 {
            write_lsb(&mut pixels, logical, (logical % 2) as u8).unwrap();
        }
        for logical in 0..12 {
            assert_eq!(read_lsb(&pixels, logical).unwrap(), (logical % 2) as u8);
        }
    }

    #[test]
    fn write_preserves_upper_bits() {
        let mut pixels = vec![0b1010_1110u8; 8];
        write_lsb(&mut pixels, 0, 1).unwrap();
        assert_eq!(pixels[0], 0b1010_1111);
        write_lsb(&mut pixels, 0, 0).unwrap();
        assert_eq!(pixels[0], 0b1010_1110);
    }

    #[test]
    fn alpha_bytes_are_unreachable() {
        let mut pixels = vec![0xFFu8; 4 * 2];
        for logical in 0..6 {
            write_lsb(&mut pixels, logical, 0).unwrap();
        }
        assert_eq!(pixels[3], 0xFF);
        assert_eq!(pixels[7], 0xFF);
    }

    #[test]
    fn rejects_index_past_capacity() {
        let mut pixels = vec![0u8; 4 * 2];
        assert_eq!(
            read_lsb(&pixels, 6),
            Err(CodecError::OutOfRange { index: 6, capacity: 6 })
        );
        assert_eq!(
            write_lsb(&mut pixels, 100, 1),
            Err(CodecError::OutOfRange { index: 100, capacity: 6 })
        );
    }

    #[test]
    fn only_bit_zero_of_the_bit_argument_is_used() {
        let mut pixels = vec![0u8; 4];
        write_lsb(&mut pixels, 0, 0b1111_0110).unwrap();
        assert_eq!(pixels[0], 0);
        write_lsb(&mut pixels, 0, 0b1111_0111).unwrap();
        assert_eq!(pixels[0], 1);
    }
}
