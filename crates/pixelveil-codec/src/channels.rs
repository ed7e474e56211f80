//! Logical to physical channel addressing.
//!
//! A *logical channel index* counts only the R/G/B channels of a row-major
//! RGBA buffer, skipping every alpha byte. The bijection to physical byte
//! offsets is `phys(L) = 4·⌊L/3⌋ + (L mod 3)`; alpha bytes
//! (`P mod 4 == 3`) have no logical preimage.

use crate::header::CarrierHeader;

/// Addressable channels per pixel (R, G, B; alpha is reserved).
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Bytes per pixel in the carrier layout (RGBA).
pub const BYTES_PER_PIXEL: usize = 4;

/// Capacity margin reserved for the 128-bit authentication tag the
/// envelope appends to every ciphertext.
const TAG_MARGIN_BITS: usize = 128;

/// Physical byte offset of a logical channel index.
#[must_use]
pub fn physical_index(logical: usize) -> usize {
    BYTES_PER_PIXEL * (logical / CHANNELS_PER_PIXEL) + logical % CHANNELS_PER_PIXEL
}

/// Logical channel index of a physical byte offset.
///
/// Returns `None` for alpha bytes, which have no logical index.
#[must_use]
pub fn logical_index(physical: usize) -> Option<usize> {
    let channel = physical % BYTES_PER_PIXEL;
    if channel == CHANNELS_PER_PIXEL {
        return None;
    }
    Some(CHANNELS_PER_PIXEL * (physical / BYTES_PER_PIXEL) + channel)
}

/// Total logical channels for an image of the given dimensions.
#[must_use]
pub fn channel_capacity(width: u32, height: u32) -> usize {
    CHANNELS_PER_PIXEL * width as usize * height as usize
}

/// Total logical channels addressable in a raw RGBA buffer.
///
/// A trailing partial pixel (buffer length not a multiple of 4) is not
/// addressable.
#[must_use]
pub fn buffer_capacity(pixels: &[u8]) -> usize {
    CHANNELS_PER_PIXEL * (pixels.len() / BYTES_PER_PIXEL)
}

/// Largest plaintext, in bytes, an image of the given dimensions can carry.
///
/// Subtracts the 272 header bits and the fixed 128-bit tag margin from the
/// channel capacity. Drivers use this to validate message length before
/// dispatching an encode; the codec enforces the same bound again after
/// encryption.
#[must_use]
pub fn max_payload_bytes(width: u32, height: u32) -> usize {
    channel_capacity(width, height).saturating_sub(CarrierHeader::BITS + TAG_MARGIN_BITS) / 8
}
