//! The 272-bit carrier header frame.
//!
//! The header occupies logical channels 0..272 sequentially, MSB-first
//! within each field, so that a scan is cheap and a decoder can recover the
//! scatter seed without already having it:
//!
//! | Field     | Bits | Semantics                                  |
//! |-----------|------|--------------------------------------------|
//! | Signature | 16   | `0x4453` open, `0x444C` locked             |
//! | Salt      | 128  | Random per message                         |
//! | Nonce     | 96   | Random per message                         |
//! | Length    | 32   | Ciphertext length in bits, big-endian      |
//!
//! The signature deliberately advertises the carrier: detectability is a
//! usability choice, and confidentiality rests on the envelope key, not on
//! obscurity.

use serde::{Deserialize, Serialize};

use crate::{bits, channels, error::CodecError};

/// Carrier signature advertising whether a password is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signature {
    /// No password expected ("DS").
    Open,
    /// Password expected ("DL").
    Locked,
}

impl Signature {
    /// Magic value for an open carrier ("DS").
    pub const OPEN_MAGIC: u16 = 0x4453;

    /// Magic value for a locked carrier ("DL").
    pub const LOCKED_MAGIC: u16 = 0x444C;

    /// The 16-bit magic for this signature.
    #[must_use]
    pub fn magic(self) -> u16 {
        match self {
            Self::Open => Self::OPEN_MAGIC,
            Self::Locked => Self::LOCKED_MAGIC,
        }
    }

    /// Parse a 16-bit magic. `None` if it matches neither signature.
    #[must_use]
    pub fn from_magic(magic: u16) -> Option<Self> {
        match magic {
            Self::OPEN_MAGIC => Some(Self::Open),
            Self::LOCKED_MAGIC => Some(Self::Locked),
            _ => None,
        }
    }
}

/// Outcome of scanning a buffer for a carrier signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detection {
    /// Locked-carrier signature found.
    Locked,
    /// Open-carrier signature found.
    Open,
    /// No recognized signature.
    None,
}

/// The decoded header frame.
///
/// # Invariants
///
/// - `payload_bits` is positive, byte-aligned, and fits the body region
///   (checked by [`CarrierHeader::validate`], not by construction)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierHeader {
    /// Open or locked signature.
    pub signature: Signature,
    /// Per-message random salt.
    pub salt: [u8; Self::SALT_SIZE],
    /// Per-message random AEAD nonce.
    pub nonce: [u8; Self::NONCE_SIZE],
    /// Ciphertext length in bits, including the authentication tag.
    pub payload_bits: u32,
}

impl CarrierHeader {
    /// Size of the serialized header in bits (and in logical channels).
    pub const BITS: usize = 272;

    /// Salt field size in bytes.
    pub const SALT_SIZE: usize = 16;

    /// Nonce field size in bytes.
    pub const NONCE_SIZE: usize = 12;

    /// Serialize the fields into their 34-byte wire order.
    fn to_field_bytes(&self) -> [u8; Self::BITS / 8] {
        let mut bytes = [0u8; Self::BITS / 8];
        bytes[0..2].copy_from_slice(&self.signature.magic().to_be_bytes());
        bytes[2..18].copy_from_slice(&self.salt);
        bytes[18..30].copy_from_slice(&self.nonce);
        bytes[30..34].copy_from_slice(&self.payload_bits.to_be_bytes());
        bytes
    }

    /// Write the header into logical channels `0..272`, MSB-first.
    ///
    /// # Errors
    ///
    /// - `CodecError::OutOfRange` if the buffer holds fewer than 272
    ///   channels
    pub fn write_to(&self, pixels: &mut [u8]) -> Result<(), CodecError> {
        let bytes = self.to_field_bytes();
        for index in 0..Self::BITS {
            let bit = (bytes[index / 8] >> (7 - index % 8)) & 1;
            bits::write_lsb(pixels, index, bit)?;
        }
        Ok(())
    }

    /// Read the header back from logical channels `0..272`.
    ///
    /// Validation runs cheapest-first: the 16-bit signature is matched
    /// before the remaining 256 bits are touched.
    ///
    /// # Errors
    ///
    /// - `CodecError::NoSignature` if the first 16 LSBs match neither magic
    ///   (including buffers too small to hold a signature)
    /// - `CodecError::CorruptHeader` if a signature is present but the
    ///   buffer cannot hold the full frame
    pub fn read_from(pixels: &[u8]) -> Result<Self, CodecError> {
        let signature = match Self::scan(pixels) {
            Detection::Open => Signature::Open,
            Detection::Locked => Signature::Locked,
            Detection::None => return Err(CodecError::NoSignature),
        };

        let capacity = channels::buffer_capacity(pixels);
        if capacity < Self::BITS {
            return Err(CodecError::CorruptHeader {
                reason: format!("header extends past a {capacity}-channel carrier"),
            });
        }

        let mut bytes = [0u8; Self::BITS / 8];
        for index in 16..Self::BITS {
            bytes[index / 8] |= bits::read_lsb(pixels, index)? << (7 - index % 8);
        }

        let mut salt = [0u8; Self::SALT_SIZE];
        salt.copy_from_slice(&bytes[2..18]);
        let mut nonce = [0u8; Self::NONCE_SIZE];
        nonce.copy_from_slice(&bytes[18..30]);
        let payload_bits = u32::from_be_bytes([bytes[30], bytes[31], bytes[32], bytes[33]]);

        Ok(Self { signature, salt, nonce, payload_bits })
    }

    /// Match the first 16 header bits against the carrier signatures.
    ///
    /// Reads nothing past the signature and allocates nothing beyond a
    /// 2-byte accumulator. Buffers too small for a signature detect as
    /// [`Detection::None`].
    #[must_use]
    pub fn scan(pixels: &[u8]) -> Detection {
        let mut magic: u16 = 0;
        for index in 0..16 {
            let Ok(bit) = bits::read_lsb(pixels, index) else {
                return Detection::None;
            };
            magic = magic << 1 | u16::from(bit);
        }
        match Signature::from_magic(magic) {
            Some(Signature::Locked) => Detection::Locked,
            Some(Signature::Open) => Detection::Open,
            None => Detection::None,
        }
    }

    /// Seed for the scatter walk: the little-endian u32 of `salt[0..4]`.
    ///
    /// Both sides derive the seed this way; summing salt bytes instead
    /// would collapse the seed space to roughly 12 bits.
    #[must_use]
    pub fn scatter_seed(&self) -> u32 {
        u32::from_le_bytes([self.salt[0], self.salt[1], self.salt[2], self.salt[3]])
    }

    /// Check the declared payload length against a carrier's capacity.
    ///
    /// # Errors
    ///
    /// - `CodecError::CorruptHeader` if the length is zero, not
    ///   byte-aligned, or exceeds the body region
    pub fn validate(&self, channel_capacity: usize) -> Result<(), CodecError> {
        let payload_bits = self.payload_bits as usize;
        if payload_bits == 0 {
            return Err(CodecError::CorruptHeader {
                reason: "declared payload length is zero".to_string(),
            });
        }
        if payload_bits % 8 != 0 {
            return Err(CodecError::CorruptHeader {
                reason: format!("payload length {payload_bits} bits is not byte-aligned"),
            });
        }
        let body = channel_capacity.saturating_sub(Self::BITS);
        if payload_bits > body {
            return Err(CodecError::CorruptHeader {
                reason: format!("payload length {payload_bits} bits exceeds body capacity {body}"),
            });
        }
        Ok(())
    }
}
