//! The scan, encode, and decode operations.

use pixelveil_codec::{
    CarrierHeader, Detection, ScatterSequence, Signature, bits, channels, max_payload_bytes,
};
use pixelveil_crypto::{NONCE_SIZE, SALT_SIZE, derive_key, open, seal};

use crate::{
    env::Environment,
    error::StegoError,
    progress::{Phase, ProgressSink},
};

/// Scatter step budget per payload bit. The walk needs fewer than two
/// steps per bit on average; exceeding this means the LCG parameters are
/// wrong, not that the input is bad.
const SCATTER_STEP_FACTOR: u64 = 100;

/// Progress notches emitted while embedding or extracting.
const PROGRESS_NOTCHES: usize = 20;

/// Match a buffer's first 16 header bits against the carrier signatures.
///
/// Touches no cryptography and allocates nothing beyond a 2-byte
/// accumulator; buffers too small for a signature detect as
/// [`Detection::None`].
#[must_use]
pub fn scan(pixels: &[u8]) -> Detection {
    CarrierHeader::scan(pixels)
}

/// Hide `plaintext` in the carrier, in place.
///
/// Writes the header frame sequentially into logical channels `0..272`,
/// then embeds the sealed ciphertext at the channels visited by the
/// scatter walk seeded from the fresh salt. On success the buffer holds
/// the finished carrier; alpha bytes and all bits above the LSB plane are
/// untouched.
///
/// # Errors
///
/// - `StegoError::OutOfRange` if `pixels.len() != 4·width·height`
/// - `StegoError::CapacityExceeded` if the plaintext (or its sealed
///   ciphertext) does not fit the body region
pub fn encode<E, P>(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    plaintext: &str,
    password: &str,
    env: &E,
    progress: &mut P,
) -> Result<(), StegoError>
where
    E: Environment,
    P: ProgressSink,
{
    check_dimensions(pixels, width, height)?;
    progress.phase(Phase::Analyzing);

    let result = embed(pixels, width, height, plaintext, password, env, progress);
    if let Err(err) = result {
        progress.phase(Phase::Idle);
        return Err(err);
    }

    progress.phase(Phase::Rendering);
    progress.phase(Phase::Idle);
    Ok(())
}

fn embed<E, P>(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    plaintext: &str,
    password: &str,
    env: &E,
    progress: &mut P,
) -> Result<(), StegoError>
where
    E: Environment,
    P: ProgressSink,
{
    let max_bytes = max_payload_bytes(width, height);
    if plaintext.len() > max_bytes {
        return Err(StegoError::CapacityExceeded { max_bytes });
    }

    let mut salt = [0u8; SALT_SIZE];
    env.random_bytes(&mut salt);
    let mut nonce = [0u8; NONCE_SIZE];
    env.random_bytes(&mut nonce);

    let key = derive_key(password, &salt);
    let ciphertext = seal(&key, &nonce, plaintext.as_bytes());
    drop(key);

    // Re-checked after sealing because the tag length is fixed by the
    // primitive, not by the capacity predictor.
    let payload_bits = ciphertext.len() * 8;
    let capacity = channels::channel_capacity(width, height);
    if CarrierHeader::BITS + payload_bits > capacity {
        return Err(StegoError::CapacityExceeded { max_bytes });
    }

    let header = CarrierHeader {
        signature: if password.is_empty() { Signature::Open } else { Signature::Locked },
        salt,
        nonce,
        payload_bits: payload_bits as u32,
    };
    header.write_to(pixels)?;

    progress.phase(Phase::Processing);
    let mut walk = ScatterSequence::new(
        header.scatter_seed(),
        capacity - CarrierHeader::BITS,
        SCATTER_STEP_FACTOR * payload_bits as u64,
    );
    let stride = payload_bits.div_ceil(PROGRESS_NOTCHES);
    for index in 0..payload_bits {
        let bit = (ciphertext[index / 8] >> (7 - index % 8)) & 1;
        let body_channel = walk.next_index()?;
        bits::write_lsb(pixels, CarrierHeader::BITS + body_channel, bit)?;
        if (index + 1) % stride == 0 {
            progress.percent(((index + 1) * 100 / payload_bits) as u8);
        }
    }
    progress.percent(100);
    Ok(())
}

/// Recover the hidden plaintext from a carrier.
///
/// Reads the header frame, rebuilds the scatter walk from the recovered
/// salt, extracts the ciphertext, and opens the envelope with the key
/// derived from `password` and the recovered salt.
///
/// # Errors
///
/// - `StegoError::OutOfRange` if `pixels.len() != 4·width·height`
/// - `StegoError::NoSignature` if the buffer is not a carrier
/// - `StegoError::CorruptHeader` if the declared payload length is zero,
///   not byte-aligned, or past the body capacity
/// - `StegoError::WrongPasswordOrTampered` if the tag does not verify
/// - `StegoError::CorruptPlaintext` if the payload is not valid UTF-8
pub fn decode<P>(
    pixels: &[u8],
    width: u32,
    height: u32,
    password: &str,
    progress: &mut P,
) -> Result<String, StegoError>
where
    P: ProgressSink,
{
    check_dimensions(pixels, width, height)?;
    progress.phase(Phase::Analyzing);

    let result = extract(pixels, width, height, password, progress);
    if result.is_err() {
        progress.phase(Phase::Idle);
        return result;
    }

    progress.phase(Phase::Rendering);
    progress.phase(Phase::Idle);
    result
}

fn extract<P>(
    pixels: &[u8],
    width: u32,
    height: u32,
    password: &str,
    progress: &mut P,
) -> Result<String, StegoError>
where
    P: ProgressSink,
{
    let header = CarrierHeader::read_from(pixels)?;
    let capacity = channels::channel_capacity(width, height);
    header.validate(capacity)?;

    progress.phase(Phase::Processing);
    let payload_bits = header.payload_bits as usize;
    let mut walk = ScatterSequence::new(
        header.scatter_seed(),
        capacity - CarrierHeader::BITS,
        SCATTER_STEP_FACTOR * payload_bits as u64,
    );
    let mut ciphertext = vec![0u8; payload_bits / 8];
    let stride = payload_bits.div_ceil(PROGRESS_NOTCHES);
    for index in 0..payload_bits {
        let body_channel = walk.next_index()?;
        let bit = bits::read_lsb(pixels, CarrierHeader::BITS + body_channel)?;
        ciphertext[index / 8] |= bit << (7 - index % 8);
        if (index + 1) % stride == 0 {
            progress.percent(((index + 1) * 100 / payload_bits) as u8);
        }
    }
    progress.percent(100);

    let key = derive_key(password, &header.salt);
    let plaintext = open(&key, &header.nonce, &ciphertext)?;
    drop(key);

    String::from_utf8(plaintext).map_err(|_| StegoError::CorruptPlaintext)
}

/// Reject buffers whose length disagrees with the declared dimensions.
fn check_dimensions(pixels: &[u8], width: u32, height: u32) -> Result<(), StegoError> {
    let expected = channels::BYTES_PER_PIXEL * width as usize * height as usize;
    if pixels.len() != expected {
        return Err(StegoError::OutOfRange { index: pixels.len(), capacity: expected });
    }
    Ok(())
}
