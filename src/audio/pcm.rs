//! Raw PCM payload decoding
//!
//! Speech audio arrives as base64 text wrapping signed 16-bit little-endian
//! mono samples at a fixed 24 kHz rate. This is the only bit-exact format the
//! application owns.

use crate::messages::AudioData;
use crate::{Result, RokoError};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::fmt;

/// Sample rate of synthesized speech
pub const PCM_SAMPLE_RATE: u32 = 24_000;

/// Channel count of synthesized speech
pub const PCM_CHANNELS: u16 = 1;

/// Standard alphabet, padding optional on decode
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64-encoded PCM16 LE mono speech audio
#[derive(Clone, PartialEq, Eq)]
pub struct AudioPayload(String);

impl AudioPayload {
    pub fn new(base64: impl Into<String>) -> Self {
        Self(base64.into())
    }

    /// Encode raw i16 samples, mostly useful for fixtures
    pub fn from_samples(samples: &[i16]) -> Self {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self(STANDARD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Payloads can be several hundred kilobytes; keep logs readable.
impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AudioPayload({} base64 chars)", self.0.len())
    }
}

/// Decode the base64 layer into raw bytes, ignoring whitespace anywhere
pub fn decode_base64(payload: &AudioPayload) -> Result<Vec<u8>> {
    let compact: String = payload
        .as_str()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    LENIENT
        .decode(compact)
        .map_err(|e| RokoError::AudioDecodeError(format!("Invalid base64 payload: {}", e)))
}

/// Reinterpret bytes as i16 LE samples and normalize them to [-1.0, 1.0)
pub fn pcm16_to_f32(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 2 != 0 {
        return Err(RokoError::AudioDecodeError(format!(
            "PCM16 payload has odd byte length {}",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect())
}

/// Decode a payload into a mono buffer at the speech sample rate
pub fn decode_payload(payload: &AudioPayload) -> Result<AudioData> {
    let bytes = decode_base64(payload)?;
    let samples = pcm16_to_f32(&bytes)?;
    Ok(AudioData::new(samples, PCM_SAMPLE_RATE, PCM_CHANNELS))
}
