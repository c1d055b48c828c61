//! Golomb-coded block stream -> PCM samples, the bit-exact mirror of the
//! encoder.

use log::debug;

use crate::core::{BitReader, Error, Golomb, Result};

use super::predictor::{mid_side_inverse, SampleHistory, MAX_PREDICTOR_ORDER};

/// A fully decoded audio stream plus the container header it came from.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: u64,
    pub block_samples: u32,
    pub predictor_order: u8,
    /// Interleaved 16-bit PCM, frames * channels samples.
    pub samples: Vec<i16>,
}

/// Decoder for the Golomb block audio container.
pub struct AudioDecoder;

impl AudioDecoder {
    pub fn new() -> Self {
        AudioDecoder
    }

    pub fn decode(&self, data: &[u8]) -> Result<DecodedAudio> {
        let mut reader = BitReader::new(data);

        let sample_rate = reader.read_bits(32)? as u32;
        let channels = reader.read_bits(16)? as u16;
        let frames = reader.read_bits(64)?;
        let block_samples = reader.read_bits(32)? as u32;
        let predictor_order = reader.read_bits(8)? as u8;

        if channels == 0 {
            return Err(Error::CorruptCode("header advertises zero channels".into()));
        }
        if channels > 2 {
            return Err(Error::UnsupportedFormat(format!(
                "{channels} channels; only mono and stereo are supported"
            )));
        }
        if predictor_order > MAX_PREDICTOR_ORDER {
            return Err(Error::InvalidParameter(format!(
                "predictor order {predictor_order} out of range 0..=3"
            )));
        }

        let channels_usize = channels as usize;
        let total_samples = frames
            .checked_mul(channels as u64)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| Error::CorruptCode("sample count overflows".into()))?;

        let mut history = vec![SampleHistory::new(); channels_usize];
        let mut samples = Vec::with_capacity(total_samples);
        let mut block = Vec::new();
        let mut block_index = 0usize;

        while samples.len() < total_samples {
            let block_m = reader.read_bits(16)? as u32;
            let count = reader.read_bits(32)? as usize;

            if block_m == 0 {
                return Err(Error::CorruptCode("block header with m = 0".into()));
            }
            if count == 0 {
                return Err(Error::CorruptCode(
                    "empty block while samples remain".into(),
                ));
            }
            if count > total_samples - samples.len() {
                return Err(Error::CorruptCode(
                    "block overruns the declared sample count".into(),
                ));
            }
            if channels == 2 && count % 2 != 0 {
                return Err(Error::CorruptCode(
                    "stereo block with an odd residual count".into(),
                ));
            }
            debug!("audio block {block_index}: m={block_m} residuals={count}");
            block_index += 1;

            let golomb = Golomb::new(block_m)?;

            block.clear();
            for i in 0..count {
                let residual = golomb.decode_signed(&mut reader)?;

                let ch = i % channels_usize;
                let prediction = history[ch].predict(predictor_order);
                // Prediction + residual wraps in i16, mirroring the
                // encoder's subtraction.
                let sample = (prediction + residual) as i16;

                block.push(sample);
                history[ch].push(sample);
            }

            if channels == 2 {
                for pair in block.chunks_exact(2) {
                    let (left, right) = mid_side_inverse(pair[0], pair[1]);
                    samples.push(left);
                    samples.push(right);
                }
            } else {
                samples.extend_from_slice(&block);
            }
        }

        Ok(DecodedAudio {
            sample_rate,
            channels,
            frames,
            block_samples,
            predictor_order,
            samples,
        })
    }
}

impl Default for AudioDecoder {
    fn default() -> Self {
        Self::new()
    }
}
