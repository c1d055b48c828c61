//! WAV samples -> Golomb-coded block stream.

use log::debug;

use crate::core::{optimal_m, BitWriter, Error, Golomb, Result};

use super::predictor::{mid_side_forward, SampleHistory, MAX_PREDICTOR_ORDER};

/// Default frames per block.
pub const DEFAULT_BLOCK_SAMPLES: u32 = 4096;

/// Encoder for the Golomb block audio container.
///
/// Configured once per stream, then fed interleaved 16-bit PCM samples.
/// A parameter of 0 selects a fresh m for every block from that block's
/// residual statistics.
pub struct AudioEncoder {
    sample_rate: u32,
    channels: u16,
    block_samples: u32,
    m: u32,
    predictor_order: u8,
}

impl AudioEncoder {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        AudioEncoder {
            sample_rate,
            channels,
            block_samples: DEFAULT_BLOCK_SAMPLES,
            m: 0,
            predictor_order: 2,
        }
    }

    /// Frames per block (at least 1).
    pub fn with_block_samples(mut self, block_samples: u32) -> Self {
        self.block_samples = block_samples;
        self
    }

    /// Golomb parameter; 0 means block-adaptive.
    pub fn with_parameter(mut self, m: u32) -> Self {
        self.m = m;
        self
    }

    /// Fixed predictor order 0..=3.
    pub fn with_predictor_order(mut self, order: u8) -> Self {
        self.predictor_order = order;
        self
    }

    /// Encode interleaved samples to a complete container.
    pub fn encode(&self, samples: &[i16]) -> Result<Vec<u8>> {
        if self.channels == 0 {
            return Err(Error::UnsupportedFormat("zero channels".into()));
        }
        if self.channels > 2 {
            return Err(Error::UnsupportedFormat(format!(
                "{} channels; only mono and stereo are supported",
                self.channels
            )));
        }
        if self.predictor_order > MAX_PREDICTOR_ORDER {
            return Err(Error::InvalidParameter(format!(
                "predictor order {} out of range 0..=3",
                self.predictor_order
            )));
        }
        if self.block_samples == 0 {
            return Err(Error::InvalidParameter("block size of 0 frames".into()));
        }
        if self.m > u16::MAX as u32 {
            return Err(Error::InvalidParameter(format!(
                "fixed m {} does not fit the 16-bit block header slot",
                self.m
            )));
        }
        if samples.len() % self.channels as usize != 0 {
            return Err(Error::InvalidParameter(
                "sample count is not a whole number of frames".into(),
            ));
        }

        let channels = self.channels as usize;
        let frames = (samples.len() / channels) as u64;

        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(self.sample_rate as u64, 32)?;
        writer.write_bits(self.channels as u64, 16)?;
        writer.write_bits(frames, 64)?;
        writer.write_bits(self.block_samples as u64, 32)?;
        writer.write_bits(self.predictor_order as u64, 8)?;

        let mut history = vec![SampleHistory::new(); channels];
        let mut residuals = Vec::with_capacity(self.block_samples as usize * channels);

        for (block_index, chunk) in samples
            .chunks(self.block_samples as usize * channels)
            .enumerate()
        {
            // Stereo blocks are reparametrized to (mid, side) pairs; the
            // two virtual channels keep separate histories.
            let coded: Vec<i16> = if channels == 2 {
                chunk
                    .chunks_exact(2)
                    .flat_map(|frame| {
                        let (mid, side) = mid_side_forward(frame[0], frame[1]);
                        [mid, side]
                    })
                    .collect()
            } else {
                chunk.to_vec()
            };

            residuals.clear();
            for (i, &sample) in coded.iter().enumerate() {
                let ch = i % channels;
                let prediction = history[ch].predict(self.predictor_order);
                residuals.push(sample as i32 - prediction);
                history[ch].push(sample);
            }

            let block_m = if self.m == 0 {
                optimal_m(&residuals).min(u16::MAX as u32)
            } else {
                self.m
            };
            debug!(
                "audio block {}: m={} residuals={}",
                block_index,
                block_m,
                residuals.len()
            );

            writer.write_bits(block_m as u64, 16)?;
            writer.write_bits(residuals.len() as u64, 32)?;

            let golomb = Golomb::new(block_m)?;
            for &residual in &residuals {
                golomb.encode_signed(&mut writer, residual)?;
            }
        }

        writer.into_inner()
    }
}
