//! Lossy audio encoder: block DCT, psychoacoustic quantization, and a
//! compact sign/length/magnitude coefficient coding.

use log::debug;

use crate::core::{BitWriter, Error, Result};

use super::dct::Dct;
use super::psychoacoustic::PsychoacousticModel;

/// Samples per transform block.
pub const BLOCK_SIZE: usize = 1024;

/// Base quantization step before weighting.
pub const BASE_QUANTIZATION: f64 = 0.002;

/// Widest magnitude field written per coefficient.
pub const MAX_MAGNITUDE_BITS: u32 = 20;

pub struct LossyEncoder {
    sample_rate: u32,
    block_size: usize,
    base_step: f64,
}

impl LossyEncoder {
    pub fn new(sample_rate: u32) -> Self {
        LossyEncoder {
            sample_rate,
            block_size: BLOCK_SIZE,
            base_step: BASE_QUANTIZATION,
        }
    }

    /// Encode mono samples in [-1.0, 1.0] to a complete container.
    pub fn encode(&self, samples: &[f64]) -> Result<Vec<u8>> {
        let frames = u32::try_from(samples.len()).map_err(|_| {
            Error::InvalidParameter("too many frames for the 32-bit header slot".into())
        })?;

        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(self.sample_rate as u64, 32)?;
        writer.write_bits(frames as u64, 32)?;
        writer.write_bits(self.block_size as u64, 16)?;
        writer.write_bits((self.base_step * 1_000_000.0) as u64, 32)?;

        let dct = Dct::new(self.block_size);
        let model = PsychoacousticModel::new(self.block_size);
        let mut buffer = vec![0.0f64; self.block_size];

        for (block_index, chunk) in samples.chunks(self.block_size).enumerate() {
            // The final short block is zero-padded to a full transform.
            buffer[..chunk.len()].copy_from_slice(chunk);
            buffer[chunk.len()..].fill(0.0);

            let energy_factor = PsychoacousticModel::energy_factor(&buffer);
            writer.write_bits((energy_factor * 1000.0) as u64, 16)?;

            let coeffs = dct.forward(&buffer);
            let quantized = model.quantize(&coeffs, self.base_step, energy_factor);
            debug!(
                "lossy block {}: energy_factor={:.3} nonzero={}",
                block_index,
                energy_factor,
                quantized.iter().filter(|&&q| q != 0).count()
            );

            for &coeff in &quantized {
                writer.write_bit(u8::from(coeff < 0))?;
                let magnitude = coeff.unsigned_abs();

                let bits_needed = (32 - magnitude.leading_zeros())
                    .max(1)
                    .min(MAX_MAGNITUDE_BITS);
                writer.write_bits(bits_needed as u64, 5)?;
                writer.write_bits(magnitude as u64, bits_needed)?;
            }
        }

        writer.into_inner()
    }
}
