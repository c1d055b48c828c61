//! Lossy audio decoder: coefficient decoding, weighted dequantization,
//! inverse DCT.

use std::io::Read;

use crate::core::{BitReader, Error, Result};

use super::dct::Dct;
use super::psychoacoustic::PsychoacousticModel;

/// Read a fixed-width field, reporting a clean `None` if the stream ends
/// anywhere inside it. The container carries no trailing marker, so the
/// decoder treats running dry as the end of the stream rather than an
/// error.
fn try_bits<R: Read>(reader: &mut BitReader<R>, count: u32) -> Result<Option<u64>> {
    let mut value = 0u64;
    for _ in 0..count {
        match reader.read_bit()? {
            Some(bit) => value = (value << 1) | bit as u64,
            None => return Ok(None),
        }
    }
    Ok(Some(value))
}

/// A decoded lossy stream plus its header fields.
#[derive(Debug, Clone)]
pub struct LossyAudio {
    pub sample_rate: u32,
    pub frames: u32,
    pub block_size: usize,
    pub base_step: f64,
    /// Mono samples in [-1.0, 1.0].
    pub samples: Vec<f64>,
}

pub struct LossyDecoder;

impl LossyDecoder {
    pub fn new() -> Self {
        LossyDecoder
    }

    pub fn decode(&self, data: &[u8]) -> Result<LossyAudio> {
        let mut reader = BitReader::new(data);

        let sample_rate = reader.read_bits(32)? as u32;
        let frames = reader.read_bits(32)? as u32;
        let block_size = reader.read_bits(16)? as usize;
        let base_step = reader.read_bits(32)? as f64 / 1_000_000.0;

        if block_size < 2 || block_size % 2 != 0 {
            return Err(Error::CorruptCode(format!(
                "unusable transform block size {block_size}"
            )));
        }

        let dct = Dct::new(block_size);
        let model = PsychoacousticModel::new(block_size);
        let mut quantized = vec![0i32; block_size];
        let mut samples = Vec::with_capacity(frames as usize);

        'blocks: while (samples.len() as u32) < frames {
            // A zero energy field or running out of bits both mean the
            // stream is over; anything already emitted stands.
            let energy_enc = match try_bits(&mut reader, 16)? {
                None => break,
                Some(value) => value as u16,
            };
            if energy_enc == 0 {
                break;
            }
            let energy_factor = energy_enc as f64 / 1000.0;

            for q in quantized.iter_mut() {
                let negative = match try_bits(&mut reader, 1)? {
                    None => break 'blocks,
                    Some(bit) => bit == 1,
                };

                let bits_needed = match try_bits(&mut reader, 5)? {
                    None => break 'blocks,
                    Some(value) => (value as u32).max(1),
                };
                let magnitude = match try_bits(&mut reader, bits_needed)? {
                    None => break 'blocks,
                    Some(value) => value as i64,
                };

                *q = if negative {
                    -magnitude as i32
                } else {
                    magnitude as i32
                };
            }

            let coeffs = model.dequantize(&quantized, base_step, energy_factor);
            let block = dct.inverse(&coeffs);

            let remaining = (frames as usize) - samples.len();
            samples.extend(
                block
                    .iter()
                    .take(remaining)
                    .map(|&s| s.clamp(-1.0, 1.0)),
            );
        }

        Ok(LossyAudio {
            sample_rate,
            frames,
            block_size,
            base_step,
            samples,
        })
    }
}

impl Default for LossyDecoder {
    fn default() -> Self {
        Self::new()
    }
}
