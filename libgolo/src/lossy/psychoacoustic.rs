//! Frequency-weighted scalar quantization for the lossy audio path.
//!
//! Low DCT bins carry perceptually important content and get a finer
//! quantization step; the step coarsens in tiers toward the top of the
//! spectrum. A per-block energy factor widens the steps for loud blocks.

/// Psychoacoustic weighting and quantization over one DCT block.
pub struct PsychoacousticModel {
    block_size: usize,
}

impl PsychoacousticModel {
    pub fn new(block_size: usize) -> Self {
        PsychoacousticModel { block_size }
    }

    /// Step multiplier for a coefficient index.
    pub fn weight(&self, index: usize) -> f64 {
        let freq_ratio = index as f64 / self.block_size as f64;

        if freq_ratio < 0.1 {
            0.5
        } else if freq_ratio < 0.3 {
            1.0
        } else if freq_ratio < 0.5 {
            1.5
        } else {
            2.5
        }
    }

    /// RMS-derived step multiplier for a whole block, clamped to
    /// [0.5, 2.0].
    pub fn energy_factor(block: &[f64]) -> f64 {
        let energy: f64 = block.iter().map(|&s| s * s).sum();
        let rms = (energy / block.len() as f64).sqrt();
        (rms * 10.0).clamp(0.5, 2.0)
    }

    /// Quantize DCT coefficients with the weighted step.
    pub fn quantize(&self, coeffs: &[f64], base_step: f64, energy_factor: f64) -> Vec<i32> {
        coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let step = base_step * self.weight(i) * energy_factor;
                (c / step).round() as i32
            })
            .collect()
    }

    /// Inverse of [`PsychoacousticModel::quantize`].
    pub fn dequantize(&self, quantized: &[i32], base_step: f64, energy_factor: f64) -> Vec<f64> {
        quantized
            .iter()
            .enumerate()
            .map(|(i, &q)| {
                let step = base_step * self.weight(i) * energy_factor;
                q as f64 * step
            })
            .collect()
    }
}
