//! Orthonormal DCT-II / DCT-III pair, FFT-backed.
//!
//! Forward: X[k] = s(k) * sum_n x[n] * cos(pi * k * (n + 0.5) / N)
//! Inverse: x[n] = sum_k s(k) * X[k] * cos(pi * k * (n + 0.5) / N)
//! with s(0) = sqrt(1/N) and s(k) = sqrt(2/N) otherwise.
//!
//! Both directions run through a single N-point complex FFT using the
//! even/odd permutation: v = [x0, x2, ..., x5, x3, x1], then
//! X_raw[k] = Re(e^{-i*pi*k/2N} * FFT(v)[k]), and the inverse rebuilds
//! the spectrum as V[k] = (X_raw[k] - i*X_raw[N-k]) * e^{+i*pi*k/2N}.

use std::f64::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

pub struct Dct {
    n: usize,
    fft: Arc<dyn Fft<f64>>,
    ifft: Arc<dyn Fft<f64>>,
    /// e^{-i*pi*k/(2N)} for k in 0..N
    twiddle: Vec<Complex<f64>>,
    /// s(k) scale factors
    scale: Vec<f64>,
}

impl Dct {
    /// `n` must be even (the permutation pairs samples two at a time).
    pub fn new(n: usize) -> Self {
        assert!(n >= 2 && n % 2 == 0, "transform size must be even");

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        let ifft = planner.plan_fft_inverse(n);

        let twiddle = (0..n)
            .map(|k| {
                let theta = PI * k as f64 / (2.0 * n as f64);
                Complex::new(theta.cos(), -theta.sin())
            })
            .collect();

        let mut scale = vec![(2.0 / n as f64).sqrt(); n];
        scale[0] = (1.0 / n as f64).sqrt();

        Dct {
            n,
            fft,
            ifft,
            twiddle,
            scale,
        }
    }

    /// Orthonormal DCT-II of exactly `n` samples.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        assert_eq!(input.len(), self.n);
        let n = self.n;

        let mut buffer = vec![Complex::new(0.0, 0.0); n];
        for i in 0..n / 2 {
            buffer[i] = Complex::new(input[2 * i], 0.0);
            buffer[n - 1 - i] = Complex::new(input[2 * i + 1], 0.0);
        }
        self.fft.process(&mut buffer);

        (0..n)
            .map(|k| (self.twiddle[k] * buffer[k]).re * self.scale[k])
            .collect()
    }

    /// Orthonormal DCT-III, the exact inverse of [`Dct::forward`].
    pub fn inverse(&self, coeffs: &[f64]) -> Vec<f64> {
        assert_eq!(coeffs.len(), self.n);
        let n = self.n;

        // Undo the orthonormal scale to recover the raw cosine sums.
        let raw: Vec<f64> = (0..n).map(|k| coeffs[k] / self.scale[k]).collect();

        let mut spectrum = vec![Complex::new(0.0, 0.0); n];
        spectrum[0] = Complex::new(raw[0], 0.0);
        for k in 1..n {
            let v = Complex::new(raw[k], -raw[n - k]);
            spectrum[k] = v * self.twiddle[k].conj();
        }
        self.ifft.process(&mut spectrum);

        let norm = 1.0 / n as f64;
        let mut output = vec![0.0; n];
        for i in 0..n / 2 {
            output[2 * i] = spectrum[i].re * norm;
            output[2 * i + 1] = spectrum[n - 1 - i].re * norm;
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct evaluation of the defining cosine sums.
    fn naive_forward(input: &[f64]) -> Vec<f64> {
        let n = input.len();
        (0..n)
            .map(|k| {
                let scale = if k == 0 {
                    (1.0 / n as f64).sqrt()
                } else {
                    (2.0 / n as f64).sqrt()
                };
                let sum: f64 = input
                    .iter()
                    .enumerate()
                    .map(|(i, &x)| x * (PI * k as f64 * (i as f64 + 0.5) / n as f64).cos())
                    .sum();
                sum * scale
            })
            .collect()
    }

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 * 0.37).sin() * 0.8).collect()
    }

    #[test]
    fn forward_matches_the_cosine_sum() {
        for n in [2, 8, 16, 64] {
            let input = ramp(n);
            let fast = Dct::new(n).forward(&input);
            let naive = naive_forward(&input);
            for (a, b) in fast.iter().zip(naive.iter()) {
                assert!((a - b).abs() < 1e-9, "n={n}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn inverse_undoes_forward() {
        for n in [2, 16, 1024] {
            let input = ramp(n);
            let dct = Dct::new(n);
            let restored = dct.inverse(&dct.forward(&input));
            for (a, b) in input.iter().zip(restored.iter()) {
                assert!((a - b).abs() < 1e-9, "n={n}: {a} vs {b}");
            }
        }
    }
}
