//! libgolo - Golomb-coded predictive compression.
//!
//! A teaching codec suite built around one engine: residuals from simple
//! causal predictors, folded to unsigned, entropy-coded with
//! block-adaptive Golomb parameters over an MSB-first bitstream. The
//! engine drives a lossless audio codec (16-bit PCM, optional mid/side
//! stereo) and a lossless grayscale image codec (nine JPEG-style
//! predictors), with a structurally independent lossy DCT path on the
//! side.
//!
//! File-format collaborators (WAV, PPM) live in the CLI crate; this
//! library works on in-memory samples and bitmaps only.

pub mod audio;
pub mod core;
pub mod image;
pub mod lossy;

pub use crate::core::{optimal_m, BitReader, BitWriter, Error, Golomb, Result, SignedMode};

pub use audio::{
    mid_side_forward, mid_side_inverse, AudioDecoder, AudioEncoder, DecodedAudio,
    SampleHistory, DEFAULT_BLOCK_SAMPLES, MAX_PREDICTOR_ORDER,
};
pub use image::{
    GrayImage, ImageDecoder, ImageEncoder, ImageHeader, ImagePredictor, IMAGE_MAGIC,
    MAX_FIXED_M,
};
pub use lossy::{LossyAudio, LossyDecoder, LossyEncoder, PsychoacousticModel};
