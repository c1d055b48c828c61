//! Lossless image path: causal 2-D prediction and block-adaptive Golomb
//! residual coding over 8-bit grayscale bitmaps, plus a handful of demo
//! effects.

pub mod bitmap;
pub mod codec;
pub mod effects;
pub mod predictor;

pub use bitmap::GrayImage;
pub use codec::{ImageDecoder, ImageEncoder, ImageHeader, IMAGE_MAGIC, MAX_FIXED_M};
pub use predictor::ImagePredictor;
