//! Lossless audio path: fixed linear prediction per channel, optional
//! mid/side stereo decorrelation, block-adaptive Golomb residual coding.

pub mod decoder;
pub mod encoder;
pub mod predictor;

pub use decoder::{AudioDecoder, DecodedAudio};
pub use encoder::{AudioEncoder, DEFAULT_BLOCK_SAMPLES};
pub use predictor::{
    mid_side_forward, mid_side_inverse, SampleHistory, MAX_PREDICTOR_ORDER,
};
