//! Lossy audio path: block DCT with psychoacoustic scalar quantization.
//! Orthogonal to the lossless codecs; shares only the bit I/O layer.

pub mod dct;
pub mod decoder;
pub mod encoder;
pub mod psychoacoustic;

pub use dct::Dct;
pub use decoder::{LossyAudio, LossyDecoder};
pub use encoder::{LossyEncoder, BASE_QUANTIZATION, BLOCK_SIZE, MAX_MAGNITUDE_BITS};
pub use psychoacoustic::PsychoacousticModel;
