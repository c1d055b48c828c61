pub mod bitstream;
pub mod golomb;
pub mod types;

pub use bitstream::{BitReader, BitWriter};
pub use golomb::{optimal_m, Golomb, SignedMode};
pub use types::{Error, Result, MAX_UNARY_RUN};
