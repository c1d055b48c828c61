//! common types for the golo codec suite

use thiserror::Error;

/// Longest unary quotient run the decoders accept before declaring the
/// stream corrupt. Bounds reachable |residual| at roughly 100 000 * m,
/// far beyond anything a valid stream produces.
pub const MAX_UNARY_RUN: u32 = 100_000;

/// error type shared by every codec in the suite
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The bitstream ended in the middle of a code word.
    #[error("unexpected end of stream inside a code")]
    TruncatedCode,

    #[error("corrupt stream: {0}")]
    CorruptCode(String),

    /// Only produced by the text bit-string parser of the standalone
    /// Golomb tool.
    #[error("bit strings may only contain '0' and '1', found {0:?}")]
    BadBitString(char),
}

/// result type for golo operations
pub type Result<T> = std::result::Result<T, Error>;
