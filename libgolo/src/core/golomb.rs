//! Golomb coding with truncated-binary remainders.
//!
//! A value u >= 0 is coded as a unary quotient (u / m zero bits followed
//! by a single one bit) and a truncated-binary remainder of u % m. With
//! b = ceil(log2 m) and cutoff = 2^b - m, remainders below the cutoff use
//! b-1 bits and the rest use b bits shifted up by the cutoff. Signed
//! values are folded to unsigned first, either by interleaving or with an
//! explicit sign bit.

use std::io::{Read, Write};

use super::bitstream::{BitReader, BitWriter};
use super::types::{Error, Result, MAX_UNARY_RUN};

/// How signed values are mapped onto the unsigned code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignedMode {
    /// 0, 1, -1, 2, -2, ... -> 0, 2, 1, 4, 3, ...
    #[default]
    Interleaving,
    /// One leading sign bit, then |v| coded as unsigned.
    SignMagnitude,
}

/// Golomb coder for a fixed parameter m >= 1.
#[derive(Debug, Clone, Copy)]
pub struct Golomb {
    m: u32,
    b: u32,
    cutoff: u32,
    mode: SignedMode,
}

impl Golomb {
    /// Create a coder with interleaved signed folding.
    pub fn new(m: u32) -> Result<Self> {
        Self::with_mode(m, SignedMode::Interleaving)
    }

    pub fn with_mode(m: u32, mode: SignedMode) -> Result<Self> {
        if m == 0 {
            return Err(Error::InvalidParameter(
                "golomb parameter m must be greater than 0".into(),
            ));
        }

        // b = ceil(log2(m)), 0 when m = 1
        let b = if m == 1 {
            0
        } else {
            32 - (m - 1).leading_zeros()
        };
        let cutoff = ((1u64 << b) - m as u64) as u32;

        Ok(Golomb { m, b, cutoff, mode })
    }

    /// Force at least one remainder bit per code word. m = 1 would
    /// otherwise carry no remainder field at all; the image container
    /// applies this forcing on both sides of the stream. The cutoff keeps
    /// the value computed from the unforced b, so every m = 1 remainder
    /// lands in the wide branch and costs exactly one bit.
    pub fn with_min_remainder_bits(mut self) -> Self {
        if self.b == 0 {
            self.b = 1;
        }
        self
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn mode(&self) -> SignedMode {
        self.mode
    }

    /// Interleaving fold from signed to unsigned.
    pub fn map_to_unsigned(value: i32) -> u32 {
        if value >= 0 {
            (value as u32) << 1
        } else {
            ((-(value as i64)) as u64 * 2 - 1) as u32
        }
    }

    /// Inverse of [`Golomb::map_to_unsigned`].
    pub fn map_to_signed(mapped: u32) -> i32 {
        if mapped & 1 == 0 {
            (mapped >> 1) as i32
        } else {
            -(((mapped as u64 + 1) >> 1) as i64) as i32
        }
    }

    /// Write the code word of an unsigned value.
    pub fn encode_unsigned<W: Write>(&self, writer: &mut BitWriter<W>, value: u32) -> Result<()> {
        let q = value / self.m;
        let r = value % self.m;

        for _ in 0..q {
            writer.write_bit(0)?;
        }
        writer.write_bit(1)?;

        if self.b == 0 {
            return Ok(());
        }
        if r < self.cutoff {
            writer.write_bits(r as u64, self.b - 1)?;
        } else {
            writer.write_bits((r + self.cutoff) as u64, self.b)?;
        }
        Ok(())
    }

    /// Read one unsigned code word.
    pub fn decode_unsigned<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u32> {
        let mut q = 0u32;
        loop {
            match reader.read_bit()? {
                None => return Err(Error::TruncatedCode),
                Some(0) => {
                    q += 1;
                    if q > MAX_UNARY_RUN {
                        return Err(Error::CorruptCode(
                            "unary quotient exceeds sanity limit".into(),
                        ));
                    }
                }
                Some(_) => break,
            }
        }

        let r = if self.b == 0 {
            0
        } else {
            let mut r = reader.read_bits(self.b - 1)? as u32;
            if r >= self.cutoff {
                let bit = match reader.read_bit()? {
                    Some(bit) => bit,
                    None => return Err(Error::TruncatedCode),
                };
                r = ((r << 1) | bit as u32) - self.cutoff;
            }
            r
        };

        let value = q as u64 * self.m as u64 + r as u64;
        u32::try_from(value).map_err(|_| Error::CorruptCode("decoded value overflows".into()))
    }

    /// Write the code word of a signed value using the coder's mode.
    pub fn encode_signed<W: Write>(&self, writer: &mut BitWriter<W>, value: i32) -> Result<()> {
        match self.mode {
            SignedMode::Interleaving => self.encode_unsigned(writer, Self::map_to_unsigned(value)),
            SignedMode::SignMagnitude => {
                writer.write_bit(u8::from(value < 0))?;
                self.encode_unsigned(writer, value.unsigned_abs())
            }
        }
    }

    /// Read one signed code word using the coder's mode.
    pub fn decode_signed<R: Read>(&self, reader: &mut BitReader<R>) -> Result<i32> {
        match self.mode {
            SignedMode::Interleaving => Ok(Self::map_to_signed(self.decode_unsigned(reader)?)),
            SignedMode::SignMagnitude => {
                let negative = match reader.read_bit()? {
                    Some(bit) => bit == 1,
                    None => return Err(Error::TruncatedCode),
                };
                let magnitude = self.decode_unsigned(reader)? as i64;
                // A negative sign on magnitude 0 still decodes to +0.
                let value = if negative { -magnitude } else { magnitude };
                i32::try_from(value)
                    .map_err(|_| Error::CorruptCode("decoded value overflows".into()))
            }
        }
    }

    /// Encode a signed value to a vector of individual bits (one 0/1 per
    /// element). Used by the standalone Golomb tool, which works on
    /// human-readable bit strings rather than packed bytes.
    pub fn encode_bits(&self, value: i32) -> Vec<u8> {
        let mut bits = Vec::new();

        let mapped = match self.mode {
            SignedMode::Interleaving => Self::map_to_unsigned(value),
            SignedMode::SignMagnitude => {
                bits.push(u8::from(value < 0));
                value.unsigned_abs()
            }
        };

        let q = mapped / self.m;
        let r = mapped % self.m;

        bits.extend(std::iter::repeat(0).take(q as usize));
        bits.push(1);

        if self.b > 0 {
            if r < self.cutoff {
                for i in (0..self.b - 1).rev() {
                    bits.push(((r >> i) & 1) as u8);
                }
            } else {
                let adjusted = r + self.cutoff;
                for i in (0..self.b).rev() {
                    bits.push(((adjusted >> i) & 1) as u8);
                }
            }
        }

        bits
    }

    /// Decode one value from a slice of individual bits, returning the
    /// value and the number of bits consumed.
    pub fn decode_bits(&self, bits: &[u8]) -> Result<(i32, usize)> {
        let mut pos = 0usize;

        let negative = if self.mode == SignedMode::SignMagnitude {
            let sign = *bits.get(pos).ok_or(Error::TruncatedCode)?;
            pos += 1;
            sign == 1
        } else {
            false
        };

        let mut q = 0u32;
        loop {
            match bits.get(pos) {
                None => return Err(Error::TruncatedCode),
                Some(&0) => {
                    q += 1;
                    pos += 1;
                    if q > MAX_UNARY_RUN {
                        return Err(Error::CorruptCode(
                            "unary quotient exceeds sanity limit".into(),
                        ));
                    }
                }
                Some(_) => {
                    pos += 1;
                    break;
                }
            }
        }

        let mut r = 0u32;
        if self.b > 0 {
            for _ in 0..self.b - 1 {
                let bit = *bits.get(pos).ok_or(Error::TruncatedCode)?;
                pos += 1;
                r = (r << 1) | bit as u32;
            }
            if r >= self.cutoff {
                let bit = *bits.get(pos).ok_or(Error::TruncatedCode)?;
                pos += 1;
                r = ((r << 1) | bit as u32) - self.cutoff;
            }
        }

        let mapped = q as u64 * self.m as u64 + r as u64;
        let value = match self.mode {
            SignedMode::Interleaving => {
                let mapped = u32::try_from(mapped)
                    .map_err(|_| Error::CorruptCode("decoded value overflows".into()))?;
                Self::map_to_signed(mapped)
            }
            SignedMode::SignMagnitude => {
                let magnitude = mapped as i64;
                let signed = if negative { -magnitude } else { magnitude };
                i32::try_from(signed)
                    .map_err(|_| Error::CorruptCode("decoded value overflows".into()))?
            }
        };

        Ok((value, pos))
    }

    /// Render a bit vector as a string, grouped in bytes for readability.
    pub fn bits_to_string(bits: &[u8]) -> String {
        let mut out = String::with_capacity(bits.len() + bits.len() / 8);
        for (i, bit) in bits.iter().enumerate() {
            out.push(if *bit == 0 { '0' } else { '1' });
            if (i + 1) % 8 == 0 && i + 1 < bits.len() {
                out.push(' ');
            }
        }
        out
    }
}

/// Pick the Golomb parameter that minimizes expected code length for a
/// block of residuals, assuming a geometric distribution of folded values
/// (Golomb 1966): with alpha = meanAbs / (meanAbs + 1), the optimum is
/// m = ceil(-1 / log2(alpha)).
///
/// An empty block is treated as meanAbs = 1.0; the result is always >= 1.
/// Callers clamp the result to whatever their block header can carry.
pub fn optimal_m(residuals: &[i32]) -> u32 {
    let mean_abs = if residuals.is_empty() {
        1.0
    } else {
        let sum_abs: f64 = residuals.iter().map(|&r| (r as i64).abs() as f64).sum();
        sum_abs / residuals.len() as f64
    };

    let alpha = mean_abs / (mean_abs + 1.0);
    let m = (-1.0 / alpha.log2()).ceil() as u32;
    m.max(1)
}
