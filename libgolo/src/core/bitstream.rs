//! Byte-buffered MSB-first bit I/O over arbitrary byte sinks and sources.

use std::io::{ErrorKind, Read, Write};

use super::types::{Error, Result};

/// Bit-level writer. Bits fill each byte most-significant first; a full
/// byte is pushed to the sink immediately.
pub struct BitWriter<W: Write> {
    sink: W,
    current: u8,
    filled: u8,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            current: 0,
            filled: 0,
        }
    }

    /// Append a single bit (any non-zero value counts as 1).
    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        if bit != 0 {
            self.current |= 1 << (7 - self.filled);
        }

        self.filled += 1;
        if self.filled == 8 {
            self.sink.write_all(&[self.current])?;
            self.current = 0;
            self.filled = 0;
        }
        Ok(())
    }

    /// Append the low `count` bits of `value`, most-significant first.
    /// `count` may be 0 (writes nothing) up to 64.
    pub fn write_bits(&mut self, value: u64, count: u32) -> Result<()> {
        debug_assert!(count <= 64);
        for i in (0..count).rev() {
            self.write_bit(((value >> i) & 1) as u8)?;
        }
        Ok(())
    }

    /// Emit the trailing partial byte, padded with zero bits, and flush
    /// the sink. Calling flush again is a no-op until more bits arrive.
    pub fn flush(&mut self) -> Result<()> {
        if self.filled > 0 {
            self.sink.write_all(&[self.current])?;
            self.current = 0;
            self.filled = 0;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and release the underlying sink. Consuming the writer is
    /// what closes it; there is no way to write afterwards.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}

/// Bit-level reader, the exact mirror of [`BitWriter`].
pub struct BitReader<R: Read> {
    source: R,
    current: u8,
    remaining: u8,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            current: 0,
            remaining: 0,
        }
    }

    /// Consume one bit. `Ok(None)` signals a clean end of stream.
    pub fn read_bit(&mut self) -> Result<Option<u8>> {
        if self.remaining == 0 {
            let mut byte = [0u8; 1];
            match self.source.read_exact(&mut byte) {
                Ok(()) => {
                    self.current = byte[0];
                    self.remaining = 8;
                }
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(Error::Io(e)),
            }
        }

        self.remaining -= 1;
        Ok(Some((self.current >> self.remaining) & 1))
    }

    /// Consume `count` bits MSB-first. Running out of input mid-group is
    /// an error: the codecs never read past what they wrote.
    pub fn read_bits(&mut self, count: u32) -> Result<u64> {
        debug_assert!(count <= 64);
        let mut value = 0u64;
        for _ in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u64,
                None => return Err(Error::TruncatedCode),
            }
        }
        Ok(value)
    }
}
