//! Grayscale image -> Golomb-coded container and back.

use log::debug;

use crate::core::{optimal_m, BitReader, BitWriter, Error, Golomb, Result};

use super::bitmap::GrayImage;
use super::predictor::ImagePredictor;

/// Container magic, "GIMG" written MSB-first.
pub const IMAGE_MAGIC: u32 = 0x4749_4D47;

/// Largest fixed m the one-byte header slot can carry.
pub const MAX_FIXED_M: u32 = 255;

/// Parsed container header.
#[derive(Debug, Clone, Copy)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub predictor: ImagePredictor,
    /// 0 means per-block adaptive m; anything else is the fixed m.
    pub m_flag: u8,
    /// Pixels per block as resolved by the encoder (never 0).
    pub block_size: u32,
}

/// Causal neighbors of pixel (x, y): left, up, up-left, 0 off the edge.
fn neighbors(pixels: &[u8], width: u32, x: u32, y: u32) -> (u8, u8, u8) {
    let w = width as usize;
    let (x, y) = (x as usize, y as usize);
    let a = if x > 0 { pixels[y * w + x - 1] } else { 0 };
    let b = if y > 0 { pixels[(y - 1) * w + x] } else { 0 };
    let c = if x > 0 && y > 0 {
        pixels[(y - 1) * w + x - 1]
    } else {
        0
    };
    (a, b, c)
}

/// Encoder for the grayscale image container.
pub struct ImageEncoder {
    predictor: ImagePredictor,
    m: u32,
    block_size: u32,
}

impl ImageEncoder {
    pub fn new(predictor: ImagePredictor) -> Self {
        ImageEncoder {
            predictor,
            m: 0,
            block_size: 0,
        }
    }

    /// Golomb parameter; 0 means block-adaptive, 1..=255 is fixed.
    pub fn with_parameter(mut self, m: u32) -> Self {
        self.m = m;
        self
    }

    /// Pixels per block; 0 resolves to one image row.
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Encode an image to a complete container.
    pub fn encode(&self, image: &GrayImage) -> Result<Vec<u8>> {
        if self.m > MAX_FIXED_M {
            return Err(Error::InvalidParameter(format!(
                "fixed m {} does not fit the one-byte header slot (1..255)",
                self.m
            )));
        }

        let width = image.width();
        let height = image.height();
        let pixels = image.pixels();
        let total_pixels = pixels.len();

        let block_size = if self.block_size == 0 {
            width
        } else {
            self.block_size
        };
        if block_size == 0 {
            return Err(Error::InvalidParameter(
                "cannot encode a zero-width image with row-sized blocks".into(),
            ));
        }

        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(IMAGE_MAGIC as u64, 32)?;
        writer.write_bits(width as u64, 32)?;
        writer.write_bits(height as u64, 32)?;
        writer.write_bits(self.predictor.id() as u64, 8)?;
        writer.write_bits(self.m as u64, 8)?;
        writer.write_bits(block_size as u64, 32)?;

        let mut residuals = Vec::with_capacity(block_size as usize);

        for block_start in (0..total_pixels).step_by(block_size as usize) {
            let current = (block_size as usize).min(total_pixels - block_start);

            residuals.clear();
            for i in 0..current {
                let index = block_start + i;
                let x = (index % width as usize) as u32;
                let y = (index / width as usize) as u32;

                let (a, b, c) = neighbors(pixels, width, x, y);
                let prediction = self.predictor.predict(a, b, c);
                residuals.push(pixels[index] as i32 - prediction);
            }

            let block_m = if self.m == 0 {
                optimal_m(&residuals).clamp(1, MAX_FIXED_M)
            } else {
                self.m
            };
            debug!(
                "image block @{}: m={} residuals={}",
                block_start,
                block_m,
                residuals.len()
            );

            if self.m == 0 {
                writer.write_bits(block_m as u64, 8)?;
            }

            let golomb = Golomb::new(block_m)?.with_min_remainder_bits();
            for &residual in &residuals {
                golomb.encode_signed(&mut writer, residual)?;
            }
        }

        writer.into_inner()
    }

    /// Encode once per predictor, keep the smallest result, and report
    /// which predictor won. The winner is also recorded in the returned
    /// container's header.
    pub fn encode_auto(&self, image: &GrayImage) -> Result<(Vec<u8>, ImagePredictor)> {
        let mut best: Option<(Vec<u8>, ImagePredictor)> = None;

        for predictor in ImagePredictor::ALL {
            let candidate = ImageEncoder {
                predictor,
                m: self.m,
                block_size: self.block_size,
            }
            .encode(image)?;

            debug!(
                "auto-select: predictor {} ({}) -> {} bytes",
                predictor.id(),
                predictor.name(),
                candidate.len()
            );

            match &best {
                Some((bytes, _)) if bytes.len() <= candidate.len() => {}
                _ => best = Some((candidate, predictor)),
            }
        }

        // ALL is non-empty, so a winner always exists.
        Ok(best.expect("at least one predictor candidate"))
    }
}

/// Decoder for the grayscale image container.
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        ImageDecoder
    }

    /// Parse only the fixed-size header.
    pub fn read_header(&self, data: &[u8]) -> Result<ImageHeader> {
        let mut reader = BitReader::new(data);
        self.parse_header(&mut reader)
    }

    fn parse_header<R: std::io::Read>(&self, reader: &mut BitReader<R>) -> Result<ImageHeader> {
        let magic = reader.read_bits(32)? as u32;
        if magic != IMAGE_MAGIC {
            return Err(Error::CorruptCode(format!(
                "bad magic {magic:#010x}, expected {IMAGE_MAGIC:#010x}"
            )));
        }

        let width = reader.read_bits(32)? as u32;
        let height = reader.read_bits(32)? as u32;
        let predictor = ImagePredictor::try_from(reader.read_bits(8)? as u8)?;
        let m_flag = reader.read_bits(8)? as u8;
        let block_size = reader.read_bits(32)? as u32;

        Ok(ImageHeader {
            width,
            height,
            predictor,
            m_flag,
            block_size,
        })
    }

    pub fn decode(&self, data: &[u8]) -> Result<GrayImage> {
        let mut reader = BitReader::new(data);
        let header = self.parse_header(&mut reader)?;

        let total_pixels = header.width as u64 * header.height as u64;
        let total_pixels = usize::try_from(total_pixels)
            .map_err(|_| Error::CorruptCode("image dimensions overflow".into()))?;
        if total_pixels > 0 && header.block_size == 0 {
            return Err(Error::CorruptCode("recorded block size is 0".into()));
        }

        let mut pixels = vec![0u8; total_pixels];
        let mut block_start = 0usize;

        while block_start < total_pixels {
            let current = (header.block_size as usize).min(total_pixels - block_start);

            let block_m = if header.m_flag == 0 {
                let m = reader.read_bits(8)? as u32;
                if m == 0 {
                    return Err(Error::CorruptCode("adaptive m byte is 0".into()));
                }
                m
            } else {
                header.m_flag as u32
            };

            let golomb = Golomb::new(block_m)?.with_min_remainder_bits();

            for i in 0..current {
                let index = block_start + i;
                let x = (index % header.width as usize) as u32;
                let y = (index / header.width as usize) as u32;

                let residual = golomb.decode_signed(&mut reader)?;

                let (a, b, c) = neighbors(&pixels, header.width, x, y);
                let prediction = header.predictor.predict(a, b, c);
                // Clamp before storage so later neighbors read the same
                // value on both sides even if a predictor overshoots.
                pixels[index] = (prediction + residual).clamp(0, 255) as u8;
            }

            block_start += current;
        }

        GrayImage::new(header.width, header.height, pixels)
    }
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::new()
    }
}
