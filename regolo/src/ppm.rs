//! PPM collaborator: binary grayscale (P5) parsing and writing, plus the
//! P6 color reader behind the grayscale conversion utility.

use std::path::Path;

use libgolo::{Error, GrayImage, Result};

/// Whitespace- and comment-skipping tokenizer over a PPM header.
struct HeaderScanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderScanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        HeaderScanner { data, pos: 0 }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn token(&mut self) -> Result<&'a [u8]> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(Error::UnsupportedFormat("truncated PPM header".into()));
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self) -> Result<u32> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::UnsupportedFormat("malformed PPM header field".into()))
    }

    /// Consume the single whitespace byte that separates the header from
    /// the raster, and return the raster.
    fn raster(mut self) -> Result<&'a [u8]> {
        if self.pos >= self.data.len() || !self.data[self.pos].is_ascii_whitespace() {
            return Err(Error::UnsupportedFormat("truncated PPM header".into()));
        }
        self.pos += 1;
        Ok(&self.data[self.pos..])
    }
}

fn parse_header<'a>(data: &'a [u8], magic: &str) -> Result<(u32, u32, &'a [u8])> {
    let mut scanner = HeaderScanner::new(data);

    if scanner.token()? != magic.as_bytes() {
        return Err(Error::UnsupportedFormat(format!(
            "only binary {magic} PPM input is supported"
        )));
    }

    let width = scanner.number()?;
    let height = scanner.number()?;
    let maxval = scanner.number()?;
    if maxval != 255 {
        return Err(Error::UnsupportedFormat(format!(
            "only 8-bit images are supported (maxval {maxval})"
        )));
    }

    Ok((width, height, scanner.raster()?))
}

/// Parse a binary grayscale (P5) image.
pub fn parse_p5(data: &[u8]) -> Result<GrayImage> {
    let (width, height, raster) = parse_header(data, "P5")?;

    let expected = width as usize * height as usize;
    if raster.len() < expected {
        return Err(Error::UnsupportedFormat("short PPM raster".into()));
    }

    GrayImage::new(width, height, raster[..expected].to_vec())
}

/// Read a binary grayscale (P5) image from disk.
pub fn read_p5(path: &Path) -> Result<GrayImage> {
    parse_p5(&std::fs::read(path)?)
}

/// Serialize a grayscale image as P5.
pub fn p5_to_bytes(image: &GrayImage) -> Vec<u8> {
    let mut out = format!("P5\n{} {}\n255\n", image.width(), image.height()).into_bytes();
    out.extend_from_slice(image.pixels());
    out
}

/// Write a grayscale image to disk as P5.
pub fn write_p5(path: &Path, image: &GrayImage) -> Result<()> {
    std::fs::write(path, p5_to_bytes(image))?;
    Ok(())
}

/// Read a binary color (P6) image and collapse it to grayscale with the
/// standard luma weights.
pub fn read_p6_as_grayscale(path: &Path) -> Result<GrayImage> {
    let data = std::fs::read(path)?;
    let (width, height, raster) = parse_header(&data, "P6")?;

    let pixel_count = width as usize * height as usize;
    if raster.len() < pixel_count * 3 {
        return Err(Error::UnsupportedFormat("short PPM raster".into()));
    }

    let gray = raster[..pixel_count * 3]
        .chunks_exact(3)
        .map(|rgb| {
            (0.299 * rgb[0] as f64 + 0.587 * rgb[1] as f64 + 0.114 * rgb[2] as f64) as u8
        })
        .collect();

    GrayImage::new(width, height, gray)
}
