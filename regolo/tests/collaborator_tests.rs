use libgolo::{Error, GrayImage};
use regolo::{audio, ppm};
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("regolo_test_{}_{}", std::process::id(), name));
    path
}

// ============================================================================
// WAV collaborator
// ============================================================================

#[test]
fn test_wav_write_read_roundtrip_mono() {
    let samples: Vec<i16> = (0..4410)
        .map(|i| ((i as f64 * 0.05).sin() * 12000.0) as i16)
        .collect();

    let path = temp_path("mono.wav");
    audio::write_wav(&path, &samples, 44100, 1).unwrap();
    let read = audio::read_wav(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(read.sample_rate, 44100);
    assert_eq!(read.channels, 1);
    assert_eq!(read.samples, samples);
}

#[test]
fn test_wav_write_read_roundtrip_stereo() {
    let samples: Vec<i16> = (0..2000)
        .flat_map(|i| {
            let s = ((i as f64 * 0.03).sin() * 20000.0) as i16;
            [s, s / 3]
        })
        .collect();

    let path = temp_path("stereo.wav");
    audio::write_wav(&path, &samples, 48000, 2).unwrap();
    let read = audio::read_wav(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(read.sample_rate, 48000);
    assert_eq!(read.channels, 2);
    assert_eq!(read.frames(), 2000);
    assert_eq!(read.samples, samples);
}

#[test]
fn test_wav_header_layout() {
    let bytes = audio::wav_to_bytes(&[0i16; 4], 8000, 1).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    // PCM format tag, 16 bits per sample.
    assert_eq!(u16::from_le_bytes([bytes[20], bytes[21]]), 1);
    assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16);
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(bytes.len(), 44 + 8);
}

#[test]
fn test_sample_conversions() {
    assert_eq!(audio::f64_to_i16(0.0), 0);
    assert_eq!(audio::f64_to_i16(1.0), 32767);
    assert_eq!(audio::f64_to_i16(-2.0), -32768);

    let back = audio::samples_to_f64(&[-32768, 0, 16384]);
    assert!((back[0] + 1.0).abs() < 1e-9);
    assert!(back[1].abs() < 1e-9);
    assert!((back[2] - 0.5).abs() < 1e-9);
}

// ============================================================================
// PPM collaborator
// ============================================================================

#[test]
fn test_p5_roundtrip() {
    let image = GrayImage::new(3, 2, vec![0, 64, 128, 192, 255, 17]).unwrap();
    let bytes = ppm::p5_to_bytes(&image);
    assert!(bytes.starts_with(b"P5\n3 2\n255\n"));
    assert_eq!(ppm::parse_p5(&bytes).unwrap(), image);
}

#[test]
fn test_p5_header_comments_and_whitespace() {
    let mut data = b"P5 # binary grayscale\n# a comment line\n  4\t1\n255\n".to_vec();
    data.extend_from_slice(&[9, 8, 7, 6]);
    let image = ppm::parse_p5(&data).unwrap();
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 1);
    assert_eq!(image.pixels(), &[9, 8, 7, 6]);
}

#[test]
fn test_p5_rejects_wrong_magic_and_maxval() {
    let p6 = b"P6\n1 1\n255\nabc".to_vec();
    assert!(matches!(
        ppm::parse_p5(&p6),
        Err(Error::UnsupportedFormat(_))
    ));

    let deep = b"P5\n1 1\n65535\n\x00\x00".to_vec();
    assert!(matches!(
        ppm::parse_p5(&deep),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_p5_rejects_short_raster() {
    let short = b"P5\n4 4\n255\nabc".to_vec();
    assert!(matches!(
        ppm::parse_p5(&short),
        Err(Error::UnsupportedFormat(_))
    ));
}

#[test]
fn test_p6_grayscale_conversion() {
    let path = temp_path("color.ppm");
    // One red, one green, one blue, one mixed pixel.
    let mut data = b"P6\n4 1\n255\n".to_vec();
    data.extend_from_slice(&[255, 0, 0, 0, 255, 0, 0, 0, 255, 100, 50, 200]);
    std::fs::write(&path, &data).unwrap();

    let gray = ppm::read_p6_as_grayscale(&path).unwrap();
    std::fs::remove_file(&path).ok();

    // Standard luma weights, truncated toward zero.
    assert_eq!(gray.pixels(), &[76, 149, 29, 82]);
}
