use libgolo::lossy::{BASE_QUANTIZATION, BLOCK_SIZE};
use libgolo::{LossyDecoder, LossyEncoder};

fn sine(frames: usize, freq: f64, sample_rate: f64, amplitude: f64) -> Vec<f64> {
    (0..frames)
        .map(|i| {
            let t = i as f64 / sample_rate;
            amplitude * (2.0 * std::f64::consts::PI * freq * t).sin()
        })
        .collect()
}

fn rms_error(a: &[f64], b: &[f64]) -> f64 {
    let sum: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / a.len() as f64).sqrt()
}

#[test]
fn test_header_fields_roundtrip() {
    let samples = sine(3000, 440.0, 8000.0, 0.25);
    let encoded = LossyEncoder::new(8000).encode(&samples).unwrap();
    let decoded = LossyDecoder::new().decode(&encoded).unwrap();

    assert_eq!(decoded.sample_rate, 8000);
    assert_eq!(decoded.frames, 3000);
    assert_eq!(decoded.block_size, BLOCK_SIZE);
    assert!((decoded.base_step - BASE_QUANTIZATION).abs() < 1e-9);
}

#[test]
fn test_sine_reconstruction_quality() {
    let samples = sine(8192, 440.0, 44100.0, 0.25);
    let encoded = LossyEncoder::new(44100).encode(&samples).unwrap();
    let decoded = LossyDecoder::new().decode(&encoded).unwrap();

    assert_eq!(decoded.samples.len(), samples.len());
    // Quantization noise stays well under the weighted step ceiling.
    assert!(
        rms_error(&samples, &decoded.samples) < 0.01,
        "rms error {}",
        rms_error(&samples, &decoded.samples)
    );
    // And the payload is genuinely smaller than 16-bit PCM.
    assert!(encoded.len() < samples.len() * 2);
}

#[test]
fn test_partial_final_block() {
    // Frame counts that are not a multiple of the transform size are
    // zero-padded on encode and trimmed on decode.
    for frames in [1usize, 1000, 1024, 1025, 2500] {
        let samples = sine(frames, 200.0, 8000.0, 0.5);
        let encoded = LossyEncoder::new(8000).encode(&samples).unwrap();
        let decoded = LossyDecoder::new().decode(&encoded).unwrap();
        assert_eq!(decoded.samples.len(), frames, "frames={frames}");
    }
}

#[test]
fn test_silence_stays_silent() {
    let samples = vec![0.0f64; 2048];
    let encoded = LossyEncoder::new(8000).encode(&samples).unwrap();
    let decoded = LossyDecoder::new().decode(&encoded).unwrap();

    assert_eq!(decoded.samples.len(), samples.len());
    for &s in &decoded.samples {
        assert!(s.abs() < 1e-9);
    }
}

#[test]
fn test_empty_input() {
    let encoded = LossyEncoder::new(8000).encode(&[]).unwrap();
    let decoded = LossyDecoder::new().decode(&encoded).unwrap();
    assert_eq!(decoded.frames, 0);
    assert!(decoded.samples.is_empty());
}

#[test]
fn test_output_is_clamped() {
    // Full-scale input may overshoot after quantization; the decoder
    // must clamp into [-1, 1].
    let samples = sine(2048, 100.0, 8000.0, 1.0);
    let encoded = LossyEncoder::new(8000).encode(&samples).unwrap();
    let decoded = LossyDecoder::new().decode(&encoded).unwrap();
    for &s in &decoded.samples {
        assert!((-1.0..=1.0).contains(&s));
    }
}

#[test]
fn test_truncated_stream_decodes_prefix() {
    // The container has no per-block framing to recover, so a truncated
    // stream simply yields the frames decoded so far.
    let samples = sine(4096, 300.0, 8000.0, 0.5);
    let encoded = LossyEncoder::new(8000).encode(&samples).unwrap();
    let truncated = &encoded[..encoded.len() / 2];

    let decoded = LossyDecoder::new().decode(truncated).unwrap();
    assert!(decoded.samples.len() < samples.len());
}
