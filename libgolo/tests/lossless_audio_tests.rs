use libgolo::{AudioDecoder, AudioEncoder, BitWriter, Error};

fn lcg(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    *state >> 16
}

fn roundtrip(samples: &[i16], channels: u16, block_samples: u32, m: u32, order: u8) -> Vec<i16> {
    let encoded = AudioEncoder::new(44100, channels)
        .with_block_samples(block_samples)
        .with_parameter(m)
        .with_predictor_order(order)
        .encode(samples)
        .expect("encoding failed");
    AudioDecoder::new()
        .decode(&encoded)
        .expect("decoding failed")
        .samples
}

fn sine(frames: usize, freq: f64, sample_rate: f64, amplitude: f64) -> Vec<i16> {
    (0..frames)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (amplitude * (2.0 * std::f64::consts::PI * freq * t).sin()) as i16
        })
        .collect()
}

fn white_noise(count: usize, seed: u64) -> Vec<i16> {
    let mut state = seed;
    (0..count).map(|_| lcg(&mut state) as i16).collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_mono_sine_roundtrip_and_compression() {
    // One second of a 440 Hz tone; smooth enough that the 2-tap
    // predictor should beat raw 16-bit PCM comfortably.
    let samples = sine(44100, 440.0, 44100.0, 16000.0);

    let encoded = AudioEncoder::new(44100, 1)
        .with_block_samples(4096)
        .with_parameter(0)
        .with_predictor_order(2)
        .encode(&samples)
        .unwrap();
    assert!(
        encoded.len() < samples.len() * 2,
        "compressed {} bytes vs raw {}",
        encoded.len(),
        samples.len() * 2
    );

    let decoded = AudioDecoder::new().decode(&encoded).unwrap();
    assert_eq!(decoded.sample_rate, 44100);
    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.frames, 44100);
    assert_eq!(decoded.block_samples, 4096);
    assert_eq!(decoded.predictor_order, 2);
    assert_eq!(decoded.samples, samples);
}

#[test]
fn test_stereo_noise_roundtrip() {
    // 100 ms of stereo noise at 48 kHz; exercises the mid/side path with
    // the least predictable content.
    let samples = white_noise(4800 * 2, 0xD1CE);
    let decoded = roundtrip(&samples, 2, 1024, 0, 3);
    assert_eq!(decoded, samples);
}

#[test]
fn test_all_orders_and_block_sizes() {
    let mono = white_noise(300, 1);
    let stereo: Vec<i16> = sine(300, 700.0, 44100.0, 9000.0)
        .iter()
        .flat_map(|&s| [s, s / 2 - 100])
        .collect();

    for order in 0..=3 {
        for block in [1u32, 64, 4096] {
            assert_eq!(
                roundtrip(&mono, 1, block, 0, order),
                mono,
                "mono order={order} block={block}"
            );
            assert_eq!(
                roundtrip(&stereo, 2, block, 0, order),
                stereo,
                "stereo order={order} block={block}"
            );
        }
    }
}

#[test]
fn test_fixed_parameter_roundtrip() {
    let samples = sine(2000, 300.0, 44100.0, 12000.0);
    for m in [1u32, 4, 32, 65535] {
        assert_eq!(roundtrip(&samples, 1, 256, m, 2), samples, "m={m}");
    }
}

#[test]
fn test_extreme_samples_survive_wrapping_arithmetic() {
    // Alternating full-scale samples drive the 2- and 3-tap predictors
    // into clamping and the residual sum into i16 wrap territory.
    let samples: Vec<i16> = (0..512)
        .map(|i| if i % 2 == 0 { i16::MAX } else { i16::MIN })
        .collect();
    for order in 0..=3 {
        assert_eq!(roundtrip(&samples, 1, 64, 0, order), samples, "order={order}");
    }
    // Same pattern as stereo extremes through mid/side.
    assert_eq!(roundtrip(&samples, 2, 64, 0, 2), samples);
}

#[test]
fn test_first_samples_with_zero_history() {
    // The first few residuals per channel are taken against an all-zero
    // history; a loud opening must still round-trip for every order.
    let samples = vec![30000i16, -30000, 25000, -25000, 20000, -20000];
    for order in 0..=3 {
        assert_eq!(roundtrip(&samples, 1, 4096, 0, order), samples);
        assert_eq!(roundtrip(&samples, 2, 4096, 0, order), samples);
    }
}

#[test]
fn test_empty_stream() {
    let decoded = roundtrip(&[], 1, 4096, 0, 2);
    assert!(decoded.is_empty());
}

#[test]
fn test_single_frame() {
    assert_eq!(roundtrip(&[12345], 1, 4096, 0, 3), vec![12345]);
    assert_eq!(roundtrip(&[12345, -54], 2, 4096, 0, 3), vec![12345, -54]);
}

// ============================================================================
// Parameter validation
// ============================================================================

#[test]
fn test_invalid_encoder_parameters() {
    let samples = [0i16; 8];

    let err = AudioEncoder::new(44100, 1)
        .with_predictor_order(4)
        .encode(&samples);
    assert!(matches!(err, Err(Error::InvalidParameter(_))));

    let err = AudioEncoder::new(44100, 1).with_block_samples(0).encode(&samples);
    assert!(matches!(err, Err(Error::InvalidParameter(_))));

    let err = AudioEncoder::new(44100, 4).encode(&samples);
    assert!(matches!(err, Err(Error::UnsupportedFormat(_))));
}

// ============================================================================
// Corrupt and truncated streams
// ============================================================================

fn header_bytes(frames: u64, channels: u16) -> BitWriter<Vec<u8>> {
    let mut writer = BitWriter::new(Vec::new());
    writer.write_bits(44100, 32).unwrap();
    writer.write_bits(channels as u64, 16).unwrap();
    writer.write_bits(frames, 64).unwrap();
    writer.write_bits(4096, 32).unwrap();
    writer.write_bits(2, 8).unwrap();
    writer
}

#[test]
fn test_block_with_m_zero_is_corrupt() {
    let mut writer = header_bytes(16, 1);
    writer.write_bits(0, 16).unwrap(); // m = 0
    writer.write_bits(16, 32).unwrap();
    let data = writer.into_inner().unwrap();

    assert!(matches!(
        AudioDecoder::new().decode(&data),
        Err(Error::CorruptCode(_))
    ));
}

#[test]
fn test_empty_block_while_samples_remain_is_corrupt() {
    let mut writer = header_bytes(16, 1);
    writer.write_bits(4, 16).unwrap();
    writer.write_bits(0, 32).unwrap(); // zero residuals advertised
    let data = writer.into_inner().unwrap();

    assert!(matches!(
        AudioDecoder::new().decode(&data),
        Err(Error::CorruptCode(_))
    ));
}

#[test]
fn test_block_overrunning_total_is_corrupt() {
    let mut writer = header_bytes(2, 1);
    writer.write_bits(4, 16).unwrap();
    writer.write_bits(3, 32).unwrap(); // more residuals than frames
    let data = writer.into_inner().unwrap();

    assert!(matches!(
        AudioDecoder::new().decode(&data),
        Err(Error::CorruptCode(_))
    ));
}

#[test]
fn test_truncated_stream_is_reported() {
    let samples = sine(5000, 500.0, 44100.0, 10000.0);
    let encoded = AudioEncoder::new(44100, 1)
        .with_block_samples(1024)
        .encode(&samples)
        .unwrap();

    let truncated = &encoded[..encoded.len() / 2];
    assert!(matches!(
        AudioDecoder::new().decode(truncated),
        Err(Error::TruncatedCode)
    ));
}
