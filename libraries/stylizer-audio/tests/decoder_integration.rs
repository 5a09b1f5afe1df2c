/// Integration tests for decoding and ingestion
///
/// These tests write small WAV files by hand and verify that they come back
/// as mono buffers, at their native rate from the decoder and at the
/// analysis rate from ingestion.
use std::fs::File;
use std::io::Write;
use std::path::Path;
use stylizer_audio::{load_mono, AudioError, SymphoniaDecoder};
use stylizer_core::{SampleRate, ANALYSIS_SAMPLE_RATE};

/// Write a 16-bit PCM WAV whose frames come from `frame(i, channel)`
fn create_wav_with<F>(path: &Path, sample_rate: u32, num_frames: usize, channels: u16, frame: F)
where
    F: Fn(usize, u16) -> f32,
{
    let mut file = File::create(path).expect("Failed to create test WAV file");

    let byte_rate = sample_rate * channels as u32 * 2;
    let block_align = channels * 2;
    let data_size = (num_frames * channels as usize * 2) as u32;
    let chunk_size = 36 + data_size;

    // RIFF header
    file.write_all(b"RIFF").unwrap();
    file.write_all(&chunk_size.to_le_bytes()).unwrap();
    file.write_all(b"WAVE").unwrap();

    // fmt chunk
    file.write_all(b"fmt ").unwrap();
    file.write_all(&16u32.to_le_bytes()).unwrap();
    file.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
    file.write_all(&channels.to_le_bytes()).unwrap();
    file.write_all(&sample_rate.to_le_bytes()).unwrap();
    file.write_all(&byte_rate.to_le_bytes()).unwrap();
    file.write_all(&block_align.to_le_bytes()).unwrap();
    file.write_all(&16u16.to_le_bytes()).unwrap();

    // data chunk
    file.write_all(b"data").unwrap();
    file.write_all(&data_size.to_le_bytes()).unwrap();

    for i in 0..num_frames {
        for ch in 0..channels {
            let sample = (frame(i, ch).clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            file.write_all(&sample.to_le_bytes()).unwrap();
        }
    }
}

/// A 440 Hz sine on every channel
fn create_test_wav(path: &Path, sample_rate: u32, duration_secs: f32, channels: u16) {
    let num_frames = (sample_rate as f32 * duration_secs) as usize;
    create_wav_with(path, sample_rate, num_frames, channels, |i, _| {
        let t = i as f32 / sample_rate as f32;
        (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
    });
}

#[test]
fn test_decode_mono_wav() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("mono.wav");
    create_test_wav(&wav_path, 22_050, 0.5, 1);

    let mut decoder = SymphoniaDecoder::new();
    let buffer = decoder.decode_file(&wav_path).expect("Failed to decode mono WAV");

    assert_eq!(buffer.sample_rate, SampleRate::new(22_050));
    assert_eq!(buffer.len(), 11_025);
    assert!(buffer.samples.iter().all(|s| s.abs() <= 0.51));
}

#[test]
fn test_decode_stereo_downmixes_to_mono() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("stereo.wav");
    create_test_wav(&wav_path, 44_100, 1.0, 2);

    let mut decoder = SymphoniaDecoder::new();
    let buffer = decoder.decode_file(&wav_path).expect("Failed to decode stereo WAV");

    assert_eq!(buffer.sample_rate.as_hz(), 44_100);
    assert_eq!(buffer.len(), 44_100);

    let peak = buffer.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!((peak - 0.5).abs() < 0.01, "peak {}", peak);
}

#[test]
fn test_downmix_averages_channels() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("split.wav");
    // Left at +0.5, right at -0.25: the mono average is 0.125
    create_wav_with(&wav_path, 22_050, 1000, 2, |_, ch| {
        if ch == 0 {
            0.5
        } else {
            -0.25
        }
    });

    let mut decoder = SymphoniaDecoder::new();
    let buffer = decoder.decode_file(&wav_path).unwrap();

    assert_eq!(buffer.len(), 1000);
    for &sample in &buffer.samples {
        assert!((sample - 0.125).abs() < 0.001, "sample {}", sample);
    }
}

#[test]
fn test_ingest_resamples_to_analysis_rate() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("native_44k.wav");
    create_test_wav(&wav_path, 44_100, 1.0, 2);

    let buffer = load_mono(&wav_path, ANALYSIS_SAMPLE_RATE).unwrap();

    assert_eq!(buffer.sample_rate, ANALYSIS_SAMPLE_RATE);
    assert_eq!(buffer.len(), 22_050);

    // The sine survives resampling at roughly the same level
    let mid = &buffer.samples[2000..20_000];
    let peak = mid.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!((peak - 0.5).abs() < 0.05, "peak {}", peak);
}

#[test]
fn test_ingest_upsamples_short_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("native_16k.wav");
    create_test_wav(&wav_path, 16_000, 0.25, 1);

    let buffer = load_mono(&wav_path, ANALYSIS_SAMPLE_RATE).unwrap();

    let expected = (4000.0_f64 * 22_050.0 / 16_000.0).round() as usize;
    assert_eq!(buffer.len(), expected);
}

#[test]
fn test_ingest_at_native_rate_is_lossless() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("native_22k.wav");
    create_test_wav(&wav_path, 22_050, 0.2, 1);

    let mut decoder = SymphoniaDecoder::new();
    let decoded = decoder.decode_file(&wav_path).unwrap();
    let ingested = load_mono(&wav_path, ANALYSIS_SAMPLE_RATE).unwrap();

    assert_eq!(decoded, ingested);
}

#[test]
fn test_missing_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = load_mono(&temp_dir.path().join("absent.wav"), ANALYSIS_SAMPLE_RATE);
    assert!(matches!(result, Err(AudioError::FileNotFound(_))));
}

#[test]
fn test_truncated_file_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let wav_path = temp_dir.path().join("truncated.wav");
    std::fs::write(&wav_path, b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();

    let mut decoder = SymphoniaDecoder::new();
    assert!(decoder.decode_file(&wav_path).is_err());
}
