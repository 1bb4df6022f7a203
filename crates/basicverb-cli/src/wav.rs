//! Stereo WAV reading and writing.

use anyhow::{Context, bail};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Deinterleaved stereo audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl StereoSamples {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as stereo.
///
/// Mono files are duplicated to both channels. Files with more than two
/// channels use the first two.
pub fn read_wav_stereo(path: &Path) -> anyhow::Result<(StereoSamples, WavSpec)> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let hound_spec = reader.spec();
    let spec = WavSpec {
        channels: hound_spec.channels,
        sample_rate: hound_spec.sample_rate,
        bits_per_sample: hound_spec.bits_per_sample,
    };
    if spec.channels == 0 {
        bail!("{} has no channels", path.display());
    }

    let samples: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let channels = spec.channels as usize;
    let frames = samples.len() / channels;
    let mut stereo = StereoSamples {
        left: Vec::with_capacity(frames),
        right: Vec::with_capacity(frames),
    };
    for frame in samples.chunks_exact(channels) {
        stereo.left.push(frame[0]);
        stereo.right.push(if channels > 1 { frame[1] } else { frame[0] });
    }
    Ok((stereo, spec))
}

/// Write stereo samples. 32-bit output is float, 16/24-bit is PCM.
pub fn write_wav_stereo(
    path: &Path,
    samples: &StereoSamples,
    sample_rate: u32,
    bits_per_sample: u16,
) -> anyhow::Result<()> {
    if !matches!(bits_per_sample, 16 | 24 | 32) {
        bail!("unsupported bit depth {bits_per_sample} (expected 16, 24 or 32)");
    }
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample,
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))
        .with_context(|| format!("failed to create {}", path.display()))?;

    let frames = samples.left.iter().zip(&samples.right);
    if bits_per_sample == 32 {
        for (&l, &r) in frames {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }
    } else {
        let max_val = (1i32 << (bits_per_sample - 1)) as f32;
        let quantize = |s: f32| (s * max_val).clamp(-max_val, max_val - 1.0) as i32;
        for (&l, &r) in frames {
            writer.write_sample(quantize(l))?;
            writer.write_sample(quantize(r))?;
        }
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ramp(len: usize) -> StereoSamples {
        StereoSamples {
            left: (0..len).map(|i| i as f32 / len as f32 - 0.5).collect(),
            right: (0..len).map(|i| 0.5 - i as f32 / len as f32).collect(),
        }
    }

    #[test]
    fn float_roundtrip_is_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let samples = ramp(1000);
        write_wav_stereo(&path, &samples, 44100, 32).unwrap();

        let (read, spec) = read_wav_stereo(&path).unwrap();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(read, samples);
    }

    #[test]
    fn pcm_roundtrip_is_close() {
        let dir = tempdir().unwrap();
        let samples = ramp(500);
        for bits in [16u16, 24] {
            let path = dir.path().join(format!("pcm{bits}.wav"));
            write_wav_stereo(&path, &samples, 48000, bits).unwrap();
            let (read, spec) = read_wav_stereo(&path).unwrap();
            assert_eq!(spec.bits_per_sample, bits);
            for (a, b) in read.left.iter().zip(&samples.left) {
                assert!((a - b).abs() < 1e-3, "{bits}-bit: {a} vs {b}");
            }
        }
    }

    #[test]
    fn mono_files_are_duplicated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [0.1f32, -0.2, 0.3] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let (read, _) = read_wav_stereo(&path).unwrap();
        assert_eq!(read.left, vec![0.1, -0.2, 0.3]);
        assert_eq!(read.left, read.right);
    }

    #[test]
    fn rejects_odd_bit_depths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.wav");
        assert!(write_wav_stereo(&path, &ramp(4), 48000, 8).is_err());
    }
}
