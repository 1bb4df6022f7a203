//! Offline render of a WAV file through the reverb plugin.

use crate::wav::{StereoSamples, read_wav_stereo, write_wav_stereo};
use anyhow::{Context, bail};
use basicverb_core::linear_to_db;
use basicverb_plugin::{AudioConfig, ProcessMode, ReverbAudioProcessor, ReverbShared, find_preset};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name or preset file (TOML)
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override by id (e.g., "r_size=0.8", "r_freeze=on")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Seconds of silence appended so the tail can ring out
    #[arg(long, default_value = "0")]
    tail: f32,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.trim().to_string(), value.trim().to_string())),
        None => Err(format!("Invalid parameter format: '{s}' (expected id=value)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        bail!("block size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        bail!("unsupported bit depth {} (expected 16, 24 or 32)", args.bit_depth);
    }
    if !args.tail.is_finite() || args.tail < 0.0 {
        bail!("tail must be a non-negative number of seconds");
    }

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    if samples.is_empty() {
        bail!("{} contains no audio", args.input.display());
    }
    let sample_rate = spec.sample_rate as f32;
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        samples.len(),
        spec.channels,
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let shared = ReverbShared::new(None)?;
    configure(&shared, &args)?;

    let input_peak = peak(&samples);
    let input_rms = rms(&samples);

    let total = samples.len() + (args.tail * sample_rate) as usize;
    samples.left.resize(total, 0.0);
    samples.right.resize(total, 0.0);

    let mut processor = ReverbAudioProcessor::activate(
        &shared,
        AudioConfig {
            sample_rate,
            max_block_size: args.block_size,
            mode: ProcessMode::Offline,
        },
    )?;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut done = 0;
    for (left, right) in samples
        .left
        .chunks_mut(args.block_size)
        .zip(samples.right.chunks_mut(args.block_size))
    {
        done += left.len();
        processor.process(&mut [left, right]);
        pb.set_position(done as u64);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &samples, spec.sample_rate, args.bit_depth)?;
    println!("Done!");

    Ok(())
}

/// Apply the preset, then the per-parameter overrides on top of it.
fn configure(shared: &ReverbShared, args: &ProcessArgs) -> anyhow::Result<()> {
    let store = shared.store();

    if let Some(name) = &args.preset {
        let preset = find_preset(name)?;
        let applied = preset.apply(store);
        println!("Loaded preset: {} ({applied} parameters)", preset.name);
    }

    for (id, text) in &args.param {
        let index = store
            .index_of(id)
            .with_context(|| format!("Unknown parameter '{id}'. Run `basicverb params`"))?;
        let Some(desc) = store.descriptor(index) else {
            bail!("Unknown parameter '{id}'");
        };
        let Some(value) = desc.parse_value(text) else {
            bail!("Invalid value '{text}' for {id}");
        };
        store.set(index, value);
        tracing::debug!(param = %id, value, "override");
    }
    Ok(())
}

fn rms(samples: &StereoSamples) -> f32 {
    let count = samples.left.len() + samples.right.len();
    if count == 0 {
        return 0.0;
    }
    let sum: f32 = samples
        .left
        .iter()
        .chain(&samples.right)
        .map(|s| s * s)
        .sum();
    (sum / count as f32).sqrt()
}

fn peak(samples: &StereoSamples) -> f32 {
    samples
        .left
        .iter()
        .chain(&samples.right)
        .map(|s| s.abs())
        .fold(0.0, f32::max)
}
