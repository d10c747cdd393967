//! Plays a window of a synthesized tone through the default output device.
//!
//! Usage:
//!   phon_play --frequency 220 --duration 2 --start 0.5 --end 1.5
//!   phon_play --stereo --device "USB Audio"

mod tone;

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use phon_audio::{AudioPlayer, CpalAudioOutput, OutputConfig, PlaybackRequest, SampleSource};

use crate::tone::SineWave;

#[derive(Parser, Debug)]
#[command(name = "phon_play", about = "Play part of a test tone")]
struct Cli {
    /// Tone frequency in Hz
    #[arg(long, default_value_t = 220.0)]
    frequency: f32,

    /// Length of the generated signal in seconds
    #[arg(long, default_value_t = 2.0)]
    duration: f64,

    /// Sample rate of the generated signal
    #[arg(long, default_value_t = 44100.0)]
    sample_rate: f64,

    /// Start of the played window in seconds
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    /// End of the played window in seconds (defaults to the end of the signal)
    #[arg(long)]
    end: Option<f64>,

    /// Put the tone in a left channel and an octave above in a right channel
    #[arg(long)]
    stereo: bool,

    /// Output device name
    #[arg(long)]
    device: Option<String>,
}

fn build_source(cli: &Cli) -> Result<SampleSource> {
    let frames = (cli.duration * cli.sample_rate).max(0.0) as usize;
    let rate = cli.sample_rate as f32;
    let left = SineWave::new(cli.frequency, rate, 0.5).take(frames);

    let source = if cli.stereo {
        let right = SineWave::new(cli.frequency * 2.0, rate, 0.5).take(frames);
        SampleSource::new(cli.sample_rate, [("left", left), ("right", right)])
    } else {
        SampleSource::mono("samples", left, cli.sample_rate)
    };
    source.context("Failed to build sample source")
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = build_source(&cli)?;
    let channels: Vec<String> = source.channel_names().map(str::to_owned).collect();

    let mut config = OutputConfig::default();
    if let Some(name) = &cli.device {
        config = config.with_device_name(name);
    }
    let mut player = AudioPlayer::new(CpalAudioOutput::with_config(config));

    let end = cli.end.unwrap_or(f64::INFINITY);
    let request = PlaybackRequest::for_seconds(&source, cli.start, end, channels);
    let handle = player
        .play(&request)
        .context("Failed to start playback")?;

    if handle.is_noop() {
        log::warn!("Window {}..{end} s holds no samples", cli.start);
        return Ok(());
    }
    log::info!(
        "Playing {:?} ({} frames) of {}",
        handle.duration(),
        handle.frame_count(),
        source.id()
    );

    // keep the output (and its stream) alive until the buffer has drained
    let deadline = Instant::now() + handle.duration() + Duration::from_secs(2);
    while !handle.status().is_done() {
        if Instant::now() > deadline {
            log::warn!("Device stopped pulling audio, giving up");
            handle.stop();
            break;
        }
        thread::sleep(Duration::from_millis(20));
    }
    log::info!(
        "{:?} after {} frames",
        handle.status(),
        handle.frames_played()
    );
    Ok(())
}
