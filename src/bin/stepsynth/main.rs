//! stepsynth - terminal drum machine and keyboard synth
//!
//! Run with: cargo run
//!
//! Logs go to `stepsynth.log` (override with `STEPSYNTH_LOG`), filtered by
//! `RUST_LOG`.

mod app;
mod audio;
mod ui;

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use stepsynth::{synth::ScopeTap, Session, SessionConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use audio::OutputDevice;

/// Samples buffered between the audio callback and the scope
const SCOPE_CAPACITY: usize = 16_384;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = SessionConfig::default();

    let devices = audio::enumerate_devices()?;
    for (index, name) in devices.iter().enumerate() {
        info!(index, %name, "output device");
    }

    let session = Session::new(&config).wrap_err("failed to build session")?;
    let device = OutputDevice::open(config.audio.device_index, &config.audio)?;

    let (tap, audio_rx) = ScopeTap::new(SCOPE_CAPACITY);
    let stream = device.play(session.renderer().with_tap(tap))?;

    let mut terminal = ratatui::init();
    let result = App::new(session, audio_rx, device.name()).run(&mut terminal);
    ratatui::restore();

    drop(stream);
    info!("stopped");
    result
}

fn init_tracing() -> EyreResult<()> {
    let path = std::env::var("STEPSYNTH_LOG").unwrap_or_else(|_| "stepsynth.log".into());
    let file =
        File::create(&path).wrap_err_with(|| format!("failed to create log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
