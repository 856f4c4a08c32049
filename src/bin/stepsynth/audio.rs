//! Output device: enumeration, opening and the render callback.

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, Device, FromSample, Sample, SampleRate, SizedSample, Stream, StreamConfig,
};
use stepsynth::{config::SampleFormat, AudioConfig, Renderer};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no audio output devices found")]
    NoDevices,

    #[error("output device {index} does not exist ({available} available)")]
    DeviceIndex { index: usize, available: usize },

    #[error("failed to enumerate output devices: {0}")]
    Enumerate(#[from] cpal::DevicesError),

    #[error("failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

fn device_name(device: &Device) -> String {
    device.name().unwrap_or_else(|_| "<unnamed>".to_owned())
}

/// Names of every output device on the default host, in index order.
pub fn enumerate_devices() -> Result<Vec<String>, DeviceError> {
    let host = cpal::default_host();
    let names: Vec<String> = host.output_devices()?.map(|d| device_name(&d)).collect();
    if names.is_empty() {
        return Err(DeviceError::NoDevices);
    }
    Ok(names)
}

/// An opened output device with a fixed stream configuration.
pub struct OutputDevice {
    device: Device,
    name: String,
    config: StreamConfig,
    format: SampleFormat,
}

impl OutputDevice {
    pub fn open(index: usize, audio: &AudioConfig) -> Result<Self, DeviceError> {
        let host = cpal::default_host();
        let mut devices: Vec<Device> = host.output_devices()?.collect();
        if devices.is_empty() {
            return Err(DeviceError::NoDevices);
        }

        let available = devices.len();
        if index >= available {
            return Err(DeviceError::DeviceIndex { index, available });
        }
        let device = devices.swap_remove(index);
        let name = device_name(&device);

        let config = StreamConfig {
            channels: audio.channels.max(1),
            sample_rate: SampleRate(audio.sample_rate),
            buffer_size: BufferSize::Fixed(audio.block_size),
        };

        info!(
            %name,
            sample_rate = audio.sample_rate,
            channels = config.channels,
            bits = audio.sample_format.bits(),
            block = audio.block_size,
            "opened output device"
        );

        Ok(Self {
            device,
            name,
            config,
            format: audio.sample_format,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start streaming; audio stops when the returned stream is dropped.
    pub fn play(&self, renderer: Renderer) -> Result<Stream, DeviceError> {
        match self.format {
            SampleFormat::I16 => self.build::<i16>(renderer),
            SampleFormat::F32 => self.build::<f32>(renderer),
        }
    }

    fn build<T>(&self, mut renderer: Renderer) -> Result<Stream, DeviceError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = self.config.channels as usize;
        let stream = self.device.build_output_stream(
            &self.config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                renderer.render_interleaved(data, channels, |s: f32| T::from_sample(s));
            },
            |err| error!(%err, "output stream error"),
            None,
        )?;
        stream.play()?;
        Ok(stream)
    }
}
