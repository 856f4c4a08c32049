use std::sync::Arc;

#[cfg(feature = "rtrb")]
use crate::synth::ScopeTap;
use crate::{io::PlaybackClock, synth::VoiceRegistry, MAX_BLOCK_SIZE};

/// Render-side handle moved into the device callback.
pub struct Renderer {
    registry: Arc<VoiceRegistry>,
    clock: PlaybackClock,
    block: Vec<f32>,
    #[cfg(feature = "rtrb")]
    tap: Option<ScopeTap>,
}

impl Renderer {
    pub(crate) fn new(registry: Arc<VoiceRegistry>, clock: PlaybackClock) -> Self {
        Self {
            registry,
            clock,
            block: vec![0.0; MAX_BLOCK_SIZE],
            #[cfg(feature = "rtrb")]
            tap: None,
        }
    }

    /// Also forward every rendered frame to `tap`.
    #[cfg(feature = "rtrb")]
    pub fn with_tap(mut self, tap: ScopeTap) -> Self {
        self.tap = Some(tap);
        self
    }

    /// One mixed sample for `channel` at playback `time`.
    ///
    /// Every channel carries the same mono mix.
    pub fn render_sample(&self, _channel: usize, time: f64) -> f64 {
        self.registry.render_sample(time)
    }

    /// Fill an interleaved device buffer and advance the playback clock.
    ///
    /// Frames are rendered in blocks of at most `MAX_BLOCK_SIZE`, each under a
    /// single registry lock, clamped to `[-1, 1]` and converted with `convert`.
    pub fn render_interleaved<T: Copy>(
        &mut self,
        data: &mut [T],
        channels: usize,
        convert: impl Fn(f32) -> T,
    ) {
        let channels = channels.max(1);
        let sample_rate = self.clock.sample_rate();
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let block = &mut self.block[..frames_to_render];

            self.registry
                .render_block(block, self.clock.now(), sample_rate);
            self.clock.advance(frames_to_render);

            #[cfg(feature = "rtrb")]
            if let Some(tap) = self.tap.as_mut() {
                tap.push_slice(block);
            }

            // Duplicate mono to all channels
            let out_off = frames_written * channels;
            for (i, &s) in block.iter().enumerate() {
                let value = convert(s.clamp(-1.0, 1.0));
                for ch in 0..channels {
                    data[out_off + i * channels + ch] = value;
                }
            }

            frames_written += frames_to_render;
        }
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{synth::Note, voices};

    #[test]
    fn fills_every_channel_and_advances_clock() {
        let registry = Arc::new(VoiceRegistry::new());
        registry.add_note(Note::triggered(64, Arc::new(voices::harmonica()), 0.0));
        let clock = PlaybackClock::new(48_000);
        let mut renderer = Renderer::new(registry, clock.clone());

        let mut data = vec![0.0f32; 2 * 300];
        renderer.render_interleaved(&mut data, 2, |s| s);

        assert_eq!(clock.frames(), 300);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
            assert!(frame[0].abs() <= 1.0);
        }
        assert!(data.iter().any(|s| s.abs() > 0.0));
    }

    #[test]
    fn buffers_longer_than_one_block() {
        let registry = Arc::new(VoiceRegistry::new());
        let clock = PlaybackClock::new(44_100);
        let mut renderer = Renderer::new(registry, clock.clone());

        let mut data = vec![1i16; MAX_BLOCK_SIZE * 2 + 17];
        renderer.render_interleaved(&mut data, 1, |s| (s * i16::MAX as f32) as i16);

        assert_eq!(clock.frames() as usize, data.len());
        assert!(data.iter().all(|&s| s == 0));
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn tap_sees_rendered_frames() {
        let registry = Arc::new(VoiceRegistry::new());
        let (tap, mut rx) = ScopeTap::new(1024);
        let mut renderer = Renderer::new(registry, PlaybackClock::new(48_000)).with_tap(tap);

        let mut data = vec![0.0f32; 64];
        renderer.render_interleaved(&mut data, 1, |s| s);

        let mut seen = 0;
        while rx.pop().is_ok() {
            seen += 1;
        }
        assert_eq!(seen, 64);
    }
}
