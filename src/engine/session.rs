use std::sync::Arc;

use tracing::{debug, info, trace};

use super::renderer::Renderer;
use crate::{
    config::SessionConfig,
    error::{Error, Result},
    io::PlaybackClock,
    sequencing::{StepSequencer, TriggerRequest},
    synth::{Instrument, KeyTransition, VoiceRegistry},
    voices::Catalogue,
};

/// Control-path owner of a running synth.
///
/// Notes from both the sequencer and the keyboard are stamped with the
/// playback clock, never with wall-clock time, so envelopes line up with the
/// samples the device actually plays.
pub struct Session {
    config: SessionConfig,
    catalogue: Catalogue,
    sequencer: StepSequencer,
    registry: Arc<VoiceRegistry>,
    clock: PlaybackClock,
    keyboard_instrument: Arc<Instrument>,
    /// Reused between ticks
    triggers: Vec<TriggerRequest>,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        if config.audio.sample_rate == 0 {
            return Err(Error::InvalidSampleRate(config.audio.sample_rate));
        }

        let catalogue = Catalogue::new();
        let mut sequencer = StepSequencer::new(
            config.tempo,
            config.beats_per_bar,
            config.subdivisions_per_beat,
        )?
        .with_pitch(config.sequencer_pitch);

        for channel in &config.channels {
            sequencer.add_channel(catalogue.get(channel.instrument).clone(), &channel.pattern)?;
        }

        let keyboard_instrument = catalogue.get(config.keyboard_instrument).clone();
        info!(
            tempo = config.tempo,
            steps = sequencer.total_steps(),
            channels = sequencer.channels().len(),
            keyboard = keyboard_instrument.name(),
            sample_rate = config.audio.sample_rate,
            "session ready"
        );

        Ok(Self {
            config: config.clone(),
            catalogue,
            sequencer,
            registry: Arc::new(VoiceRegistry::new()),
            clock: PlaybackClock::new(config.audio.sample_rate),
            keyboard_instrument,
            triggers: Vec::new(),
        })
    }

    /// Render handle sharing this session's registry and clock.
    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.registry.clone(), self.clock.clone())
    }

    /// Advance the sequencer by `elapsed` wall-clock seconds and register
    /// every note that became due. Returns how many were added.
    pub fn tick(&mut self, elapsed: f64) -> usize {
        self.sequencer.update_into(elapsed, &mut self.triggers);
        if self.triggers.is_empty() {
            return 0;
        }

        let now = self.clock.now();
        let count = self.triggers.len();
        trace!(step = self.sequencer.current_step(), count, now, "sequencer triggers");
        self.registry
            .add_notes(self.triggers.drain(..).map(|t| t.into_note(now)));
        count
    }

    /// Apply polled key states, in semitone order from the keyboard base.
    /// Returns how many keys changed the registry.
    pub fn apply_keys(&self, held: &[bool]) -> usize {
        let now = self.clock.now();
        let mut changed = 0;
        for (offset, &down) in held.iter().enumerate() {
            let id = self.config.keyboard_base + offset as i32;
            if let Some(transition) =
                self.registry
                    .update_key(id, &self.keyboard_instrument, down, now)
            {
                changed += 1;
                match transition {
                    KeyTransition::Triggered => debug!(id, now, "key triggered"),
                    KeyTransition::Retriggered => debug!(id, now, "key retriggered"),
                    KeyTransition::Released => debug!(id, now, "key released"),
                }
            }
        }
        changed
    }

    /// Current playback time in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.sequencer
    }

    pub fn registry(&self) -> &Arc<VoiceRegistry> {
        &self.registry
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn keyboard_instrument(&self) -> &Arc<Instrument> {
        &self.keyboard_instrument
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{io::KEYMAP, voices::InstrumentKind};

    #[test]
    fn tick_registers_due_notes_at_playback_time() {
        let config = SessionConfig::empty()
            .tempo(60.0)
            .grid(1, 1)
            .channel(InstrumentKind::Kick, "X");
        let mut session = Session::new(&config).unwrap();
        session.clock().advance(22_050);

        assert_eq!(session.tick(0.5), 0);
        assert_eq!(session.tick(0.5), 1);

        let voices = session.registry().snapshot();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].instrument, "Drum Kick");
        assert_eq!(voices[0].id, config.sequencer_pitch);
    }

    #[test]
    fn keys_trigger_and_release_the_keyboard_instrument() {
        let session = Session::new(&SessionConfig::empty()).unwrap();
        let mut held = [false; KEYMAP.len()];
        held[4] = true;

        assert_eq!(session.apply_keys(&held), 1);
        assert_eq!(session.apply_keys(&held), 0);
        let voices = session.registry().snapshot();
        assert_eq!(voices[0].id, session.config().keyboard_base + 4);
        assert_eq!(voices[0].instrument, "Harmonica");

        held[4] = false;
        assert_eq!(session.apply_keys(&held), 1);
        assert!(session.registry().snapshot()[0].released);
    }

    #[test]
    fn rejects_zero_sample_rate() {
        let mut config = SessionConfig::default();
        config.audio.sample_rate = 0;
        assert!(matches!(
            Session::new(&config),
            Err(Error::InvalidSampleRate(0))
        ));
    }
}
