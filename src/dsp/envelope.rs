#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Time-Stamped ADSR Envelope
==========================

Linear attack/decay/sustain/release, computed as a pure function of three
timestamps instead of a per-sample state machine.

Vocabulary
----------

  on          Playback time the note was (re)triggered.
  off         Playback time the note was released. While the key is held
              `off < on`; a release stamps `off` with a later time.
  life        Seconds since `on`.
  start       Peak level reached at the end of the attack.
  sustain     Level held after attack + decay while the key is down.


The Shape
---------

  Level
  start ┐     ╱╲
        │    ╱  ╲___________
  sus   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
          on                off  off+release

Held (on > off):

    life <= attack            level = (life / attack) * start
    life <= attack + decay    level = start + (sustain - start) * (life - attack) / decay
    otherwise                 level = sustain

Released (on <= off, once playback reaches off):

    A release stamped ahead of time (a sequencer gate) leaves the note on the
    held formula until `time` reaches `off`.

    The level the note had at the moment of release is found by running the
    held formula at `off - on`. Release then ramps that level linearly to 0
    over `release` seconds, starting at `off`. Releasing during the attack
    therefore falls from wherever the attack had got to, without a click.

A zero-length phase is an instantaneous jump to that phase's target, never a
division by zero. Anything at or below AMPLITUDE_FLOOR snaps to exactly 0.0.
*/

/// Levels at or below this are treated as silence.
pub const AMPLITUDE_FLOOR: f64 = 1e-4;

/// ADSR shape shared by every note of an instrument.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    pub attack_time: f64,
    pub decay_time: f64,
    pub release_time: f64,
    pub sustain_level: f64,
    pub start_amplitude: f64,
}

impl EnvelopeConfig {
    /// Build an envelope peaking at full level.
    ///
    /// Negative durations are clamped to zero and the sustain level to `[0, 1]`.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack_time: attack.max(0.0),
            decay_time: decay.max(0.0),
            release_time: release.max(0.0),
            sustain_level: sustain.clamp(0.0, 1.0),
            start_amplitude: 1.0,
        }
    }

    /// Set the level reached at the end of the attack.
    pub fn with_start_amplitude(mut self, start: f64) -> Self {
        self.start_amplitude = start.clamp(0.0, 1.0);
        self
    }

    /// Envelope level at `time` for a note triggered at `on` and released at `off`.
    pub fn amplitude(&self, time: f64, on: f64, off: f64) -> f64 {
        let level = if on > off || time < off {
            self.held_level(time - on)
        } else {
            let release_level = self.held_level(off - on);
            ramp(time - off, self.release_time, release_level, 0.0)
        };

        if level <= AMPLITUDE_FLOOR {
            0.0
        } else {
            level.min(1.0)
        }
    }

    /// True once a released note has decayed to silence.
    ///
    /// A held note is never finished, even when its sustain level is zero, and
    /// neither is one whose release time is still ahead.
    pub fn is_finished(&self, time: f64, on: f64, off: f64) -> bool {
        on <= off && time >= off && self.amplitude(time, on, off) == 0.0
    }

    /// Attack/decay/sustain level `life` seconds after the trigger.
    fn held_level(&self, life: f64) -> f64 {
        if life <= self.attack_time {
            ramp(life, self.attack_time, 0.0, self.start_amplitude)
        } else if life <= self.attack_time + self.decay_time {
            ramp(
                life - self.attack_time,
                self.decay_time,
                self.start_amplitude,
                self.sustain_level,
            )
        } else {
            self.sustain_level
        }
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self::new(0.1, 0.1, 1.0, 0.2)
    }
}

/// Linear ramp from `from` to `to` over `duration`; zero duration jumps straight to `to`.
#[inline]
fn ramp(elapsed: f64, duration: f64, from: f64, to: f64) -> f64 {
    if duration <= 0.0 {
        return to;
    }
    from + (to - from) * (elapsed / duration)
}
