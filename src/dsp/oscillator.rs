#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/*
Oscillators
===========

Every waveform is computed directly from an absolute time in seconds rather
than from an accumulated phase. That makes the oscillator a pure function:
two voices asking for the same frequency at the same instant get the same
answer, and an instrument can be evaluated at any point of a note's life
without first "running" it up to that point.

The phase term carries an optional LFO that wobbles the effective frequency:

    phase = w(f) * t + depth * f * sin(w(lfo_f) * t)       where w(f) = 2 pi f

With depth = 0 this collapses to a plain oscillator at `f`.

Waveforms evaluated on that phase:

  Sine        sin(phase)
  Square      +1 while sin(phase) > 0, otherwise -1
  Triangle    asin(sin(phase)) * 2/pi
  AnalogSaw   sum of the first nine harmonics sin(n phase)/n, scaled by 2/pi.
              Band-limited, so it sounds "warm" and costs nine sin() calls.
  DigitalSaw  closed-form ramp from the raw time, ignores the LFO:
              (2/pi) * (f pi mod(t, 1/f) - pi/2)
  Noise       independent uniform draw in [-1, 1]
*/

/// Waveform selector for [`osc`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    AnalogSaw,
    DigitalSaw,
    Noise,
}

impl Waveform {
    /// Map a legacy integer selector (0..=5) onto a waveform.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Square),
            2 => Some(Waveform::Triangle),
            3 => Some(Waveform::AnalogSaw),
            4 => Some(Waveform::DigitalSaw),
            5 => Some(Waveform::Noise),
            _ => None,
        }
    }
}

/// Low-frequency phase modulation applied to an oscillator.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lfo {
    /// Modulation rate in Hz
    pub frequency: f64,
    /// Modulation depth, scaled by the carrier frequency
    pub depth: f64,
}

impl Lfo {
    pub const fn new(frequency: f64, depth: f64) -> Self {
        Self { frequency, depth }
    }

    /// No modulation.
    pub const NONE: Lfo = Lfo::new(0.0, 0.0);
}

/// Number of harmonics summed by [`Waveform::AnalogSaw`].
const ANALOG_SAW_HARMONICS: u32 = 9;

/// Convert a frequency in Hz to angular velocity in radians per second.
#[inline]
pub fn angular_velocity(hertz: f64) -> f64 {
    hertz * 2.0 * PI
}

/// Evaluate `waveform` at `frequency` Hz for absolute `time` seconds.
///
/// Output stays within `[-1, 1]` for finite inputs.
pub fn osc(frequency: f64, time: f64, waveform: Waveform, lfo: Lfo) -> f64 {
    let phase = angular_velocity(frequency) * time
        + lfo.depth * frequency * (angular_velocity(lfo.frequency) * time).sin();

    match waveform {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => phase.sin().asin() * (2.0 / PI),
        Waveform::AnalogSaw => {
            let sum: f64 = (1..=ANALOG_SAW_HARMONICS)
                .map(|n| {
                    let n = n as f64;
                    (n * phase).sin() / n
                })
                .sum();
            sum * (2.0 / PI)
        }
        Waveform::DigitalSaw => digital_saw(frequency, time),
        Waveform::Noise => noise(),
    }
}

/// Like [`osc`] but selected by legacy integer id; unknown ids produce silence.
pub fn osc_indexed(frequency: f64, time: f64, selector: i32, lfo: Lfo) -> f64 {
    match Waveform::from_index(selector) {
        Some(waveform) => osc(frequency, time, waveform, lfo),
        None => 0.0,
    }
}

fn digital_saw(frequency: f64, time: f64) -> f64 {
    if frequency.is_nan() || frequency <= 0.0 {
        return 0.0;
    }
    // Euclidean remainder keeps negative times inside one period too
    let within_period = time.rem_euclid(1.0 / frequency);
    let value = (2.0 / PI) * (frequency * PI * within_period - PI / 2.0);
    value.clamp(-1.0, 1.0)
}

#[inline]
fn noise() -> f64 {
    2.0 * rand::random::<f64>() - 1.0
}
