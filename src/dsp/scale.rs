//! Scale-degree to frequency conversion.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frequency of scale degree 0 in the default scale.
pub const BASE_FREQUENCY: f64 = 256.0;

/// Equal-temperament semitone ratio, 2^(1/12).
pub const SEMITONE_RATIO: f64 = 1.059_463_094_359_295_3;

/// Tuning used to turn a note id into a frequency.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scale {
    /// 12-tone equal temperament with degree 0 at 256 Hz
    #[default]
    EqualTempered,
}

impl Scale {
    /// Frequency in Hz of scale degree `id`.
    pub fn frequency(self, id: i32) -> f64 {
        match self {
            Scale::EqualTempered => BASE_FREQUENCY * SEMITONE_RATIO.powi(id),
        }
    }
}

/// Frequency of `id` in the default scale.
#[inline]
pub fn frequency(id: i32) -> f64 {
    Scale::default().frequency(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_zero_is_base() {
        assert_eq!(frequency(0), BASE_FREQUENCY);
    }

    #[test]
    fn twelve_semitones_double_the_frequency() {
        for id in [-36, -12, 0, 12, 64] {
            let ratio = frequency(id + 12) / frequency(id);
            assert!((ratio - 2.0).abs() < 1e-9, "octave above {id} was x{ratio}");
        }
    }

    #[test]
    fn ratio_matches_twelfth_root_of_two() {
        assert!((SEMITONE_RATIO - 2f64.powf(1.0 / 12.0)).abs() < 1e-15);
    }
}
