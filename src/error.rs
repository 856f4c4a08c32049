//! Error type shared by the library.
//!
//! Only session construction can fail. Everything on the render path clamps
//! instead of returning errors.

/// Errors raised while building a synthesis session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tempo must be a finite, positive number of beats per minute, slow
    /// enough that one step lasts at least a millisecond.
    #[error("invalid tempo {0} BPM")]
    InvalidTempo(f64),

    /// The step grid must contain at least one step.
    #[error("invalid step grid: {beats} beats x {subdivisions} subdivisions")]
    InvalidGrid { beats: usize, subdivisions: usize },

    /// A channel pattern does not cover exactly one bar of steps.
    #[error("pattern '{pattern}' has {found} steps, expected {expected}")]
    PatternLength {
        pattern: String,
        expected: usize,
        found: usize,
    },

    /// A channel pattern contains something other than a mark or a rest.
    #[error("unrecognized step '{found}' at position {position} in pattern '{pattern}'")]
    UnrecognizedStep {
        pattern: String,
        position: usize,
        found: char,
    },

    /// Sample rate must be non-zero.
    #[error("invalid sample rate {0} Hz")]
    InvalidSampleRate(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
