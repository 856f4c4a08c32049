//! Real-world scenario benchmarks.
//!
//! Preset voices on their own, and the registry mixing a busy session.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
