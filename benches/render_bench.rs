//! Benchmarks for synthesis primitives and the mixed render path.
//!
//! Run with: cargo bench
//!
//! Every voice is evaluated in closed form per sample, so cost grows with
//! polyphony. These numbers show how many voices fit in a device block.
//!
//! Reference timing at 44.1kHz sample rate:
//!   - 64 samples  = 1.45ms deadline
//!   - 256 samples = 5.80ms deadline
//!   - 1024 samples = 23.2ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator and envelope evaluation
//!   - scenarios/*  Preset voices and full registry mixes

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

pub const SAMPLE_RATE: f64 = 44_100.0;

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_envelope,
    scenarios::bench_voices,
    scenarios::bench_mix,
);
criterion_main!(benches);
