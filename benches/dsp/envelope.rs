//! Benchmarks for ADSR amplitude evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepsynth::dsp::EnvelopeConfig;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = EnvelopeConfig::new(0.01, 0.1, 0.7, 0.2);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        // Held: attack/decay/sustain branch
        group.bench_with_input(BenchmarkId::new("held", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    *s = env.amplitude(i as f64 / SAMPLE_RATE, 0.0, f64::NEG_INFINITY);
                }
                black_box(&buffer);
            })
        });

        // Released: evaluates the held level at release time too
        group.bench_with_input(BenchmarkId::new("released", size), &size, |b, _| {
            b.iter(|| {
                for (i, s) in buffer.iter_mut().enumerate() {
                    *s = env.amplitude(0.05 + i as f64 / SAMPLE_RATE, 0.0, 0.05);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
