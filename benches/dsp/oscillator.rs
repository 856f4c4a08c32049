//! Benchmarks for closed-form waveform evaluation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use stepsynth::dsp::{osc, Lfo, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn render(buffer: &mut [f64], waveform: Waveform, lfo: Lfo) {
    for (i, sample) in buffer.iter_mut().enumerate() {
        *sample = osc(440.0, i as f64 / SAMPLE_RATE, waveform, lfo);
    }
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        for (name, waveform) in [
            ("sine", Waveform::Sine),
            ("square", Waveform::Square),
            ("triangle", Waveform::Triangle),
            // Nine sines per sample
            ("analog_saw", Waveform::AnalogSaw),
            ("digital_saw", Waveform::DigitalSaw),
            ("noise", Waveform::Noise),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| render(black_box(&mut buffer), waveform, Lfo::NONE))
            });
        }

        // Vibrato adds one extra sine per sample
        group.bench_with_input(BenchmarkId::new("sine_lfo", size), &size, |b, _| {
            b.iter(|| render(black_box(&mut buffer), Waveform::Sine, Lfo::new(5.0, 0.001)))
        });
    }

    group.finish();
}
