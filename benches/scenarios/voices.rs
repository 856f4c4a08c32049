//! Benchmarks for each preset instrument sounding one note.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use stepsynth::{synth::Note, voices::Catalogue};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let catalogue = Catalogue::new();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        for (kind, instrument) in catalogue.iter() {
            let note = Note::triggered(64, Arc::clone(instrument), 0.0);
            let name = kind.to_string().replace(' ', "_");
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (i, s) in buffer.iter_mut().enumerate() {
                        *s = instrument.sound(0.02 + i as f64 / SAMPLE_RATE, &note).sample;
                    }
                    black_box(&buffer);
                })
            });
        }
    }

    group.finish();
}
