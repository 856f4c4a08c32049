//! Benchmarks for the registry mixing many voices.
//!
//! Voices are held harmonica notes, so nothing is pruned and the voice
//! count stays fixed for the whole run.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use stepsynth::{
    synth::{Note, VoiceRegistry},
    voices,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

const VOICE_COUNTS: &[usize] = &[1, 8, 32];

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    let harmonica = Arc::new(voices::harmonica());

    for &voices in VOICE_COUNTS {
        let registry = VoiceRegistry::new();
        registry.add_notes(
            (0..voices).map(|i| Note::triggered(52 + i as i32, harmonica.clone(), 0.0)),
        );

        for &size in BLOCK_SIZES {
            let mut buffer = vec![0.0f32; size];
            let id = format!("{voices}_voices");
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| registry.render_block(black_box(&mut buffer), 1.0, SAMPLE_RATE))
            });
        }
    }

    group.finish();
}
