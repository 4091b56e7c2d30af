//! Benchmarks for the FFT engine and Hilbert filter bank.
//!
//! Run:
//! - cargo bench -p hilbert-iir-core

use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hilbert_iir::{FftEngine, HilbertIir};
use ndarray::Array2;
use num_complex::Complex64;

const FS: f64 = 48_000.0;
const FFT_SIZES: [usize; 2] = [1024, 32768];
const BLOCK_LEN: usize = 4096;

fn make_sine(block_len: usize, fs: f64) -> Vec<f64> {
    let step = 2.0 * PI * 440.0 / fs;
    (0..block_len).map(|i| (step * i as f64).sin()).collect()
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_forward");

    for &size in &FFT_SIZES {
        let mut engine = FftEngine::<f64>::new(size).unwrap();
        let input: Vec<Complex64> = make_sine(size, FS)
            .into_iter()
            .map(|x| Complex64::new(x, 0.0))
            .collect();
        let mut output = vec![Complex64::new(0.0, 0.0); size];

        group.bench_with_input(BenchmarkId::new("size", size), &input, |b, input| {
            b.iter(|| {
                engine.fft(black_box(input), &mut output).unwrap();
                black_box(&output);
            })
        });
    }

    group.finish();
}

fn bench_hilbert_block(c: &mut Criterion) {
    let input = make_sine(BLOCK_LEN, FS);
    let mut hilbert = HilbertIir::<f64>::new(FS, 1).unwrap();

    c.bench_function("hilbert_block_mono", |b| {
        b.iter(|| black_box(hilbert.process_block(black_box(&input), 0).unwrap()))
    });

    let mut hilbert_f32 = HilbertIir::<f32>::new(FS, 1).unwrap();
    let input_f32: Vec<f32> = input.iter().map(|&x| x as f32).collect();

    c.bench_function("hilbert_block_mono_f32", |b| {
        b.iter(|| black_box(hilbert_f32.process_block(black_box(&input_f32), 0).unwrap()))
    });
}

fn bench_hilbert_frames(c: &mut Criterion) {
    let sine = make_sine(BLOCK_LEN, FS);
    let frames = Array2::from_shape_fn((2, BLOCK_LEN), |(ch, n)| {
        if ch == 0 {
            sine[n]
        } else {
            -sine[n]
        }
    });
    let mut hilbert = HilbertIir::<f64>::new(FS, 2).unwrap();

    c.bench_function("hilbert_frames_stereo", |b| {
        b.iter(|| black_box(hilbert.process_frames(black_box(frames.view())).unwrap()))
    });
}

criterion_group!(benches, bench_fft, bench_hilbert_block, bench_hilbert_frames);
criterion_main!(benches);
