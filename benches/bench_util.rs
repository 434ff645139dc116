#![allow(dead_code)]

use criterion::measurement::WallTime;
use criterion::{BenchmarkGroup, Criterion, black_box};
use std::sync::OnceLock;
use std::time::Duration;

const RNG_A: u64 = 6364136223846793005;
const RNG_C: u64 = 1442695040888963407;
const RNG_DENOM: f64 = (1u64 << 53) as f64;

pub fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(RNG_A).wrapping_add(RNG_C);
    *state
}

pub fn uniform_f64(state: &mut u64) -> f64 {
    let bits = lcg_next(state) >> 11;
    (bits as f64) / RNG_DENOM
}

pub fn gen_range(count: usize, min: f64, max: f64, seed: u64) -> Vec<f64> {
    let mut state = seed;
    let span = max - min;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(min + uniform_f64(&mut state) * span);
    }
    values
}

pub fn gen_range_f32(count: usize, min: f32, max: f32, seed: u64) -> Vec<f32> {
    gen_range(count, min as f64, max as f64, seed)
        .into_iter()
        .map(|x| x as f32)
        .collect()
}

pub fn gen_pairs(count: usize, min: f64, max: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut state = seed;
    let span = max - min;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let x = min + uniform_f64(&mut state) * span;
        let y = min + uniform_f64(&mut state) * span;
        values.push((x, y));
    }
    values
}

pub fn gen_triples(count: usize, min: f64, max: f64, seed: u64) -> Vec<(f64, f64, f64)> {
    let mut state = seed;
    let span = max - min;
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let x = min + uniform_f64(&mut state) * span;
        let y = min + uniform_f64(&mut state) * span;
        let z = min + uniform_f64(&mut state) * span;
        values.push((x, y, z));
    }
    values
}

pub fn bench_one<T, F>(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, inputs: &[T], f: F)
where
    T: Copy + core::ops::Add<Output = T> + Default,
    F: Fn(T) -> T + Copy,
{
    group.bench_function(name, |b| {
        b.iter(|| {
            let mut acc = T::default();
            for &x in inputs {
                acc = acc + f(black_box(x));
            }
            black_box(acc)
        })
    });
}

/// The exponent-field path against the comparison-only path.
pub fn bench_paths<T, F, G>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    inputs: &[T],
    ieee: F,
    portable: G,
) where
    T: Copy + core::ops::Add<Output = T> + Default,
    F: Fn(T) -> T + Copy,
    G: Fn(T) -> T + Copy,
{
    bench_one(group, "ieee", inputs, ieee);
    bench_one(group, "portable", inputs, portable);
}

fn bench_one3<F>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    name: &str,
    inputs: &[(f64, f64, f64)],
    f: F,
) where
    F: Fn(f64, f64, f64) -> f64 + Copy,
{
    group.bench_function(name, |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &(x, y, z) in inputs {
                acc += f(black_box(x), black_box(y), black_box(z));
            }
            black_box(acc)
        })
    });
}

pub fn bench_paths3<F, G>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    inputs: &[(f64, f64, f64)],
    ieee: F,
    portable: G,
) where
    F: Fn(f64, f64, f64) -> f64 + Copy,
    G: Fn(f64, f64, f64) -> f64 + Copy,
{
    bench_one3(group, "ieee", inputs, ieee);
    bench_one3(group, "portable", inputs, portable);
}

pub fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(200)
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(5))
}

pub struct LibmFns {
    pub exp: unsafe extern "C" fn(f64) -> f64,
    pub asin: unsafe extern "C" fn(f64) -> f64,
    pub floor: unsafe extern "C" fn(f64) -> f64,
    pub fmod: unsafe extern "C" fn(f64, f64) -> f64,
    pub hypot: unsafe extern "C" fn(f64, f64) -> f64,
}

static LIBM_FNS: OnceLock<Option<LibmFns>> = OnceLock::new();

fn libm_path() -> Option<String> {
    if let Ok(value) = std::env::var("TMPL_GLIBC_LIBM") {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }
    let default = "/lib/x86_64-linux-gnu/libm.so.6";
    if std::path::Path::new(default).exists() {
        return Some(default.to_string());
    }
    eprintln!("glibc libm not found; set TMPL_GLIBC_LIBM to compare against it");
    None
}

fn load_libm() -> Option<LibmFns> {
    let path = libm_path()?;
    let lib = unsafe { libloading::Library::new(&path).ok()? };
    let lib = Box::leak(Box::new(lib));
    unsafe {
        let exp: libloading::Symbol<unsafe extern "C" fn(f64) -> f64> = lib.get(b"exp").ok()?;
        let asin: libloading::Symbol<unsafe extern "C" fn(f64) -> f64> = lib.get(b"asin").ok()?;
        let floor: libloading::Symbol<unsafe extern "C" fn(f64) -> f64> =
            lib.get(b"floor").ok()?;
        let fmod: libloading::Symbol<unsafe extern "C" fn(f64, f64) -> f64> =
            lib.get(b"fmod").ok()?;
        let hypot: libloading::Symbol<unsafe extern "C" fn(f64, f64) -> f64> =
            lib.get(b"hypot").ok()?;
        eprintln!("Using libm from {path}");
        Some(LibmFns {
            exp: *exp,
            asin: *asin,
            floor: *floor,
            fmod: *fmod,
            hypot: *hypot,
        })
    }
}

pub fn glibc() -> Option<&'static LibmFns> {
    LIBM_FNS.get_or_init(load_libm).as_ref()
}
