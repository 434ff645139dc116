#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{
    _mm_cvtsd_f64, _mm_cvtss_f32, _mm_fmadd_sd, _mm_fmadd_ss, _mm_set_sd, _mm_set_ss,
    _mm_sqrt_sd, _mm_sqrt_ss,
};

#[cfg(target_arch = "x86")]
use core::arch::x86::{_mm_cvtsd_f64, _mm_cvtss_f32, _mm_fmadd_sd, _mm_fmadd_ss, _mm_set_sd, _mm_set_ss};

#[target_feature(enable = "fma")]
pub(crate) unsafe fn fma_hw_f64(a: f64, b: f64, c: f64) -> f64 {
    _mm_cvtsd_f64(_mm_fmadd_sd(_mm_set_sd(a), _mm_set_sd(b), _mm_set_sd(c)))
}

#[target_feature(enable = "fma")]
pub(crate) unsafe fn fma_hw_f32(a: f32, b: f32, c: f32) -> f32 {
    _mm_cvtss_f32(_mm_fmadd_ss(_mm_set_ss(a), _mm_set_ss(b), _mm_set_ss(c)))
}

// SSE2 is part of the x86_64 baseline.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn sqrt_sse_f64(x: f64) -> f64 {
    // Safety: sse2 is always enabled on x86_64.
    unsafe { _mm_cvtsd_f64(_mm_sqrt_sd(_mm_set_sd(0.0), _mm_set_sd(x))) }
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) fn sqrt_sse_f32(x: f32) -> f32 {
    // Safety: sse is always enabled on x86_64.
    unsafe { _mm_cvtss_f32(_mm_sqrt_ss(_mm_set_ss(x))) }
}
