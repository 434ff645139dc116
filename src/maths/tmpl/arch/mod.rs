// Architecture-specific helpers (FMA, square root).

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod x86;
#[cfg(target_arch = "aarch64")]
mod aarch64;

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
pub(crate) use x86::{fma_hw_f32, fma_hw_f64};

#[cfg(target_arch = "x86_64")]
pub(crate) use x86::{sqrt_sse_f32, sqrt_sse_f64};

#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::{fma_hw_f32, fma_hw_f64};

// Never reached: HAS_FMA is false on these targets.
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
#[inline(always)]
pub(crate) unsafe fn fma_hw_f64(a: f64, b: f64, c: f64) -> f64 {
    a * b + c
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
#[inline(always)]
pub(crate) unsafe fn fma_hw_f32(a: f32, b: f32, c: f32) -> f32 {
    a * b + c
}
