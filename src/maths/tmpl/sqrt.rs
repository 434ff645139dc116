//! Square root for the `IeeeFloat` types.
//!
//! x86_64 uses the SSE instruction. Other targets run Newton's iteration from
//! an exponent-halving seed and finish with a one-ulp neighbour check.

use super::IeeeFloat;
#[cfg(any(test, not(target_arch = "x86_64")))]
use super::scalbn;

#[cfg(any(test, not(target_arch = "x86_64")))]
#[inline]
fn next_up_pos<F: IeeeFloat>(x: F) -> F {
    F::from_word(x.to_word() + 1)
}

#[cfg(any(test, not(target_arch = "x86_64")))]
#[inline]
fn next_down_pos<F: IeeeFloat>(x: F) -> F {
    F::from_word(x.to_word() - 1)
}

/// Positive, finite, nonzero `x` only.
#[cfg(any(test, not(target_arch = "x86_64")))]
#[inline]
pub(crate) fn sqrt_fallback<F: IeeeFloat>(x: F) -> F {
    let mut ax = x;
    let mut scale = 0;
    if x.exponent_field() == 0 {
        // Even shift so the exponent halves cleanly.
        let shift = 2 * ((F::MANT_BITS as i32 + 3) / 2);
        ax = scalbn(ax, shift);
        scale = -shift / 2;
    }

    let magic = (F::BIAS as u64) << (F::MANT_BITS - 1);
    let mut y = F::from_word((ax.to_word() >> 1) + magic);
    for _ in 0..6 {
        y = F::HALF * (y + ax / y);
    }

    if scale != 0 {
        y = scalbn(y, scale);
    }

    let y2 = y * y;
    if y2 < x {
        let y_next = next_up_pos(y);
        if y_next * y_next <= x {
            y = y_next;
        }
    } else if y2 > x {
        let y_prev = next_down_pos(y);
        if y_prev * y_prev >= x {
            y = y_prev;
        }
    }
    y
}

#[inline(always)]
pub(crate) fn sqrt_f64_native(x: f64) -> f64 {
    #[cfg(target_arch = "x86_64")]
    {
        super::arch::sqrt_sse_f64(x)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        sqrt_fallback(x)
    }
}

#[inline(always)]
pub(crate) fn sqrt_f32_native(x: f32) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        super::arch::sqrt_sse_f32(x)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        sqrt_fallback(x)
    }
}

#[inline]
pub fn sqrt<F: IeeeFloat>(x: F) -> F {
    if x.is_nan_bits() {
        return F::NAN;
    }
    if x == F::ZERO {
        return x;
    }
    if x < F::ZERO {
        return F::NAN;
    }
    if x.is_inf_bits() {
        return F::INFINITY;
    }
    x.sqrt_native()
}
