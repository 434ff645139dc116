//! Horner evaluation for the fixed-degree approximants.
//!
//! Coefficients are stored lowest degree first. The slices are compile-time
//! constants, so every loop here has a fixed trip count.

use super::{IeeeFloat, two_prod, two_sum};

#[inline(always)]
pub(crate) fn horner<F: IeeeFloat>(x: F, coeffs: &[F]) -> F {
    let mut acc = F::ZERO;
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// `num(x) / den(x)`, one division.
#[inline(always)]
pub(crate) fn rational<F: IeeeFloat>(x: F, num: &[F], den: &[F]) -> F {
    horner(x, num) / horner(x, den)
}

/// Compensated Horner at the double-word point `x_hi + x_lo`.
///
/// Each step's product and sum errors, plus the `x_lo` contribution, run
/// through a second Horner recurrence that is folded in at the end; the
/// result is as if evaluated in twice the working precision.
#[inline]
pub(crate) fn horner_compensated<F: IeeeFloat>(x_hi: F, x_lo: F, coeffs: &[F]) -> F {
    let Some((&last, rest)) = coeffs.split_last() else {
        return F::ZERO;
    };
    let mut s = last;
    let mut corr = F::ZERO;
    for &c in rest.iter().rev() {
        let (p, p_err) = two_prod(s, x_hi);
        let (t, s_err) = two_sum(p, c);
        corr = corr * x_hi + (p_err + s_err + s * x_lo);
        s = t;
    }
    s + corr
}
