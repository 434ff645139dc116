//! mod_2(x) = x - 2·trunc(x/2): the remainder of x by 2 with the sign of x.
//!
//! Always exact. Zero results keep the sign of x; Inf and NaN give NaN.

use super::{IeeeFloat, IeeeWord, USE_PORTABLE, trunc_ieee, trunc_portable};

#[inline]
pub fn mod_2_ieee<F: IeeeFloat>(x: F) -> F {
    let w = IeeeWord::new(x);
    let e = w.exponent();
    if e == F::exp_field_max() {
        return if w.mantissa() != 0 { x + x } else { F::NAN };
    }

    let u = e as i32 - F::BIAS;
    if u < 1 {
        return x;
    }
    let mant = F::MANT_BITS as i32;
    if u > mant {
        // every bit weighs at least 2
        return F::ZERO.copysign(x);
    }
    if u == mant {
        return if w.mantissa() & 1 == 1 {
            F::ONE.copysign(x)
        } else {
            F::ZERO.copysign(x)
        };
    }

    let t = trunc_ieee(x * F::HALF);
    let r = x - (t + t);
    if r == F::ZERO { F::ZERO.copysign(x) } else { r }
}

#[inline]
pub fn mod_2_portable<F: IeeeFloat>(x: F) -> F {
    if x != x {
        return x + x;
    }
    if x > F::MAX || x < -F::MAX {
        return F::NAN;
    }
    if x < F::TWO && x > -F::TWO {
        return x;
    }
    let t = trunc_portable(x * F::HALF);
    let r = x - (t + t);
    if r == F::ZERO { x * F::ZERO } else { r }
}

#[inline]
pub fn mod_2<F: IeeeFloat>(x: F) -> F {
    if USE_PORTABLE {
        mod_2_portable(x)
    } else {
        mod_2_ieee(x)
    }
}
