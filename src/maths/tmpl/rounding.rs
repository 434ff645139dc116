//! floor(x), and the truncation the portable paths build on.
//!
//! The IEEE path clears the fraction bits with a mask derived from the
//! exponent; the portable path uses the 2^p add-sub trick.

use super::{IeeeFloat, IeeeWord, USE_PORTABLE};

#[inline(always)]
pub fn floor_ieee<F: IeeeFloat>(x: F) -> F {
    let w = IeeeWord::new(x);
    let e = w.exponent();
    if e == F::exp_field_max() {
        return x;
    }
    if (w.bits() & F::abs_mask()) == 0 {
        return x;
    }

    let j0 = e as i32 - F::BIAS;
    if j0 < 0 {
        // |x| < 1, subnormals included
        return if w.sign() { -F::ONE } else { F::ZERO };
    }
    if j0 >= F::MANT_BITS as i32 {
        return x;
    }

    let frac = F::mant_mask() >> j0;
    if (w.bits() & frac) == 0 {
        return x;
    }
    let mut ui = w.bits() & !frac;
    if w.sign() {
        // negative: floor moves away from zero; a carry bumps the exponent
        ui += frac + 1;
    }
    F::from_word(ui)
}

/// trunc(x) by masking; `x` must be finite.
#[inline(always)]
pub(crate) fn trunc_ieee<F: IeeeFloat>(x: F) -> F {
    let w = IeeeWord::new(x);
    let j0 = w.exponent() as i32 - F::BIAS;
    if j0 < 0 {
        return F::ZERO.copysign(x);
    }
    if j0 >= F::MANT_BITS as i32 {
        return x;
    }
    let frac = F::mant_mask() >> j0;
    F::from_word(w.bits() & !frac)
}

/// trunc(x) with comparisons only. Signed zeros survive.
#[inline(always)]
pub(crate) fn trunc_portable<F: IeeeFloat>(x: F) -> F {
    if x != x {
        return x + x;
    }
    if x == F::ZERO {
        return x;
    }
    let negative = x < F::ZERO;
    let ax = if negative { -x } else { x };
    if ax >= F::TO_INT {
        return x;
    }
    let mut t = (ax + F::TO_INT) - F::TO_INT;
    if t > ax {
        t = t - F::ONE;
    }
    if negative { -t } else { t }
}

#[inline(always)]
pub fn floor_portable<F: IeeeFloat>(x: F) -> F {
    let t = trunc_portable(x);
    if t > x { t - F::ONE } else { t }
}

#[inline(always)]
pub fn floor<F: IeeeFloat>(x: F) -> F {
    if USE_PORTABLE {
        floor_portable(x)
    } else {
        floor_ieee(x)
    }
}
