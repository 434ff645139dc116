//! Extended-precision evaluation kernel.
//!
//! Everything here is written once, generically over [`IeeeFloat`], and
//! instantiated for `f32` and `f64`. Each elementary function comes in two
//! interchangeable flavours: `*_ieee`, which classifies its input by reading
//! the exponent field, and `*_portable`, which reaches the same bands with
//! ordinary comparisons and never looks at a bit pattern. The unsuffixed name
//! is whichever one the `portable` feature selects.

#![allow(non_camel_case_types)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::unusual_byte_groupings)]

mod arch;
mod asin;
mod bessel;
mod double_double;
mod exp;
mod exp_data;
mod hypot;
mod long_double;
mod mod2;
mod poly;
mod rounding;
mod sqrt;
mod sum;
mod word;

pub use asin::{AsinData, asin, asin_ieee, asin_portable};
pub use bessel::{BesselData, bessel_i0, bessel_i0_ieee, bessel_i0_portable, kaiser_bessel};
pub use double_double::DoubleDouble;
pub use exp::{ExpData, exp, exp_ieee, exp_portable};
pub use hypot::{hypot, hypot_ieee, hypot_portable, hypot3, hypot3_ieee, hypot3_portable};
pub use long_double::{Binary80, Binary128, ExtendedWord, LongDoubleLayout, NATIVE_LONG_DOUBLE};
pub use mod2::{mod_2, mod_2_ieee, mod_2_portable};
pub use rounding::{floor, floor_ieee, floor_portable};
pub use sqrt::sqrt;
pub use sum::{NeumaierSum, compensated_sum, fast_two_sum, neumaier_two_sum, two_prod, two_sum};
pub use word::{IeeeFloat, IeeeWord};

pub(crate) use rounding::{trunc_ieee, trunc_portable};

/// Public entry points take the comparison-only path.
pub(crate) const USE_PORTABLE: bool = cfg!(feature = "portable");

pub(crate) const HAS_FMA: bool = !cfg!(feature = "soft-fma")
    && (cfg!(target_arch = "aarch64")
        || (cfg!(any(target_arch = "x86_64", target_arch = "x86"))
            && cfg!(target_feature = "fma")));

/// scalbn(x, n): multiply by 2^n through the exponent field.
#[inline(always)]
pub fn scalbn<F: IeeeFloat>(mut x: F, n: i32) -> F {
    let shift = F::MANT_BITS as i32 + 2;
    let field_max = F::exp_field_max() as i32;

    if n == 0 {
        return x;
    }

    let mut ix = x.to_word();
    let mut k = x.exponent_field() as i32;
    if k == 0 {
        if (ix & F::mant_mask()) == 0 {
            return x;
        }
        x = x * F::exp2i(shift);
        ix = x.to_word();
        k = x.exponent_field() as i32 - shift;
    }
    if k == field_max {
        return x + x;
    }
    if n < -50000 {
        return F::MIN_POSITIVE * F::MIN_POSITIVE.copysign(x);
    }
    if n > 50000 || k + n > field_max - 1 {
        return F::MAX * F::MAX.copysign(x);
    }

    let keep = !(F::exp_mask());
    k += n;
    if k > 0 {
        return F::from_word((ix & keep) | ((k as u64) << F::MANT_BITS));
    }
    if k <= -shift {
        return F::MIN_POSITIVE * F::MIN_POSITIVE.copysign(x);
    }
    k += shift;
    F::from_word((ix & keep) | ((k as u64) << F::MANT_BITS)) * F::exp2i(-shift)
}

/// 2^k by repeated squaring; no exponent-field access.
#[inline]
pub(crate) fn pow2_portable<F: IeeeFloat>(k: i32) -> F {
    let mut base = if k < 0 { F::HALF } else { F::TWO };
    let mut n = k.unsigned_abs();
    let mut r = F::ONE;
    while n > 0 {
        if n & 1 == 1 {
            r = r * base;
        }
        n >>= 1;
        if n > 0 {
            base = base * base;
        }
    }
    r
}

/// x * 2^k in two halves so neither factor overflows on its own.
#[inline]
pub(crate) fn scale_portable<F: IeeeFloat>(x: F, k: i32) -> F {
    let k1 = k / 2;
    x * pow2_portable::<F>(k1) * pow2_portable::<F>(k - k1)
}
