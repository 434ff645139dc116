//! exp(x) by exponent dispatch.
//!
//! Bands, by the unbiased exponent `u` of x:
//!
//! * NaN/Inf: propagated or saturated before anything else.
//! * `u < TINY_EXP`: e^x rounds to 1 + x.
//! * `u < -4` (|x| < 1/16): Maclaurin series.
//! * `u < -1` (|x| < 1/2): Pade [n/n], evaluated as 1 + 2·O/(E - O) where E
//!   and O are the even and odd parts of the numerator.
//! * `u >= SATURATE_EXP`: beyond either limit, 0 or +Inf by sign.
//! * otherwise: x = (N·k + j)·ln2/N + r with |r| <= ln2/(2N), so
//!   e^x = 2^k · 2^(j/N) · e^r, the middle factor from the hi/lo table and
//!   e^r from a degree-5 polynomial. 2^k is written into the exponent field.

use super::exp_data::{EXP2_TAB_F32, EXP2_TAB_F64};
use super::poly::horner;
use super::{IeeeFloat, IeeeWord, USE_PORTABLE, pow2_portable, scalbn, scale_portable};

pub trait ExpData: IeeeFloat {
    /// log2 of the table size N.
    const TABLE_BITS: u32;
    const INV_LN2_N: Self;
    /// ln2/N = LN2_HI_N + LN2_LO_N; the high part has trailing zeros so that
    /// `n * LN2_HI_N` is exact over the reachable range of n.
    const LN2_HI_N: Self;
    const LN2_LO_N: Self;
    /// e^r - 1 - r ≈ r²·(C2 + C3 r) + r⁴·(C4 + C5 r) on |r| <= ln2/(2N).
    const REDUCED: [Self; 4];
    /// 1/2!, 1/3!, ... for the |x| < 1/16 band.
    const MACLAURIN: &'static [Self];
    /// Even part of the Pade numerator, in powers of x².
    const PADE_EVEN: &'static [Self];
    /// Odd part of the Pade numerator divided by x, in powers of x².
    const PADE_ODD: &'static [Self];
    /// ln(MAX), rounded up.
    const OVERFLOW: Self;
    /// Below this e^x rounds to zero.
    const UNDERFLOW: Self;
    const TINY_EXP: i32;
    /// Every |x| >= 2^SATURATE_EXP lies beyond OVERFLOW / UNDERFLOW.
    const SATURATE_EXP: i32;

    fn exp2_table(j: usize) -> (Self, Self);
}

impl ExpData for f64 {
    const TABLE_BITS: u32 = 7;
    const INV_LN2_N: Self = f64::from_bits(0x4067_1547_652b_82fe);
    const LN2_HI_N: Self = f64::from_bits(0x3f76_2e42_fefa_0000);
    const LN2_LO_N: Self = f64::from_bits(0x3d0c_f79a_bc9e_3b3a);
    const REDUCED: [Self; 4] = [
        f64::from_bits(0x3fdf_ffff_ffff_fdbd),
        f64::from_bits(0x3fc5_5555_5555_543c),
        f64::from_bits(0x3fa5_5555_cf17_2b91),
        f64::from_bits(0x3f81_1111_67a4_d017),
    ];
    const MACLAURIN: &'static [Self] = &[
        0.5,
        0.16666666666666666,
        0.041666666666666664,
        0.008333333333333333,
        0.001388888888888889,
        0.0001984126984126984,
        2.48015873015873e-05,
        2.7557319223985893e-06,
    ];
    // [6/6]
    const PADE_EVEN: &'static [Self] = &[
        1.0,
        0.11363636363636363,
        0.0012626262626262627,
        1.503126503126503e-06,
    ];
    const PADE_ODD: &'static [Self] = &[0.5, 0.015151515151515152, 6.313131313131313e-05];
    const OVERFLOW: Self = 709.782712893384;
    const UNDERFLOW: Self = -745.1332191019411;
    const TINY_EXP: i32 = -27;
    const SATURATE_EXP: i32 = 10;

    #[inline(always)]
    fn exp2_table(j: usize) -> (Self, Self) {
        (
            f64::from_bits(EXP2_TAB_F64[2 * j]),
            f64::from_bits(EXP2_TAB_F64[2 * j + 1]),
        )
    }
}

impl ExpData for f32 {
    const TABLE_BITS: u32 = 5;
    const INV_LN2_N: Self = f32::from_bits(0x4238_aa3b);
    // 11 significant bits: |n| < 2^13 keeps n * LN2_HI_N exact.
    const LN2_HI_N: Self = f32::from_bits(0x3cb1_8000);
    const LN2_LO_N: Self = f32::from_bits(0xb6de_8083);
    const REDUCED: [Self; 4] = [0.5, 0.16666667, 0.041666668, 0.008333334];
    const MACLAURIN: &'static [Self] = &[0.5, 0.16666667, 0.041666668, 0.008333334];
    // [4/4]
    const PADE_EVEN: &'static [Self] = &[1.0, 0.10714286, 0.0005952381];
    const PADE_ODD: &'static [Self] = &[0.5, 0.011904762];
    const OVERFLOW: Self = f32::from_bits(0x42b1_7218);
    const UNDERFLOW: Self = f32::from_bits(0xc2cf_f1b4);
    const TINY_EXP: i32 = -13;
    const SATURATE_EXP: i32 = 7;

    #[inline(always)]
    fn exp2_table(j: usize) -> (Self, Self) {
        (
            f32::from_bits(EXP2_TAB_F32[2 * j]),
            f32::from_bits(EXP2_TAB_F32[2 * j + 1]),
        )
    }
}

#[inline(always)]
fn exp_maclaurin<F: ExpData>(x: F) -> F {
    let q = horner(x, F::MACLAURIN);
    F::ONE + (x + x * x * q)
}

#[inline(always)]
fn exp_pade<F: ExpData>(x: F) -> F {
    let x2 = x * x;
    let even = horner(x2, F::PADE_EVEN);
    let odd = x * horner(x2, F::PADE_ODD);
    F::ONE + F::TWO * odd / (even - odd)
}

/// Splits x into 2^k · y with y ≈ 2^(j/N) · e^r. Caller keeps x between
/// UNDERFLOW and OVERFLOW.
#[inline(always)]
fn exp_reduce<F: ExpData>(x: F) -> (i32, F) {
    let shift = F::TO_INT + F::TO_INT * F::HALF;
    let z = x * F::INV_LN2_N;
    let kd = (z + shift) - shift;
    let n = kd.to_i32();
    let r = x - kd * F::LN2_HI_N - kd * F::LN2_LO_N;

    let j = (n & ((1 << F::TABLE_BITS) - 1)) as usize;
    let k = n >> F::TABLE_BITS;
    let (t_hi, t_lo) = F::exp2_table(j);

    let [c2, c3, c4, c5] = F::REDUCED;
    let r2 = r * r;
    let p = r + r2 * (c2 + r * c3) + r2 * r2 * (c4 + r * c5);
    (k, t_hi + (t_lo + t_hi * p))
}

pub fn exp_ieee<F: ExpData>(x: F) -> F {
    let w = IeeeWord::new(x);
    let e = w.exponent();
    if e == F::exp_field_max() {
        if w.mantissa() != 0 {
            return x + x;
        }
        return if w.sign() { F::ZERO } else { F::INFINITY };
    }

    let u = e as i32 - F::BIAS;
    if u < F::TINY_EXP {
        return F::ONE + x;
    }
    if u < -4 {
        return exp_maclaurin(x);
    }
    if u < -1 {
        return exp_pade(x);
    }
    if u >= F::SATURATE_EXP {
        return if w.sign() { F::ZERO } else { F::INFINITY };
    }
    if x > F::OVERFLOW {
        return F::INFINITY;
    }
    if x < F::UNDERFLOW {
        return F::ZERO;
    }

    let (k, y) = exp_reduce(x);
    if k > -F::BIAS && k <= F::BIAS {
        y * F::exp2i(k)
    } else {
        scalbn(y, k)
    }
}

pub fn exp_portable<F: ExpData>(x: F) -> F {
    if x != x {
        return x + x;
    }
    if x > F::OVERFLOW {
        return F::INFINITY;
    }
    if x < F::UNDERFLOW {
        return F::ZERO;
    }

    let ax = if x < F::ZERO { -x } else { x };
    if ax < pow2_portable::<F>(F::TINY_EXP) {
        return F::ONE + x;
    }
    if ax < F::from_f64(0.0625) {
        return exp_maclaurin(x);
    }
    if ax < F::HALF {
        return exp_pade(x);
    }

    let (k, y) = exp_reduce(x);
    scale_portable(y, k)
}

#[inline]
pub fn exp<F: ExpData>(x: F) -> F {
    if USE_PORTABLE {
        exp_portable(x)
    } else {
        exp_ieee(x)
    }
}
