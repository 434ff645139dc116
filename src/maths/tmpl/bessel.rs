//! Modified Bessel function of the first kind, order zero.
//!
//! Near zero: I0(x) = Σ q^k/(k!)², q = (x/2)², evaluated with a compensated
//! Horner at the exact double-word q so the result carries no error from
//! squaring x. Past the crossover: the asymptotic expansion
//! I0(x) ~ e^x/sqrt(2πx) · Σ a_k/x^k, a_k = ((2k-1)!!)²/(k!·8^k).
//!
//! The crossover sits where the smallest asymptotic term drops below half an
//! ulp (e^-2x ≈ 2^-53 puts it at 18 for f64; 9 for f32). The Maclaurin term
//! counts then follow from q^k/(k!)² falling below the same bound at the
//! crossover.

use super::exp::{ExpData, exp_ieee, exp_portable};
use super::poly::{horner, horner_compensated};
use super::{IeeeWord, USE_PORTABLE, pow2_portable, sqrt, two_prod};

pub trait BesselData: ExpData {
    const I0_TINY_EXP: i32;
    /// Binade holding the crossover, and the crossover itself.
    const CROSSOVER_EXP: i32;
    const CROSSOVER: Self;
    /// 1/(k!)², k = 0, 1, ...
    const I0_SERIES: &'static [Self];
    /// a_k, k = 0, 1, ...
    const ASYMPTOTIC: &'static [Self];
}

impl BesselData for f64 {
    const I0_TINY_EXP: i32 = -27;
    const CROSSOVER_EXP: i32 = 4;
    const CROSSOVER: Self = 18.0;
    const I0_SERIES: &'static [Self] = &[
        1.0,
        1.0,
        0.25,
        0.027777777777777776,
        0.001736111111111111,
        6.944444444444444e-05,
        1.9290123456790124e-06,
        3.936759889140842e-08,
        6.151187326782565e-10,
        7.594058428126624e-12,
        7.594058428126623e-14,
        6.276081345559193e-16,
        4.358389823304995e-18,
        2.5789288895295828e-20,
        1.3157800456783586e-22,
        5.8479113141260385e-25,
        2.2843403570804838e-27,
        7.904291893012054e-30,
        2.4395962632753253e-32,
        6.757884385804225e-35,
        1.6894710964510564e-37,
        3.8310002187098785e-40,
        7.915289708078262e-43,
        1.4962740468957016e-45,
        2.5976979980828152e-48,
        4.156316796932504e-51,
        6.14839762859838e-54,
        8.434015951438106e-57,
        1.0757673407446564e-59,
        1.2791526049282477e-62,
        1.4212806721424974e-65,
        1.4789601166935458e-68,
        1.4442969889585408e-71,
    ];
    const ASYMPTOTIC: &'static [Self] = &[
        1.0,
        0.125,
        0.0703125,
        0.0732421875,
        0.112152099609375,
        0.22710800170898438,
        0.5725014209747314,
        1.7277275025844574,
        6.074042001273483,
        24.380529699556064,
        110.01714026924674,
        551.3358961220206,
        3038.090510922384,
        18257.755474293175,
        118838.42625678325,
        832859.3040162893,
        6252951.493434797,
        50069589.531988926,
        425939216.5047669,
        3836255180.2304335,
        36468400807.06556,
        364901081884.98334,
        3833534661393.9443,
        42189715702840.97,
        485401468685290.06,
        5827244631566907.0,
        7.286857349377656e+16,
        9.47628809926011e+17,
        1.2797219419759747e+19,
        1.792162323051699e+20,
        2.599382102726235e+21,
        3.900121292034e+22,
        6.046711487532402e+23,
        9.677028801069846e+24,
        1.597065525294211e+26,
        2.715581773544907e+27,
    ];
}

impl BesselData for f32 {
    const I0_TINY_EXP: i32 = -12;
    const CROSSOVER_EXP: i32 = 3;
    const CROSSOVER: Self = 9.0;
    const I0_SERIES: &'static [Self] = &[
        1.0,
        1.0,
        0.25,
        0.027777778,
        0.0017361111,
        6.9444446e-05,
        1.9290123e-06,
        3.936760e-08,
        6.151187e-10,
        7.594058e-12,
        7.594058e-14,
        6.276081e-16,
        4.358390e-18,
        2.5789289e-20,
        1.3157801e-22,
        5.847911e-25,
        2.2843403e-27,
    ];
    const ASYMPTOTIC: &'static [Self] = &[
        1.0,
        0.125,
        0.0703125,
        0.0732421875,
        0.112152099609375,
        0.227108,
        0.5725014,
        1.7277275,
        6.074042,
        24.38053,
        110.01714,
        551.3359,
        3038.0906,
        18257.756,
        118838.43,
        832859.3,
    ];
}

#[inline(always)]
fn i0_maclaurin<F: BesselData>(ax: F) -> F {
    let h = ax * F::HALF;
    let (q_hi, q_lo) = two_prod(h, h);
    horner_compensated(q_hi, q_lo, F::I0_SERIES)
}

/// `exp` is the path-matching exponential.
#[inline(always)]
fn i0_asymptotic<F: BesselData>(ax: F, exp: fn(F) -> F) -> F {
    let series = horner(F::ONE / ax, F::ASYMPTOTIC);
    let root = sqrt(F::TWO * F::PI * ax);
    if ax <= F::OVERFLOW {
        return exp(ax) / root * series;
    }
    // e^x alone overflows while I0(x) may not
    let half = exp(ax * F::HALF);
    half * (half * series / root)
}

pub fn bessel_i0_ieee<F: BesselData>(x: F) -> F {
    let w = IeeeWord::new(x);
    let e = w.exponent();
    if e == F::exp_field_max() {
        return if w.mantissa() != 0 { x + x } else { F::INFINITY };
    }

    let ax = x.abs();
    let u = e as i32 - F::BIAS;
    if u < F::I0_TINY_EXP {
        return F::ONE;
    }
    if u < F::CROSSOVER_EXP || (u == F::CROSSOVER_EXP && ax < F::CROSSOVER) {
        return i0_maclaurin(ax);
    }
    i0_asymptotic(ax, exp_ieee::<F>)
}

pub fn bessel_i0_portable<F: BesselData>(x: F) -> F {
    if x != x {
        return x + x;
    }
    let ax = if x < F::ZERO { -x } else { x };
    if ax > F::MAX {
        return F::INFINITY;
    }
    if ax < pow2_portable::<F>(F::I0_TINY_EXP) {
        return F::ONE;
    }
    if ax < F::CROSSOVER {
        return i0_maclaurin(ax);
    }
    i0_asymptotic(ax, exp_portable::<F>)
}

#[inline]
pub fn bessel_i0<F: BesselData>(x: F) -> F {
    if USE_PORTABLE {
        bessel_i0_portable(x)
    } else {
        bessel_i0_ieee(x)
    }
}

/// Kaiser-Bessel window of width `w` and shape `alpha`, centred on zero:
/// I0(π·alpha·sqrt(1 - (2x/w)²)) / I0(π·alpha) inside |x| < w/2, zero
/// outside.
pub fn kaiser_bessel<F: BesselData>(x: F, w: F, alpha: F) -> F {
    if x != x || w != w || alpha != alpha {
        return F::NAN;
    }
    let r = F::TWO * x / w;
    if w <= F::ZERO || r >= F::ONE || r <= -F::ONE {
        return F::ZERO;
    }
    let beta = F::PI * alpha;
    let arg = beta * sqrt(F::ONE - r * r);
    bessel_i0(arg) / bessel_i0(beta)
}
