//! asin(x) by exponent dispatch.
//!
//! * |x| < 2^TINY_EXP: x.
//! * |x| < 1/16: odd Maclaurin series.
//! * |x| < 1/2: x + x·R(x²), R a Remez rational.
//! * 1/2 <= |x| < 1: asin(x) = pi/2 - 2·asin(s), s = sqrt((1-|x|)/2), with
//!   pi/2 carried as hi+lo. Below NEAR_ONE, s is split into a short head f
//!   and the correction c = (z - f²)/(s + f) so the cancellation against
//!   pi/4 happens on exact terms.
//! * |x| == 1: ±pi/2. |x| > 1 or NaN: NaN.

use super::poly::{horner, rational};
use super::sum::split;
use super::{IeeeFloat, IeeeWord, USE_PORTABLE, pow2_portable, sqrt};

pub trait AsinData: IeeeFloat {
    const TINY_EXP: i32;
    /// Coefficients of x³, x⁵, ... in powers of x².
    const MACLAURIN: &'static [Self];
    /// R(z) = z·P(z)/Q(z).
    const REMEZ_P: &'static [Self];
    const REMEZ_Q: &'static [Self];
    /// From here up to 1 the split of s is not needed.
    const NEAR_ONE: Self;
    /// Mantissa bits cleared from s to form its head.
    const SPLIT_LOW_BITS: u32;
}

impl AsinData for f64 {
    const TINY_EXP: i32 = -26;
    const MACLAURIN: &'static [Self] = &[
        0.16666666666666666,
        0.075,
        0.044642857142857144,
        0.030381944444444444,
        0.022372159090909092,
        0.017352764423076924,
    ];
    const REMEZ_P: &'static [Self] = &[
        1.666_666_666_666_666_574_15e-01,
        -3.255_658_186_224_009_154_05e-01,
        2.012_125_321_348_629_258_81e-01,
        -4.005_553_450_067_941_140_27e-02,
        7.915_349_942_898_145_321_76e-04,
        3.479_331_075_960_211_675_70e-05,
    ];
    const REMEZ_Q: &'static [Self] = &[
        1.0,
        -2.403_394_911_734_414_218_78e+00,
        2.020_945_760_233_505_694_71e+00,
        -6.882_839_716_054_532_930_30e-01,
        7.703_815_055_590_193_527_91e-02,
    ];
    const NEAR_ONE: Self = f64::from_bits(0x3fef_3333_0000_0000);
    const SPLIT_LOW_BITS: u32 = 32;
}

impl AsinData for f32 {
    const TINY_EXP: i32 = -12;
    const MACLAURIN: &'static [Self] = &[0.16666667, 0.075];
    const REMEZ_P: &'static [Self] = &[
        1.666_666_716_3e-01,
        -3.255_658_149_7e-01,
        2.012_125_253_7e-01,
        -4.005_553_573_4e-02,
        7.915_350_142_9e-04,
        3.479_330_916_9e-05,
    ];
    const REMEZ_Q: &'static [Self] = &[
        1.0,
        -2.403_394_937_5e+00,
        2.020_945_787_4e+00,
        -6.882_839_798_9e-01,
        7.703_815_400_6e-02,
    ];
    const NEAR_ONE: Self = f32::from_bits(0x3f79_999a);
    const SPLIT_LOW_BITS: u32 = 12;
}

#[inline(always)]
fn remez<F: AsinData>(z: F) -> F {
    z * rational(z, F::REMEZ_P, F::REMEZ_Q)
}

#[inline(always)]
fn asin_maclaurin<F: AsinData>(x: F) -> F {
    let z = x * x;
    x + x * (z * horner(z, F::MACLAURIN))
}

#[inline(always)]
fn asin_unit<F: AsinData>(x: F) -> F {
    x * F::FRAC_PI_2_HI + x * F::FRAC_PI_2_LO
}

#[inline(always)]
fn asin_near_one<F: AsinData>(s: F, r: F) -> F {
    F::FRAC_PI_2_HI - (F::TWO * (s + s * r) - F::FRAC_PI_2_LO)
}

/// `f` is `s` with its low half cleared, so `f * f` is exact.
#[inline(always)]
fn asin_split<F: AsinData>(z: F, s: F, f: F, r: F) -> F {
    let c = (z - f * f) / (s + f);
    let pio4_hi = F::HALF * F::FRAC_PI_2_HI;
    pio4_hi - (F::TWO * s * r - (F::FRAC_PI_2_LO - F::TWO * c) - (pio4_hi - F::TWO * f))
}

pub fn asin_ieee<F: AsinData>(x: F) -> F {
    let w = IeeeWord::new(x);
    let e = w.exponent();
    if e == F::exp_field_max() {
        return if w.mantissa() != 0 { x + x } else { F::NAN };
    }

    let u = e as i32 - F::BIAS;
    if u >= 0 {
        if u == 0 && w.mantissa() == 0 {
            return asin_unit(x);
        }
        return F::NAN;
    }
    if u < F::TINY_EXP {
        return x;
    }
    if u < -4 {
        return asin_maclaurin(x);
    }
    if u < -1 {
        return x + x * remez(x * x);
    }

    let ax = x.abs();
    let z = (F::ONE - ax) * F::HALF;
    let s = sqrt(z);
    let r = remez(z);
    let y = if ax.to_word() >= F::NEAR_ONE.to_word() {
        asin_near_one(s, r)
    } else {
        let mut head = IeeeWord::new(s);
        head.set_mantissa(head.mantissa() & !((1u64 << F::SPLIT_LOW_BITS) - 1));
        asin_split(z, s, head.value(), r)
    };
    if w.sign() { -y } else { y }
}

pub fn asin_portable<F: AsinData>(x: F) -> F {
    if x != x {
        return x + x;
    }
    let negative = x < F::ZERO;
    let ax = if negative { -x } else { x };
    if ax > F::ONE {
        return F::NAN;
    }
    if ax == F::ONE {
        return asin_unit(x);
    }
    if ax < pow2_portable::<F>(F::TINY_EXP) {
        return x;
    }
    if ax < F::from_f64(0.0625) {
        return asin_maclaurin(x);
    }
    if ax < F::HALF {
        return x + x * remez(x * x);
    }

    let z = (F::ONE - ax) * F::HALF;
    let s = sqrt(z);
    let r = remez(z);
    let y = if ax >= F::NEAR_ONE {
        asin_near_one(s, r)
    } else {
        let (head, _) = split(s);
        asin_split(z, s, head, r)
    };
    if negative { -y } else { y }
}

#[inline]
pub fn asin<F: AsinData>(x: F) -> F {
    if USE_PORTABLE {
        asin_portable(x)
    } else {
        asin_ieee(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ulps(a: f64, b: f64) -> f64 {
        let ulp = (b.abs().next_up() - b.abs()).max(f64::from_bits(1));
        (a - b).abs() / ulp
    }

    #[test]
    fn every_band_matches_std() {
        let values: [f64; 18] = [
            1e-300, -1e-10, 2e-8, -0.01, 0.05, 0.0625, -0.1, 0.3, 0.49, 0.5, -0.6, 0.7,
            0.9, 0.97, -0.975, 0.99, 0.999999, -0.9999999999,
        ];
        for &x in &values {
            for got in [asin_ieee(x), asin_portable(x)] {
                let want = x.asin();
                assert!(ulps(got, want) <= 2.0, "asin({x}) = {got}, want {want}");
            }
        }
    }

    #[test]
    fn f32_matches_f64_reference() {
        let values = [1e-20f32, 1e-4, -0.03, 0.2, -0.45, 0.5, 0.75, -0.9, 0.975, 0.99999];
        for &x in &values {
            for got in [asin_ieee(x), asin_portable(x)] {
                let want = (x as f64).asin();
                let ulp = (want as f32).abs().next_up() as f64 - (want as f32).abs() as f64;
                assert!(
                    (got as f64 - want).abs() <= 3.0 * ulp,
                    "asinf({x}) = {got}, want {want}"
                );
            }
        }
    }

    #[test]
    fn domain_edges() {
        for f in [asin_ieee::<f64>, asin_portable::<f64>] {
            assert_eq!(f(1.0), core::f64::consts::FRAC_PI_2);
            assert_eq!(f(-1.0), -core::f64::consts::FRAC_PI_2);
            assert!(f(1.0000000000000002).is_nan());
            assert!(f(-2.0).is_nan());
            assert!(f(f64::INFINITY).is_nan());
            assert!(f(f64::NAN).is_nan());
            assert_eq!(f(-0.0).to_bits(), (-0.0f64).to_bits());
        }
        for f in [asin_ieee::<f32>, asin_portable::<f32>] {
            assert_eq!(f(1.0), core::f32::consts::FRAC_PI_2);
            assert_eq!(f(-1.0), -core::f32::consts::FRAC_PI_2);
            assert!(f(1.5).is_nan());
        }
    }

    #[test]
    fn heads_square_exactly() {
        let s = 0.6180339887498949f64;
        let mut head = IeeeWord::new(s);
        head.set_mantissa(head.mantissa() & !((1u64 << 32) - 1));
        let (g, _) = split(s);
        for f in [head.value(), g] {
            assert_eq!(super::super::two_prod(f, f).1, 0.0);
        }
    }
}
