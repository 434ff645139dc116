//! Euclidean norms in two and three dimensions.
//!
//! Three squares of magnitude below 2^(2u+2) sum safely while
//! u <= (BIAS-3)/2 (510 for f64, 62 for f32). Above that every component is
//! scaled by 2^-(H+2) with H = (BIAS+1)/2; below -(H-1) by 2^(H+2), or by
//! 2^(MANT+H+2) when even the largest component is subnormal.

use super::{IeeeFloat, IeeeWord, USE_PORTABLE, pow2_portable, scalbn, scale_portable, sqrt};

#[inline(always)]
fn half_range<F: IeeeFloat>() -> i32 {
    (F::BIAS + 1) / 2
}

#[inline(always)]
fn sum_squares<F: IeeeFloat, const N: usize>(v: &[F; N]) -> F {
    let mut acc = F::ZERO;
    for &c in v {
        acc = acc + c * c;
    }
    acc
}

fn norm_ieee<F: IeeeFloat, const N: usize>(mut v: [F; N]) -> F {
    let mut has_nan = false;
    let mut emax = 0u32;
    for c in &mut v {
        let w = IeeeWord::new(*c);
        if w.is_infinite() {
            return F::INFINITY;
        }
        has_nan |= w.is_nan();
        emax = emax.max(w.exponent());
        *c = c.abs();
    }
    if has_nan {
        return F::NAN;
    }

    let h = half_range::<F>();
    let u = emax as i32 - F::BIAS;
    let scale = if u >= h - 1 {
        -(h + 2)
    } else if emax == 0 {
        F::MANT_BITS as i32 + h + 2
    } else if u < -(h - 1) {
        h + 2
    } else {
        0
    };
    if scale == 0 {
        return sqrt(sum_squares(&v));
    }

    for c in &mut v {
        *c = scalbn(*c, scale);
    }
    scalbn(sqrt(sum_squares(&v)), -scale)
}

fn norm_portable<F: IeeeFloat, const N: usize>(mut v: [F; N]) -> F {
    let mut has_nan = false;
    let mut amax = F::ZERO;
    for c in &mut v {
        let a = if *c < F::ZERO { -*c } else { *c };
        if a > F::MAX {
            return F::INFINITY;
        }
        has_nan |= a != a;
        if a > amax {
            amax = a;
        }
        *c = a;
    }
    if has_nan {
        return F::NAN;
    }

    let h = half_range::<F>();
    let scale = if amax >= pow2_portable::<F>(h - 1) {
        -(h + 2)
    } else if amax < F::MIN_POSITIVE {
        F::MANT_BITS as i32 + h + 2
    } else if amax < pow2_portable::<F>(-(h - 1)) {
        h + 2
    } else {
        0
    };
    if scale == 0 {
        return sqrt(sum_squares(&v));
    }

    for c in &mut v {
        *c = scale_portable(*c, scale);
    }
    scale_portable(sqrt(sum_squares(&v)), -scale)
}

#[inline]
pub fn hypot_ieee<F: IeeeFloat>(x: F, y: F) -> F {
    norm_ieee([x, y])
}

#[inline]
pub fn hypot_portable<F: IeeeFloat>(x: F, y: F) -> F {
    norm_portable([x, y])
}

#[inline]
pub fn hypot<F: IeeeFloat>(x: F, y: F) -> F {
    if USE_PORTABLE {
        hypot_portable(x, y)
    } else {
        hypot_ieee(x, y)
    }
}

#[inline]
pub fn hypot3_ieee<F: IeeeFloat>(x: F, y: F, z: F) -> F {
    norm_ieee([x, y, z])
}

#[inline]
pub fn hypot3_portable<F: IeeeFloat>(x: F, y: F, z: F) -> F {
    norm_portable([x, y, z])
}

#[inline]
pub fn hypot3<F: IeeeFloat>(x: F, y: F, z: F) -> F {
    if USE_PORTABLE {
        hypot3_portable(x, y, z)
    } else {
        hypot3_ieee(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h3(x: f64, y: f64, z: f64) -> [f64; 2] {
        [hypot3_ieee(x, y, z), hypot3_portable(x, y, z)]
    }

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() <= 2.0 * f64::EPSILON
    }

    #[test]
    fn pythagorean_triples_are_exact() {
        assert_eq!(h3(3.0, 4.0, 0.0), [5.0, 5.0]);
        assert_eq!(h3(-2.0, 3.0, 6.0), [7.0, 7.0]);
        assert_eq!(hypot_ieee(5.0f32, -12.0), 13.0);
        assert_eq!(hypot_portable(8.0f64, 15.0), 17.0);
        assert_eq!(hypot3_ieee(1.0f32, 4.0, 8.0), 9.0);
    }

    #[test]
    fn large_components_do_not_overflow() {
        for r in h3(1e200, 1e200, 1e200) {
            assert!(close(r, 1.7320508075688772e200), "{r}");
        }
        for r in h3(f64::MAX, 0.0, 0.0) {
            assert_eq!(r, f64::MAX);
        }
        for r in [hypot_ieee(f64::MAX, f64::MAX), hypot_portable(f64::MAX, f64::MAX)] {
            assert_eq!(r, f64::INFINITY);
        }
        for r in [hypot3_ieee(3e30f32, 4e30, 0.0), hypot3_portable(3e30f32, 4e30, 0.0)] {
            assert!(((r - 5e30) / 5e30).abs() < 2.0 * f32::EPSILON, "{r}");
        }
    }

    #[test]
    fn tiny_components_keep_precision() {
        for r in h3(3e-200, 4e-200, 0.0) {
            assert!(close(r, 5e-200), "{r}");
        }
        let d = f64::from_bits(1);
        for r in h3(3.0 * d, 4.0 * d, 0.0) {
            assert_eq!(r, 5.0 * d);
        }
        for r in [hypot3_ieee(3e-40f32, 4e-40, 0.0), hypot3_portable(3e-40f32, 4e-40, 0.0)] {
            assert!(((r - 5e-40) / 5e-40).abs() < 1e-4, "{r}");
        }
    }

    #[test]
    fn specials() {
        assert_eq!(h3(f64::INFINITY, f64::NAN, 1.0), [f64::INFINITY; 2]);
        assert_eq!(h3(1.0, f64::NEG_INFINITY, 0.0), [f64::INFINITY; 2]);
        for r in h3(f64::NAN, 1.0, 2.0) {
            assert!(r.is_nan());
        }
        assert_eq!(h3(0.0, -0.0, 0.0), [0.0, 0.0]);
    }
}
