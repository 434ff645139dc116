//! Double-word arithmetic: an unevaluated sum `hi + lo` with
//! `|lo| <= ulp(hi) / 2`.
//!
//! The algorithms are those analysed by Joldes, Muller and Popescu, "Tight
//! and rigorous error bounds for basic building blocks of double-word
//! arithmetic" (ACM TOMS, 2017). Every constructor and operation hands back a
//! renormalised pair.

use core::ops::{Add, Mul, Neg, Sub};

use super::{IeeeFloat, fast_two_sum, floor_ieee, mod_2_ieee, two_prod, two_sum};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoubleDouble<F: IeeeFloat> {
    hi: F,
    lo: F,
}

impl<F: IeeeFloat> DoubleDouble<F> {
    /// Renormalises `hi + lo`; the parts may overlap.
    #[inline]
    pub fn new(hi: F, lo: F) -> Self {
        Self::from_sum(hi, lo)
    }

    #[inline]
    pub fn from_float(x: F) -> Self {
        Self { hi: x, lo: F::ZERO }
    }

    /// The exact sum of two floats.
    #[inline]
    pub fn from_sum(a: F, b: F) -> Self {
        let (hi, lo) = two_sum(a, b);
        Self { hi, lo }
    }

    /// The exact product of two floats.
    #[inline]
    pub fn from_product(a: F, b: F) -> Self {
        let (hi, lo) = two_prod(a, b);
        Self { hi, lo }
    }

    #[inline]
    pub fn hi(self) -> F {
        self.hi
    }

    #[inline]
    pub fn lo(self) -> F {
        self.lo
    }

    #[inline]
    pub fn to_float(self) -> F {
        self.hi + self.lo
    }

    /// AccurateDWPlusDW. Relative error below `3u^2 + 13u^3` for any signs.
    ///
    /// Both Fast2Sum steps rely on the magnitude gap proven in Theorem 3.1
    /// of the paper; do not reorder them.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        let (sum_hi, err_hi) = two_sum(self.hi, other.hi);
        let (sum_lo, err_lo) = two_sum(self.lo, other.lo);
        let corr_hi = err_hi + sum_lo;
        let (comp_hi, comp_lo) = fast_two_sum(sum_hi, corr_hi);
        let corr_lo = err_lo + comp_lo;
        let (hi, lo) = fast_two_sum(comp_hi, corr_lo);
        Self { hi, lo }
    }

    /// Dekker's add2.
    ///
    /// Only valid when both operands carry the same sign, or one strictly
    /// dominates the other; cancellation between opposite signs can lose all
    /// of the low word.
    #[inline]
    pub fn quick_add(self, other: Self) -> Self {
        let r = self.hi + other.hi;
        let s = if self.hi.abs() > other.hi.abs() {
            self.hi - r + other.hi + other.lo + self.lo
        } else {
            other.hi - r + self.hi + self.lo + other.lo
        };
        let (hi, lo) = fast_two_sum(r, s);
        Self { hi, lo }
    }

    #[inline]
    pub fn sub(self, other: Self) -> Self {
        self.add(other.neg())
    }

    #[inline]
    pub fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.hi < F::ZERO || (self.hi == F::ZERO && self.lo < F::ZERO) {
            self.neg()
        } else {
            self
        }
    }

    /// DWTimesDW1.
    #[inline]
    pub fn mul(self, other: Self) -> Self {
        let (ch, cl1) = two_prod(self.hi, other.hi);
        let tl = self.hi * other.lo;
        let cl2 = self.lo * other.hi + tl;
        let cl3 = cl1 + cl2;
        let (hi, lo) = fast_two_sum(ch, cl3);
        Self { hi, lo }
    }

    /// DWTimesFP3.
    #[inline]
    pub fn mul_float(self, y: F) -> Self {
        let (ch, cl1) = two_prod(self.hi, y);
        let cl3 = self.lo * y + cl1;
        let (hi, lo) = fast_two_sum(ch, cl3);
        Self { hi, lo }
    }

    /// DWDivFP2.
    #[inline]
    pub fn div_float(self, y: F) -> Self {
        let th = self.hi / y;
        let (pi_h, pi_l) = two_prod(th, y);
        let delta_h = self.hi - pi_h;
        let delta_t = delta_h - pi_l;
        let delta = delta_t + self.lo;
        let tl = delta / y;
        let (hi, lo) = fast_two_sum(th, tl);
        Self { hi, lo }
    }

    /// Largest integer not above `hi + lo`.
    ///
    /// A non-integral `hi` sits at least one ulp away from the next integer,
    /// which `lo` cannot bridge, so only an integral `hi` needs the low word.
    #[inline]
    pub fn floor(self) -> Self {
        let fh = floor_ieee(self.hi);
        if fh != self.hi {
            return Self::from_float(fh);
        }
        let (hi, lo) = fast_two_sum(fh, floor_ieee(self.lo));
        Self { hi, lo }
    }

    /// `hi + lo - 2·trunc((hi + lo)/2)`, carrying the sign of `hi + lo`.
    ///
    /// Each word reduces exactly on its own. Their residues sum to within one
    /// period of the result, so at most one shift by 2 follows.
    pub fn mod_2(self) -> Self {
        if self.hi == F::ZERO {
            return self;
        }
        let rh = mod_2_ieee(self.hi);
        if rh != rh {
            return Self::from_float(rh);
        }
        let (s, e) = two_sum(rh, mod_2_ieee(self.lo));
        if s == F::ZERO {
            return Self::from_float(F::ZERO.copysign(self.hi));
        }
        let shift = if self.hi > F::ZERO {
            if s < F::ZERO {
                F::TWO
            } else if s > F::TWO || (s == F::TWO && e >= F::ZERO) {
                -F::TWO
            } else {
                F::ZERO
            }
        } else if s > F::ZERO {
            -F::TWO
        } else if s < -F::TWO || (s == -F::TWO && e <= F::ZERO) {
            F::TWO
        } else {
            F::ZERO
        };
        if shift == F::ZERO {
            return Self { hi: s, lo: e };
        }
        let (t, f) = two_sum(s, shift);
        Self::new(t, f + e)
    }
}

impl<F: IeeeFloat> From<F> for DoubleDouble<F> {
    fn from(x: F) -> Self {
        Self::from_float(x)
    }
}

impl<F: IeeeFloat> Add for DoubleDouble<F> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        DoubleDouble::add(self, rhs)
    }
}

impl<F: IeeeFloat> Sub for DoubleDouble<F> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        DoubleDouble::sub(self, rhs)
    }
}

impl<F: IeeeFloat> Mul for DoubleDouble<F> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        DoubleDouble::mul(self, rhs)
    }
}

impl<F: IeeeFloat> Neg for DoubleDouble<F> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        DoubleDouble::neg(self)
    }
}
