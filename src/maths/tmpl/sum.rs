//! Error-free transforms: 2Sum, Fast2Sum, the Neumaier accumulator and the
//! exact product.
//!
//! These subtraction chains are only correct if every operation is rounded
//! exactly once, in the order written. Rust never contracts `a * b + c` into
//! an FMA and never reassociates float expressions, so plain code already
//! holds that guarantee on SSE2/NEON targets. Targets that compute in wider
//! registers (x87) can enable `fp-barrier`, which forces each intermediate
//! through `black_box` and therefore through a store of the declared width.

use super::{HAS_FMA, IeeeFloat};

#[inline(always)]
fn barrier<F: IeeeFloat>(x: F) -> F {
    if cfg!(feature = "fp-barrier") {
        core::hint::black_box(x)
    } else {
        x
    }
}

/// 2Sum: `s = fl(a + b)` and `e` with `a + b == s + e` exactly.
///
/// No ordering requirement on the operands. Overflow in `a + b` voids the
/// error term.
#[cfg_attr(feature = "outline-sums", inline(never))]
#[cfg_attr(not(feature = "outline-sums"), inline(always))]
pub fn two_sum<F: IeeeFloat>(a: F, b: F) -> (F, F) {
    let s = barrier(a + b);
    let a_virtual = barrier(s - b);
    let b_virtual = barrier(s - a_virtual);
    let a_round = barrier(a - a_virtual);
    let b_round = barrier(b - b_virtual);
    (s, a_round + b_round)
}

/// Fast2Sum: same contract as [`two_sum`] in three operations.
///
/// Requires `|a| >= |b|` (or `a == 0`). This is not checked; with the
/// operands swapped the returned error term is simply wrong.
#[cfg_attr(feature = "outline-sums", inline(never))]
#[cfg_attr(not(feature = "outline-sums"), inline(always))]
pub fn fast_two_sum<F: IeeeFloat>(a: F, b: F) -> (F, F) {
    let s = barrier(a + b);
    let z = barrier(s - a);
    (s, b - z)
}

/// One Neumaier step: fold `x` into the running pair `(sum, err)`.
///
/// Unlike Kahan's update this stays correct when `|x| > |sum|`.
#[cfg_attr(feature = "outline-sums", inline(never))]
#[cfg_attr(not(feature = "outline-sums"), inline(always))]
pub fn neumaier_two_sum<F: IeeeFloat>(x: F, sum: F, err: F) -> (F, F) {
    let t = barrier(sum + x);
    let lost = if sum.abs() >= x.abs() {
        barrier(sum - t) + x
    } else {
        barrier(x - t) + sum
    };
    (t, err + lost)
}

/// Veltkamp split of `a` into two halves of at most ceil(p/2) bits.
///
/// |a| must stay below `MAX / SPLITTER`.
#[inline(always)]
pub(crate) fn split<F: IeeeFloat>(a: F) -> (F, F) {
    let c = barrier(F::SPLITTER * a);
    let hi = barrier(c - (c - a));
    (hi, a - hi)
}

#[inline(always)]
pub(crate) fn two_prod_dekker<F: IeeeFloat>(a: F, b: F) -> (F, F) {
    let p = a * b;
    let (a_hi, a_lo) = split(a);
    let (b_hi, b_lo) = split(b);
    let e = ((a_hi * b_hi - p) + a_hi * b_lo + a_lo * b_hi) + a_lo * b_lo;
    (p, e)
}

/// Exact product: `p = fl(a * b)` and `e` with `a * b == p + e`.
///
/// Uses hardware FMA when available, Dekker's split otherwise. Exact as long
/// as `e` does not underflow.
#[cfg_attr(feature = "outline-sums", inline(never))]
#[cfg_attr(not(feature = "outline-sums"), inline(always))]
pub fn two_prod<F: IeeeFloat>(a: F, b: F) -> (F, F) {
    if HAS_FMA {
        let p = a * b;
        (p, a.fma_hw(b, -p))
    } else {
        two_prod_dekker(a, b)
    }
}

/// Running compensated sum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeumaierSum<F: IeeeFloat> {
    sum: F,
    err: F,
}

impl<F: IeeeFloat> NeumaierSum<F> {
    pub fn new() -> Self {
        Self {
            sum: F::ZERO,
            err: F::ZERO,
        }
    }

    #[inline]
    pub fn add(&mut self, x: F) {
        let (sum, err) = neumaier_two_sum(x, self.sum, self.err);
        self.sum = sum;
        self.err = err;
    }

    /// The uncorrected running sum.
    pub fn sum(&self) -> F {
        self.sum
    }

    /// The accumulated rounding error.
    pub fn error(&self) -> F {
        self.err
    }

    pub fn total(&self) -> F {
        self.sum + self.err
    }
}

impl<F: IeeeFloat> Default for NeumaierSum<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn compensated_sum<F: IeeeFloat>(values: &[F]) -> F {
    let mut acc = NeumaierSum::new();
    for &x in values {
        acc.add(x);
    }
    acc.total()
}
