//! IEEE-754 word views for binary32 and binary64.
//!
//! `IeeeFloat` carries the layout constants of a binary interchange format so
//! that the dispatch routines can be written once and instantiated for `f32`
//! and `f64`. Bit patterns are always handled widened to `u64`; the `f32`
//! pattern simply occupies the low 32 bits.
//!
//! `IeeeWord` is the field view. It owns the bit pattern, so reading a field
//! and rewriting the value are the same storage: `set_exponent` followed by
//! `value` yields the modified float, and `new(x).value()` reproduces `x`
//! bit for bit, NaN payloads included.

use core::fmt::Debug;
use core::marker::PhantomData;
use core::ops::{Add, Div, Mul, Neg, Sub};

pub trait IeeeFloat:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Storage width in bits.
    const BITS: u32;
    /// Explicitly stored fraction bits (the implicit leading one excluded).
    const MANT_BITS: u32;
    const EXP_BITS: u32;
    const BIAS: i32;
    /// Width of the low mantissa subfield exposed by `IeeeWord::mantissa_lo`.
    const MANT_LO_BITS: u32;

    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const INFINITY: Self;
    const NAN: Self;
    const MAX: Self;
    const MIN_POSITIVE: Self;
    /// 2^MANT_BITS; adding and subtracting it rounds |x| < 2^MANT_BITS to an integer.
    const TO_INT: Self;
    /// Dekker splitter 2^ceil((MANT_BITS + 1) / 2) + 1.
    const SPLITTER: Self;

    const PI: Self;
    const FRAC_PI_2_HI: Self;
    const FRAC_PI_2_LO: Self;

    fn to_word(self) -> u64;
    fn from_word(w: u64) -> Self;

    fn from_f64(x: f64) -> Self;
    /// Truncating conversion; only called on values already known to fit.
    fn to_i32(self) -> i32;

    /// Fused multiply-add in hardware. Callers gate on `HAS_FMA`.
    fn fma_hw(self, b: Self, c: Self) -> Self;
    /// Square root, hardware where the target guarantees it.
    fn sqrt_native(self) -> Self;

    #[inline(always)]
    fn sign_mask() -> u64 {
        1u64 << (Self::BITS - 1)
    }
    #[inline(always)]
    fn exp_field_max() -> u32 {
        (1u32 << Self::EXP_BITS) - 1
    }
    #[inline(always)]
    fn exp_mask() -> u64 {
        (Self::exp_field_max() as u64) << Self::MANT_BITS
    }
    #[inline(always)]
    fn mant_mask() -> u64 {
        (1u64 << Self::MANT_BITS) - 1
    }
    #[inline(always)]
    fn abs_mask() -> u64 {
        Self::sign_mask() - 1
    }

    #[inline(always)]
    fn exponent_field(self) -> u32 {
        ((self.to_word() >> Self::MANT_BITS) as u32) & Self::exp_field_max()
    }
    #[inline(always)]
    fn sign_bit(self) -> bool {
        (self.to_word() & Self::sign_mask()) != 0
    }
    #[inline(always)]
    fn is_nan_bits(self) -> bool {
        (self.to_word() & Self::abs_mask()) > Self::exp_mask()
    }
    #[inline(always)]
    fn is_inf_bits(self) -> bool {
        (self.to_word() & Self::abs_mask()) == Self::exp_mask()
    }
    #[inline(always)]
    fn abs(self) -> Self {
        Self::from_word(self.to_word() & Self::abs_mask())
    }
    #[inline(always)]
    fn copysign(self, sign: Self) -> Self {
        Self::from_word(
            (self.to_word() & Self::abs_mask()) | (sign.to_word() & Self::sign_mask()),
        )
    }
    /// 2^n for n in the normal exponent range, written straight into the field.
    #[inline(always)]
    fn exp2i(n: i32) -> Self {
        Self::from_word(((n + Self::BIAS) as u64) << Self::MANT_BITS)
    }
}

macro_rules! impl_ieee_float {
    (
        $t:ty, $bits:ty, $mant:expr, $exp:expr, $lo:expr, $splitter:expr,
        pi: $pi:expr, pio2_hi: $pio2_hi:expr, pio2_lo: $pio2_lo:expr,
        fma: $fma:path, sqrt: $sqrt:path
    ) => {
        impl IeeeFloat for $t {
            const BITS: u32 = <$bits>::BITS;
            const MANT_BITS: u32 = $mant;
            const EXP_BITS: u32 = $exp;
            const BIAS: i32 = (1 << ($exp - 1)) - 1;
            const MANT_LO_BITS: u32 = $lo;

            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const INFINITY: Self = <$t>::INFINITY;
            const NAN: Self = <$t>::NAN;
            const MAX: Self = <$t>::MAX;
            const MIN_POSITIVE: Self = <$t>::MIN_POSITIVE;
            const TO_INT: Self = (1u64 << $mant) as $t;
            const SPLITTER: Self = $splitter;

            const PI: Self = $pi;
            const FRAC_PI_2_HI: Self = $pio2_hi;
            const FRAC_PI_2_LO: Self = $pio2_lo;

            #[inline(always)]
            fn to_word(self) -> u64 {
                self.to_bits() as u64
            }
            #[inline(always)]
            fn from_word(w: u64) -> Self {
                <$t>::from_bits(w as $bits)
            }
            #[inline(always)]
            fn from_f64(x: f64) -> Self {
                x as $t
            }
            #[inline(always)]
            fn to_i32(self) -> i32 {
                self as i32
            }
            #[inline(always)]
            fn fma_hw(self, b: Self, c: Self) -> Self {
                // Safety: only reached when HAS_FMA holds for this target.
                unsafe { $fma(self, b, c) }
            }
            #[inline(always)]
            fn sqrt_native(self) -> Self {
                $sqrt(self)
            }
        }
    };
}

impl_ieee_float!(
    f32, u32, 23, 8, 16, 4097.0,
    pi: core::f32::consts::PI,
    pio2_hi: f32::from_bits(0x3fc9_0fda),
    pio2_lo: f32::from_bits(0x33a2_2169),
    fma: super::arch::fma_hw_f32, sqrt: super::sqrt::sqrt_f32_native
);

impl_ieee_float!(
    f64, u64, 52, 11, 32, 134_217_729.0,
    pi: core::f64::consts::PI,
    pio2_hi: f64::from_bits(0x3ff9_21fb_5444_2d18),
    pio2_lo: f64::from_bits(0x3c91_a626_3314_5c07),
    fma: super::arch::fma_hw_f64, sqrt: super::sqrt::sqrt_f64_native
);

/// Field view of one binary32/binary64 value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct IeeeWord<F: IeeeFloat> {
    bits: u64,
    _float: PhantomData<F>,
}

impl<F: IeeeFloat> IeeeWord<F> {
    #[inline(always)]
    pub fn new(x: F) -> Self {
        Self {
            bits: x.to_word(),
            _float: PhantomData,
        }
    }

    #[inline(always)]
    pub fn from_bits(bits: u64) -> Self {
        let width_mask = if F::BITS == 64 {
            u64::MAX
        } else {
            (1u64 << F::BITS) - 1
        };
        Self {
            bits: bits & width_mask,
            _float: PhantomData,
        }
    }

    #[inline(always)]
    pub fn value(self) -> F {
        F::from_word(self.bits)
    }

    #[inline(always)]
    pub fn bits(self) -> u64 {
        self.bits
    }

    #[inline(always)]
    pub fn sign(self) -> bool {
        (self.bits & F::sign_mask()) != 0
    }

    /// Biased exponent field.
    #[inline(always)]
    pub fn exponent(self) -> u32 {
        ((self.bits >> F::MANT_BITS) as u32) & F::exp_field_max()
    }

    /// Exponent with the bias removed; subnormals report `1 - BIAS`.
    #[inline(always)]
    pub fn unbiased_exponent(self) -> i32 {
        let e = self.exponent();
        if e == 0 {
            1 - F::BIAS
        } else {
            e as i32 - F::BIAS
        }
    }

    #[inline(always)]
    pub fn mantissa(self) -> u64 {
        self.bits & F::mant_mask()
    }

    #[inline(always)]
    pub fn mantissa_hi(self) -> u32 {
        (self.mantissa() >> F::MANT_LO_BITS) as u32
    }

    #[inline(always)]
    pub fn mantissa_lo(self) -> u32 {
        (self.mantissa() & ((1u64 << F::MANT_LO_BITS) - 1)) as u32
    }

    #[inline(always)]
    pub fn set_sign(&mut self, negative: bool) {
        if negative {
            self.bits |= F::sign_mask();
        } else {
            self.bits &= !F::sign_mask();
        }
    }

    #[inline(always)]
    pub fn set_exponent(&mut self, e: u32) {
        let e = (e & F::exp_field_max()) as u64;
        self.bits = (self.bits & !F::exp_mask()) | (e << F::MANT_BITS);
    }

    #[inline(always)]
    pub fn set_mantissa(&mut self, m: u64) {
        self.bits = (self.bits & !F::mant_mask()) | (m & F::mant_mask());
    }

    #[inline(always)]
    pub fn set_mantissa_parts(&mut self, hi: u32, lo: u32) {
        let lo_mask = (1u64 << F::MANT_LO_BITS) - 1;
        self.set_mantissa(((hi as u64) << F::MANT_LO_BITS) | (lo as u64 & lo_mask));
    }

    #[inline(always)]
    pub fn is_nan(self) -> bool {
        self.exponent() == F::exp_field_max() && self.mantissa() != 0
    }

    #[inline(always)]
    pub fn is_infinite(self) -> bool {
        self.exponent() == F::exp_field_max() && self.mantissa() == 0
    }

    #[inline(always)]
    pub fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.mantissa() != 0
    }
}
