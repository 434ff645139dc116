//! Long-double layouts.
//!
//! Rust has no `long double`, so the extended formats are modelled as word
//! types over their bit patterns: [`Binary80`] (x87 extended, explicit
//! integer bit) and [`Binary128`] (IEEE quadruple). Both expose their fields
//! through [`ExtendedWord`], convert exactly from `f64`, round to nearest
//! even back to `f64`, and implement `floor` and `mod_2` on the bits alone.
//! [`Binary80`] also reads and writes the 96-bit big-endian storage order.
//! The double-double layout is [`DoubleDouble<f64>`](super::DoubleDouble).
//!
//! Internally a value is `(sign, biased exponent, significand)` where the
//! significand carries the integer bit at position `FRAC_BITS`; subnormals
//! have exponent 0 and a clear integer bit.

use core::fmt::Debug;

/// Physical layouts a C `long double` takes across targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LongDoubleLayout {
    /// Same as `double`.
    Double64,
    /// x87 extended, little-endian, padded to 12 or 16 bytes.
    Extended80,
    /// x87-style extended stored big-endian in 12 bytes (m68k).
    Extended96BigEndian,
    /// IEEE binary128.
    Quadruple128,
    /// Pair of doubles, `hi + lo` (IBM powerpc).
    DoubleDouble128,
}

impl LongDoubleLayout {
    pub const fn precision_bits(self) -> u32 {
        match self {
            Self::Double64 => 53,
            Self::Extended80 | Self::Extended96BigEndian => 64,
            Self::Quadruple128 => 113,
            Self::DoubleDouble128 => 106,
        }
    }

    pub const fn exponent_bits(self) -> u32 {
        match self {
            Self::Double64 | Self::DoubleDouble128 => 11,
            _ => 15,
        }
    }

    pub const fn storage_bits(self) -> u32 {
        match self {
            Self::Double64 => 64,
            Self::Extended80 => 128,
            Self::Extended96BigEndian => 96,
            Self::Quadruple128 | Self::DoubleDouble128 => 128,
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub const NATIVE_LONG_DOUBLE: LongDoubleLayout = LongDoubleLayout::Extended80;

#[cfg(target_arch = "m68k")]
pub const NATIVE_LONG_DOUBLE: LongDoubleLayout = LongDoubleLayout::Extended96BigEndian;

#[cfg(any(
    all(target_arch = "aarch64", not(target_vendor = "apple"), not(target_os = "windows")),
    target_arch = "riscv64",
    target_arch = "s390x"
))]
pub const NATIVE_LONG_DOUBLE: LongDoubleLayout = LongDoubleLayout::Quadruple128;

#[cfg(target_arch = "powerpc64")]
pub const NATIVE_LONG_DOUBLE: LongDoubleLayout = LongDoubleLayout::DoubleDouble128;

#[cfg(not(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "m68k",
    all(target_arch = "aarch64", not(target_vendor = "apple"), not(target_os = "windows")),
    target_arch = "riscv64",
    target_arch = "s390x",
    target_arch = "powerpc64"
)))]
pub const NATIVE_LONG_DOUBLE: LongDoubleLayout = LongDoubleLayout::Double64;

const EXT_BIAS: i32 = 16383;
const EXT_EXP_MAX: u32 = 0x7fff;

pub trait ExtendedWord: Copy + PartialEq + Debug {
    const LAYOUT: LongDoubleLayout;
    /// Position of the integer bit in [`significand`](Self::significand).
    const FRAC_BITS: u32;
    const BIAS: i32 = EXT_BIAS;

    fn from_bits(bits: u128) -> Self;
    fn to_bits(self) -> u128;
    fn sign(self) -> bool;
    /// Biased exponent, 15 bits.
    fn exponent(self) -> u32;
    /// Significand with the integer bit made explicit.
    fn significand(self) -> u128;
    /// Packs a value; `significand` must carry its integer bit exactly when
    /// `exponent != 0`.
    fn from_parts(sign: bool, exponent: u32, significand: u128) -> Self;

    #[inline]
    fn is_nan(self) -> bool {
        self.exponent() == EXT_EXP_MAX && self.significand() != 1u128 << Self::FRAC_BITS
    }

    #[inline]
    fn is_infinite(self) -> bool {
        self.exponent() == EXT_EXP_MAX && self.significand() == 1u128 << Self::FRAC_BITS
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.exponent() == 0 && self.significand() == 0
    }

    #[inline]
    fn is_subnormal(self) -> bool {
        self.exponent() == 0 && self.significand() != 0
    }

    #[inline]
    fn neg(self) -> Self {
        Self::from_parts(!self.sign(), self.exponent(), self.significand())
    }

    /// Exact: every binary64 value is representable.
    fn from_f64(x: f64) -> Self {
        let bits = x.to_bits();
        let sign = (bits >> 63) != 0;
        let e = ((bits >> 52) & 0x7ff) as u32;
        let m = (bits & ((1u64 << 52) - 1)) as u128;
        let int_bit = 1u128 << Self::FRAC_BITS;
        let widen = Self::FRAC_BITS - 52;

        if e == 0x7ff {
            // NaN payloads keep their position below the quiet bit
            return Self::from_parts(sign, EXT_EXP_MAX, int_bit | (m << widen));
        }
        if e == 0 {
            if m == 0 {
                return Self::from_parts(sign, 0, 0);
            }
            let msb = 127 - m.leading_zeros();
            let exponent = (msb as i32 - 1074 + EXT_BIAS) as u32;
            return Self::from_parts(sign, exponent, m << (Self::FRAC_BITS - msb));
        }
        let exponent = (e as i32 - 1023 + EXT_BIAS) as u32;
        Self::from_parts(sign, exponent, ((1u128 << 52) | m) << widen)
    }

    /// Rounds to nearest, ties to even; overflows to infinity and rounds
    /// through the subnormal range.
    fn to_f64(self) -> f64 {
        let sign_bit = (self.sign() as u64) << 63;
        let e = self.exponent();
        let sig = self.significand();

        if e == EXT_EXP_MAX {
            if self.is_infinite() {
                return f64::from_bits(sign_bit | 0x7ff0_0000_0000_0000);
            }
            let payload = ((sig >> (Self::FRAC_BITS - 52)) as u64) & ((1u64 << 52) - 1);
            return f64::from_bits(sign_bit | 0x7ff8_0000_0000_0000 | payload);
        }
        if sig == 0 {
            return f64::from_bits(sign_bit);
        }

        // value = sig * 2^scale
        let scale = if e == 0 { 1 - EXT_BIAS } else { e as i32 - EXT_BIAS } - Self::FRAC_BITS as i32;
        let msb = 127 - sig.leading_zeros() as i32;
        let top = scale + msb;
        if top > 1023 {
            return f64::from_bits(sign_bit | 0x7ff0_0000_0000_0000);
        }

        let mut q = (top - 52).max(-1074);
        let shift = q - scale;
        let rounded = if shift <= 0 {
            sig << (-shift) as u32
        } else if shift > msb + 1 {
            0
        } else {
            let shift = shift as u32;
            let kept = sig >> shift;
            let rem = sig & ((1u128 << shift) - 1);
            let half = 1u128 << (shift - 1);
            if rem > half || (rem == half && kept & 1 == 1) {
                kept + 1
            } else {
                kept
            }
        };
        let mut m = rounded as u64;

        if m == 1u64 << 53 {
            m >>= 1;
            q += 1;
        }
        if m < 1u64 << 52 {
            return f64::from_bits(sign_bit | m);
        }
        let biased = q + 1075;
        if biased >= 0x7ff {
            return f64::from_bits(sign_bit | 0x7ff0_0000_0000_0000);
        }
        f64::from_bits(sign_bit | ((biased as u64) << 52) | (m & ((1u64 << 52) - 1)))
    }

    fn floor(self) -> Self {
        let e = self.exponent();
        if e == EXT_EXP_MAX || self.is_zero() {
            return self;
        }
        let j0 = e as i32 - EXT_BIAS;
        if j0 < 0 {
            return if self.sign() {
                Self::from_parts(true, EXT_BIAS as u32, 1u128 << Self::FRAC_BITS)
            } else {
                Self::from_parts(false, 0, 0)
            };
        }
        if j0 >= Self::FRAC_BITS as i32 {
            return self;
        }

        let unit = 1u128 << (Self::FRAC_BITS - j0 as u32);
        let frac = unit - 1;
        let sig = self.significand();
        if sig & frac == 0 {
            return self;
        }
        let mut sig = sig & !frac;
        let mut e = e;
        if self.sign() {
            sig += unit;
            if sig >> (Self::FRAC_BITS + 1) != 0 {
                sig >>= 1;
                e += 1;
            }
        }
        Self::from_parts(self.sign(), e, sig)
    }

    /// x - 2·trunc(x/2), exactly, with the sign of x.
    fn mod_2(self) -> Self {
        let e = self.exponent();
        if e == EXT_EXP_MAX {
            let nan = Self::from_parts(false, EXT_EXP_MAX, 3u128 << (Self::FRAC_BITS - 1));
            return if self.is_nan() { self } else { nan };
        }
        let u = e as i32 - EXT_BIAS;
        if u < 1 {
            return self;
        }
        let frac_bits = Self::FRAC_BITS as i32;
        let zero = Self::from_parts(self.sign(), 0, 0);
        if u > frac_bits {
            return zero;
        }
        let sig = self.significand();
        if u == frac_bits {
            return if sig & 1 == 1 {
                Self::from_parts(self.sign(), EXT_BIAS as u32, 1u128 << Self::FRAC_BITS)
            } else {
                zero
            };
        }

        // keep the bits weighing 1 and below
        let r = sig & ((1u128 << (frac_bits - u + 1)) - 1);
        if r == 0 {
            return zero;
        }
        let msb = 127 - r.leading_zeros() as i32;
        let exponent = (u - frac_bits + msb + EXT_BIAS) as u32;
        Self::from_parts(self.sign(), exponent, r << (frac_bits - msb) as u32)
    }
}

/// x87 extended precision: 1 sign bit, 15 exponent bits, 64 significand
/// bits with an explicit integer bit. Occupies the low 80 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binary80 {
    bits: u128,
}

impl Binary80 {
    const MASK: u128 = (1u128 << 80) - 1;

    /// Low 64 bits: the significand field.
    #[inline]
    pub fn mantissa(self) -> u64 {
        self.bits as u64
    }

    #[inline]
    pub fn mantissa_hi(self) -> u32 {
        (self.bits >> 32) as u32
    }

    #[inline]
    pub fn mantissa_lo(self) -> u32 {
        self.bits as u32
    }

    /// Sign and exponent live in the top 16 bits.
    #[inline]
    pub fn sign_exponent(self) -> u16 {
        (self.bits >> 64) as u16
    }

    /// Storage order of an x86 `long double`: ten bytes, little-endian.
    pub fn to_le_bytes(self) -> [u8; 10] {
        let mut out = [0u8; 10];
        out.copy_from_slice(&self.bits.to_le_bytes()[..10]);
        out
    }

    pub fn from_le_bytes(bytes: [u8; 10]) -> Self {
        let mut wide = [0u8; 16];
        wide[..10].copy_from_slice(&bytes);
        Self {
            bits: u128::from_le_bytes(wide),
        }
    }

    /// Storage order of the 96-bit big-endian layout: sign and exponent, two
    /// bytes of padding, then the significand.
    pub fn to_be_bytes(self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[..2].copy_from_slice(&self.sign_exponent().to_be_bytes());
        out[4..].copy_from_slice(&self.mantissa().to_be_bytes());
        out
    }

    /// Padding bytes are ignored.
    pub fn from_be_bytes(bytes: [u8; 12]) -> Self {
        let mut se = [0u8; 2];
        se.copy_from_slice(&bytes[..2]);
        let mut m = [0u8; 8];
        m.copy_from_slice(&bytes[4..]);
        Self {
            bits: ((u16::from_be_bytes(se) as u128) << 64) | u64::from_be_bytes(m) as u128,
        }
    }
}

impl ExtendedWord for Binary80 {
    const LAYOUT: LongDoubleLayout = LongDoubleLayout::Extended80;
    const FRAC_BITS: u32 = 63;

    #[inline]
    fn from_bits(bits: u128) -> Self {
        Self {
            bits: bits & Self::MASK,
        }
    }

    #[inline]
    fn to_bits(self) -> u128 {
        self.bits
    }

    #[inline]
    fn sign(self) -> bool {
        (self.bits >> 79) & 1 == 1
    }

    #[inline]
    fn exponent(self) -> u32 {
        ((self.bits >> 64) as u32) & EXT_EXP_MAX
    }

    #[inline]
    fn significand(self) -> u128 {
        self.bits & ((1u128 << 64) - 1)
    }

    /// Normal numbers with the integer bit clear (unnormals) read back as
    /// NaN through `is_nan`.
    fn is_nan(self) -> bool {
        let e = self.exponent();
        let int_bit = self.significand() >> 63 == 1;
        (e == EXT_EXP_MAX && self.significand() != 1u128 << 63) || (e != 0 && !int_bit)
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, significand: u128) -> Self {
        let bits = ((sign as u128) << 79)
            | (((exponent & EXT_EXP_MAX) as u128) << 64)
            | (significand & ((1u128 << 64) - 1));
        Self { bits }
    }
}

/// IEEE binary128: 1 sign bit, 15 exponent bits, 112 fraction bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binary128 {
    bits: u128,
}

impl Binary128 {
    const FRACTION_MASK: u128 = (1u128 << 112) - 1;

    /// Fraction field split into its top 48 and bottom 64 bits.
    #[inline]
    pub fn mantissa_parts(self) -> (u64, u64) {
        let f = self.bits & Self::FRACTION_MASK;
        ((f >> 64) as u64, f as u64)
    }
}

impl ExtendedWord for Binary128 {
    const LAYOUT: LongDoubleLayout = LongDoubleLayout::Quadruple128;
    const FRAC_BITS: u32 = 112;

    #[inline]
    fn from_bits(bits: u128) -> Self {
        Self { bits }
    }

    #[inline]
    fn to_bits(self) -> u128 {
        self.bits
    }

    #[inline]
    fn sign(self) -> bool {
        self.bits >> 127 == 1
    }

    #[inline]
    fn exponent(self) -> u32 {
        ((self.bits >> 112) as u32) & EXT_EXP_MAX
    }

    #[inline]
    fn significand(self) -> u128 {
        let f = self.bits & Self::FRACTION_MASK;
        if self.exponent() == 0 { f } else { f | (1u128 << 112) }
    }

    #[inline]
    fn from_parts(sign: bool, exponent: u32, significand: u128) -> Self {
        let bits = ((sign as u128) << 127)
            | (((exponent & EXT_EXP_MAX) as u128) << 112)
            | (significand & Self::FRACTION_MASK);
        Self { bits }
    }
}
