//! Arbitrary-precision signed integers.
//!
//! A `BigInteger` owns its canonical digit string and delegates all digit
//! arithmetic to the process-wide calculator. Values are immutable; every
//! operation returns a fresh value.

use crate::random::{draw_exact, OsRandom, RandomSource};
use apnum_calc::error::RoundingCause;
use apnum_calc::{calculator, digits, Error, Result, RoundingMode};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};
use std::str::FromStr;

const BYTE_ALPHABET: [u8; 256] = {
    let mut a = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        a[i] = i as u8;
        i += 1;
    }
    a
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInteger {
    repr: String,
}

lazy_static! {
    static ref ZERO: BigInteger = BigInteger::from_canonical("0".to_string());
    static ref ONE: BigInteger = BigInteger::from_canonical("1".to_string());
    static ref TEN: BigInteger = BigInteger::from_canonical("10".to_string());
}

impl BigInteger {
    /// Parse `[+-]?digits`; leading zeros are stripped and `-0` normalizes
    /// to `0`.
    pub fn new(text: &str) -> Result<Self> {
        digits::canonicalize(text).map(Self::from_canonical)
    }

    /// Wrap a string already in canonical form (kernel output).
    pub(crate) fn from_canonical(repr: String) -> Self {
        Self { repr }
    }

    pub fn zero() -> Self {
        ZERO.clone()
    }

    pub fn one() -> Self {
        ONE.clone()
    }

    pub fn ten() -> Self {
        TEN.clone()
    }

    /// The canonical digit string.
    pub fn as_str(&self) -> &str {
        &self.repr
    }

    pub fn is_zero(&self) -> bool {
        self.repr == "0"
    }

    pub fn is_one(&self) -> bool {
        self.repr == "1"
    }

    pub fn is_negative(&self) -> bool {
        self.repr.starts_with('-')
    }

    pub fn is_positive(&self) -> bool {
        !self.is_negative() && !self.is_zero()
    }

    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    pub fn is_even(&self) -> bool {
        let last = self.repr.as_bytes()[self.repr.len() - 1];
        (last - b'0') % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    // ── Arithmetic ───────────────────────────────────────────────────────────

    pub fn plus(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().add(&self.repr, &other.repr))
    }

    pub fn minus(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().sub(&self.repr, &other.repr))
    }

    pub fn times(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().mul(&self.repr, &other.repr))
    }

    /// Division rounded to an integer under `mode`.
    pub fn divided_by(&self, other: &Self, mode: RoundingMode) -> Result<Self> {
        calculator()
            .div_round(&self.repr, &other.repr, mode)
            .map(Self::from_canonical)
    }

    /// Quotient truncated toward zero.
    pub fn quotient(&self, other: &Self) -> Result<Self> {
        calculator()
            .div_q(&self.repr, &other.repr)
            .map(Self::from_canonical)
    }

    /// Remainder carrying the dividend's sign.
    pub fn remainder(&self, other: &Self) -> Result<Self> {
        calculator()
            .div_r(&self.repr, &other.repr)
            .map(Self::from_canonical)
    }

    pub fn quotient_and_remainder(&self, other: &Self) -> Result<(Self, Self)> {
        calculator()
            .div_qr(&self.repr, &other.repr)
            .map(|(q, r)| (Self::from_canonical(q), Self::from_canonical(r)))
    }

    pub fn power(&self, exponent: u64) -> Self {
        Self::from_canonical(calculator().pow(&self.repr, exponent))
    }

    /// Euclidean remainder in `[0, modulus)`; the modulus must be positive.
    pub fn modulo(&self, modulus: &Self) -> Result<Self> {
        calculator()
            .modulo(&self.repr, &modulus.repr)
            .map(Self::from_canonical)
    }

    pub fn mod_pow(&self, exponent: &Self, modulus: &Self) -> Result<Self> {
        calculator()
            .mod_pow(&self.repr, &exponent.repr, &modulus.repr)
            .map(Self::from_canonical)
    }

    pub fn mod_inverse(&self, modulus: &Self) -> Result<Self> {
        calculator()
            .mod_inverse(&self.repr, &modulus.repr)
            .map(Self::from_canonical)
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().gcd(&self.repr, &other.repr))
    }

    pub fn lcm(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().lcm(&self.repr, &other.repr))
    }

    /// Square root under a rounding mode. `Down`/`Floor` give the floor,
    /// `Up`/`Ceiling` the ceiling; the `Half*` modes compare `2·remainder`
    /// against `2·root + 1`, which is odd and therefore never a tie.
    pub fn sqrt(&self, mode: RoundingMode) -> Result<Self> {
        if self.is_negative() {
            return Err(Error::NegativeNumber(self.repr.clone()));
        }
        let calc = calculator();
        let root = calc.sqrt(&self.repr)?;
        let rem = calc.sub(&self.repr, &calc.mul(&root, &root));
        if rem == "0" {
            return Ok(Self::from_canonical(root));
        }
        let rounded = match mode {
            RoundingMode::Unnecessary => {
                return Err(Error::RoundingNecessary(RoundingCause::InexactQuotient))
            }
            RoundingMode::Down | RoundingMode::Floor => root,
            RoundingMode::Up | RoundingMode::Ceiling => calc.add(&root, "1"),
            _ => {
                let double_rem = calc.add(&rem, &rem);
                let threshold = calc.add(&calc.add(&root, &root), "1");
                if calc.cmp(&double_rem, &threshold) == Ordering::Greater {
                    calc.add(&root, "1")
                } else {
                    root
                }
            }
        };
        Ok(Self::from_canonical(rounded))
    }

    pub fn negated(&self) -> Self {
        Self::from_canonical(calculator().neg(&self.repr))
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negated()
        } else {
            self.clone()
        }
    }

    pub fn compare_to(&self, other: &Self) -> Ordering {
        calculator().cmp(&self.repr, &other.repr)
    }

    // ── Bits ─────────────────────────────────────────────────────────────────

    pub fn and(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().bit_and(&self.repr, &other.repr))
    }

    pub fn or(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().bit_or(&self.repr, &other.repr))
    }

    pub fn xor(&self, other: &Self) -> Self {
        Self::from_canonical(calculator().bit_xor(&self.repr, &other.repr))
    }

    /// Two's-complement NOT: `-(self + 1)`.
    pub fn not(&self) -> Self {
        let calc = calculator();
        Self::from_canonical(calc.neg(&calc.add(&self.repr, "1")))
    }

    pub fn shifted_left(&self, bits: u64) -> Self {
        Self::from_canonical(calculator().mul(&self.repr, &calculator().pow("2", bits)))
    }

    /// Arithmetic right shift: floor division by `2^bits`, via truncation for
    /// non-negative values and away-from-zero rounding for negative ones.
    pub fn shifted_right(&self, bits: u64) -> Self {
        let calc = calculator();
        let divisor = calc.pow("2", bits);
        let mode = if self.is_negative() {
            RoundingMode::Up
        } else {
            RoundingMode::Down
        };
        let out = calc
            .div_round(&self.repr, &divisor, mode)
            .expect("power of two divisor, directed mode");
        Self::from_canonical(out)
    }

    /// Bits needed for the magnitude; negative values report the bit length
    /// of `|n| - 1`, and zero reports 0.
    pub fn bit_length(&self) -> u64 {
        let value = if self.is_negative() {
            self.abs().minus(&Self::one())
        } else {
            self.clone()
        };
        if value.is_zero() {
            return 0;
        }
        calculator()
            .to_base(&value.repr, 2)
            .expect("base 2 is in range")
            .len() as u64
    }

    /// Index of the lowest one bit, or `None` for zero. Two's complement
    /// preserves trailing zeros, so the magnitude answers for both signs.
    pub fn lowest_set_bit(&self) -> Option<u64> {
        if self.is_zero() {
            return None;
        }
        let bin = calculator()
            .to_base(self.abs().as_str(), 2)
            .expect("base 2 is in range");
        let trailing = bin.bytes().rev().take_while(|&b| b == b'0').count();
        Some(trailing as u64)
    }

    /// Bit `index` of the two's-complement form.
    pub fn is_bit_set(&self, index: u64) -> bool {
        if self.is_negative() {
            !self.abs().minus(&Self::one()).magnitude_bit(index)
        } else {
            self.magnitude_bit(index)
        }
    }

    fn magnitude_bit(&self, index: u64) -> bool {
        if self.is_zero() {
            return false;
        }
        let bin = calculator()
            .to_base(&self.repr, 2)
            .expect("base 2 is in range");
        let len = bin.len() as u64;
        index < len && bin.as_bytes()[(len - 1 - index) as usize] == b'1'
    }

    // ── Conversions ──────────────────────────────────────────────────────────

    pub fn to_i64(&self) -> Result<i64> {
        self.repr.parse().map_err(|_| Error::IntegerOverflow)
    }

    pub fn to_u64(&self) -> Result<u64> {
        self.repr.parse().map_err(|_| Error::IntegerOverflow)
    }

    pub fn to_i128(&self) -> Result<i128> {
        self.repr.parse().map_err(|_| Error::IntegerOverflow)
    }

    pub fn from_base(text: &str, base: u32) -> Result<Self> {
        calculator().from_base(text, base).map(Self::from_canonical)
    }

    pub fn to_base(&self, base: u32) -> Result<String> {
        calculator().to_base(&self.repr, base)
    }

    pub fn from_arbitrary_base(input: &[u8], alphabet: &[u8], base: u32) -> Result<Self> {
        calculator()
            .from_arbitrary_base(input, alphabet, base)
            .map(Self::from_canonical)
    }

    pub fn to_arbitrary_base(&self, alphabet: &[u8], base: u32) -> Result<Vec<u8>> {
        calculator().to_arbitrary_base(&self.repr, alphabet, base)
    }

    /// Big-endian bytes. The signed form is two's complement with a `00` or
    /// `FF` byte prepended only when the magnitude's top bit would otherwise
    /// flip the sign; the unsigned form rejects negatives.
    pub fn to_bytes(&self, signed: bool) -> Result<Vec<u8>> {
        if !signed && self.is_negative() {
            return Err(Error::NegativeNumber(self.repr.clone()));
        }
        if self.is_zero() {
            return Ok(vec![0]);
        }
        let mut bytes =
            calculator().to_arbitrary_base(self.abs().as_str(), &BYTE_ALPHABET, 256)?;
        if signed {
            if bytes[0] & 0x80 != 0 {
                bytes.insert(0, 0);
            }
            if self.is_negative() {
                twos_negate(&mut bytes);
            }
        }
        Ok(bytes)
    }

    /// Parse big-endian bytes; the signed form reads two's complement.
    pub fn from_bytes(bytes: &[u8], signed: bool) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidArgument("empty byte input".to_string()));
        }
        let calc = calculator();
        if signed && bytes[0] & 0x80 != 0 {
            let mut buf = bytes.to_vec();
            twos_negate(&mut buf);
            let mag = calc.from_arbitrary_base(&buf, &BYTE_ALPHABET, 256)?;
            Ok(Self::from_canonical(calc.neg(&mag)))
        } else {
            calc.from_arbitrary_base(bytes, &BYTE_ALPHABET, 256)
                .map(Self::from_canonical)
        }
    }

    // ── Randomness ───────────────────────────────────────────────────────────

    /// A uniform value in `[0, 2^bits)` from the default source.
    pub fn random_bits(bits: u64) -> Result<Self> {
        Self::random_bits_from(&mut OsRandom, bits)
    }

    pub fn random_bits_from(source: &mut dyn RandomSource, bits: u64) -> Result<Self> {
        if bits == 0 {
            return Ok(Self::zero());
        }
        let count = ((bits + 7) / 8) as usize;
        let mut bytes = draw_exact(source, count)?;
        let excess = (count as u64 * 8 - bits) as u32;
        if excess > 0 {
            bytes[0] &= 0xFF >> excess;
        }
        Self::from_bytes(&bytes, false)
    }

    /// A uniform value in `[min, max]` by rejection sampling.
    pub fn random_range(min: &Self, max: &Self) -> Result<Self> {
        Self::random_range_from(&mut OsRandom, min, max)
    }

    pub fn random_range_from(
        source: &mut dyn RandomSource,
        min: &Self,
        max: &Self,
    ) -> Result<Self> {
        if min.compare_to(max) == Ordering::Greater {
            return Err(Error::InvalidArgument(
                "min must not exceed max".to_string(),
            ));
        }
        let span = max.minus(min);
        let bits = span.bit_length();
        loop {
            let candidate = Self::random_bits_from(source, bits)?;
            if candidate.compare_to(&span) != Ordering::Greater {
                return Ok(min.plus(&candidate));
            }
        }
    }
}

fn twos_negate(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = !*b;
    }
    for b in buf.iter_mut().rev() {
        let (v, overflow) = b.overflowing_add(1);
        *b = v;
        if !overflow {
            break;
        }
    }
}

// ── Trait plumbing ───────────────────────────────────────────────────────────

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl FromStr for BigInteger {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Ord for BigInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl PartialOrd for BigInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! from_primitive {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInteger {
            fn from(value: $t) -> Self {
                Self::from_canonical(value.to_string())
            }
        }
    )*};
}

from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

macro_rules! binary_op {
    ($trait:ident, $method:ident, $delegate:ident) => {
        impl $trait for &BigInteger {
            type Output = BigInteger;
            fn $method(self, rhs: &BigInteger) -> BigInteger {
                self.$delegate(rhs)
            }
        }

        impl $trait for BigInteger {
            type Output = BigInteger;
            fn $method(self, rhs: BigInteger) -> BigInteger {
                (&self).$delegate(&rhs)
            }
        }
    };
}

binary_op!(Add, add, plus);
binary_op!(Sub, sub, minus);
binary_op!(Mul, mul, times);
binary_op!(BitAnd, bitand, and);
binary_op!(BitOr, bitor, or);
binary_op!(BitXor, bitxor, xor);

impl Neg for &BigInteger {
    type Output = BigInteger;
    fn neg(self) -> BigInteger {
        self.negated()
    }
}

impl Neg for BigInteger {
    type Output = BigInteger;
    fn neg(self) -> BigInteger {
        self.negated()
    }
}

impl Not for &BigInteger {
    type Output = BigInteger;
    fn not(self) -> BigInteger {
        BigInteger::not(self)
    }
}

impl Not for BigInteger {
    type Output = BigInteger;
    fn not(self) -> BigInteger {
        BigInteger::not(&self)
    }
}

impl Shl<u64> for &BigInteger {
    type Output = BigInteger;
    fn shl(self, bits: u64) -> BigInteger {
        self.shifted_left(bits)
    }
}

impl Shr<u64> for &BigInteger {
    type Output = BigInteger;
    fn shr(self, bits: u64) -> BigInteger {
        self.shifted_right(bits)
    }
}

impl Serialize for BigInteger {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.repr)
    }
}

impl<'de> Deserialize<'de> for BigInteger {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        BigInteger::new(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> BigInteger {
        BigInteger::new(s).unwrap()
    }

    #[test]
    fn construction_normalizes() {
        assert_eq!(int("007").to_string(), "7");
        assert_eq!(int("-0").to_string(), "0");
        assert_eq!(int("+15").to_string(), "15");
        assert!(BigInteger::new("1_2").is_err());
    }

    #[test]
    fn parity_and_sign() {
        assert!(int("0").is_even());
        assert!(int("-3").is_odd());
        assert_eq!(int("-3").signum(), -1);
        assert_eq!(int("0").signum(), 0);
        assert_eq!(int("3").abs(), int("3"));
        assert_eq!(int("-3").abs(), int("3"));
    }

    #[test]
    fn shifting() {
        assert_eq!(int("5").shifted_left(3), int("40"));
        assert_eq!(int("40").shifted_right(3), int("5"));
        assert_eq!(int("41").shifted_right(3), int("5"));
        assert_eq!(int("-41").shifted_right(3), int("-6"));
        assert_eq!(int("-1").shifted_right(10), int("-1"));
    }

    #[test]
    fn bit_queries() {
        assert_eq!(int("0").bit_length(), 0);
        assert_eq!(int("1").bit_length(), 1);
        assert_eq!(int("8").bit_length(), 4);
        assert_eq!(int("-1").bit_length(), 0);
        assert_eq!(int("-8").bit_length(), 3);
        assert_eq!(int("0").lowest_set_bit(), None);
        assert_eq!(int("12").lowest_set_bit(), Some(2));
        assert_eq!(int("-12").lowest_set_bit(), Some(2));
        assert!(int("5").is_bit_set(0));
        assert!(!int("5").is_bit_set(1));
        assert!(int("5").is_bit_set(2));
        assert!(!int("-2").is_bit_set(0));
        assert!(int("-2").is_bit_set(1));
        assert!(int("-2").is_bit_set(100));
    }

    #[test]
    fn not_is_twos_complement() {
        assert_eq!(int("0").not(), int("-1"));
        assert_eq!(int("-1").not(), int("0"));
        assert_eq!(int("5").not(), int("-6"));
    }

    #[test]
    fn byte_round_trip_signed() {
        let value = int("-128");
        assert_eq!(value.to_bytes(true).unwrap(), vec![0xFF, 0x80]);
        assert_eq!(
            BigInteger::from_bytes(&[0xFF, 0x80], true).unwrap(),
            value
        );
        assert_eq!(int("128").to_bytes(true).unwrap(), vec![0x00, 0x80]);
        assert_eq!(int("127").to_bytes(true).unwrap(), vec![0x7F]);
        assert_eq!(int("-1").to_bytes(true).unwrap(), vec![0xFF]);
        assert_eq!(int("0").to_bytes(true).unwrap(), vec![0x00]);
    }

    #[test]
    fn byte_round_trip_unsigned() {
        assert_eq!(int("255").to_bytes(false).unwrap(), vec![0xFF]);
        assert_eq!(int("256").to_bytes(false).unwrap(), vec![0x01, 0x00]);
        assert_eq!(
            BigInteger::from_bytes(&[0x01, 0x00], false).unwrap(),
            int("256")
        );
        assert!(int("-1").to_bytes(false).is_err());
        assert!(BigInteger::from_bytes(&[], false).is_err());
    }

    #[test]
    fn random_bits_masks_the_top_byte() {
        let mut fixed = crate::random::FnSource(|count: usize| -> Result<Vec<u8>> { Ok(vec![0xFF; count]) });
        let value = BigInteger::random_bits_from(&mut fixed, 10).unwrap();
        assert_eq!(value, int("1023"));
        let zero = BigInteger::random_bits_from(&mut fixed, 0).unwrap();
        assert_eq!(zero, BigInteger::zero());
    }

    #[test]
    fn random_range_honors_bounds() {
        let mut fixed = crate::random::FnSource(|count: usize| -> Result<Vec<u8>> { Ok(vec![0x00; count]) });
        let value =
            BigInteger::random_range_from(&mut fixed, &int("10"), &int("20")).unwrap();
        assert_eq!(value, int("10"));
        assert!(BigInteger::random_range_from(&mut fixed, &int("2"), &int("1")).is_err());
        let degenerate = BigInteger::random_range(&int("5"), &int("5")).unwrap();
        assert_eq!(degenerate, int("5"));
    }

    #[test]
    fn serde_string_form() {
        let value = int("-42");
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"-42\"");
        let back: BigInteger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn conversions_detect_overflow() {
        assert_eq!(int("42").to_i64().unwrap(), 42);
        assert_eq!(int("-1").to_u64().unwrap_err(), Error::IntegerOverflow);
        assert_eq!(
            int("99999999999999999999").to_i64().unwrap_err(),
            Error::IntegerOverflow
        );
    }
}
