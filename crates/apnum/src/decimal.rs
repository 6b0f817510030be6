//! Exact fixed-scale decimals.
//!
//! A `BigDecimal` is an unscaled [`BigInteger`] paired with a non-negative
//! scale; the value is `unscaled · 10^(-scale)`. The scale is part of the
//! structure: `1` and `1.0` compare equal numerically but are distinct
//! values, so equality here is structural and numeric ordering goes through
//! [`compare_to`](BigDecimal::compare_to).

use crate::integer::BigInteger;
use crate::parse;
use crate::rational::BigRational;
use apnum_calc::error::RoundingCause;
use apnum_calc::{calculator, scale, Error, Result, RoundingMode};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigDecimal {
    unscaled: BigInteger,
    scale: u32,
}

lazy_static! {
    static ref ZERO: BigDecimal = BigDecimal::new(BigInteger::zero(), 0);
    static ref ONE: BigDecimal = BigDecimal::new(BigInteger::one(), 0);
    static ref TEN: BigDecimal = BigDecimal::new(BigInteger::ten(), 0);
}

impl BigDecimal {
    pub fn new(unscaled: BigInteger, scale: u32) -> Self {
        Self { unscaled, scale }
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

    pub fn unscaled_value(&self) -> &BigInteger {
        &self.unscaled
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.unscaled.is_negative()
    }

    pub fn signum(&self) -> i32 {
        self.unscaled.signum()
    }

    /// Lift the unscaled value to a coarser scale by appending zeros.
    fn lifted(&self, target: u32) -> BigInteger {
        debug_assert!(target >= self.scale);
        let grown = scale::rescale(
            calculator(),
            self.unscaled.as_str(),
            self.scale,
            target,
            RoundingMode::Unnecessary,
        )
        .expect("growing a scale never rounds");
        BigInteger::from_canonical(grown)
    }

    fn aligned(&self, other: &Self) -> (BigInteger, BigInteger, u32) {
        let scale = self.scale.max(other.scale);
        (self.lifted(scale), other.lifted(scale), scale)
    }

    // ── Arithmetic ───────────────────────────────────────────────────────────

    /// Result scale is `max(self.scale, other.scale)`.
    pub fn plus(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a.plus(&b), scale)
    }

    /// Result scale is `max(self.scale, other.scale)`.
    pub fn minus(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a.minus(&b), scale)
    }

    /// Result scale is the sum of the operand scales.
    pub fn times(&self, other: &Self) -> Result<Self> {
        let scale = self
            .scale
            .checked_add(other.scale)
            .ok_or(Error::IntegerOverflow)?;
        Ok(Self::new(self.unscaled.times(&other.unscaled), scale))
    }

    /// Division at a caller-chosen result scale. A divisor of exactly one at
    /// the requested scale returns `self` unchanged.
    pub fn divided_by(&self, divisor: &Self, result_scale: u32, mode: RoundingMode) -> Result<Self> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if divisor.compare_to(&Self::one()) == Ordering::Equal && self.scale == result_scale {
            return Ok(self.clone());
        }
        let calc = calculator();
        // x/y · 10^t = ux · 10^(sy + t − sx) / uy
        let shift =
            i64::from(divisor.scale) + i64::from(result_scale) - i64::from(self.scale);
        let (num, den) = if shift >= 0 {
            let zeros = u32::try_from(shift).map_err(|_| Error::IntegerOverflow)?;
            (
                calc.mul(self.unscaled.as_str(), &scale::pow10(zeros)),
                divisor.unscaled.as_str().to_string(),
            )
        } else {
            let zeros = u32::try_from(-shift).map_err(|_| Error::IntegerOverflow)?;
            (
                self.unscaled.as_str().to_string(),
                calc.mul(divisor.unscaled.as_str(), &scale::pow10(zeros)),
            )
        };
        let unscaled = calc.div_round(&num, &den, mode)?;
        Ok(Self::new(BigInteger::from_canonical(unscaled), result_scale))
    }

    /// Exact division: succeeds iff the reduced denominator of `x/y` has no
    /// prime factor besides 2 and 5. The result carries the minimal scale,
    /// so no trailing zeros survive.
    pub fn divided_by_exact(&self, divisor: &Self) -> Result<Self> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let calc = calculator();
        let mut num = calc.mul(self.unscaled.as_str(), &scale::pow10(divisor.scale));
        let mut den = calc.mul(divisor.unscaled.as_str(), &scale::pow10(self.scale));
        let g = calc.gcd(&num, &den);
        num = calc.div_q(&num, &g)?;
        den = calc.div_q(&den, &g)?;
        if den.starts_with('-') {
            num = calc.neg(&num);
            den = calc.neg(&den);
        }
        let result_scale = scale::scale_for_denominator(calc, &den)?;
        let multiplier = calc.div_q(&scale::pow10(result_scale), &den)?;
        let unscaled = calc.mul(&num, &multiplier);
        Ok(Self::new(BigInteger::from_canonical(unscaled), result_scale))
    }

    /// Integer division of the values; result scale 0.
    pub fn quotient(&self, divisor: &Self) -> Result<Self> {
        let (a, b, _) = self.aligned(divisor);
        Ok(Self::new(a.quotient(&b)?, 0))
    }

    /// Division remainder; scale `max(self.scale, divisor.scale)`, sign of
    /// the dividend.
    pub fn remainder(&self, divisor: &Self) -> Result<Self> {
        let (a, b, scale) = self.aligned(divisor);
        Ok(Self::new(a.remainder(&b)?, scale))
    }

    /// Square root at the requested scale. The intermediate root carries one
    /// extra digit; when it is inexact the true root is irrational, so the
    /// `Half*` modes can never land on a tie and collapse to half-up.
    pub fn sqrt(&self, result_scale: u32, mode: RoundingMode) -> Result<Self> {
        if self.is_negative() {
            return Err(Error::NegativeNumber(self.to_string()));
        }
        if self.is_zero() {
            return Ok(Self::new(BigInteger::zero(), result_scale));
        }
        let calc = calculator();
        let working = (u64::from(result_scale) + 1).max((u64::from(self.scale) + 1) / 2);
        let exponent = 2 * working - u64::from(self.scale);
        let working = u32::try_from(working).map_err(|_| Error::IntegerOverflow)?;
        let exponent = u32::try_from(exponent).map_err(|_| Error::IntegerOverflow)?;
        let lifted = calc.mul(self.unscaled.as_str(), &scale::pow10(exponent));
        let root = calc.sqrt(&lifted)?;
        let rem = calc.sub(&lifted, &calc.mul(&root, &root));
        if rem == "0" {
            let adjusted = scale::rescale(calc, &root, working, result_scale, mode)?;
            return Ok(Self::new(BigInteger::from_canonical(adjusted), result_scale));
        }
        let divisor = scale::pow10(working - result_scale);
        let (q, tail) = calc.div_qr(&root, &divisor)?;
        let unscaled = match mode {
            RoundingMode::Unnecessary => {
                return Err(Error::RoundingNecessary(RoundingCause::InexactQuotient))
            }
            RoundingMode::Down | RoundingMode::Floor => q,
            RoundingMode::Up | RoundingMode::Ceiling => calc.add(&q, "1"),
            _ => {
                let double_tail = calc.add(&tail, &tail);
                if calc.cmp(&double_tail, &divisor) != Ordering::Less {
                    calc.add(&q, "1")
                } else {
                    q
                }
            }
        };
        Ok(Self::new(BigInteger::from_canonical(unscaled), result_scale))
    }

    pub fn negated(&self) -> Self {
        Self::new(self.unscaled.negated(), self.scale)
    }

    pub fn abs(&self) -> Self {
        Self::new(self.unscaled.abs(), self.scale)
    }

    // ── Rescaling ────────────────────────────────────────────────────────────

    /// Re-express at another scale under `mode`.
    pub fn to_scale(&self, target: u32, mode: RoundingMode) -> Result<Self> {
        if target == self.scale {
            return Ok(self.clone());
        }
        let adjusted = scale::rescale(
            calculator(),
            self.unscaled.as_str(),
            self.scale,
            target,
            mode,
        )?;
        Ok(Self::new(BigInteger::from_canonical(adjusted), target))
    }

    pub fn with_point_moved_left(&self, places: i64) -> Result<Self> {
        let target = i64::from(self.scale)
            .checked_add(places)
            .ok_or(Error::IntegerOverflow)?;
        self.with_raw_scale(target)
    }

    pub fn with_point_moved_right(&self, places: i64) -> Result<Self> {
        let target = i64::from(self.scale)
            .checked_sub(places)
            .ok_or(Error::IntegerOverflow)?;
        self.with_raw_scale(target)
    }

    /// A negative stored scale normalizes by appending zeros and settling at
    /// scale 0.
    fn with_raw_scale(&self, target: i64) -> Result<Self> {
        if target >= 0 {
            let scale = u32::try_from(target).map_err(|_| Error::IntegerOverflow)?;
            return Ok(Self::new(self.unscaled.clone(), scale));
        }
        let zeros = u32::try_from(-target).map_err(|_| Error::IntegerOverflow)?;
        let grown = scale::rescale(
            calculator(),
            self.unscaled.as_str(),
            0,
            zeros,
            RoundingMode::Unnecessary,
        )
        .expect("growing a scale never rounds");
        Ok(Self::new(BigInteger::from_canonical(grown), 0))
    }

    /// Drop trailing zero digits from the unscaled value, reducing the scale
    /// accordingly, never below zero.
    pub fn stripped_of_trailing_zeros(&self) -> Self {
        if self.scale == 0 {
            return self.clone();
        }
        let repr = self.unscaled.as_str();
        if repr == "0" {
            return Self::new(BigInteger::zero(), 0);
        }
        let trailing = repr.bytes().rev().take_while(|&b| b == b'0').count() as u32;
        let drop = trailing.min(self.scale);
        if drop == 0 {
            return self.clone();
        }
        let kept = &repr[..repr.len() - drop as usize];
        Self::new(
            BigInteger::from_canonical(kept.to_string()),
            self.scale - drop,
        )
    }

    // ── Conversions ──────────────────────────────────────────────────────────

    /// Succeeds iff the fractional part is zero.
    pub fn to_big_integer(&self) -> Result<BigInteger> {
        scale::try_rescale_exact(calculator(), self.unscaled.as_str(), self.scale, 0)
            .map(BigInteger::from_canonical)
            .ok_or(Error::RoundingNecessary(RoundingCause::ScaleTooSmall))
    }

    pub fn to_big_rational(&self) -> BigRational {
        BigRational::from(self)
    }

    /// Numeric comparison: both operands lifted to the larger scale.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.compare_to(&b)
    }
}

// ── Trait plumbing ───────────────────────────────────────────────────────────

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return f.write_str(self.unscaled.as_str());
        }
        let padded = scale::pad_unscaled(self.unscaled.as_str(), self.scale);
        let (sign, mag) = match padded.strip_prefix('-') {
            Some(mag) => ("-", mag),
            None => ("", padded.as_str()),
        };
        let point = mag.len() - self.scale as usize;
        write!(f, "{sign}{}.{}", &mag[..point], &mag[point..])
    }
}

impl FromStr for BigDecimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (unscaled, scale) = parse::decimal_literal(s)?;
        Ok(Self::new(BigInteger::from_canonical(unscaled), scale))
    }
}

impl From<BigInteger> for BigDecimal {
    fn from(value: BigInteger) -> Self {
        Self::new(value, 0)
    }
}

macro_rules! from_primitive {
    ($($t:ty),*) => {$(
        impl From<$t> for BigDecimal {
            fn from(value: $t) -> Self {
                Self::new(BigInteger::from(value), 0)
            }
        }
    )*};
}

from_primitive!(i32, i64, u32, u64);

impl Add for &BigDecimal {
    type Output = BigDecimal;
    fn add(self, rhs: &BigDecimal) -> BigDecimal {
        self.plus(rhs)
    }
}

impl Sub for &BigDecimal {
    type Output = BigDecimal;
    fn sub(self, rhs: &BigDecimal) -> BigDecimal {
        self.minus(rhs)
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;
    fn neg(self) -> BigDecimal {
        self.negated()
    }
}

impl Serialize for BigDecimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BigDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
