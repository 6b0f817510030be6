//! Exact rationals.
//!
//! A `BigRational` keeps a positive denominator and the sign on the
//! numerator. Reduction is deferred: arithmetic returns unreduced fractions
//! with the `simplified` flag unset, and observers that need the reduced
//! form ([`simplify`](BigRational::simplify), [`to_big_decimal`]
//! (BigRational::to_big_decimal), hashing) pay the GCD when asked. Equality
//! and ordering cross-multiply, so they are exact either way.

use crate::decimal::BigDecimal;
use crate::integer::BigInteger;
use crate::parse;
use apnum_calc::{calculator, scale, Error, Result, RoundingMode};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct BigRational {
    numerator: BigInteger,
    denominator: BigInteger,
    simplified: bool,
}

lazy_static! {
    static ref ZERO: BigRational = BigRational::from(BigInteger::zero());
    static ref ONE: BigRational = BigRational::from(BigInteger::one());
    static ref TEN: BigRational = BigRational::from(BigInteger::ten());
}

impl BigRational {
    /// Build `numerator / denominator`; the sign settles on the numerator
    /// and a zero numerator collapses to `0/1`.
    pub fn new(numerator: BigInteger, denominator: BigInteger) -> Result<Self> {
        if denominator.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::make(numerator, denominator))
    }

    /// Normalize sign and zero; the denominator must not be zero.
    fn make(numerator: BigInteger, denominator: BigInteger) -> Self {
        debug_assert!(!denominator.is_zero());
        let (numerator, denominator) = if denominator.is_negative() {
            (numerator.negated(), denominator.negated())
        } else {
            (numerator, denominator)
        };
        if numerator.is_zero() {
            return Self {
                numerator,
                denominator: BigInteger::one(),
                simplified: true,
            };
        }
        let simplified = denominator.is_one();
        Self {
            numerator,
            denominator,
            simplified,
        }
    }

    fn with_flag(numerator: BigInteger, denominator: BigInteger, simplified: bool) -> Self {
        let mut out = Self::make(numerator, denominator);
        out.simplified = out.simplified || simplified;
        out
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

    pub fn numerator(&self) -> &BigInteger {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInteger {
        &self.denominator
    }

    pub fn is_simplified(&self) -> bool {
        self.simplified
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    pub fn signum(&self) -> i32 {
        self.numerator.signum()
    }

    /// The reduced form: divide both parts by their GCD.
    pub fn simplify(&self) -> Self {
        if self.simplified {
            return self.clone();
        }
        let g = self.numerator.gcd(&self.denominator);
        let numerator = self
            .numerator
            .quotient(&g)
            .expect("gcd of a non-zero fraction is non-zero");
        let denominator = self
            .denominator
            .quotient(&g)
            .expect("gcd of a non-zero fraction is non-zero");
        Self::with_flag(numerator, denominator, true)
    }

    // ── Arithmetic ───────────────────────────────────────────────────────────

    pub fn plus(&self, other: &Self) -> Self {
        let left = self.numerator.times(&other.denominator);
        let right = other.numerator.times(&self.denominator);
        Self::make(left.plus(&right), self.denominator.times(&other.denominator))
    }

    pub fn minus(&self, other: &Self) -> Self {
        let left = self.numerator.times(&other.denominator);
        let right = other.numerator.times(&self.denominator);
        Self::make(left.minus(&right), self.denominator.times(&other.denominator))
    }

    pub fn times(&self, other: &Self) -> Self {
        Self::make(
            self.numerator.times(&other.numerator),
            self.denominator.times(&other.denominator),
        )
    }

    pub fn divided_by(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::make(
            self.numerator.times(&other.denominator),
            self.denominator.times(&other.numerator),
        ))
    }

    pub fn reciprocal(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Self::make(
            self.denominator.clone(),
            self.numerator.clone(),
        ))
    }

    pub fn negated(&self) -> Self {
        Self {
            numerator: self.numerator.negated(),
            denominator: self.denominator.clone(),
            simplified: self.simplified,
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
            simplified: self.simplified,
        }
    }

    /// Integer exponent; negative exponents invert first, so zero raised to
    /// a negative power is a division by zero.
    pub fn power(&self, exponent: i64) -> Result<Self> {
        if exponent >= 0 {
            return Ok(self.power_unsigned(exponent as u64));
        }
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self
            .reciprocal()?
            .power_unsigned(exponent.unsigned_abs()))
    }

    fn power_unsigned(&self, exponent: u64) -> Self {
        if exponent == 0 {
            return Self::one();
        }
        Self::with_flag(
            self.numerator.power(exponent),
            self.denominator.power(exponent),
            self.simplified,
        )
    }

    /// Quotient of numerator by denominator, truncated toward zero.
    pub fn integral_part(&self) -> BigInteger {
        self.numerator
            .quotient(&self.denominator)
            .expect("denominator is positive")
    }

    /// `(numerator remainder denominator) / denominator`; carries the sign of
    /// the original, so integral and fractional parts re-sum exactly.
    pub fn fractional_part(&self) -> Self {
        let rem = self
            .numerator
            .remainder(&self.denominator)
            .expect("denominator is positive");
        Self::make(rem, self.denominator.clone())
    }

    // ── Conversions ──────────────────────────────────────────────────────────

    /// Succeeds iff the reduced denominator has no prime factor besides 2
    /// and 5; the scale is the minimal one that expresses the value.
    pub fn to_big_decimal(&self) -> Result<BigDecimal> {
        let reduced = self.simplify();
        let calc = calculator();
        let result_scale = scale::scale_for_denominator(calc, reduced.denominator.as_str())?;
        let multiplier = calc.div_q(
            &scale::pow10(result_scale),
            reduced.denominator.as_str(),
        )?;
        let unscaled = calc.mul(reduced.numerator.as_str(), &multiplier);
        Ok(BigDecimal::new(
            BigInteger::from_canonical(unscaled),
            result_scale,
        ))
    }

    /// Decimal rendition at a fixed scale under a rounding mode.
    pub fn to_scale(&self, result_scale: u32, mode: RoundingMode) -> Result<BigDecimal> {
        BigDecimal::from(self.numerator.clone()).divided_by(
            &BigDecimal::from(self.denominator.clone()),
            result_scale,
            mode,
        )
    }

    /// Long division with cycle detection: a repeating block is wrapped in
    /// parentheses, a terminating expansion is emitted plain. Space is
    /// `O(denominator)` in the worst case.
    pub fn to_repeating_decimal_string(&self) -> String {
        let reduced = self.simplify();
        let negative = reduced.numerator.is_negative();
        let numerator = reduced.numerator.abs();
        let denominator = &reduced.denominator;
        let (integral, mut rem) = numerator
            .quotient_and_remainder(denominator)
            .expect("denominator is positive");
        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(integral.as_str());
        if rem.is_zero() {
            return out;
        }
        out.push('.');
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut expansion = String::new();
        loop {
            if let Some(&start) = seen.get(rem.as_str()) {
                out.push_str(&expansion[..start]);
                out.push('(');
                out.push_str(&expansion[start..]);
                out.push(')');
                return out;
            }
            seen.insert(rem.as_str().to_string(), expansion.len());
            let (digit, next) = rem
                .times(&BigInteger::ten())
                .quotient_and_remainder(denominator)
                .expect("denominator is positive");
            expansion.push_str(digit.as_str());
            rem = next;
            if rem.is_zero() {
                out.push_str(&expansion);
                return out;
            }
        }
    }

    /// Sign-aware cross-multiplication; sound because denominators are
    /// positive.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        let left = self.numerator.times(&other.denominator);
        let right = other.numerator.times(&self.denominator);
        left.compare_to(&right)
    }
}

// ── Trait plumbing ───────────────────────────────────────────────────────────

impl PartialEq for BigRational {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for BigRational {}

impl PartialOrd for BigRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl Ord for BigRational {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for BigRational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let reduced = self.simplify();
        reduced.numerator.as_str().hash(state);
        reduced.denominator.as_str().hash(state);
    }
}

impl fmt::Display for BigRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            f.write_str(self.numerator.as_str())
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for BigRational {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (numerator, denominator) = parse::rational_literal(s)?;
        Self::new(
            BigInteger::from_canonical(numerator),
            BigInteger::from_canonical(denominator),
        )
    }
}

impl From<BigInteger> for BigRational {
    fn from(value: BigInteger) -> Self {
        Self {
            numerator: value,
            denominator: BigInteger::one(),
            simplified: true,
        }
    }
}

impl From<&BigDecimal> for BigRational {
    fn from(value: &BigDecimal) -> Self {
        let denominator =
            BigInteger::from_canonical(scale::pow10(value.scale()));
        Self::make(value.unscaled_value().clone(), denominator)
    }
}

macro_rules! from_primitive {
    ($($t:ty),*) => {$(
        impl From<$t> for BigRational {
            fn from(value: $t) -> Self {
                Self::from(BigInteger::from(value))
            }
        }
    )*};
}

from_primitive!(i32, i64, u32, u64);

impl Add for &BigRational {
    type Output = BigRational;
    fn add(self, rhs: &BigRational) -> BigRational {
        self.plus(rhs)
    }
}

impl Sub for &BigRational {
    type Output = BigRational;
    fn sub(self, rhs: &BigRational) -> BigRational {
        self.minus(rhs)
    }
}

impl Mul for &BigRational {
    type Output = BigRational;
    fn mul(self, rhs: &BigRational) -> BigRational {
        self.times(rhs)
    }
}

impl Neg for &BigRational {
    type Output = BigRational;
    fn neg(self) -> BigRational {
        self.negated()
    }
}

impl Serialize for BigRational {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BigRational {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
