//! The abstract number kind.
//!
//! `Number` is the tagged sum over the three concrete kinds with widening
//! rank integer < decimal < rational. Parsing dispatches on the literal
//! shape, aggregate operations widen to the broadest kind encountered, and
//! the supplemental arithmetic promotes to the smallest kind that holds the
//! exact result.

use crate::decimal::BigDecimal;
use crate::integer::BigInteger;
use crate::rational::BigRational;
use apnum_calc::error::RoundingCause;
use apnum_calc::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Number {
    Integer(BigInteger),
    Decimal(BigDecimal),
    Rational(BigRational),
}

impl Number {
    /// Widening rank: integer < decimal < rational.
    fn rank(&self) -> u8 {
        match self {
            Number::Integer(_) => 0,
            Number::Decimal(_) => 1,
            Number::Rational(_) => 2,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(v) => v.is_zero(),
            Number::Decimal(v) => v.is_zero(),
            Number::Rational(v) => v.is_zero(),
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Number::Integer(v) => Number::Integer(v.negated()),
            Number::Decimal(v) => Number::Decimal(v.negated()),
            Number::Rational(v) => Number::Rational(v.negated()),
        }
    }

    pub fn abs(&self) -> Self {
        match self {
            Number::Integer(v) => Number::Integer(v.abs()),
            Number::Decimal(v) => Number::Decimal(v.abs()),
            Number::Rational(v) => Number::Rational(v.abs()),
        }
    }

    // ── Coercions ────────────────────────────────────────────────────────────

    /// Narrowing may fail with `RoundingNecessary` (`1/2` has no integer
    /// form).
    pub fn to_big_integer(&self) -> Result<BigInteger> {
        match self {
            Number::Integer(v) => Ok(v.clone()),
            Number::Decimal(v) => v.to_big_integer(),
            Number::Rational(v) => {
                let reduced = v.simplify();
                if reduced.denominator().is_one() {
                    Ok(reduced.numerator().clone())
                } else {
                    Err(Error::RoundingNecessary(RoundingCause::InexactQuotient))
                }
            }
        }
    }

    pub fn to_big_decimal(&self) -> Result<BigDecimal> {
        match self {
            Number::Integer(v) => Ok(BigDecimal::from(v.clone())),
            Number::Decimal(v) => Ok(v.clone()),
            Number::Rational(v) => v.to_big_decimal(),
        }
    }

    /// Always lossless.
    pub fn to_big_rational(&self) -> BigRational {
        match self {
            Number::Integer(v) => BigRational::from(v.clone()),
            Number::Decimal(v) => BigRational::from(v),
            Number::Rational(v) => v.clone(),
        }
    }

    /// Widen in-kind; `rank` must not narrow.
    fn widened_to(&self, rank: u8) -> Self {
        match rank {
            0 => self.clone(),
            1 => Number::Decimal(self.to_big_decimal().expect("widening never rounds")),
            _ => Number::Rational(self.to_big_rational()),
        }
    }

    // ── Arithmetic at the widest operand kind ────────────────────────────────

    pub fn plus(&self, other: &Self) -> Result<Self> {
        match self.rank().max(other.rank()) {
            0 => Ok(Number::Integer(
                self.to_big_integer()?.plus(&other.to_big_integer()?),
            )),
            1 => Ok(Number::Decimal(
                self.to_big_decimal()?.plus(&other.to_big_decimal()?),
            )),
            _ => Ok(Number::Rational(
                self.to_big_rational().plus(&other.to_big_rational()),
            )),
        }
    }

    pub fn minus(&self, other: &Self) -> Result<Self> {
        match self.rank().max(other.rank()) {
            0 => Ok(Number::Integer(
                self.to_big_integer()?.minus(&other.to_big_integer()?),
            )),
            1 => Ok(Number::Decimal(
                self.to_big_decimal()?.minus(&other.to_big_decimal()?),
            )),
            _ => Ok(Number::Rational(
                self.to_big_rational().minus(&other.to_big_rational()),
            )),
        }
    }

    pub fn times(&self, other: &Self) -> Result<Self> {
        match self.rank().max(other.rank()) {
            0 => Ok(Number::Integer(
                self.to_big_integer()?.times(&other.to_big_integer()?),
            )),
            1 => Ok(Number::Decimal(
                self.to_big_decimal()?.times(&other.to_big_decimal()?)?,
            )),
            _ => Ok(Number::Rational(
                self.to_big_rational().times(&other.to_big_rational()),
            )),
        }
    }

    /// Exact division: computed as a rational, then narrowed back to the
    /// operands' widest kind when the result is exactly expressible there.
    pub fn divided_by(&self, other: &Self) -> Result<Self> {
        let exact = self
            .to_big_rational()
            .divided_by(&other.to_big_rational())?;
        Ok(Self::narrowed(exact, self.rank().max(other.rank())))
    }

    fn narrowed(value: BigRational, rank: u8) -> Self {
        let reduced = value.simplify();
        match rank {
            0 => {
                if reduced.denominator().is_one() {
                    Number::Integer(reduced.numerator().clone())
                } else {
                    Number::Rational(reduced)
                }
            }
            1 => match reduced.to_big_decimal() {
                Ok(decimal) => Number::Decimal(decimal),
                Err(_) => Number::Rational(reduced),
            },
            _ => Number::Rational(reduced),
        }
    }

    // ── Aggregates ───────────────────────────────────────────────────────────

    /// Sum at the broadest encountered kind, so a rational accumulator
    /// absorbs decimals and integers losslessly. An empty input sums to the
    /// integer zero.
    pub fn sum<I: IntoIterator<Item = Number>>(values: I) -> Result<Number> {
        let values: Vec<Number> = values.into_iter().collect();
        let rank = values.iter().map(Number::rank).max().unwrap_or(0);
        match rank {
            0 => {
                let mut acc = BigInteger::zero();
                for v in &values {
                    acc = acc.plus(&v.to_big_integer()?);
                }
                Ok(Number::Integer(acc))
            }
            1 => {
                let mut acc = BigDecimal::zero();
                for v in &values {
                    acc = acc.plus(&v.to_big_decimal()?);
                }
                Ok(Number::Decimal(acc))
            }
            _ => {
                let mut acc = BigRational::zero();
                for v in &values {
                    acc = acc.plus(&v.to_big_rational());
                }
                Ok(Number::Rational(acc))
            }
        }
    }

    /// Minimum, widened to the broadest encountered kind.
    pub fn min<I: IntoIterator<Item = Number>>(values: I) -> Option<Number> {
        let values: Vec<Number> = values.into_iter().collect();
        let rank = values.iter().map(Number::rank).max()?;
        let extreme = values
            .into_iter()
            .min_by(|a, b| a.compare_to(b))?;
        Some(extreme.widened_to(rank))
    }

    /// Maximum, widened to the broadest encountered kind.
    pub fn max<I: IntoIterator<Item = Number>>(values: I) -> Option<Number> {
        let values: Vec<Number> = values.into_iter().collect();
        let rank = values.iter().map(Number::rank).max()?;
        let extreme = values
            .into_iter()
            .max_by(|a, b| a.compare_to(b))?;
        Some(extreme.widened_to(rank))
    }

    /// Numeric comparison through the lossless rational lift.
    pub fn compare_to(&self, other: &Self) -> Ordering {
        self.to_big_rational().compare_to(&other.to_big_rational())
    }
}

// ── Trait plumbing ───────────────────────────────────────────────────────────

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => v.fmt(f),
            Number::Decimal(v) => v.fmt(f),
            Number::Rational(v) => v.fmt(f),
        }
    }
}

impl FromStr for Number {
    type Err = Error;

    /// Dispatch on the literal shape: `/` selects the rational grammar, a
    /// point or exponent the decimal grammar, anything else the integer
    /// grammar.
    fn from_str(s: &str) -> Result<Self> {
        if s.contains('/') {
            s.parse().map(Number::Rational)
        } else if s.contains(|c| c == '.' || c == 'e' || c == 'E') {
            s.parse().map(Number::Decimal)
        } else {
            s.parse().map(Number::Integer)
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_big_rational().hash(state);
    }
}

impl From<BigInteger> for Number {
    fn from(value: BigInteger) -> Self {
        Number::Integer(value)
    }
}

impl From<BigDecimal> for Number {
    fn from(value: BigDecimal) -> Self {
        Number::Decimal(value)
    }
}

impl From<BigRational> for Number {
    fn from(value: BigRational) -> Self {
        Number::Rational(value)
    }
}

impl TryFrom<&Number> for BigInteger {
    type Error = Error;

    fn try_from(value: &Number) -> Result<Self> {
        value.to_big_integer()
    }
}

impl TryFrom<&Number> for BigDecimal {
    type Error = Error;

    fn try_from(value: &Number) -> Result<Self> {
        value.to_big_decimal()
    }
}

impl From<&Number> for BigRational {
    fn from(value: &Number) -> Self {
        value.to_big_rational()
    }
}
