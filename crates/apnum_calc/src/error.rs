//! Error kinds shared by the kernel and the value types built on it.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("malformed numeric literal `{0}`")]
    NumberFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("rounding necessary: {0}")]
    RoundingNecessary(RoundingCause),

    #[error("negative number: {0}")]
    NegativeNumber(String),

    #[error("value outside native integer range")]
    IntegerOverflow,

    #[error("modular inverse does not exist")]
    NoInverse,

    #[error("random source: {0}")]
    RandomSource(String),
}

/// Why a `RoundingNecessary` error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingCause {
    /// The quotient is not exact at the requested precision.
    InexactQuotient,
    /// The target scale cannot hold the exact result.
    ScaleTooSmall,
    /// The decimal expansion never terminates.
    NonTerminating,
}

impl fmt::Display for RoundingCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingCause::InexactQuotient => write!(f, "result is inexact"),
            RoundingCause::ScaleTooSmall => write!(f, "scale too small for exact result"),
            RoundingCause::NonTerminating => write!(f, "decimal expansion does not terminate"),
        }
    }
}
