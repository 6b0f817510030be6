//! Exact arbitrary-precision numbers.
//!
//! Three interoperating kinds — [`BigInteger`], [`BigDecimal`], and
//! [`BigRational`] — with strict, explicit rounding and a pluggable
//! digit-arithmetic backend (see [`apnum_calc`]). All values are immutable;
//! arithmetic is exact unless a [`RoundingMode`] says otherwise.
//!
//! ```
//! use apnum::{BigDecimal, Number, RoundingMode};
//!
//! let third: BigDecimal = "1".parse::<BigDecimal>().unwrap()
//!     .divided_by(&"3".parse().unwrap(), 4, RoundingMode::HalfUp)
//!     .unwrap();
//! assert_eq!(third.to_string(), "0.3333");
//!
//! let n: Number = "22/7".parse().unwrap();
//! assert_eq!(n.to_big_rational().to_repeating_decimal_string(), "3.(142857)");
//! ```

pub mod decimal;
pub mod integer;
pub mod number;
mod parse;
pub mod random;
pub mod rational;

pub use apnum_calc::{
    calculator, registry, set_calculator, BigintCalculator, Calculator, Error,
    PortableCalculator, Result, RoundingCause, RoundingMode,
};
pub use decimal::BigDecimal;
pub use integer::BigInteger;
pub use number::Number;
pub use random::{FnSource, OsRandom, RandomSource};
pub use rational::BigRational;
