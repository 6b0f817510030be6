//! Arbitrary-precision calculator kernel.
//!
//! Everything here works on canonical signed decimal digit strings: the
//! [`Calculator`] trait defines the operation set, two backends implement it
//! ([`PortableCalculator`] on raw digit blocks, [`BigintCalculator`] over
//! `num-bigint`), the [`registry`] picks one per process, and the
//! [`rounding`] and [`scale`] modules supply the rounding decision table and
//! decimal scale plumbing shared by the value types built on top.
//!
//! ```
//! use apnum_calc::{calculator, RoundingMode};
//!
//! let calc = calculator();
//! assert_eq!(calc.add("12", "-5"), "7");
//! assert_eq!(calc.div_round("10", "3", RoundingMode::HalfUp).unwrap(), "3");
//! ```

pub mod bigint;
pub mod calculator;
pub mod digits;
pub mod error;
pub mod portable;
pub mod registry;
pub mod rounding;
pub mod scale;

pub use bigint::BigintCalculator;
pub use calculator::Calculator;
pub use error::{Error, Result, RoundingCause};
pub use portable::PortableCalculator;
pub use registry::{calculator, set_calculator};
pub use rounding::RoundingMode;
