//! Rounding modes and the pure rounding decision.
//!
//! The decision function sees only what rounding actually depends on: the
//! sign of the exact quotient, how twice the discarded remainder compares to
//! the divisor, and the parity of the truncated quotient. Callers invoke it
//! only when the discarded part is non-zero; an exact quotient never rounds.

use crate::digits;
use crate::error::{Error, Result, RoundingCause};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Fail if rounding would be required.
    Unnecessary,
    /// Away from zero.
    Up,
    /// Toward zero.
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// Half away from zero.
    HalfUp,
    /// Half toward zero.
    HalfDown,
    /// Half toward positive infinity.
    HalfCeiling,
    /// Half toward negative infinity.
    HalfFloor,
    /// Half to the even neighbor.
    HalfEven,
}

impl RoundingMode {
    /// Decide whether the truncated quotient magnitude moves one step away
    /// from zero.
    ///
    /// `half` is the exact comparison of `2·|remainder|` against `|divisor|`;
    /// `quotient_is_even` is the parity of the truncated quotient's last
    /// digit.
    pub fn needs_increment(
        self,
        negative: bool,
        half: Ordering,
        quotient_is_even: bool,
    ) -> Result<bool> {
        Ok(match self {
            RoundingMode::Unnecessary => {
                return Err(Error::RoundingNecessary(RoundingCause::InexactQuotient))
            }
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => !negative,
            RoundingMode::Floor => negative,
            RoundingMode::HalfUp => half != Ordering::Less,
            RoundingMode::HalfDown => half == Ordering::Greater,
            RoundingMode::HalfCeiling => {
                if negative {
                    half == Ordering::Greater
                } else {
                    half != Ordering::Less
                }
            }
            RoundingMode::HalfFloor => {
                if negative {
                    half != Ordering::Less
                } else {
                    half == Ordering::Greater
                }
            }
            RoundingMode::HalfEven => match half {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => !quotient_is_even,
            },
        })
    }
}

/// Round a truncated quotient magnitude, returning the adjusted magnitude.
pub(crate) fn round_magnitude(
    mode: RoundingMode,
    negative: bool,
    quotient_mag: &str,
    half: Ordering,
) -> Result<String> {
    let even = digits::mag_is_even(quotient_mag);
    if mode.needs_increment(negative, half, even)? {
        Ok(digits::increment_mag(quotient_mag))
    } else {
        Ok(quotient_mag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RoundingMode::*;

    fn incr(mode: RoundingMode, negative: bool, half: Ordering, even: bool) -> bool {
        mode.needs_increment(negative, half, even).unwrap()
    }

    #[test]
    fn unnecessary_always_fails() {
        let err = Unnecessary
            .needs_increment(false, Ordering::Less, true)
            .unwrap_err();
        assert_eq!(err, Error::RoundingNecessary(RoundingCause::InexactQuotient));
    }

    #[test]
    fn directed_modes() {
        assert!(incr(Up, false, Ordering::Less, true));
        assert!(incr(Up, true, Ordering::Less, true));
        assert!(!incr(Down, false, Ordering::Greater, true));
        assert!(!incr(Down, true, Ordering::Greater, true));
        assert!(incr(Ceiling, false, Ordering::Less, true));
        assert!(!incr(Ceiling, true, Ordering::Greater, true));
        assert!(!incr(Floor, false, Ordering::Greater, true));
        assert!(incr(Floor, true, Ordering::Less, true));
    }

    #[test]
    fn half_modes_at_the_tie() {
        assert!(incr(HalfUp, false, Ordering::Equal, true));
        assert!(!incr(HalfDown, false, Ordering::Equal, true));
        assert!(incr(HalfCeiling, false, Ordering::Equal, true));
        assert!(!incr(HalfCeiling, true, Ordering::Equal, true));
        assert!(!incr(HalfFloor, false, Ordering::Equal, true));
        assert!(incr(HalfFloor, true, Ordering::Equal, true));
        assert!(!incr(HalfEven, false, Ordering::Equal, true));
        assert!(incr(HalfEven, false, Ordering::Equal, false));
    }

    #[test]
    fn half_modes_away_from_the_tie() {
        for mode in [HalfUp, HalfDown, HalfCeiling, HalfFloor, HalfEven] {
            assert!(incr(mode, false, Ordering::Greater, true));
            assert!(!incr(mode, false, Ordering::Less, false));
            assert!(incr(mode, true, Ordering::Greater, true));
            assert!(!incr(mode, true, Ordering::Less, false));
        }
    }

    #[test]
    fn round_magnitude_carries() {
        let out = round_magnitude(Up, false, "199", Ordering::Less).unwrap();
        assert_eq!(out, "200");
        let out = round_magnitude(Down, false, "199", Ordering::Greater).unwrap();
        assert_eq!(out, "199");
    }
}
