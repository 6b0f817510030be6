//! Scale adjustment helpers for the decimal layer.
//!
//! A fixed-scale decimal is an unscaled integer paired with a non-negative
//! scale; these helpers move values between scales, decide exactness, and
//! compute the scale a reduced fraction denominator demands.

use crate::calculator::Calculator;
use crate::digits::split;
use crate::error::{Error, Result, RoundingCause};
use crate::rounding::RoundingMode;

/// `"1"` followed by `zeros` zeros.
pub fn pow10(zeros: u32) -> String {
    let mut out = String::with_capacity(zeros as usize + 1);
    out.push('1');
    for _ in 0..zeros {
        out.push('0');
    }
    out
}

fn append_zeros(value: &str, count: u32) -> String {
    if count == 0 || value == "0" {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + count as usize);
    out.push_str(value);
    for _ in 0..count {
        out.push('0');
    }
    out
}

/// Move an unscaled value from `cur` to `target` scale. Growing pads zeros;
/// shrinking divides by a power of ten under `mode`. With `Unnecessary` and a
/// non-zero discarded tail this fails as scale-too-small.
pub fn rescale(
    calc: &dyn Calculator,
    value: &str,
    cur: u32,
    target: u32,
    mode: RoundingMode,
) -> Result<String> {
    if target >= cur {
        return Ok(append_zeros(value, target - cur));
    }
    calc.div_round(value, &pow10(cur - target), mode)
        .map_err(|e| match e {
            Error::RoundingNecessary(_) => {
                Error::RoundingNecessary(RoundingCause::ScaleTooSmall)
            }
            other => other,
        })
}

/// The rescaled value iff no rounding is needed.
pub fn try_rescale_exact(
    calc: &dyn Calculator,
    value: &str,
    cur: u32,
    target: u32,
) -> Option<String> {
    if target >= cur {
        return Some(append_zeros(value, target - cur));
    }
    let (q, r) = calc
        .div_qr(value, &pow10(cur - target))
        .expect("power of ten is non-zero");
    if r == "0" {
        Some(q)
    } else {
        None
    }
}

/// Minimum scale `s` with `d | 10^s` for a reduced denominator `d > 0`:
/// strip factors of 2 and 5; anything left over means the expansion never
/// terminates.
pub fn scale_for_denominator(calc: &dyn Calculator, d: &str) -> Result<u32> {
    if d == "0" {
        return Err(Error::DivisionByZero);
    }
    if d.starts_with('-') {
        return Err(Error::InvalidArgument(
            "denominator must be positive".to_string(),
        ));
    }
    let mut rest = d.to_string();
    let mut twos = 0u32;
    let mut fives = 0u32;
    loop {
        let (q, r) = calc.div_qr(&rest, "2")?;
        if r != "0" {
            break;
        }
        rest = q;
        twos += 1;
    }
    loop {
        let (q, r) = calc.div_qr(&rest, "5")?;
        if r != "0" {
            break;
        }
        rest = q;
        fives += 1;
    }
    if rest != "1" {
        return Err(Error::RoundingNecessary(RoundingCause::NonTerminating));
    }
    Ok(twos.max(fives))
}

/// Zero-pad the magnitude so the digit string covers at least `scale + 1`
/// positions; the sign is preserved.
pub fn pad_unscaled(value: &str, scale: u32) -> String {
    let (negative, mag) = split(value);
    let want = scale as usize + 1;
    if mag.len() >= want {
        return value.to_string();
    }
    let mut out = String::with_capacity(want + 1);
    if negative {
        out.push('-');
    }
    for _ in 0..want - mag.len() {
        out.push('0');
    }
    out.push_str(mag);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BIGINT;

    static CALC: &dyn Calculator = &BIGINT;

    #[test]
    fn rescale_grows_with_zeros() {
        assert_eq!(rescale(CALC, "15", 1, 3, RoundingMode::Unnecessary).unwrap(), "1500");
        assert_eq!(rescale(CALC, "0", 0, 5, RoundingMode::Unnecessary).unwrap(), "0");
    }

    #[test]
    fn rescale_shrinks_with_rounding() {
        assert_eq!(rescale(CALC, "1500", 3, 1, RoundingMode::Unnecessary).unwrap(), "15");
        assert_eq!(rescale(CALC, "1549", 3, 1, RoundingMode::HalfUp).unwrap(), "15");
        assert_eq!(rescale(CALC, "1550", 3, 1, RoundingMode::HalfUp).unwrap(), "16");
        assert_eq!(rescale(CALC, "-1550", 3, 1, RoundingMode::HalfUp).unwrap(), "-16");
        assert_eq!(
            rescale(CALC, "1501", 3, 1, RoundingMode::Unnecessary).unwrap_err(),
            Error::RoundingNecessary(RoundingCause::ScaleTooSmall)
        );
    }

    #[test]
    fn exact_rescaling() {
        assert_eq!(try_rescale_exact(CALC, "1500", 3, 1), Some("15".to_string()));
        assert_eq!(try_rescale_exact(CALC, "1501", 3, 1), None);
        assert_eq!(try_rescale_exact(CALC, "7", 0, 2), Some("700".to_string()));
    }

    #[test]
    fn denominator_scales() {
        assert_eq!(scale_for_denominator(CALC, "1").unwrap(), 0);
        assert_eq!(scale_for_denominator(CALC, "8").unwrap(), 3);
        assert_eq!(scale_for_denominator(CALC, "5").unwrap(), 1);
        assert_eq!(scale_for_denominator(CALC, "40").unwrap(), 3);
        assert_eq!(
            scale_for_denominator(CALC, "6").unwrap_err(),
            Error::RoundingNecessary(RoundingCause::NonTerminating)
        );
        assert_eq!(scale_for_denominator(CALC, "0").unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn padding_covers_the_point() {
        assert_eq!(pad_unscaled("5", 2), "005");
        assert_eq!(pad_unscaled("-5", 2), "-005");
        assert_eq!(pad_unscaled("12345", 2), "12345");
        assert_eq!(pad_unscaled("0", 0), "0");
    }
}
