//! Numeric literal grammars.
//!
//! Three textual forms, dispatched by [`Number`](crate::Number): a `/` means
//! rational, a `.` or exponent means decimal, anything else is an integer.
//! All grammars strip leading zeros and normalize `-0` to `0`.

use apnum_calc::digits::canonicalize;
use apnum_calc::{Error, Result};

/// `[+-]? digits`
pub(crate) fn integer_literal(text: &str) -> Result<String> {
    canonicalize(text)
}

/// `[+-]? (digits)? (. (digits)?)? ([eE] [+-]? digits)?` with at least one
/// digit in the integral or fractional part. Returns the canonical unscaled
/// value and the scale `len(fraction) − exponent`; a negative final scale is
/// normalized by appending zeros.
pub(crate) fn decimal_literal(text: &str) -> Result<(String, u32)> {
    let malformed = || Error::NumberFormat(text.to_string());
    let bytes = text.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &text[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = &text[frac_start..i];
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(malformed());
    }

    let mut exponent = 0i64;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        let exp_negative = match bytes.get(i) {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if exp_start == i {
            return Err(malformed());
        }
        let magnitude: i64 = text[exp_start..i]
            .parse()
            .map_err(|_| Error::IntegerOverflow)?;
        exponent = if exp_negative { -magnitude } else { magnitude };
    }
    if i != bytes.len() {
        return Err(malformed());
    }

    let mut unscaled = String::with_capacity(text.len() + 1);
    if negative {
        unscaled.push('-');
    }
    unscaled.push_str(int_digits);
    unscaled.push_str(frac_digits);

    let scale = frac_digits.len() as i64 - exponent;
    if scale < 0 {
        let zeros = u32::try_from(-scale).map_err(|_| Error::IntegerOverflow)?;
        for _ in 0..zeros {
            unscaled.push('0');
        }
        Ok((canonicalize(&unscaled)?, 0))
    } else {
        let scale = u32::try_from(scale).map_err(|_| Error::IntegerOverflow)?;
        Ok((canonicalize(&unscaled)?, scale))
    }
}

/// `[+-]? digits (/ digits)?` — the denominator carries no sign and defaults
/// to 1. Zero denominators are the caller's concern.
pub(crate) fn rational_literal(text: &str) -> Result<(String, String)> {
    let malformed = || Error::NumberFormat(text.to_string());
    match text.split_once('/') {
        Some((num, den)) => {
            let numerator = canonicalize(num).map_err(|_| malformed())?;
            if den.is_empty() || !den.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let denominator = canonicalize(den).map_err(|_| malformed())?;
            Ok((numerator, denominator))
        }
        None => {
            let numerator = canonicalize(text).map_err(|_| malformed())?;
            Ok((numerator, "1".to_string()))
        }
    }
}
