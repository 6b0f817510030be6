//! The calculator capability interface.
//!
//! All higher layers delegate digit arithmetic through this trait; values on
//! the wire are canonical signed decimal digit strings (see
//! [`digits::canonicalize`](crate::digits::canonicalize)). Two backends
//! implement it: [`PortableCalculator`](crate::PortableCalculator) works on
//! the digit strings themselves, [`BigintCalculator`](crate::BigintCalculator)
//! wraps `num-bigint`. The registry picks one per process.

use crate::error::{Error, Result};
use crate::rounding::RoundingMode;
use std::cmp::Ordering;

pub(crate) const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub trait Calculator: Send + Sync {
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;

    fn add(&self, a: &str, b: &str) -> String;
    fn sub(&self, a: &str, b: &str) -> String;
    fn mul(&self, a: &str, b: &str) -> String;

    /// Truncated division: quotient toward zero, remainder with the sign of
    /// the dividend, `q·b + r = a` and `|r| < |b|`.
    fn div_qr(&self, a: &str, b: &str) -> Result<(String, String)>;

    fn div_q(&self, a: &str, b: &str) -> Result<String> {
        self.div_qr(a, b).map(|(q, _)| q)
    }

    fn div_r(&self, a: &str, b: &str) -> Result<String> {
        self.div_qr(a, b).map(|(_, r)| r)
    }

    /// Division rounded to an integer under `mode`. Exact quotients pass
    /// through untouched; `Unnecessary` fails iff the division is inexact.
    fn div_round(&self, a: &str, b: &str, mode: RoundingMode) -> Result<String>;

    fn pow(&self, a: &str, exponent: u64) -> String;

    /// `base^exponent mod modulus` with `exponent ≥ 0` and `modulus > 0`;
    /// the result is normalized into `[0, modulus)`.
    fn mod_pow(&self, base: &str, exponent: &str, modulus: &str) -> Result<String>;

    /// Euclidean remainder in `[0, m)` for `m > 0`.
    fn modulo(&self, a: &str, m: &str) -> Result<String>;

    /// Modular inverse; fails with `NoInverse` when `gcd(a, m) ≠ 1`.
    fn mod_inverse(&self, a: &str, m: &str) -> Result<String>;

    /// Non-negative; `gcd(0, 0) = 0`.
    fn gcd(&self, a: &str, b: &str) -> String;

    /// Non-negative; `0` when either operand is `0`.
    fn lcm(&self, a: &str, b: &str) -> String;

    /// Floor square root of `n ≥ 0`.
    fn sqrt(&self, n: &str) -> Result<String>;

    fn cmp(&self, a: &str, b: &str) -> Ordering;

    fn neg(&self, a: &str) -> String;

    /// Bitwise ops on the infinite-precision two's-complement form. The
    /// result is negative iff: both operands are (AND), either is (OR),
    /// exactly one is (XOR).
    fn bit_and(&self, a: &str, b: &str) -> String;
    fn bit_or(&self, a: &str, b: &str) -> String;
    fn bit_xor(&self, a: &str, b: &str) -> String;

    /// Parse `[+-]?digits` in the given base (2–36, alphabet `0-9a-z`,
    /// case-insensitive).
    fn from_base(&self, text: &str, base: u32) -> Result<String>;

    /// Render in the given base (2–36), lowercase, sign-prefixed.
    fn to_base(&self, n: &str, base: u32) -> Result<String>;

    /// Byte-oriented digits: each input byte's position in `alphabet` is its
    /// digit value.
    fn from_arbitrary_base(&self, digits: &[u8], alphabet: &[u8], base: u32) -> Result<String>;

    /// Byte-oriented rendering of a non-negative value.
    fn to_arbitrary_base(&self, n: &str, alphabet: &[u8], base: u32) -> Result<Vec<u8>>;
}

pub(crate) fn check_modulus(m: &str) -> Result<()> {
    if m == "0" {
        return Err(Error::DivisionByZero);
    }
    if m.starts_with('-') {
        return Err(Error::InvalidArgument(
            "modulus must be positive".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn check_base(base: u32) -> Result<()> {
    if !(2..=36).contains(&base) {
        return Err(Error::InvalidArgument(format!(
            "base {base} outside 2..=36"
        )));
    }
    Ok(())
}

/// Validate an arbitrary-base alphabet and build the byte → digit-value map
/// for its first `base` entries.
pub(crate) fn alphabet_values(alphabet: &[u8], base: u32) -> Result<[Option<u32>; 256]> {
    if alphabet.len() < 2 {
        return Err(Error::InvalidArgument(
            "alphabet must have at least 2 symbols".to_string(),
        ));
    }
    let mut seen = [false; 256];
    for &b in alphabet {
        if seen[b as usize] {
            return Err(Error::InvalidArgument(format!(
                "alphabet has duplicate symbol 0x{b:02x}"
            )));
        }
        seen[b as usize] = true;
    }
    if !(2..=alphabet.len() as u32).contains(&base) {
        return Err(Error::InvalidArgument(format!(
            "base {base} outside 2..={}",
            alphabet.len()
        )));
    }
    let mut values = [None; 256];
    for (i, &b) in alphabet.iter().take(base as usize).enumerate() {
        values[b as usize] = Some(i as u32);
    }
    Ok(values)
}
