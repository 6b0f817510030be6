//! The native backend: a thin wrapper over `num-bigint`.
//!
//! Semantics match [`PortableCalculator`](crate::PortableCalculator) exactly;
//! the cross-backend law tests in `tests/kernel_laws.rs` hold the two to the
//! same behavior.

use crate::calculator::{alphabet_values, check_base, check_modulus, Calculator};
use crate::error::{Error, Result};
use crate::rounding::RoundingMode;
use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;

#[derive(Debug, Default, Clone, Copy)]
pub struct BigintCalculator;

fn big(s: &str) -> BigInt {
    s.parse().expect("canonical digit string")
}

impl Calculator for BigintCalculator {
    fn name(&self) -> &'static str {
        "num-bigint"
    }

    fn add(&self, a: &str, b: &str) -> String {
        (big(a) + big(b)).to_string()
    }

    fn sub(&self, a: &str, b: &str) -> String {
        (big(a) - big(b)).to_string()
    }

    fn mul(&self, a: &str, b: &str) -> String {
        (big(a) * big(b)).to_string()
    }

    fn div_qr(&self, a: &str, b: &str) -> Result<(String, String)> {
        let b = big(b);
        if b.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (q, r) = big(a).div_rem(&b);
        Ok((q.to_string(), r.to_string()))
    }

    fn div_round(&self, a: &str, b: &str, mode: RoundingMode) -> Result<String> {
        let a = big(a);
        let b = big(b);
        if b.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (q, r) = a.div_rem(&b);
        if r.is_zero() {
            return Ok(q.to_string());
        }
        let negative = a.is_negative() != b.is_negative();
        let mut q_mag = q.abs();
        let half = (r.abs() * 2u32).cmp(&b.abs());
        if mode.needs_increment(negative, half, q_mag.is_even())? {
            q_mag = q_mag + 1u32;
        }
        let out = if negative { -q_mag } else { q_mag };
        Ok(out.to_string())
    }

    fn pow(&self, a: &str, exponent: u64) -> String {
        Pow::pow(big(a), exponent).to_string()
    }

    fn mod_pow(&self, base: &str, exponent: &str, modulus: &str) -> Result<String> {
        check_modulus(modulus)?;
        let e = big(exponent);
        if e.is_negative() {
            return Err(Error::InvalidArgument(
                "exponent must be non-negative".to_string(),
            ));
        }
        let m = big(modulus);
        let b = big(base).mod_floor(&m);
        Ok(b.modpow(&e, &m).to_string())
    }

    fn modulo(&self, a: &str, m: &str) -> Result<String> {
        check_modulus(m)?;
        Ok(big(a).mod_floor(&big(m)).to_string())
    }

    fn mod_inverse(&self, a: &str, m: &str) -> Result<String> {
        check_modulus(m)?;
        let a = big(a);
        let m = big(m);
        if !a.gcd(&m).is_one() {
            return Err(Error::NoInverse);
        }
        let egcd = a.extended_gcd(&m);
        Ok(egcd.x.mod_floor(&m).to_string())
    }

    fn gcd(&self, a: &str, b: &str) -> String {
        big(a).gcd(&big(b)).to_string()
    }

    fn lcm(&self, a: &str, b: &str) -> String {
        let a = big(a);
        let b = big(b);
        if a.is_zero() || b.is_zero() {
            return "0".to_string();
        }
        a.lcm(&b).to_string()
    }

    fn sqrt(&self, n: &str) -> Result<String> {
        let n = big(n);
        if n.is_negative() {
            return Err(Error::NegativeNumber(n.to_string()));
        }
        Ok(n.sqrt().to_string())
    }

    fn cmp(&self, a: &str, b: &str) -> Ordering {
        big(a).cmp(&big(b))
    }

    fn neg(&self, a: &str) -> String {
        (-big(a)).to_string()
    }

    fn bit_and(&self, a: &str, b: &str) -> String {
        (big(a) & big(b)).to_string()
    }

    fn bit_or(&self, a: &str, b: &str) -> String {
        (big(a) | big(b)).to_string()
    }

    fn bit_xor(&self, a: &str, b: &str) -> String {
        (big(a) ^ big(b)).to_string()
    }

    fn from_base(&self, text: &str, base: u32) -> Result<String> {
        check_base(base)?;
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        if rest.is_empty() {
            return Err(Error::NumberFormat(text.to_string()));
        }
        let mut value = BigInt::zero();
        for ch in rest.chars() {
            let digit = ch
                .to_ascii_lowercase()
                .to_digit(base)
                .ok_or_else(|| Error::NumberFormat(text.to_string()))?;
            value = value * base + digit;
        }
        if negative {
            value = -value;
        }
        Ok(value.to_string())
    }

    fn to_base(&self, n: &str, base: u32) -> Result<String> {
        check_base(base)?;
        Ok(big(n).to_str_radix(base))
    }

    fn from_arbitrary_base(&self, input: &[u8], alphabet: &[u8], base: u32) -> Result<String> {
        let values = alphabet_values(alphabet, base)?;
        if input.is_empty() {
            return Err(Error::NumberFormat("empty digit sequence".to_string()));
        }
        let mut value = BigInt::zero();
        for &byte in input {
            let digit = values[byte as usize].ok_or_else(|| {
                Error::NumberFormat(format!("byte 0x{byte:02x} not in alphabet"))
            })?;
            value = value * base + digit;
        }
        Ok(value.to_string())
    }

    fn to_arbitrary_base(&self, n: &str, alphabet: &[u8], base: u32) -> Result<Vec<u8>> {
        alphabet_values(alphabet, base)?;
        let mut value = big(n);
        if value.is_negative() {
            return Err(Error::NegativeNumber(n.to_string()));
        }
        if value.is_zero() {
            return Ok(vec![alphabet[0]]);
        }
        let base_big = BigInt::from(base);
        let mut out = Vec::new();
        while !value.is_zero() {
            let (q, r) = value.div_rem(&base_big);
            out.push(alphabet[r.to_usize().expect("digit below base")]);
            value = q;
        }
        out.reverse();
        Ok(out)
    }
}
