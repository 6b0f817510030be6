//! The portable backend: block-wise schoolbook arithmetic on digit strings.
//!
//! Magnitudes are chunked into little-endian `u64` blocks of decimal digits.
//! Addition and subtraction use 18-digit blocks, the widest for which the sum
//! of two blocks plus a carry fits a machine word. Multiplication and
//! division use 9-digit blocks so a block product also fits a word. Division
//! takes a fast path over 9-digit windows when the divisor itself fits a
//! word, and otherwise runs digit-wise long division against precomputed
//! divisor multiples. Bitwise operations go through base-256 magnitude bytes
//! with explicit two's complement.

use crate::calculator::{
    alphabet_values, check_base, check_modulus, Calculator, BASE36_ALPHABET,
};
use crate::digits::{self, compose, is_zero, split, trim_leading_zeros};
use crate::error::{Error, Result};
use crate::rounding::{round_magnitude, RoundingMode};
use std::cmp::Ordering;
use std::fmt::Write as _;

const ADD_BLOCK: usize = 18;
const ADD_RADIX: u64 = 1_000_000_000_000_000_000;
const MUL_BLOCK: usize = 9;
const MUL_RADIX: u64 = 1_000_000_000;

#[derive(Debug, Default, Clone, Copy)]
pub struct PortableCalculator;

// ── Block plumbing ───────────────────────────────────────────────────────────

/// Chunk a magnitude into little-endian blocks of `width` digits.
fn to_blocks(mag: &str, width: usize) -> Vec<u64> {
    let bytes = mag.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / width + 1);
    let mut end = bytes.len();
    while end > 0 {
        let start = end.saturating_sub(width);
        let mut value = 0u64;
        for &b in &bytes[start..end] {
            value = value * 10 + u64::from(b - b'0');
        }
        out.push(value);
        end = start;
    }
    if out.is_empty() {
        out.push(0);
    }
    out
}

fn from_blocks(blocks: &[u64], width: usize) -> String {
    let mut top = blocks.len();
    while top > 1 && blocks[top - 1] == 0 {
        top -= 1;
    }
    let mut out = blocks[top - 1].to_string();
    for &block in blocks[..top - 1].iter().rev() {
        write!(out, "{block:0width$}").expect("writing to a String");
    }
    out
}

fn trim_blocks(blocks: &mut Vec<u64>) {
    while blocks.len() > 1 && *blocks.last().expect("non-empty") == 0 {
        blocks.pop();
    }
}

fn blocks_are_zero(blocks: &[u64]) -> bool {
    blocks.iter().all(|&b| b == 0)
}

fn cmp_blocks(a: &[u64], b: &[u64]) -> Ordering {
    let len_a = a.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1);
    let len_b = b.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1);
    if len_a != len_b {
        return len_a.cmp(&len_b);
    }
    for i in (0..len_a).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}

fn add_blocks(a: &[u64], b: &[u64], radix: u64) -> Vec<u64> {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len + 1);
    let mut carry = 0u64;
    for i in 0..len {
        let mut v = carry + a.get(i).copied().unwrap_or(0) + b.get(i).copied().unwrap_or(0);
        if v >= radix {
            v -= radix;
            carry = 1;
        } else {
            carry = 0;
        }
        out.push(v);
    }
    if carry != 0 {
        out.push(carry);
    }
    out
}

/// `a - b` for `a ≥ b`.
fn sub_blocks(a: &[u64], b: &[u64], radix: u64) -> Vec<u64> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0u64;
    for i in 0..a.len() {
        let rhs = b.get(i).copied().unwrap_or(0) + borrow;
        if a[i] >= rhs {
            out.push(a[i] - rhs);
            borrow = 0;
        } else {
            out.push(a[i] + radix - rhs);
            borrow = 1;
        }
    }
    trim_blocks(&mut out);
    out
}

/// `blocks = blocks·mul + add` over 9-digit blocks. Requires
/// `mul·MUL_RADIX + add` to fit a word — true for every caller (×10, ×base,
/// ×256).
fn muladd_small(blocks: &mut Vec<u64>, mul: u64, add: u64) {
    let mut carry = add;
    for block in blocks.iter_mut() {
        let t = *block * mul + carry;
        *block = t % MUL_RADIX;
        carry = t / MUL_RADIX;
    }
    while carry > 0 {
        blocks.push(carry % MUL_RADIX);
        carry /= MUL_RADIX;
    }
}

/// `blocks /= d` in place (9-digit windows, double-word accumulator);
/// returns the remainder. Requires `0 < d < ADD_RADIX`.
fn div_small_blocks(blocks: &mut Vec<u64>, d: u64) -> u64 {
    let mut rem: u64 = 0;
    for i in (0..blocks.len()).rev() {
        let acc = u128::from(rem) * u128::from(MUL_RADIX) + u128::from(blocks[i]);
        blocks[i] = (acc / u128::from(d)) as u64;
        rem = (acc % u128::from(d)) as u64;
    }
    trim_blocks(blocks);
    rem
}

// ── Magnitude arithmetic ─────────────────────────────────────────────────────

fn add_mag(a: &str, b: &str) -> String {
    let sum = add_blocks(&to_blocks(a, ADD_BLOCK), &to_blocks(b, ADD_BLOCK), ADD_RADIX);
    from_blocks(&sum, ADD_BLOCK)
}

/// `a - b` for magnitudes with `a ≥ b`.
fn sub_mag(a: &str, b: &str) -> String {
    let diff = sub_blocks(&to_blocks(a, ADD_BLOCK), &to_blocks(b, ADD_BLOCK), ADD_RADIX);
    from_blocks(&diff, ADD_BLOCK)
}

fn mul_mag(a: &str, b: &str) -> String {
    if a == "0" || b == "0" {
        return "0".to_string();
    }
    let x = to_blocks(a, MUL_BLOCK);
    let y = to_blocks(b, MUL_BLOCK);
    let mut out = vec![0u64; x.len() + y.len()];
    for (i, &xi) in x.iter().enumerate() {
        if xi == 0 {
            continue;
        }
        let mut carry = 0u64;
        for (j, &yj) in y.iter().enumerate() {
            let t = xi * yj + out[i + j] + carry;
            out[i + j] = t % MUL_RADIX;
            carry = t / MUL_RADIX;
        }
        let mut k = i + y.len();
        while carry > 0 {
            let t = out[k] + carry;
            out[k] = t % MUL_RADIX;
            carry = t / MUL_RADIX;
            k += 1;
        }
    }
    from_blocks(&out, MUL_BLOCK)
}

/// Magnitude division, `b ≠ 0`; returns `(quotient, remainder)`.
fn div_mag(a: &str, b: &str) -> (String, String) {
    match digits::cmp_mag(a, b) {
        Ordering::Less => return ("0".to_string(), a.to_string()),
        Ordering::Equal => return ("1".to_string(), "0".to_string()),
        Ordering::Greater => {}
    }
    if b.len() <= ADD_BLOCK {
        let d: u64 = b.parse().expect("canonical magnitude");
        let mut blocks = to_blocks(a, MUL_BLOCK);
        let rem = div_small_blocks(&mut blocks, d);
        return (from_blocks(&blocks, MUL_BLOCK), rem.to_string());
    }

    // Digit-wise long division against precomputed divisor multiples.
    let mults: Vec<Vec<u64>> = (1..=9u64)
        .map(|k| {
            let mut m = to_blocks(b, MUL_BLOCK);
            muladd_small(&mut m, k, 0);
            m
        })
        .collect();
    let mut rem: Vec<u64> = vec![0];
    let mut quotient = Vec::with_capacity(a.len());
    for &byte in a.as_bytes() {
        muladd_small(&mut rem, 10, u64::from(byte - b'0'));
        let mut fit = 0usize;
        for (i, m) in mults.iter().enumerate() {
            if cmp_blocks(m, &rem) != Ordering::Greater {
                fit = i + 1;
            } else {
                break;
            }
        }
        if fit > 0 {
            rem = sub_blocks(&rem, &mults[fit - 1], MUL_RADIX);
        }
        quotient.push(b'0' + fit as u8);
    }
    let q = String::from_utf8(quotient).expect("ascii digits");
    (
        trim_leading_zeros(&q).to_string(),
        from_blocks(&rem, MUL_BLOCK),
    )
}

fn pow10_mag(zeros: usize) -> String {
    let mut out = String::with_capacity(zeros + 1);
    out.push('1');
    for _ in 0..zeros {
        out.push('0');
    }
    out
}

/// Floor square root by Newton's iteration, seeded with `10^⌈len/2⌉`.
fn sqrt_mag(n: &str) -> String {
    if n == "0" || n == "1" {
        return n.to_string();
    }
    let mut x = pow10_mag((n.len() + 1) / 2);
    loop {
        let (q, _) = div_mag(n, &x);
        let mut sum = to_blocks(&add_mag(&x, &q), MUL_BLOCK);
        div_small_blocks(&mut sum, 2);
        let next = from_blocks(&sum, MUL_BLOCK);
        if digits::cmp_mag(&next, &x) != Ordering::Less {
            return x;
        }
        x = next;
    }
}

fn pow_mag(a: &str, mut exponent: u64) -> String {
    if exponent == 0 {
        return "1".to_string();
    }
    let mut base = a.to_string();
    let mut acc = "1".to_string();
    while exponent > 0 {
        if exponent & 1 == 1 {
            acc = mul_mag(&acc, &base);
        }
        exponent >>= 1;
        if exponent > 0 {
            base = mul_mag(&base, &base);
        }
    }
    acc
}

// ── Radix and byte conversions ───────────────────────────────────────────────

/// Little-endian digit values of a magnitude in `base`; empty for zero.
fn to_radix_digits(mag: &str, base: u64) -> Vec<u64> {
    let mut blocks = to_blocks(mag, MUL_BLOCK);
    let mut out = Vec::new();
    while !blocks_are_zero(&blocks) {
        out.push(div_small_blocks(&mut blocks, base));
    }
    out
}

/// Magnitude from big-endian digit values in `base`.
fn from_radix_digits(values: &[u64], base: u64) -> String {
    let mut blocks = vec![0u64];
    for &v in values {
        muladd_small(&mut blocks, base, v);
    }
    from_blocks(&blocks, MUL_BLOCK)
}

/// Minimal big-endian magnitude bytes; empty for zero.
fn mag_to_bytes(mag: &str) -> Vec<u8> {
    let mut le = to_radix_digits(mag, 256);
    le.reverse();
    le.into_iter().map(|v| v as u8).collect()
}

fn bytes_to_mag(bytes: &[u8]) -> String {
    let values: Vec<u64> = bytes.iter().map(|&b| u64::from(b)).collect();
    from_radix_digits(&values, 256)
}

/// In-place two's complement negation of a big-endian buffer.
fn twos_negate(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = !*b;
    }
    for b in buf.iter_mut().rev() {
        let (v, overflow) = b.overflowing_add(1);
        *b = v;
        if !overflow {
            break;
        }
    }
}

/// Sign-extended two's complement bytes over `width` bytes.
fn twos_complement_bytes(negative: bool, raw: Vec<u8>, width: usize) -> Vec<u8> {
    let mut buf = vec![0u8; width - raw.len()];
    buf.extend(raw);
    if negative {
        twos_negate(&mut buf);
    }
    buf
}

fn bitop(a: &str, b: &str, op: fn(u8, u8) -> u8) -> String {
    let (neg_a, mag_a) = split(a);
    let (neg_b, mag_b) = split(b);
    let raw_a = mag_to_bytes(mag_a);
    let raw_b = mag_to_bytes(mag_b);
    // One extra byte guarantees a pure sign byte on top.
    let width = raw_a.len().max(raw_b.len()) + 1;
    let x = twos_complement_bytes(neg_a, raw_a, width);
    let y = twos_complement_bytes(neg_b, raw_b, width);
    let mut out: Vec<u8> = x.iter().zip(&y).map(|(&p, &q)| op(p, q)).collect();
    let negative = out[0] & 0x80 != 0;
    if negative {
        twos_negate(&mut out);
    }
    compose(negative, bytes_to_mag(&out))
}

// ── Calculator impl ──────────────────────────────────────────────────────────

impl PortableCalculator {
    fn add_signed(&self, neg_a: bool, mag_a: &str, neg_b: bool, mag_b: &str) -> String {
        if neg_a == neg_b {
            return compose(neg_a, add_mag(mag_a, mag_b));
        }
        match digits::cmp_mag(mag_a, mag_b) {
            Ordering::Equal => "0".to_string(),
            Ordering::Greater => compose(neg_a, sub_mag(mag_a, mag_b)),
            Ordering::Less => compose(neg_b, sub_mag(mag_b, mag_a)),
        }
    }
}

impl Calculator for PortableCalculator {
    fn name(&self) -> &'static str {
        "portable"
    }

    fn add(&self, a: &str, b: &str) -> String {
        let (neg_a, mag_a) = split(a);
        let (neg_b, mag_b) = split(b);
        self.add_signed(neg_a, mag_a, neg_b, mag_b)
    }

    fn sub(&self, a: &str, b: &str) -> String {
        let (neg_a, mag_a) = split(a);
        let (neg_b, mag_b) = split(b);
        self.add_signed(neg_a, mag_a, !neg_b && !is_zero(mag_b), mag_b)
    }

    fn mul(&self, a: &str, b: &str) -> String {
        let (neg_a, mag_a) = split(a);
        let (neg_b, mag_b) = split(b);
        compose(neg_a != neg_b, mul_mag(mag_a, mag_b))
    }

    fn div_qr(&self, a: &str, b: &str) -> Result<(String, String)> {
        if is_zero(b) {
            return Err(Error::DivisionByZero);
        }
        let (neg_a, mag_a) = split(a);
        let (neg_b, mag_b) = split(b);
        let (q, r) = div_mag(mag_a, mag_b);
        Ok((compose(neg_a != neg_b, q), compose(neg_a, r)))
    }

    fn div_round(&self, a: &str, b: &str, mode: RoundingMode) -> Result<String> {
        if is_zero(b) {
            return Err(Error::DivisionByZero);
        }
        let (neg_a, mag_a) = split(a);
        let (neg_b, mag_b) = split(b);
        let (q, r) = div_mag(mag_a, mag_b);
        if is_zero(&r) {
            return Ok(compose(neg_a != neg_b, q));
        }
        let negative = neg_a != neg_b;
        let half = digits::cmp_mag(&add_mag(&r, &r), mag_b);
        Ok(compose(negative, round_magnitude(mode, negative, &q, half)?))
    }

    fn pow(&self, a: &str, exponent: u64) -> String {
        let (neg_a, mag_a) = split(a);
        compose(neg_a && exponent % 2 == 1, pow_mag(mag_a, exponent))
    }

    fn mod_pow(&self, base: &str, exponent: &str, modulus: &str) -> Result<String> {
        check_modulus(modulus)?;
        if exponent.starts_with('-') {
            return Err(Error::InvalidArgument(
                "exponent must be non-negative".to_string(),
            ));
        }
        let base = self.modulo(base, modulus)?;
        let bits = to_radix_digits(exponent, 2);
        let mut acc = "1".to_string();
        for &bit in bits.iter().rev() {
            acc = div_mag(&mul_mag(&acc, &acc), modulus).1;
            if bit == 1 {
                acc = div_mag(&mul_mag(&acc, &base), modulus).1;
            }
        }
        Ok(div_mag(&acc, modulus).1)
    }

    fn modulo(&self, a: &str, m: &str) -> Result<String> {
        check_modulus(m)?;
        let (_, r) = self.div_qr(a, m)?;
        if r.starts_with('-') {
            Ok(self.add(&r, m))
        } else {
            Ok(r)
        }
    }

    fn mod_inverse(&self, a: &str, m: &str) -> Result<String> {
        check_modulus(m)?;
        let mut old_r = self.modulo(a, m)?;
        let mut r = m.to_string();
        let mut old_s = "1".to_string();
        let mut s = "0".to_string();
        while !is_zero(&r) {
            let (q, rem) = self.div_qr(&old_r, &r)?;
            let next_s = self.sub(&old_s, &self.mul(&q, &s));
            old_r = std::mem::replace(&mut r, rem);
            old_s = std::mem::replace(&mut s, next_s);
        }
        if old_r != "1" {
            return Err(Error::NoInverse);
        }
        self.modulo(&old_s, m)
    }

    fn gcd(&self, a: &str, b: &str) -> String {
        let (_, mag_a) = split(a);
        let (_, mag_b) = split(b);
        let mut x = mag_a.to_string();
        let mut y = mag_b.to_string();
        while !is_zero(&y) {
            let r = div_mag(&x, &y).1;
            x = std::mem::replace(&mut y, r);
        }
        x
    }

    fn lcm(&self, a: &str, b: &str) -> String {
        if is_zero(a) || is_zero(b) {
            return "0".to_string();
        }
        let (_, mag_a) = split(a);
        let (_, mag_b) = split(b);
        let g = self.gcd(a, b);
        div_mag(&mul_mag(mag_a, mag_b), &g).0
    }

    fn sqrt(&self, n: &str) -> Result<String> {
        if n.starts_with('-') {
            return Err(Error::NegativeNumber(n.to_string()));
        }
        Ok(sqrt_mag(n))
    }

    fn cmp(&self, a: &str, b: &str) -> Ordering {
        let (neg_a, mag_a) = split(a);
        let (neg_b, mag_b) = split(b);
        match (neg_a, neg_b) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => digits::cmp_mag(mag_a, mag_b),
            (true, true) => digits::cmp_mag(mag_b, mag_a),
        }
    }

    fn neg(&self, a: &str) -> String {
        let (neg_a, mag_a) = split(a);
        compose(!neg_a, mag_a.to_string())
    }

    fn bit_and(&self, a: &str, b: &str) -> String {
        bitop(a, b, |x, y| x & y)
    }

    fn bit_or(&self, a: &str, b: &str) -> String {
        bitop(a, b, |x, y| x | y)
    }

    fn bit_xor(&self, a: &str, b: &str) -> String {
        bitop(a, b, |x, y| x ^ y)
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
        let mut blocks = vec![0u64];
        for ch in rest.chars() {
            let digit = ch
                .to_ascii_lowercase()
                .to_digit(base)
                .ok_or_else(|| Error::NumberFormat(text.to_string()))?;
            muladd_small(&mut blocks, u64::from(base), u64::from(digit));
        }
        Ok(compose(negative, from_blocks(&blocks, MUL_BLOCK)))
    }

    fn to_base(&self, n: &str, base: u32) -> Result<String> {
        check_base(base)?;
        let (negative, mag) = split(n);
        if mag == "0" {
            return Ok("0".to_string());
        }
        let values = to_radix_digits(mag, u64::from(base));
        let mut out = String::with_capacity(values.len() + 1);
        if negative {
            out.push('-');
        }
        for &v in values.iter().rev() {
            out.push(BASE36_ALPHABET[v as usize] as char);
        }
        Ok(out)
    }

    fn from_arbitrary_base(&self, input: &[u8], alphabet: &[u8], base: u32) -> Result<String> {
        let values = alphabet_values(alphabet, base)?;
        if input.is_empty() {
            return Err(Error::NumberFormat("empty digit sequence".to_string()));
        }
        let mut blocks = vec![0u64];
        for &byte in input {
            let digit = values[byte as usize].ok_or_else(|| {
                Error::NumberFormat(format!("byte 0x{byte:02x} not in alphabet"))
            })?;
            muladd_small(&mut blocks, u64::from(base), u64::from(digit));
        }
        Ok(from_blocks(&blocks, MUL_BLOCK))
    }

    fn to_arbitrary_base(&self, n: &str, alphabet: &[u8], base: u32) -> Result<Vec<u8>> {
        alphabet_values(alphabet, base)?;
        if n.starts_with('-') {
            return Err(Error::NegativeNumber(n.to_string()));
        }
        if n == "0" {
            return Ok(vec![alphabet[0]]);
        }
        let values = to_radix_digits(n, u64::from(base));
        Ok(values
            .iter()
            .rev()
            .map(|&v| alphabet[v as usize])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALC: PortableCalculator = PortableCalculator;

    #[test]
    fn block_round_trip() {
        for mag in ["0", "7", "999999999", "1000000000", "123456789012345678901234567890"] {
            assert_eq!(from_blocks(&to_blocks(mag, MUL_BLOCK), MUL_BLOCK), mag);
            assert_eq!(from_blocks(&to_blocks(mag, ADD_BLOCK), ADD_BLOCK), mag);
        }
    }

    #[test]
    fn signed_addition() {
        assert_eq!(CALC.add("999999999999999999", "1"), "1000000000000000000");
        assert_eq!(CALC.add("-5", "3"), "-2");
        assert_eq!(CALC.add("5", "-5"), "0");
        assert_eq!(CALC.sub("3", "10"), "-7");
        assert_eq!(CALC.sub("-3", "-10"), "7");
    }

    #[test]
    fn multiplication_carries_across_blocks() {
        assert_eq!(
            CALC.mul("999999999999999999", "999999999999999999"),
            "999999999999999998000000000000000001"
        );
        assert_eq!(CALC.mul("-12345", "6789"), "-83810205");
        assert_eq!(CALC.mul("0", "-7"), "0");
    }

    #[test]
    fn truncated_division_signs() {
        let (q, r) = CALC.div_qr("7", "3").unwrap();
        assert_eq!((q.as_str(), r.as_str()), ("2", "1"));
        let (q, r) = CALC.div_qr("-7", "3").unwrap();
        assert_eq!((q.as_str(), r.as_str()), ("-2", "-1"));
        let (q, r) = CALC.div_qr("7", "-3").unwrap();
        assert_eq!((q.as_str(), r.as_str()), ("-2", "1"));
        let (q, r) = CALC.div_qr("-7", "-3").unwrap();
        assert_eq!((q.as_str(), r.as_str()), ("2", "-1"));
        assert_eq!(CALC.div_qr("1", "0").unwrap_err(), Error::DivisionByZero);
    }

    #[test]
    fn long_division_with_wide_divisor() {
        // divisor wider than one add-block forces the digit-wise path
        let a = "123456789012345678901234567890123456789";
        let b = "9876543210987654321098765432";
        let (q, r) = CALC.div_qr(a, b).unwrap();
        assert_eq!(q, "12499999886");
        // check q·b + r = a
        let back = CALC.add(&CALC.mul(&q, b), &r);
        assert_eq!(back, a);
        assert_eq!(CALC.cmp(&r, b), Ordering::Less);
    }

    #[test]
    fn division_rounding() {
        assert_eq!(CALC.div_round("7", "2", RoundingMode::HalfUp).unwrap(), "4");
        assert_eq!(CALC.div_round("7", "2", RoundingMode::HalfEven).unwrap(), "4");
        assert_eq!(CALC.div_round("5", "2", RoundingMode::HalfEven).unwrap(), "2");
        assert_eq!(CALC.div_round("-7", "2", RoundingMode::Ceiling).unwrap(), "-3");
        assert_eq!(CALC.div_round("-7", "2", RoundingMode::Floor).unwrap(), "-4");
        assert_eq!(CALC.div_round("6", "2", RoundingMode::Unnecessary).unwrap(), "3");
        assert!(CALC.div_round("7", "2", RoundingMode::Unnecessary).is_err());
    }

    #[test]
    fn square_roots() {
        assert_eq!(CALC.sqrt("0").unwrap(), "0");
        assert_eq!(CALC.sqrt("1").unwrap(), "1");
        assert_eq!(CALC.sqrt("10").unwrap(), "3");
        assert_eq!(CALC.sqrt("144").unwrap(), "12");
        assert_eq!(CALC.sqrt("152399025").unwrap(), "12345");
        // 12345678901234567890² = 152415787532388367501905199875019052100
        assert_eq!(
            CALC.sqrt("152415787532388367501905199875019052100").unwrap(),
            "12345678901234567890"
        );
        assert_eq!(
            CALC.sqrt("152415787532388367501905199875019052099").unwrap(),
            "12345678901234567889"
        );
        assert!(CALC.sqrt("-4").is_err());
    }

    #[test]
    fn power_and_mod_pow() {
        assert_eq!(CALC.pow("2", 0), "1");
        assert_eq!(CALC.pow("2", 64), "18446744073709551616");
        assert_eq!(CALC.pow("-3", 3), "-27");
        assert_eq!(CALC.pow("-3", 4), "81");
        assert_eq!(CALC.mod_pow("4", "13", "497").unwrap(), "445");
        assert_eq!(CALC.mod_pow("2", "0", "7").unwrap(), "1");
        assert_eq!(CALC.mod_pow("2", "10", "1").unwrap(), "0");
        assert_eq!(CALC.mod_pow("-2", "3", "7").unwrap(), "6");
        assert!(CALC.mod_pow("2", "3", "0").is_err());
        assert!(CALC.mod_pow("2", "-3", "7").is_err());
    }

    #[test]
    fn euclidean_modulo_and_inverse() {
        assert_eq!(CALC.modulo("-7", "3").unwrap(), "2");
        assert_eq!(CALC.modulo("7", "3").unwrap(), "1");
        assert_eq!(CALC.modulo("0", "3").unwrap(), "0");
        assert_eq!(CALC.mod_inverse("3", "7").unwrap(), "5");
        assert_eq!(CALC.mod_inverse("-3", "7").unwrap(), "2");
        assert_eq!(CALC.mod_inverse("1", "1").unwrap(), "0");
        assert_eq!(CALC.mod_inverse("4", "6").unwrap_err(), Error::NoInverse);
    }

    #[test]
    fn gcd_lcm() {
        assert_eq!(CALC.gcd("0", "0"), "0");
        assert_eq!(CALC.gcd("0", "-5"), "5");
        assert_eq!(CALC.gcd("12", "18"), "6");
        assert_eq!(CALC.gcd("-12", "18"), "6");
        assert_eq!(CALC.lcm("4", "6"), "12");
        assert_eq!(CALC.lcm("0", "6"), "0");
        assert_eq!(CALC.lcm("-4", "6"), "12");
    }

    #[test]
    fn bitwise_two_complement() {
        assert_eq!(CALC.bit_and("12", "10"), "8");
        assert_eq!(CALC.bit_or("12", "10"), "14");
        assert_eq!(CALC.bit_xor("12", "10"), "6");
        // -2 & 7 = 6; -2 | 7 = -1; -2 ^ 7 = -7
        assert_eq!(CALC.bit_and("-2", "7"), "6");
        assert_eq!(CALC.bit_or("-2", "7"), "-1");
        assert_eq!(CALC.bit_xor("-2", "7"), "-7");
        assert_eq!(CALC.bit_and("-2", "-3"), "-4");
        assert_eq!(CALC.bit_or("-2", "-3"), "-1");
        assert_eq!(CALC.bit_xor("-2", "-3"), "3");
        assert_eq!(CALC.bit_and("0", "0"), "0");
    }

    #[test]
    fn base_conversion() {
        assert_eq!(CALC.from_base("ff", 16).unwrap(), "255");
        assert_eq!(CALC.from_base("FF", 16).unwrap(), "255");
        assert_eq!(CALC.from_base("-101", 2).unwrap(), "-5");
        assert_eq!(CALC.to_base("255", 16).unwrap(), "ff");
        assert_eq!(CALC.to_base("-5", 2).unwrap(), "-101");
        assert_eq!(CALC.to_base("0", 36).unwrap(), "0");
        assert_eq!(CALC.to_base("35", 36).unwrap(), "z");
        assert!(CALC.from_base("12", 37).is_err());
        assert!(CALC.from_base("2", 2).is_err());
        assert!(CALC.from_base("", 10).is_err());
    }

    #[test]
    fn arbitrary_base_round_trip() {
        let alphabet = b"abcdef";
        let digits = CALC.to_arbitrary_base("1000", alphabet, 6).unwrap();
        assert_eq!(
            CALC.from_arbitrary_base(&digits, alphabet, 6).unwrap(),
            "1000"
        );
        assert_eq!(CALC.to_arbitrary_base("0", alphabet, 6).unwrap(), b"a");
        assert!(CALC.to_arbitrary_base("-1", alphabet, 6).is_err());
        assert!(CALC.from_arbitrary_base(b"xyz", alphabet, 6).is_err());
    }
}
