//! Kernel law tests: the portable and num-bigint backends must be
//! indistinguishable, and both must satisfy the arithmetic contracts
//! (division identity, Euclidean modulo, floor square root, round trips).

use apnum_calc::{BigintCalculator, Calculator, PortableCalculator, RoundingMode};
use proptest::prelude::*;
use std::cmp::Ordering;

const PORTABLE: PortableCalculator = PortableCalculator;
const BIGINT: BigintCalculator = BigintCalculator;

const MODES: [RoundingMode; 10] = [
    RoundingMode::Unnecessary,
    RoundingMode::Up,
    RoundingMode::Down,
    RoundingMode::Ceiling,
    RoundingMode::Floor,
    RoundingMode::HalfUp,
    RoundingMode::HalfDown,
    RoundingMode::HalfCeiling,
    RoundingMode::HalfFloor,
    RoundingMode::HalfEven,
];

// ── Strategies ───────────────────────────────────────────────────────────────

fn canonical() -> impl Strategy<Value = String> {
    (any::<bool>(), proptest::collection::vec(0u8..10, 1..40)).prop_map(|(neg, ds)| {
        let mag: String = ds.iter().map(|&d| (b'0' + d) as char).collect();
        let mag = mag.trim_start_matches('0');
        let mag = if mag.is_empty() { "0" } else { mag };
        if neg && mag != "0" {
            format!("-{mag}")
        } else {
            mag.to_string()
        }
    })
}

fn nonzero() -> impl Strategy<Value = String> {
    canonical().prop_filter("nonzero", |s| s != "0")
}

fn positive() -> impl Strategy<Value = String> {
    canonical().prop_map(|s| {
        let mag = s.trim_start_matches('-');
        if mag == "0" {
            "1".to_string()
        } else {
            mag.to_string()
        }
    })
}

fn non_negative() -> impl Strategy<Value = String> {
    canonical().prop_map(|s| s.trim_start_matches('-').to_string())
}

fn is_neg(s: &str) -> bool {
    s.starts_with('-')
}

fn mag(s: &str) -> &str {
    s.trim_start_matches('-')
}

// ── Backend equivalence ──────────────────────────────────────────────────────

proptest! {
    /// Ring operations agree between backends.
    #[test]
    fn prop_ring_ops_agree(a in canonical(), b in canonical()) {
        prop_assert_eq!(PORTABLE.add(&a, &b), BIGINT.add(&a, &b));
        prop_assert_eq!(PORTABLE.sub(&a, &b), BIGINT.sub(&a, &b));
        prop_assert_eq!(PORTABLE.mul(&a, &b), BIGINT.mul(&a, &b));
        prop_assert_eq!(PORTABLE.neg(&a), BIGINT.neg(&a));
        prop_assert_eq!(PORTABLE.cmp(&a, &b), BIGINT.cmp(&a, &b));
    }

    /// Truncated division: backends agree, and q·b + r = a with |r| < |b|
    /// and the remainder carrying the dividend's sign.
    #[test]
    fn prop_division_identity(a in canonical(), b in nonzero()) {
        let (q, r) = PORTABLE.div_qr(&a, &b).unwrap();
        prop_assert_eq!((q.clone(), r.clone()), BIGINT.div_qr(&a, &b).unwrap());
        let back = PORTABLE.add(&PORTABLE.mul(&q, &b), &r);
        prop_assert_eq!(back, a.clone());
        prop_assert_eq!(
            PORTABLE.cmp(mag(&r), mag(&b)),
            Ordering::Less,
            "|r| must be < |b|"
        );
        if r != "0" {
            prop_assert_eq!(is_neg(&r), is_neg(&a), "remainder sign follows dividend");
        }
    }

    /// Rounded division agrees between backends for every mode, and the
    /// rounded quotient is within one of the truncated quotient.
    #[test]
    fn prop_div_round_agrees(a in canonical(), b in nonzero(), mode_ix in 0usize..10) {
        let mode = MODES[mode_ix];
        let portable = PORTABLE.div_round(&a, &b, mode);
        let bigint = BIGINT.div_round(&a, &b, mode);
        prop_assert_eq!(portable.clone(), bigint);
        if let Ok(rounded) = portable {
            let (q, _) = PORTABLE.div_qr(&a, &b).unwrap();
            let diff = PORTABLE.sub(&rounded, &q);
            prop_assert!(matches!(diff.as_str(), "0" | "1" | "-1"));
        }
    }

    /// gcd/lcm agree and gcd divides both operands.
    #[test]
    fn prop_gcd_lcm(a in canonical(), b in canonical()) {
        let g = PORTABLE.gcd(&a, &b);
        prop_assert_eq!(g.clone(), BIGINT.gcd(&a, &b));
        prop_assert_eq!(PORTABLE.lcm(&a, &b), BIGINT.lcm(&a, &b));
        if g != "0" {
            prop_assert_eq!(PORTABLE.div_qr(&a, &g).unwrap().1, "0".to_string());
            prop_assert_eq!(PORTABLE.div_qr(&b, &g).unwrap().1, "0".to_string());
        }
    }

    /// Floor square root: backends agree and s² ≤ n < (s+1)².
    #[test]
    fn prop_sqrt_floor(n in non_negative()) {
        let s = PORTABLE.sqrt(&n).unwrap();
        prop_assert_eq!(s.clone(), BIGINT.sqrt(&n).unwrap());
        let low = PORTABLE.mul(&s, &s);
        let next = PORTABLE.add(&s, "1");
        let high = PORTABLE.mul(&next, &next);
        prop_assert_ne!(PORTABLE.cmp(&low, &n), Ordering::Greater);
        prop_assert_eq!(PORTABLE.cmp(&high, &n), Ordering::Greater);
    }

    /// Euclidean modulo: backends agree and the result lies in [0, m).
    #[test]
    fn prop_modulo(a in canonical(), m in positive()) {
        let r = PORTABLE.modulo(&a, &m).unwrap();
        prop_assert_eq!(r.clone(), BIGINT.modulo(&a, &m).unwrap());
        prop_assert!(!is_neg(&r));
        prop_assert_eq!(PORTABLE.cmp(&r, &m), Ordering::Less);
    }

    /// Modular inverse: backends agree; when it exists, a·inv ≡ 1 (mod m).
    #[test]
    fn prop_mod_inverse(a in canonical(), m in positive()) {
        let portable = PORTABLE.mod_inverse(&a, &m);
        let bigint = BIGINT.mod_inverse(&a, &m);
        prop_assert_eq!(portable.clone(), bigint);
        if let Ok(inv) = portable {
            let product = PORTABLE.mul(&a, &inv);
            let one = PORTABLE.modulo(&product, &m).unwrap();
            let expected = if m == "1" { "0" } else { "1" };
            prop_assert_eq!(one, expected.to_string());
        }
    }

    /// Modular exponentiation agrees with the naive pow-then-mod route.
    #[test]
    fn prop_mod_pow(base in canonical(), exp in 0u64..40, m in positive()) {
        let exp_str = exp.to_string();
        let fast = PORTABLE.mod_pow(&base, &exp_str, &m).unwrap();
        prop_assert_eq!(fast.clone(), BIGINT.mod_pow(&base, &exp_str, &m).unwrap());
        let slow = PORTABLE.modulo(&PORTABLE.pow(&base, exp), &m).unwrap();
        prop_assert_eq!(fast, slow);
    }

    /// Bitwise ops agree between backends and obey the sign rules.
    #[test]
    fn prop_bitwise(a in canonical(), b in canonical()) {
        let and = PORTABLE.bit_and(&a, &b);
        let or = PORTABLE.bit_or(&a, &b);
        let xor = PORTABLE.bit_xor(&a, &b);
        prop_assert_eq!(and.clone(), BIGINT.bit_and(&a, &b));
        prop_assert_eq!(or.clone(), BIGINT.bit_or(&a, &b));
        prop_assert_eq!(xor.clone(), BIGINT.bit_xor(&a, &b));
        prop_assert_eq!(is_neg(&and), is_neg(&a) && is_neg(&b));
        prop_assert_eq!(is_neg(&or), is_neg(&a) || is_neg(&b));
        prop_assert_eq!(is_neg(&xor), is_neg(&a) != is_neg(&b));
    }

    /// Base 2–36 round trip on both backends.
    #[test]
    fn prop_base_round_trip(n in canonical(), base in 2u32..=36) {
        let text = PORTABLE.to_base(&n, base).unwrap();
        prop_assert_eq!(text.clone(), BIGINT.to_base(&n, base).unwrap());
        prop_assert_eq!(PORTABLE.from_base(&text, base).unwrap(), n.clone());
        prop_assert_eq!(BIGINT.from_base(&text, base).unwrap(), n.clone());
        // input is case-insensitive
        prop_assert_eq!(PORTABLE.from_base(&text.to_uppercase(), base).unwrap(), n);
    }

    /// Arbitrary-base byte digits round trip on both backends.
    #[test]
    fn prop_arbitrary_base_round_trip(n in non_negative(), base in 2u32..=36) {
        let alphabet: Vec<u8> = (b'A'..=b'Z').chain(b'0'..=b'9').collect();
        let digits = PORTABLE.to_arbitrary_base(&n, &alphabet, base).unwrap();
        prop_assert_eq!(digits.clone(), BIGINT.to_arbitrary_base(&n, &alphabet, base).unwrap());
        prop_assert_eq!(PORTABLE.from_arbitrary_base(&digits, &alphabet, base).unwrap(), n.clone());
        prop_assert_eq!(BIGINT.from_arbitrary_base(&digits, &alphabet, base).unwrap(), n);
    }

    /// Exponentiation agrees and matches repeated multiplication.
    #[test]
    fn prop_pow(a in canonical(), e in 0u64..12) {
        let fast = PORTABLE.pow(&a, e);
        prop_assert_eq!(fast.clone(), BIGINT.pow(&a, e));
        let mut slow = "1".to_string();
        for _ in 0..e {
            slow = PORTABLE.mul(&slow, &a);
        }
        prop_assert_eq!(fast, slow);
    }
}

// ── Pinned cases ─────────────────────────────────────────────────────────────

#[test]
fn unnecessary_passes_exact_division() {
    for calc in [&PORTABLE as &dyn Calculator, &BIGINT as &dyn Calculator] {
        assert_eq!(
            calc.div_round("-24", "6", RoundingMode::Unnecessary).unwrap(),
            "-4"
        );
        assert!(calc.div_round("-25", "6", RoundingMode::Unnecessary).is_err());
    }
}

#[test]
fn half_even_is_bankers() {
    for calc in [&PORTABLE as &dyn Calculator, &BIGINT as &dyn Calculator] {
        assert_eq!(calc.div_round("25", "10", RoundingMode::HalfEven).unwrap(), "2");
        assert_eq!(calc.div_round("35", "10", RoundingMode::HalfEven).unwrap(), "4");
        assert_eq!(calc.div_round("-25", "10", RoundingMode::HalfEven).unwrap(), "-2");
        assert_eq!(calc.div_round("-35", "10", RoundingMode::HalfEven).unwrap(), "-4");
    }
}
