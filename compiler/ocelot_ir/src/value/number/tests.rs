#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn num(text: &str) -> Number {
    text.parse().unwrap()
}

#[test]
fn equality_ignores_representation() {
    assert_eq!(num("1.0"), num("1.00"));
    assert_eq!(num("1"), num("1.000"));
    assert!(num("0.1") < num("0.10000001"));
}

#[test]
fn display_strips_trailing_zeros() {
    assert_eq!(num("1.50").to_string(), "1.5");
    assert_eq!(num("100").to_string(), "100");
    assert_eq!(num("1E+2").to_string(), "100");
    assert_eq!(num("-0.0025").to_string(), "-0.0025");
    assert_eq!(num("0.000").to_string(), "0");
    assert_eq!(num("-12.340").to_string(), "-12.34");
}

#[test]
fn arithmetic_is_exact() {
    assert_eq!(num("0.1").add(&num("0.2")), num("0.3"));
    assert_eq!(num("1.5").mul(&num("1.5")), num("2.25"));
    assert_eq!(num("10").sub(&num("0.01")), num("9.99"));
}

#[test]
fn quot_rem_truncates_at_places() {
    let (q, r) = num("10").quot_rem(&num("3"), 2).unwrap();
    assert_eq!(q, num("3.33"));
    assert_eq!(r, num("0.01"));

    let (q, r) = num("-7").quot_rem(&num("2"), 0).unwrap();
    assert_eq!(q, num("-3"));
    assert_eq!(r, num("-1"));

    let (q, r) = num("1234").quot_rem(&num("1"), -2).unwrap();
    assert_eq!(q, num("1200"));
    assert_eq!(r, num("34"));
}

#[test]
fn division_by_zero_is_none() {
    assert!(num("1").quot_rem(&Number::zero(), 2).is_none());
    assert!(num("1").div(&Number::zero()).is_none());
}

#[test]
fn precision_beyond_the_cap_is_none() {
    let limit = Number::MAX_PLACES;
    assert!(num("1").quot_rem(&num("3"), limit).is_some());
    assert!(num("1").quot_rem(&num("3"), limit + 1).is_none());
    assert!(num("1").quot_rem(&num("3"), -limit - 1).is_none());
    assert!(num("1").quot_rem(&num("3"), 1_000_000_000_000).is_none());
    assert!(num("1").quot_rem(&num("3"), i64::MIN).is_none());
}

#[test]
fn default_division() {
    assert_eq!(num("1").div(&num("4")).unwrap(), num("0.25"));
    assert_eq!(num("10").div(&num("4")).unwrap().to_string(), "2.5");
}

#[test]
fn trunc_i64_drops_fraction() {
    assert_eq!(num("2.9").trunc_i64(), Some(2));
    assert_eq!(num("-2.9").trunc_i64(), Some(-2));
}

fn decimal_strategy() -> impl Strategy<Value = Number> {
    (-1_000_000_000i64..1_000_000_000, 0i64..6).prop_map(|(d, s)| Number::from_scaled(d, s))
}

proptest! {
    #[test]
    fn quot_rem_identity(
        a in decimal_strategy(),
        b in decimal_strategy().prop_filter("non-zero divisor", |b| !b.is_zero()),
        places in -3i64..8,
    ) {
        let (q, r) = a.quot_rem(&b, places).unwrap();
        prop_assert_eq!(q.mul(&b).add(&r), a);
    }

    #[test]
    fn rendering_reparses_to_same_value(a in decimal_strategy()) {
        prop_assert_eq!(num(&a.to_string()), a);
    }
}
