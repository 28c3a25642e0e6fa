use super::*;
use crate::biginteger::hex;

#[test]
fn base_cases() {
    assert_eq!(fibonacci(0), BigInt::from_u32(0));
    assert_eq!(fibonacci(1), BigInt::from_u32(1));
    assert_eq!(fibonacci(2), BigInt::from_u32(1));
}

#[test]
fn small_values_match_the_textbook_sequence() {
    let expected = [0u32, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89];
    for (n, &e) in expected.iter().enumerate() {
        assert_eq!(fibonacci(n as u64), BigInt::from_u32(e), "F({})", n);
    }
}

#[test]
fn recurrence_holds_for_larger_n() {
    for n in 20u64..40 {
        let lhs = &fibonacci(n) + &fibonacci(n + 1);
        assert_eq!(lhs, fibonacci(n + 2));
    }
}

#[test]
fn fib_100_matches_the_known_hex_value() {
    // 354224848179261915075 decimal.
    let expected = hex::from_hex_string("1CFA62F21C68F146F");
    assert_eq!(fibonacci(100), expected);
}
