use super::*;
use crate::random::XorShiftRandomSource;

fn hex(s: &str) -> BigInt {
    hex::from_hex_string(s)
}

fn rng() -> XorShiftRandomSource {
    XorShiftRandomSource::seeded(*b"0123456789abcdef")
}

#[test]
fn add_carries_across_a_slot_boundary() {
    let a = hex("FFFFFFFF");
    let b = BigInt::from_u32(1);
    let sum = &a + &b;
    assert_eq!(format!("{}", sum), "0x0000000100000000");
}

#[test]
fn sub_below_zero_flips_sign() {
    let a = BigInt::from_u32(1);
    let b = hex("FFFFFFFF");
    let diff = &a - &b;
    assert_eq!(diff.sign(), Sign::Negative);
    assert_eq!(format!("{}", diff), "-0xFFFFFFFE");
}

#[test]
fn mul_of_two_64_bit_max_values() {
    let a = hex("FFFFFFFFFFFFFFFF");
    let b = hex("FFFFFFFFFFFFFFFF");
    let product = &a * &b;
    assert_eq!(
        format!("{}", product),
        "0xFFFFFFFFFFFFFFFE0000000000000001"
    );
}

#[test]
fn div_and_mod_of_a_round_dividend() {
    let a = hex("100000000");
    let b = hex("FF");
    let (q, r) = div::div_rem(&a, &b).unwrap();
    assert_eq!(format!("{}", q), "0x01010101");
    assert_eq!(format!("{}", r), "0x00000001");
}

#[test]
fn div_by_zero_is_an_error() {
    let a = BigInt::from_u32(10);
    assert!(div::div_rem(&a, &BigInt::zero()).is_err());
}

#[test]
fn pow_mod_against_a_prime_with_known_order() {
    // 2^8 == -1 (mod 257), so 2 has order 16 and 2^255 == 2^15 (mod 257).
    let base = BigInt::from_u32(2);
    let exp = hex("FF");
    let modulus = hex("101");
    let result = pow::pow_mod(&base, &exp, &modulus).unwrap();
    assert_eq!(result, BigInt::from_u32(129));
}

#[test]
fn pow_mod_matches_repeated_squaring_for_a_small_exponent() {
    let base = BigInt::from_u32(7);
    let modulus = BigInt::from_u32(1_000_003);
    let exp = BigInt::from_u32(13);
    let via_pow_mod = pow::pow_mod(&base, &exp, &modulus).unwrap();
    let mut naive = BigInt::from_u32(1);
    for _ in 0..13 {
        naive = mul::mul(&naive, &base);
        naive = div::rem(&naive, &modulus).unwrap();
    }
    assert_eq!(via_pow_mod, naive);
}

#[test]
fn pow_mod_against_a_modulus_of_one_is_always_zero() {
    let modulus = BigInt::from_u32(1);
    let result = pow::pow_mod(&BigInt::from_u32(5), &BigInt::zero(), &modulus).unwrap();
    assert_eq!(result, BigInt::zero());

    let result = pow::pow_mod(&BigInt::from_u32(1), &BigInt::from_u32(7), &modulus).unwrap();
    assert_eq!(result, BigInt::zero());
}

#[test]
fn barrett_reduce_rejects_an_argument_smaller_than_the_modulus() {
    let reducer = barrett::BarrettReducer::build(&BigInt::from_u32(97)).unwrap();
    assert!(reducer.reduce(&BigInt::from_u32(5)).is_err());
}

#[test]
fn shift_left_then_right_is_identity_when_nothing_falls_off() {
    let a = BigInt::from_u32(0x1234);
    let shifted = (&a << 40) >> 40;
    assert_eq!(shifted, a);
}

#[test]
fn commutativity_of_add_and_mul() {
    let mut r = rng();
    let a = BigInt::random(200, &mut r);
    let b = BigInt::random(140, &mut r);
    assert_eq!(&a + &b, &b + &a);
    assert_eq!(&a * &b, &b * &a);
}

#[test]
fn associativity_of_add_and_mul() {
    let mut r = rng();
    let a = BigInt::random(130, &mut r);
    let b = BigInt::random(90, &mut r);
    let c = BigInt::random(310, &mut r);
    assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
}

#[test]
fn distributivity_of_mul_over_add() {
    let mut r = rng();
    let a = BigInt::random(260, &mut r);
    let b = BigInt::random(260, &mut r);
    let c = BigInt::random(260, &mut r);
    assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
}

#[test]
fn additive_inverse_is_positive_zero() {
    let mut r = rng();
    let a = BigInt::random(512, &mut r);
    let sum = &a + &(-&a);
    assert!(sum.is_zero());
    assert_eq!(sum.sign(), Sign::Positive);
}

#[test]
fn division_identity_holds() {
    let mut r = rng();
    let a = BigInt::random(400, &mut r);
    let b = BigInt::random(150, &mut r);
    let (q, rem) = div::div_rem(&a, &b).unwrap();
    let reconstructed = &(&q * &b) + &rem;
    assert_eq!(reconstructed, a);
    assert_eq!(BigInt::compare_magnitude(&rem, &b), std::cmp::Ordering::Less);
}

#[test]
fn squaring_matches_schoolbook_multiplication_by_self() {
    let mut r = rng();
    let a = BigInt::random(900, &mut r);
    let squared = mul::mul(&a, &a);
    let via_schoolbook_threshold = &a * &a;
    assert_eq!(squared, via_schoolbook_threshold);
}

#[test]
fn karatsuba_and_schoolbook_agree_across_the_threshold() {
    let mut r = rng();
    let a = BigInt::random(800, &mut r);
    let b = BigInt::random(820, &mut r);
    let direct = &a * &b;
    let schoolbook = mul::mul_via_schoolbook_for_test(&a, &b);
    assert_eq!(direct, schoolbook);
}

#[test]
fn canonical_form_after_operations() {
    let mut r = rng();
    let a = BigInt::random(300, &mut r);
    let b = BigInt::random(300, &mut r);
    for value in [&a + &b, &a * &b, &a - &b] {
        let top = value.slots()[value.used() - 1];
        if value.used() > 1 {
            assert_ne!(top, 0);
        }
        if value.is_zero() {
            assert_eq!(value.sign(), Sign::Positive);
        }
    }
}

#[test]
fn print_then_parse_round_trips_magnitude() {
    let mut r = rng();
    let a = BigInt::random(260, &mut r);
    let printed = format!("{}", a);
    let digits = printed.trim_start_matches('-').trim_start_matches("0x");
    let parsed = hex::from_hex_string(digits);
    assert_eq!(parsed, a);
}

#[test]
fn boundary_bit_lengths_round_trip_through_hex() {
    for bits in [32usize, 33, 64, 768, 769, 4096] {
        let mut r = rng();
        let a = BigInt::random(bits, &mut r);
        let printed = format!("{}", a);
        let digits = printed.trim_start_matches("0x");
        assert_eq!(hex::from_hex_string(digits), a);
    }
}

#[test]
fn pow_with_exponent_zero_and_one() {
    let a = BigInt::from_u32(17);
    assert_eq!(pow::pow(&a, &BigInt::zero()), BigInt::from_u32(1));
    assert_eq!(pow::pow(&a, &BigInt::from_u32(1)), a);
}

#[test]
fn subtracting_equal_values_is_zero() {
    let mut r = rng();
    let a = BigInt::random(128, &mut r);
    let diff = &a - &a;
    assert!(diff.is_zero());
    assert_eq!(diff.sign(), Sign::Positive);
}
