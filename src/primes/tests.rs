use super::*;
use crate::biginteger::hex;
use crate::random::XorShiftRandomSource;

fn rng() -> XorShiftRandomSource {
    XorShiftRandomSource::seeded(*b"primetest0123456")
}

#[test]
fn small_known_primes_pass_miller_rabin() {
    let mut r = rng();
    for &p in &[2u32, 3, 5, 7, 11, 101, 7919] {
        assert!(miller_rabin(&BigInt::from_u32(p), 20, &mut r), "{} should be prime", p);
    }
}

#[test]
fn small_known_composites_fail_miller_rabin() {
    let mut r = rng();
    for &c in &[4u32, 6, 8, 9, 15, 91, 221] {
        assert!(!miller_rabin(&BigInt::from_u32(c), 20, &mut r), "{} should be composite", c);
    }
}

#[test]
fn carmichael_numbers_are_detected_as_composite() {
    let mut r = rng();
    // Smallest known Carmichael numbers: each passes Fermat for every
    // coprime base but must fail Miller-Rabin.
    for &c in &[561u64, 1105, 1729, 2465, 2821, 6601] {
        let n = hex::from_hex_string(&format!("{:X}", c));
        assert!(
            !miller_rabin(&n, 20, &mut r),
            "Carmichael number {} must be rejected by Miller-Rabin",
            c
        );
    }
}

#[test]
fn fermat_can_be_fooled_by_a_carmichael_number_but_miller_rabin_cannot() {
    // 561 = 3 * 11 * 17 is the smallest Carmichael number: it passes
    // Fermat for every base coprime to it.
    let n = BigInt::from_u32(561);
    let a = BigInt::from_u32(2);
    assert!(is_probable_prime_fermat(&n, &a));
    let mut r = rng();
    assert!(!miller_rabin(&n, 20, &mut r));
}

#[test]
fn generate_prime_produces_a_probable_prime_of_the_requested_length() {
    let mut r = rng();
    for _ in 0..3 {
        let p = generate_prime(128, &mut r);
        assert!(p.bits() <= 128);
        assert!(p.bits() >= 120, "candidate should be close to the requested length");
        assert!(miller_rabin(&p, 20, &mut r));
    }
}

#[test]
fn generate_prime_result_is_odd() {
    let mut r = rng();
    let p = generate_prime(96, &mut r);
    assert_eq!(p.slots()[0] & 1, 1);
}

#[test]
fn miller_rabin_witness_agrees_with_miller_rabin_for_a_single_round() {
    let n = BigInt::from_u32(104729); // a real prime
    let reducer = crate::biginteger::barrett::BarrettReducer::build(&n).unwrap();
    let mut r = rng();
    for _ in 0..10 {
        assert!(miller_rabin_witness(&n, &reducer, &mut r));
    }
}
