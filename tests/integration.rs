//! End-to-end scenarios against the crate's public surface: the concrete
//! add/sub/mul/div/pow_mod/fib examples and the Diffie-Hellman commutativity
//! property.

use bigint_core::biginteger::barrett::BarrettReducer;
use bigint_core::biginteger::div::div_rem;
use bigint_core::biginteger::hex::from_hex_string;
use bigint_core::biginteger::mul::mul;
use bigint_core::biginteger::pow::pow_mod;
use bigint_core::fibonacci::fibonacci;
use bigint_core::primes::generate_prime;
use bigint_core::{BigInt, RandomSource};

/// A small deterministic splitmix64-style generator, standing in for the
/// crate's `OsRandomSource` so these tests are reproducible. Good enough
/// entropy for exercising the prime generator and random sampling; not
/// suitable for anything security-sensitive.
struct DeterministicSource(u64);

impl DeterministicSource {
    fn seeded(seed: u64) -> DeterministicSource {
        DeterministicSource(seed)
    }
}

impl RandomSource for DeterministicSource {
    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        (z ^ (z >> 31)) as u32
    }
}

fn rng() -> DeterministicSource {
    DeterministicSource::seeded(0xC0FFEE_u64)
}

/// Exercises the `trace!`/`debug!` call sites in `mul` and `generate_prime`
/// under an installed subscriber, so the instrumentation is more than dead
/// weight: a dropped or malformed `tracing` call would panic here.
#[test]
fn tracing_calls_do_not_panic_under_a_real_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let a = from_hex_string("FFFFFFFFFFFFFFFF");
    let b = from_hex_string("FFFFFFFFFFFFFFFF");
    let _ = mul(&a, &b);

    let mut r = rng();
    let _ = generate_prime(64, &mut r);
}

#[test]
fn add_ffffffff_plus_1_carries_into_a_new_slot() {
    let a = from_hex_string("FFFFFFFF");
    let b = BigInt::from_u32(1);
    assert_eq!(format!("{}", &a + &b), "0x0000000100000000");
}

#[test]
fn sub_1_minus_ffffffff_is_negative() {
    let a = BigInt::from_u32(1);
    let b = from_hex_string("FFFFFFFF");
    assert_eq!(format!("{}", &a - &b), "-0xFFFFFFFE");
}

#[test]
fn mul_of_two_64_bit_all_ones_values() {
    let a = from_hex_string("FFFFFFFFFFFFFFFF");
    let b = from_hex_string("FFFFFFFFFFFFFFFF");
    assert_eq!(format!("{}", mul(&a, &b)), "0xFFFFFFFFFFFFFFFE0000000000000001");
}

#[test]
fn div_and_mod_of_a_round_dividend() {
    let a = from_hex_string("100000000");
    let b = from_hex_string("FF");
    let (q, r) = div_rem(&a, &b).unwrap();
    assert_eq!(format!("{}", q), "0x01010101");
    assert_eq!(format!("{}", r), "0x00000001");
}

#[test]
fn pow_mod_of_two_with_a_modulus_of_known_order() {
    // 2^8 == -1 (mod 257), so 2 has order 16 and 2^255 reduces to 2^15 == 129.
    let base = BigInt::from_u32(2);
    let exp = from_hex_string("FF");
    let modulus = from_hex_string("101");
    assert_eq!(pow_mod(&base, &exp, &modulus).unwrap(), BigInt::from_u32(129));
}

#[test]
fn fib_100_is_354224848179261915075() {
    assert_eq!(format!("{}", fibonacci(100)), "0x00000001CFA62F21C68F146F");
}

#[test]
fn barrett_reduction_matches_schoolbook_modulo() {
    let mut r = rng();
    let n = generate_prime(96, &mut r);
    let a = BigInt::random(200, &mut r);
    let reducer = BarrettReducer::build(&n).unwrap();
    let via_barrett = reducer.reduce(&a).unwrap();
    let via_schoolbook = bigint_core::biginteger::div::rem(&a, &n).unwrap();
    assert_eq!(via_barrett, via_schoolbook);
}

/// Diffie-Hellman commutativity: (g^a mod p)^b mod p == (g^b mod p)^a mod p,
/// for a real (probabilistically) prime modulus.
#[test]
fn diffie_hellman_key_exchange_agrees_both_ways() {
    let mut r = rng();
    let p = generate_prime(384, &mut r);
    let g = BigInt::from_u32(2);
    let a = BigInt::random(128, &mut r);
    let b = BigInt::random(128, &mut r);

    let g_a = pow_mod(&g, &a, &p).unwrap();
    let g_b = pow_mod(&g, &b, &p).unwrap();

    let shared_from_alice = pow_mod(&g_a, &b, &p).unwrap();
    let shared_from_bob = pow_mod(&g_b, &a, &p).unwrap();

    assert_eq!(shared_from_alice, shared_from_bob);
}
