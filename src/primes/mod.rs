//! Probabilistic prime generation: Fermat and Miller–Rabin compositeness
//! tests layered on top of the big-integer kernel.
//!
//! Grounded on `examples/original_source/big_int_prime.h`'s declared
//! surface (`fermat`, `miller_rabin_pass`, `miller_rabin`,
//! `big_int_new_prime`) — the pack carries this header without its `.c`
//! body, so the bodies here follow the textbook Fermat/Miller-Rabin
//! algorithms directly, using the same factor-`d·2^s`/witness-loop shape
//! the header's parameter list (`num_s_in`, `num_d`) implies.

#[cfg(test)]
mod tests;

use crate::biginteger::barrett::BarrettReducer;
use crate::biginteger::div::rem;
use crate::biginteger::mul::mul;
use crate::biginteger::pow::{pow_mod, pow_mod_barrett};
use crate::biginteger::shift::{shift_left_assign, shift_right_assign};
use crate::biginteger::BigInt;
use crate::random::RandomSource;
use tracing::{debug, trace};

/// Primes below 300, used for cheap trial division before paying for a
/// Miller–Rabin round.
pub const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
];

/// `a^(n-1) ≡ 1 (mod n)`. A necessary but not sufficient condition for
/// primality — Carmichael numbers pass for every base coprime to them,
/// which is exactly why [`miller_rabin`] exists.
pub fn is_probable_prime_fermat(n: &BigInt, a: &BigInt) -> bool {
    let n_minus_1 = dec(n);
    match pow_mod(a, &n_minus_1, n) {
        Ok(r) => r == BigInt::from_u32(1),
        Err(_) => false,
    }
}

fn dec(n: &BigInt) -> BigInt {
    let mut t = n.clone();
    t -= &BigInt::from_u32(1);
    t
}

fn is_even(n: &BigInt) -> bool {
    n.slots()[0] & 1 == 0
}

/// A uniform base in `[2, n-2]`, via a full-width random sample reduced
/// into range. Requires `n > 4`.
fn random_base(n: &BigInt, rng: &mut dyn RandomSource) -> BigInt {
    let mut width = n.clone();
    width -= &BigInt::from_u32(3);
    let sample = BigInt::random(n.bits(), rng);
    let mut a = rem(&sample, &width).unwrap_or_else(|_| BigInt::zero());
    a += &BigInt::from_u32(2);
    a
}

/// One Miller–Rabin round: factor `n-1 = d·2^s` with `d` odd, pick a
/// random base, and check `a^d ≡ 1` or `a^(d·2^r) ≡ -1` for some
/// `0 <= r < s`. `true` means "probably prime"; `false` is a definite
/// composite witness.
///
/// Barrett-accelerated: `reducer` is built once for `n` by the caller
/// ([`miller_rabin`]) and reused across every witness round and every
/// squaring step within a round, so a `k`-round test pays for one division
/// (building `mu`) instead of `O(k · log n)` of them.
pub fn miller_rabin_witness(n: &BigInt, reducer: &BarrettReducer, rng: &mut dyn RandomSource) -> bool {
    let n_minus_1 = dec(n);
    let mut d = n_minus_1.clone();
    let mut s = 0usize;
    while is_even(&d) {
        shift_right_assign(&mut d, 1);
        s += 1;
    }

    let a = random_base(n, rng);
    let mut x = pow_mod_barrett(&a, &d, reducer);
    if x == BigInt::from_u32(1) || x == n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x = mul(&x, &x);
        x = if BigInt::compare_magnitude(&x, reducer.modulus()) == std::cmp::Ordering::Less {
            x
        } else {
            reducer.reduce(&x).expect("magnitude checked >= modulus above")
        };
        if x == n_minus_1 {
            return true;
        }
    }
    false
}

/// Runs `k` independent Miller–Rabin rounds; passes only if every round
/// does. Handles the tiny cases (`n < 2`, even `n`, small primes) directly
/// rather than spending a round on them, and builds one [`BarrettReducer`]
/// for `n` that every round shares.
pub fn miller_rabin(n: &BigInt, k: usize, rng: &mut dyn RandomSource) -> bool {
    if BigInt::compare_magnitude(n, &BigInt::from_u32(2)) == std::cmp::Ordering::Less {
        return false;
    }
    for &p in SMALL_PRIMES {
        let bp = BigInt::from_u32(p);
        if n == &bp {
            return true;
        }
    }
    if is_even(n) {
        return false;
    }
    let reducer = match BarrettReducer::build(n) {
        Ok(r) => r,
        Err(_) => return false,
    };
    (0..k).all(|_| miller_rabin_witness(n, &reducer, rng))
}

/// `n` is divisible by one of [`SMALL_PRIMES`] (and isn't itself that
/// prime).
fn fails_trial_division(n: &BigInt) -> bool {
    for &p in SMALL_PRIMES {
        let bp = BigInt::from_u32(p);
        if n == &bp {
            return false;
        }
        if let Ok(r) = rem(n, &bp) {
            if r.is_zero() {
                return true;
            }
        }
    }
    false
}

/// Rounds for [`miller_rabin`] in [`generate_prime`]: 40 below 1024 bits,
/// 20 at or above. The split costs nothing for the small-modulus case
/// `generate_prime` is usually asked for (Diffie-Hellman-style 128-512 bit
/// primes) and still keeps the false-positive probability negligible at
/// cryptographic sizes.
fn miller_rabin_rounds(bit_length: usize) -> usize {
    if bit_length < 1024 {
        40
    } else {
        20
    }
}

/// Samples random `bit_length`-bit odd candidates (top and bottom bit
/// forced set) until one survives trial division and Miller–Rabin.
pub fn generate_prime(bit_length: usize, rng: &mut dyn RandomSource) -> BigInt {
    let rounds = miller_rabin_rounds(bit_length);
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let mut candidate = BigInt::random(bit_length, rng);
        if is_even(&candidate) {
            candidate += &BigInt::from_u32(1);
        }
        if candidate.bits() < bit_length {
            let mut top_bit = BigInt::from_u32(1);
            shift_left_assign(&mut top_bit, bit_length - 1);
            candidate += &top_bit;
        }
        if fails_trial_division(&candidate) {
            trace!(attempts, "candidate rejected by trial division");
            continue;
        }
        if miller_rabin(&candidate, rounds, rng) {
            debug!(bit_length, attempts, "accepted probable prime");
            return candidate;
        }
        trace!(attempts, "candidate rejected by miller-rabin");
    }
}
