//! Exponentiation and modular exponentiation.
//!
//! Grounded on `examples/original_source/big_int.c`'s `big_int_pow_to`
//! (plain power, with its `a == 2` shift fast path) and
//! `big_int_pow_mod_to`/`big_int_pow_mod_to_with_barret` (right-to-left
//! square-and-multiply over the exponent's bits).

use super::barrett::BarrettReducer;
use super::div::rem;
use super::mul::mul;
use super::{BigInt, Sign};
use crate::error::{Error, Result};

fn result_sign(base: &BigInt, exponent: &BigInt) -> Sign {
    if base.sign() == Sign::Positive {
        Sign::Positive
    } else if exponent.slots()[0] & 1 == 0 {
        Sign::Positive
    } else {
        Sign::Negative
    }
}

/// `a^e` for a non-negative exponent. `0` and `1` bases short-circuit;
/// base `2` takes the shift fast path (each zero run in `e` becomes one
/// shift instead of one multiply per decrement).
pub fn pow(a: &BigInt, e: &BigInt) -> BigInt {
    if a.is_zero() {
        return BigInt::zero();
    }
    if a.used() == 1 && a.slots()[0] == 1 && a.sign() == Sign::Positive {
        return BigInt::from_u32(1);
    }
    let sign = result_sign(a, e);

    let mut result = if a.used() == 1 && a.slots()[0] == 2 && a.sign() == Sign::Positive {
        let mut result = BigInt::from_u32(1);
        let mut count = e.clone();
        while !count.is_zero() {
            let low = count.slots()[0];
            if low != 0 {
                super::shift::shift_left_assign(&mut result, low as usize);
                let step = BigInt::from_u32(low);
                count -= &step;
            } else {
                super::shift::shift_left_assign(&mut result, 1);
                count -= &BigInt::from_u32(1);
            }
        }
        result
    } else {
        let mut result = BigInt::from_u32(1);
        let mut count = e.clone();
        let one = BigInt::from_u32(1);
        while !count.is_zero() {
            result *= a;
            count -= &one;
        }
        result
    };
    result.apply_sign(sign);
    result
}

/// Right-to-left square-and-multiply core shared by [`pow_mod`] and
/// [`pow_mod_barrett`]. `result` starts out `reduce(1)` rather than a bare
/// `1` so that an exponent of `0` (which never touches `result` again, since
/// no bit of `e` is ever set) still comes back as the correct residue — not
/// just `1` — against a modulus of `1`, where `1 mod 1 == 0`. The `base ==
/// 1` short-circuit returns that same pre-reduced value for the same
/// reason: `1^e mod n` is `1 mod n` regardless of `e`.
fn pow_mod_core<F>(a: &BigInt, e: &BigInt, reduce: F) -> BigInt
where
    F: Fn(&BigInt) -> BigInt,
{
    if a.is_zero() {
        return BigInt::zero();
    }
    let mut base = a.clone();
    let mut result = reduce(&BigInt::from_u32(1));
    if base.used() == 1 && base.slots()[0] == 1 && base.sign() == Sign::Positive {
        return result;
    }
    let mut remaining_bits = e.bits();
    'outer: for &slot in e.slots() {
        for bit_idx in 0..32u32 {
            if slot & (1 << bit_idx) != 0 {
                result = mul(&result, &base);
                result = reduce(&result);
            }
            base = mul(&base, &base);
            base = reduce(&base);
            remaining_bits -= 1;
            if remaining_bits == 0 {
                break 'outer;
            }
        }
    }
    result
}

/// `a^e mod n`, schoolbook reduction at every squaring/multiply step.
/// `n` must be positive (see design notes: the source XORs the modulus's
/// sign into the result, which is not a meaningful residue; this
/// implementation instead fixes the result's sign from the base and the
/// exponent's parity alone and requires a positive modulus).
pub fn pow_mod(a: &BigInt, e: &BigInt, n: &BigInt) -> Result<BigInt> {
    if n.is_zero() {
        return Err(Error::DivisionByZero);
    }
    debug_assert_eq!(n.sign(), Sign::Positive, "modulus must be positive");
    let sign = result_sign(a, e);
    let mut result = pow_mod_core(a, e, |x| rem(x, n).expect("n checked non-zero above"));
    result.apply_sign(sign);
    Ok(result)
}

/// `a^e mod n`, using a precomputed [`BarrettReducer`] at every step
/// instead of long division. `BarrettReducer::reduce` requires its argument
/// to be `>= n` in magnitude (see its doc comment), which a squaring or
/// multiply step's output isn't guaranteed to be (e.g. against a modulus of
/// `1`, or whenever the running value happens to already be the reduced
/// residue) — `reduce_at_least` checks that precondition itself and passes
/// an already-small-enough value through unreduced.
pub fn pow_mod_barrett(a: &BigInt, e: &BigInt, reducer: &BarrettReducer) -> BigInt {
    let sign = result_sign(a, e);
    let mut result = pow_mod_core(a, e, |x| reduce_at_least(reducer, x));
    result.apply_sign(sign);
    result
}

fn reduce_at_least(reducer: &BarrettReducer, x: &BigInt) -> BigInt {
    if BigInt::compare_magnitude(x, reducer.modulus()) == std::cmp::Ordering::Less {
        x.clone()
    } else {
        reducer
            .reduce(x)
            .expect("magnitude checked >= modulus above")
    }
}
