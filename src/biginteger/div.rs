//! Division and remainder.
//!
//! Grounded on `examples/original_source/big_int.c`'s `big_int_div_to`: a
//! binary shift-subtract long division. The divisor is shifted left until
//! its bit length matches the dividend's, then repeatedly subtracted and
//! walked back down one bit at a time, setting one quotient bit per
//! subtraction — the schoolbook algorithm taught with slots instead of
//! decimal digits.

use super::shift::{shift_left_assign, shift_right_assign};
use super::{trim, BigInt};
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::ops::{Div, Rem};

/// Quotient and remainder of `|a| / |b|`, both non-negative. `b` must be
/// non-zero; callers check that at the signed boundary.
fn div_rem_magnitude(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    match BigInt::compare_magnitude(a, b) {
        Ordering::Equal => return (BigInt::from_u32(1), BigInt::zero()),
        Ordering::Less => return (BigInt::zero(), a.clone()),
        Ordering::Greater => {}
    }

    let mut remainder = a.clone();
    let mut divisor = b.clone();
    let mut bit_delta = remainder.bits() - divisor.bits();
    shift_left_assign(&mut divisor, bit_delta);
    while BigInt::compare_magnitude(&remainder, &divisor) == Ordering::Less {
        shift_right_assign(&mut divisor, 1);
        bit_delta -= 1;
    }

    let mut quotient = BigInt::zero();
    quotient.reserve(bit_delta / 32 + 1);
    let top_bit = bit_delta;

    loop {
        quotient.digits_set_bit(bit_delta);
        remainder
            .sub_assign_magnitude(&divisor)
            .expect("divisor <= remainder by construction");
        while BigInt::compare_magnitude(&divisor, &remainder) == Ordering::Greater && bit_delta > 0
        {
            shift_right_assign(&mut divisor, 1);
            bit_delta -= 1;
        }
        if bit_delta == 0 && BigInt::compare_magnitude(&divisor, &remainder) == Ordering::Greater {
            break;
        }
    }

    let quotient_slots_used = top_bit / 32 + 1;
    let (used, bits) = trim(quotient.slots_padded(quotient_slots_used), quotient_slots_used);
    quotient.set_used_bits(used, bits);
    (quotient, remainder)
}

/// `(a / b, a % b)`, truncating toward zero: the quotient's sign is the
/// xor of the operand signs, and the remainder keeps the dividend's sign
/// (`a == b * (a/b) + a%b`, `|a%b| < |b|`).
pub fn div_rem(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
    if b.is_zero() {
        return Err(Error::DivisionByZero);
    }
    if a.is_zero() {
        return Ok((BigInt::zero(), BigInt::zero()));
    }
    let (mut q, mut r) = div_rem_magnitude(a, b);
    q.apply_sign(a.sign().xor(b.sign()));
    r.apply_sign(a.sign());
    Ok((q, r))
}

pub fn div(a: &BigInt, b: &BigInt) -> Result<BigInt> {
    div_rem(a, b).map(|(q, _)| q)
}

pub fn rem(a: &BigInt, b: &BigInt) -> Result<BigInt> {
    div_rem(a, b).map(|(_, r)| r)
}

/// Operator form of [`div`]; panics on division by zero, same as the
/// primitive integer types' `Div` impls.
impl Div<&BigInt> for &BigInt {
    type Output = BigInt;
    fn div(self, rhs: &BigInt) -> BigInt {
        div(self, rhs).expect("division by zero")
    }
}

impl Div for BigInt {
    type Output = BigInt;
    fn div(self, rhs: BigInt) -> BigInt {
        &self / &rhs
    }
}

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;
    fn rem(self, rhs: &BigInt) -> BigInt {
        rem(self, rhs).expect("division by zero")
    }
}

impl Rem for BigInt {
    type Output = BigInt;
    fn rem(self, rhs: BigInt) -> BigInt {
        &self % &rhs
    }
}

impl BigInt {
    /// Sets bit `idx` of the magnitude directly; used only by long division
    /// while it's building a quotient bit by bit.
    fn digits_set_bit(&mut self, idx: usize) {
        let slot = idx / 32;
        let bit = idx % 32;
        self.reserve(slot + 1);
        self.digits.as_mut_slice()[slot] |= 1 << bit;
    }

    /// A padded view of the first `len` slots, for feeding into `trim`
    /// after `digits_set_bit` has been poking around past `used`.
    fn slots_padded(&self, len: usize) -> &[u32] {
        &self.digits.as_slice()[..len]
    }

    fn sub_assign_magnitude(&mut self, rhs: &BigInt) -> Result<()> {
        super::arithmetic::sub_magnitude(self, rhs)
    }
}
