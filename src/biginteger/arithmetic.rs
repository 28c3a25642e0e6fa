//! Carry-propagating limb primitives, and the "raw" (magnitude-only) and
//! signed-dispatch addition/subtraction layers.
//!
//! Grounded on `examples/original_source/big_int.c`'s `big_int_add_to_raw`/
//! `big_int_sub_to_raw` (the magnitude layer) and `big_int_add_to`/
//! `big_int_sub_to` (the sign-pair dispatch above it).

use super::{trim, BigInt, Sign, BITS_PER_SLOT};
use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// `a + b + carry`, returning `(sum, carry_out)`.
#[inline]
pub(crate) fn adc(a: u32, b: u32, carry: u32) -> (u32, u32) {
    let sum = a as u64 + b as u64 + carry as u64;
    (sum as u32, (sum >> BITS_PER_SLOT) as u32)
}

/// `a - b - borrow`, returning `(diff, borrow_out)` where `borrow_out` is 1
/// iff the subtraction underflowed.
#[inline]
pub(crate) fn sbb(a: u32, b: u32, borrow: u32) -> (u32, u32) {
    let (d1, o1) = a.overflowing_sub(b);
    let (d2, o2) = d1.overflowing_sub(borrow);
    (d2, (o1 || o2) as u32)
}

/// `a*b + c + carry`, returning `(low, carry_out)`. Used by the
/// multiplication family.
#[inline]
pub(crate) fn mac(c: u32, a: u32, b: u32, carry: u32) -> (u32, u32) {
    let t = c as u64 + (a as u64) * (b as u64) + carry as u64;
    (t as u32, (t >> BITS_PER_SLOT) as u32)
}

/// `a.magnitude += b.magnitude`, ignoring both signs. Grows `a`'s buffer as
/// needed (capacity for `max(bits)+1` slots, to hold a possible carry into
/// a new top slot) and recomputes `used`/`bits` via an explicit trim step
/// rather than trusting a zero final carry.
pub(crate) fn add_magnitude(a: &mut BigInt, b: &BigInt) {
    let needed_bits = a.bits.max(b.bits) + 1;
    let needed_slots = (needed_bits + BITS_PER_SLOT - 1) / BITS_PER_SLOT;
    a.reserve(needed_slots);
    let op_len = a.used.max(b.used);
    let mut carry = 0u32;
    {
        let a_slots = a.digits.as_mut_slice();
        let b_slots = b.slots();
        for i in 0..op_len {
            let bv = b_slots.get(i).copied().unwrap_or(0);
            let (sum, c) = adc(a_slots[i], bv, carry);
            a_slots[i] = sum;
            carry = c;
        }
        if carry != 0 {
            a_slots[op_len] = carry;
        }
    }
    let used = op_len + usize::from(carry != 0);
    let (used, bits) = trim(a.digits.as_slice(), used);
    a.set_used_bits(used, bits);
}

/// `a.magnitude -= b.magnitude`. Requires `a >= b` in magnitude (checked);
/// `a == b` and `b == 0` take the shortcuts the source takes.
pub(crate) fn sub_magnitude(a: &mut BigInt, b: &BigInt) -> Result<()> {
    if BigInt::compare_magnitude(a, b) == Ordering::Less {
        return Err(Error::PreconditionViolation(
            "sub_magnitude requires a's magnitude to be >= b's",
        ));
    }
    if b.is_zero() {
        return Ok(());
    }
    if BigInt::compare_magnitude(a, b) == Ordering::Equal {
        for slot in a.digits.as_mut_slice().iter_mut() {
            *slot = 0;
        }
        a.set_used_bits(1, 1);
        return Ok(());
    }
    let op_len = a.used;
    let mut borrow = 0u32;
    {
        let a_slots = a.digits.as_mut_slice();
        let b_slots = b.slots();
        for i in 0..op_len {
            let bv = b_slots.get(i).copied().unwrap_or(0);
            let (diff, brw) = sbb(a_slots[i], bv, borrow);
            a_slots[i] = diff;
            borrow = brw;
        }
    }
    debug_assert_eq!(borrow, 0, "a >= b was checked above");
    let (used, bits) = trim(a.digits.as_slice(), op_len);
    a.set_used_bits(used, bits);
    Ok(())
}

/// Signed addition, in place: resolves the sign-pair cases (same-sign adds
/// magnitudes, opposite-sign subtracts the smaller magnitude from the
/// larger and takes the larger operand's sign).
pub(crate) fn signed_add_assign(a: &mut BigInt, b: &BigInt) {
    if a.sign == b.sign {
        add_magnitude(a, b);
        return;
    }
    match BigInt::compare_magnitude(a, b) {
        Ordering::Greater | Ordering::Equal => {
            let keep_sign = a.sign;
            sub_magnitude(a, b).expect("a >= b by compare_magnitude");
            a.sign = keep_sign;
        }
        Ordering::Less => {
            let mut result = b.clone();
            sub_magnitude(&mut result, a).expect("b > a by compare_magnitude");
            result.sign = b.sign;
            *a = result;
        }
    }
    if a.is_zero() {
        a.sign = Sign::Positive;
    }
}

/// Signed subtraction: `a - b = a + (-b)`.
pub(crate) fn signed_sub_assign(a: &mut BigInt, b: &BigInt) {
    let mut neg_b = b.clone();
    if !neg_b.is_zero() {
        neg_b.sign = neg_b.sign.negate();
    }
    signed_add_assign(a, &neg_b);
}

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &BigInt) {
        signed_add_assign(self, rhs);
    }
}

impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: &BigInt) {
        signed_sub_assign(self, rhs);
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;
    fn add(self, rhs: &BigInt) -> BigInt {
        let mut result = self.clone();
        result += rhs;
        result
    }
}

impl Add for BigInt {
    type Output = BigInt;
    fn add(self, rhs: BigInt) -> BigInt {
        &self + &rhs
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;
    fn sub(self, rhs: &BigInt) -> BigInt {
        let mut result = self.clone();
        result -= rhs;
        result
    }
}

impl Sub for BigInt {
    type Output = BigInt;
    fn sub(self, rhs: BigInt) -> BigInt {
        &self - &rhs
    }
}

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(mut self) -> BigInt {
        if !self.is_zero() {
            self.sign = self.sign.negate();
        }
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        -(self.clone())
    }
}
