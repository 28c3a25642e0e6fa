//! Multiplication: schoolbook, Karatsuba and dedicated squaring, behind one
//! dispatching entry point.
//!
//! Grounded on `examples/original_source/big_int.c`'s
//! `__big_int_mul_plain`/`__big_int_square_plain`/`__big_int_mul_karatsuba`/
//! `__big_int_mul_without_check`/`big_int_mul`.

use super::arithmetic::mac;
use super::{trim, Allocator, BigInt, DigitBuffer, Sign};
use std::ops::{Mul, MulAssign};
use tracing::trace;

const KARATSUBA_THRESHOLD_BITS: usize = 768;

/// Partial-products schoolbook multiplication of two magnitudes.
fn mul_schoolbook(a: &BigInt, b: &BigInt) -> BigInt {
    let result_slots = a.used + b.used;
    let mut digits = DigitBuffer::new_in(super::initial_capacity(result_slots), Allocator::Heap);
    {
        let out = digits.as_mut_slice();
        let a_slots = a.slots();
        let b_slots = b.slots();
        for (i, &av) in a_slots.iter().enumerate() {
            if av == 0 {
                continue;
            }
            let mut carry = 0u32;
            for (j, &bv) in b_slots.iter().enumerate() {
                let (lo, c) = mac(out[i + j], av, bv, carry);
                out[i + j] = lo;
                carry = c;
            }
            out[i + b_slots.len()] = out[i + b_slots.len()].wrapping_add(carry);
        }
    }
    let (used, bits) = trim(digits.as_slice(), result_slots);
    BigInt::from_raw(Sign::Positive, digits, used, bits)
}

/// Dedicated squaring, Handbook of Applied Cryptography Algorithm 14.16:
/// diagonal terms computed once, cross terms doubled and accumulated with
/// a secondary carry array (`c_fix_arr` in the source) to absorb overflow
/// the primary 64-bit running carry alone can't hold.
fn square(x: &BigInt) -> BigInt {
    let t = x.used;
    let result_slots = t * 2;
    let mut digits = DigitBuffer::new_in(super::initial_capacity(result_slots), Allocator::Heap);
    // `carry_fix` is the source's `c_fix_arr`: overflow past the 64-bit
    // accumulator at a given output position, folded back in the next time
    // that position is visited. Rust's `u128` lets the accumulation itself
    // stay in one width instead of the source's manual double-add/shift.
    let mut carry_fix = vec![0u32; result_slots];
    {
        let w = digits.as_mut_slice();
        let xs = x.slots();
        for i in 0..t {
            let uv = (w[2 * i] as u128)
                + ((carry_fix[2 * i] as u128) << 32)
                + (xs[i] as u128) * (xs[i] as u128);
            w[2 * i] = uv as u32;
            carry_fix[2 * i] = 0;
            let mut c = uv >> 32;
            for j in (i + 1)..t {
                let cross = 2u128 * (xs[j] as u128) * (xs[i] as u128);
                let existing = (w[i + j] as u128) + ((carry_fix[i + j] as u128) << 32);
                let uv = existing + cross + c;
                w[i + j] = uv as u32;
                carry_fix[i + j] = 0;
                c = uv >> 32;
            }
            w[i + t] = c as u32;
            carry_fix[i + t] = (c >> 32) as u32;
        }
    }
    let (used, bits) = trim(digits.as_slice(), result_slots);
    BigInt::from_raw(Sign::Positive, digits, used, bits)
}

fn karatsuba_split(num: &BigInt, shift: usize) -> (BigInt, BigInt) {
    let slot_shift = shift / 32;
    let slots = num.slots();
    let low_len = slot_shift.min(slots.len());
    let mut low = BigInt::from_u32(0);
    if low_len > 0 {
        low.reserve(low_len);
        low.digits.as_mut_slice()[..low_len].copy_from_slice(&slots[..low_len]);
        let (used, bits) = trim(low.digits.as_slice(), low_len);
        low.set_used_bits(used, bits);
    }
    let mut high = BigInt::from_u32(0);
    if slots.len() > slot_shift {
        let high_len = slots.len() - slot_shift;
        high.reserve(high_len);
        high.digits.as_mut_slice()[..high_len].copy_from_slice(&slots[slot_shift..]);
        let (used, bits) = trim(high.digits.as_slice(), high_len);
        high.set_used_bits(used, bits);
    }
    (high, low)
}

/// `z2 + z0 - (hi - lo)(hi' - lo')`. The `(hi-lo)(hi'-lo')` intermediate can
/// be negative even though every input to `mul` is a magnitude, so it must
/// go through the signed layer rather than the raw one.
fn mul_karatsuba(num1: &BigInt, num2: &BigInt) -> BigInt {
    let (x, y) = if num1.bits <= num2.bits {
        (num1, num2)
    } else {
        (num2, num1)
    };
    if x.bits * 2 < y.bits {
        return mul_schoolbook(num1, num2);
    }
    let b = y.bits / 2;
    let b = (b | 31) + 1;

    let same = std::ptr::eq(num1, num2);
    let (x1, x0) = karatsuba_split(x, b);
    let (y1, y0) = if same {
        (x1.clone(), x0.clone())
    } else {
        karatsuba_split(y, b)
    };

    let z2 = mul_without_check(&x1, &y1);
    let z0 = mul_without_check(&x0, &y0);

    let t0 = &x1 - &x0;
    let t1 = if same { t0.clone() } else { &y1 - &y0 };
    let cross = mul_without_check(&t0, &t1);

    let mut z1 = &z2 + &z0;
    z1 -= &cross;

    let mut high = z2;
    super::shift::shift_left_assign(&mut high, b * 2);
    let mut mid = z1;
    super::shift::shift_left_assign(&mut mid, b);

    let mut result = high;
    result += &mid;
    result += &z0;
    result
}

fn mul_without_check(num1: &BigInt, num2: &BigInt) -> BigInt {
    let sign = num1.sign.xor(num2.sign);
    let mut result = if std::ptr::eq(num1, num2) {
        trace!(bits = num1.bits, "multiplication dispatch: squaring");
        square(num1)
    } else if num1.bits.min(num2.bits) > KARATSUBA_THRESHOLD_BITS {
        trace!(a_bits = num1.bits, b_bits = num2.bits, "multiplication dispatch: karatsuba");
        mul_karatsuba(num1, num2)
    } else {
        trace!(a_bits = num1.bits, b_bits = num2.bits, "multiplication dispatch: schoolbook");
        mul_schoolbook(num1, num2)
    };
    result.sign = sign;
    if result.is_zero() {
        result.sign = Sign::Positive;
    }
    result
}

/// `self * other`, with the 0/1 short-circuits preserved at the entry
/// point as the source does at `big_int_mul`.
pub fn mul(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::from_u32(0);
    }
    if a.used == 1 && a.digits.as_slice()[0] == 1 && matches!(a.sign, Sign::Positive) {
        return b.clone();
    }
    if b.used == 1 && b.digits.as_slice()[0] == 1 && matches!(b.sign, Sign::Positive) {
        return a.clone();
    }
    mul_without_check(a, b)
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;
    fn mul(self, rhs: &BigInt) -> BigInt {
        mul(self, rhs)
    }
}

impl Mul for BigInt {
    type Output = BigInt;
    fn mul(self, rhs: BigInt) -> BigInt {
        mul(&self, &rhs)
    }
}

impl MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &BigInt) {
        *self = mul(self, rhs);
    }
}

/// Forces the schoolbook path regardless of operand size, for cross-checking
/// against the dispatching entry point around the Karatsuba threshold.
#[cfg(test)]
pub(crate) fn mul_via_schoolbook_for_test(a: &BigInt, b: &BigInt) -> BigInt {
    let sign = a.sign.xor(b.sign);
    let mut result = mul_schoolbook(a, b);
    result.sign = sign;
    if result.is_zero() {
        result.sign = Sign::Positive;
    }
    result
}
