//! Left/right bit shifts.
//!
//! Grounded on `examples/original_source/big_int.c`'s
//! `big_int_left_shift`/`big_int_right_shift`: split the shift amount into
//! a whole-slot part and a sub-slot bit part, move slots first, then ripple
//! the remaining bits through a two-slot read window.

use super::{trim, BigInt, BITS_PER_SLOT};
use std::ops::{Shl, Shr};

/// `x <<= bits`. Grows the buffer to fit, shifts whole slots up, then
/// shifts the remaining `0..32` bits through adjacent slot pairs.
pub(crate) fn shift_left_assign(x: &mut BigInt, bits: usize) {
    if bits == 0 || x.is_zero() {
        return;
    }
    let slot_delta = bits / BITS_PER_SLOT;
    let bit_delta = bits % BITS_PER_SLOT;
    let needed_bits = x.bits + bits;
    let needed_slots = (needed_bits + BITS_PER_SLOT) / BITS_PER_SLOT + 1;
    x.reserve(needed_slots);

    let old_used = x.used;
    {
        let slots = x.digits.as_mut_slice();
        if slot_delta > 0 {
            for i in (0..old_used).rev() {
                slots[i + slot_delta] = slots[i];
            }
            for slot in slots.iter_mut().take(slot_delta) {
                *slot = 0;
            }
        }
        let new_used = old_used + slot_delta;
        if bit_delta > 0 {
            slots[new_used] = 0;
            for i in (1..=new_used).rev() {
                let hi = slots[i] << bit_delta;
                let lo = (slots[i - 1] as u64 >> (BITS_PER_SLOT - bit_delta)) as u32;
                slots[i] = hi | lo;
            }
            slots[slot_delta] <<= bit_delta;
        }
    }
    let used_upper_bound = old_used + slot_delta + 1;
    let (used, bits) = trim(x.digits.as_slice(), used_upper_bound);
    x.set_used_bits(used, bits);
}

/// `x >>= bits`. Symmetric to [`shift_left_assign`]; dropping to zero
/// resets `used`/`bits` to `1`/`1`.
pub(crate) fn shift_right_assign(x: &mut BigInt, bits: usize) {
    if bits == 0 || x.is_zero() {
        return;
    }
    let slot_delta = bits / BITS_PER_SLOT;
    let bit_delta = bits % BITS_PER_SLOT;

    if slot_delta >= x.used {
        for slot in x.digits.as_mut_slice()[..x.used].iter_mut() {
            *slot = 0;
        }
        x.set_used_bits(1, 1);
        return;
    }

    let old_used = x.used;
    {
        let slots = x.digits.as_mut_slice();
        if slot_delta > 0 {
            for i in 0..(old_used - slot_delta) {
                slots[i] = slots[i + slot_delta];
            }
            for slot in slots.iter_mut().take(old_used).skip(old_used - slot_delta) {
                *slot = 0;
            }
        }
        let new_used = old_used - slot_delta;
        if bit_delta > 0 {
            for i in 0..new_used {
                let next = if i + 1 < new_used { slots[i + 1] } else { 0 };
                let lo = slots[i] >> bit_delta;
                let hi = (next as u64) << (BITS_PER_SLOT - bit_delta);
                slots[i] = lo | (hi as u32);
            }
        }
    }
    let new_used = old_used - slot_delta;
    let (used, bits) = trim(x.digits.as_slice(), new_used);
    x.set_used_bits(used, bits);
}

/// Shifts are only defined for non-negative, `usize`-representable
/// amounts. A negative shift count can't be expressed by a `usize` in the
/// first place; callers converting from a signed count should use
/// `TryFrom` and handle the conversion error themselves rather than have
/// this impl re-check a precondition the type system already rules out.
impl Shl<usize> for BigInt {
    type Output = BigInt;
    fn shl(mut self, rhs: usize) -> BigInt {
        shift_left_assign(&mut self, rhs);
        self
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;
    fn shr(mut self, rhs: usize) -> BigInt {
        shift_right_assign(&mut self, rhs);
        self
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;
    fn shl(self, rhs: usize) -> BigInt {
        self.clone() << rhs
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;
    fn shr(self, rhs: usize) -> BigInt {
        self.clone() >> rhs
    }
}
