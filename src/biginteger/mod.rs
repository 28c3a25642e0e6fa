//! Sign-magnitude arbitrary-precision integer kernel.
//!
//! Grounded on `examples/original_source/big_int.c`/`big_int.h`: a
//! `Vec`-like buffer of little-endian 32-bit "slots" plus a sign, with a
//! "raw" (magnitude-only) layer underneath a small signed-dispatch layer
//! (`add`/`sub`/`mul`/... on [`BigInt`] itself). See the submodules for the
//! individual operation families; this module owns the type, construction,
//! lifecycle and comparison.

pub mod arithmetic;
pub mod barrett;
pub mod div;
pub mod hex;
pub mod mul;
pub mod pow;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod shift;

#[cfg(test)]
mod tests;

use crate::pool::MemoryPool;
use crate::random::RandomSource;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::ptr::NonNull;
use std::rc::Rc;

/// Number of slots a fresh buffer gets at minimum, and the margin added on
/// every growth. Carried over verbatim from the source's
/// `ALLOCATE_SLOT_SIZE`.
pub(crate) const GROW_MARGIN_SLOTS: usize = 256;
const BYTES_PER_SLOT: usize = 4;
const BITS_PER_SLOT: usize = 32;

/// Sign of a [`BigInt`]. Zero is always canonically `Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn negate(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    fn xor(self, other: Sign) -> Sign {
        if self == other {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Where a [`DigitBuffer`] chooses to allocate from. Plain `from_u32`/`add`/
/// etc. always pass [`Allocator::Heap`]; the `_in` constructors accept a
/// pool. A buffer that starts out pool-backed keeps reusing the same pool
/// on every subsequent growth (see [`DigitBuffer::grow`]) without needing
/// the allocator threaded through every operation — `std::ops::Add` and
/// friends have fixed signatures that have no room for one.
///
/// `Pool` holds a shared, reference-counted handle rather than a borrow: a
/// pool is typically shared by many outstanding big integers at once, which
/// a `&mut MemoryPool` borrow can't express (only one buffer could hold it
/// at a time), and a raw pointer to the `MemoryPool` value itself would
/// dangle the moment the caller moved or dropped it out from under an
/// outstanding buffer. `Rc<RefCell<MemoryPool>>` ties the pool's lifetime to
/// its buffers: it is only actually freed once the last clone (including the
/// ones stashed inside every pool-backed `DigitBuffer`) is dropped, so there
/// is no way to UAF it from safe code.
pub enum Allocator {
    Heap,
    Pool(Rc<RefCell<MemoryPool>>),
}

struct PoolBacking {
    // Keeps the pool itself alive (see `Allocator`'s doc comment); also the
    // handle's target for `grow`'s next allocation and `Drop`'s release.
    pool: Rc<RefCell<MemoryPool>>,
    handle: Option<crate::pool::PoolHandle>,
    // Safety invariant: points at the page `handle` was issued for — a
    // `Box<[u8]>` owned by one of `pool`'s `Block`s. That allocation is
    // independent of, and outlives, wherever the `MemoryPool`/`Rc` value
    // itself lives, so this pointer stays valid across `pool`'s clones being
    // moved around; it is only invalidated if `handle` is released (which
    // `Drop` does in lockstep with dropping this pointer) or the pool is
    // dropped first, which `pool` here rules out.
    ptr: NonNull<u32>,
}

enum Storage {
    Heap(Box<[u32]>),
    Pool(PoolBacking),
}

/// An owning, exclusively-held, growable slice of `u32` digit slots.
///
/// Mirrors the source's manual `slot` pointer plus `in_pool` flag: storage
/// is either a heap-allocated boxed slice or a page borrowed from a
/// [`MemoryPool`]. There is no `Clone` impl and no shared ownership —
/// copying a [`crate::biginteger::BigInt`] allocates a fresh buffer.
pub struct DigitBuffer {
    storage: Storage,
    capacity: usize,
}

impl DigitBuffer {
    fn new_heap(capacity: usize) -> DigitBuffer {
        DigitBuffer {
            storage: Storage::Heap(vec![0u32; capacity].into_boxed_slice()),
            capacity,
        }
    }

    fn new_in(capacity: usize, alloc: Allocator) -> DigitBuffer {
        match alloc {
            Allocator::Heap => DigitBuffer::new_heap(capacity),
            Allocator::Pool(pool) => {
                let byte_size = capacity * BYTES_PER_SLOT;
                let handle = if byte_size <= pool.borrow().page_size() {
                    pool.borrow_mut().alloc(byte_size)
                } else {
                    None
                };
                if let Some(handle) = handle {
                    let ptr =
                        unsafe { NonNull::new_unchecked(handle.as_ptr() as *mut u32) };
                    return DigitBuffer {
                        storage: Storage::Pool(PoolBacking {
                            pool,
                            handle: Some(handle),
                            ptr,
                        }),
                        capacity,
                    };
                }
                DigitBuffer::new_heap(capacity)
            }
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn as_slice(&self) -> &[u32] {
        match &self.storage {
            Storage::Heap(b) => b,
            Storage::Pool(p) => unsafe { std::slice::from_raw_parts(p.ptr.as_ptr(), self.capacity) },
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u32] {
        match &mut self.storage {
            Storage::Heap(b) => b,
            Storage::Pool(p) => unsafe {
                std::slice::from_raw_parts_mut(p.ptr.as_ptr(), self.capacity)
            },
        }
    }

    /// Reallocates to `new_capacity` slots (>= current capacity), copying
    /// the first `used` slots across and zeroing the rest. Pool-backed
    /// buffers try to grow from their own pool first, falling back to the
    /// heap exactly as `MemoryPool::alloc` falls back internally.
    fn grow(&mut self, new_capacity: usize, used: usize) {
        debug_assert!(new_capacity >= self.capacity);
        let mut replacement = match &self.storage {
            Storage::Heap(_) => DigitBuffer::new_heap(new_capacity),
            Storage::Pool(backing) => {
                let pool = Rc::clone(&backing.pool);
                let byte_size = new_capacity * BYTES_PER_SLOT;
                let handle = if byte_size <= pool.borrow().page_size() {
                    pool.borrow_mut().alloc(byte_size)
                } else {
                    None
                };
                if let Some(handle) = handle {
                    let ptr = unsafe { NonNull::new_unchecked(handle.as_ptr() as *mut u32) };
                    DigitBuffer {
                        storage: Storage::Pool(PoolBacking {
                            pool,
                            handle: Some(handle),
                            ptr,
                        }),
                        capacity: new_capacity,
                    }
                } else {
                    DigitBuffer::new_heap(new_capacity)
                }
            }
        };
        replacement.as_mut_slice()[..used].copy_from_slice(&self.as_slice()[..used]);
        *self = replacement;
    }
}

impl Drop for DigitBuffer {
    fn drop(&mut self) {
        for slot in self.as_mut_slice() {
            *slot = 0;
        }
        if let Storage::Pool(backing) = &mut self.storage {
            if let Some(handle) = backing.handle.take() {
                backing.pool.borrow_mut().free_handle(handle);
            }
        }
    }
}

fn initial_capacity(needed_slots: usize) -> usize {
    needed_slots.max(GROW_MARGIN_SLOTS)
}

fn bits_for_slot(v: u32) -> usize {
    (BITS_PER_SLOT as u32 - v.leading_zeros()) as usize
}

/// Recomputes `(used, bits)` from a slot slice, trimming trailing zero
/// slots down to a minimum of one (invariant 1: canonical trimming).
fn trim(slots: &[u32], used: usize) -> (usize, usize) {
    let mut u = used.max(1);
    while u > 1 && slots[u - 1] == 0 {
        u -= 1;
    }
    let top = slots[u - 1];
    let bits = if u == 1 && top == 0 {
        1
    } else {
        BITS_PER_SLOT * (u - 1) + bits_for_slot(top)
    };
    (u, bits)
}

/// A sign-magnitude arbitrary-precision integer.
///
/// `digits[0..used]` is the little-endian magnitude; `digits[used..]` is
/// zeroed padding up to `capacity`. See the crate's data-model notes for the
/// full invariant list; `check_invariants` asserts them in debug builds.
pub struct BigInt {
    sign: Sign,
    digits: DigitBuffer,
    used: usize,
    bits: usize,
}

impl BigInt {
    fn from_raw(sign: Sign, digits: DigitBuffer, used: usize, bits: usize) -> BigInt {
        let mut v = BigInt {
            sign,
            digits,
            used,
            bits,
        };
        if v.is_zero() {
            v.sign = Sign::Positive;
        }
        #[cfg(debug_assertions)]
        v.check_invariants();
        v
    }

    pub fn zero() -> BigInt {
        BigInt::from_u32(0)
    }

    pub fn from_u32(value: u32) -> BigInt {
        BigInt::from_u32_in(value, Allocator::Heap)
    }

    pub fn from_u32_in(value: u32, alloc: Allocator) -> BigInt {
        let mut digits = DigitBuffer::new_in(initial_capacity(1), alloc);
        digits.as_mut_slice()[0] = value;
        let bits = if value == 0 { 1 } else { bits_for_slot(value) };
        BigInt::from_raw(Sign::Positive, digits, 1, bits)
    }

    pub fn from_signed(sign: Sign, value: u32) -> BigInt {
        let mut n = BigInt::from_u32(value);
        n.sign = if value == 0 { Sign::Positive } else { sign };
        n
    }

    /// Fills `ceil(bit_length / 32)` slots with words from `rng`, masks the
    /// top slot down to `bit_length` bits, then trims. A result that trims
    /// to zero is promoted to the value 1: this produces a value of *at
    /// most* `bit_length` bits, not exactly that many — callers wanting an
    /// exact length must set the top bit themselves.
    pub fn random(bit_length: usize, rng: &mut dyn RandomSource) -> BigInt {
        BigInt::random_in(bit_length, rng, Allocator::Heap)
    }

    pub fn random_in(bit_length: usize, rng: &mut dyn RandomSource, alloc: Allocator) -> BigInt {
        let bit_length = bit_length.max(1);
        let needed = (bit_length + BITS_PER_SLOT - 1) / BITS_PER_SLOT;
        let mut digits = DigitBuffer::new_in(initial_capacity(needed), alloc);
        {
            let slots = digits.as_mut_slice();
            let mut remaining = bit_length;
            for slot in slots.iter_mut().take(needed) {
                let mut word = rng.next_u32();
                if remaining < BITS_PER_SLOT {
                    word &= (1u32 << remaining) - 1;
                }
                *slot = word;
                remaining = remaining.saturating_sub(BITS_PER_SLOT);
            }
        }
        let (used, bits) = trim(digits.as_slice(), needed);
        let mut n = BigInt::from_raw(Sign::Positive, digits, used, bits);
        if n.is_zero() {
            n = BigInt::from_u32(1);
        }
        n
    }

    pub fn assign_from(&mut self, src: &BigInt) {
        if self.digits.capacity() < src.used {
            self.digits = DigitBuffer::new_heap(initial_capacity(src.used));
        } else {
            for slot in &mut self.digits.as_mut_slice()[src.used..] {
                *slot = 0;
            }
        }
        self.digits.as_mut_slice()[..src.used].copy_from_slice(&src.digits.as_slice()[..src.used]);
        self.used = src.used;
        self.bits = src.bits;
        self.sign = src.sign;
    }

    pub fn is_zero(&self) -> bool {
        self.used == 1 && self.digits.as_slice()[0] == 0
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }

    pub(crate) fn slots(&self) -> &[u32] {
        &self.digits.as_slice()[..self.used]
    }

    /// Ensures `self.digits` can hold at least `needed` slots, growing by
    /// the standard margin (invariant 5: capacity only ever grows).
    pub(crate) fn reserve(&mut self, needed: usize) {
        if self.digits.capacity() < needed {
            self.digits.grow(needed + GROW_MARGIN_SLOTS, self.used);
        }
    }

    pub(crate) fn set_used_bits(&mut self, used: usize, bits: usize) {
        self.used = used;
        self.bits = bits;
        if self.is_zero() {
            self.sign = Sign::Positive;
        }
    }

    /// Overwrites the sign, re-normalizing to positive if the value is
    /// zero (invariant 2). Used by the signed layers above the raw
    /// magnitude primitives (division, exponentiation) to apply a
    /// separately-computed result sign.
    pub(crate) fn apply_sign(&mut self, sign: Sign) {
        self.sign = sign;
        if self.is_zero() {
            self.sign = Sign::Positive;
        }
    }

    pub fn compare_magnitude(a: &BigInt, b: &BigInt) -> Ordering {
        if a.bits != b.bits {
            return a.bits.cmp(&b.bits);
        }
        for idx in (0..a.used.max(b.used)).rev() {
            let av = a.digits.as_slice().get(idx).copied().unwrap_or(0);
            let bv = b.digits.as_slice().get(idx).copied().unwrap_or(0);
            if av != bv {
                return av.cmp(&bv);
            }
        }
        Ordering::Equal
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        assert!(self.used >= 1);
        assert!(self.used <= self.digits.capacity());
        if self.used > 1 {
            assert_ne!(self.digits.as_slice()[self.used - 1], 0);
        }
        if self.is_zero() {
            assert_eq!(self.sign, Sign::Positive);
        }
        let top = self.digits.as_slice()[self.used - 1];
        let expected = if self.used == 1 && top == 0 {
            1
        } else {
            BITS_PER_SLOT * (self.used - 1) + bits_for_slot(top)
        };
        assert_eq!(self.bits, expected);
    }
}

impl Clone for BigInt {
    fn clone(&self) -> BigInt {
        let mut digits = DigitBuffer::new_heap(initial_capacity(self.used));
        digits.as_mut_slice()[..self.used].copy_from_slice(&self.digits.as_slice()[..self.used]);
        BigInt {
            sign: self.sign,
            digits,
            used: self.used,
            bits: self.bits,
        }
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && BigInt::compare_magnitude(self, other) == Ordering::Equal
    }
}
impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Positive) => BigInt::compare_magnitude(self, other),
            (Sign::Negative, Sign::Negative) => BigInt::compare_magnitude(other, self),
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
        }
    }
}

impl std::fmt::Debug for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BigInt({})", self)
    }
}

/// The additive and multiplicative identities, expressed through the
/// standard numeric traits so a caller composing `BigInt` with generic
/// numeric code can reach for `Zero::zero()`/`One::one()` directly.
impl num_traits::Zero for BigInt {
    fn zero() -> BigInt {
        BigInt::zero()
    }

    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }
}

impl num_traits::One for BigInt {
    fn one() -> BigInt {
        BigInt::from_u32(1)
    }
}
