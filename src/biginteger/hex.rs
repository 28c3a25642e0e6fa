//! Hex parsing and printing: the textual I/O contract for the core.
//!
//! Grounded on `examples/original_source/big_int.c`'s
//! `big_int_new_from_str`/`hex_to_int`/`big_int_print`. The source reads
//! fixed 8-character chunks from the front of the string and assumes the
//! length is a multiple of 8; this reads chunks from the *end* of the
//! string instead so an input whose length isn't a multiple of 8 still
//! parses correctly.

use super::{initial_capacity, trim, BigInt, DigitBuffer, Sign};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

fn hex_nibble(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => (c - b'0') as u32,
        b'a'..=b'f' => (c - b'a') as u32 + 10,
        b'A'..=b'F' => (c - b'A') as u32 + 10,
        // Invalid characters decode to 0, matching the source's
        // `hex_to_int`'s fallthrough (see design notes' open question 1).
        _ => 0,
    }
}

/// Parses `s` as a big-endian hex magnitude (no sign, no `0x` prefix).
/// `bits = 4 * s.len()` before trimming; an empty string is zero.
pub fn from_hex_string(s: &str) -> BigInt {
    let chars = s.as_bytes();
    if chars.is_empty() {
        return BigInt::zero();
    }
    let nibble_count = chars.len();
    let slot_count = (nibble_count + 7) / 8;
    let mut digits = DigitBuffer::new_heap(initial_capacity(slot_count));
    {
        let slots = digits.as_mut_slice();
        let mut idx = nibble_count;
        for slot in slots.iter_mut().take(slot_count) {
            let chunk_len = idx.min(8);
            let mut value = 0u32;
            let mut shift = 0u32;
            for _ in 0..chunk_len {
                idx -= 1;
                value |= hex_nibble(chars[idx]) << shift;
                shift += 4;
            }
            *slot = value;
        }
    }
    let (used, bits) = trim(digits.as_slice(), slot_count);
    BigInt::from_raw(Sign::Positive, digits, used, bits)
}

impl fmt::Display for BigInt {
    /// Optional leading `-`, then `0x`, then 8-hex-digit groups from the
    /// most significant slot to the least. Zero prints as `0x00000000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign() == Sign::Negative {
            write!(f, "-")?;
        }
        write!(f, "0x")?;
        for slot in self.slots().iter().rev() {
            write!(f, "{:08X}", slot)?;
        }
        Ok(())
    }
}

impl FromStr for BigInt {
    type Err = Error;

    /// Accepts an optional leading `-` and an optional `0x`/`0X` prefix;
    /// the remainder is parsed as in [`from_hex_string`]. Never actually
    /// fails (invalid nibbles coerce to zero) but returns `Result` for
    /// symmetry with the rest of the crate's fallible surface.
    fn from_str(s: &str) -> Result<BigInt, Error> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest
            .strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .unwrap_or(rest);
        let mut n = from_hex_string(rest);
        if negative {
            n.apply_sign(Sign::Negative);
        }
        Ok(n)
    }
}
