//! Entropy source for random big-integer construction and prime-candidate
//! sampling.
//!
//! Grounded on `examples/original_source/big_int_rand.c`: a platform
//! entropy source (there, `/dev/urandom` or a `time()`-seeded `rand()`
//! fallback) wrapped behind a single "give me a 32-bit word" call, plus a
//! 256-entry permutation table the source runs each sampled byte through.
//! Cryptographic quality of the returned words is the caller's concern —
//! this module only promises a uniform 32-bit word.

#[cfg(test)]
mod tests;

use rand::RngCore;

/// A stateful source of uniform 32-bit words.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

/// `rand_table` from `big_int_rand.c`, carried over verbatim. Each sampled
/// byte is remapped through this fixed permutation before being folded into
/// a word. This is a statistical peculiarity of the source library, not a
/// correctness requirement — see [`OsRandomSource`].
pub const PERMUTATION_TABLE: [u8; 256] = [
    47, 73, 116, 45, 69, 61, 202, 144, 192, 235, 201, 170, 139, 77, 228, 117, 32, 215, 9, 178,
    214, 193, 64, 200, 58, 132, 89, 60, 63, 141, 35, 234, 76, 95, 20, 182, 173, 190, 68, 229, 27,
    28, 226, 143, 186, 86, 138, 54, 75, 242, 90, 42, 211, 15, 100, 1, 254, 243, 134, 156, 218, 26,
    24, 187, 128, 14, 175, 53, 67, 246, 230, 167, 236, 146, 18, 23, 177, 213, 142, 74, 118, 147,
    203, 159, 112, 196, 171, 249, 240, 56, 16, 244, 169, 70, 3, 191, 150, 57, 126, 30, 10, 160,
    206, 37, 109, 25, 6, 66, 46, 210, 157, 212, 145, 2, 39, 204, 72, 224, 250, 88, 104, 155, 52,
    108, 105, 81, 85, 151, 93, 103, 184, 83, 34, 255, 51, 239, 4, 162, 222, 59, 22, 161, 12, 91,
    50, 199, 101, 216, 80, 119, 164, 71, 82, 107, 251, 13, 129, 94, 44, 96, 225, 8, 223, 135, 153,
    165, 174, 220, 102, 238, 154, 197, 33, 149, 41, 19, 140, 40, 247, 114, 195, 78, 43, 168, 233,
    209, 148, 180, 237, 253, 185, 166, 11, 98, 198, 241, 133, 21, 207, 248, 219, 245, 36, 172, 55,
    152, 188, 84, 125, 189, 163, 127, 120, 205, 124, 5, 31, 122, 110, 217, 181, 87, 137, 115, 131,
    252, 7, 183, 111, 176, 231, 65, 194, 0, 113, 79, 49, 97, 99, 179, 121, 158, 29, 17, 106, 227,
    38, 62, 123, 130, 92, 221, 136, 208, 48, 232,
];

/// Wraps the platform's OS entropy source (falling back to a wall-clock
/// seeded generator where none is available — both paths are handled by
/// `rand::rngs::StdRng`'s own seeding, which is the idiomatic Rust
/// equivalent of the source's `/dev/urandom`-or-`srand(time())` split).
pub struct OsRandomSource {
    inner: rand::rngs::StdRng,
    remap: bool,
}

impl OsRandomSource {
    /// Seeds from OS entropy via `rand::rngs::OsRng`.
    pub fn new() -> OsRandomSource {
        use rand::SeedableRng;
        OsRandomSource {
            inner: rand::rngs::StdRng::from_entropy(),
            remap: true,
        }
    }

    /// As [`OsRandomSource::new`], but skips the permutation-table remap.
    /// Omitting the remap doesn't change correctness, only the statistical
    /// texture of the output relative to the permutation-table path.
    pub fn without_permutation_table() -> OsRandomSource {
        let mut s = OsRandomSource::new();
        s.remap = false;
        s
    }
}

impl Default for OsRandomSource {
    fn default() -> Self {
        OsRandomSource::new()
    }
}

impl RandomSource for OsRandomSource {
    fn next_u32(&mut self) -> u32 {
        if !self.remap {
            return self.inner.next_u32();
        }
        let raw = self.inner.next_u32().to_le_bytes();
        let mut value = 0u32;
        for (idx, byte) in raw.iter().enumerate() {
            let remapped = PERMUTATION_TABLE[*byte as usize] as u32;
            value |= remapped << (idx * 8);
        }
        value
    }
}

#[cfg(test)]
pub(crate) struct XorShiftRandomSource(rand_xorshift::XorShiftRng);

#[cfg(test)]
impl XorShiftRandomSource {
    pub(crate) fn seeded(seed: [u8; 16]) -> XorShiftRandomSource {
        use rand::SeedableRng;
        XorShiftRandomSource(rand_xorshift::XorShiftRng::from_seed(seed))
    }
}

#[cfg(test)]
impl RandomSource for XorShiftRandomSource {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }
}
