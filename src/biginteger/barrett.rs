//! Barrett reduction: a precomputed reciprocal that turns repeated modular
//! reductions against the same modulus into a multiply-and-subtract.
//!
//! Grounded on `examples/original_source/big_int.c`'s
//! `big_int_barret_build`/`big_int_mod_to_with_barret`.

use super::div::div;
use super::BigInt;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// A modulus `n` together with its Barrett reciprocal `mu = floor(2^(2k)/n)`,
/// `k = n.bits()`. Reusing one `BarrettReducer` across many reductions
/// against the same modulus (e.g. every squaring step of `pow_mod`) is the
/// whole point: building `mu` costs one division, reducing costs none.
pub struct BarrettReducer {
    modulus: BigInt,
    mu: BigInt,
    k: usize,
}

impl BarrettReducer {
    /// `mu = floor(2^(2k) / n)`, `k = n.bits()`. `n` must be positive.
    pub fn build(n: &BigInt) -> Result<BarrettReducer> {
        let k = n.bits();
        let mut scaled = BigInt::from_u32(1);
        super::shift::shift_left_assign(&mut scaled, 2 * k);
        let mu = div(&scaled, n)?;
        Ok(BarrettReducer {
            modulus: n.clone(),
            mu,
            k,
        })
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// `a mod n`, via `q_hat = (a >> (k-1)) * mu >> (k+1)`, `r = a - q_hat *
    /// n`, then at most a couple of corrective subtractions for the
    /// estimate's off-by-a-small-amount error (Barrett's own bound is at
    /// most two). Requires `a >= n` in magnitude — per spec §4.1, Barrett
    /// reduction is only defined above the modulus; a caller holding a value
    /// already known to be smaller than `n` should use it directly rather
    /// than call this.
    pub fn reduce(&self, a: &BigInt) -> Result<BigInt> {
        if BigInt::compare_magnitude(a, &self.modulus) == Ordering::Less {
            return Err(Error::PreconditionViolation(
                "BarrettReducer::reduce requires a's magnitude to be >= the modulus",
            ));
        }
        let mut q_hat = a.clone();
        super::shift::shift_right_assign(&mut q_hat, self.k - 1);
        q_hat *= &self.mu;
        super::shift::shift_right_assign(&mut q_hat, self.k + 1);

        let mut r = a.clone();
        q_hat *= &self.modulus;
        r -= &q_hat;

        while BigInt::compare_magnitude(&r, &self.modulus) != Ordering::Less {
            r -= &self.modulus;
        }
        Ok(r)
    }
}
