//! Fibonacci via 2×2 matrix exponentiation.
//!
//! Grounded on `examples/original_source/big_int_fibonacci.c`: `M = [[1,1],
//! [1,0]]`, `M^n`'s top row gives `(F(n+1), F(n))`, computed by the usual
//! square-and-multiply over `n`'s bits rather than `n` multiplications.

#[cfg(test)]
mod tests;

use crate::biginteger::mul::mul;
use crate::biginteger::BigInt;

/// A 2×2 matrix of [`BigInt`]s, row-major.
struct Matrix2([[BigInt; 2]; 2]);

impl Matrix2 {
    fn identity() -> Matrix2 {
        Matrix2([
            [BigInt::from_u32(1), BigInt::from_u32(0)],
            [BigInt::from_u32(0), BigInt::from_u32(1)],
        ])
    }

    fn fib_step() -> Matrix2 {
        Matrix2([
            [BigInt::from_u32(1), BigInt::from_u32(1)],
            [BigInt::from_u32(1), BigInt::from_u32(0)],
        ])
    }

    fn mul(&self, other: &Matrix2) -> Matrix2 {
        let a = &self.0;
        let b = &other.0;
        let cell = |r: usize, c: usize| -> BigInt {
            let mut sum = mul(&a[r][0], &b[0][c]);
            sum += &mul(&a[r][1], &b[1][c]);
            sum
        };
        Matrix2([[cell(0, 0), cell(0, 1)], [cell(1, 0), cell(1, 1)]])
    }
}

/// `F(n)`, with `F(0) = 0`, `F(1) = F(2) = 1`. For `n > 2`, computes
/// `fib_step^(n-2)` by repeated squaring and reads `F(n)` off the top row
/// sum of the result.
pub fn fibonacci(n: u64) -> BigInt {
    match n {
        0 => return BigInt::from_u32(0),
        1 | 2 => return BigInt::from_u32(1),
        _ => {}
    }
    let mut exponent = n - 2;
    let mut result = Matrix2::identity();
    let mut base = Matrix2::fib_step();
    while exponent != 0 {
        if exponent & 1 == 1 {
            result = result.mul(&base);
        }
        base = base.mul(&base);
        exponent >>= 1;
    }
    let mut fib = result.0[0][0].clone();
    fib += &result.0[0][1];
    fib
}
