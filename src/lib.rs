//! Arbitrary-precision signed-integer arithmetic for cryptographic
//! primitives and combinatorial computation on very large values.
//!
//! The crate is three tightly coupled pieces, leaves first:
//!
//! - [`pool`]: a page-sized slab allocator that backs the kernel's digit
//!   buffers, with a transparent fallback to the general heap.
//! - [`biginteger`]: the sign-magnitude integer type itself and every
//!   arithmetic operation on it — addition, subtraction, multiplication
//!   (schoolbook, Karatsuba, dedicated squaring), division, shifts,
//!   exponentiation, modular exponentiation and Barrett reduction.
//! - [`primes`]: Fermat and Miller–Rabin compositeness testing and
//!   probable-prime generation, built on the kernel and [`random`].
//!
//! [`fibonacci`] is a small worked example of the kernel composed with
//! itself (2x2 matrix exponentiation).
//!
//! The kernel is single-threaded and not constant-time; see the crate's
//! design notes for the full concurrency and side-channel posture before
//! using this in a security-sensitive context.

pub mod biginteger;
pub mod error;
pub mod fibonacci;
pub mod pool;
pub mod primes;
pub mod random;

pub use biginteger::{Allocator, BigInt, Sign};
pub use error::{Error, Result};
pub use pool::{MemoryPool, PoolConfig};
pub use random::{OsRandomSource, RandomSource};
