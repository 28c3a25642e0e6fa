use core::fmt;

/// Error conditions raised by the big-integer kernel, the memory pool and
/// the prime generator.
///
/// Mirrors the taxonomy in the design notes: allocation failure, invalid
/// input and precondition violations on the "raw" magnitude primitives.
/// Operands are left at their prior semantic value when an operation
/// returns `Err` — buffers may have been reallocated internally, but the
/// reallocation is only committed once the replacement is fully populated.
#[derive(Debug)]
pub enum Error {
    /// A digit buffer request (pool or heap) could not be satisfied.
    AllocationFailure,
    /// A shift amount could not be represented or applied.
    InvalidShift,
    /// Reserved for a strict hex parser; `from_hex_string` does not raise
    /// this today (it coerces invalid nibbles to zero, matching the source
    /// library's documented behavior).
    InvalidDigit(char),
    /// Division or modulo with a zero divisor.
    DivisionByZero,
    /// A "raw" magnitude primitive's precondition was violated, e.g.
    /// `sub_magnitude` called with `a < b`, or a modulo/Barrett-reduce
    /// primitive called with `a < n`.
    PreconditionViolation(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure => write!(f, "failed to allocate a digit buffer"),
            Error::InvalidShift => write!(f, "shift amount is out of range"),
            Error::InvalidDigit(c) => write!(f, "invalid hex digit: {:?}", c),
            Error::DivisionByZero => write!(f, "division or modulo by zero"),
            Error::PreconditionViolation(msg) => write!(f, "precondition violated: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

pub type Result<T> = core::result::Result<T, Error>;
