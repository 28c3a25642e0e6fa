//! Optional `serde` support, gated behind the `serde` feature.
//!
//! Grounded on `examples/10to4-ckb-zkp`'s `BigInteger` trait bound
//! (`+ serde::Serialize + for<'a> serde::Deserialize<'a>`): a big integer
//! round-trips through its own hex text representation rather than a
//! bespoke binary encoding, so the wire format is the same string a human
//! would read off `Display`/`FromStr`.

use super::BigInt;
use serde::de::{Error as DeError, Visitor};
use serde::{Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

impl Serialize for BigInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct BigIntVisitor;

impl<'de> Visitor<'de> for BigIntVisitor {
    type Value = BigInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hex-encoded big integer, e.g. \"-0x1A2B\"")
    }

    fn visit_str<E: DeError>(self, v: &str) -> Result<BigInt, E> {
        BigInt::from_str(v).map_err(DeError::custom)
    }
}

impl<'de> serde::Deserialize<'de> for BigInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
        deserializer.deserialize_str(BigIntVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let n = BigInt::from_str("-0x1A2B3C").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        let back: BigInt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
