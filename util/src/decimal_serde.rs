//! Decimal-string (de)serialization for bounded integers (`u32`, `u64`, ...).
//!
//! The record format transports every integer-valued field — not just the
//! arbitrary-precision group/field elements — as a JSON string of decimal
//! digits, so a guardian count or vote limit round-trips the same way a
//! `BigUint` does. See [`crate::biguint_serde`] for the arbitrary-precision
//! counterpart.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

/// Serializes `n` as a JSON string of decimal digits.
pub fn serialize<T, S>(n: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.serialize_str(&n.to_string())
}

/// Deserializes `T` from a JSON string of decimal digits.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    struct DecimalVisitor<T>(std::marker::PhantomData<T>);

    impl<T> Visitor<'_> for DecimalVisitor<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string of decimal digits")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse::<T>()
                .map_err(|e| de::Error::custom(format!("invalid decimal integer {v:?}: {e}")))
        }
    }

    deserializer.deserialize_str(DecimalVisitor(std::marker::PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "crate::decimal_serde")]
        n: u32,
    }

    #[test]
    fn round_trips_u32() {
        for n in [0_u32, 1, 255, 4294967295] {
            let w = Wrapper { n };
            let json = serde_json::to_string(&w).unwrap();
            assert_eq!(json, format!("{{\"n\":\"{n}\"}}"));
            let back: Wrapper = serde_json::from_str(&json).unwrap();
            assert_eq!(back, w);
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct WrapperU64 {
        #[serde(with = "crate::decimal_serde")]
        n: u64,
    }

    #[test]
    fn round_trips_u64() {
        let w = WrapperU64 { n: u64::MAX };
        let json = serde_json::to_string(&w).unwrap();
        let back: WrapperU64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, w);
    }

    #[test]
    fn rejects_bare_numbers() {
        let err = serde_json::from_str::<Wrapper>("{\"n\":1}");
        assert!(err.is_err());
    }

    #[test]
    fn rejects_non_decimal_strings() {
        let err = serde_json::from_str::<Wrapper>("{\"n\":\"0x10\"}");
        assert!(err.is_err());
    }
}
