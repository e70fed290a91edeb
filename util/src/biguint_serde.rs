//! Decimal-string (de)serialization for [`num_bigint::BigUint`].
//!
//! The on-disk election record transports every integer-valued field as a
//! JSON string of decimal digits rather than a JSON number, so that
//! arbitrary-precision values survive a round trip without losing precision
//! to a 64-bit `f64`. This module is the `#[serde(with = "...")]` helper
//! that `verifier-core`'s record types use for the `BigUint`-valued fields;
//! see [`crate::decimal_serde`] for the bounded-integer (`u32`/`u64`)
//! counterpart used for fields like guardian counts and vote limits.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Num;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

/// Serializes a [`BigUint`] as a JSON string of decimal digits.
pub fn serialize<S>(n: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&n.to_str_radix(10))
}

/// Deserializes a [`BigUint`] from a JSON string of decimal digits.
pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    struct DecimalVisitor;

    impl Visitor<'_> for DecimalVisitor {
        type Value = BigUint;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string of decimal digits")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            BigUint::from_str_radix(v, 10)
                .map_err(|e| de::Error::custom(format!("invalid decimal integer {v:?}: {e}")))
        }
    }

    deserializer.deserialize_str(DecimalVisitor)
}
