//! Serde utilities for content records.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Document ids that the API may send either as strings or as numbers.
pub mod number_or_string {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes the id as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(value: &String, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    /// Deserializes an id from a string or integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrIntVisitor;

        impl Visitor<'_> for StringOrIntVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer document id")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }
        }

        deserializer.deserialize_any(StringOrIntVisitor)
    }
}
