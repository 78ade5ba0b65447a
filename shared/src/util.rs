//! Serde helpers for loosely typed API fields

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Accept a boolean sent either as JSON `true`/`false` or as the strings
/// `"true"`/`"false"` (multipart updates stringify every scalar).
pub fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Text(String),
    }

    match Loose::deserialize(deserializer)? {
        Loose::Bool(b) => Ok(b),
        Loose::Text(s) => Ok(s.trim().eq_ignore_ascii_case("true")),
    }
}

/// Accept a number sent either as JSON number or as a numeric string
pub fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose<N> {
        Number(N),
        Text(String),
    }

    match Loose::<T>::deserialize(deserializer)? {
        Loose::Number(n) => Ok(n),
        Loose::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(deserialize_with = "bool_or_string")]
        on: bool,
        #[serde(deserialize_with = "number_or_string")]
        qty: u32,
    }

    #[test]
    fn test_loose_scalars() {
        let a: Flag = serde_json::from_str(r#"{"on": true, "qty": 3}"#).unwrap();
        assert!(a.on);
        assert_eq!(a.qty, 3);
        let b: Flag = serde_json::from_str(r#"{"on": "false", "qty": "12"}"#).unwrap();
        assert!(!b.on);
        assert_eq!(b.qty, 12);
    }
}
