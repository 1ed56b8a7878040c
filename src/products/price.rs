//! Exact JSON encoding for prices.
//!
//! Prices travel as JSON numbers with their full decimal text intact
//! (serde_json `arbitrary_precision`); strings are not accepted.

use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};

pub use rust_decimal::serde::arbitrary_precision::serialize;

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    to_decimal(&number).map_err(D::Error::custom)
}

/// Like `deserialize`, but `null` reads as `None`.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Number>::deserialize(deserializer)?
        .map(|n| to_decimal(&n).map_err(D::Error::custom))
        .transpose()
}

fn to_decimal(number: &serde_json::Number) -> Result<Decimal, String> {
    let text = number.to_string();
    Decimal::from_str_exact(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| format!("price {text} cannot be represented exactly"))
}
