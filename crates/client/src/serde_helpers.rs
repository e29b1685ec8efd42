//! Serde helpers for Splunk's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Provide deserializers that accept either JSON numbers or strings for numeric fields.
//! - Accept booleans encoded as `true`/`false`, `"1"`/`"0"` or numbers.
//! - Keep parsing behavior centralized so model definitions stay readable and consistent.
//!
//! Invariants / assumptions:
//! - Splunk may return numeric fields as `"123"` strings or as `123` numbers depending on endpoint/version.
//! - JSON `null` decodes to the type's zero value so that `#[serde(default)]` fields stay total.
//! - Integers are parsed exactly; floats are only used for fractional input, and values that
//!   are non-finite or outside the target type are errors rather than saturated.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
    Bool(bool),
}

/// 2^63 and 2^64, the first floats outside `i64` and `u64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

fn finite_f64<E: serde::de::Error>(s: &str) -> Result<f64, E> {
    let f = s.parse::<f64>().map_err(E::custom)?;
    if f.is_finite() {
        Ok(f)
    } else {
        Err(E::custom(format!("number out of range: {s}")))
    }
}

/// Truncates toward zero; fails when the value does not fit.
fn f64_to_i64<E: serde::de::Error>(v: f64) -> Result<i64, E> {
    if v.is_finite() && (-I64_BOUND..I64_BOUND).contains(&v) {
        Ok(v.trunc() as i64)
    } else {
        Err(E::custom(format!("number out of range for i64: {v}")))
    }
}

fn f64_to_u64<E: serde::de::Error>(v: f64) -> Result<u64, E> {
    if v.is_finite() && (0.0..U64_BOUND).contains(&v) {
        Ok(v.trunc() as u64)
    } else {
        Err(E::custom(format!("number out of range for u64: {v}")))
    }
}

/// Accepts floats, integers, numeric strings and booleans (as 0/1).
pub fn f64_from_string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(0.0),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(StringOrNumber::String(s)) => finite_f64(s.trim()),
        Some(StringOrNumber::U64(v)) => Ok(v as f64),
        Some(StringOrNumber::I64(v)) => Ok(v as f64),
        Some(StringOrNumber::F64(v)) => Ok(v),
        Some(StringOrNumber::Bool(b)) => Ok(if b { 1.0 } else { 0.0 }),
    }
}

/// Accepts integers, floats (truncated) and numeric strings.
pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(StringOrNumber::U64(v)) => Ok(v),
        Some(StringOrNumber::I64(v)) => u64::try_from(v).map_err(D::Error::custom),
        Some(StringOrNumber::F64(v)) => f64_to_u64(v),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(0),
        Some(StringOrNumber::String(s)) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(v) => Ok(v),
                Err(_) => f64_to_u64(finite_f64(s)?),
            }
        }
        Some(StringOrNumber::Bool(_)) => Err(D::Error::custom("expected a number, got a boolean")),
    }
}

/// Accepts integers, floats (truncated toward zero) and numeric strings.
pub fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(StringOrNumber::U64(v)) => i64::try_from(v).map_err(D::Error::custom),
        Some(StringOrNumber::I64(v)) => Ok(v),
        Some(StringOrNumber::F64(v)) => f64_to_i64(v),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(0),
        Some(StringOrNumber::String(s)) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(v) => Ok(v),
                Err(_) => f64_to_i64(finite_f64(s)?),
            }
        }
        Some(StringOrNumber::Bool(_)) => Err(D::Error::custom("expected a number, got a boolean")),
    }
}

pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(String::new()),
        Some(StringOrNumber::String(s)) => Ok(s),
        Some(StringOrNumber::U64(v)) => Ok(v.to_string()),
        Some(StringOrNumber::I64(v)) => Ok(v.to_string()),
        Some(StringOrNumber::F64(v)) => Ok(v.to_string()),
        Some(StringOrNumber::Bool(b)) => Ok(b.to_string()),
    }
}

pub fn bool_from_any<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    match value {
        None => Ok(false),
        Some(StringOrNumber::Bool(b)) => Ok(b),
        Some(StringOrNumber::U64(v)) => Ok(v != 0),
        Some(StringOrNumber::I64(v)) => Ok(v != 0),
        Some(StringOrNumber::F64(v)) => Ok(v != 0.0),
        Some(StringOrNumber::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "t" | "yes" => Ok(true),
            "0" | "false" | "f" | "no" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean: {other}"))),
        },
    }
}
