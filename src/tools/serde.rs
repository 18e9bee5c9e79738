use std::fmt;

use serde::{de::Visitor, Deserialize, Deserializer};

pub struct F64Visitor;

impl<'de> Visitor<'de> for F64Visitor {
    type Value = f64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a float string or a number")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v as f64)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v as f64)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.trim().parse::<f64>().map_err(serde::de::Error::custom)
    }
}

/// Accepts coordinates given either as JSON numbers or as numeric strings
pub fn f64_from_str<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(F64Visitor)
}

/// Boolean-like flags as they appear in trip exports: `1`/`0`, `true`/`false`, `y`/`n`
pub fn bool_from_simple_str<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.trim().to_lowercase().as_ref() {
        "1" | "true" | "y" | "yes" | "member" => Ok(true),
        "0" | "false" | "n" | "no" | "casual" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean-like value: {other}"
        ))),
    }
}

/// Empty keys become `None` so they never match a station
pub fn optional_key_from_str<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}
