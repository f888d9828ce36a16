use bson::Bson;
use serde::{Deserialize, Deserializer};

/// Render a stored BSON value the way the API exposes it.
///
/// Documents written by other tools may carry numbers where this service
/// writes strings, so scalars are rendered as text and null as "".
pub fn bson_to_string(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
        Bson::Double(n) => n.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null | Bson::Undefined => String::new(),
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

/// Serde adapter for `#[serde(deserialize_with = ...)]` on text fields.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Bson::deserialize(deserializer)?;
    Ok(bson_to_string(&value))
}

/// Serde adapter for the `created_at` / `updated_at` stamps.
///
/// Seconds since the epoch; BSON dates are converted, anything that is not a
/// number or a date reads as absent.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let stamp = match Bson::deserialize(deserializer)? {
        Bson::Int32(n) => Some(i64::from(n)),
        Bson::Int64(n) => Some(n),
        Bson::Double(n) if n.is_finite() => Some(n as i64),
        Bson::DateTime(dt) => Some(dt.timestamp_millis() / 1000),
        _ => None,
    };
    Ok(stamp)
}
