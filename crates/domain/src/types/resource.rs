//! Base resource shape and the hydration protocol
//!
//! A resource only exists client-side after the server has described it:
//! concrete resource types are built exclusively by decoding a server record.
//! Decoding tolerates unknown fields (they land in each type's `extra` map),
//! so the service can grow new attributes without a client release.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{FanellaError, Result};

/// Raw server record, as decoded from a JSON object
pub type RawRecord = Map<String, Value>;

/// Identity fields assigned by the server on creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeta {
    pub id: i64,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A server-owned entity reachable under a collection path
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection path relative to the API base (e.g. `/sources`)
    const PATH: &'static str;

    fn meta(&self) -> &ResourceMeta;

    fn id(&self) -> i64 {
        self.meta().id
    }

    fn uuid(&self) -> Option<Uuid> {
        self.meta().uuid
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.meta().created_at
    }
}

/// Decode a server record into `R`.
///
/// No validation or coercion happens beyond what the target type's serde
/// derive does.
///
/// # Errors
/// Returns `FanellaError::Hydration` if the record lacks a required field or
/// a field has the wrong shape.
pub fn hydrate<R: DeserializeOwned>(raw: RawRecord) -> Result<R> {
    serde_json::from_value(Value::Object(raw))
        .map_err(|e| FanellaError::Hydration(e.to_string()))
}

/// Decode any JSON value, rejecting everything that is not an object.
///
/// # Errors
/// Returns `FanellaError::Hydration` for non-object values or decode failures.
pub fn hydrate_value<R: DeserializeOwned>(raw: Value) -> Result<R> {
    match raw {
        Value::Object(record) => hydrate(record),
        other => Err(FanellaError::Hydration(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Merge `raw` over `local`, then decode.
///
/// Server values win on conflicting keys; keys only known locally survive.
///
/// # Errors
/// Same as [`hydrate`].
pub fn hydrate_over<R: DeserializeOwned>(local: RawRecord, raw: RawRecord) -> Result<R> {
    let mut merged = local;
    merged.extend(raw);
    hydrate(merged)
}

/// Field deserializer that reads JSON `null` as the type's default.
///
/// Use with `#[serde(default, deserialize_with = "null_as_default")]` on
/// non-optional fields the server may send as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Widget {
        #[serde(flatten)]
        meta: ResourceMeta,
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
        #[serde(flatten)]
        extra: RawRecord,
    }

    impl Resource for Widget {
        const PATH: &'static str = "/widgets";

        fn meta(&self) -> &ResourceMeta {
            &self.meta
        }
    }

    fn record(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test records are objects"),
        }
    }

    #[test]
    fn test_hydrate_reads_identity() {
        let widget: Widget = hydrate(record(json!({
            "id": 7,
            "uuid": "5f0c6d1e-8a4b-4c3d-9e2f-1a2b3c4d5e6f",
            "created_at": "2024-05-01T12:00:00Z",
            "label": "gear"
        })))
        .unwrap();

        assert_eq!(widget.id(), 7);
        assert!(widget.uuid().is_some());
        assert_eq!(widget.created_at().unwrap().to_rfc3339(), "2024-05-01T12:00:00+00:00");
        assert_eq!(widget.label, "gear");
        assert!(widget.extra.is_empty());
    }

    #[test]
    fn test_hydrate_keeps_unknown_fields() {
        let widget: Widget = hydrate(record(json!({ "id": 1, "colour": "teal" }))).unwrap();

        assert_eq!(widget.extra.get("colour"), Some(&json!("teal")));
        assert!(widget.uuid().is_none());
    }

    #[test]
    fn test_hydrate_requires_id() {
        let err = hydrate::<Widget>(record(json!({ "label": "orphan" }))).unwrap_err();
        assert!(matches!(err, FanellaError::Hydration(_)));
    }

    #[test]
    fn test_hydrate_value_rejects_arrays() {
        let err = hydrate_value::<Widget>(json!([1, 2])).unwrap_err();
        assert_eq!(err, FanellaError::Hydration("expected a JSON object, got an array".into()));
    }

    #[test]
    fn test_hydrate_over_prefers_server_values() {
        let local = record(json!({ "label": "draft", "colour": "red" }));
        let raw = record(json!({ "id": 3, "label": "final" }));

        let widget: Widget = hydrate_over(local, raw).unwrap();

        assert_eq!(widget.label, "final");
        assert_eq!(widget.extra.get("colour"), Some(&json!("red")));
    }

    #[test]
    fn test_null_reads_as_default() {
        let widget: Widget = hydrate(record(json!({ "id": 4, "label": null }))).unwrap();
        assert_eq!(widget.label, "");

        let widget: Widget = hydrate(record(json!({ "id": 5 }))).unwrap();
        assert_eq!(widget.label, "");
    }
}
