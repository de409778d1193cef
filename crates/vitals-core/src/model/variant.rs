//! Sample values.
//!
//! `Variant` is the closed set of value shapes a producer may yield. `Opaque`
//! deliberately has no serialized form: it reaches the export boundary only to
//! be rejected there, which keeps collection itself infallible.

use serde::{Serialize, Serializer};

/// One collected value.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Arbitrary JSON structure (objects, arrays, null).
    Structured(serde_json::Value),
    /// Carries only a diagnostic type name; cannot be serialized.
    Opaque(&'static str),
}

impl Serialize for Variant {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Variant::Integer(v) => serializer.serialize_i64(*v),
            Variant::Float(v) => serializer.serialize_f64(*v),
            Variant::Text(s) => serializer.serialize_str(s),
            Variant::Structured(v) => v.serialize(serializer),
            Variant::Opaque(type_name) => Err(serde::ser::Error::custom(format!(
                "value of type {type_name} has no serialized form"
            ))),
        }
    }
}
