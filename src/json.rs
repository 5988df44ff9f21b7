//! JSON rendering of emitted records.

use crate::value::{Record, Value};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// 2^63; an `i64` holds exactly `-2^63..2^63`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Integer-flagged numbers serialize as JSON integers while they fit an `i64`;
/// everything else serializes as a float.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Number {
                value,
                integer: true,
            } if (-I64_LIMIT..I64_LIMIT).contains(value) => {
                serializer.serialize_i64(*value as i64)
            }
            Value::Number { value, .. } => serializer.serialize_f64(*value),
            Value::String(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// Renders records as a JSON array; `pretty` indents by two spaces.
pub fn to_json(records: &[Record], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}
