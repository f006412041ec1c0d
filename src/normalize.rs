use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::constants::{DEFAULT_ID_FIELD, DEFAULT_ID_FIELDS};
use crate::query::{query_param_as_id, QuerySource};
use crate::serde_ids::exceeds_safe_range;

/// Ordered, de-duplicated set of field names treated as identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFields {
    names: Vec<String>,
}

impl IdFields {
    /// Build a custom field set; duplicates keep their first position
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Self { names: Vec::new() };
        fields.extend(names);
        fields
    }

    /// The default set plus caller-supplied extras
    pub fn extended<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Self::default();
        fields.extend(extra);
        fields
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for IdFields {
    fn default() -> Self {
        Self::new(DEFAULT_ID_FIELDS)
    }
}

impl<S: Into<String>> Extend<S> for IdFields {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            let name = name.into();
            if !self.contains(&name) {
                self.names.push(name);
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for IdFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Canonical string form of a JSON value.
///
/// Strings pass through, numbers keep the digits they were parsed with,
/// booleans become `"true"`/`"false"` and containers become compact JSON.
fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if exceeds_safe_range(n) {
                trace!(number = %n, "identifier exceeds the f64 safe integer range");
            }
            n.to_string()
        }
        other => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a value to an identifier string.
///
/// `None` (absent), `null` and `""` all yield `None`.
pub fn to_id_string(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => {
            trace!(kind = value_kind(v), "converted value to identifier string");
            Some(canonical_string(v))
        }
    }
}

/// Read `field` from `record` as an identifier string.
///
/// Returns `None` when the record is absent, is not an object, or the field
/// is missing or `null`. Any other value is stringified, including `""`.
pub fn id_as_string(record: Option<&Value>, field: &str) -> Option<String> {
    let id = record
        .and_then(|r| r.get(field))
        .filter(|v| !v.is_null())
        .map(canonical_string);
    trace!(field, found = id.is_some(), "read identifier field");
    id
}

/// `id_as_string` against the conventional `id` field
pub fn id_of(record: Option<&Value>) -> Option<String> {
    id_as_string(record, DEFAULT_ID_FIELD)
}

/// Copy `record`, replacing every non-null identifier field with its string form.
///
/// Non-object input is returned unchanged. Fields outside `fields` are copied
/// as-is, absent identifier fields stay absent and nested values are not
/// visited.
pub fn ensure_ids_as_strings(record: &Value, fields: &IdFields) -> Value {
    let Value::Object(map) = record else {
        return record.clone();
    };

    let normalized: Map<String, Value> = map
        .iter()
        .map(|(key, value)| {
            if fields.contains(key) && !value.is_null() && !value.is_string() {
                trace!(field = %key, "coerced identifier to string");
                (key.clone(), Value::String(canonical_string(value)))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect();

    Value::Object(normalized)
}

/// `ensure_ids_as_strings` with the default identifier fields
pub fn ensure_ids_as_strings_default(record: &Value) -> Value {
    ensure_ids_as_strings(record, &IdFields::default())
}

/// Apply `ensure_ids_as_strings` to every element of an array, keeping order.
///
/// Non-array input is returned unchanged.
pub fn ensure_array_ids_as_strings(records: &Value, fields: &IdFields) -> Value {
    let Value::Array(items) = records else {
        return records.clone();
    };

    debug!(records = items.len(), fields = fields.len(), "normalizing identifier fields");
    Value::Array(
        items
            .iter()
            .map(|item| ensure_ids_as_strings(item, fields))
            .collect(),
    )
}

/// `ensure_array_ids_as_strings` with the default identifier fields
pub fn ensure_array_ids_as_strings_default(records: &Value) -> Value {
    ensure_array_ids_as_strings(records, &IdFields::default())
}

/// The identifier helpers as one capability group.
///
/// Stateless; every function delegates to the free function of the same
/// purpose, so consumers can hold `LongIdUtils` as a single import.
pub struct LongIdUtils;

impl LongIdUtils {
    pub fn to_id_string(value: Option<&Value>) -> Option<String> {
        to_id_string(value)
    }

    pub fn id_as_string(record: Option<&Value>, field: &str) -> Option<String> {
        id_as_string(record, field)
    }

    pub fn param_as_id<Q: QuerySource + ?Sized>(query: &Q, name: &str) -> Option<String> {
        query_param_as_id(query, name)
    }

    pub fn ensure_ids_as_strings(record: &Value, fields: &IdFields) -> Value {
        ensure_ids_as_strings(record, fields)
    }

    pub fn ensure_array_ids_as_strings(records: &Value, fields: &IdFields) -> Value {
        ensure_array_ids_as_strings(records, fields)
    }
}
