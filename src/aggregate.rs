/*
    ABSTRACT: Normalization of aggregate `otherData` fields. Senders encode multi-valued
    properties as comma-joined strings under keys containing `listOf` (ordered values) or `setOf`
    (nominally distinct values), e.g. `"listOfSourceIPV4": "10.0.0.1,10.0.0.2"`. The functions
    here expand those entries into collections and leave every other entry alone.
*/
use crate::constants::{EventProps, ThreatEventProps, LIST_OF_MARKER, SET_OF_MARKER};
use crate::error::TypeValidationError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Normalized `otherData`, keyed by the original property names.
pub type OtherData = BTreeMap<String, OtherDataValue>;

/// A single `otherData` entry after normalization.
///
/// Serializes untagged: untouched values as themselves, lists as JSON arrays and sets as
/// arrays of `[index, value]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OtherDataValue {
    /// An entry whose key is not an aggregate key, moved over unchanged.
    Value(Value),
    /// A `listOf` entry. Element `i` is the `i`-th comma-separated substring.
    List(Vec<String>),
    /// A `setOf` entry. Every element is paired with its position in the source string, so
    /// repeated substrings are all kept.
    Set(BTreeSet<(usize, String)>),
}

impl OtherDataValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            OtherDataValue::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OtherDataValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<(usize, String)>> {
        match self {
            OtherDataValue::Set(set) => Some(set),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AggregateKind {
    List,
    Set,
}

// `listOf` wins when a key carries both markers.
fn aggregate_kind(key: &str) -> Option<AggregateKind> {
    if key.contains(LIST_OF_MARKER) {
        Some(AggregateKind::List)
    } else if key.contains(SET_OF_MARKER) {
        Some(AggregateKind::Set)
    } else {
        None
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Splits a `listOf` value on `,` into an ordered list. Substrings are not trimmed and an
/// empty input yields a single empty element.
pub fn create_list_from_aggregate(list_of: &str) -> Vec<String> {
    list_of.split(',').map(str::to_string).collect()
}

/// Splits a `setOf` value on `,` into `(index, substring)` pairs.
pub fn create_set_from_aggregate(set_of: &str) -> BTreeSet<(usize, String)> {
    set_of
        .split(',')
        .enumerate()
        .map(|(idx, value)| (idx, value.to_string()))
        .collect()
}

/// Converts every aggregate field of an `otherData` mapping into a collection.
///
/// Keys containing `listOf` become `OtherDataValue::List`, keys containing `setOf` become
/// `OtherDataValue::Set`, and all other entries are moved into `OtherDataValue::Value`
/// untouched.
///
/// ### Errors
/// - `TypeValidationError` if an aggregate key holds anything but a string.
pub fn convert_aggregate_fields(
    other_data: Map<String, Value>,
) -> Result<OtherData, TypeValidationError> {
    other_data
        .into_iter()
        .map(|(key, value)| {
            let converted = match (aggregate_kind(&key), value) {
                (None, value) => OtherDataValue::Value(value),
                (Some(AggregateKind::List), Value::String(list_of)) => {
                    OtherDataValue::List(create_list_from_aggregate(&list_of))
                }
                (Some(AggregateKind::Set), Value::String(set_of)) => {
                    OtherDataValue::Set(create_set_from_aggregate(&set_of))
                }
                (Some(_), other) => {
                    return Err(TypeValidationError {
                        found: json_type_name(&other),
                        key,
                    })
                }
            };
            Ok((key, converted))
        })
        .collect()
}

/// Removes the `event.otherData` object from a decoded threat event.
///
/// Returns `None`, leaving the structure as it was, when there is no `event` object or its
/// `otherData` member is missing or not an object.
pub fn take_other_data(threat_event: &mut Value) -> Option<Map<String, Value>> {
    let event = threat_event.get_mut(ThreatEventProps::EVENT)?.as_object_mut()?;
    match event.remove(EventProps::OTHER_DATA)? {
        Value::Object(other_data) => Some(other_data),
        other => {
            event.insert(EventProps::OTHER_DATA.to_string(), other);
            None
        }
    }
}
