// ACLStat - Animation compression benchmark statistics
//
// Copyright (c) 2025 the aclstat contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value types for decoded SJSON documents.

use std::collections::BTreeMap;

/// A decoded SJSON value.
///
/// Stat files decode into a tree of these; the record decoder then lifts the
/// tree into the fixed [`crate::record::StatRecord`] schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value (true/false).
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Array of values.
    Array(Vec<Value>),
    /// Object keyed by field name.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a float.
    ///
    /// Integers widen to `f64`: the producer does not distinguish `1` from
    /// `1.0` for measured quantities.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the value as an object.
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field on an object value.
    ///
    /// Returns `None` for non-objects and absent keys alike.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(3.0).as_int(), None);
    }

    #[test]
    fn test_get_on_object() {
        let mut map = BTreeMap::new();
        map.insert("size".to_string(), Value::Int(100));
        let obj = Value::Object(map);
        assert_eq!(obj.get("size").and_then(Value::as_int), Some(100));
        assert!(obj.get("missing").is_none());
        assert!(Value::Null.get("size").is_none());
    }

    #[test]
    fn test_as_array() {
        let arr = Value::Array(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(arr.as_array().map(<[Value]>::len), Some(2));
        assert!(Value::Int(1).as_array().is_none());
    }
}
