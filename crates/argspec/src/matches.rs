//! Parsed values and typed accessors.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::QueryError;
use crate::value::{FromValue, TypedValue};

/// Values recorded by a parse, keyed by argument name in the order they were
/// recorded.
///
/// Typed reads require a completed parse. [`Matches::find`] does not, so a
/// caller can still ask whether `--help` was seen after a failed attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches {
    values: IndexMap<String, Vec<TypedValue>>,
    completed: bool,
}

impl Matches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last parse succeeded.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether anything was recorded under `name`.
    pub fn find(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Raw values recorded under `name`.
    pub fn values(&self, name: &str) -> Option<&[TypedValue]> {
        self.values.get(name).map(|v| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TypedValue])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values of `name` as `T`.
    pub fn get_all<T: FromValue>(&self, name: &str) -> Result<Vec<T>, QueryError> {
        let Some(values) = self.recorded(name)? else {
            return Err(QueryError::NotFound {
                name: name.to_string(),
            });
        };
        convert_all(name, values)
    }

    /// All values of `name` as `T`, or `[default]` if nothing was recorded.
    pub fn get_all_or<T: FromValue>(&self, name: &str, default: T) -> Result<Vec<T>, QueryError> {
        match self.recorded(name)? {
            Some(values) => convert_all(name, values),
            None => Ok(vec![default]),
        }
    }

    /// First value of `name` as `T`.
    pub fn get_first<T: FromValue>(&self, name: &str) -> Result<T, QueryError> {
        let Some(values) = self.recorded(name)? else {
            return Err(QueryError::NotFound {
                name: name.to_string(),
            });
        };
        let Some(first) = values.first() else {
            return Err(QueryError::Empty {
                name: name.to_string(),
            });
        };
        convert(name, first)
    }

    /// First value of `name` as `T`, or `default` if there is none.
    pub fn get_first_or<T: FromValue>(&self, name: &str, default: T) -> Result<T, QueryError> {
        match self.recorded(name)?.and_then(|values| values.first()) {
            Some(first) => convert(name, first),
            None => Ok(default),
        }
    }

    fn recorded(&self, name: &str) -> Result<Option<&[TypedValue]>, QueryError> {
        if !self.completed {
            return Err(QueryError::NotParsed);
        }
        Ok(self.values(name))
    }

    pub(crate) fn reset(&mut self) {
        self.values.clear();
        self.completed = false;
    }

    /// Record `values` under `name`. A name already recorded keeps its
    /// first list.
    pub(crate) fn push_values(&mut self, name: &str, values: Vec<TypedValue>) {
        if !self.values.contains_key(name) {
            self.values.insert(name.to_string(), values);
        }
    }

    pub(crate) fn mark_complete(&mut self) {
        self.completed = true;
    }
}

fn convert<T: FromValue>(name: &str, value: &TypedValue) -> Result<T, QueryError> {
    value.get::<T>().map_err(|source| QueryError::Conversion {
        name: name.to_string(),
        source,
    })
}

fn convert_all<T: FromValue>(name: &str, values: &[TypedValue]) -> Result<Vec<T>, QueryError> {
    values.iter().map(|v| convert(name, v)).collect()
}

impl Serialize for Matches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, values) in &self.values {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}
