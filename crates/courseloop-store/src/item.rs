//! The flat persistence item
//!
//! A row is a flat map from attribute name to a scalar value. No nesting:
//! every entity field flattens to a string, an integer or null. The two key
//! attributes, `primaryKey` and `sortKey`, are always present and always
//! strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use courseloop_core::{ReconcileError, Result};

/// Key attribute names, fixed across the whole table.
pub const PRIMARY_KEY: &str = "primaryKey";
pub const SORT_KEY: &str = "sortKey";

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    S(String),
    N(i64),
    Null,
}

/// One row of the single table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    attributes: BTreeMap<String, AttrValue>,
}

impl Item {
    /// Create an item with its two key attributes set.
    pub fn new(primary_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        let mut item = Self::default();
        item.set_string(PRIMARY_KEY, primary_key);
        item.set_string(SORT_KEY, sort_key);
        item
    }

    #[must_use]
    pub fn primary_key(&self) -> Option<&str> {
        self.opt_string(PRIMARY_KEY)
    }

    #[must_use]
    pub fn sort_key(&self) -> Option<&str> {
        self.opt_string(SORT_KEY)
    }

    pub fn set(&mut self, name: impl Into<String>, value: AttrValue) {
        self.attributes.insert(name.into(), value);
    }

    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, AttrValue::S(value.into()));
    }

    /// Set a string attribute, writing null when the value is absent.
    pub fn set_opt_string(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        match value {
            Some(v) => self.set_string(name, v),
            None => self.set(name, AttrValue::Null),
        }
    }

    pub fn set_number(&mut self, name: impl Into<String>, value: i64) {
        self.set(name, AttrValue::N(value));
    }

    /// Set a number attribute, writing null when the value is absent.
    pub fn set_opt_number(&mut self, name: impl Into<String>, value: Option<i64>) {
        match value {
            Some(v) => self.set_number(name, v),
            None => self.set(name, AttrValue::Null),
        }
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Read a string attribute; null and absent both read as `None`.
    #[must_use]
    pub fn opt_string(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttrValue::S(s)) => Some(s),
            _ => None,
        }
    }

    /// Read a required string attribute.
    pub fn string(&self, name: &str) -> Result<&str> {
        self.opt_string(name).ok_or_else(|| {
            ReconcileError::source_invalid(format!("missing string attribute: {name}"))
        })
    }

    /// Read a number attribute; null and absent both read as `None`.
    #[must_use]
    pub fn opt_number(&self, name: &str) -> Option<i64> {
        match self.attributes.get(name) {
            Some(AttrValue::N(n)) => Some(*n),
            _ => None,
        }
    }

    /// Read a required number attribute.
    pub fn number(&self, name: &str) -> Result<i64> {
        self.opt_number(name).ok_or_else(|| {
            ReconcileError::source_invalid(format!("missing number attribute: {name}"))
        })
    }

    /// Iterate over all attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
