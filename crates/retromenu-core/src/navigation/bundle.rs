//! String-keyed state bundle
//!
//! Holds the navigation state across a host teardown/recreate cycle
//! (screen rotation). Serde-serialisable so hosts can persist it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bundle value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleValue {
    Int(i64),
    Str(String),
    Bundle(Bundle),
}

/// Flat key/value container with nested bundles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    entries: BTreeMap<String, BundleValue>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), BundleValue::Str(value.into()));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), BundleValue::Int(value));
    }

    pub fn put_bundle(&mut self, key: impl Into<String>, value: Bundle) {
        self.entries.insert(key.into(), BundleValue::Bundle(value));
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(BundleValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer value, or `default` when absent or of another type
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.entries.get(key) {
            Some(BundleValue::Int(v)) => *v,
            _ => default,
        }
    }

    pub fn get_bundle(&self, key: &str) -> Option<&Bundle> {
        match self.entries.get(key) {
            Some(BundleValue::Bundle(b)) => Some(b),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
