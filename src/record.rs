//! Catalogue records as handed over by the fetch/parse collaborator.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::registry::NameHasher;

/// A raw catalogue value. The flat-file format is textual, so numeric
/// parameters may arrive either as numbers or as numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// The value as a number, if it is one or is text that parses as one. NaN is never a number here.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (!n.is_nan()).then_some(n)
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.trim()),
            Value::Number(_) => None,
        }
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One measured parameter: its value plus optional uncertainty and literature reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
impl Slot {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            error: None,
            reference: None,
        }
    }
    pub fn with_error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// One catalogue entry. A parameter without a slot was not measured for the object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    slots: HashMap<String, Slot, NameHasher>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }
    /// Parses a record from a JSON object of `name -> slot`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    pub fn with(mut self, name: impl Into<String>, slot: Slot) -> Self {
        self.insert(name, slot);
        self
    }
    /// Shorthand for a slot that only carries a value.
    pub fn with_value(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(name, Slot::new(value))
    }
    pub fn insert(&mut self, name: impl Into<String>, slot: Slot) -> Option<Slot> {
        self.slots.insert(name.into(), slot)
    }
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
