//! Property metadata and values.
//!
//! A `Property` is a *definition* (name, type, scope); a `PropertyValue` is a
//! concrete value a product carries for one of those definitions. Definitions
//! are inheritable (catalog → category → product), values are not.

use merx_core::ValueObject;
use serde::{Deserialize, Serialize};

/// Where a property definition applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyScope {
    Catalog,
    Category,
    Product,
    Variation,
}

/// Value type a property accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValueType {
    ShortText,
    LongText,
    Number,
    Boolean,
    DateTime,
}

/// Property definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value_type: PropertyValueType,
    pub scope: PropertyScope,
    pub multivalue: bool,
    pub required: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, value_type: PropertyValueType, scope: PropertyScope) -> Self {
        Self {
            name: name.into(),
            value_type,
            scope,
            multivalue: false,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Property names compare case-insensitively across inheritance levels.
    pub fn same_name(&self, other_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(other_name)
    }
}

impl ValueObject for Property {}

/// Typed payload of a property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum PropertyValueData {
    Text(String),
    Number(f64),
    Boolean(bool),
    DateTime(chrono::DateTime<chrono::Utc>),
}

/// A concrete value a product carries for a property definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    pub property_name: String,
    pub data: PropertyValueData,
    /// Language tag for localizable text values; `None` for invariant values.
    pub language: Option<String>,
}

impl PropertyValue {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: name.into(),
            data: PropertyValueData::Text(value.into()),
            language: None,
        }
    }

    pub fn number(name: impl Into<String>, value: f64) -> Self {
        Self {
            property_name: name.into(),
            data: PropertyValueData::Number(value),
            language: None,
        }
    }
}

impl ValueObject for PropertyValue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names_compare_case_insensitively() {
        let prop = Property::new("Color", PropertyValueType::ShortText, PropertyScope::Product);
        assert!(prop.same_name("color"));
        assert!(prop.same_name("COLOR"));
        assert!(!prop.same_name("colour"));
    }
}
