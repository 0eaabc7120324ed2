//! Variable - Color design tokens with per-mode values.

use crate::color::ColorValue;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reference from a mode value or a bound field to another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    pub id: String,
}

impl VariableAlias {
    /// Create an alias pointing at the given variable id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Value a color variable holds for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableValue {
    /// Concrete color.
    Color(ColorValue),
    /// Indirect reference to another variable.
    VariableAlias(VariableAlias),
}

impl VariableValue {
    /// Get the concrete color, if this value is not an alias.
    pub fn as_color(&self) -> Option<&ColorValue> {
        match self {
            VariableValue::Color(color) => Some(color),
            VariableValue::VariableAlias(_) => None,
        }
    }

    /// Get the alias target, if this value is an alias.
    pub fn as_alias(&self) -> Option<&VariableAlias> {
        match self {
            VariableValue::VariableAlias(alias) => Some(alias),
            VariableValue::Color(_) => None,
        }
    }

    /// Check if this value is an alias.
    pub fn is_alias(&self) -> bool {
        self.as_alias().is_some()
    }
}

/// Values of a variable keyed by mode id, in the host's mode order.
///
/// Serialized as a JSON object. Entries keep the order they were read or
/// inserted in, so alias walks and saved documents follow the host's modes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeValues(Vec<(String, VariableValue)>);

impl ModeValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode: &str) -> Option<&VariableValue> {
        self.0.iter().find(|(m, _)| m == mode).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, mode: &str) -> Option<&mut VariableValue> {
        self.0.iter_mut().find(|(m, _)| m == mode).map(|(_, v)| v)
    }

    /// Set the value for a mode. New modes go last.
    pub fn insert(&mut self, mode: impl Into<String>, value: VariableValue) {
        let mode = mode.into();
        match self.get_mut(&mode) {
            Some(slot) => *slot = value,
            None => self.0.push((mode, value)),
        }
    }

    /// Mode ids and values in mode order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableValue)> {
        self.0.iter().map(|(m, v)| (m.as_str(), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &VariableValue> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ModeValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (mode, value) in &self.0 {
            map.serialize_entry(mode, value)?;
        }
        map.end()
    }
}

struct ModeValuesVisitor;

impl<'de> Visitor<'de> for ModeValuesVisitor {
    type Value = ModeValues;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of mode id to variable value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ModeValues, A::Error> {
        let mut values = ModeValues::new();
        while let Some((mode, value)) = access.next_entry::<String, VariableValue>()? {
            values.insert(mode, value);
        }
        Ok(values)
    }
}

impl<'de> Deserialize<'de> for ModeValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ModeValuesVisitor)
    }
}

/// Color variable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Variable identifier.
    pub id: String,
    /// Display name (e.g., "brand/primary").
    pub name: String,
    /// Collection the variable's modes belong to.
    #[serde(default)]
    pub collection_id: String,
    /// Value per mode id.
    pub values_by_mode: ModeValues,
}

impl Variable {
    /// Create a new variable with no modes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: set a concrete color for a mode.
    pub fn with_color(mut self, mode: impl Into<String>, color: ColorValue) -> Self {
        self.values_by_mode.insert(mode, VariableValue::Color(color));
        self
    }

    /// Builder: alias a mode to another variable.
    pub fn with_alias(mut self, mode: impl Into<String>, target: impl Into<String>) -> Self {
        self.values_by_mode
            .insert(mode, VariableValue::VariableAlias(VariableAlias::new(target)));
        self
    }

    /// Ids of the variables this one aliases, in mode order.
    pub fn alias_targets(&self) -> impl Iterator<Item = &str> {
        self.values_by_mode
            .values()
            .filter_map(VariableValue::as_alias)
            .map(|alias| alias.id.as_str())
    }

    /// Modes holding a concrete color.
    pub fn concrete_modes(&self) -> impl Iterator<Item = (&str, &ColorValue)> {
        self.values_by_mode
            .iter()
            .filter_map(|(mode, value)| value.as_color().map(|c| (mode, c)))
    }

    /// Get the value for a mode.
    pub fn value_for_mode(&self, mode: &str) -> Option<&VariableValue> {
        self.values_by_mode.get(mode)
    }
}
