//! CSS output built from an instruction set.

use crate::config::{OutputConfig, ShapeProperty};
use crate::instruction::Shape;
use crate::length::CodeStyle;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const OFFSET_PATH_ANIMATION: &str = "followPath 5s linear infinite";

pub const OFFSET_PATH_KEYFRAMES: &str = concat!(
    "\n\n@keyframes followPath {",
    "\n\tfrom {\n\t\toffset-distance: 0%;\n\t}",
    "\n\tto {\n\t\toffset-distance: 100%;\n\t}",
    "\n}",
);

/// Ordered `property: value` pairs. Setting an existing property replaces
/// its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssProperties {
    entries: Vec<(String, String)>,
}

impl CssProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn extend(&mut self, other: CssProperties) {
        for (k, v) in other.entries {
            self.set(k, v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declarations joined for a rule body, `key: value;` per line.
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join("\n\t")
    }
}

impl Serialize for CssProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

pub fn clip_path_properties(shape: &Shape, style: CodeStyle) -> CssProperties {
    let mut props = CssProperties::new();
    props.set("clip-path", shape.to_css(style));
    props
}

pub fn offset_path_properties(shape: &Shape, style: CodeStyle) -> CssProperties {
    let mut props = CssProperties::new();
    props.set("offset-path", shape.to_css(style));
    props.set("animation", OFFSET_PATH_ANIMATION);
    props
}

pub fn shape_css_properties(
    shape: &Shape,
    property: ShapeProperty,
    style: CodeStyle,
) -> CssProperties {
    match property {
        ShapeProperty::ClipPath => clip_path_properties(shape, style),
        ShapeProperty::OffsetPath => offset_path_properties(shape, style),
    }
}

/// CSS that must accompany the property block, e.g. keyframes.
pub fn shape_extra_css(property: ShapeProperty) -> &'static str {
    match property {
        ShapeProperty::ClipPath => "",
        ShapeProperty::OffsetPath => OFFSET_PATH_KEYFRAMES,
    }
}

/// Property declarations plus any extra CSS for `config`.
pub fn css_text(properties: &CssProperties, config: &OutputConfig) -> String {
    format!("{}{}", properties.to_css(), shape_extra_css(config.shape_property))
}
