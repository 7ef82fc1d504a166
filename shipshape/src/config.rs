//! Output settings shared by the editor and the generators.

use crate::error::{Result, ShapeError};
use crate::geometry::limits;
use crate::geometry::vector::Size;
use crate::length::CodeStyle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CSS property the generated `shape()` is written to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeProperty {
    #[default]
    ClipPath,
    OffsetPath,
}

impl ShapeProperty {
    pub fn name(self) -> &'static str {
        match self {
            ShapeProperty::ClipPath => "clip-path",
            ShapeProperty::OffsetPath => "offset-path",
        }
    }
}

impl fmt::Display for ShapeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    pub shape_property: ShapeProperty,
    pub code_style: CodeStyle,
    /// Container extent every pixel conversion is made against.
    pub preview_size: Size,
}

impl OutputConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: OutputConfig =
            serde_json::from_str(s).map_err(|e| ShapeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let Size { width, height } = self.preview_size;
        if limits::in_size_bounds(width) && limits::in_size_bounds(height) {
            Ok(())
        } else {
            Err(ShapeError::Config(format!(
                "preview size must be positive and at most {}, got {}x{}",
                limits::SIZE_MAX,
                width,
                height
            )))
        }
    }
}
