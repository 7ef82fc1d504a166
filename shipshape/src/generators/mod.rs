//! Parametric shapes whose coordinates are CSS expressions over custom
//! properties, each paired with a numeric approximation.

use crate::config::OutputConfig;
use crate::geometry::vector::Size;
use crate::instruction::Shape;
use crate::length::{percent, px, CodeStyle, LengthPercentage};
use crate::output::{shape_css_properties, CssProperties};
use serde::{Deserialize, Serialize};

pub mod regular_polygon;
pub mod squircle;
pub mod star_polygon;

pub use regular_polygon::RegularPolygon;
pub use squircle::Squircle;
pub use star_polygon::StarPolygon;

/// Unit the generator's numeric parameters are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    #[default]
    Percent,
    Px,
}

impl BaseUnit {
    pub fn length(self, value: f64) -> LengthPercentage {
        match self {
            BaseUnit::Percent => percent(value),
            BaseUnit::Px => px(value),
        }
    }
}

pub trait ParametricShape {
    fn to_shape(&self, max: Size) -> Shape;

    /// Custom properties referenced by the raw coordinate expressions.
    fn custom_properties(&self) -> CssProperties;

    /// Custom properties (default code style only) followed by the shape
    /// property block.
    fn to_css_properties(&self, config: &OutputConfig) -> CssProperties {
        let mut props = match config.code_style {
            CodeStyle::Default => self.custom_properties(),
            CodeStyle::Minimal => CssProperties::new(),
        };
        let shape = self.to_shape(config.preview_size);
        props.extend(shape_css_properties(&shape, config.shape_property, config.code_style));
        props
    }
}

/// Rotation counts whole steps between corners; only a fractional part
/// changes the outline.
pub(crate) fn is_rotated(rotation: f64) -> bool {
    rotation % 1.0 != 0.0
}
