use super::{BaseUnit, ParametricShape};
use crate::geometry::vector::Size;
use crate::instruction::{Command, Shape};
use crate::length::{percent, px, raw, CoordinatePair, LengthPercentage};
use crate::output::CssProperties;
use serde::{Deserialize, Serialize};

/// Rounded square built from four cubic curves meeting at the edge centres.
/// `curvature` is how far from each corner the control points sit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Squircle {
    pub unit: BaseUnit,
    pub curvature: f64,
}

impl Default for Squircle {
    fn default() -> Self {
        Self {
            unit: BaseUnit::Percent,
            curvature: 50.0,
        }
    }
}

impl Squircle {
    pub fn new(unit: BaseUnit, curvature: f64) -> Self {
        Self { unit, curvature }
    }

    fn near(&self) -> LengthPercentage {
        raw("var(--start)", self.unit.length(self.curvature))
    }

    fn far(&self, max_px: f64) -> LengthPercentage {
        let approx = match self.unit {
            BaseUnit::Percent => percent(100.0 - self.curvature),
            BaseUnit::Px => px(max_px - self.curvature),
        };
        raw("var(--end)", approx)
    }
}

impl ParametricShape for Squircle {
    fn to_shape(&self, max: Size) -> Shape {
        let start = || percent(0.0);
        let center = || percent(50.0);
        let end = || percent(100.0);
        let pair = CoordinatePair::new;

        Shape::new(
            pair(center(), start()),
            vec![
                Command::curve(
                    pair(end(), center()),
                    pair(self.far(max.width), start()),
                    Some(pair(end(), self.near())),
                ),
                Command::curve(
                    pair(center(), end()),
                    pair(end(), self.far(max.height)),
                    Some(pair(self.far(max.width), end())),
                ),
                Command::curve(
                    pair(start(), center()),
                    pair(self.near(), end()),
                    Some(pair(start(), self.far(max.height))),
                ),
                Command::curve(
                    pair(center(), start()),
                    pair(start(), self.near()),
                    Some(pair(self.near(), start())),
                ),
            ],
        )
    }

    fn custom_properties(&self) -> CssProperties {
        let mut props = CssProperties::new();
        props.set("--curvature", self.unit.length(self.curvature).to_string());
        props.set("--start", "var(--curvature)");
        props.set("--end", "calc(100% - var(--curvature))");
        props
    }
}
