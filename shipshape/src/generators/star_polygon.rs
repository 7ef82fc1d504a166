use super::{is_rotated, BaseUnit, ParametricShape};
use crate::error::{Result, ShapeError};
use crate::geometry::tolerance::format_number;
use crate::geometry::vector::{Size, Vec2};
use crate::instruction::{Command, Shape};
use crate::length::{raw, CoordinatePair};
use crate::output::CssProperties;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

const MIN_POINTS: u32 = 2;

/// Star alternating between an outer and an inner circle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarPolygon {
    points: u32,
    unit: BaseUnit,
    outer_radius: f64,
    inner_radius: f64,
    center: Vec2,
    rotation: f64,
}

impl StarPolygon {
    pub fn new(points: u32) -> Result<Self> {
        if points < MIN_POINTS {
            return Err(ShapeError::InvalidVertexCount {
                count: points as usize * 2,
                min: MIN_POINTS as usize * 2,
            });
        }
        Ok(Self {
            points,
            unit: BaseUnit::Percent,
            outer_radius: 50.0,
            inner_radius: 20.0,
            center: Vec2::new(50.0, 50.0),
            rotation: 0.0,
        })
    }

    pub fn with_unit(mut self, unit: BaseUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_radii(mut self, outer: f64, inner: f64) -> Self {
        self.outer_radius = outer;
        self.inner_radius = inner;
        self
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    fn point(&self, step: f64, radius_var: &str, radius: f64) -> CoordinatePair {
        let rotated = is_rotated(self.rotation);
        let angle_text = if rotated {
            format!("var(--rotation) + {}turn / var(--points)", format_number(step))
        } else {
            format!("{}turn / var(--points)", format_number(step))
        };
        let rotation = if rotated { self.rotation } else { 0.0 };
        let angle = (rotation + step) * TAU / self.points as f64;
        CoordinatePair::new(
            raw(
                format!("calc(var(--center-x) + var({}) * cos({}))", radius_var, angle_text),
                self.unit.length(self.center.x + radius * angle.cos()),
            ),
            raw(
                format!("calc(var(--center-y) + var({}) * sin({}))", radius_var, angle_text),
                self.unit.length(self.center.y + radius * angle.sin()),
            ),
        )
    }

    fn coordinates(&self) -> Vec<CoordinatePair> {
        (0..self.points)
            .flat_map(|i| {
                let i = i as f64;
                [
                    self.point(i, "--outer-radius", self.outer_radius),
                    self.point(i + 0.5, "--inner-radius", self.inner_radius),
                ]
            })
            .collect()
    }
}

impl ParametricShape for StarPolygon {
    /// Ends on the last inner point; the closing edge is implicit.
    fn to_shape(&self, _max: Size) -> Shape {
        let mut coords = self.coordinates().into_iter();
        let from = coords
            .next()
            .unwrap_or_else(|| self.point(0.0, "--outer-radius", self.outer_radius));
        Shape::new(from, coords.map(Command::line).collect())
    }

    fn custom_properties(&self) -> CssProperties {
        let mut props = CssProperties::new();
        props.set("--points", self.points.to_string());
        props.set("--outer-radius", self.unit.length(self.outer_radius).to_string());
        props.set("--inner-radius", self.unit.length(self.inner_radius).to_string());
        if is_rotated(self.rotation) {
            props.set(
                "--rotation",
                format!("calc({}turn / var(--points))", format_number(self.rotation)),
            );
        }
        props.set("--center-x", self.unit.length(self.center.x).to_string());
        props.set("--center-y", self.unit.length(self.center.y).to_string());
        props
    }
}
