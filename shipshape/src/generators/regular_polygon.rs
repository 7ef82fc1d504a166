use super::{is_rotated, BaseUnit, ParametricShape};
use crate::error::{Result, ShapeError, MIN_VERTICES};
use crate::geometry::tolerance::format_number;
use crate::geometry::vector::{Size, Vec2};
use crate::instruction::{Command, Shape};
use crate::length::{raw, CoordinatePair};
use crate::output::CssProperties;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Polygon with equal sides inscribed in a circle. A `swell` other than 1
/// bends every side into a quadratic curve whose control point sits at
/// `swell` times the apothem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularPolygon {
    sides: u32,
    unit: BaseUnit,
    radius: f64,
    center: Vec2,
    /// In steps between corners: 0.5 turns the polygon by half a side.
    rotation: f64,
    swell: f64,
}

impl RegularPolygon {
    pub fn new(sides: u32) -> Result<Self> {
        if (sides as usize) < MIN_VERTICES {
            return Err(ShapeError::InvalidVertexCount {
                count: sides as usize,
                min: MIN_VERTICES,
            });
        }
        Ok(Self {
            sides,
            unit: BaseUnit::Percent,
            radius: 50.0,
            center: Vec2::new(50.0, 50.0),
            rotation: 0.0,
            swell: 1.0,
        })
    }

    pub fn with_unit(mut self, unit: BaseUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
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

    pub fn with_swell(mut self, swell: f64) -> Self {
        self.swell = swell;
        self
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    fn has_swell(&self) -> bool {
        self.swell != 1.0
    }

    fn angle_text(&self, step: f64) -> String {
        if is_rotated(self.rotation) {
            format!("var(--rotation) + {}turn / var(--sides)", format_number(step))
        } else {
            format!("{}turn / var(--sides)", format_number(step))
        }
    }

    fn angle(&self, step: f64) -> f64 {
        let rotation = if is_rotated(self.rotation) { self.rotation } else { 0.0 };
        (rotation + step) * TAU / self.sides as f64
    }

    fn point(&self, step: f64, radius_var: &str, radius: f64) -> CoordinatePair {
        let angle_text = self.angle_text(step);
        let angle = self.angle(step);
        let x = raw(
            format!("calc(var(--center-x) + var({}) * cos({}))", radius_var, angle_text),
            self.unit.length(self.center.x + radius * angle.cos()),
        );
        let y = raw(
            format!("calc(var(--center-y) + var({}) * sin({}))", radius_var, angle_text),
            self.unit.length(self.center.y + radius * angle.sin()),
        );
        CoordinatePair::new(x, y)
    }

    fn corner(&self, index: u32) -> CoordinatePair {
        self.point(index as f64, "--radius", self.radius)
    }

    fn swell_control(&self, to_index: u32) -> CoordinatePair {
        let swell_radius = self.radius * (PI / self.sides as f64).cos() * self.swell;
        self.point(to_index as f64 - 0.5, "--swell-radius", swell_radius)
    }
}

impl ParametricShape for RegularPolygon {
    /// Starts at corner 0 and ends back on it.
    fn to_shape(&self, _max: Size) -> Shape {
        let commands = (1..=self.sides)
            .map(|i| {
                if self.has_swell() {
                    Command::curve(self.corner(i), self.swell_control(i), None)
                } else {
                    Command::line(self.corner(i))
                }
            })
            .collect();
        Shape::new(self.corner(0), commands)
    }

    fn custom_properties(&self) -> CssProperties {
        let mut props = CssProperties::new();
        props.set("--sides", self.sides.to_string());
        props.set("--radius", self.unit.length(self.radius).to_string());
        if self.has_swell() {
            props.set("--swell", format_number(self.swell));
            props.set(
                "--swell-radius",
                "calc(var(--radius) * cos(pi / var(--sides)) * var(--swell))",
            );
        }
        if is_rotated(self.rotation) {
            props.set(
                "--rotation",
                format!("calc({}turn / var(--sides))", format_number(self.rotation)),
            );
        }
        props.set("--center-x", self.unit.length(self.center.x).to_string());
        props.set("--center-y", self.unit.length(self.center.y).to_string());
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfig;
    use crate::length::CodeStyle;

    const MAX: Size = Size::new(300.0, 300.0);

    #[test]
    fn needs_three_sides() {
        assert!(RegularPolygon::new(2).is_err());
        assert_eq!(RegularPolygon::new(3).unwrap().sides(), 3);
    }

    #[test]
    fn hexagon_corners() {
        let shape = RegularPolygon::new(6).unwrap().to_shape(MAX);
        assert_eq!(shape.commands.len(), 6);
        assert_eq!(shape.from.to_css(CodeStyle::Minimal), "100% 50%");
        assert_eq!(shape.commands[0].to_css(CodeStyle::Minimal), "line to 75% 93.301%");
        assert_eq!(shape.commands[5].to_css(CodeStyle::Minimal), "line to 100% 50%");
        assert_eq!(
            shape.from.x.to_css(CodeStyle::Default),
            "calc(var(--center-x) + var(--radius) * cos(0turn / var(--sides)))"
        );
    }

    #[test]
    fn swell_makes_quadratic_sides() {
        let shape = RegularPolygon::new(4).unwrap().with_swell(1.5).to_shape(MAX);
        match &shape.commands[0] {
            Command::Curve { control1, control2, .. } => {
                assert!(control2.is_none());
                assert!(control1.y.to_css(CodeStyle::Default).contains("var(--swell-radius)"));
                let css = control1.x.to_css(CodeStyle::Default);
                assert!(css.contains("cos(0.5turn / var(--sides))"));
            }
            other => panic!("expected a curve, got {:?}", other),
        }
    }

    #[test]
    fn custom_properties_follow_parameters() {
        let plain = RegularPolygon::new(5).unwrap().custom_properties();
        let keys: Vec<&str> = plain.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["--sides", "--radius", "--center-x", "--center-y"]);
        assert_eq!(plain.get("--radius"), Some("50%"));

        let rotated = RegularPolygon::new(5)
            .unwrap()
            .with_unit(BaseUnit::Px)
            .with_radius(100.0)
            .with_rotation(0.5)
            .with_swell(2.0)
            .custom_properties();
        assert_eq!(rotated.get("--rotation"), Some("calc(0.5turn / var(--sides))"));
        assert_eq!(rotated.get("--swell"), Some("2"));
        assert_eq!(rotated.get("--radius"), Some("100px"));
    }

    #[test]
    fn minimal_output_drops_custom_properties() {
        let config = OutputConfig {
            code_style: CodeStyle::Minimal,
            ..OutputConfig::default()
        };
        let props = RegularPolygon::new(3).unwrap().to_css_properties(&config);
        assert_eq!(props.len(), 1);
        assert!(!props.get("clip-path").unwrap().contains("var("));
        let props = RegularPolygon::new(3).unwrap().to_css_properties(&OutputConfig::default());
        assert_eq!(props.iter().last().map(|(k, _)| k), Some("clip-path"));
        assert_eq!(props.get("--sides"), Some("3"));
    }
}
