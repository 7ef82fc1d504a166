//! Output-space length values and coordinate pairs.

use crate::geometry::tolerance::format_number;
use crate::geometry::vector::{Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How computed values are rendered in the textual output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStyle {
    /// Raw expressions are written out verbatim.
    #[default]
    Default,
    /// Raw expressions are replaced by their numeric approximation.
    Minimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum LengthPercentage {
    Px { value: f64 },
    Percent { value: f64 },
    /// A textual expression such as `calc(var(--radius) * cos(0.5turn))`
    /// paired with a plain length approximating it.
    Raw {
        text: String,
        approx: Box<LengthPercentage>,
    },
}

pub fn px(value: f64) -> LengthPercentage {
    LengthPercentage::Px { value }
}

pub fn percent(value: f64) -> LengthPercentage {
    LengthPercentage::Percent { value }
}

pub fn raw(text: impl Into<String>, approx: LengthPercentage) -> LengthPercentage {
    LengthPercentage::Raw {
        text: text.into(),
        approx: Box::new(approx),
    }
}

impl LengthPercentage {
    pub fn to_css(&self, style: CodeStyle) -> String {
        match self {
            LengthPercentage::Px { value } => format!("{}px", format_number(*value)),
            LengthPercentage::Percent { value } => format!("{}%", format_number(*value)),
            LengthPercentage::Raw { text, approx } => match style {
                CodeStyle::Default => text.clone(),
                CodeStyle::Minimal => approx.to_css(style),
            },
        }
    }

    /// Absolute pixel value along an axis of length `max_px`.
    pub fn to_pixels(&self, max_px: f64) -> f64 {
        match self {
            LengthPercentage::Px { value } => *value,
            LengthPercentage::Percent { value } => value / 100.0 * max_px,
            LengthPercentage::Raw { approx, .. } => approx.to_pixels(max_px),
        }
    }
}

impl fmt::Display for LengthPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css(CodeStyle::Default))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub x: LengthPercentage,
    pub y: LengthPercentage,
}

impl CoordinatePair {
    pub fn new(x: LengthPercentage, y: LengthPercentage) -> Self {
        Self { x, y }
    }

    pub fn to_css(&self, style: CodeStyle) -> String {
        format!("{} {}", self.x.to_css(style), self.y.to_css(style))
    }

    pub fn to_vector(&self, max: Size) -> Vec2 {
        Vec2::new(self.x.to_pixels(max.width), self.y.to_pixels(max.height))
    }

    pub fn to_svg_point(&self, max: Size) -> String {
        let v = self.to_vector(max);
        format!("{} {}", format_number(v.x), format_number(v.y))
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css(CodeStyle::Default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_for_each_unit() {
        assert_eq!(px(10.0).to_css(CodeStyle::Default), "10px");
        assert_eq!(percent(33.3).to_css(CodeStyle::Default), "33.3%");
        let r = raw("calc(100% - 20px)", px(280.0));
        assert_eq!(r.to_css(CodeStyle::Default), "calc(100% - 20px)");
        assert_eq!(r.to_css(CodeStyle::Minimal), "280px");
        assert_eq!(r.to_string(), "calc(100% - 20px)");
    }

    #[test]
    fn pixels_resolve_against_axis() {
        assert_eq!(percent(50.0).to_pixels(300.0), 150.0);
        assert_eq!(px(12.0).to_pixels(300.0), 12.0);
        assert_eq!(raw("var(--x)", percent(10.0)).to_pixels(200.0), 20.0);
    }

    #[test]
    fn coordinate_pair_svg_point_is_in_pixels() {
        let c = CoordinatePair::new(percent(50.0), px(7.0));
        assert_eq!(c.to_svg_point(Size::new(300.0, 100.0)), "150 7");
        assert_eq!(c.to_string(), "50% 7px");
    }
}
