//! The flat instruction representation of a closed path and its text forms.

use crate::geometry::vector::Size;
use crate::length::{CodeStyle, CoordinatePair};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest logical line before an instruction is split over several lines.
pub const MAX_LINE_WIDTH: usize = 80;

const INDENT: &str = "\n\t\t";
const NESTED_INDENT: &str = "\n\t\t\t";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    Nonzero,
    Evenodd,
}

impl FillRule {
    pub fn keyword(self) -> &'static str {
        match self {
            FillRule::Nonzero => "nonzero",
            FillRule::Evenodd => "evenodd",
        }
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Line {
        to: CoordinatePair,
    },
    /// One control point makes a quadratic curve, two a cubic one.
    Curve {
        to: CoordinatePair,
        control1: CoordinatePair,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        control2: Option<CoordinatePair>,
    },
    Close,
}

fn width(s: &str) -> usize {
    s.chars().count()
}

/// `keyword x y` on one line, or every part on its own indented line.
fn wrap_flat(parts: &[String]) -> String {
    let one_liner = parts.join(" ");
    if width(&one_liner) <= MAX_LINE_WIDTH {
        one_liner
    } else {
        parts.join(INDENT)
    }
}

/// Chunked layout used by curves: the whole instruction on one line if it
/// fits, else one chunk per line, else a chunk's own parts split further.
fn wrap_chunks(chunks: &[Vec<String>]) -> String {
    let one_liner = chunks
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if width(&one_liner) <= MAX_LINE_WIDTH {
        return one_liner;
    }
    chunks
        .iter()
        .map(|chunk| {
            let line = chunk.join(" ");
            if width(&line) <= MAX_LINE_WIDTH {
                line
            } else if chunk.len() >= 3 {
                chunk.join(NESTED_INDENT)
            } else {
                chunk.join(INDENT)
            }
        })
        .collect::<Vec<_>>()
        .join(INDENT)
}

/// Renders the opening `from x y` instruction.
pub fn from_to_css(from: &CoordinatePair, style: CodeStyle) -> String {
    wrap_flat(&["from".to_string(), from.x.to_css(style), from.y.to_css(style)])
}

impl Command {
    pub fn line(to: CoordinatePair) -> Self {
        Command::Line { to }
    }

    pub fn curve(
        to: CoordinatePair,
        control1: CoordinatePair,
        control2: Option<CoordinatePair>,
    ) -> Self {
        Command::Curve { to, control1, control2 }
    }

    /// End point of the segment; `None` for `close`.
    pub fn target(&self) -> Option<&CoordinatePair> {
        match self {
            Command::Line { to } | Command::Curve { to, .. } => Some(to),
            Command::Close => None,
        }
    }

    pub fn to_css(&self, style: CodeStyle) -> String {
        match self {
            Command::Line { to } => {
                wrap_flat(&["line to".to_string(), to.x.to_css(style), to.y.to_css(style)])
            }
            Command::Curve { to, control1, control2 } => {
                let mut chunks = vec![
                    vec!["curve to".to_string()],
                    vec![to.x.to_css(style), to.y.to_css(style)],
                    vec!["with".to_string(), control1.x.to_css(style), control1.y.to_css(style)],
                ];
                if let Some(c2) = control2 {
                    chunks.push(vec!["/".to_string(), c2.x.to_css(style), c2.y.to_css(style)]);
                }
                wrap_chunks(&chunks)
            }
            Command::Close => "close".to_string(),
        }
    }

    /// Path-data segment in pixel coordinates, for previews.
    pub fn to_svg_command(&self, max: Size) -> String {
        match self {
            Command::Line { to } => format!("L {}", to.to_svg_point(max)),
            Command::Curve {
                to,
                control1,
                control2: None,
            } => format!("Q {} {}", control1.to_svg_point(max), to.to_svg_point(max)),
            Command::Curve {
                to,
                control1,
                control2: Some(c2),
            } => format!(
                "C {} {} {}",
                control1.to_svg_point(max),
                c2.to_svg_point(max),
                to.to_svg_point(max)
            ),
            Command::Close => "Z".to_string(),
        }
    }
}

/// A `from` point followed by segments that wrap back to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_rule: Option<FillRule>,
    pub from: CoordinatePair,
    pub commands: Vec<Command>,
}

impl Shape {
    pub fn new(from: CoordinatePair, commands: Vec<Command>) -> Self {
        Self {
            fill_rule: None,
            from,
            commands,
        }
    }

    pub fn with_fill_rule(mut self, fill_rule: Option<FillRule>) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    /// The `shape(...)` function text, one instruction per line.
    pub fn to_css(&self, style: CodeStyle) -> String {
        let from = from_to_css(&self.from, style);
        let first = match self.fill_rule {
            Some(rule) => format!("{} {}", rule, from),
            None => from,
        };
        let mut lines = Vec::with_capacity(self.commands.len() + 1);
        lines.push(first);
        lines.extend(self.commands.iter().map(|c| c.to_css(style)));
        format!("shape(\n\t{}\n)", lines.join(",\n\t"))
    }

    /// Space-separated path data starting with `M`.
    pub fn to_svg_path(&self, max: Size) -> String {
        let mut parts = Vec::with_capacity(self.commands.len() + 1);
        parts.push(format!("M {}", self.from.to_svg_point(max)));
        parts.extend(self.commands.iter().map(|c| c.to_svg_command(max)));
        parts.join(" ")
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css(CodeStyle::Default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::{percent, px, raw};

    fn pair(x: f64, y: f64) -> CoordinatePair {
        CoordinatePair::new(px(x), px(y))
    }

    #[test]
    fn short_instructions_stay_on_one_line() {
        assert_eq!(Command::line(pair(10.0, 20.0)).to_css(CodeStyle::Default), "line to 10px 20px");
        let quad = Command::curve(pair(10.0, 20.0), pair(5.0, 15.0), None);
        assert_eq!(quad.to_css(CodeStyle::Default), "curve to 10px 20px with 5px 15px");
        let cubic = Command::curve(pair(10.0, 20.0), pair(5.0, 15.0), Some(pair(8.0, 12.0)));
        assert_eq!(
            cubic.to_css(CodeStyle::Default),
            "curve to 10px 20px with 5px 15px / 8px 12px"
        );
        assert_eq!(from_to_css(&pair(10.0, 20.0), CodeStyle::Default), "from 10px 20px");
    }

    #[test]
    fn long_line_splits_each_part() {
        let to = CoordinatePair::new(
            raw("calc(100vw - 50px + 10em - 5rem + 20ch)", px(0.0)),
            raw("calc(100vh - 30px + 15em - 8rem + 25ch)", px(0.0)),
        );
        assert_eq!(
            Command::line(to).to_css(CodeStyle::Default),
            "line to\n\t\tcalc(100vw - 50px + 10em - 5rem + 20ch)\n\t\tcalc(100vh - 30px + 15em - 8rem + 25ch)"
        );
    }

    #[test]
    fn long_curve_splits_by_chunk() {
        let to = CoordinatePair::new(
            raw("calc(var(--radius) * cos(0.5turn))", px(0.0)),
            raw("calc(var(--radius) * sin(0.5turn))", px(0.0)),
        );
        let control = CoordinatePair::new(
            raw("calc(var(--radius) * cos(0.25turn))", px(0.0)),
            raw("calc(var(--radius) * sin(0.25turn))", px(0.0)),
        );
        assert_eq!(
            Command::curve(to, control, None).to_css(CodeStyle::Default),
            "curve to\
             \n\t\tcalc(var(--radius) * cos(0.5turn)) calc(var(--radius) * sin(0.5turn))\
             \n\t\twith calc(var(--radius) * cos(0.25turn)) calc(var(--radius) * sin(0.25turn))"
        );
    }

    #[test]
    fn very_long_chunks_split_x_and_y() {
        let to = CoordinatePair::new(
            raw("calc(var(--center-x) + var(--radius) * cos(1turn / var(--sides)))", px(0.0)),
            raw("calc(var(--center-y) + var(--radius) * sin(1turn / var(--sides)))", px(0.0)),
        );
        let control = CoordinatePair::new(
            raw(
                "calc(var(--center-x) + var(--swell-radius) * cos(0.5turn / var(--sides)))",
                px(0.0),
            ),
            raw(
                "calc(var(--center-y) + var(--swell-radius) * sin(0.5turn / var(--sides)))",
                px(0.0),
            ),
        );
        assert_eq!(
            Command::curve(to, control, None).to_css(CodeStyle::Default),
            "curve to\
             \n\t\tcalc(var(--center-x) + var(--radius) * cos(1turn / var(--sides)))\
             \n\t\tcalc(var(--center-y) + var(--radius) * sin(1turn / var(--sides)))\
             \n\t\twith\
             \n\t\t\tcalc(var(--center-x) + var(--swell-radius) * cos(0.5turn / var(--sides)))\
             \n\t\t\tcalc(var(--center-y) + var(--swell-radius) * sin(0.5turn / var(--sides)))"
        );
    }

    #[test]
    fn minimal_style_uses_approximations() {
        let to = CoordinatePair::new(raw("calc(100% - 20px)", px(280.0)), percent(50.0));
        assert_eq!(Command::line(to).to_css(CodeStyle::Minimal), "line to 280px 50%");
    }

    #[test]
    fn shape_text_layout() {
        let shape = Shape::new(
            CoordinatePair::new(percent(50.0), percent(0.0)),
            vec![
                Command::line(CoordinatePair::new(percent(100.0), percent(100.0))),
                Command::Close,
            ],
        );
        assert_eq!(shape.to_string(), "shape(\n\tfrom 50% 0%,\n\tline to 100% 100%,\n\tclose\n)");
        let shape = shape.with_fill_rule(Some(FillRule::Evenodd));
        assert!(shape.to_css(CodeStyle::Default).starts_with("shape(\n\tevenodd from 50% 0%,"));
    }

    #[test]
    fn svg_path_in_pixels() {
        let max = Size::new(300.0, 300.0);
        let shape = Shape::new(
            CoordinatePair::new(percent(50.0), percent(0.0)),
            vec![
                Command::curve(
                    CoordinatePair::new(percent(100.0), percent(100.0)),
                    pair(160.0, -6.0),
                    None,
                ),
                Command::curve(pair(0.0, 300.0), pair(10.0, 10.0), Some(pair(20.0, 20.0))),
                Command::line(CoordinatePair::new(percent(50.0), percent(0.0))),
                Command::Close,
            ],
        );
        assert_eq!(
            shape.to_svg_path(max),
            "M 150 0 Q 160 -6 300 300 C 10 10 20 20 0 300 L 150 0 Z"
        );
    }
}
