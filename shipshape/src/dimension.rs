//! A single editor coordinate with an explicit unit kind.

use crate::geometry::tolerance::{format_number, round_half_up, round_to, PERCENT_PRECISION};
use crate::length::{percent, px, raw, CodeStyle, LengthPercentage};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    Percent,
    PxFromStart,
    PxFromEnd,
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DimensionKind::Percent => "percent",
            DimensionKind::PxFromStart => "px_from_start",
            DimensionKind::PxFromEnd => "px_from_end",
        })
    }
}

/// Immutable value: every transformation returns a new dimension.
///
/// `value` is stored unrounded. Percent values in particular keep the exact
/// ratio so repeated conversions do not drift; rounding happens in
/// [`Dimension::to_rounded`] and when rendering output.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub kind: DimensionKind,
    pub value: f64,
}

impl Dimension {
    pub const fn new(kind: DimensionKind, value: f64) -> Self {
        Self { kind, value }
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(DimensionKind::Percent, value)
    }

    pub const fn px_from_start(value: f64) -> Self {
        Self::new(DimensionKind::PxFromStart, value)
    }

    pub const fn px_from_end(value: f64) -> Self {
        Self::new(DimensionKind::PxFromEnd, value)
    }

    pub fn with_value(self, value: f64) -> Self {
        Self::new(self.kind, value)
    }

    pub fn to_pixels(self, max_px: f64) -> f64 {
        match self.kind {
            DimensionKind::Percent => round_half_up(self.value / 100.0 * max_px),
            DimensionKind::PxFromStart => self.value,
            DimensionKind::PxFromEnd => max_px - self.value,
        }
    }

    pub fn from_pixels(kind: DimensionKind, max_px: f64, px: f64) -> Self {
        match kind {
            DimensionKind::Percent => Self::new(kind, px / max_px * 100.0),
            DimensionKind::PxFromStart => Self::new(kind, px),
            DimensionKind::PxFromEnd => Self::new(kind, max_px - px),
        }
    }

    /// Re-expresses the same absolute position in another unit kind.
    pub fn with_converted_kind(self, kind: DimensionKind, max_px: f64) -> Self {
        Self::from_pixels(kind, max_px, self.to_pixels(max_px))
    }

    /// Display precision: one decimal for percent, whole pixels otherwise.
    pub fn to_rounded(self) -> Self {
        match self.kind {
            DimensionKind::Percent => self.with_value(round_to(self.value, PERCENT_PRECISION)),
            DimensionKind::PxFromStart | DimensionKind::PxFromEnd => {
                self.with_value(round_half_up(self.value))
            }
        }
    }

    pub fn to_translated(self, delta_px: f64, max_px: f64) -> Self {
        Self::from_pixels(self.kind, max_px, self.to_pixels(max_px) + delta_px)
    }

    /// Reflects this dimension through `origin`, keeping this dimension's kind.
    pub fn to_mirrored(self, origin: Dimension, max_px: f64) -> Self {
        let this_px = self.to_pixels(max_px);
        let origin_px = origin.to_pixels(max_px);
        Self::from_pixels(self.kind, max_px, 2.0 * origin_px - this_px)
    }

    pub fn to_length(self, max_px: f64) -> LengthPercentage {
        let rounded = self.to_rounded();
        match self.kind {
            DimensionKind::Percent => percent(rounded.value),
            DimensionKind::PxFromStart => px(rounded.value),
            DimensionKind::PxFromEnd => raw(
                format!("calc(100% - {}px)", format_number(rounded.value)),
                px(max_px - rounded.value),
            ),
        }
    }

    pub fn to_css(self, max_px: f64, style: CodeStyle) -> String {
        self.to_length(max_px).to_css(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_per_kind() {
        assert_eq!(Dimension::percent(50.0).to_pixels(300.0), 150.0);
        assert_eq!(Dimension::percent(33.3).to_pixels(300.0), 100.0);
        assert_eq!(Dimension::px_from_start(25.0).to_pixels(300.0), 25.0);
        assert_eq!(Dimension::px_from_end(25.0).to_pixels(300.0), 275.0);
    }

    #[test]
    fn percent_keeps_unrounded_ratio() {
        let d = Dimension::from_pixels(DimensionKind::Percent, 300.0, 160.0);
        assert!((d.value - 53.333333333333336).abs() < 1e-9);
        assert_eq!(d.to_rounded().value, 53.3);
        assert_eq!(d.to_css(300.0, CodeStyle::Default), "53.3%");
    }

    #[test]
    fn converted_kind_preserves_position() {
        let d = Dimension::percent(25.0);
        let start = d.with_converted_kind(DimensionKind::PxFromStart, 300.0);
        assert_eq!(start, Dimension::px_from_start(75.0));
        let end = d.with_converted_kind(DimensionKind::PxFromEnd, 300.0);
        assert_eq!(end, Dimension::px_from_end(225.0));
        assert_eq!(end.to_css(300.0, CodeStyle::Default), "calc(100% - 225px)");
        assert_eq!(end.to_css(300.0, CodeStyle::Minimal), "75px");
        let back = end.with_converted_kind(DimensionKind::Percent, 300.0);
        assert_eq!(back.to_rounded().value, 25.0);
    }

    #[test]
    fn translate_is_kind_agnostic() {
        for d in [
            Dimension::percent(50.0),
            Dimension::px_from_start(150.0),
            Dimension::px_from_end(150.0),
        ] {
            let moved = d.to_translated(10.0, 300.0);
            assert_eq!(moved.kind, d.kind);
            assert_eq!(moved.to_pixels(300.0), 160.0);
        }
    }

    #[test]
    fn mirror_reflects_in_own_kind() {
        let origin = Dimension::percent(50.0);
        let d = Dimension::px_from_end(130.0); // 170px
        let m = d.to_mirrored(origin, 300.0);
        assert_eq!(m.kind, DimensionKind::PxFromEnd);
        assert_eq!(m.to_pixels(300.0), 130.0);
    }

    #[test]
    fn rounding_per_kind() {
        assert_eq!(Dimension::px_from_start(10.5).to_rounded().value, 11.0);
        assert_eq!(Dimension::px_from_end(-0.5).to_rounded().value, 0.0);
        assert_eq!(Dimension::percent(12.345).to_rounded().value, 12.3);
    }
}
