// Centralized tolerances and rounding helpers for the unit model and curve math

pub const EPS_LEN: f64 = 1e-12; // zero-length vector threshold (px^2)
pub const EPS_POS: f64 = 1e-9; // point coincidence threshold (px)

// Display precision: percent keeps one decimal, pixels are whole
pub const PERCENT_PRECISION: f64 = 10.0;

// Reflection slack when classifying a control-point pair as mirrored (px)
pub const MIRROR_TOLERANCE_PX: f64 = 1.0;

// A trailing instruction closer than this to `from` is the closing edge (px)
pub const CLOSE_TOLERANCE_PX: f64 = 0.5;

// Closest-point sampling
pub const CLOSEST_POINT_SAMPLES: usize = 50;
pub const REFINEMENT_SAMPLES: usize = 10;

#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.max(0.0).min(1.0)
}

#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Rounds half-way cases toward positive infinity (`-2.5` becomes `-2`).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Rounds to `1 / precision` steps, e.g. `precision = 10.0` keeps one decimal.
#[inline]
pub fn round_to(x: f64, precision: f64) -> f64 {
    round_half_up(x * precision) / precision
}

/// Maps `-0.0` to `0.0` so it never reaches formatted output.
#[inline]
pub fn positive_zero(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x
    }
}

/// Formats a number the shortest way without trailing zeros.
///
/// Values are snapped to three decimals first so float noise from
/// trigonometric approximations does not leak into CSS text.
pub fn format_number(x: f64) -> String {
    let snapped = positive_zero(round_to(x, 1000.0));
    format!("{}", snapped)
}
