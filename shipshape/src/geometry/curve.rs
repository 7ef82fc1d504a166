//! Line, quadratic and cubic Bézier primitives over absolute pixel vectors.
//!
//! Curves are derived values: a drawing edge plus a container size produces
//! one on demand, and nothing here is stored in the model.

use super::tolerance::{
    approx_eq, clamp01, CLOSEST_POINT_SAMPLES, EPS_POS, REFINEMENT_SAMPLES,
};
use super::vector::{closest_point_on_line, lerp, Projection, Vec2};

/// Degree of a drawing edge, inferred from the control points present on its
/// two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveDegree {
    Line,
    Quadratic,
    Cubic,
}

impl CurveDegree {
    /// No control point gives a line, one gives a quadratic, two a cubic.
    pub fn infer(has_forward: bool, has_backward: bool) -> Self {
        match (has_forward, has_backward) {
            (false, false) => CurveDegree::Line,
            (true, true) => CurveDegree::Cubic,
            _ => CurveDegree::Quadratic,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    Line {
        from: Vec2,
        to: Vec2,
    },
    Quadratic {
        from: Vec2,
        control: Vec2,
        to: Vec2,
    },
    Cubic {
        from: Vec2,
        control1: Vec2,
        control2: Vec2,
        to: Vec2,
    },
}

impl Curve {
    /// Builds the curve for an edge. `control1` is the outgoing vertex's forward
    /// control point and `control2` the incoming vertex's backward one; when
    /// only one is present it becomes the single quadratic control.
    pub fn new(from: Vec2, to: Vec2, control1: Option<Vec2>, control2: Option<Vec2>) -> Self {
        match (control1, control2) {
            (Some(control1), Some(control2)) => Curve::Cubic {
                from,
                control1,
                control2,
                to,
            },
            (Some(control), None) | (None, Some(control)) => Curve::Quadratic { from, control, to },
            (None, None) => Curve::Line { from, to },
        }
    }

    pub fn degree(&self) -> CurveDegree {
        match self {
            Curve::Line { .. } => CurveDegree::Line,
            Curve::Quadratic { .. } => CurveDegree::Quadratic,
            Curve::Cubic { .. } => CurveDegree::Cubic,
        }
    }

    pub fn from(&self) -> Vec2 {
        match *self {
            Curve::Line { from, .. }
            | Curve::Quadratic { from, .. }
            | Curve::Cubic { from, .. } => from,
        }
    }

    pub fn to(&self) -> Vec2 {
        match *self {
            Curve::Line { to, .. } | Curve::Quadratic { to, .. } | Curve::Cubic { to, .. } => to,
        }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1] using de Casteljau's
    /// algorithm. The endpoints are reproduced exactly at `t = 0` and `t = 1`.
    pub fn interpolate(&self, t: f64) -> Vec2 {
        match *self {
            Curve::Line { from, to } => lerp(from, to, t),
            Curve::Quadratic { from, control, to } => {
                let q0 = lerp(from, control, t);
                let q1 = lerp(control, to, t);
                lerp(q0, q1, t)
            }
            Curve::Cubic {
                from,
                control1,
                control2,
                to,
            } => {
                let q0 = lerp(from, control1, t);
                let q1 = lerp(control1, control2, t);
                let q2 = lerp(control2, to, t);
                let r0 = lerp(q0, q1, t);
                let r1 = lerp(q1, q2, t);
                lerp(r0, r1, t)
            }
        }
    }

    /// Approximate nearest point on the curve to `point`.
    ///
    /// Lines use the exact projection. Béziers are sampled uniformly and the
    /// best sample is refined within one sampling interval on either side.
    pub fn closest_point(&self, point: Vec2) -> Projection {
        self.closest_point_with_samples(point, CLOSEST_POINT_SAMPLES)
    }

    pub fn closest_point_with_samples(&self, point: Vec2, samples: usize) -> Projection {
        if let Curve::Line { from, to } = *self {
            return closest_point_on_line(from, to, point);
        }
        if self.is_degenerate() {
            return Projection {
                point: self.from(),
                t: 0.0,
            };
        }

        let samples = samples.max(1);
        let mut best = Projection {
            point: self.from(),
            t: 0.0,
        };
        let mut best_dist = f64::INFINITY;

        for i in 0..=samples {
            let t = i as f64 / samples as f64;
            let p = self.interpolate(t);
            let d = p.distance(point);
            if d < best_dist {
                best_dist = d;
                best = Projection { point: p, t };
            }
        }

        let range = 1.0 / samples as f64;
        let coarse_t = best.t;
        for i in 0..=REFINEMENT_SAMPLES {
            let offset = (i as f64 / REFINEMENT_SAMPLES as f64) * 2.0 * range;
            let t = clamp01(coarse_t - range + offset);
            let p = self.interpolate(t);
            let d = p.distance(point);
            if d < best_dist {
                best_dist = d;
                best = Projection { point: p, t };
            }
        }

        best
    }

    /// True when every endpoint and control point coincides.
    pub fn is_degenerate(&self) -> bool {
        let from = self.from();
        let same = |p: Vec2| approx_eq(p.x, from.x, EPS_POS) && approx_eq(p.y, from.y, EPS_POS);
        match *self {
            Curve::Line { to, .. } => same(to),
            Curve::Quadratic { control, to, .. } => same(control) && same(to),
            Curve::Cubic {
                control1,
                control2,
                to,
                ..
            } => same(control1) && same(control2) && same(to),
        }
    }
}
