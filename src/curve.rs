//! Superformula curve generation.
//!
//! The superformula describes a closed curve in polar form:
//!
//! ```text
//! r(θ) = 1 / ( |cos(m·θ/4) / a|^n2 + |sin(m·θ/4) / b|^n3 )^n1
//! ```
//!
//! [`radius_at`] evaluates it for one angle; [`sample_shape`] walks a full
//! turn and projects each sample into integer screen coordinates.

use std::f64::consts::TAU;

use glam::{DVec2, IVec2};

/// The six parameters of one superformula curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    /// Horizontal scale divisor.
    pub a: f64,
    /// Vertical scale divisor.
    pub b: f64,
    /// Rotational symmetry (harmonic count).
    pub m: f64,
    /// Outer exponent.
    pub n1: f64,
    /// Exponent applied to the cosine term.
    pub n2: f64,
    /// Exponent applied to the sine term.
    pub n3: f64,
}

impl ShapeParams {
    /// Unit divisors and unit outer exponent, with the given harmonic count
    /// and the two animated exponents.
    #[must_use]
    pub fn with_harmonic(m: f64, n2: f64, n3: f64) -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            m,
            n1: 1.0,
            n2,
            n3,
        }
    }

    /// Radius of this curve at `theta` (radians).
    #[must_use]
    pub fn radius_at(&self, theta: f64) -> f64 {
        radius_at(theta, self.a, self.b, self.m, self.n1, self.n2, self.n3)
    }
}

/// Evaluate the superformula at `theta`.
///
/// Zero divisors are not guarded: they produce infinite or NaN radii, which
/// flow through to a single degenerate point rather than an error.
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn radius_at(
    theta: f64,
    a: f64,
    b: f64,
    m: f64,
    n1: f64,
    n2: f64,
    n3: f64,
) -> f64 {
    let phase = m * theta / 4.0;
    let cos_term = (phase.cos() / a).abs().powf(n2);
    let sin_term = (phase.sin() / b).abs().powf(n3);
    1.0 / (cos_term + sin_term).powf(n1)
}

/// Upper bound on samples per shape. Four shapes at this count still fit a
/// 256 MiB vertex buffer.
pub const MAX_POINTS: usize = 1 << 20;

/// Number of samples taken over one full turn: `ceil(2π / smooth_step)`.
///
/// Returns 0 for a non-positive or non-finite step, and never more than
/// [`MAX_POINTS`].
#[must_use]
pub fn point_count(smooth_step: f64) -> usize {
    if !(smooth_step.is_finite() && smooth_step > 0.0) {
        return 0;
    }
    ((TAU / smooth_step).ceil() as usize).min(MAX_POINTS)
}

/// Smallest step whose full turn fits in [`MAX_POINTS`] samples.
#[must_use]
pub fn min_smooth_step() -> f64 {
    TAU / MAX_POINTS as f64
}

/// Sample a full turn of `params` around `center`.
///
/// The result always holds exactly [`point_count`]`(smooth_step)` points.
#[must_use]
pub fn sample_shape(
    params: &ShapeParams,
    center: DVec2,
    scale: f64,
    smooth_step: f64,
) -> Vec<IVec2> {
    let mut points = Vec::with_capacity(point_count(smooth_step));
    sample_shape_into(params, center, scale, smooth_step, &mut points);
    points
}

/// Like [`sample_shape`], but refills a caller-owned buffer.
pub fn sample_shape_into(
    params: &ShapeParams,
    center: DVec2,
    scale: f64,
    smooth_step: f64,
    points: &mut Vec<IVec2>,
) {
    points.clear();
    // Angles come from the sample index, never from a running sum, so the
    // count cannot drift from point_count().
    points.extend((0..point_count(smooth_step)).map(|i| {
        let theta = i as f64 * smooth_step;
        let rad = params.radius_at(theta);
        let (sin, cos) = theta.sin_cos();
        to_pixel(DVec2::new(rad * cos, rad * sin) * scale + center)
    }));
}

/// Round to the nearest pixel. `as` saturates: NaN becomes 0 and infinities
/// clamp to the `i32` range.
fn to_pixel(p: DVec2) -> IVec2 {
    IVec2::new(p.x.round() as i32, p.y.round() as i32)
}
