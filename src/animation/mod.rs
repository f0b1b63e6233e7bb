pub mod digit;
pub mod easing;
pub mod morph;
pub mod scale;

use kurbo::Point;
use serde::{Deserialize, Serialize};

pub use digit::{AnimationPhase, DigitAnimation, DigitSequence, TickOutcome};
pub use easing::Easing;
pub use morph::{interpolate, Geometry};
pub use scale::Scale;

/// Linear interpolation, exact at both ends. Not clamped: `t` outside
/// [0, 1] extrapolates.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (1.0 - t) * from + t * to
}

/// Componentwise [`lerp`] of two points.
pub fn lerp_point(from: Point, to: Point, t: f64) -> Point {
    Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
}

/// What to do with eased fractions outside [0, 1] (overshoot, anticipate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FractionPolicy {
    /// Pass through, letting the outline overshoot its target
    #[default]
    Extrapolate,
    Clamp,
}

impl FractionPolicy {
    pub fn resolve(self, t: f64) -> f64 {
        match self {
            FractionPolicy::Extrapolate => t,
            FractionPolicy::Clamp => t.clamp(0.0, 1.0),
        }
    }
}

/// When a changing glyph width should ask the host to re-measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelayoutPolicy {
    /// Every frame whose interpolated width differs from the last one
    #[default]
    EveryFrame,
    /// Only once a transition has landed
    OnCompletion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_is_exact_at_endpoints() {
        assert_eq!(lerp(0.1, 0.7, 0.0), 0.1);
        assert_eq!(lerp(0.1, 0.7, 1.0), 0.7);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn clamp_policy_limits_fraction() {
        assert_eq!(FractionPolicy::Clamp.resolve(1.2), 1.0);
        assert_eq!(FractionPolicy::Clamp.resolve(-0.2), 0.0);
        assert_eq!(FractionPolicy::Extrapolate.resolve(1.2), 1.2);
    }
}
