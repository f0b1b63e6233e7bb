//! Timing curves mapping linear elapsed fraction to eased progress.
//!
//! Curves are stateless: [`Easing::apply`] is a pure function of the variant
//! and the input, so one value can be shared by any number of digits.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

const ANTICIPATE_TENSION: f64 = 2.0;
const OVERSHOOT_TENSION: f64 = 2.0;
const ANTICIPATE_OVERSHOOT_TENSION: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Accelerate,
    Decelerate,
    #[default]
    AccelerateDecelerate,
    Anticipate,
    Overshoot,
    AnticipateOvershoot,
    Bounce,
    /// One full sine wave; ends back where it started
    Cycle,
}

impl Easing {
    pub const ALL: [Easing; 9] = [
        Easing::Linear,
        Easing::Accelerate,
        Easing::Decelerate,
        Easing::AccelerateDecelerate,
        Easing::Anticipate,
        Easing::Overshoot,
        Easing::AnticipateOvershoot,
        Easing::Bounce,
        Easing::Cycle,
    ];

    /// Eased progress for a linear fraction `x`.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Easing::Linear => x,
            Easing::Accelerate => x * x,
            Easing::Decelerate => 1.0 - (1.0 - x) * (1.0 - x),
            Easing::AccelerateDecelerate => ((x + 1.0) * PI).cos() / 2.0 + 0.5,
            Easing::Anticipate => anticipate(x, ANTICIPATE_TENSION),
            Easing::Overshoot => overshoot(x - 1.0, OVERSHOOT_TENSION) + 1.0,
            Easing::AnticipateOvershoot => {
                let t = ANTICIPATE_OVERSHOOT_TENSION;
                if x < 0.5 {
                    0.5 * anticipate(x * 2.0, t)
                } else {
                    0.5 * (overshoot(x * 2.0 - 2.0, t) + 2.0)
                }
            }
            Easing::Bounce => bounce_out(x),
            Easing::Cycle => (2.0 * PI * x).sin(),
        }
    }

    /// The next curve in [`Easing::ALL`], wrapping around.
    pub fn cycle_next(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Accelerate => "accelerate",
            Easing::Decelerate => "decelerate",
            Easing::AccelerateDecelerate => "accelerate-decelerate",
            Easing::Anticipate => "anticipate",
            Easing::Overshoot => "overshoot",
            Easing::AnticipateOvershoot => "anticipate-overshoot",
            Easing::Bounce => "bounce",
            Easing::Cycle => "cycle",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|e| e.label() == wanted)
            .ok_or_else(|| format!("unknown easing \"{s}\""))
    }
}

fn anticipate(x: f64, tension: f64) -> f64 {
    x * x * ((tension + 1.0) * x - tension)
}

fn overshoot(x: f64, tension: f64) -> f64 {
    x * x * ((tension + 1.0) * x + tension)
}

fn bounce(t: f64) -> f64 {
    t * t * 8.0
}

fn bounce_out(x: f64) -> f64 {
    let t = x * 1.1226;
    if t < 0.3535 {
        bounce(t)
    } else if t < 0.7408 {
        bounce(t - 0.54719) + 0.7
    } else if t < 0.9644 {
        bounce(t - 0.8526) + 0.9
    } else {
        bounce(t - 1.0435) + 0.95
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn default_is_accelerate_decelerate() {
        assert_eq!(Easing::default(), Easing::AccelerateDecelerate);
    }

    #[test]
    fn curves_start_at_zero() {
        for easing in Easing::ALL {
            assert!(close(easing.apply(0.0), 0.0), "{easing}");
        }
    }

    #[test]
    fn curves_except_cycle_end_at_one() {
        for easing in Easing::ALL.into_iter().filter(|e| *e != Easing::Cycle) {
            assert!(close(easing.apply(1.0), 1.0), "{easing}: {}", easing.apply(1.0));
        }
        assert!(close(Easing::Cycle.apply(1.0), 0.0));
    }

    #[test]
    fn linear_is_identity() {
        for x in [-0.5, 0.0, 0.25, 0.5, 1.0, 1.5] {
            assert_eq!(Easing::Linear.apply(x), x);
        }
    }

    #[test]
    fn accelerate_decelerate_is_symmetric_about_midpoint() {
        let e = Easing::AccelerateDecelerate;
        assert!(close(e.apply(0.5), 0.5));
        assert!(close(e.apply(0.25) + e.apply(0.75), 1.0));
        assert!(e.apply(0.1) < 0.1);
    }

    #[test]
    fn overshoot_and_anticipate_leave_the_unit_range() {
        assert!(Easing::Overshoot.apply(0.8) > 1.0);
        assert!(Easing::Anticipate.apply(0.2) < 0.0);
    }

    #[test]
    fn parse_accepts_labels_and_underscores() {
        assert_eq!("bounce".parse::<Easing>(), Ok(Easing::Bounce));
        assert_eq!(
            "Anticipate_Overshoot".parse::<Easing>(),
            Ok(Easing::AnticipateOvershoot)
        );
        assert!("wobbly".parse::<Easing>().is_err());
    }

    #[test]
    fn cycle_next_visits_every_curve() {
        let mut e = Easing::Linear;
        for _ in 0..Easing::ALL.len() {
            e = e.cycle_next();
        }
        assert_eq!(e, Easing::Linear);
    }
}
