//! Uniform scale applied to canonical glyph geometry.
//!
//! Glyph outlines stay at unit scale in the registry; each view keeps its
//! own [`Scale`] and derives scaled geometry on read. Setting the scale is
//! always absolute, so repeated changes never accumulate rounding drift.

use tracing::trace;

use super::morph::Geometry;
use crate::error::{MorphError, MorphResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    value: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}

impl Scale {
    pub fn new(value: f64) -> MorphResult<Self> {
        validate(value)?;
        Ok(Self { value })
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    /// Set the absolute scale.
    ///
    /// Returns the ratio `new / previous`, or `None` when the scale is
    /// unchanged.
    pub fn set(&mut self, value: f64) -> MorphResult<Option<f64>> {
        validate(value)?;
        if value == self.value {
            return Ok(None);
        }
        let ratio = value / self.value;
        trace!(from = self.value, to = value, ratio, "scale changed");
        self.value = value;
        Ok(Some(ratio))
    }

    /// Scale canonical geometry to the current factor.
    pub fn apply(&self, canonical: &Geometry) -> Geometry {
        canonical.scaled(self.value)
    }

    /// Scale a single canonical length.
    pub fn length(&self, canonical: f64) -> f64 {
        canonical * self.value
    }
}

fn validate(value: f64) -> MorphResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(MorphError::InvalidScale(value))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::glyph::table;

    #[test]
    fn rejects_zero_negative_and_nan() {
        let mut scale = Scale::default();
        assert!(matches!(scale.set(0.0), Err(MorphError::InvalidScale(_))));
        assert!(matches!(scale.set(-2.0), Err(MorphError::InvalidScale(_))));
        assert!(matches!(scale.set(f64::NAN), Err(MorphError::InvalidScale(_))));
        assert!(Scale::new(0.0).is_err());
        assert_eq!(scale.get(), 1.0);
    }

    #[test]
    fn same_scale_is_a_no_op() {
        let mut scale = Scale::new(2.0).unwrap();
        assert_eq!(scale.set(2.0).unwrap(), None);
    }

    #[test]
    fn ratio_is_relative_to_previous() {
        let mut scale = Scale::new(2.0).unwrap();
        assert_eq!(scale.set(3.0).unwrap(), Some(1.5));
        assert_eq!(scale.get(), 3.0);
    }

    proptest! {
        #[test]
        fn prop_scale_round_trip_restores_geometry(s1 in 0.01f64..50.0, s2 in 0.01f64..50.0) {
            prop_assume!(s1 != s2);
            let canonical = Geometry::from(&table::FIVE);
            let mut scale = Scale::new(s1).unwrap();
            let before = scale.apply(&canonical);
            scale.set(s2).unwrap();
            scale.set(s1).unwrap();
            prop_assert_eq!(scale.apply(&canonical), before);
        }
    }
}
