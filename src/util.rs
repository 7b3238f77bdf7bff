use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(test)]
use approx::AbsDiffEq;

/// An angle wrapped onto a single turn.
///
/// Compass headings and longitudes arrive from sensors and stored records in whatever range the
/// producer happened to use ([0°, 360°), [-180°, 180°), or unwrapped). This normalizes them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BoundedAngle {
    radians: f64,
}

impl BoundedAngle {
    pub(crate) fn new(angle: impl Into<Angle>) -> Self {
        Self {
            radians: Self::into_bounds(angle.into()),
        }
    }

    /// Returns the angle in [0°, 360°) in radians.
    pub(crate) fn get_bounded(self) -> f64 {
        self.radians
    }

    /// Returns the angle in [-180°, 180°) in radians.
    pub(crate) fn to_signed_range(self) -> f64 {
        if self.radians < Angle::HALF_TURN.get::<radian>() {
            self.radians
        } else {
            self.radians - Angle::FULL_TURN.get::<radian>()
        }
    }

    fn into_bounds(angle: Angle) -> f64 {
        let full_turn = Angle::FULL_TURN.get::<radian>();
        let bounded = angle.get::<radian>().rem_euclid(full_turn);
        // rem_euclid can round up to exactly one full turn for tiny negative inputs
        if bounded >= full_turn {
            0.
        } else {
            bounded
        }
    }
}

#[cfg(test)]
impl AbsDiffEq<Self> for BoundedAngle {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        0.000_000_001
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let delta = Angle::new::<radian>(self.radians - other.radians);
        Self::new(delta).to_signed_range().abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use crate::util::BoundedAngle;
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq};
    use rstest::rstest;
    use uom::si::angle::{degree, radian};
    use uom::si::f64::Angle;

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[test]
    fn negative_heading_wraps_to_positive() {
        let sut = BoundedAngle::new(d(-90.));
        assert_relative_eq!(sut.get_bounded(), 270.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn tiny_negative_never_reaches_full_turn() {
        let sut = BoundedAngle::new(Angle::new::<radian>(-1e-20));
        assert!(sut.get_bounded() < std::f64::consts::TAU);
    }

    #[rstest]
    #[case(d(0.), 0.)]
    #[case(d(180.), -180.)]
    #[case(d(359.), -1.)]
    #[case(d(270.), -90.)]
    #[case(d(-90.), -90.)]
    #[case(d(360.), 0.)]
    #[case(d(360. + 139.7454), 139.7454)]
    #[case(d(-360. - 35.6586), -35.6586)]
    fn signed_range(#[case] input: Angle, #[case] expected_degrees: f64) {
        assert_relative_eq!(
            BoundedAngle::new(input).to_signed_range(),
            expected_degrees.to_radians(),
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(0., 360., true)]
    #[case(359.9999999999, 0., true)]
    #[case(10., 370., true)]
    #[case(10., 2., false)]
    fn comparison_is_modulo_a_turn(#[case] a: f64, #[case] b: f64, #[case] equal: bool) {
        let a = BoundedAngle::new(d(a));
        let b = BoundedAngle::new(d(b));
        if equal {
            assert_abs_diff_eq!(a, b);
        } else {
            assert_abs_diff_ne!(a, b);
        }
    }
}
