//! Stateless flight paths for autonomous creatures.
//!
//! A flying entity never stores where it currently is. Its position is recomputed from its base
//! position, its [`FlightConfig`], and the wall clock whenever the caller needs it (typically on
//! a 10 Hz timer). Two calls with the same inputs always return bit-identical results, so the
//! model can be evaluated from any thread, restarted at any time, or memoized.

use crate::error::{ensure_finite, Error, Result};
use crate::GeoPosition;
use std::f64::consts::PI;
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length, Time};
use uom::si::length::meter;
use uom::si::time::{millisecond, second};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude used by the flat-earth conversions in this crate.
pub(crate) const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// One base cycle takes 30 s at speed 1.
const RADIANS_PER_SECOND: f64 = PI / 15.;

/// Length of one segment of the random pattern.
const RANDOM_SEGMENT_MS: f64 = 5_000.;

/// Seed offset that decorrelates the east axis from the north axis in the random pattern.
const RANDOM_EAST_SEED_OFFSET: f64 = 1_000.;

/// How a flying entity moves around its base position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FlightPattern {
    /// A circle of the configured radius, once per cycle.
    Circle,
    /// A figure-eight (1:2 Lissajous curve) whose east extent is half the radius.
    #[cfg_attr(feature = "serde", serde(alias = "figure-eight"))]
    Figure8,
    /// Smooth pseudo-random wandering that picks a new waypoint every five seconds.
    Random,
}

/// Describes one entity's autonomous motion.
///
/// Every `FlightConfig` satisfies `radius >= 0`, `speed > 0`, and
/// `min_altitude <= max_altitude`; those are checked when it is built, so evaluating it can
/// never fail.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Meters", into = "Meters"))]
pub struct FlightConfig {
    pattern: FlightPattern,
    radius: Length,
    min_altitude: Length,
    max_altitude: Length,
    speed: f64,
}

/// Argument type for [`FlightConfig::build`].
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct Components {
    /// The shape of the flight path.
    pub pattern: FlightPattern,
    /// Horizontal extent of the path around the base position. Must not be negative.
    pub radius: Length,
    /// Lowest altitude offset above the base position.
    pub min_altitude: Length,
    /// Highest altitude offset above the base position. Must not be below `min_altitude`.
    pub max_altitude: Length,
    /// Multiplier on the 30-second base cycle. Must be positive.
    pub speed: f64,
}

/// Displacement of a flying entity from its base position at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightOffset {
    /// Offset along the meridian (the "latitude offset"), in meters.
    pub north: Length,
    /// Offset along the parallel (the "longitude offset"), in meters.
    pub east: Length,
    /// Altitude above the base position, always within `[min_altitude, max_altitude]`.
    pub up: Length,
}

impl FlightConfig {
    /// Validates and constructs a flight configuration.
    pub fn build(
        Components {
            pattern,
            radius,
            min_altitude,
            max_altitude,
            speed,
        }: Components,
    ) -> Result<Self> {
        let radius_m = ensure_finite("radius", radius.get::<meter>())?;
        let min_m = ensure_finite("min_altitude", min_altitude.get::<meter>())?;
        let max_m = ensure_finite("max_altitude", max_altitude.get::<meter>())?;
        let speed = ensure_finite("speed", speed)?;

        let rejected = if radius_m < 0. {
            Some(Error::NegativeRadius { meters: radius_m })
        } else if speed <= 0. {
            Some(Error::NonPositiveSpeed { speed })
        } else if min_m > max_m {
            Some(Error::AltitudeRangeInverted {
                min: min_m,
                max: max_m,
            })
        } else {
            None
        };
        if let Some(err) = rejected {
            tracing::debug!(%err, ?pattern, "rejecting flight configuration");
            return Err(err);
        }

        Ok(Self {
            pattern,
            radius,
            min_altitude,
            max_altitude,
            speed,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> FlightPattern {
        self.pattern
    }

    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    #[must_use]
    pub fn min_altitude(&self) -> Length {
        self.min_altitude
    }

    #[must_use]
    pub fn max_altitude(&self) -> Length {
        self.max_altitude
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Computes the displacement from the base position at wall-clock time `now`.
    ///
    /// `now` is measured from any fixed epoch (the Unix epoch in practice); all entities that
    /// should move in lockstep must share it.
    #[doc(alias = "calculate_flight_offset")]
    #[must_use]
    pub fn offset_at(&self, now: Time) -> FlightOffset {
        let t = now.get::<second>() * self.speed * RADIANS_PER_SECOND;
        let radius = self.radius.get::<meter>();

        let (north, east, altitude_rate) = match self.pattern {
            FlightPattern::Circle => (t.sin() * radius, t.cos() * radius, 0.5),
            FlightPattern::Figure8 => (t.sin() * radius, (2. * t).sin() * radius / 2., 0.7),
            FlightPattern::Random => {
                let (north, east) = wander(now.get::<millisecond>());
                (north * radius, east * radius, 0.3)
            }
        };

        FlightOffset {
            north: Length::new::<meter>(north),
            east: Length::new::<meter>(east),
            up: self.altitude_at(altitude_rate * t),
        }
    }

    /// Computes where an entity based at `base` is at wall-clock time `now`.
    ///
    /// The horizontal offset is converted to degrees with a flat-earth approximation
    /// (111 320 m per degree of latitude, scaled by `cos(latitude)` for longitude), which is
    /// accurate for radii up to a few hundred meters. Altitude is `base` altitude plus the
    /// offset. A path that crosses a pole continues down the opposite meridian.
    #[doc(alias = "calculate_current_position")]
    #[must_use]
    pub fn position_at(&self, base: &GeoPosition, now: Time) -> GeoPosition {
        let offset = self.offset_at(now);
        let meters_per_degree_lon = meters_per_degree_longitude(base.latitude());

        let delta_lat = offset.north.get::<meter>() / METERS_PER_DEGREE_LATITUDE;
        let delta_lon = offset.east.get::<meter>() / meters_per_degree_lon;

        base.offset_by(
            Angle::new::<degree>(delta_lat),
            Angle::new::<degree>(delta_lon),
            base.altitude() + offset.up,
        )
    }

    /// Oscillates between the minimum and maximum altitude as `sin(phase)` does between -1 and 1.
    fn altitude_at(&self, phase: f64) -> Length {
        let fraction = (phase.sin() + 1.) / 2.;
        self.min_altitude + (self.max_altitude - self.min_altitude) * fraction
    }
}

/// Free-function form of [`FlightConfig::offset_at`].
#[must_use]
pub fn flight_offset(config: &FlightConfig, now: Time) -> FlightOffset {
    config.offset_at(now)
}

/// Free-function form of [`FlightConfig::position_at`].
#[must_use]
pub fn current_position(base: &GeoPosition, config: &FlightConfig, now: Time) -> GeoPosition {
    config.position_at(base, now)
}

/// Meters per degree of longitude at `latitude` under the flat-earth approximation.
pub(crate) fn meters_per_degree_longitude(latitude: Angle) -> f64 {
    // keep away from zero at the poles, where a degree of longitude has no width
    METERS_PER_DEGREE_LATITUDE * latitude.get::<radian>().cos().abs().max(1e-9)
}

/// Unit-radius (north, east) position of the random pattern at `ms` milliseconds.
///
/// Time is cut into five-second segments; each segment boundary gets a pseudo-random waypoint
/// and positions in between are blended with smoothstep, so the path is continuous (with
/// zero velocity) at every boundary.
fn wander(ms: f64) -> (f64, f64) {
    let seed = (ms / RANDOM_SEGMENT_MS).floor();
    let phase = ms.rem_euclid(RANDOM_SEGMENT_MS) / RANDOM_SEGMENT_MS;
    let blend = smoothstep(phase);

    let lerp = |from: f64, to: f64| from + (to - from) * blend;
    let north = lerp(noise(seed), noise(seed + 1.));
    let east = lerp(
        noise(seed + RANDOM_EAST_SEED_OFFSET),
        noise(seed + RANDOM_EAST_SEED_OFFSET + 1.),
    );
    (north, east)
}

/// Deterministic pseudo-random value in [-1, 1] for an integer seed.
fn noise(seed: f64) -> f64 {
    (seed * 127.1).sin() * (seed * 311.7).cos()
}

/// `3p² − 2p³`: eases from 0 at `p = 0` to 1 at `p = 1` with zero slope at both ends.
fn smoothstep(p: f64) -> f64 {
    p * p * (3. - 2. * p)
}

/// Plain-number form of a [`FlightConfig`], as stored alongside creature records.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Meters {
    /// The shape of the flight path.
    pub pattern: FlightPattern,
    /// Meters.
    pub radius: f64,
    /// Meters above the base position.
    pub min_altitude: f64,
    /// Meters above the base position.
    pub max_altitude: f64,
    /// Cycle speed multiplier. Defaults to 1.
    #[cfg_attr(feature = "serde", serde(default = "default_speed"))]
    pub speed: f64,
}

#[cfg(feature = "serde")]
fn default_speed() -> f64 {
    1.
}

impl TryFrom<Meters> for FlightConfig {
    type Error = Error;

    fn try_from(raw: Meters) -> Result<Self> {
        FlightConfig::build(Components {
            pattern: raw.pattern,
            radius: Length::new::<meter>(raw.radius),
            min_altitude: Length::new::<meter>(raw.min_altitude),
            max_altitude: Length::new::<meter>(raw.max_altitude),
            speed: raw.speed,
        })
    }
}

impl From<FlightConfig> for Meters {
    fn from(config: FlightConfig) -> Self {
        Meters {
            pattern: config.pattern,
            radius: config.radius.get::<meter>(),
            min_altitude: config.min_altitude.get::<meter>(),
            max_altitude: config.max_altitude.get::<meter>(),
            speed: config.speed,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{
        current_position, flight_offset, noise, smoothstep, Components, FlightConfig,
        FlightPattern, METERS_PER_DEGREE_LATITUDE,
    };
    use crate::error::Error;
    use crate::geodetic::tests::geo;
    use crate::GeoPosition;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::{quickcheck, Arbitrary, Gen};
    use rstest::rstest;
    use uom::si::angle::degree;
    use uom::si::f64::{Angle, Length, Time};
    use uom::si::length::meter;
    use uom::si::time::millisecond;

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn ms(millis: f64) -> Time {
        Time::new::<millisecond>(millis)
    }

    pub(crate) fn config(pattern: FlightPattern, radius: f64, min: f64, max: f64, speed: f64) -> FlightConfig {
        FlightConfig::build(Components {
            pattern,
            radius: m(radius),
            min_altitude: m(min),
            max_altitude: m(max),
            speed,
        })
        .expect("valid test flight config")
    }

    impl Arbitrary for FlightPattern {
        fn arbitrary(g: &mut Gen) -> Self {
            *g.choose(&[FlightPattern::Circle, FlightPattern::Figure8, FlightPattern::Random])
                .expect("non-empty")
        }
    }

    fn bounded(g: &mut Gen, modulus: f64) -> f64 {
        let f = f64::arbitrary(g);
        if f.is_finite() {
            f.rem_euclid(modulus)
        } else {
            0.
        }
    }

    impl Arbitrary for FlightConfig {
        fn arbitrary(g: &mut Gen) -> Self {
            let low = bounded(g, 200.) - 20.;
            let high = low + bounded(g, 100.);
            config(
                FlightPattern::arbitrary(g),
                bounded(g, 500.),
                low,
                high,
                bounded(g, 10.) + 0.01,
            )
        }
    }

    /// Timestamps around "now" in epoch milliseconds, plus some near zero and negative.
    #[derive(Clone, Copy, Debug)]
    struct Timestamp(f64);

    impl Arbitrary for Timestamp {
        fn arbitrary(g: &mut Gen) -> Self {
            let base = *g.choose(&[0., -86_400_000., 1_760_000_000_000.]).expect("non-empty");
            Timestamp(base + bounded(g, 86_400_000.))
        }
    }

    #[rstest]
    #[case(-1., 0., 10., 1., Error::NegativeRadius { meters: -1. })]
    #[case(10., 0., 10., 0., Error::NonPositiveSpeed { speed: 0. })]
    #[case(10., 0., 10., -2., Error::NonPositiveSpeed { speed: -2. })]
    #[case(10., 30., 10., 1., Error::AltitudeRangeInverted { min: 30., max: 10. })]
    fn invalid_configs_are_rejected(
        #[case] radius: f64,
        #[case] min: f64,
        #[case] max: f64,
        #[case] speed: f64,
        #[case] expected: Error,
    ) {
        let result = FlightConfig::build(Components {
            pattern: FlightPattern::Circle,
            radius: m(radius),
            min_altitude: m(min),
            max_altitude: m(max),
            speed,
        });
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn non_finite_speed_is_rejected() {
        let result = FlightConfig::build(Components {
            pattern: FlightPattern::Random,
            radius: m(1.),
            min_altitude: m(0.),
            max_altitude: m(0.),
            speed: f64::NAN,
        });
        assert!(matches!(result, Err(Error::NonFinite { field: "speed", .. })));
    }

    #[test]
    fn equal_altitudes_fly_level() {
        let level = config(FlightPattern::Figure8, 20., 12., 12., 1.);
        for t in [0., 1234., 7_500., 99_999.] {
            assert_eq!(level.offset_at(ms(t)).up, m(12.));
        }
    }

    #[test]
    fn circle_known_points() {
        let c = config(FlightPattern::Circle, 20., 5., 15., 1.);

        let start = c.offset_at(ms(0.));
        assert_abs_diff_eq!(start.north.get::<meter>(), 0., epsilon = 1e-9);
        assert_abs_diff_eq!(start.east.get::<meter>(), 20., epsilon = 1e-9);
        assert_abs_diff_eq!(start.up.get::<meter>(), 10., epsilon = 1e-9);

        // a quarter of the 30 s cycle
        let quarter = c.offset_at(ms(7_500.));
        assert_abs_diff_eq!(quarter.north.get::<meter>(), 20., epsilon = 1e-9);
        assert_abs_diff_eq!(quarter.east.get::<meter>(), 0., epsilon = 1e-9);
        let expected_up = 5. + ((std::f64::consts::FRAC_PI_4).sin() + 1.) / 2. * 10.;
        assert_abs_diff_eq!(quarter.up.get::<meter>(), expected_up, epsilon = 1e-9);
    }

    #[test]
    fn figure8_known_points() {
        let f = config(FlightPattern::Figure8, 20., 0., 10., 1.);

        let eighth = f.offset_at(ms(3_750.));
        assert_abs_diff_eq!(
            eighth.north.get::<meter>(),
            20. * std::f64::consts::FRAC_PI_4.sin(),
            epsilon = 1e-9
        );
        // the east swing peaks at half the radius
        assert_abs_diff_eq!(eighth.east.get::<meter>(), 10., epsilon = 1e-9);

        let quarter = f.offset_at(ms(7_500.));
        assert_abs_diff_eq!(quarter.north.get::<meter>(), 20., epsilon = 1e-9);
        assert_abs_diff_eq!(quarter.east.get::<meter>(), 0., epsilon = 1e-9);
    }

    #[test]
    fn speed_scales_time() {
        let slow = config(FlightPattern::Figure8, 30., 2., 8., 1.);
        let fast = config(FlightPattern::Figure8, 30., 2., 8., 2.);
        let a = slow.offset_at(ms(8_000.));
        let b = fast.offset_at(ms(4_000.));
        assert_relative_eq!(a.north.get::<meter>(), b.north.get::<meter>(), epsilon = 1e-9);
        assert_relative_eq!(a.east.get::<meter>(), b.east.get::<meter>(), epsilon = 1e-9);
        assert_relative_eq!(a.up.get::<meter>(), b.up.get::<meter>(), epsilon = 1e-9);
    }

    #[rstest]
    #[case(0.)]
    #[case(12_345.)]
    #[case(1_760_000_000_000.)]
    fn circle_repeats_every_thirty_seconds(#[case] t: f64) {
        let c = config(FlightPattern::Circle, 25., 0., 0., 1.);
        let now = flight_offset(&c, ms(t));
        let later = flight_offset(&c, ms(t + 30_000.));
        // epoch-scale timestamps lose a few digits in t = seconds · π/15
        let tolerance = 1e-6 * (1. + t / 1e6);
        assert_abs_diff_eq!(now.north.get::<meter>(), later.north.get::<meter>(), epsilon = tolerance);
        assert_abs_diff_eq!(now.east.get::<meter>(), later.east.get::<meter>(), epsilon = tolerance);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(-3)]
    #[case(352_000_000)]
    fn random_is_continuous_across_segments(#[case] k: i64) {
        let r = config(FlightPattern::Random, 40., 0., 0., 1.);
        let boundary = 5_000. * k as f64;
        let at = r.offset_at(ms(boundary));
        for epsilon in [1., 0.1, 0.001] {
            let before = r.offset_at(ms(boundary - epsilon));
            // smoothstep has zero slope at the boundary, so the gap shrinks quadratically
            let gap = 40. * 2. * 3. * (epsilon / 5_000.).powi(2) + 1e-9;
            assert_abs_diff_eq!(before.north.get::<meter>(), at.north.get::<meter>(), epsilon = gap);
            assert_abs_diff_eq!(before.east.get::<meter>(), at.east.get::<meter>(), epsilon = gap);
        }
    }

    #[test]
    fn random_hits_waypoints_at_boundaries() {
        let r = config(FlightPattern::Random, 10., 0., 0., 1.);
        let at = r.offset_at(ms(15_000.));
        assert_abs_diff_eq!(at.north.get::<meter>(), 10. * noise(3.), epsilon = 1e-9);
        assert_abs_diff_eq!(at.east.get::<meter>(), 10. * noise(1_003.), epsilon = 1e-9);
    }

    #[test]
    fn smoothstep_shape() {
        assert_eq!(smoothstep(0.), 0.);
        assert_eq!(smoothstep(1.), 1.);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_abs_diff_eq!(smoothstep(0.25), 0.15625, epsilon = 1e-12);
    }

    quickcheck! {
        fn circle_stays_within_radius(radius: u16, t: Timestamp) -> bool {
            let radius = f64::from(radius);
            let c = config(FlightPattern::Circle, radius, 0., 10., 1.);
            let o = c.offset_at(ms(t.0));
            o.north.get::<meter>().abs() <= radius && o.east.get::<meter>().abs() <= radius
        }

        fn random_stays_within_radius(radius: u16, t: Timestamp) -> bool {
            let radius = f64::from(radius);
            let c = config(FlightPattern::Random, radius, 0., 10., 1.);
            let o = c.offset_at(ms(t.0));
            o.north.get::<meter>().abs() <= radius && o.east.get::<meter>().abs() <= radius
        }

        fn altitude_stays_within_range(c: FlightConfig, t: Timestamp) -> bool {
            let up = c.offset_at(ms(t.0)).up;
            // the lerp may land an ulp outside the range
            let slack = m(1e-9 * (1. + c.max_altitude().get::<meter>().abs()));
            up >= c.min_altitude() - slack && up <= c.max_altitude() + slack
        }

        fn evaluation_is_deterministic(c: FlightConfig, t: Timestamp) -> bool {
            let base = geo(35.6586, 139.7454, 3.);
            let a = current_position(&base, &c, ms(t.0));
            let b = current_position(&base, &c, ms(t.0));
            a.latitude().value.to_bits() == b.latitude().value.to_bits()
                && a.longitude().value.to_bits() == b.longitude().value.to_bits()
                && a.altitude().value.to_bits() == b.altitude().value.to_bits()
        }
    }

    #[test]
    fn position_applies_flat_earth_offsets() {
        let base = geo(35.6586, 139.7454, 10.);
        let c = config(FlightPattern::Circle, 100., 4., 4., 1.);

        // at a quarter cycle the whole radius points north
        let p: GeoPosition = c.position_at(&base, ms(7_500.));
        assert_abs_diff_eq!(
            p.latitude().get::<degree>(),
            35.6586 + 100. / METERS_PER_DEGREE_LATITUDE,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(p.longitude().get::<degree>(), 139.7454, epsilon = 1e-9);
        assert_abs_diff_eq!(p.altitude().get::<meter>(), 14., epsilon = 1e-9);

        // at the start it points east, stretched by 1/cos(latitude)
        let p = c.position_at(&base, ms(0.));
        let expected_lon =
            139.7454 + 100. / (METERS_PER_DEGREE_LATITUDE * 35.6586_f64.to_radians().cos());
        assert_abs_diff_eq!(p.longitude().get::<degree>(), expected_lon, epsilon = 1e-9);
    }

    #[test]
    fn circle_over_the_pole_continues_down_the_far_meridian() {
        let base = geo(89.9999, 0., 0.);
        let c = config(FlightPattern::Circle, 100., 0., 0., 1.);

        // at a quarter cycle the offset points 100 m north, about 89 m past the pole
        let p = c.position_at(&base, ms(7_500.));
        let overshoot = 89.9999 + 100. / METERS_PER_DEGREE_LATITUDE - 90.;
        assert!(p.latitude() <= Angle::new::<degree>(90.));
        assert_abs_diff_eq!(p.latitude().get::<degree>(), 90. - overshoot, epsilon = 1e-9);
        assert_abs_diff_eq!(p.longitude().get::<degree>().abs(), 180., epsilon = 1e-9);
        // the real meridian arc is a little longer than 111 320 m per degree up here
        assert_relative_eq!(base.chord_distance(&p).get::<meter>(), 100., max_relative = 0.01);
    }

    quickcheck! {
        fn positions_near_the_poles_keep_a_valid_latitude(
            c: FlightConfig,
            t: Timestamp,
            south: bool
        ) -> bool {
            let base = geo(if south { -89.9995 } else { 89.9995 }, 12., 0.);
            let latitude = c.position_at(&base, ms(t.0)).latitude().get::<degree>();
            (-90. ..=90.).contains(&latitude)
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn position_past_the_pole_survives_a_yaml_round_trip() {
        let base = geo(89.9999, 0., 0.);
        let c = config(FlightPattern::Circle, 100., 0., 0., 1.);
        let p = c.position_at(&base, ms(7_500.));

        let yaml = serde_yaml::to_string(&p).unwrap();
        let back: GeoPosition = serde_yaml::from_str(&yaml).unwrap();
        assert_relative_eq!(back, p);
    }

    #[test]
    fn flight_stays_near_base() {
        let base = geo(35.6586, 139.7454, 0.);
        let c = config(FlightPattern::Figure8, 150., 0., 0., 3.);
        for t in (0..200).map(|i| f64::from(i) * 100.) {
            let p = c.position_at(&base, ms(t));
            assert!(base.chord_distance(&p) <= m(151.));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_yaml() {
        let c: FlightConfig = serde_yaml::from_str(
            "pattern: figure8\nradius: 30\nmin_altitude: 5\nmax_altitude: 20\n",
        )
        .unwrap();
        assert_eq!(c, config(FlightPattern::Figure8, 30., 5., 20., 1.));

        let inverted = serde_yaml::from_str::<FlightConfig>(
            "pattern: circle\nradius: 30\nmin_altitude: 50\nmax_altitude: 20\nspeed: 1\n",
        );
        assert!(inverted.is_err());
    }
}
