use crate::error::{ensure_finite, Error, Result};
use crate::{systems::Ecef, util::BoundedAngle, Coordinate, Point3};
use std::fmt;
use std::fmt::Display;
use std::marker::PhantomData;
use uom::si::f64::{Angle, Length};
use uom::si::{
    angle::{degree, radian},
    length::meter,
};
use uom::ConstZero;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Parameters required for WGS84 ellipsoid
// https://nsgreg.nga.mil/doc/view?i=4085 table 3.1
#[doc(alias = "equatorial radius")]
#[doc(alias = "a")]
pub(crate) const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
#[doc(alias = "1/f")]
const FLATTENING_FACTOR: f64 = 298.257_223_563;
#[doc(alias = "f")]
const FLATTENING: f64 = 1.0 / FLATTENING_FACTOR;
#[doc(alias = "e^2")]
// e^2 = 1 - b^2/a^2 = 2f - f^2
const ECCENTRICITY_SQ: f64 = 2.0 * FLATTENING - FLATTENING * FLATTENING;

/// An Earth-bound location on or above the [WGS84] reference ellipsoid.
///
/// Device fixes, stored entity records, and the flight model all produce these; the transforms
/// in [`crate::transform`] consume them.
///
/// The altitude is an opaque distance in meters. Some producers report it above the ellipsoid,
/// others above ground level; nothing in this crate converts between the two, so callers must
/// keep the target and origin of a transform in the same convention.
///
/// [WGS84]: https://en.wikipedia.org/wiki/World_Geodetic_System#WGS_84
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Degrees", into = "Degrees"))]
pub struct GeoPosition {
    // NOTE: longitude is stored as given and only wrapped on output; the trigonometry in the
    // ECEF conversion does not care which turn it lands on.
    latitude: Angle,
    longitude: Angle,
    altitude: Length,
}

impl GeoPosition {
    /// Constructs a location from latitude, longitude, and altitude.
    ///
    /// Fails if any component is not finite, or if the latitude is not in [-90°,90°] % 360°.
    pub fn build(
        Components {
            latitude,
            longitude,
            altitude,
        }: Components,
    ) -> Result<Self> {
        Ok(Self::builder()
            .latitude(latitude)?
            .longitude(longitude)?
            .altitude(altitude)?
            .build())
    }

    /// Constructs a location from plain degrees and meters, the way sensors report it.
    ///
    /// Fails under the same conditions as [`GeoPosition::build`].
    pub fn from_degrees(latitude: f64, longitude: f64, altitude_m: f64) -> Result<Self> {
        Self::build(Components {
            latitude: Angle::new::<degree>(latitude),
            longitude: Angle::new::<degree>(longitude),
            altitude: Length::new::<meter>(altitude_m),
        })
    }

    /// Provides a constructor for a [`GeoPosition`].
    pub fn builder() -> Builder<MissingLatitude, MissingLongitude, MissingAltitude> {
        Builder {
            under_construction: GeoPosition {
                latitude: Angle::ZERO,
                longitude: Angle::ZERO,
                altitude: Length::ZERO,
            },
            has: (PhantomData, PhantomData, PhantomData),
        }
    }

    /// Shifts this position by `north` and `east` angular offsets and replaces its altitude.
    ///
    /// A latitude pushed past a pole continues over it: it is folded back into [-90°, 90°] and
    /// the longitude moves to the opposite meridian. The flight model and the presence jitter
    /// both produce positions through here, so their output stays a valid `GeoPosition`.
    pub(crate) fn offset_by(&self, north: Angle, east: Angle, altitude: Length) -> Self {
        let half_turn = Angle::HALF_TURN.get::<radian>();
        let latitude = BoundedAngle::new(self.latitude() + north).to_signed_range();
        let longitude = self.longitude + east;

        let (latitude, longitude) = if latitude > std::f64::consts::FRAC_PI_2 {
            (half_turn - latitude, longitude + Angle::HALF_TURN)
        } else if latitude < -std::f64::consts::FRAC_PI_2 {
            (-half_turn - latitude, longitude + Angle::HALF_TURN)
        } else {
            (latitude, longitude)
        };

        Self {
            latitude: Angle::new::<radian>(latitude),
            longitude,
            altitude,
        }
    }

    /// Returns the angle north of the equator ("northing"), in [-90°, 90°].
    #[must_use]
    pub fn latitude(&self) -> Angle {
        Angle::new::<radian>(BoundedAngle::new(self.latitude).to_signed_range())
    }

    /// Returns the angle east of the IERS Reference Meridian ("easting"), in [-180°, 180°).
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::new::<radian>(BoundedAngle::new(self.longitude).to_signed_range())
    }

    /// Returns the altitude in whatever convention the producer used.
    #[must_use]
    pub fn altitude(&self) -> Length {
        self.altitude
    }

    /// Returns a copy of this position at a different altitude.
    #[must_use]
    pub fn with_altitude(self, altitude: Length) -> Self {
        Self { altitude, ..self }
    }

    /// Computes the straight-line (chord) distance between two locations through their ECEF
    /// coordinates.
    ///
    /// This is _not_ the distance along the surface of the earth. The two agree to well under a
    /// millimeter at a kilometer, but the chord is always the shorter of the two and the gap
    /// grows with the cube of the distance. Use [`GeoPosition::haversine_distance_on_surface`]
    /// when arc distance at larger scales matters.
    #[doc(alias = "calculate_distance")]
    #[must_use]
    pub fn chord_distance(&self, other: &GeoPosition) -> Length {
        Coordinate::<Ecef>::from_geo(self).distance_from(&Coordinate::<Ecef>::from_geo(other))
    }

    /// Computes the [great-circle distance] between the two locations on the surface of a
    /// sphere with the WGS84 equatorial radius.
    ///
    /// Altitude is ignored. The current implementation computes this [using the archaversine].
    ///
    /// [great-circle distance]: https://en.wikipedia.org/wiki/Great-circle_distance
    /// [using the archaversine]: https://en.wikipedia.org/wiki/Haversine_formula#Formulation
    #[doc(alias = "great_circle_distance")]
    #[must_use]
    pub fn haversine_distance_on_surface(&self, other: &GeoPosition) -> Length {
        let lat_a = self.latitude.get::<radian>(); // φ1
        let lat_b = other.latitude.get::<radian>(); // φ2
        let delta_lat = lat_b - lat_a;
        let delta_lon = other.longitude.get::<radian>() - self.longitude.get::<radian>();

        let inner = 1. - delta_lat.cos() + lat_a.cos() * lat_b.cos() * (1. - delta_lon.cos());
        // rounding can push `inner` a hair outside [0, 2] for (anti)podal points
        let central_angle = 2. * (inner / 2.).clamp(0., 1.).sqrt().asin();

        Length::new::<meter>(central_angle * SEMI_MAJOR_AXIS)
    }
}

/// Computes the straight-line (chord) distance between two locations.
///
/// See [`GeoPosition::chord_distance`].
#[must_use]
pub fn chord_distance(a: &GeoPosition, b: &GeoPosition) -> Length {
    a.chord_distance(b)
}

impl Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = self.latitude();
        let lat_is_positive = lat.is_sign_positive();
        let lat = lat.abs().get::<degree>();
        let lon = self.longitude();
        let lon_is_positive = lon.is_sign_positive();
        let lon = lon.abs().get::<degree>();
        let alt = self.altitude.get::<meter>();
        let ns = if lat_is_positive { 'N' } else { 'S' };
        let ew = if lon_is_positive { 'E' } else { 'W' };
        write!(f, "{lat:.6}°{ns}, {lon:.6}°{ew}, {alt:.2}m")
    }
}

impl Coordinate<Ecef> {
    /// Converts latitude, longitude, and altitude to the Earth-Centered, Earth-Fixed coordinate
    /// system.
    ///
    /// See:
    /// <https://en.wikipedia.org/wiki/Geographic_coordinate_conversion#From_geodetic_to_ECEF_coordinates>
    #[doc(alias = "geodetic_to_ecef")]
    #[must_use]
    pub fn from_geo(position: &GeoPosition) -> Self {
        let height_h = position.altitude.get::<meter>();
        let lon_lambda = position.longitude.get::<radian>();
        let lat_phi = position.latitude.get::<radian>();
        let (sin_phi, cos_phi) = lat_phi.sin_cos();

        // https://en.wikipedia.org/wiki/Earth_radius#Prime_vertical
        let n_phi = SEMI_MAJOR_AXIS / (1. - ECCENTRICITY_SQ * sin_phi.powi(2)).sqrt();

        let x = (n_phi + height_h) * cos_phi * lon_lambda.cos();
        let y = (n_phi + height_h) * cos_phi * lon_lambda.sin();
        let z = ((1. - ECCENTRICITY_SQ) * n_phi + height_h) * sin_phi;

        Self::from_nalgebra_point(Point3::new(x, y, z))
    }
}

impl From<GeoPosition> for Coordinate<Ecef> {
    fn from(position: GeoPosition) -> Self {
        Self::from_geo(&position)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for GeoPosition {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        // NOTE: sub-meter is plenty for placing AR content
        Length::new::<meter>(0.75)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.haversine_distance_on_surface(other) < epsilon
            && self
                .altitude
                .get::<meter>()
                .abs_diff_eq(&other.altitude.get::<meter>(), epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for GeoPosition {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(f64::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.haversine_distance_on_surface(other)
            .get::<meter>()
            .abs_diff_eq(&0., epsilon.get::<meter>())
            && self.altitude.get::<meter>().relative_eq(
                &other.altitude.get::<meter>(),
                epsilon.get::<meter>(),
                max_relative.get::<meter>(),
            )
    }
}

/// Plain-degrees form of a [`GeoPosition`], as found in configuration files and entity records.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Degrees {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in meters.
    #[cfg_attr(feature = "serde", serde(default))]
    pub altitude: f64,
}

impl TryFrom<Degrees> for GeoPosition {
    type Error = Error;

    fn try_from(d: Degrees) -> Result<Self> {
        GeoPosition::from_degrees(d.latitude, d.longitude, d.altitude)
    }
}

impl From<GeoPosition> for Degrees {
    fn from(position: GeoPosition) -> Self {
        Degrees {
            latitude: position.latitude().get::<degree>(),
            longitude: position.longitude().get::<degree>(),
            altitude: position.altitude.get::<meter>(),
        }
    }
}

/// Argument type for [`GeoPosition::build`].
#[derive(Debug, Default)]
#[must_use]
pub struct Components {
    /// The latitude angle of the proposed [`GeoPosition`].
    ///
    /// The latitude must be in [-90°,90°] % 360°.
    pub latitude: Angle,

    /// The longitude angle of the proposed [`GeoPosition`].
    pub longitude: Angle,

    /// The altitude of the proposed [`GeoPosition`].
    pub altitude: Length,
}

/// Used to indicate that a partially-constructed [`GeoPosition`] is missing the latitude component.
pub struct MissingLatitude;
/// Used to indicate that a partially-constructed [`GeoPosition`] has the latitude component set.
pub struct HasLatitude;
/// Used to indicate that a partially-constructed [`GeoPosition`] is missing the longitude component.
pub struct MissingLongitude;
/// Used to indicate that a partially-constructed [`GeoPosition`] has the longitude component set.
pub struct HasLongitude;
/// Used to indicate that a partially-constructed [`GeoPosition`] is missing the altitude component.
pub struct MissingAltitude;
/// Used to indicate that a partially-constructed [`GeoPosition`] has the altitude component set.
pub struct HasAltitude;

/// [Builder] for a [`GeoPosition`].
///
/// Construct one through [`GeoPosition::builder`], and finalize with [`Builder::build`].
///
/// [Builder]: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
#[derive(Debug)]
#[must_use]
pub struct Builder<Latitude, Longitude, Altitude> {
    under_construction: GeoPosition,
    has: (
        PhantomData<Latitude>,
        PhantomData<Longitude>,
        PhantomData<Altitude>,
    ),
}

// manual impls of Clone and Copy to avoid requiring the marker types to be Copy + Clone
impl<L1, L2, A> Clone for Builder<L1, L2, A> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<L1, L2, A> Copy for Builder<L1, L2, A> {}

impl<L1, L2, A> Builder<L1, L2, A> {
    /// Sets the latitude of the [`GeoPosition`]-to-be.
    ///
    /// The latitude must be finite and in [-90°,90°] % 360°.
    pub fn latitude(mut self, latitude: impl Into<Angle>) -> Result<Builder<HasLatitude, L2, A>> {
        let latitude = latitude.into();
        ensure_finite("latitude", latitude.get::<radian>())?;
        let latitude_in_signed_radians = BoundedAngle::new(latitude).to_signed_range();
        if !(-std::f64::consts::FRAC_PI_2..=std::f64::consts::FRAC_PI_2)
            .contains(&latitude_in_signed_radians)
        {
            let degrees = latitude.get::<degree>();
            tracing::debug!(degrees, "rejecting out-of-range latitude");
            return Err(Error::LatitudeOutOfRange { degrees });
        }
        self.under_construction.latitude = latitude;
        Ok(Builder {
            under_construction: self.under_construction,
            has: (PhantomData::<HasLatitude>, self.has.1, self.has.2),
        })
    }

    /// Sets the longitude of the [`GeoPosition`]-to-be.
    ///
    /// Any finite longitude is accepted; it is wrapped into [-180°, 180°) on output.
    pub fn longitude(
        mut self,
        longitude: impl Into<Angle>,
    ) -> Result<Builder<L1, HasLongitude, A>> {
        let longitude = longitude.into();
        ensure_finite("longitude", longitude.get::<radian>())?;
        self.under_construction.longitude = longitude;
        Ok(Builder {
            under_construction: self.under_construction,
            has: (self.has.0, PhantomData::<HasLongitude>, self.has.2),
        })
    }

    /// Sets the altitude of the [`GeoPosition`]-to-be.
    pub fn altitude(mut self, altitude: impl Into<Length>) -> Result<Builder<L1, L2, HasAltitude>> {
        let altitude = altitude.into();
        ensure_finite("altitude", altitude.get::<meter>())?;
        self.under_construction.altitude = altitude;
        Ok(Builder {
            under_construction: self.under_construction,
            has: (self.has.0, self.has.1, PhantomData::<HasAltitude>),
        })
    }
}

impl Builder<HasLatitude, HasLongitude, HasAltitude> {
    #[must_use]
    pub fn build(self) -> GeoPosition {
        self.under_construction
    }
}
