//! Location jitter applied before a device broadcasts its presence to other users.

use crate::error::{ensure_finite, Error, Result};
use crate::flight::{meters_per_degree_longitude, METERS_PER_DEGREE_LATITUDE};
use crate::GeoPosition;
use rand::Rng;
use uom::si::angle::degree;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How jitter offsets in meters are turned into degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetersPerDegree {
    /// Fixed 111 000 m per degree of latitude and 91 000 m per degree of longitude.
    ///
    /// This is what presence broadcasts have always used. The longitude constant only matches
    /// reality around 35° latitude, so the jitter is an ellipse elsewhere.
    #[default]
    Legacy,
    /// 111 320 m per degree of latitude and `111 320 · cos(latitude)` per degree of longitude,
    /// the same conversion the flight model uses. Produces a true circle of jitter at any
    /// latitude.
    Local,
}

impl MetersPerDegree {
    const LEGACY_LATITUDE: f64 = 111_000.;
    const LEGACY_LONGITUDE: f64 = 91_000.;

    /// Returns (meters per degree latitude, meters per degree longitude) at `latitude`.
    fn at(self, latitude: Angle) -> (f64, f64) {
        match self {
            MetersPerDegree::Legacy => (Self::LEGACY_LATITUDE, Self::LEGACY_LONGITUDE),
            MetersPerDegree::Local => (
                METERS_PER_DEGREE_LATITUDE,
                meters_per_degree_longitude(latitude),
            ),
        }
    }
}

/// Random displacement of a position by a bounded distance in a random direction.
///
/// Not cryptographically secure; it only keeps the exact device location out of presence
/// broadcasts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "JitterMeters", into = "JitterMeters"))]
pub struct Jitter {
    min: Length,
    max: Length,
    scale: MetersPerDegree,
}

impl Default for Jitter {
    /// Between 10 and 50 meters, legacy scale.
    fn default() -> Self {
        Self {
            min: Length::new::<meter>(10.),
            max: Length::new::<meter>(50.),
            scale: MetersPerDegree::Legacy,
        }
    }
}

impl Jitter {
    /// Constructs a jitter whose magnitude is drawn uniformly from `[min, max)`.
    ///
    /// Fails unless `0 <= min <= max`. When `min == max` every offset has exactly that length.
    pub fn new(min: Length, max: Length, scale: MetersPerDegree) -> Result<Self> {
        let min_m = ensure_finite("jitter min", min.get::<meter>())?;
        let max_m = ensure_finite("jitter max", max.get::<meter>())?;
        if min_m < 0. || min_m > max_m {
            tracing::debug!(min_m, max_m, "rejecting jitter range");
            return Err(Error::InvalidJitterRange {
                min: min_m,
                max: max_m,
            });
        }
        Ok(Self { min, max, scale })
    }

    #[must_use]
    pub fn min(&self) -> Length {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Length {
        self.max
    }

    #[must_use]
    pub fn scale(&self) -> MetersPerDegree {
        self.scale
    }

    /// Moves `position` by a random distance in a random direction. Altitude is kept.
    #[doc(alias = "fuzz_position")]
    #[must_use]
    pub fn apply<R: Rng + ?Sized>(&self, position: &GeoPosition, rng: &mut R) -> GeoPosition {
        let bearing: f64 = rng.random_range(0.0..std::f64::consts::TAU);
        let (min, max) = (self.min.get::<meter>(), self.max.get::<meter>());
        let distance = if min < max {
            rng.random_range(min..max)
        } else {
            min
        };

        let (per_degree_lat, per_degree_lon) = self.scale.at(position.latitude());
        let (sin, cos) = bearing.sin_cos();

        position.offset_by(
            Angle::new::<degree>(distance * cos / per_degree_lat),
            Angle::new::<degree>(distance * sin / per_degree_lon),
            position.altitude(),
        )
    }
}

/// Jitters `position` with the default 10 to 50 meter range using the thread-local RNG.
#[must_use]
pub fn fuzz_position(position: &GeoPosition) -> GeoPosition {
    Jitter::default().apply(position, &mut rand::rng())
}

/// Plain-meters form of a [`Jitter`] for configuration files.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JitterMeters {
    /// Smallest offset, in meters.
    pub min: f64,
    /// Largest offset, in meters.
    pub max: f64,
    /// Defaults to [`MetersPerDegree::Legacy`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale: MetersPerDegree,
}

impl TryFrom<JitterMeters> for Jitter {
    type Error = Error;

    fn try_from(raw: JitterMeters) -> Result<Self> {
        Jitter::new(
            Length::new::<meter>(raw.min),
            Length::new::<meter>(raw.max),
            raw.scale,
        )
    }
}

impl From<Jitter> for JitterMeters {
    fn from(jitter: Jitter) -> Self {
        JitterMeters {
            min: jitter.min.get::<meter>(),
            max: jitter.max.get::<meter>(),
            scale: jitter.scale,
        }
    }
}
