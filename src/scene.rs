//! Placing stored entities around a live device reading.
//!
//! The caller passes in a [`DeviceReading`] from the location and compass sensors and a
//! snapshot of nearby [`Entity`] records. [`Scene::place`] culls entities outside the
//! visibility radius, evaluates the flight model for flying ones, and projects everything into
//! the device's render frame. Nothing is cached between calls.

use crate::error::{ensure_finite, Error, Result};
use crate::flight::FlightConfig;
use crate::privacy::Jitter;
use crate::systems::Render;
use crate::transform::relative_position;
use crate::util::BoundedAngle;
use crate::{Coordinate, GeoPosition};
use rand::Rng;
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length, Time};
use uom::si::length::meter;
use uom::si::time::millisecond;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Device pitch and roll as reported by the motion sensors.
///
/// Carried along with the reading for the camera overlay; placement itself only uses heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub pitch: Angle,
    pub roll: Angle,
}

/// One sample of where the device is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceReading {
    position: GeoPosition,
    accuracy: Option<Length>,
    heading: Angle,
    tilt: Option<Tilt>,
}

impl DeviceReading {
    /// Constructs a reading from a validated position and a compass heading.
    ///
    /// `heading` is degrees clockwise from North in any range; it is wrapped to [0°, 360°).
    pub fn new(position: GeoPosition, heading: Angle) -> Result<Self> {
        ensure_finite("heading", heading.get::<radian>())?;
        Ok(Self {
            position,
            accuracy: None,
            heading: Angle::new::<radian>(BoundedAngle::new(heading).get_bounded()),
            tilt: None,
        })
    }

    /// Attaches the horizontal accuracy radius the location provider reported.
    pub fn with_accuracy(mut self, accuracy: Length) -> Result<Self> {
        let meters = ensure_finite("accuracy", accuracy.get::<meter>())?;
        if meters < 0. {
            tracing::debug!(meters, "rejecting negative accuracy");
            return Err(Error::NegativeAccuracy { meters });
        }
        self.accuracy = Some(accuracy);
        Ok(self)
    }

    /// Attaches device pitch and roll.
    pub fn with_tilt(mut self, tilt: Tilt) -> Result<Self> {
        ensure_finite("pitch", tilt.pitch.get::<radian>())?;
        ensure_finite("roll", tilt.roll.get::<radian>())?;
        self.tilt = Some(tilt);
        Ok(self)
    }

    #[must_use]
    pub fn position(&self) -> &GeoPosition {
        &self.position
    }

    #[must_use]
    pub fn accuracy(&self) -> Option<Length> {
        self.accuracy
    }

    /// Compass heading in [0°, 360°).
    #[must_use]
    pub fn heading(&self) -> Angle {
        self.heading
    }

    #[must_use]
    pub fn tilt(&self) -> Option<Tilt> {
        self.tilt
    }
}

/// Whether an entity stays put or flies around its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum EntityKind {
    Static,
    Flying {
        #[cfg_attr(feature = "serde", serde(rename = "flight"))]
        config: FlightConfig,
    },
}

/// A marker or creature anchored to the world, as read from the entity store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    pub id: String,
    /// Where a static entity sits, or the base a flying entity circles around.
    pub position: GeoPosition,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: EntityKind,
}

impl Entity {
    /// Where this entity is at time `now`.
    #[must_use]
    pub fn position_at(&self, now: Time) -> GeoPosition {
        match &self.kind {
            EntityKind::Static => self.position,
            EntityKind::Flying { config } => config.position_at(&self.position, now),
        }
    }
}

/// An entity projected into the device's render frame for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub entity: &'a Entity,
    /// Geodetic position at the evaluated instant.
    pub position: GeoPosition,
    /// Position relative to the device with its heading applied.
    pub render: Coordinate<Render>,
    /// Chord distance from the device to `position`.
    pub distance: Length,
}

/// Tunables for scene placement and presence broadcast.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "SceneSettings", into = "SceneSettings")
)]
pub struct SceneConfig {
    visibility_radius: Length,
    tick_interval: Time,
    presence_jitter: Jitter,
}

impl Default for SceneConfig {
    /// 2 km visibility, a 100 ms tick, and the default presence [`Jitter`].
    fn default() -> Self {
        Self {
            visibility_radius: Length::new::<meter>(2_000.),
            tick_interval: Time::new::<millisecond>(100.),
            presence_jitter: Jitter::default(),
        }
    }
}

impl SceneConfig {
    /// Validates and constructs a scene configuration.
    ///
    /// Fails if `visibility_radius` is negative or `tick_interval` is not positive. A zero
    /// radius is allowed and only keeps entities at the device's exact position.
    pub fn new(
        visibility_radius: Length,
        tick_interval: Time,
        presence_jitter: Jitter,
    ) -> Result<Self> {
        let meters = ensure_finite("visibility_radius", visibility_radius.get::<meter>())?;
        let millis = ensure_finite("tick_interval", tick_interval.get::<millisecond>())?;
        if meters < 0. {
            tracing::debug!(meters, "rejecting negative visibility radius");
            return Err(Error::NegativeVisibilityRadius { meters });
        }
        if millis <= 0. {
            tracing::debug!(millis, "rejecting non-positive tick interval");
            return Err(Error::NonPositiveTickInterval { millis });
        }
        Ok(Self {
            visibility_radius,
            tick_interval,
            presence_jitter,
        })
    }

    /// Entities whose anchor is farther than this from the device are not placed.
    #[must_use]
    pub fn visibility_radius(&self) -> Length {
        self.visibility_radius
    }

    /// How often callers are expected to re-evaluate flying entities.
    #[must_use]
    pub fn tick_interval(&self) -> Time {
        self.tick_interval
    }

    /// Jitter applied to presence broadcasts.
    #[must_use]
    pub fn presence_jitter(&self) -> &Jitter {
        &self.presence_jitter
    }
}

/// Plain-number form of a [`SceneConfig`] for configuration files. Every field is optional.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneSettings {
    /// Meters.
    pub visibility_radius_m: f64,
    /// Milliseconds.
    pub tick_interval_ms: f64,
    /// Jitter applied to presence broadcasts.
    pub presence_jitter: Jitter,
}

impl Default for SceneSettings {
    fn default() -> Self {
        SceneConfig::default().into()
    }
}

impl TryFrom<SceneSettings> for SceneConfig {
    type Error = Error;

    fn try_from(raw: SceneSettings) -> Result<Self> {
        SceneConfig::new(
            Length::new::<meter>(raw.visibility_radius_m),
            Time::new::<millisecond>(raw.tick_interval_ms),
            raw.presence_jitter,
        )
    }
}

impl From<SceneConfig> for SceneSettings {
    fn from(config: SceneConfig) -> Self {
        SceneSettings {
            visibility_radius_m: config.visibility_radius.get::<meter>(),
            tick_interval_ms: config.tick_interval.get::<millisecond>(),
            presence_jitter: config.presence_jitter,
        }
    }
}

/// Places entities around a device reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scene {
    config: SceneConfig,
}

impl Scene {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Returns the entities whose anchor lies within the visibility radius of the device.
    ///
    /// Flying entities are judged by their base position, so a creature does not pop in and
    /// out of view as it circles near the edge.
    pub fn visible<'a>(
        &self,
        device: &DeviceReading,
        entities: &'a [Entity],
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        let radius = self.config.visibility_radius();
        let origin = device.position;
        entities
            .iter()
            .filter(move |entity| origin.chord_distance(&entity.position) <= radius)
    }

    /// Projects every visible entity into the device's render frame at time `now`.
    #[must_use]
    pub fn place<'a>(
        &self,
        device: &DeviceReading,
        entities: &'a [Entity],
        now: Time,
    ) -> Vec<Placement<'a>> {
        let _span = tracing::trace_span!(
            "place",
            entities = entities.len(),
            heading = device.heading.get::<degree>()
        )
        .entered();

        let placements: Vec<_> = self
            .visible(device, entities)
            .map(|entity| {
                let position = entity.position_at(now);
                Placement {
                    entity,
                    position,
                    render: relative_position(&position, &device.position, device.heading),
                    distance: device.position.chord_distance(&position),
                }
            })
            .collect();

        tracing::trace!(
            placed = placements.len(),
            culled = entities.len() - placements.len(),
            "placed entities"
        );
        placements
    }

    /// The position to broadcast as this device's presence: the reading, jittered.
    #[must_use]
    pub fn presence<R: Rng + ?Sized>(&self, device: &DeviceReading, rng: &mut R) -> GeoPosition {
        self.config.presence_jitter.apply(&device.position, rng)
    }
}
