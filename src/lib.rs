//! This library anchors augmented-reality content to real-world GPS coordinates.
//!
//! It does two things:
//!
//! - It projects geodetic positions ([`GeoPosition`]: WGS84 latitude, longitude, altitude) into
//!   the device-centered, Y-up [render frame](systems::Render) a 3D engine expects, going through
//!   [ECEF](systems::Ecef) and the device's local [East-North-Up](systems::Enu) tangent plane and
//!   finally yawing by the device's compass heading. See [`transform`].
//! - It moves autonomous creatures along deterministic [flight paths](flight) that are a pure
//!   function of their base position, their [`FlightConfig`], and the wall clock. Nothing about
//!   a creature's motion is ever stored.
//!
//! Around those sit a [privacy jitter](privacy) for presence broadcasts and a [`Scene`] that
//! culls and places a snapshot of entities around a live [`DeviceReading`].
//!
//! Positions, readings, and configurations are validated once, when they are built. Everything
//! that consumes them is total and allocation-free, so it can run per frame on any thread.
//!
//! # Examples
//!
//! A device at Tokyo Tower facing North sees a marker placed 100 m due north straight ahead
//! (negative Z):
//!
//! ```
//! use geoanchor::{transform::relative_position, GeoPosition};
//! use uom::si::f64::Angle;
//! use uom::si::{angle::degree, length::meter};
//!
//! let device = GeoPosition::from_degrees(35.6586, 139.7454, 0.)?;
//! let marker = GeoPosition::from_degrees(35.6595, 139.7454, 0.)?;
//!
//! let p = relative_position(&marker, &device, Angle::new::<degree>(0.));
//! assert!(p.render_x().get::<meter>().abs() < 0.01);
//! assert!(p.render_z().get::<meter>() < -99.);
//! # Ok::<(), geoanchor::Error>(())
//! ```
//!
//! A creature circling 20 m around its base is somewhere different every tick, but always in
//! the same place for the same instant:
//!
//! ```
//! use geoanchor::flight::{Components, FlightConfig, FlightPattern};
//! use geoanchor::GeoPosition;
//! use uom::si::f64::{Length, Time};
//! use uom::si::{length::meter, time::millisecond};
//!
//! let base = GeoPosition::from_degrees(35.6590, 139.7460, 10.)?;
//! let flight = FlightConfig::build(Components {
//!     pattern: FlightPattern::Circle,
//!     radius: Length::new::<meter>(20.),
//!     min_altitude: Length::new::<meter>(5.),
//!     max_altitude: Length::new::<meter>(15.),
//!     speed: 1.,
//! })?;
//!
//! let now = Time::new::<millisecond>(1_760_000_000_000.);
//! assert_eq!(flight.position_at(&base, now), flight.position_at(&base, now));
//! # Ok::<(), geoanchor::Error>(())
//! ```

mod coordinate_systems;
mod coordinates;
mod util;

pub mod error;
pub mod flight;
pub mod geodetic;
pub mod privacy;
pub mod scene;
pub mod transform;

pub(crate) type Point3 = nalgebra::Point3<f64>;
pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;
pub(crate) type Rotation3 = nalgebra::Rotation3<f64>;

/// Well-known coordinate systems and conventions.
pub mod systems {
    pub use super::coordinate_systems::{Ecef, Enu, EnuLike, Render, RenderLike, RightHandedXyzLike};
}
pub use coordinate_systems::CoordinateSystem;
pub use coordinates::Coordinate;
pub use error::{Error, Result};
pub use flight::{FlightConfig, FlightOffset, FlightPattern};
pub use geodetic::{chord_distance, GeoPosition};
pub use privacy::{fuzz_position, Jitter, MetersPerDegree};
pub use scene::{DeviceReading, Entity, EntityKind, Placement, Scene, SceneConfig};
