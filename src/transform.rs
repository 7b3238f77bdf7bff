//! Projection of geodetic positions into the renderer's device-centered frame.
//!
//! The chain is geodetic → [ECEF](crate::systems::Ecef) → [ENU](crate::systems::Enu) at the
//! device → [render frame](crate::systems::Render) → yaw by the device's compass heading.
//! [`relative_position`] runs the whole chain; the individual steps are exposed for callers that
//! need the intermediates (eg, a 2D map works directly off the ENU offsets).
//!
//! Every function here is total over finite inputs. Validation happens when a [`GeoPosition`]
//! or [`DeviceReading`](crate::scene::DeviceReading) is constructed, not per frame.

use crate::systems::{Ecef, Enu, Render};
use crate::{Coordinate, GeoPosition, Matrix3, Point3, Rotation3, Vector3};
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// Expresses `target` as an East-North-Up offset from `origin`.
///
/// `origin_geo` must be the geodetic position `origin` was computed from; its latitude and
/// longitude orient the tangent plane.
///
/// See <https://en.wikipedia.org/wiki/Geographic_coordinate_conversion#From_ECEF_to_ENU>.
#[doc(alias = "ecef_to_local")]
#[must_use]
pub fn ecef_to_enu(
    target: &Coordinate<Ecef>,
    origin: &Coordinate<Ecef>,
    origin_geo: &GeoPosition,
) -> Coordinate<Enu> {
    let delta: Vector3 = target.point - origin.point;
    Coordinate::from_nalgebra_point(Point3::from(ecef_to_enu_rotation(origin_geo) * delta))
}

/// The rotation taking ECEF deltas into the ENU frame tangent at `at`.
fn ecef_to_enu_rotation(at: &GeoPosition) -> Matrix3 {
    let (sin_lat, cos_lat) = at.latitude().get::<radian>().sin_cos();
    let (sin_lon, cos_lon) = at.longitude().get::<radian>().sin_cos();

    #[rustfmt::skip]
    let rotation = Matrix3::new(
        -sin_lon,            cos_lon,            0.,
        -sin_lat * cos_lon, -sin_lat * sin_lon,  cos_lat,
         cos_lat * cos_lon,  cos_lat * sin_lon,  sin_lat,
    );
    rotation
}

/// Remaps East-North-Up onto the Y-up render frame: x = east, y = up, z = −north.
///
/// Camera and billboard placement rely on this exact mapping.
#[must_use]
pub fn enu_to_render(enu: &Coordinate<Enu>) -> Coordinate<Render> {
    let p = enu.point;
    Coordinate::from_nalgebra_point(Point3::new(p.x, p.z, -p.y))
}

/// Yaws a render-frame position so that render-space "forward" (−z) points where the device is
/// facing.
///
/// `heading` is a compass heading: 0° is North and it increases clockwise (towards East). The
/// result is the X/Z plane rotated by −heading; Y is unchanged:
///
/// ```text
/// x' = x·cos(h) − z·sin(h)
/// z' = x·sin(h) + z·cos(h)     where h = −heading
/// ```
///
/// This is a rotation by +heading about +Y, which is how it is computed.
#[must_use]
pub fn apply_heading(position: &Coordinate<Render>, heading: Angle) -> Coordinate<Render> {
    let yaw = Rotation3::from_axis_angle(&Vector3::y_axis(), heading.get::<radian>());
    Coordinate::from_nalgebra_point(yaw * position.point)
}

/// Projects `target` into the render frame of a device at `origin` facing `heading`.
///
/// The projection runs geodetic → ECEF → ENU → render frame → heading yaw.
#[doc(alias = "get_relative_position")]
#[must_use]
pub fn relative_position(
    target: &GeoPosition,
    origin: &GeoPosition,
    heading: Angle,
) -> Coordinate<Render> {
    let target_ecef = Coordinate::<Ecef>::from_geo(target);
    let origin_ecef = Coordinate::<Ecef>::from_geo(origin);
    let enu = ecef_to_enu(&target_ecef, &origin_ecef, origin);
    apply_heading(&enu_to_render(&enu), heading)
}

/// [`relative_position`] for a device facing North.
#[must_use]
pub fn relative_position_north_up(target: &GeoPosition, origin: &GeoPosition) -> Coordinate<Render> {
    relative_position(target, origin, Angle::new::<radian>(0.))
}
