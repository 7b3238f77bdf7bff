#[cfg(doc)]
use crate::Coordinate;

/// Defines how a coordinate system behaves.
///
/// For example, a coordinate system with `Convention = EnuLike` gets `east`, `north`, and `up`
/// accessors on [`Coordinate`], while one with `Convention = RenderLike` gets `x`, `y`, and `z`.
pub trait CoordinateSystem {
    /// What standard coordinate system convention this coordinate system conforms to.
    type Convention;
}

/// Marks a coordinate system whose axes are simply named X, Y, and Z.
///
/// There is no intrinsic relationship between two XYZ-like coordinate systems.
pub struct RightHandedXyzLike;

/// Marks an ENU-like coordinate system where the axes are East, North, and Up.
///
/// ENUs are right-handed, have earth bounded axes, and are tangent to the WGS84 ellipsoid at
/// their origin:
///
/// - Positive X is East.
/// - Positive Y is North.
/// - Positive Z is away from the center of the earth ("Up").
///
/// Two observers at different locations have different ENU frames, so an ENU coordinate is only
/// meaningful together with the geodetic position of its origin.
///
/// <https://en.wikipedia.org/wiki/Local_tangent_plane_coordinates#Local_east,_north,_up_(ENU)_coordinates>
pub struct EnuLike;

/// Marks a Y-up, right-handed render frame as used by typical 3D scene graphs.
///
/// The frame is derived from an [`EnuLike`] frame with a fixed axis remap:
///
/// - Positive X is East (screen right when facing North).
/// - Positive Y is Up.
/// - Positive Z is South, so "forward" (North at zero heading) is _negative_ Z.
///
/// Camera and billboard placement depend on this mapping; it must not change.
pub struct RenderLike;

macro_rules! system {
    {
        $(#[$attr:meta])*
        $vis:vis struct $name:ident
        as $convention:ident
    } => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::CoordinateSystem for $name {
            type Convention = $crate::systems::$convention;
        }
    };
}

system! {
    /// The [Earth-centered, Earth-fixed (ECEF)][ecef] coordinate system.
    ///
    /// This is a [`RightHandedXyzLike`] coordinate system whose origin is the center of the
    /// earth:
    ///
    /// - Positive Z is towards the North pole.
    /// - Positive X is towards the prime meridian on the equator (0° lon).
    /// - Positive Y is towards 90°E on the equator.
    ///
    /// [ecef]: https://en.wikipedia.org/wiki/Earth-centered,_Earth-fixed_coordinate_system
    #[allow(clippy::upper_case_acronyms)]
    pub struct Ecef as RightHandedXyzLike
}

system! {
    /// The local tangent plane at the observing device, in East-North-Up order.
    pub struct Enu as EnuLike
}

system! {
    /// The renderer's frame centered on the observing device. See [`RenderLike`].
    pub struct Render as RenderLike
}
