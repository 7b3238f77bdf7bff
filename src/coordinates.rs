use crate::coordinate_systems::{CoordinateSystem, EnuLike, RenderLike, RightHandedXyzLike};
use crate::Point3;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Neg;
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point (ie, position) in the coordinate system specified by `In`.
///
/// Depending on the convention of the coordinate system, you get appropriately-named accessors
/// for its components, like [`Coordinate::east`] for [`EnuLike`] systems or
/// [`Coordinate::render_z`] for [`RenderLike`] ones.
///
/// <div class="warning">
///
/// When deserializing, the coordinate system of the deserialized value is _not_ checked.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Coordinate<In> {
    /// X, Y, Z in meters
    pub(crate) point: Point3,
    #[cfg_attr(feature = "serde", serde(skip))]
    system: PhantomData<In>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Coordinate<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Coordinate<In> {}

impl<In> Coordinate<In> {
    pub(crate) fn from_nalgebra_point(p: Point3) -> Self {
        Self {
            point: p,
            system: PhantomData,
        }
    }

    /// Constructs a coordinate at the given (x, y, z) cartesian point in `In`.
    ///
    /// The meaning of `x`, `y`, and `z` is dictated by the [`CoordinateSystem::Convention`] of
    /// `In`. For [`EnuLike`], they are east, north, and up.
    pub fn from_cartesian(
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Self {
        Self::from_nalgebra_point(Point3::new(
            x.into().get::<meter>(),
            y.into().get::<meter>(),
            z.into().get::<meter>(),
        ))
    }

    /// Constructs a coordinate at the origin of the coordinate system `In`.
    #[must_use]
    pub fn origin() -> Self {
        Self::from_nalgebra_point(Point3::origin())
    }

    /// Returns the cartesian components of this coordinate in XYZ order.
    #[doc(alias = "components")]
    #[must_use]
    pub fn to_cartesian(&self) -> [Length; 3] {
        [
            Length::new::<meter>(self.point.x),
            Length::new::<meter>(self.point.y),
            Length::new::<meter>(self.point.z),
        ]
    }

    /// Computes the distance of this point from the coordinate system's origin.
    #[doc(alias = "norm")]
    #[must_use]
    pub fn distance_from_origin(&self) -> Length {
        Length::new::<meter>(self.point.coords.norm())
    }

    /// Computes the straight-line distance between this point and the given point.
    #[must_use]
    pub fn distance_from(&self, other: &Coordinate<In>) -> Length {
        Length::new::<meter>(nalgebra::distance(&self.point, &other.point))
    }
}

impl<In> Default for Coordinate<In> {
    fn default() -> Self {
        Self::origin()
    }
}

macro_rules! accessors {
    ($convention:ident using $x:ident, $y:ident, $z:ident) => {
        impl<In> Coordinate<In>
        where
            In: CoordinateSystem<Convention = $convention>,
        {
            #[must_use]
            pub fn $x(&self) -> Length {
                Length::new::<meter>(self.point.x)
            }
            #[must_use]
            pub fn $y(&self) -> Length {
                Length::new::<meter>(self.point.y)
            }
            #[must_use]
            pub fn $z(&self) -> Length {
                Length::new::<meter>(self.point.z)
            }
        }
    };
}

accessors!(RightHandedXyzLike using x, y, z);
accessors!(EnuLike using east, north, up);
// NOTE: the render_ prefix is needed because rustc cannot tell that no system is both
// RightHandedXyzLike and RenderLike, so plain x/y/z would collide with the ECEF accessors.
accessors!(RenderLike using render_x, render_y, render_z);

impl<In> PartialEq<Self> for Coordinate<In> {
    fn eq(&self, other: &Self) -> bool {
        self.point.eq(&other.point)
    }
}

impl<In> Display for Coordinate<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.point)
    }
}

impl<In> Neg for Coordinate<In> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_nalgebra_point(-self.point)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Coordinate<In> {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        // decimeter-level agreement is what AR placement needs
        Length::new::<meter>(0.1)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: per-component comparison, not the magnitude of the difference.
        self.point.abs_diff_eq(&other.point, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Coordinate<In> {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Point3::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.point.relative_eq(
            &other.point,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}
