use crate::error::TransformError;
use crate::{Frame, Vector3};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, Neg, Sub};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::{frames::Gcrs, math::Rotation};

/// Defines a Cartesian 3-vector in the reference frame specified by `In`.
///
/// Vectors are unit-agnostic: whatever length unit goes in comes back out. Velocities must use
/// the same length unit _per second_, since Earth's rotation rate is expressed in rad/s.
///
/// Use [`Rotation`] to move a vector between frames:
///
/// ```rust
/// # use earthframe::{Vector, frames::{Gcrs, Itrs}, math::Rotation};
/// let v = Vector::<Gcrs>::new(1., 2., 3.);
/// // SAFETY: for the sake of the example, the frames coincide.
/// let identity = unsafe { Rotation::<Gcrs, Itrs>::identity() };
/// let _: Vector<Itrs> = identity.transform(v);
/// ```
///
/// <div class="warning">
///
/// Note that this type implements `Deserialize` even though the frame is only a type-level tag.
/// When deserializing, the frame of the deserialized value is _not_ checked, so this is a
/// foot-gun to be mindful of.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require In: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector<In> {
    pub(crate) inner: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    frame: PhantomData<In>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Vector<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Vector<In> {}

impl<In> PartialEq<Self> for Vector<In> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<In> Vector<In> {
    /// Constructs a vector from its X, Y, and Z components in frame `In`.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_nalgebra_vector(Vector3::new(x, y, z))
    }

    /// Constructs the zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_nalgebra_vector(Vector3::zeros())
    }

    pub(crate) fn from_nalgebra_vector(inner: Vector3) -> Self {
        Self {
            inner,
            frame: PhantomData,
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    /// Returns `[x, y, z]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.inner.x, self.inner.y, self.inner.z]
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.inner.norm()
    }

    /// Computes `self × rhs`.
    ///
    /// Both operands must be in the same frame; the result is in that frame too.
    #[must_use]
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::from_nalgebra_vector(self.inner.cross(&rhs.inner))
    }
}

impl<In> From<[f64; 3]> for Vector<In> {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl<In> Display for Vector<In>
where
    In: Frame,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}) in {}",
            self.inner.x,
            self.inner.y,
            self.inner.z,
            In::NAME
        )
    }
}

impl<In> Add for Vector<In> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner + rhs.inner)
    }
}

impl<In> Sub for Vector<In> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner - rhs.inner)
    }
}

impl<In> Neg for Vector<In> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_nalgebra_vector(-self.inner)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Vector<In> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Vector3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Vector<In> {
    fn default_max_relative() -> Self::Epsilon {
        Vector3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

/// A kinematic state in frame `In`: either a position or a position with its velocity.
///
/// This is the Rust counterpart of the 3- or 6-component column vectors that state vectors are
/// usually exchanged as; use [`StateVector::from_components`] to build one from such a slice.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub enum StateVector<In> {
    /// A position only (3 components).
    Position(Vector<In>),
    /// A position and a velocity (6 components).
    PositionVelocity {
        position: Vector<In>,
        velocity: Vector<In>,
    },
}

impl<In> Clone for StateVector<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for StateVector<In> {}

impl<In> PartialEq<Self> for StateVector<In> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Position(a), Self::Position(b)) => a == b,
            (
                Self::PositionVelocity {
                    position: pa,
                    velocity: va,
                },
                Self::PositionVelocity {
                    position: pb,
                    velocity: vb,
                },
            ) => pa == pb && va == vb,
            _ => false,
        }
    }
}

impl<In> StateVector<In> {
    /// Builds a state from `[x, y, z]` or `[x, y, z, vx, vy, vz]`.
    ///
    /// Any other length fails with [`TransformError::InvalidDimension`].
    pub fn from_components(components: &[f64]) -> Result<Self, TransformError> {
        match *components {
            [x, y, z] => Ok(Self::Position(Vector::new(x, y, z))),
            [x, y, z, vx, vy, vz] => Ok(Self::PositionVelocity {
                position: Vector::new(x, y, z),
                velocity: Vector::new(vx, vy, vz),
            }),
            _ => Err(TransformError::InvalidDimension {
                what: "state vector",
                found: components.len(),
            }),
        }
    }

    /// Number of scalar components: 3 or 6.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self {
            Self::Position(_) => 3,
            Self::PositionVelocity { .. } => 6,
        }
    }

    #[must_use]
    pub fn position(&self) -> Vector<In> {
        match *self {
            Self::Position(position) | Self::PositionVelocity { position, .. } => position,
        }
    }

    #[must_use]
    pub fn velocity(&self) -> Option<Vector<In>> {
        match *self {
            Self::Position(_) => None,
            Self::PositionVelocity { velocity, .. } => Some(velocity),
        }
    }

    /// Returns the components in the same order [`StateVector::from_components`] takes them.
    #[must_use]
    pub fn to_components(&self) -> Vec<f64> {
        match self {
            Self::Position(p) => p.to_array().to_vec(),
            Self::PositionVelocity { position, velocity } => {
                let mut out = position.to_array().to_vec();
                out.extend_from_slice(&velocity.to_array());
                out
            }
        }
    }
}

impl<In> From<Vector<In>> for StateVector<In> {
    fn from(position: Vector<In>) -> Self {
        Self::Position(position)
    }
}
