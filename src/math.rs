//! Frame-tagged rotation matrices.
//!
//! The main type provided by this module is [`Rotation`], a 3×3 orthogonal matrix that carries
//! its source and target [`Frame`](crate::Frame) in its type. Chaining rotations whose frames do
//! not line up, or applying a rotation to a vector in the wrong frame, fails to compile.
//!
//! The elementary rotations used to build the celestial-to-terrestrial chain are also defined
//! here. They follow the usual astronomical convention of rotating the _frame_ (not the vector)
//! by a positive angle anticlockwise when looking from the positive end of the axis towards the
//! origin.

use crate::vectors::Vector;
use crate::{Frame, Matrix3};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Mul, Neg};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance within which every [`Rotation`] produced by this crate is orthogonal.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-10;

/// Defines a rotation between two [`Frame`]s.
///
/// Internally this is the matrix `M` such that `v_to = M · v_from`, which is also the layout
/// returned by [`Rotation::to_row_major`].
///
/// <div class="warning">
///
/// Note that this type implements `Deserialize` despite having `unsafe` constructors -- this is
/// because doing otherwise would be extremely unergonomic. However, when deserializing, neither
/// the frames nor the orthogonality of the deserialized value are checked, so this is a foot-gun
/// to be mindful of.
///
/// </div>
///
/// <div class="warning">
///
/// Rotations can be chained with other rotations and applied to vectors using `*` (ie, the
/// [`Mul`] trait). However, the order of the operands does not match the mathematical
/// convention. Matrix multiply traditionally has the transform on the left and the vector to
/// transform on the right, but doing so here would lead to a type signature of
///
/// ```rust,ignore
/// let _: Vector<To> = Rotation<From, To> * Vector<From>;
/// ```
///
/// which violates the expectation that a matrix multiply eliminates the "middle" component (ie,
/// (m × n)(n × p) = (m × p)). So, the rotation goes on the _right_ to go from `From` into `To`:
///
/// ```rust
/// # use earthframe::{Vector, frames::{Gcrs, Cirs, Itrs}, math::Rotation};
/// # let gcrs_to_cirs = unsafe { Rotation::<Gcrs, Cirs>::identity() };
/// # let cirs_to_itrs = unsafe { Rotation::<Cirs, Itrs>::identity() };
/// let gcrs_to_itrs: Rotation<Gcrs, Itrs> = gcrs_to_cirs * cirs_to_itrs;
/// let v: Vector<Itrs> = Vector::<Gcrs>::new(1., 0., 0.) * gcrs_to_itrs;
/// ```
///
/// and on the _left_ to go from `To` back into `From`.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require From/To: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
// no need for the "matrix": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rotation<From, To> {
    pub(crate) matrix: Matrix3,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) from: PhantomData<From>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) to: PhantomData<To>,
}

// manual impls of Clone and Copy to avoid requiring From/To: Copy + Clone
impl<From, To> Clone for Rotation<From, To> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<From, To> Copy for Rotation<From, To> {}

impl<From, To> PartialEq<Self> for Rotation<From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.matrix.eq(&other.matrix)
    }
}

impl<From, To> Display for Rotation<From, To>
where
    From: Frame,
    To: Frame,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", From::NAME, To::NAME)?;
        for row in self.to_row_major() {
            write!(f, "\n[{:+.12}, {:+.12}, {:+.12}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl<From, To> Rotation<From, To> {
    /// Constructs a rotation from the matrix `M` such that `v_to = M · v_from`.
    ///
    /// # Safety
    ///
    /// This claims that `matrix` _is_ the rotation from `From` into `To`, and that it is
    /// orthogonal. If either is not the case, this allows moving values between frame types
    /// without adjusting them correctly, defeating their type safety.
    #[must_use]
    pub unsafe fn from_matrix(matrix: Matrix3) -> Self {
        Self {
            matrix,
            from: PhantomData::<From>,
            to: PhantomData::<To>,
        }
    }

    /// Constructs a rotation from `[row][column]` elements.
    ///
    /// # Safety
    ///
    /// See [`Rotation::from_matrix`].
    #[must_use]
    pub unsafe fn from_row_major(rows: [[f64; 3]; 3]) -> Self {
        Self::from_matrix(Matrix3::new(
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ))
    }

    /// Asserts that the rotation from `From` to `To` returns the original vector when applied.
    ///
    /// # Safety
    ///
    /// This allows you to claim that the "correct" rotation between the frames `From` and `To`
    /// is the identity. If that is _not_ the case, this allows moving values between different
    /// frame types without adjusting them, defeating their type safety.
    #[must_use]
    pub unsafe fn identity() -> Self {
        Self::from_matrix(Matrix3::identity())
    }

    /// Returns the equal-but-opposite rotation, from `To` into `From`.
    ///
    /// For an orthogonal matrix the inverse is the transpose.
    #[must_use]
    pub fn inverse(&self) -> Rotation<To, From> {
        Rotation {
            matrix: self.matrix.transpose(),
            from: PhantomData::<To>,
            to: PhantomData::<From>,
        }
    }

    /// Returns the matrix as `[row][column]`, so that `out[i] = Σ_j m[i][j] · in[j]`.
    #[must_use]
    pub fn to_row_major(&self) -> [[f64; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Returns the nine matrix elements flattened column by column.
    #[must_use]
    pub fn to_column_major(&self) -> [f64; 9] {
        let mut out = [0.; 9];
        out.copy_from_slice(self.matrix.as_slice());
        out
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Checks that `Mᵀ·M` is the identity to within `tolerance` element-wise.
    #[must_use]
    pub fn is_orthogonal(&self, tolerance: f64) -> bool {
        let residual = self.matrix.transpose() * self.matrix - Matrix3::identity();
        residual.iter().all(|e| e.abs() <= tolerance)
    }

    /// Transforms a vector in `From` into `To`.
    #[doc(alias = "apply")]
    pub fn transform<T>(&self, in_from: T) -> <T as Mul<Self>>::Output
    where
        T: Mul<Self>,
    {
        in_from * *self
    }

    /// Transforms a vector in `To` back into `From`.
    #[doc(alias = "undo")]
    pub fn inverse_transform<T>(&self, in_to: T) -> <Self as Mul<T>>::Output
    where
        Self: Mul<T>,
    {
        *self * in_to
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> AbsDiffEq<Self> for Rotation<From, To> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Matrix3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.matrix.abs_diff_eq(&other.matrix, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> RelativeEq for Rotation<From, To> {
    fn default_max_relative() -> Self::Epsilon {
        Matrix3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.matrix.relative_eq(&other.matrix, epsilon, max_relative)
    }
}

impl<From, To> Neg for Rotation<From, To> {
    type Output = Rotation<To, From>;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

// Rotation<From, Over> * Rotation<Over, To> -> Rotation<From, To>
//
// self.matrix maps From into Over and rhs.matrix maps Over into To, so applying both to a vector
// in From is rhs.matrix * (self.matrix * v).
impl<From, Over, To> Mul<Rotation<Over, To>> for Rotation<From, Over> {
    type Output = Rotation<From, To>;

    fn mul(self, rhs: Rotation<Over, To>) -> Self::Output {
        Self::Output {
            matrix: rhs.matrix * self.matrix,
            from: self.from,
            to: rhs.to,
        }
    }
}

// Vector<From> * Rotation<From, To> -> Vector<To>
impl<From, To> Mul<Rotation<From, To>> for Vector<From> {
    type Output = Vector<To>;

    fn mul(self, rhs: Rotation<From, To>) -> Self::Output {
        Vector::from_nalgebra_vector(rhs.matrix * self.inner)
    }
}

// Rotation<From, To> * Vector<To> -> Vector<From>
impl<From, To> Mul<Vector<To>> for Rotation<From, To> {
    type Output = Vector<From>;

    fn mul(self, rhs: Vector<To>) -> Self::Output {
        Vector::from_nalgebra_vector(self.matrix.tr_mul(&rhs.inner))
    }
}

/// Rotates the frame about the X axis: `r ← Rx(φ)·r`.
pub(crate) fn rotate_x(phi: f64, r: Matrix3) -> Matrix3 {
    let (s, c) = phi.sin_cos();
    #[rustfmt::skip]
    let rx = Matrix3::new(
        1., 0., 0.,
        0., c,  s,
        0., -s, c,
    );
    rx * r
}

/// Rotates the frame about the Y axis: `r ← Ry(θ)·r`.
pub(crate) fn rotate_y(theta: f64, r: Matrix3) -> Matrix3 {
    let (s, c) = theta.sin_cos();
    #[rustfmt::skip]
    let ry = Matrix3::new(
        c,  0., -s,
        0., 1., 0.,
        s,  0., c,
    );
    ry * r
}

/// Rotates the frame about the Z axis: `r ← Rz(ψ)·r`.
pub(crate) fn rotate_z(psi: f64, r: Matrix3) -> Matrix3 {
    let (s, c) = psi.sin_cos();
    #[rustfmt::skip]
    let rz = Matrix3::new(
        c,  s,  0.,
        -s, c,  0.,
        0., 0., 1.,
    );
    rz * r
}
