//! Rotation quaternions.
//!
//! A [`Quaternion`] stores `(w, x, y, z)` with the scalar part first. It is
//! not normalized on construction; [`Quaternion::to_matrix3`] scales by
//! `2 / quadrance` so non-unit quaternions still yield a pure rotation.
//!
//! # Usage
//!
//! ```rust
//! use glmat::{Matrix3, Quaternion, Vector3};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let q = Quaternion::from_axis_angle(FRAC_PI_2, Vector3::UNIT_Z);
//! let m = q.to_matrix3();
//! let expected = Matrix3::rotation(FRAC_PI_2);
//! assert!(m.as_slice().iter().zip(expected.as_slice()).all(|(a, b)| (a - b).abs() < 1e-6));
//! ```

use std::fmt;
use std::ops;

use tracing::trace;

use crate::container::{Components, Kind, NumericContainer, Part, flatten, impl_approx_eq, impl_serde};
use crate::error::{Error, Result};
use crate::format;
use crate::{Matrix3, Matrix4, Vector3, Vector4};

/// Quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    v: Vector4,
}

impl Quaternion {
    /// The identity rotation `(1, 0, 0, 0)`.
    pub const IDENTITY: Self = Self {
        v: Vector4::from_raw([1.0, 0.0, 0.0, 0.0], 1.0),
    };

    /// Creates a quaternion from its scalar part `w` and vector part
    /// `(x, y, z)`.
    #[inline]
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { v: Vector4::new(w, x, y, z) }
    }

    /// Reinterprets a 4-vector laid out as `(w, x, y, z)`.
    #[inline]
    pub const fn from_vector(v: Vector4) -> Self {
        Self { v }
    }

    /// The `(w, x, y, z)` components as a 4-vector.
    #[inline]
    pub const fn to_vector(&self) -> Vector4 {
        self.v
    }

    /// Creates a quaternion by flattening `parts` in `(w, x, y, z)` order.
    ///
    /// A single scalar fills all four components, as for vectors.
    pub fn from_parts(parts: &[Part<'_>]) -> Result<Self> {
        let values = flatten(Self::KIND, parts)?;
        match values.as_slice() {
            [v] => Ok(Self::from_vector(Vector4::splat(*v))),
            values => Self::from_slice(values),
        }
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// The axis is normalized first. A zero-length axis yields
    /// [`Quaternion::IDENTITY`].
    pub fn from_axis_angle(angle: f32, axis: Vector3) -> Self {
        let m = axis.modulo();
        if m == 0.0 {
            return Self::IDENTITY;
        }
        let (s, c) = (angle / 2.0).sin_cos();
        let [x, y, z] = axis.to_array();
        Self::new(c, x / m * s, y / m * s, z / m * s)
    }

    /// Scalar part.
    #[inline]
    pub const fn w(&self) -> f32 {
        self.v.to_array()[0]
    }

    /// `i` coefficient.
    #[inline]
    pub const fn x(&self) -> f32 {
        self.v.to_array()[1]
    }

    /// `j` coefficient.
    #[inline]
    pub const fn y(&self) -> f32 {
        self.v.to_array()[2]
    }

    /// `k` coefficient.
    #[inline]
    pub const fn z(&self) -> f32 {
        self.v.to_array()[3]
    }

    /// Components as `[w, x, y, z]`.
    #[inline]
    pub const fn to_array(&self) -> [f32; 4] {
        self.v.to_array()
    }

    /// Euclidean norm of the four components.
    #[inline]
    pub fn modulo(&self) -> f32 {
        self.v.modulo()
    }

    /// Sum of squares of the four components.
    #[inline]
    pub fn quadrance(&self) -> f32 {
        self.v.dot(&self.v)
    }

    /// Unit quaternion; zero and unit quaternions come back unchanged.
    #[inline]
    pub fn normalized(&self) -> Self {
        Self::from_vector(self.v.normalized())
    }

    /// Conjugate `(w, -x, -y, -z)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        let [w, x, y, z] = self.v.to_array();
        Self::new(w, -x, -y, -z)
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.v.dot(&other.v)
    }

    /// Hamilton product `self * other`: applying the result rotates by
    /// `other` first, then by `self`.
    pub fn mul_quaternion(&self, other: &Self) -> Self {
        let [w1, x1, y1, z1] = self.v.to_array();
        let [w2, x2, y2, z2] = other.v.to_array();
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }

    /// 3x3 rotation matrix.
    ///
    /// Scaled by `2 / quadrance`, so the input need not be normalized. A
    /// zero quaternion uses scale 0 and yields the identity.
    pub fn to_matrix3(&self) -> Matrix3 {
        let [a, b, c, d] = self.v.to_array();
        let q = self.quadrance();
        let s = if q == 0.0 {
            trace!("zero quaternion converted with scale 0");
            0.0
        } else {
            2.0 / q
        };
        Matrix3::from_cols_array([
            1.0 - s * (c * c + d * d),
            s * (b * c + a * d),
            s * (b * d - a * c),
            s * (b * c - a * d),
            1.0 - s * (b * b + d * d),
            s * (c * d + a * b),
            s * (b * d + a * c),
            s * (c * d - a * b),
            1.0 - s * (b * b + c * c),
        ])
    }

    /// 4x4 rotation matrix: [`Quaternion::to_matrix3`] padded with the
    /// identity.
    #[inline]
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_matrix3(&self.to_matrix3())
    }
}

impl Components for Quaternion {
    #[inline]
    fn val(&self) -> &[f32] {
        self.v.as_slice()
    }

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Quaternion
    }
}

impl NumericContainer for Quaternion {
    const KIND: Kind = Kind::Quaternion;

    fn from_slice(values: &[f32]) -> Result<Self> {
        <[f32; 4]>::try_from(values)
            .map(|v| Self::from_vector(Vector4::from_array(v)))
            .map_err(|_| Error::component_count(Self::KIND, 4, values.len()))
    }

    fn map_components<F: FnMut(usize, f32) -> f32>(&self, f: F) -> Self {
        Self::from_vector(self.v.map_components(f))
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Vector4> for Quaternion {
    fn from(v: Vector4) -> Self {
        Self::from_vector(v)
    }
}

impl From<Quaternion> for Vector4 {
    fn from(q: Quaternion) -> Self {
        q.v
    }
}

impl<'a> From<&'a Quaternion> for Part<'a> {
    fn from(q: &'a Quaternion) -> Self {
        Part::Container(q)
    }
}

impl ops::Add for Quaternion {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        NumericContainer::add(&self, &rhs)
    }
}

impl ops::Sub for Quaternion {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        NumericContainer::sub(&self, &rhs)
    }
}

impl ops::Mul<f32> for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl ops::Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_quaternion(&rhs)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_vector(f, self.v.as_slice())
    }
}

impl_approx_eq!([] Quaternion);
impl_serde!([] Quaternion);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_hamilton_units() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 0.0, 1.0);
        let minus_one = Quaternion::new(-1.0, 0.0, 0.0, 0.0);

        assert_eq!(i * j, k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(j * i, k * -1.0);
        assert_eq!(i * i, minus_one);
        assert_eq!(i * j * k, minus_one);
    }

    #[test]
    fn test_identity_is_neutral() {
        let q = Quaternion::new(0.5, -1.0, 2.0, 0.25);
        assert_eq!(Quaternion::IDENTITY * q, q);
        assert_eq!(q * Quaternion::IDENTITY, q);
    }

    #[test]
    fn test_from_axis_angle_normalizes_axis() {
        let q = Quaternion::from_axis_angle(PI, Vector3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(q, Quaternion::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(q.modulo(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let q = Quaternion::from_axis_angle(1.0, Vector3::ZERO);
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_to_matrix3_matches_planar_rotation() {
        for angle in [0.0, FRAC_PI_2, PI] {
            let q = Quaternion::from_axis_angle(angle, Vector3::UNIT_Z);
            assert_relative_eq!(q.to_matrix3(), Matrix3::rotation(angle), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_non_unit_quaternion_still_rotates() {
        let q = Quaternion::from_axis_angle(0.8, Vector3::new(1.0, 2.0, -0.5));
        let scaled = q * 3.0;
        assert_relative_eq!(scaled.to_matrix3(), q.to_matrix3(), epsilon = 1e-5);
        assert_relative_eq!(scaled.to_matrix3().determinant(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_quaternion_is_identity_matrix() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.to_matrix3(), Matrix3::identity());
    }

    #[test]
    fn test_product_composes_rotations() {
        let a = Quaternion::from_axis_angle(0.4, Vector3::UNIT_X);
        let b = Quaternion::from_axis_angle(-1.1, Vector3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(
            (a * b).to_matrix3(),
            a.to_matrix3() * b.to_matrix3(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_to_matrix4_pads_identity() {
        let q = Quaternion::from_axis_angle(0.3, Vector3::UNIT_Y);
        let m = q.to_matrix4();
        assert_eq!(Matrix3::from_matrix4(&m), q.to_matrix3());
        assert_eq!(m.col(3).unwrap(), Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(m, Matrix4::rotation_y(0.3), epsilon = 1e-6);
    }

    #[test]
    fn test_conjugate_inverts_unit_rotation() {
        let q = Quaternion::from_axis_angle(1.3, Vector3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(q * q.conjugate(), Quaternion::IDENTITY, epsilon = 1e-6);
    }

    #[test]
    fn test_from_parts() {
        let xyz = Vector3::new(1.0, 2.0, 3.0);
        let q = Quaternion::from_parts(&[Part::Scalar(0.5), Part::from(&xyz)]).unwrap();
        assert_eq!(q.to_array(), [0.5, 1.0, 2.0, 3.0]);
        assert_eq!((q.w(), q.x(), q.y(), q.z()), (0.5, 1.0, 2.0, 3.0));
        assert!(Quaternion::from_parts(&[Part::from(&xyz)]).is_err());
    }
}
