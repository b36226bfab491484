//! 4x4 matrices: 3D transforms and projections.
//!
//! Builders produce matrices for homogeneous column vectors; compose them
//! with `*`, rightmost first. Cameras look down the negative Z axis.
//!
//! # Usage
//!
//! ```rust
//! use glmat::{Matrix4, Vector3};
//!
//! let model = Matrix4::translation(0.0, 0.0, -5.0) * Matrix4::rotation_y(0.5);
//! let camera = Matrix4::look_at(Vector3::new(0.0, 2.0, 3.0), Vector3::ZERO);
//! let view = camera.inverse().unwrap();
//! let projection = Matrix4::perspective_fov(1.0, 16.0 / 9.0, 0.1, 100.0);
//!
//! let mvp = projection * view * model;
//! let uniform: &[f32] = mvp.as_slice();
//! assert_eq!(uniform.len(), 16);
//! ```
//!
//! # Projections
//!
//! `near` and `far` must differ and be nonzero. This is not checked: the
//! formulas divide by `near - far` and produce infinities otherwise.

use tracing::debug;

use crate::matrix::{ClosedForm, Cols, Dim, Matrix, cols_from_flat};
use crate::{Matrix2, Matrix3, Vector3};

/// 4x4 matrix.
pub type Matrix4 = Matrix<4>;

// Laplace expansion over the 2x2 minors of the top two rows (s*) and the
// bottom two rows (c*). Each 3x3 cofactor is a sum of three products of a
// matrix element and one of these minors.
impl ClosedForm<4> for Dim<4> {
    fn determinant(cols: &Cols<4>) -> f32 {
        let a = |r: usize, c: usize| cols[c][r];

        let s0 = a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1);
        let s1 = a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2);
        let s2 = a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3);
        let s3 = a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2);
        let s4 = a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3);
        let s5 = a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3);

        let c5 = a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3);
        let c4 = a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3);
        let c3 = a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2);
        let c2 = a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3);
        let c1 = a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2);
        let c0 = a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1);

        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }

    fn adjugate(cols: &Cols<4>) -> Cols<4> {
        let a = |r: usize, c: usize| cols[c][r];

        let s0 = a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1);
        let s1 = a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2);
        let s2 = a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3);
        let s3 = a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2);
        let s4 = a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3);
        let s5 = a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3);

        let c5 = a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3);
        let c4 = a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3);
        let c3 = a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2);
        let c2 = a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3);
        let c1 = a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2);
        let c0 = a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1);

        // Rows of the adjugate.
        let r0 = [
            a(1, 1) * c5 - a(1, 2) * c4 + a(1, 3) * c3,
            -a(0, 1) * c5 + a(0, 2) * c4 - a(0, 3) * c3,
            a(3, 1) * s5 - a(3, 2) * s4 + a(3, 3) * s3,
            -a(2, 1) * s5 + a(2, 2) * s4 - a(2, 3) * s3,
        ];
        let r1 = [
            -a(1, 0) * c5 + a(1, 2) * c2 - a(1, 3) * c1,
            a(0, 0) * c5 - a(0, 2) * c2 + a(0, 3) * c1,
            -a(3, 0) * s5 + a(3, 2) * s2 - a(3, 3) * s1,
            a(2, 0) * s5 - a(2, 2) * s2 + a(2, 3) * s1,
        ];
        let r2 = [
            a(1, 0) * c4 - a(1, 1) * c2 + a(1, 3) * c0,
            -a(0, 0) * c4 + a(0, 1) * c2 - a(0, 3) * c0,
            a(3, 0) * s4 - a(3, 1) * s2 + a(3, 3) * s0,
            -a(2, 0) * s4 + a(2, 1) * s2 - a(2, 3) * s0,
        ];
        let r3 = [
            -a(1, 0) * c3 + a(1, 1) * c1 - a(1, 2) * c0,
            a(0, 0) * c3 - a(0, 1) * c1 + a(0, 2) * c0,
            -a(3, 0) * s3 + a(3, 1) * s1 - a(3, 2) * s0,
            a(2, 0) * s3 - a(2, 1) * s1 + a(2, 2) * s0,
        ];

        std::array::from_fn(|j| [r0[j], r1[j], r2[j], r3[j]])
    }
}

impl Matrix<4> {
    /// Creates a matrix from 16 column-major components.
    #[inline]
    pub fn from_cols_array(m: [f32; 16]) -> Self {
        Self::from_cols(cols_from_flat(&m))
    }

    /// Copies the column-major components out.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.as_slice());
        out
    }

    /// Embeds a [`Matrix3`] in the top-left block; the fourth row and
    /// column are `(0, 0, 0, 1)`.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let [c0, c1, c2] = m.to_cols();
        Self::from_cols([
            [c0[0], c0[1], c0[2], 0.0],
            [c1[0], c1[1], c1[2], 0.0],
            [c2[0], c2[1], c2[2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Embeds a [`Matrix2`] in the top-left block; everything else comes
    /// from the identity.
    pub fn from_matrix2(m: &Matrix2) -> Self {
        let [[a, c], [b, d]] = m.to_cols();
        Self::from_cols([
            [a, c, 0.0, 0.0],
            [b, d, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// 3D translation by `(dx, dy, dz)`.
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx, dy, dz, 1.0,
        ])
    }

    /// 3D translation by a vector.
    #[inline]
    pub fn translation_by(d: Vector3) -> Self {
        Self::translation(d.x(), d.y(), d.z())
    }

    /// 3D scale by `(sx, sy, sz)`.
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_cols_array([
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// 3D scale by `s` on all axes.
    #[inline]
    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s, s)
    }

    /// Rotation of `angle` radians around the X axis.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, c, s, 0.0,
            0.0, -s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians around the Y axis.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, 0.0, -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation of `angle` radians around the Z axis.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, s, 0.0, 0.0,
            -s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Shear of the X axis: the image of `(1, 0, 0)` is `(1, hy, hz)`.
    pub fn shear_x(hy: f32, hz: f32) -> Self {
        Self::from_cols_array([
            1.0, hy, hz, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Shear of the Y axis: the image of `(0, 1, 0)` is `(hx, 1, hz)`.
    pub fn shear_y(hx: f32, hz: f32) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0,
            hx, 1.0, hz, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Shear of the Z axis: the image of `(0, 0, 1)` is `(hx, hy, 1)`.
    pub fn shear_z(hx: f32, hy: f32) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            hx, hy, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Orthographic projection.
    ///
    /// * `half_width`, `half_height` - half extents of the view volume
    /// * `near`, `far` - clip plane distances
    pub fn orthographic(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        let depth = near - far;
        Self::from_cols_array([
            1.0 / half_width, 0.0, 0.0, 0.0,
            0.0, 1.0 / half_height, 0.0, 0.0,
            0.0, 0.0, 2.0 / depth, 0.0,
            0.0, 0.0, (near + far) / depth, 1.0,
        ])
    }

    /// Perspective projection with the projection plane at `near`.
    ///
    /// * `half_width`, `half_height` - half extents at the projection plane
    /// * `near`, `far` - clip plane distances
    #[inline]
    pub fn perspective(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self::perspective_with_plane(half_width, half_height, near, far, near)
    }

    /// Perspective projection with the projection plane at distance `plane`.
    pub fn perspective_with_plane(
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
        plane: f32,
    ) -> Self {
        let depth = near - far;
        Self::from_cols_array([
            plane / half_width, 0.0, 0.0, 0.0,
            0.0, plane / half_height, 0.0, 0.0,
            0.0, 0.0, (near + far) / depth, -1.0,
            0.0, 0.0, 2.0 * far * near / depth, 0.0,
        ])
    }

    /// Perspective projection from a vertical field of view (radians) and
    /// an aspect ratio (width / height).
    pub fn perspective_fov(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_height = (fov_y / 2.0).tan();
        Self::perspective_with_plane(aspect * half_height, half_height, near, far, 1.0)
    }

    /// Rotation from Euler angles: roll about X first, then pitch about Y,
    /// then yaw about Z.
    pub fn euler(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self::rotation_z(yaw) * Self::rotation_y(pitch) * Self::rotation_x(roll)
    }

    /// Camera transform at `source` looking at `target`, with +Y as up.
    ///
    /// See [`Matrix4::look_at_with_up`].
    #[inline]
    pub fn look_at(source: Vector3, target: Vector3) -> Self {
        Self::look_at_with_up(source, target, Vector3::UNIT_Y)
    }

    /// Camera transform at `source` looking at `target`.
    ///
    /// Columns are the camera basis `right`, `up`, `forward` and the
    /// position `source`, where `forward` points from `target` back to
    /// the camera. This maps camera space to world space; invert it to get
    /// a view matrix.
    ///
    /// Degenerate inputs fall back rather than fail: coincident `source`
    /// and `target` use `forward = +Z`, and `up` parallel to `forward` uses
    /// `right = +X`.
    pub fn look_at_with_up(source: Vector3, target: Vector3, up: Vector3) -> Self {
        let mut forward = (source - target).normalized();
        if forward.modulo() == 0.0 {
            debug!("look_at: source and target coincide, forward falls back to +Z");
            forward = Vector3::UNIT_Z;
        }
        let mut right = up.cross(&forward).normalized();
        if right.modulo() == 0.0 {
            debug!("look_at: up is parallel to forward, right falls back to +X");
            right = Vector3::UNIT_X;
        }
        let up = forward.cross(&right);

        Self::from_cols([
            right.extend(0.0).to_array(),
            up.extend(0.0).to_array(),
            forward.extend(0.0).to_array(),
            source.extend(1.0).to_array(),
        ])
    }
}

impl From<Matrix2> for Matrix4 {
    fn from(m: Matrix2) -> Self {
        Self::from_matrix2(&m)
    }
}

impl From<Matrix3> for Matrix4 {
    fn from(m: Matrix3) -> Self {
        Self::from_matrix3(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumericContainer, Vector4};
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    /// Adjugate from 3x3 minor determinants, independent of the closed form.
    fn reference_adjugate(m: &Matrix4) -> Matrix4 {
        let mut adj = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut minor = [0.0; 9];
                let mut k = 0;
                for c in (0..4).filter(|&c| c != col) {
                    for r in (0..4).filter(|&r| r != row) {
                        minor[k] = m.get(r, c).unwrap_or_default();
                        k += 1;
                    }
                }
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                adj[col + row * 4] = sign * Matrix3::from_cols_array(minor).determinant();
            }
        }
        Matrix4::from_cols_array(adj)
    }

    fn sample() -> Matrix4 {
        Matrix4::from_cols_array([
            2.0, 1.0, 0.0, 1.0,
            0.5, 3.0, 1.0, 0.0,
            1.0, -1.0, 4.0, 2.0,
            0.0, 2.0, 1.0, 5.0,
        ])
    }

    #[test]
    fn test_adjugate_matches_minors() {
        let m = sample();
        assert_relative_eq!(m.adjugate(), reference_adjugate(&m), epsilon = 1e-3);
    }

    #[test]
    fn test_determinant_matches_expansion() {
        let m = sample();
        // First column of the adjugate times the first row of M.
        let adj = reference_adjugate(&m);
        let expected: f32 = (0..4)
            .map(|k| m.get(0, k).unwrap_or_default() * adj.get(k, 0).unwrap_or_default())
            .sum();
        assert_relative_eq!(m.determinant(), expected, epsilon = 1e-3);
        assert_eq!(Matrix4::scale(2.0, 3.0, 4.0).determinant(), 24.0);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = sample();
        let inv = m.inverse().unwrap();
        assert_relative_eq!(inv * m, Matrix4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_translation_inverse() {
        let inv = Matrix4::translation(1.0, 2.0, 3.0).inverse().unwrap();
        assert_eq!(inv, Matrix4::translation(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_translation_moves_points() {
        let p = Matrix4::translation(1.0, 2.0, 3.0) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(
            Matrix4::translation_by(Vector3::new(1.0, 2.0, 3.0)),
            Matrix4::translation(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_from_smaller_matrices() {
        assert_eq!(Matrix4::from_matrix2(&Matrix2::identity()), Matrix4::identity());
        assert_eq!(Matrix4::from(Matrix3::identity()), Matrix4::identity());

        let m3 = Matrix3::from_cols_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(
            Matrix4::from(m3).to_cols_array(),
            [1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );

        let m2 = Matrix2::from_cols_array([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            Matrix4::from(m2).to_cols_array(),
            [1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_rotations_right_handed() {
        let x = Vector4::new(1.0, 0.0, 0.0, 0.0);
        let y = Vector4::new(0.0, 1.0, 0.0, 0.0);
        let z = Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert_relative_eq!(Matrix4::rotation_z(FRAC_PI_2) * x, y, epsilon = 1e-6);
        assert_relative_eq!(Matrix4::rotation_x(FRAC_PI_2) * y, z, epsilon = 1e-6);
        assert_relative_eq!(Matrix4::rotation_y(FRAC_PI_2) * z, x, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_z_matches_matrix3() {
        let m = Matrix4::rotation_z(0.7);
        assert_eq!(Matrix3::from_matrix4(&m), Matrix3::rotation(0.7));
    }

    #[test]
    fn test_shears() {
        let p = Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(Matrix4::shear_x(2.0, 3.0) * p, Vector4::new(1.0, 3.0, 4.0, 1.0));
        assert_eq!(Matrix4::shear_y(2.0, 3.0) * p, Vector4::new(3.0, 1.0, 4.0, 1.0));
        assert_eq!(Matrix4::shear_z(2.0, 3.0) * p, Vector4::new(3.0, 4.0, 1.0, 1.0));
    }

    #[test]
    fn test_orthographic_maps_clip_planes() {
        let m = Matrix4::orthographic(2.0, 1.0, 1.0, 11.0);
        let near = m * Vector4::new(2.0, 1.0, -1.0, 1.0);
        let far = m * Vector4::new(-2.0, -1.0, -11.0, 1.0);
        assert_relative_eq!(near, Vector4::new(1.0, 1.0, -1.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(far, Vector4::new(-1.0, -1.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_maps_clip_planes() {
        let m = Matrix4::perspective(1.0, 1.0, 1.0, 10.0);
        let ndc = |v: Vector4| v.scale(1.0 / v.w());

        let near = m * Vector4::new(1.0, 1.0, -1.0, 1.0);
        assert_relative_eq!(ndc(near), Vector4::new(1.0, 1.0, -1.0, 1.0), epsilon = 1e-5);

        let far = m * Vector4::new(0.0, 0.0, -10.0, 1.0);
        assert_relative_eq!(ndc(far).z(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_fov() {
        let m = Matrix4::perspective_fov(FRAC_PI_2, 2.0, 1.0, 10.0);
        // tan(45 deg) = 1, so half height 1 and half width 2 at unit distance.
        let expected = Matrix4::perspective_with_plane(2.0, 1.0, 1.0, 10.0, 1.0);
        assert_relative_eq!(m, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_plane_distance() {
        let (near, far, plane) = (0.5, 20.0, 3.0);
        let c = Matrix4::perspective_with_plane(2.0, 1.5, near, far, plane).to_cols_array();
        assert_relative_eq!(c[0], plane / 2.0);
        assert_relative_eq!(c[5], plane / 1.5);
        assert_relative_eq!(c[10], (near + far) / (near - far));
        assert_eq!(c[11], -1.0);
        assert_relative_eq!(c[14], 2.0 * far * near / (near - far));
        assert_eq!(c[15], 0.0);

        // Without an explicit plane the near distance is used.
        let c = Matrix4::perspective(2.0, 1.5, near, far).to_cols_array();
        assert_relative_eq!(c[0], near / 2.0);
        assert_relative_eq!(c[5], near / 1.5);
    }

    #[test]
    fn test_perspective_fov_unit_plane() {
        let (fov, aspect) = (1.0f32, 1.6);
        let c = Matrix4::perspective_fov(fov, aspect, 0.1, 100.0).to_cols_array();
        let focal = 1.0 / (fov / 2.0).tan();
        assert_relative_eq!(c[5], focal, epsilon = 1e-6);
        assert_relative_eq!(c[0], focal / aspect, epsilon = 1e-6);
        assert_relative_eq!(c[10], 100.1 / -99.9, epsilon = 1e-6);
        assert_relative_eq!(c[14], 20.0 / -99.9, epsilon = 1e-6);
    }

    #[test]
    fn test_euler_order() {
        let (roll, pitch, yaw) = (0.1, 0.2, 0.3);
        let expected =
            Matrix4::rotation_z(yaw) * Matrix4::rotation_y(pitch) * Matrix4::rotation_x(roll);
        assert_eq!(Matrix4::euler(roll, pitch, yaw), expected);
        assert_relative_eq!(
            Matrix4::euler(FRAC_PI_4, 0.0, 0.0),
            Matrix4::rotation_x(FRAC_PI_4),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_look_at_basis() {
        let source = Vector3::new(0.0, 0.0, 5.0);
        let m = Matrix4::look_at(source, Vector3::ZERO);
        assert_relative_eq!(m, Matrix4::translation(0.0, 0.0, 5.0), epsilon = 1e-6);

        // The view matrix brings the target onto the negative Z axis.
        let view = m.inverse().unwrap();
        let target = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(target, Vector4::new(0.0, 0.0, -5.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_look_at_degenerate_fallbacks() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        let m = Matrix4::look_at(p, p);
        assert_eq!(m.col(2).unwrap(), Vector4::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(m.col(3).unwrap(), p.extend(1.0));

        // Looking straight down: up is parallel to forward.
        let m = Matrix4::look_at(Vector3::new(0.0, 5.0, 0.0), Vector3::ZERO);
        assert_eq!(m.col(0).unwrap(), Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(m.col(2).unwrap(), Vector4::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(m.col(1).unwrap(), Vector4::new(0.0, 0.0, -1.0, 0.0));
    }
}
