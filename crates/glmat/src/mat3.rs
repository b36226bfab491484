//! 3x3 matrices and 2D homogeneous transforms.
//!
//! The builders produce transforms for 2D points written as homogeneous
//! column vectors `(x, y, 1)`. Compose them with `*`; the rightmost matrix
//! applies first:
//!
//! ```rust
//! use glmat::{Matrix3, Vector3};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let m = Matrix3::translation(10.0, 0.0) * Matrix3::rotation(FRAC_PI_2);
//! let p = m * Vector3::new(1.0, 0.0, 1.0);
//! assert!((p.x() - 10.0).abs() < 1e-6);
//! assert!((p.y() - 1.0).abs() < 1e-6);
//! ```

use crate::matrix::{ClosedForm, Cols, Dim, Matrix, cols_from_flat};
use crate::{Matrix2, Matrix4};

/// 3x3 matrix.
pub type Matrix3 = Matrix<3>;

impl ClosedForm<3> for Dim<3> {
    fn determinant(cols: &Cols<3>) -> f32 {
        let m = cols.as_flattened();
        m[0] * (m[4] * m[8] - m[7] * m[5])
            + m[3] * (m[7] * m[2] - m[1] * m[8])
            + m[6] * (m[1] * m[5] - m[4] * m[2])
    }

    fn adjugate(cols: &Cols<3>) -> Cols<3> {
        let m = cols.as_flattened();
        cols_from_flat(&[
            m[4] * m[8] - m[7] * m[5],
            m[7] * m[2] - m[1] * m[8],
            m[1] * m[5] - m[4] * m[2],
            m[6] * m[5] - m[3] * m[8],
            m[0] * m[8] - m[6] * m[2],
            m[3] * m[2] - m[0] * m[5],
            m[3] * m[7] - m[6] * m[4],
            m[6] * m[1] - m[0] * m[7],
            m[0] * m[4] - m[3] * m[1],
        ])
    }
}

impl Matrix<3> {
    /// Creates a matrix from 9 column-major components.
    #[inline]
    pub fn from_cols_array(m: [f32; 9]) -> Self {
        Self::from_cols(cols_from_flat(&m))
    }

    /// Copies the column-major components out.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 9] {
        let mut out = [0.0; 9];
        out.copy_from_slice(self.as_slice());
        out
    }

    /// Embeds a [`Matrix2`] in the top-left block; the third row and
    /// column come from the identity.
    pub fn from_matrix2(m: &Matrix2) -> Self {
        let [[a, c], [b, d]] = m.to_cols();
        Self::from_cols([[a, c, 0.0], [b, d, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Top-left 3x3 block of a [`Matrix4`].
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let [c0, c1, c2, _] = m.to_cols();
        Self::from_cols([
            [c0[0], c0[1], c0[2]],
            [c1[0], c1[1], c1[2]],
            [c2[0], c2[1], c2[2]],
        ])
    }

    /// 2D translation by `(dx, dy)`.
    pub fn translation(dx: f32, dy: f32) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            dx, dy, 1.0,
        ])
    }

    /// 2D scale by `(sx, sy)`.
    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::from_cols_array([
            sx, 0.0, 0.0,
            0.0, sy, 0.0,
            0.0, 0.0, 1.0,
        ])
    }

    /// 2D scale by `s` on both axes.
    #[inline]
    pub fn uniform_scale(s: f32) -> Self {
        Self::scale(s, s)
    }

    /// Counter-clockwise 2D rotation by `angle` radians.
    pub fn rotation(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols_array([
            c, s, 0.0,
            -s, c, 0.0,
            0.0, 0.0, 1.0,
        ])
    }

    /// Shear of the X axis: the image of `(1, 0)` is `(1, h)`.
    pub fn shear_x(h: f32) -> Self {
        Self::from_cols_array([
            1.0, h, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ])
    }

    /// Shear of the Y axis: the image of `(0, 1)` is `(h, 1)`.
    pub fn shear_y(h: f32) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0,
            h, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ])
    }
}

impl From<Matrix2> for Matrix3 {
    fn from(m: Matrix2) -> Self {
        Self::from_matrix2(&m)
    }
}

impl From<Matrix4> for Matrix3 {
    fn from(m: Matrix4) -> Self {
        Self::from_matrix4(&m)
    }
}
