//! 2x2 matrices.
//!
//! ```text
//! column-major [a, c, b, d]  =  | a b |
//!                               | c d |
//! ```

use crate::matrix::{ClosedForm, Cols, Dim, Matrix, cols_from_flat};
use crate::{Matrix3, Matrix4};

/// 2x2 matrix.
pub type Matrix2 = Matrix<2>;

impl ClosedForm<2> for Dim<2> {
    #[inline]
    fn determinant(cols: &Cols<2>) -> f32 {
        let [[a, c], [b, d]] = *cols;
        a * d - b * c
    }

    #[inline]
    fn adjugate(cols: &Cols<2>) -> Cols<2> {
        let [[a, c], [b, d]] = *cols;
        [[d, -c], [-b, a]]
    }
}

impl Matrix<2> {
    /// Creates a matrix from 4 column-major components.
    #[inline]
    pub fn from_cols_array(m: [f32; 4]) -> Self {
        Self::from_cols(cols_from_flat(&m))
    }

    /// Copies the column-major components out.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 4] {
        let [[a, c], [b, d]] = self.to_cols();
        [a, c, b, d]
    }

    /// Top-left 2x2 block of a [`Matrix3`].
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let [c0, c1, _] = m.to_cols();
        Self::from_cols([[c0[0], c0[1]], [c1[0], c1[1]]])
    }

    /// Top-left 2x2 block of a [`Matrix4`].
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let [c0, c1, _, _] = m.to_cols();
        Self::from_cols([[c0[0], c0[1]], [c1[0], c1[1]]])
    }
}

impl From<Matrix3> for Matrix2 {
    fn from(m: Matrix3) -> Self {
        Self::from_matrix3(&m)
    }
}

impl From<Matrix4> for Matrix2 {
    fn from(m: Matrix4) -> Self {
        Self::from_matrix4(&m)
    }
}
