//! Square matrices.
//!
//! [`Matrix<N>`] stores `N * N` components in **column-major** order, as
//! GLSL does:
//!
//! ```text
//! flat index i + j*N  =  row i, column j
//!
//! | m0 m3 m6 |
//! | m1 m4 m7 |     (Matrix3)
//! | m2 m5 m8 |
//! ```
//!
//! The flat slice returned by [`Matrix::as_slice`] is exactly what a
//! `uniformMatrix*fv` call expects.
//!
//! # Multiplication
//!
//! | expression            | result      | formula                              |
//! |-----------------------|-------------|--------------------------------------|
//! | `Matrix * Matrix`     | `Matrix<N>` | `r[i*N+j] = sum_k a[k*N+j] * b[i*N+k]` |
//! | `Matrix * Vector`     | `Vector<N>` | `r[i] = sum_j m[i+j*N] * v[j]`        |
//! | `Vector * Matrix`     | `Vector<N>` | `r[i] = sum_j v[j] * m[i*N+j]`        |
//!
//! The last form treats the vector as a row vector.
//!
//! # Determinant and adjugate
//!
//! There is no generic formula: each supported size provides a closed form
//! through [`ClosedForm`], implemented for [`Dim<2>`], [`Dim<3>`] and
//! [`Dim<4>`]. [`Matrix::inverse`] divides the adjugate by the determinant
//! and fails when the determinant is exactly zero.

use std::array;
use std::fmt;
use std::ops;

use tracing::debug;

use crate::container::{Components, Kind, NumericContainer, Part, flatten, impl_approx_eq, impl_serde};
use crate::error::{Error, Result};
use crate::format;
use crate::vector::Vector;

/// Column-major storage: `cols[j][i]` is row `i` of column `j`.
pub type Cols<const N: usize> = [[f32; N]; N];

/// Marker for a supported matrix dimension.
#[derive(Debug, Clone, Copy)]
pub struct Dim<const N: usize>;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Dim<2> {}
    impl Sealed for super::Dim<3> {}
    impl Sealed for super::Dim<4> {}
}

/// Closed-form determinant and adjugate for one matrix size.
///
/// Sealed: implemented for `Dim<2>`, `Dim<3>` and `Dim<4>` only.
pub trait ClosedForm<const N: usize>: sealed::Sealed {
    /// Determinant of the matrix with the given columns.
    fn determinant(cols: &Cols<N>) -> f32;

    /// Adjugate (transposed cofactor matrix) of the given columns.
    fn adjugate(cols: &Cols<N>) -> Cols<N>;
}

/// An `N x N` matrix of `f32`, stored column-major.
///
/// Trace and determinant are computed once at construction.
#[derive(Debug, Clone, Copy)]
pub struct Matrix<const N: usize> {
    cols: Cols<N>,
    trace: f32,
    determinant: f32,
}

/// Builds column arrays from a column-major flat slice of `N * N` values.
#[inline]
pub(crate) fn cols_from_flat<const N: usize>(flat: &[f32]) -> Cols<N> {
    array::from_fn(|j| array::from_fn(|i| flat[j * N + i]))
}

impl<const N: usize> Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    /// Creates a matrix from its columns.
    pub fn from_cols(cols: Cols<N>) -> Self {
        let trace = (0..N).fold(0.0, |acc, i| acc + cols[i][i]);
        let determinant = <Dim<N> as ClosedForm<N>>::determinant(&cols);
        Self { cols, trace, determinant }
    }

    /// Creates a matrix from column vectors.
    pub fn from_col_vectors(cols: [Vector<N>; N]) -> Self {
        Self::from_cols(cols.map(|c| c.to_array()))
    }

    /// Diagonal matrix with `v` on the diagonal and zero elsewhere.
    pub fn diagonal(v: f32) -> Self {
        Self::from_cols(array::from_fn(|j| {
            array::from_fn(|i| if i == j { v } else { 0.0 })
        }))
    }

    /// Identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::diagonal(1.0)
    }

    /// All components zero.
    #[inline]
    pub fn zero() -> Self {
        Self::diagonal(0.0)
    }

    /// Creates a matrix by flattening `parts` in column-major order.
    ///
    /// A single scalar yields a diagonal matrix. Otherwise the flattened
    /// parts must yield exactly `N * N` components. Vectors are accepted
    /// as parts (one column each, typically); matrices are not, use the
    /// named conversions (`Matrix4::from_matrix3`, ...) instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glmat::{Matrix2, Part, Vector2};
    ///
    /// let c0 = Vector2::new(1.0, 2.0);
    /// let c1 = Vector2::new(3.0, 4.0);
    /// let m = Matrix2::from_parts(&[Part::from(&c0), Part::from(&c1)]).unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    ///
    /// assert_eq!(Matrix2::from_parts(&[1.0f32.into()]).unwrap(), Matrix2::identity());
    /// ```
    pub fn from_parts(parts: &[Part<'_>]) -> Result<Self> {
        let values = flatten(Self::KIND, parts)?;
        match values.as_slice() {
            [v] => Ok(Self::diagonal(*v)),
            values => Self::from_slice(values),
        }
    }

    /// Columns as arrays.
    #[inline]
    pub const fn to_cols(&self) -> Cols<N> {
        self.cols
    }

    /// Flat column-major components.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        self.cols.as_flattened()
    }

    /// Element at row `i`, column `j`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.cols.get(col).and_then(|c| c.get(row)).copied()
    }

    /// Column `i`: the flat range `[i*N, i*N + N)`.
    pub fn col(&self, i: usize) -> Result<Vector<N>> {
        self.cols
            .get(i)
            .map(|c| Vector::from_array(*c))
            .ok_or_else(|| Error::out_of_range(Self::KIND, i, N))
    }

    /// Row `i`.
    pub fn row(&self, i: usize) -> Result<Vector<N>> {
        if i >= N {
            return Err(Error::out_of_range(Self::KIND, i, N));
        }
        Ok(Vector::from_array(array::from_fn(|j| self.cols[j][i])))
    }

    /// Flat component `i`.
    pub fn component(&self, i: usize) -> Result<f32> {
        self.as_slice()
            .get(i)
            .copied()
            .ok_or_else(|| Error::out_of_range(Self::KIND, i, N * N))
    }

    /// Returns a copy with flat component `i` replaced by `v`.
    pub fn with_component(&self, i: usize, v: f32) -> Result<Self> {
        if i >= N * N {
            return Err(Error::out_of_range(Self::KIND, i, N * N));
        }
        let mut cols = self.cols;
        cols[i / N][i % N] = v;
        Ok(Self::from_cols(cols))
    }

    /// Reflects the matrix across its diagonal.
    pub fn transposed(&self) -> Self {
        Self::from_cols(array::from_fn(|j| array::from_fn(|i| self.cols[i][j])))
    }

    /// Sum of the diagonal.
    #[inline]
    pub fn trace(&self) -> f32 {
        self.trace
    }

    /// Determinant, from the closed form for this size.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.determinant
    }

    /// Transposed cofactor matrix.
    pub fn adjugate(&self) -> Self {
        Self::from_cols(<Dim<N> as ClosedForm<N>>::adjugate(&self.cols))
    }

    /// Inverse matrix: adjugate scaled by `1 / determinant`.
    ///
    /// # Errors
    ///
    /// [`Error::NotInvertible`] when the determinant is exactly zero. Nearly
    /// singular matrices are inverted as-is.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glmat::Matrix2;
    ///
    /// let m = Matrix2::diagonal(2.0);
    /// assert_eq!(m.inverse().unwrap(), Matrix2::diagonal(0.5));
    /// ```
    pub fn inverse(&self) -> Result<Self> {
        if self.determinant == 0.0 {
            debug!(target_kind = %Self::KIND, "rejecting inverse of singular matrix");
            return Err(Error::NotInvertible { target: Self::KIND });
        }
        let inv_det = 1.0 / self.determinant;
        Ok(self.adjugate().scale(inv_det))
    }

    /// Matrix product `self * other`.
    pub fn mul_matrix(&self, other: &Self) -> Self {
        Self::from_cols(array::from_fn(|i| {
            array::from_fn(|j| (0..N).fold(0.0, |acc, k| acc + self.cols[k][j] * other.cols[i][k]))
        }))
    }

    /// Transforms a column vector: `self * v`.
    pub fn mul_vector(&self, v: &Vector<N>) -> Vector<N> {
        let v = v.to_array();
        Vector::from_array(array::from_fn(|i| {
            (0..N).fold(0.0, |acc, j| acc + self.cols[j][i] * v[j])
        }))
    }
}

impl<const N: usize> Vector<N>
where
    Dim<N>: ClosedForm<N>,
{
    /// Row-vector product `self * m`: `r[i] = sum_j v[j] * m[i*N + j]`.
    pub fn mul_matrix(&self, m: &Matrix<N>) -> Self {
        let v = self.to_array();
        Self::from_array(array::from_fn(|i| {
            (0..N).fold(0.0, |acc, j| acc + v[j] * m.cols[i][j])
        }))
    }
}

impl<const N: usize> Components for Matrix<N> {
    #[inline]
    fn val(&self) -> &[f32] {
        self.cols.as_flattened()
    }

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Matrix(N)
    }
}

impl<const N: usize> NumericContainer for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    const KIND: Kind = Kind::Matrix(N);

    fn from_slice(values: &[f32]) -> Result<Self> {
        if values.len() != N * N {
            return Err(Error::component_count(Self::KIND, N * N, values.len()));
        }
        Ok(Self::from_cols(cols_from_flat(values)))
    }

    fn map_components<F: FnMut(usize, f32) -> f32>(&self, mut f: F) -> Self {
        Self::from_cols(array::from_fn(|j| {
            array::from_fn(|i| f(j * N + i, self.cols[j][i]))
        }))
    }
}

// Equality ignores the cached scalars; they are functions of the components.
impl<const N: usize> PartialEq for Matrix<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cols == other.cols
    }
}

impl<const N: usize> Default for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    fn default() -> Self {
        Self::identity()
    }
}

impl<'a, const N: usize> From<&'a Matrix<N>> for Part<'a> {
    fn from(m: &'a Matrix<N>) -> Self {
        Part::Container(m)
    }
}

impl<const N: usize> ops::Add for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        NumericContainer::add(&self, &rhs)
    }
}

impl<const N: usize> ops::Sub for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        NumericContainer::sub(&self, &rhs)
    }
}

impl<const N: usize> ops::Mul<f32> for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl<const N: usize> ops::Mul for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_matrix(&rhs)
    }
}

impl<const N: usize> ops::Mul<Vector<N>> for Matrix<N>
where
    Dim<N>: ClosedForm<N>,
{
    type Output = Vector<N>;

    #[inline]
    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        self.mul_vector(&rhs)
    }
}

impl<const N: usize> ops::Mul<Matrix<N>> for Vector<N>
where
    Dim<N>: ClosedForm<N>,
{
    type Output = Vector<N>;

    #[inline]
    fn mul(self, rhs: Matrix<N>) -> Vector<N> {
        self.mul_matrix(&rhs)
    }
}

impl<const N: usize> fmt::Display for Matrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_matrix(f, N, self.cols.as_flattened())
    }
}

impl_approx_eq!([const N: usize] Matrix<N>);
impl_serde!([const N: usize] Matrix<N> where Dim<N>: ClosedForm<N>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorCategory, Matrix2, Matrix3, Matrix4, Vector2, Vector3, Vector4};
    use approx::assert_relative_eq;

    fn sample3() -> Matrix3 {
        Matrix3::from_cols_array([2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0])
    }

    #[test]
    fn test_column_major_layout() {
        let m = Matrix3::from_cols_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.get(0, 1), Some(4.0));
        assert_eq!(m.get(2, 0), Some(3.0));
        assert_eq!(m.col(1).unwrap(), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(m.row(1).unwrap(), Vector3::new(2.0, 5.0, 8.0));
    }

    #[test]
    fn test_from_col_vectors() {
        let cols = [
            Vector3::new(2.0, 0.0, 1.0),
            Vector3::new(1.0, 3.0, 0.0),
            Vector3::new(0.0, 1.0, 4.0),
        ];
        let m = Matrix3::from_col_vectors(cols);
        assert_eq!(m, sample3());
        assert_eq!(m.trace(), 9.0);
        assert_relative_eq!(m.determinant(), 25.0, epsilon = 1e-6);
        for (i, c) in cols.iter().enumerate() {
            assert_eq!(m.col(i).unwrap(), *c);
        }

        let m2 = Matrix2::from_col_vectors([Vector2::new(1.0, 2.0), Vector2::new(3.0, 4.0)]);
        assert_eq!(m2.row(0).unwrap(), Vector2::new(1.0, 3.0));
    }

    #[test]
    fn test_col_out_of_range() {
        let m = Matrix4::identity();
        assert_eq!(m.col(3).unwrap(), Vector4::new(0.0, 0.0, 0.0, 1.0));
        let err = m.col(4).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Range);
        assert!(m.row(4).is_err());
        assert!(m.component(16).is_err());
    }

    #[test]
    fn test_scalar_is_diagonal() {
        let m = Matrix3::from_parts(&[Part::Scalar(3.0)]).unwrap();
        assert_eq!(m, Matrix3::diagonal(3.0));
        assert_eq!(m.trace(), 9.0);
        assert_eq!(m.determinant(), 27.0);
    }

    #[test]
    fn test_wrong_component_count() {
        let err = Matrix2::from_parts(&[Part::from(&[1.0f32, 2.0, 3.0])]).unwrap_err();
        assert!(matches!(err, Error::TooFewComponents { expected: 4, got: 3, .. }));

        let err = Matrix2::from_parts(&[Part::from(&[0.0f32; 5])]).unwrap_err();
        assert!(matches!(err, Error::TooManyComponents { expected: 4, got: 5, .. }));
    }

    #[test]
    fn test_matrix_part_rejected() {
        let inner = Matrix2::identity();
        let err = Matrix4::from_parts(&[Part::from(&inner)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidElement { element: Kind::Matrix(2), .. }
        ));
    }

    #[test]
    fn test_transposed() {
        let m = sample3();
        let t = m.transposed();
        assert_eq!(t.get(0, 1), m.get(1, 0));
        assert_eq!(t.get(2, 1), m.get(1, 2));
        assert_eq!(t.transposed(), m);
    }

    #[test]
    fn test_trace() {
        assert_eq!(sample3().trace(), 9.0);
        assert_eq!(Matrix4::identity().trace(), 4.0);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = sample3();
        let inv = m.inverse().unwrap();
        assert_relative_eq!(inv * m, Matrix3::identity(), epsilon = 1e-5);
        assert_relative_eq!(m * inv, Matrix3::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_singular_inverse_fails() {
        let m = Matrix3::from_cols_array([1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 1.0]);
        assert_eq!(m.determinant(), 0.0);
        let err = m.inverse().unwrap_err();
        assert_eq!(err, Error::NotInvertible { target: Kind::Matrix(3) });
    }

    #[test]
    fn test_mul_matrix_is_standard_product() {
        // Row form [[1, 2], [3, 4]] * [[5, 6], [7, 8]] = [[19, 22], [43, 50]]
        let a = Matrix2::from_cols_array([1.0, 3.0, 2.0, 4.0]);
        let b = Matrix2::from_cols_array([5.0, 7.0, 6.0, 8.0]);
        assert_eq!((a * b).as_slice(), &[19.0, 43.0, 22.0, 50.0]);
    }

    #[test]
    fn test_matrix_vector_products() {
        // Row form [[1, 2], [3, 4]]
        let m = Matrix2::from_cols_array([1.0, 3.0, 2.0, 4.0]);
        let v = Vector2::new(1.0, 1.0);
        // Column vector: row sums.
        assert_eq!(m * v, Vector2::new(3.0, 7.0));
        // Row vector: column sums.
        assert_eq!(v * m, Vector2::new(4.0, 6.0));
    }

    #[test]
    fn test_with_component_recomputes_caches() {
        let m = Matrix2::identity().with_component(3, 5.0).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 5.0]);
        assert_eq!(m.trace(), 6.0);
        assert_eq!(m.determinant(), 5.0);
    }

    #[test]
    fn test_add_sub_scale() {
        let a = Matrix2::identity();
        let b = Matrix2::diagonal(2.0);
        assert_eq!(a + b, Matrix2::diagonal(3.0));
        assert_eq!(b - a, a);
        assert_eq!(a * 4.0, Matrix2::diagonal(4.0));
    }

    #[test]
    fn test_display_row_major() {
        let m = Matrix2::from_cols_array([1.0, 3.0, 2.0, 4.0]);
        assert_eq!(m.to_string(), "[ 1.00, 2.00\n  3.00, 4.00 ]");
    }
}
