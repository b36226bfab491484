//! Fixed-length vectors.
//!
//! [`Vector<N>`] holds `N` components and caches its Euclidean norm
//! ([`Vector::modulo`]) at construction. Values are immutable: every
//! operation, including [`Vector::with_component`], returns a new vector.
//!
//! Component accessors follow the GLSL naming schemes, all of them aliases
//! over the same positional storage:
//!
//! | index | position | color | texture |
//! |-------|----------|-------|---------|
//! | 0     | `x`      | `r`   | `s`     |
//! | 1     | `y`      | `g`   | `t`     |
//! | 2     | `z`      | `b`   | `p`     |
//! | 3     | `w`      | `a`   | `q`     |
//!
//! # Usage
//!
//! ```rust
//! use glmat::Vector3;
//!
//! let a = Vector3::new(1.0, 0.0, 0.0);
//! let b = Vector3::new(0.0, 1.0, 0.0);
//! assert_eq!(a.cross(&b), Vector3::new(0.0, 0.0, 1.0));
//! assert_eq!(a * b, 0.0);
//! ```

use std::fmt;
use std::ops;

use crate::container::{Components, Kind, NumericContainer, Part, flatten, impl_approx_eq, impl_serde};
use crate::error::{Error, Result};
use crate::format;

/// An `N`-component vector of `f32`.
#[derive(Debug, Clone, Copy)]
pub struct Vector<const N: usize> {
    val: [f32; N],
    modulo: f32,
}

/// 2-component vector.
pub type Vector2 = Vector<2>;
/// 3-component vector.
pub type Vector3 = Vector<3>;
/// 4-component vector (homogeneous coordinates, RGBA).
pub type Vector4 = Vector<4>;

impl<const N: usize> Vector<N> {
    /// All components zero.
    pub const ZERO: Self = Self {
        val: [0.0; N],
        modulo: 0.0,
    };

    /// Creates a vector from its components.
    #[inline]
    pub fn from_array(val: [f32; N]) -> Self {
        let modulo = val.iter().fold(0.0, |acc, v| acc + v * v).sqrt();
        Self { val, modulo }
    }

    /// Creates a vector with every component set to `v`.
    #[inline]
    pub fn splat(v: f32) -> Self {
        Self::from_array([v; N])
    }

    /// Creates a vector by flattening `parts` in order.
    ///
    /// A single scalar fills every component. Otherwise the flattened parts
    /// must yield exactly `N` components.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glmat::{Part, Vector3};
    ///
    /// assert_eq!(Vector3::from_parts(&[2.0f32.into()]).unwrap(), Vector3::splat(2.0));
    /// assert!(Vector3::from_parts(&[1.0f32.into(), 2.0f32.into()]).is_err());
    /// ```
    pub fn from_parts(parts: &[Part<'_>]) -> Result<Self> {
        let values = flatten(Self::KIND, parts)?;
        match values.as_slice() {
            [v] => Ok(Self::splat(*v)),
            values => Self::from_slice(values),
        }
    }

    /// Copies the components out.
    #[inline]
    pub const fn to_array(&self) -> [f32; N] {
        self.val
    }

    /// Components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.val
    }

    /// Euclidean norm, computed once at construction.
    #[inline]
    pub fn modulo(&self) -> f32 {
        self.modulo
    }

    /// Returns the unit vector in the same direction.
    ///
    /// A vector whose modulo is exactly 0 or 1 comes back unchanged.
    pub fn normalized(&self) -> Self {
        let m = self.modulo;
        if m == 0.0 || m == 1.0 {
            return *self;
        }
        self.map_components(|_, v| v / m)
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.val
            .iter()
            .zip(&other.val)
            .fold(0.0, |acc, (a, b)| acc + a * b)
    }

    /// Returns component `i`.
    pub fn component(&self, i: usize) -> Result<f32> {
        self.val
            .get(i)
            .copied()
            .ok_or_else(|| Error::out_of_range(Self::KIND, i, N))
    }

    /// Returns a copy with component `i` replaced by `v`.
    pub fn with_component(&self, i: usize, v: f32) -> Result<Self> {
        if i >= N {
            return Err(Error::out_of_range(Self::KIND, i, N));
        }
        let mut val = self.val;
        val[i] = v;
        Ok(Self::from_array(val))
    }

    pub(crate) const fn from_raw(val: [f32; N], modulo: f32) -> Self {
        Self { val, modulo }
    }
}

macro_rules! accessors {
    ($($index:literal => $($name:ident),+);+ $(;)?) => {
        $($(
            #[doc = concat!("Component ", stringify!($index), ".")]
            #[inline]
            pub const fn $name(&self) -> f32 {
                self.val[$index]
            }
        )+)+
    };
}

impl Vector<2> {
    /// Unit X (1, 0).
    pub const UNIT_X: Self = Self::from_raw([1.0, 0.0], 1.0);
    /// Unit Y (0, 1).
    pub const UNIT_Y: Self = Self::from_raw([0.0, 1.0], 1.0);

    /// Creates a 2-component vector.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self::from_array([x, y])
    }

    accessors! {
        0 => x, r, s;
        1 => y, g, t;
    }
}

impl Vector<3> {
    /// Unit X (1, 0, 0).
    pub const UNIT_X: Self = Self::from_raw([1.0, 0.0, 0.0], 1.0);
    /// Unit Y (0, 1, 0), the default up vector.
    pub const UNIT_Y: Self = Self::from_raw([0.0, 1.0, 0.0], 1.0);
    /// Unit Z (0, 0, 1).
    pub const UNIT_Z: Self = Self::from_raw([0.0, 0.0, 1.0], 1.0);

    /// Creates a 3-component vector.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::from_array([x, y, z])
    }

    /// Cross product `self x other`.
    ///
    /// ```text
    /// (y1*z2 - z1*y2, z1*x2 - x1*z2, x1*y2 - y1*x2)
    /// ```
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        let [x1, y1, z1] = self.val;
        let [x2, y2, z2] = other.val;
        Self::new(y1 * z2 - z1 * y2, z1 * x2 - x1 * z2, x1 * y2 - y1 * x2)
    }

    /// Appends a fourth component: `w = 1` for points, `w = 0` for directions.
    #[inline]
    pub fn extend(&self, w: f32) -> Vector4 {
        let [x, y, z] = self.val;
        Vector4::new(x, y, z, w)
    }

    accessors! {
        0 => x, r, s;
        1 => y, g, t;
        2 => z, b, p;
    }
}

impl Vector<4> {
    /// Creates a 4-component vector.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::from_array([x, y, z, w])
    }

    /// Drops the fourth component.
    #[inline]
    pub fn truncate(&self) -> Vector3 {
        let [x, y, z, _] = self.val;
        Vector3::new(x, y, z)
    }

    accessors! {
        0 => x, r, s;
        1 => y, g, t;
        2 => z, b, p;
        3 => w, a, q;
    }
}

impl<const N: usize> Components for Vector<N> {
    #[inline]
    fn val(&self) -> &[f32] {
        &self.val
    }

    #[inline]
    fn kind(&self) -> Kind {
        Kind::Vector(N)
    }
}

impl<const N: usize> NumericContainer for Vector<N> {
    const KIND: Kind = Kind::Vector(N);

    fn from_slice(values: &[f32]) -> Result<Self> {
        <[f32; N]>::try_from(values)
            .map(Self::from_array)
            .map_err(|_| Error::component_count(Self::KIND, N, values.len()))
    }

    fn map_components<F: FnMut(usize, f32) -> f32>(&self, mut f: F) -> Self {
        Self::from_array(std::array::from_fn(|i| f(i, self.val[i])))
    }
}

// Equality ignores the cached modulo; it is a function of the components.
impl<const N: usize> PartialEq for Vector<N> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(val: [f32; N]) -> Self {
        Self::from_array(val)
    }
}

impl<const N: usize> From<Vector<N>> for [f32; N] {
    fn from(v: Vector<N>) -> Self {
        v.val
    }
}

impl<'a, const N: usize> From<&'a Vector<N>> for Part<'a> {
    fn from(v: &'a Vector<N>) -> Self {
        Part::Container(v)
    }
}

impl<const N: usize> ops::Index<usize> for Vector<N> {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.val[i]
    }
}

impl<const N: usize> ops::Add for Vector<N> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        NumericContainer::add(&self, &rhs)
    }
}

impl<const N: usize> ops::Sub for Vector<N> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        NumericContainer::sub(&self, &rhs)
    }
}

impl<const N: usize> ops::Mul<f32> for Vector<N> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

// Vector * Vector is the dot product.
impl<const N: usize> ops::Mul for Vector<N> {
    type Output = f32;

    #[inline]
    fn mul(self, rhs: Self) -> f32 {
        self.dot(&rhs)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_vector(f, &self.val)
    }
}

impl_approx_eq!([const N: usize] Vector<N>);
impl_serde!([const N: usize] Vector<N>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCategory;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_fills() {
        let v = Vector4::from_parts(&[Part::Scalar(0.5)]).unwrap();
        assert_eq!(v, Vector4::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_wrong_component_count() {
        let err = Vector3::from_parts(&[Part::Scalar(1.0), Part::Scalar(2.0)]).unwrap_err();
        assert!(matches!(err, Error::TooFewComponents { expected: 3, got: 2, .. }));

        let err = Vector3::from_parts(&[Part::from(&[1.0f32, 2.0, 3.0, 4.0])]).unwrap_err();
        assert!(matches!(err, Error::TooManyComponents { expected: 3, got: 4, .. }));
        assert_eq!(err.category(), ErrorCategory::Construction);

        assert!(Vector2::from_parts(&[]).is_err());
    }

    #[test]
    fn test_modulo() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.modulo(), 5.0);
        assert_eq!(Vector3::ZERO.modulo(), 0.0);
    }

    #[test]
    fn test_normalized() {
        let v = Vector3::new(0.0, 3.0, 4.0).normalized();
        assert_relative_eq!(v, Vector3::new(0.0, 0.6, 0.8));
        assert_relative_eq!(v.modulo(), 1.0);

        // Zero and unit vectors pass through untouched.
        assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);
        assert_eq!(Vector3::UNIT_Y.normalized(), Vector3::UNIT_Y);
    }

    #[test]
    fn test_cross() {
        assert_eq!(Vector3::UNIT_X.cross(&Vector3::UNIT_Y), Vector3::UNIT_Z);
        assert_eq!(Vector3::UNIT_Y.cross(&Vector3::UNIT_X), Vector3::new(0.0, 0.0, -1.0));

        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a.cross(&b), Vector3::new(-3.0, 6.0, -3.0));
        // Operands untouched.
        assert_eq!(a, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_dot_operator() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a * Vector4::splat(1.0), 10.0);
    }

    #[test]
    fn test_accessor_aliases() {
        let v = Vector4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.x(), v.r(), v.s()), (1.0, 1.0, 1.0));
        assert_eq!((v.y(), v.g(), v.t()), (2.0, 2.0, 2.0));
        assert_eq!((v.z(), v.b(), v.p()), (3.0, 3.0, 3.0));
        assert_eq!((v.w(), v.a(), v.q()), (4.0, 4.0, 4.0));
    }

    #[test]
    fn test_component_access() {
        let v = Vector2::new(1.0, 2.0);
        assert_eq!(v.component(1).unwrap(), 2.0);
        assert_eq!(
            v.component(2).unwrap_err().category(),
            ErrorCategory::Range
        );

        let w = v.with_component(0, 3.0).unwrap();
        assert_eq!(w, Vector2::new(3.0, 2.0));
        assert_eq!(w.modulo(), 13.0f32.sqrt());
        assert!(v.with_component(5, 0.0).is_err());
    }

    #[test]
    fn test_extend_truncate() {
        let p = Vector3::new(1.0, 2.0, 3.0).extend(1.0);
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(p.truncate(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_display() {
        let v = Vector3::new(1.0, -0.5, 1234.0);
        assert_eq!(v.to_string(), "[ 1.00, -0.500, 1.23e+3 ]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_flat_sequence() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0]");
        let back: Vector3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert!(serde_json::from_str::<Vector3>("[1.0,2.0]").is_err());
    }
}
