//! Shared behaviour of every fixed-length numeric value.
//!
//! Vectors, matrices and quaternions are all flat sequences of `f32`
//! components with a length fixed by their type (`N` for vectors, `N * N`
//! for matrices, 4 for quaternions). This module provides:
//!
//! - [`Kind`] - the runtime name of a value type, used in error messages
//! - [`Components`] - read-only access to the flat component slice
//! - [`NumericContainer`] - component-wise `add`/`sub`/`prod`/`scale`
//! - [`Part`] - one argument of a flattening constructor
//!
//! # Flattening constructors
//!
//! `from_parts` accepts a mix of scalars, `f32` slices and vector-shaped
//! values, concatenated in order:
//!
//! ```rust
//! use glmat::{Part, Vector2, Vector4};
//!
//! let xy = Vector2::new(1.0, 2.0);
//! let v = Vector4::from_parts(&[Part::from(&xy), 3.0f32.into(), (&[4.0f32][..]).into()]).unwrap();
//! assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0]);
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// Runtime name of a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A bare `f32`.
    Scalar,
    /// `Vector<N>`.
    Vector(usize),
    /// `Matrix<N>` (N x N).
    Matrix(usize),
    /// [`crate::Quaternion`].
    Quaternion,
}

impl Kind {
    /// Number of components a value of this kind holds.
    pub const fn len(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector(n) => n,
            Self::Matrix(n) => n * n,
            Self::Quaternion => 4,
        }
    }

    /// Returns true for vectors and quaternions, the kinds a flattening
    /// constructor accepts as a part.
    pub const fn is_vector_like(self) -> bool {
        matches!(self, Self::Vector(_) | Self::Quaternion)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Vector(n) => write!(f, "Vector{n}"),
            Self::Matrix(n) => write!(f, "Matrix{n}"),
            Self::Quaternion => f.write_str("Quaternion"),
        }
    }
}

/// Read-only view of a value's components.
///
/// The slice is the exact layout handed to the graphics API: length `N`
/// for vectors, `N * N` in column-major order for matrices.
pub trait Components {
    /// Flat component slice.
    fn val(&self) -> &[f32];

    /// Runtime kind of this value.
    fn kind(&self) -> Kind;

    /// Components reinterpreted as native-endian bytes for uniform upload.
    fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.val())
    }
}

/// Component-wise arithmetic shared by all value types.
///
/// Every operation returns a new value. Operands are the same concrete
/// type by construction; mixing types goes through [`crate::Value`].
pub trait NumericContainer: Components + Copy + Sized {
    /// Kind of every value of this type.
    const KIND: Kind;

    /// Builds a value from exactly `KIND.len()` components.
    fn from_slice(values: &[f32]) -> Result<Self>;

    /// Builds a new value by mapping each `(flat index, component)` pair.
    fn map_components<F: FnMut(usize, f32) -> f32>(&self, f: F) -> Self;

    /// Component-wise sum.
    fn add(&self, other: &Self) -> Self {
        let rhs = other.val();
        self.map_components(|i, v| v + rhs[i])
    }

    /// Component-wise difference.
    fn sub(&self, other: &Self) -> Self {
        let rhs = other.val();
        self.map_components(|i, v| v - rhs[i])
    }

    /// Component-wise (Hadamard) product.
    fn prod(&self, other: &Self) -> Self {
        let rhs = other.val();
        self.map_components(|i, v| v * rhs[i])
    }

    /// Uniform scale by a scalar.
    fn scale(&self, factor: f32) -> Self {
        self.map_components(|_, v| v * factor)
    }
}

/// One argument of a flattening constructor.
#[derive(Clone, Copy)]
pub enum Part<'a> {
    /// A single component.
    Scalar(f32),
    /// A run of components.
    Array(&'a [f32]),
    /// Another value, flattened in storage order.
    Container(&'a dyn Components),
}

impl fmt::Debug for Part<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Self::Array(a) => f.debug_tuple("Array").field(a).finish(),
            Self::Container(c) => f
                .debug_tuple("Container")
                .field(&c.kind())
                .field(&c.val())
                .finish(),
        }
    }
}

impl From<f32> for Part<'_> {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl<'a> From<&'a [f32]> for Part<'a> {
    fn from(a: &'a [f32]) -> Self {
        Self::Array(a)
    }
}

impl<'a, const N: usize> From<&'a [f32; N]> for Part<'a> {
    fn from(a: &'a [f32; N]) -> Self {
        Self::Array(a)
    }
}

impl<'a> From<&'a Vec<f32>> for Part<'a> {
    fn from(a: &'a Vec<f32>) -> Self {
        Self::Array(a)
    }
}

/// Concatenates `parts` into one component list for `target`.
///
/// Matrices are rejected: they only enter other matrices through the named
/// dimension conversions.
pub(crate) fn flatten(target: Kind, parts: &[Part<'_>]) -> Result<Vec<f32>> {
    let mut out = Vec::with_capacity(target.len());
    for part in parts {
        match *part {
            Part::Scalar(v) => out.push(v),
            Part::Array(a) => out.extend_from_slice(a),
            Part::Container(c) => {
                let element = c.kind();
                if !element.is_vector_like() {
                    return Err(Error::InvalidElement { target, element });
                }
                out.extend_from_slice(c.val());
            }
        }
    }
    Ok(out)
}

/// Implements the `approx` comparison traits component-wise over
/// [`Components::val`].
macro_rules! impl_approx_eq {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> approx::AbsDiffEq for $ty {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                $crate::DEFAULT_EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                use $crate::container::Components;
                self.val()
                    .iter()
                    .zip(other.val())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl<$($generics)*> approx::RelativeEq for $ty {
            fn default_max_relative() -> f32 {
                <f32 as approx::RelativeEq>::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                use $crate::container::Components;
                self.val()
                    .iter()
                    .zip(other.val())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }

        impl<$($generics)*> approx::UlpsEq for $ty {
            fn default_max_ulps() -> u32 {
                <f32 as approx::UlpsEq>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
                use $crate::container::Components;
                self.val()
                    .iter()
                    .zip(other.val())
                    .all(|(a, b)| approx::UlpsEq::ulps_eq(a, b, epsilon, max_ulps))
            }
        }
    };
}

/// Serializes as the flat component sequence; deserializing re-runs the
/// component-count check of [`NumericContainer::from_slice`].
#[cfg(feature = "serde")]
macro_rules! impl_serde {
    ([$($generics:tt)*] $ty:ty $(where $($bound:tt)+)?) => {
        impl<$($generics)*> serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                use $crate::container::Components;
                serializer.collect_seq(self.val())
            }
        }

        impl<'de, $($generics)*> serde::Deserialize<'de> for $ty
        $(where $($bound)+)?
        {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                use $crate::container::NumericContainer;
                let values = <Vec<f32> as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_slice(&values).map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(not(feature = "serde"))]
macro_rules! impl_serde {
    ([$($generics:tt)*] $ty:ty $(where $($bound:tt)+)?) => {};
}

pub(crate) use impl_approx_eq;
pub(crate) use impl_serde;
