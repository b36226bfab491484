//! # glmat
//!
//! Small immutable linear-algebra values for 2D/3D graphics.
//!
//! This crate provides the value types a renderer feeds to a shader:
//!
//! - [`Vector2`], [`Vector3`], [`Vector4`] - fixed-size `f32` vectors
//! - [`Matrix2`], [`Matrix3`], [`Matrix4`] - square matrices with
//!   transform builders (translation, rotation, projection, look-at)
//! - [`Quaternion`] - rotations in `(w, x, y, z)` order
//! - [`Value`] - runtime-tagged operand for shape-dispatched arithmetic
//!
//! # Design
//!
//! Every value is `Copy` and never mutated after construction; each
//! operation returns a new value. Vectors carry their length and matrices
//! their trace and determinant, computed once when the value is built.
//!
//! Matrices are stored **column-major** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector        (Matrix4 * Vector4)
//! row    = vector * matrix        (Vector4 * Matrix4, the row-vector product)
//! ```
//!
//! [`Components::val`] and [`Components::as_bytes`] expose the flat
//! component array in exactly the layout a graphics API expects.
//!
//! # Usage
//!
//! ```rust
//! use glmat::{Matrix4, Vector3, Vector4};
//! use std::f32::consts::FRAC_PI_2;
//!
//! let projection = Matrix4::perspective_fov(FRAC_PI_2, 16.0 / 9.0, 0.1, 100.0);
//! let view = Matrix4::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO)
//!     .inverse()
//!     .unwrap();
//! let model = Matrix4::translation(1.0, 0.0, 0.0);
//!
//! let mvp = projection * view * model;
//! let clip = mvp * Vector4::new(0.0, 0.0, 0.0, 1.0);
//! assert!(clip.w() > 0.0);
//! ```
//!
//! # Features
//!
//! - `serde` - serialize every value type as its flat component sequence
//!
//! # Dependencies
//!
//! - [`thiserror`] - error enum
//! - [`tracing`] - debug events for singular and degenerate inputs
//! - [`approx`] - tolerance comparisons for all value types
//! - [`bytemuck`] - zero-copy byte views for uniform upload
//! - [`glam`] - conversions to and from glam types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod container;
mod error;
mod format;
mod interop;
mod mat2;
mod mat3;
mod mat4;
mod matrix;
mod quat;
mod value;
mod vector;

pub use container::{Components, Kind, NumericContainer, Part};
pub use error::{Error, ErrorCategory, Result};
pub use format::{DISPLAY_DIGITS, to_precision};
pub use mat2::Matrix2;
pub use mat3::Matrix3;
pub use mat4::Matrix4;
pub use matrix::{ClosedForm, Cols, Dim, Matrix};
pub use quat::Quaternion;
pub use value::Value;
pub use vector::{Vector, Vector2, Vector3, Vector4};

/// Default absolute tolerance of the [`approx`] comparisons.
pub const DEFAULT_EPSILON: f32 = 1e-6;
