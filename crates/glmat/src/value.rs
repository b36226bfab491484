//! Runtime-tagged operands.
//!
//! The typed API (`Matrix4 * Vector4`, ...) rejects illegal combinations at
//! compile time. [`Value`] is for callers that only know shapes at run
//! time, such as a uniform table keyed by name. It applies the same rules
//! and reports anything else as [`Error::TypeMismatch`]:
//!
//! | op            | operands                         | result      |
//! |---------------|----------------------------------|-------------|
//! | `add`, `sub`  | same kind                        | same kind   |
//! | `prod`        | same kind                        | same kind   |
//! | `prod`        | container, scalar                | container   |
//! | `mul`         | `MatrixN`, `MatrixN`             | `MatrixN`   |
//! | `mul`         | `MatrixN`, `VectorN`             | `VectorN`   |
//! | `mul`         | `VectorN`, `MatrixN`             | `VectorN`   |
//! | `mul`         | `VectorN`, `VectorN`             | scalar      |
//! | `mul`         | `Quaternion`, `Quaternion`       | `Quaternion`|
//!
//! # Example
//!
//! ```rust
//! use glmat::{ErrorCategory, Matrix4, Value, Vector3, Vector4};
//!
//! let m = Value::from(Matrix4::translation(1.0, 2.0, 3.0));
//! let p = Value::from(Vector4::new(0.0, 0.0, 0.0, 1.0));
//! assert_eq!(m.mul(&p).unwrap(), Value::from(Vector4::new(1.0, 2.0, 3.0, 1.0)));
//!
//! let err = m.mul(&Value::from(Vector3::ZERO)).unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::TypeMismatch);
//! ```

use tracing::trace;

use crate::container::{Components, Kind, NumericContainer};
use crate::error::{Error, Result};
use crate::{Matrix2, Matrix3, Matrix4, Quaternion, Vector2, Vector3, Vector4};

/// A scalar or any value type of this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Bare scalar.
    Scalar(f32),
    /// 2-component vector.
    Vector2(Vector2),
    /// 3-component vector.
    Vector3(Vector3),
    /// 4-component vector.
    Vector4(Vector4),
    /// 2x2 matrix.
    Matrix2(Matrix2),
    /// 3x3 matrix.
    Matrix3(Matrix3),
    /// 4x4 matrix.
    Matrix4(Matrix4),
    /// Quaternion.
    Quaternion(Quaternion),
}

fn mismatch(op: &'static str, lhs: &Value, rhs: &Value) -> Error {
    let (lhs, rhs) = (lhs.kind(), rhs.kind());
    trace!(op, %lhs, %rhs, "operand type mismatch");
    Error::type_mismatch(op, lhs, rhs)
}

/// Applies `$body` to two operands of the same container kind.
macro_rules! same_kind {
    ($op:literal, $lhs:expr, $rhs:expr, |$a:ident, $b:ident| $body:expr) => {
        match ($lhs, $rhs) {
            (Value::Vector2($a), Value::Vector2($b)) => Ok(Value::Vector2($body)),
            (Value::Vector3($a), Value::Vector3($b)) => Ok(Value::Vector3($body)),
            (Value::Vector4($a), Value::Vector4($b)) => Ok(Value::Vector4($body)),
            (Value::Matrix2($a), Value::Matrix2($b)) => Ok(Value::Matrix2($body)),
            (Value::Matrix3($a), Value::Matrix3($b)) => Ok(Value::Matrix3($body)),
            (Value::Matrix4($a), Value::Matrix4($b)) => Ok(Value::Matrix4($body)),
            (Value::Quaternion($a), Value::Quaternion($b)) => Ok(Value::Quaternion($body)),
            (lhs, rhs) => Err(mismatch($op, lhs, rhs)),
        }
    };
}

impl Value {
    /// Runtime kind of the operand.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(_) => Kind::Scalar,
            Self::Vector2(v) => v.kind(),
            Self::Vector3(v) => v.kind(),
            Self::Vector4(v) => v.kind(),
            Self::Matrix2(m) => m.kind(),
            Self::Matrix3(m) => m.kind(),
            Self::Matrix4(m) => m.kind(),
            Self::Quaternion(q) => q.kind(),
        }
    }

    /// Flat components: one element for a scalar, column-major for
    /// matrices.
    pub fn as_slice(&self) -> &[f32] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::Vector2(v) => v.val(),
            Self::Vector3(v) => v.val(),
            Self::Vector4(v) => v.val(),
            Self::Matrix2(m) => m.val(),
            Self::Matrix3(m) => m.val(),
            Self::Matrix4(m) => m.val(),
            Self::Quaternion(q) => q.val(),
        }
    }

    /// Component-wise sum of two values of the same kind.
    pub fn add(&self, rhs: &Value) -> Result<Value> {
        same_kind!("add", self, rhs, |a, b| NumericContainer::add(a, b))
    }

    /// Component-wise difference of two values of the same kind.
    pub fn sub(&self, rhs: &Value) -> Result<Value> {
        same_kind!("subtract", self, rhs, |a, b| NumericContainer::sub(a, b))
    }

    /// Uniform scale when `rhs` is a scalar, component-wise product when it
    /// has the same kind as `self`.
    pub fn prod(&self, rhs: &Value) -> Result<Value> {
        if let Value::Scalar(s) = *rhs {
            return match *self {
                Value::Scalar(_) => Err(mismatch("product", self, rhs)),
                Value::Vector2(v) => Ok(Value::Vector2(NumericContainer::scale(&v, s))),
                Value::Vector3(v) => Ok(Value::Vector3(NumericContainer::scale(&v, s))),
                Value::Vector4(v) => Ok(Value::Vector4(NumericContainer::scale(&v, s))),
                Value::Matrix2(m) => Ok(Value::Matrix2(NumericContainer::scale(&m, s))),
                Value::Matrix3(m) => Ok(Value::Matrix3(NumericContainer::scale(&m, s))),
                Value::Matrix4(m) => Ok(Value::Matrix4(NumericContainer::scale(&m, s))),
                Value::Quaternion(q) => Ok(Value::Quaternion(NumericContainer::scale(&q, s))),
            };
        }
        same_kind!("product", self, rhs, |a, b| a.prod(b))
    }

    /// Shape-dispatched multiplication; see the module table.
    pub fn mul(&self, rhs: &Value) -> Result<Value> {
        let product = match (self, rhs) {
            (Value::Matrix2(a), Value::Matrix2(b)) => Value::Matrix2(a.mul_matrix(b)),
            (Value::Matrix3(a), Value::Matrix3(b)) => Value::Matrix3(a.mul_matrix(b)),
            (Value::Matrix4(a), Value::Matrix4(b)) => Value::Matrix4(a.mul_matrix(b)),
            (Value::Matrix2(m), Value::Vector2(v)) => Value::Vector2(m.mul_vector(v)),
            (Value::Matrix3(m), Value::Vector3(v)) => Value::Vector3(m.mul_vector(v)),
            (Value::Matrix4(m), Value::Vector4(v)) => Value::Vector4(m.mul_vector(v)),
            (Value::Vector2(v), Value::Matrix2(m)) => Value::Vector2(v.mul_matrix(m)),
            (Value::Vector3(v), Value::Matrix3(m)) => Value::Vector3(v.mul_matrix(m)),
            (Value::Vector4(v), Value::Matrix4(m)) => Value::Vector4(v.mul_matrix(m)),
            (Value::Vector2(a), Value::Vector2(b)) => Value::Scalar(a.dot(b)),
            (Value::Vector3(a), Value::Vector3(b)) => Value::Scalar(a.dot(b)),
            (Value::Vector4(a), Value::Vector4(b)) => Value::Scalar(a.dot(b)),
            (Value::Quaternion(a), Value::Quaternion(b)) => Value::Quaternion(a.mul_quaternion(b)),
            (lhs, rhs) => return Err(mismatch("multiply", lhs, rhs)),
        };
        Ok(product)
    }
}

macro_rules! impl_value_conversions {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Value {
                fn from(v: $variant) -> Self {
                    Value::$variant(v)
                }
            }

            impl TryFrom<Value> for $variant {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::type_mismatch(
                            "convert",
                            other.kind(),
                            <$variant as NumericContainer>::KIND,
                        )),
                    }
                }
            }
        )+
    };
}

impl_value_conversions!(Vector2, Vector3, Vector4, Matrix2, Matrix3, Matrix4, Quaternion);

impl From<f32> for Value {
    fn from(s: f32) -> Self {
        Value::Scalar(s)
    }
}

impl TryFrom<Value> for f32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Scalar(s) => Ok(s),
            other => Err(Error::type_mismatch("convert", other.kind(), Kind::Scalar)),
        }
    }
}
