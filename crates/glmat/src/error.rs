//! Error types for glmat operations.
//!
//! Every fallible operation in this crate reports one of four failure
//! classes, exposed through [`ErrorCategory`]:
//!
//! - **Construction** - wrong component count, or a part that cannot be
//!   flattened into the requested type
//! - **Type mismatch** - an operator applied to operands of incompatible
//!   shape
//! - **Range** - a column or component index past the end
//! - **Singular matrix** - an inverse requested for a zero determinant
//!
//! Errors are raised at the call that detects them and never recovered
//! internally.
//!
//! # Usage
//!
//! ```rust
//! use glmat::{Error, ErrorCategory, Matrix2};
//!
//! let singular = Matrix2::from_cols_array([1.0, 2.0, 2.0, 4.0]);
//! let err = singular.inverse().unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::SingularMatrix);
//! assert!(err.to_string().contains("not invertible"));
//! ```

use thiserror::Error;

use crate::container::Kind;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by constructors, operators and inversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Flattened parts yield fewer components than the target holds.
    #[error("too few components to create {target}: expected {expected}, got {got}")]
    TooFewComponents {
        /// Type being constructed
        target: Kind,
        /// Component count of the target
        expected: usize,
        /// Component count supplied
        got: usize,
    },

    /// Flattened parts yield more components than the target holds.
    #[error("too many components to create {target}: expected {expected}, got {got}")]
    TooManyComponents {
        /// Type being constructed
        target: Kind,
        /// Component count of the target
        expected: usize,
        /// Component count supplied
        got: usize,
    },

    /// A constructor part of a kind that cannot be flattened.
    #[error("cannot create {target} with {element}")]
    InvalidElement {
        /// Type being constructed
        target: Kind,
        /// Kind of the rejected part
        element: Kind,
    },

    /// Operator invoked with operands of incompatible type or dimension.
    #[error("cannot {op} {lhs} with {rhs}")]
    TypeMismatch {
        /// Operation name ("add", "multiply", ...)
        op: &'static str,
        /// Left operand kind
        lhs: Kind,
        /// Right operand kind
        rhs: Kind,
    },

    /// Column or component index past the end.
    #[error("index {index} out of range for {target} (len {len})")]
    OutOfRange {
        /// Type being indexed
        target: Kind,
        /// Requested index
        index: usize,
        /// Number of valid indices
        len: usize,
    },

    /// Inverse requested for a matrix whose determinant is exactly zero.
    #[error("{target} is not invertible (determinant is zero)")]
    NotInvertible {
        /// Matrix type
        target: Kind,
    },
}

/// Coarse failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Wrong component count or invalid element kind in a constructor.
    Construction,
    /// Operator invoked with an incompatible operand.
    TypeMismatch,
    /// Out-of-bounds column or component index.
    Range,
    /// Inverse of a zero-determinant matrix.
    SingularMatrix,
}

impl Error {
    /// Returns the failure class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TooFewComponents { .. }
            | Self::TooManyComponents { .. }
            | Self::InvalidElement { .. } => ErrorCategory::Construction,
            Self::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            Self::OutOfRange { .. } => ErrorCategory::Range,
            Self::NotInvertible { .. } => ErrorCategory::SingularMatrix,
        }
    }

    /// Creates an [`Error::TypeMismatch`] error.
    #[inline]
    pub fn type_mismatch(op: &'static str, lhs: Kind, rhs: Kind) -> Self {
        Self::TypeMismatch { op, lhs, rhs }
    }

    /// Creates an [`Error::OutOfRange`] error.
    #[inline]
    pub fn out_of_range(target: Kind, index: usize, len: usize) -> Self {
        Self::OutOfRange { target, index, len }
    }

    /// Creates the construction error for a component count that fits
    /// neither the full length nor the single-scalar shorthand.
    pub(crate) fn component_count(target: Kind, expected: usize, got: usize) -> Self {
        if got < expected {
            Self::TooFewComponents { target, expected, got }
        } else {
            Self::TooManyComponents { target, expected, got }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = Error::component_count(Kind::Vector(3), 3, 2);
        assert!(matches!(err, Error::TooFewComponents { .. }));
        assert_eq!(err.category(), ErrorCategory::Construction);

        let err = Error::component_count(Kind::Vector(3), 3, 4);
        assert!(matches!(err, Error::TooManyComponents { .. }));

        let err = Error::type_mismatch("multiply", Kind::Matrix(3), Kind::Vector(4));
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);

        let err = Error::out_of_range(Kind::Matrix(2), 2, 2);
        assert_eq!(err.category(), ErrorCategory::Range);
    }

    #[test]
    fn test_messages_name_types() {
        let err = Error::InvalidElement {
            target: Kind::Vector(4),
            element: Kind::Matrix(3),
        };
        assert_eq!(err.to_string(), "cannot create Vector4 with Matrix3");

        let err = Error::type_mismatch("add", Kind::Vector(2), Kind::Scalar);
        assert_eq!(err.to_string(), "cannot add Vector2 with scalar");

        let err = Error::NotInvertible { target: Kind::Matrix(4) };
        assert!(err.to_string().contains("not invertible"));
    }
}
