//! Conversions to and from [`glam`] types.
//!
//! Both crates store matrices column-major, so conversions copy the flat
//! arrays unchanged. Quaternions differ in component order: glmat is
//! `(w, x, y, z)`, glam is `(x, y, z, w)`.

use crate::{Matrix2, Matrix3, Matrix4, Quaternion, Vector2, Vector3, Vector4};

macro_rules! impl_glam {
    ($($ty:ident <=> $glam:ident via $from:ident / $to:ident $(by $r:tt)?),+ $(,)?) => {
        $(
            impl $ty {
                #[doc = concat!("Converts to [`glam::", stringify!($glam), "`].")]
                #[inline]
                pub fn to_glam(&self) -> glam::$glam {
                    glam::$glam::$from($($r)? self.$to())
                }

                #[doc = concat!("Creates from [`glam::", stringify!($glam), "`].")]
                #[inline]
                pub fn from_glam(v: glam::$glam) -> Self {
                    Self::$from(v.$to())
                }
            }

            impl From<glam::$glam> for $ty {
                #[inline]
                fn from(v: glam::$glam) -> Self {
                    Self::from_glam(v)
                }
            }

            impl From<$ty> for glam::$glam {
                #[inline]
                fn from(v: $ty) -> glam::$glam {
                    v.to_glam()
                }
            }
        )+
    };
}

impl_glam!(
    Vector2 <=> Vec2 via from_array / to_array,
    Vector3 <=> Vec3 via from_array / to_array,
    Vector4 <=> Vec4 via from_array / to_array,
    Matrix2 <=> Mat2 via from_cols_array / to_cols_array by &,
    Matrix3 <=> Mat3 via from_cols_array / to_cols_array by &,
    Matrix4 <=> Mat4 via from_cols_array / to_cols_array by &,
);

impl Quaternion {
    /// Converts to [`glam::Quat`], reordering to `(x, y, z, w)`.
    #[inline]
    pub fn to_glam(&self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x(), self.y(), self.z(), self.w())
    }

    /// Creates from [`glam::Quat`].
    #[inline]
    pub fn from_glam(q: glam::Quat) -> Self {
        let [x, y, z, w] = q.to_array();
        Self::new(w, x, y, z)
    }
}

impl From<glam::Quat> for Quaternion {
    #[inline]
    fn from(q: glam::Quat) -> Self {
        Self::from_glam(q)
    }
}

impl From<Quaternion> for glam::Quat {
    #[inline]
    fn from(q: Quaternion) -> glam::Quat {
        q.to_glam()
    }
}
