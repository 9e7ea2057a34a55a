// Affine transforms with an analytically tracked inverse.
//
// Every builder produces both the forward matrix and its exact inverse, and
// composition carries the inverse along, so nothing ever calls
// `DMat4::inverse()` on a possibly singular matrix.

use std::ops::Mul;

use glam::{DMat3, DMat4};
use thiserror::Error;

use crate::{Point3, Vec3};

/// Smallest scale factor magnitude accepted by [`Transform::scale`].
pub const MIN_SCALE: f64 = 1e-12;

/// Errors raised while building a transform.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("scale factor {0:?} has a component too close to zero")]
    DegenerateScale([f64; 3]),

    #[error("rotation axis must have non-zero length")]
    DegenerateAxis,
}

/// An affine transform together with its inverse.
///
/// `a * b` applied to a point first applies `b`, then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
    inverse: DMat4,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
    };

    /// Translate by `offset`. Inverse negates the offset.
    pub fn translate(offset: Vec3) -> Self {
        Self {
            matrix: DMat4::from_translation(offset),
            inverse: DMat4::from_translation(-offset),
        }
    }

    /// Non-uniform scale. Inverse takes the per-axis reciprocal.
    pub fn scale(factors: Vec3) -> Result<Self, TransformError> {
        if factors.abs().min_element() < MIN_SCALE {
            return Err(TransformError::DegenerateScale(factors.to_array()));
        }

        Ok(Self {
            matrix: DMat4::from_scale(factors),
            inverse: DMat4::from_scale(factors.recip()),
        })
    }

    /// Rotate by `radians` about `axis` (right-handed). Inverse is the transpose.
    pub fn rotate_axis_angle(axis: Vec3, radians: f64) -> Result<Self, TransformError> {
        let axis = axis.try_normalize().ok_or(TransformError::DegenerateAxis)?;
        let matrix = DMat4::from_axis_angle(axis, radians);

        Ok(Self {
            matrix,
            inverse: matrix.transpose(),
        })
    }

    /// Rotate about the X axis.
    pub fn rotate_x(radians: f64) -> Self {
        let matrix = DMat4::from_rotation_x(radians);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    /// Rotate about the Y axis.
    pub fn rotate_y(radians: f64) -> Self {
        let matrix = DMat4::from_rotation_y(radians);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    /// Rotate about the Z axis.
    pub fn rotate_z(radians: f64) -> Self {
        let matrix = DMat4::from_rotation_z(radians);
        Self {
            matrix,
            inverse: matrix.transpose(),
        }
    }

    /// The forward (object-to-world) matrix.
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// The inverse (world-to-object) matrix.
    pub fn inverse_matrix(&self) -> DMat4 {
        self.inverse
    }

    /// The inverse transform (forward and inverse swapped).
    pub fn inverse(&self) -> Transform {
        Transform {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    /// Matrix mapping object-space normals to world space: the transpose of
    /// the inverse's linear part.
    pub fn normal_matrix(&self) -> DMat3 {
        DMat3::from_mat4(self.inverse).transpose()
    }

    #[inline]
    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.matrix.transform_point3(p)
    }

    /// Transform a direction (w=0): translation does not apply.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.matrix.transform_vector3(v)
    }

    /// Transform a surface normal with the inverse-transpose. Not normalized.
    #[inline]
    pub fn transform_normal(&self, n: Vec3) -> Vec3 {
        self.normal_matrix() * n
    }

    #[inline]
    pub fn inverse_transform_point(&self, p: Point3) -> Point3 {
        self.inverse.transform_point3(p)
    }

    #[inline]
    pub fn inverse_transform_vector(&self, v: Vec3) -> Vec3 {
        self.inverse.transform_vector3(v)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
            inverse: rhs.inverse * self.inverse,
        }
    }
}
