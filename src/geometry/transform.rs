use nalgebra::{Translation3, Unit};

use crate::geometry::{Matrix3, Matrix4, Orientation, Ray, WorldPoint, WorldVector};

/// Placement of an object in the world.
///
/// The forward transformation is always applied in the order scale, then
/// rotate, then translate. The inverse and normal matrices are cached so that
/// every intersection query does not pay for a matrix inversion; after
/// mutating `position`, `orientation` or `scale` the owner must call
/// [`Transform::recompute`] before issuing the next intersection query.
///
/// All scale components must be non-zero, a degenerate scale makes the
/// cached matrices meaningless and is not checked for.
#[derive(Copy, Clone, Debug)]
pub struct Transform {
    pub position: WorldVector,
    pub orientation: Orientation,
    pub scale: WorldVector,

    matrix: Matrix4,
    inv_matrix: Matrix4,
    normal_matrix: Matrix3,
}

impl Transform {
    pub fn new(position: WorldVector, orientation: Orientation, scale: WorldVector) -> Transform {
        let mut transform = Transform {
            position,
            orientation,
            scale,
            matrix: Matrix4::identity(),
            inv_matrix: Matrix4::identity(),
            normal_matrix: Matrix3::identity(),
        };
        transform.recompute();
        transform
    }

    pub fn identity() -> Transform {
        Transform::new(
            WorldVector::zeros(),
            Orientation::identity(),
            WorldVector::new(1.0, 1.0, 1.0),
        )
    }

    /// Rebuilds the cached matrices from `position`, `orientation` and
    /// `scale`.
    pub fn recompute(&mut self) {
        let rotation = self.orientation.to_rotation_matrix();
        let inv_scale = self.scale.map(|s| 1.0 / s);

        self.matrix = Translation3::from(self.position).to_homogeneous()
            * rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale);
        // Built directly as S^-1 * R^T * T(-position) instead of a generic
        // 4x4 inversion.
        self.inv_matrix = Matrix4::new_nonuniform_scaling(&inv_scale)
            * rotation.inverse().to_homogeneous()
            * Translation3::from(-self.position).to_homogeneous();
        // Inverse transpose of the upper 3x3 block: (R * S)^-T = R * S^-1
        self.normal_matrix = rotation.matrix() * Matrix3::from_diagonal(&inv_scale);
    }

    /// Forward object-local to world matrix.
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    pub fn inv_matrix(&self) -> &Matrix4 {
        &self.inv_matrix
    }

    pub fn normal_matrix(&self) -> &Matrix3 {
        &self.normal_matrix
    }

    /// Moves a world-space ray into object-local space.
    ///
    /// The direction is intentionally not renormalized, so distances measured
    /// along the local ray stay valid for the original world-space ray even
    /// under non-uniform scale.
    pub fn to_local_ray(&self, ray: &Ray) -> Ray {
        Ray::raw(
            self.inv_matrix.transform_point(&ray.origin),
            self.inv_matrix.transform_vector(&ray.direction),
        )
    }

    pub fn to_world_point(&self, point: &WorldPoint) -> WorldPoint {
        self.matrix.transform_point(point)
    }

    /// Moves an object-local surface normal into world space.
    pub fn to_world_normal(&self, normal: &WorldVector) -> Unit<WorldVector> {
        Unit::new_normalize(self.normal_matrix * normal)
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::identity()
    }
}
