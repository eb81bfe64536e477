use nalgebra::Unit;

use crate::geometry::{
    FloatType, Ray, SELF_INTERSECTION_EPSILON, TexturePoint, WorldPoint, WorldVector,
};
use crate::util::{BLACK, Color3, WHITE};

/// Result of casting a single ray against a scene.
///
/// The record is filled in two phases: the coarse pass only writes `t`,
/// `index` and `instanced_ray` while scanning for the closest candidate, the
/// detail pass then fills `point` and `material` for the winner. Before the
/// detail pass has run, `point` and `material` hold defaults with no meaning.
#[derive(Clone, Debug)]
pub struct Intersection {
    /// Parametric distance to the closest hit found so far.
    pub t: FloatType,
    /// Bias used when spawning secondary rays from this hit.
    pub epsilon_t: FloatType,
    /// Index of the geometry that produced the closest hit, -1 when nothing
    /// was hit.
    pub index: i32,

    pub point: IntersectionPoint,
    pub material: MaterialProperties,

    /// The original world-space ray.
    pub ray: Ray,
    /// The winning geometry's object-local counterpart of `ray`, retained so
    /// the detail pass does not re-derive the transform.
    pub instanced_ray: Ray,
}

#[derive(Copy, Clone, Debug)]
pub struct IntersectionPoint {
    pub position: WorldPoint,
    pub normal: Unit<WorldVector>,
    pub tex_coord: TexturePoint,
}

#[derive(Copy, Clone, Debug)]
pub struct MaterialProperties {
    pub ambient: Color3,
    pub diffuse: Color3,
    pub specular: Color3,
    /// 0 is a special case meaning opaque, any other value means a
    /// transparent dielectric with the given index of refraction.
    pub refractive_index: FloatType,
    /// Texture color sampled at the hit's texture coordinate.
    pub texture: Color3,
}

impl Intersection {
    pub fn new(ray: Ray) -> Intersection {
        Intersection {
            t: FloatType::INFINITY,
            epsilon_t: SELF_INTERSECTION_EPSILON,
            index: -1,
            point: IntersectionPoint::default(),
            material: MaterialProperties::default(),
            ray,
            instanced_ray: ray,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.index >= 0
    }

    /// Spawns a secondary ray from the hit point, stepping `epsilon_t` along
    /// the new direction to avoid re-intersecting the originating surface.
    pub fn spawn_ray(&self, direction: WorldVector) -> Ray {
        let direction = direction.normalize();
        Ray::new(self.point.position + direction * self.epsilon_t, direction)
    }
}

impl Default for IntersectionPoint {
    fn default() -> IntersectionPoint {
        IntersectionPoint {
            position: WorldPoint::origin(),
            normal: Unit::new_unchecked(WorldVector::z()),
            tex_coord: TexturePoint::origin(),
        }
    }
}

impl Default for MaterialProperties {
    fn default() -> MaterialProperties {
        MaterialProperties {
            ambient: BLACK,
            diffuse: BLACK,
            specular: BLACK,
            refractive_index: 0.0,
            texture: WHITE,
        }
    }
}
