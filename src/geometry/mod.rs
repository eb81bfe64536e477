mod ray_triangle_intersection;
pub mod transform;

pub use ray_triangle_intersection::{TriangleHit, intersect_ray_triangle};
pub use transform::Transform;

pub type FloatType = f64;

/// Smallest parametric distance accepted as a hit. Keeps root finding from
/// reporting the surface a ray starts on.
pub const EPSILON: FloatType = 1e-6;

/// Default bias added when spawning secondary rays from a hit point.
pub const SELF_INTERSECTION_EPSILON: FloatType = 1e-3;

pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;
pub type TexturePoint = nalgebra::Point2<FloatType>;
pub type TextureVector = nalgebra::Vector2<FloatType>;
pub type Matrix3 = nalgebra::Matrix3<FloatType>;
pub type Matrix4 = nalgebra::Matrix4<FloatType>;
pub type Orientation = nalgebra::UnitQuaternion<FloatType>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized for rays built with `new`, arbitrary length for instanced
    /// rays built with `raw`.
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Builds a ray without normalizing the direction.
    ///
    /// An object-local instanced ray must keep the transformed direction
    /// length, otherwise its parameterization would no longer match the
    /// world-space ray it came from.
    pub fn raw(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray { origin, direction }
    }

    pub fn point_at(&self, distance: FloatType) -> WorldPoint {
        self.origin + self.direction * distance
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use proptest::prelude::*;

    /// Helper macro that creates a wrapper arnound a type that implemetns Deref and Arbitary
    macro_rules! arbitrary_wrapper {
        ( $wrapper_name:ident ( $type:ty ) -> $block:block ) => {
            #[derive(Copy, Clone, Debug)]
            pub struct $wrapper_name(pub $type);

            impl std::ops::Deref for $wrapper_name {
                type Target = $type;
                fn deref(&self) -> &$type {
                    &self.0
                }
            }

            impl Arbitrary for $wrapper_name {
                type Parameters = ();
                type Strategy = proptest::strategy::BoxedStrategy<Self>;
                fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
                    $block.prop_map(|x| $wrapper_name(x)).boxed()
                }
            }
        };
    }

    fn scene_float() -> BoxedStrategy<FloatType> {
        (-100.0..100.0f64).boxed()
    }

    arbitrary_wrapper! {
        WorldPointWrapper(WorldPoint) -> {
            (scene_float(), scene_float(), scene_float())
                .prop_map(|coords| WorldPoint::new(coords.0, coords.1, coords.2))
        }
    }

    arbitrary_wrapper! {
        NonzeroWorldVectorWrapper(WorldVector) -> {
            (scene_float(), scene_float(), scene_float())
                .prop_filter_map(
                    "vector is zero",
                    |coords| {
                        let vector = WorldVector::new(coords.0, coords.1, coords.2);
                        if vector.norm() < 1e-3 {
                            None
                        } else {
                            Some(vector)
                        }
                    })
        }
    }

    arbitrary_wrapper! {
        OrientationWrapper(Orientation) -> {
            use std::f64::consts::PI;
            (-PI..PI, -PI..PI, -PI..PI)
                .prop_map(|angles| Orientation::from_euler_angles(angles.0, angles.1, angles.2))
        }
    }

    arbitrary_wrapper! {
        NondegenerateScaleWrapper(WorldVector) -> {
            const RANGE: std::ops::Range<f64> = 0.25..4.0f64;
            (RANGE, RANGE, RANGE)
                .prop_map(|coords| WorldVector::new(coords.0, coords.1, coords.2))
        }
    }

    arbitrary_wrapper! {
        TransformWrapper(Transform) -> {
            (
                any::<WorldPointWrapper>(),
                any::<OrientationWrapper>(),
                any::<NondegenerateScaleWrapper>(),
            )
                .prop_map(|(position, orientation, scale)| {
                    Transform::new(position.coords, orientation.0, scale.0)
                })
        }
    }

    arbitrary_wrapper! {
        UnitSphereVectorWrapper(WorldVector) -> {
            use std::f64::consts::PI;
            (-PI..PI, -1.0..1.0f64)
                .prop_map(|(phi, z)| {
                    let r = (1.0 - z * z).max(0.0).sqrt();
                    WorldVector::new(r * phi.cos(), r * phi.sin(), z)
                })
        }
    }

    #[test]
    fn ray_new_normalizes_direction() {
        let ray = Ray::new([1.0, 2.0, 3.0].into(), [0.0, 0.0, 10.0].into());
        assert!((ray.direction.norm() - 1.0).abs() < 1e-12);
        let p = ray.point_at(2.0);
        assert!((p - WorldPoint::new(1.0, 2.0, 5.0)).norm() < 1e-12);
    }

    #[test]
    fn ray_raw_keeps_direction_length() {
        let ray = Ray::raw([0.0, 0.0, 0.0].into(), [0.0, 0.0, 10.0].into());
        assert!((ray.direction.norm() - 10.0).abs() < 1e-12);
    }
}
