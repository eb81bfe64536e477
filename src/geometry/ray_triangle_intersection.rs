use std::ops::{Add, Mul};

use crate::geometry::{FloatType, Ray, WorldPoint};

/// Distance along the ray and barycentric coordinates of a ray/triangle
/// intersection. `u` and `v` weight the second and third vertex.
#[derive(Copy, Clone, Debug)]
pub struct TriangleHit {
    pub t: FloatType,
    pub u: FloatType,
    pub v: FloatType,
}

impl TriangleHit {
    /// Barycentric interpolation of per-vertex values.
    pub fn interpolate<T>(&self, a: T, b: T, c: T) -> T
    where
        T: Mul<FloatType, Output = T> + Add<Output = T>,
    {
        let w = 1.0 - self.u - self.v;
        a * w + b * self.u + c * self.v
    }
}

/// Calculates ray intersection with the (two sided) triangle.
/// Returns the distance along the ray and barycentric uv coordinates,
/// the caller is responsible for range-checking the distance.
/// Adapted from https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm#Rust_implementation
pub fn intersect_ray_triangle(
    ray: &Ray,
    a: &WorldPoint,
    b: &WorldPoint,
    c: &WorldPoint,
) -> Option<TriangleHit> {
    let e1 = b - a;
    let e2 = c - a;

    let ray_cross_e2 = ray.direction.cross(&e2);
    let det = e1.dot(&ray_cross_e2);

    let inv_det = 1.0 / det; // May be infinite
    let s = ray.origin - a;
    let u = inv_det * s.dot(&ray_cross_e2);
    // Negated comparisons so that NaNs coming from a degenerate determinant
    // count as a miss.
    if !(u >= 0.0 && u <= 1.0) {
        return None;
    }

    let s_cross_e1 = s.cross(&e1);
    let v = inv_det * ray.direction.dot(&s_cross_e1);
    if !(v >= 0.0 && u + v <= 1.0) {
        return None;
    }

    let t = inv_det * e2.dot(&s_cross_e1);
    Some(TriangleHit { t, u, v })
}
