use std::f64::consts::{PI, TAU};

use crate::geometry::{
    EPSILON, FloatType, Ray, TexturePoint, Transform, TriangleHit, WorldPoint, WorldVector,
    intersect_ray_triangle,
};
use crate::scene::{CoarseHit, Geometry, Intersection, MaterialProperties, SceneContext};

/// Sphere of the given radius, centered at the origin of its local space.
pub struct Sphere {
    pub transform: Transform,
    pub radius: FloatType,
    pub material: usize,
}

impl Geometry for Sphere {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn hit_test(&self, _ctx: &SceneContext<'_>, ray: &Ray) -> Option<CoarseHit> {
        let local_ray = self.transform.to_local_ray(ray);

        // The local direction is not normalized, so the full quadratic is
        // needed. Distances stay parameterized like the world-space ray.
        let oc = local_ray.origin.coords;
        let a = local_ray.direction.dot(&local_ray.direction);
        let b = oc.dot(&local_ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - a * c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / a;
        let t2 = (-b + sqrt_disc) / a;
        let t = if t1 > EPSILON {
            t1
        } else if t2 > EPSILON {
            t2
        } else {
            return None;
        };

        Some(CoarseHit { t, local_ray })
    }

    fn populate_hit(&self, ctx: &SceneContext<'_>, hit: &mut Intersection) {
        let local_point = hit.instanced_ray.point_at(hit.t);
        hit.point.position = self.transform.to_world_point(&local_point);
        hit.point.normal = self.transform.to_world_normal(&local_point.coords);
        hit.point.tex_coord = sphere_tex_coord(&local_point.coords);
        hit.material = ctx.materials[self.material].properties_at(&hit.point.tex_coord);
    }
}

/// Latitude/longitude parameterization of the sphere surface.
fn sphere_tex_coord(local_point: &WorldVector) -> TexturePoint {
    let n = local_point.normalize();
    let phi = n.y.atan2(n.x);
    let theta = n.z.clamp(-1.0, 1.0).acos();
    TexturePoint::new(0.5 + phi / TAU, theta / PI)
}

#[derive(Copy, Clone, Debug)]
pub struct TriangleVertex {
    pub position: WorldPoint,
    pub normal: WorldVector,
    pub tex_coord: TexturePoint,
    pub material: usize,
}

/// Single triangle with per-vertex shading data. Each vertex carries its own
/// material, the detail pass blends the three by barycentric weight.
pub struct Triangle {
    pub transform: Transform,
    pub vertices: [TriangleVertex; 3],
}

impl Triangle {
    fn local_hit(&self, local_ray: &Ray) -> Option<TriangleHit> {
        intersect_ray_triangle(
            local_ray,
            &self.vertices[0].position,
            &self.vertices[1].position,
            &self.vertices[2].position,
        )
        .filter(|tri_hit| tri_hit.t > EPSILON)
    }
}

impl Geometry for Triangle {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn hit_test(&self, _ctx: &SceneContext<'_>, ray: &Ray) -> Option<CoarseHit> {
        let local_ray = self.transform.to_local_ray(ray);
        let tri_hit = self.local_hit(&local_ray)?;
        Some(CoarseHit {
            t: tri_hit.t,
            local_ray,
        })
    }

    fn populate_hit(&self, ctx: &SceneContext<'_>, hit: &mut Intersection) {
        // Re-runs the cheap local test on the retained instanced ray to
        // recover the barycentric coordinates the coarse pass did not keep.
        let Some(tri_hit) = self.local_hit(&hit.instanced_ray) else {
            return;
        };
        let [a, b, c] = &self.vertices;

        let local_point = hit.instanced_ray.point_at(hit.t);
        hit.point.position = self.transform.to_world_point(&local_point);

        let local_normal = tri_hit.interpolate(a.normal, b.normal, c.normal);
        hit.point.normal = self.transform.to_world_normal(&local_normal);

        hit.point.tex_coord = TexturePoint::from(tri_hit.interpolate(
            a.tex_coord.coords,
            b.tex_coord.coords,
            c.tex_coord.coords,
        ));

        let properties = [a, b, c]
            .map(|vertex| ctx.materials[vertex.material].properties_at(&hit.point.tex_coord));
        hit.material = blend_properties(&tri_hit, properties);
    }
}

/// Barycentric blend of the three vertex materials, matching the blend the
/// shading side expects for per-vertex-material triangles. The refractive
/// index is blended numerically, opaque (zero) vertices pull the result
/// towards the opaque sentinel.
fn blend_properties(tri_hit: &TriangleHit, p: [MaterialProperties; 3]) -> MaterialProperties {
    MaterialProperties {
        ambient: tri_hit.interpolate(p[0].ambient, p[1].ambient, p[2].ambient),
        diffuse: tri_hit.interpolate(p[0].diffuse, p[1].diffuse, p[2].diffuse),
        specular: tri_hit.interpolate(p[0].specular, p[1].specular, p[2].specular),
        refractive_index: tri_hit.interpolate(
            p[0].refractive_index,
            p[1].refractive_index,
            p[2].refractive_index,
        ),
        texture: tri_hit.interpolate(p[0].texture, p[1].texture, p[2].texture),
    }
}

/// Instance of a scene-owned mesh with a single material.
///
/// Triangles are scanned linearly, spatial indexing is out of scope for this
/// crate.
pub struct Model {
    pub transform: Transform,
    pub mesh: usize,
    pub material: usize,
}

impl Model {
    fn closest_triangle<'a>(
        &self,
        ctx: &SceneContext<'a>,
        local_ray: &Ray,
    ) -> Option<([usize; 3], TriangleHit)> {
        let mesh = &ctx.meshes[self.mesh];
        let mut best: Option<([usize; 3], TriangleHit)> = None;
        for &triangle in mesh.triangles() {
            let [a, b, c] = mesh.triangle_vertices(triangle);
            let Some(tri_hit) =
                intersect_ray_triangle(local_ray, &a.position, &b.position, &c.position)
            else {
                continue;
            };
            if tri_hit.t > EPSILON && best.is_none_or(|(_, best_hit)| tri_hit.t < best_hit.t) {
                best = Some((triangle, tri_hit));
            }
        }
        best
    }
}

impl Geometry for Model {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn hit_test(&self, ctx: &SceneContext<'_>, ray: &Ray) -> Option<CoarseHit> {
        let local_ray = self.transform.to_local_ray(ray);
        let (_, tri_hit) = self.closest_triangle(ctx, &local_ray)?;
        Some(CoarseHit {
            t: tri_hit.t,
            local_ray,
        })
    }

    fn populate_hit(&self, ctx: &SceneContext<'_>, hit: &mut Intersection) {
        let Some((triangle, tri_hit)) = self.closest_triangle(ctx, &hit.instanced_ray) else {
            return;
        };
        let [a, b, c] = ctx.meshes[self.mesh].triangle_vertices(triangle);

        let local_point = hit.instanced_ray.point_at(hit.t);
        hit.point.position = self.transform.to_world_point(&local_point);

        let local_normal = tri_hit.interpolate(a.normal, b.normal, c.normal);
        hit.point.normal = self.transform.to_world_normal(&local_normal);

        hit.point.tex_coord = TexturePoint::from(tri_hit.interpolate(
            a.tex_coord.coords,
            b.tex_coord.coords,
            c.tex_coord.coords,
        ));

        hit.material = ctx.materials[self.material].properties_at(&hit.point.tex_coord);
    }
}
