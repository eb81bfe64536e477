use crate::geometry::Ray;
use crate::scene::{Intersection, Scene};

/// Casts a ray against every geometry in the scene and returns the completed
/// intersection record.
///
/// Runs the two-phase protocol: the coarse test against each candidate keeps
/// only the smallest hit distance, then the detail pass runs exactly once,
/// for the winner. When two geometries report the same distance the first
/// one in the scene's list wins. A ray that misses everything leaves the
/// record with `index == -1` and `t` infinite.
pub fn cast_ray(scene: &Scene, ray: Ray) -> Intersection {
    let ctx = scene.context();
    let mut hit = Intersection::new(ray);

    for (index, geometry) in scene.geometries().iter().enumerate() {
        if let Some(coarse) = geometry.hit_test(&ctx, &ray) {
            if coarse.t < hit.t {
                hit.t = coarse.t;
                hit.index = index as i32;
                hit.instanced_ray = coarse.local_ray;
            }
        }
    }

    if let Ok(index) = usize::try_from(hit.index) {
        scene.geometries()[index].populate_hit(&ctx, &mut hit);
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, Transform, WorldVector};
    use crate::scene::{Material, Sphere};
    use crate::util::Color3;

    fn sphere_on_z_axis(scene: &mut Scene, center_z: f64, radius: f64, material: usize) -> usize {
        scene.add_geometry(Box::new(Sphere {
            transform: Transform::new(
                WorldVector::new(0.0, 0.0, center_z),
                Orientation::identity(),
                WorldVector::new(1.0, 1.0, 1.0),
            ),
            radius,
            material,
        }))
    }

    #[test]
    fn closest_hit_wins() {
        let mut scene = Scene::new();
        scene.add_material(Material::default());
        // Candidate hit distances 5, 2 and 8
        sphere_on_z_axis(&mut scene, 5.5, 0.5, 0);
        sphere_on_z_axis(&mut scene, 2.5, 0.5, 0);
        sphere_on_z_axis(&mut scene, 8.5, 0.5, 0);
        scene.initialize();

        let ray = Ray::new([0.0, 0.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = cast_ray(&scene, ray);

        assert!(hit.is_hit());
        assert_eq!(hit.index, 1);
        assert!((hit.t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn miss_leaves_the_record_untouched() {
        let mut scene = Scene::new();
        scene.add_material(Material::default());
        sphere_on_z_axis(&mut scene, 5.5, 0.5, 0);
        scene.initialize();

        let ray = Ray::new([0.0, 0.0, 0.0].into(), [0.0, 0.0, -1.0].into());
        let hit = cast_ray(&scene, ray);

        assert!(!hit.is_hit());
        assert_eq!(hit.index, -1);
        assert!(hit.t.is_infinite());
    }

    #[test]
    fn empty_scene_reports_no_hit() {
        let scene = Scene::new();
        let ray = Ray::new([0.0, 0.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = cast_ray(&scene, ray);
        assert!(!hit.is_hit());
    }

    #[test]
    fn detail_pass_position_matches_the_coarse_distance() {
        let mut scene = Scene::new();
        scene.add_material(Material {
            diffuse: Color3::new(0.2, 0.4, 0.6),
            ..Material::default()
        });
        scene.add_geometry(Box::new(Sphere {
            transform: Transform::new(
                WorldVector::new(1.0, -2.0, 6.0),
                Orientation::from_euler_angles(0.5, 0.3, -0.7),
                WorldVector::new(2.0, 1.0, 0.5),
            ),
            radius: 1.0,
            material: 0,
        }));
        scene.initialize();

        let ray = Ray::new([1.0, -2.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = cast_ray(&scene, ray);

        assert!(hit.is_hit());
        assert!((hit.point.position - ray.point_at(hit.t)).norm() < 1e-9);
        assert!((hit.point.normal.norm() - 1.0).abs() < 1e-12);
        assert!((hit.material.diffuse.g - 0.4).abs() < 1e-12);
        // Untextured material samples white
        assert!((hit.material.texture.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equal_distances_keep_the_first_geometry() {
        let mut scene = Scene::new();
        scene.add_material(Material::default());
        // Two coincident spheres, order-dependent tie-break
        sphere_on_z_axis(&mut scene, 3.0, 1.0, 0);
        sphere_on_z_axis(&mut scene, 3.0, 1.0, 0);
        scene.initialize();

        let ray = Ray::new([0.0, 0.0, 0.0].into(), [0.0, 0.0, 1.0].into());
        let hit = cast_ray(&scene, ray);

        assert_eq!(hit.index, 0);
        assert!((hit.t - 2.0).abs() < 1e-12);
    }
}
