mod intersection;
pub mod lights;
pub mod material;
pub mod mesh;
pub mod primitives;

pub use intersection::{Intersection, IntersectionPoint, MaterialProperties};
pub use lights::{Attenuation, SphereLight};
pub use material::{Material, Texture, TextureError};
pub use mesh::{Mesh, MeshVertex};
pub use primitives::{Model, Sphere, Triangle, TriangleVertex};

use log::debug;

use crate::camera::Camera;
use crate::geometry::{FloatType, Ray, Transform};
use crate::util::{BLACK, Color3};

/// A placed object that rays can be tested against.
///
/// The two methods form the two-phase intersection protocol: `hit_test` runs
/// against every candidate in the scene and only finds the hit distance,
/// `populate_hit` runs exactly once per ray, for the winning geometry, and
/// fills in the expensive shading data. Callers must not invoke
/// `populate_hit` on a record whose winner is a different geometry.
///
/// `Send + Sync` so that a renderer can share a fully built scene across
/// worker threads; the contract stays read-only during rendering.
pub trait Geometry: Send + Sync {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    /// Coarse test: moves the ray into object-local space and finds the
    /// smallest positive hit distance, without touching normals, texture
    /// coordinates or materials.
    fn hit_test(&self, ctx: &SceneContext<'_>, ray: &Ray) -> Option<CoarseHit>;

    /// Detail pass: fills position, normal, texture coordinate and material
    /// channels for the hit described by `hit.t` and `hit.instanced_ray`.
    fn populate_hit(&self, ctx: &SceneContext<'_>, hit: &mut Intersection);
}

/// Minimal summary returned by the coarse test.
#[derive(Copy, Clone, Debug)]
pub struct CoarseHit {
    pub t: FloatType,
    /// The ray transformed into the geometry's local space, kept for the
    /// detail pass.
    pub local_ray: Ray,
}

/// Read-only view of the scene-owned resources that geometries resolve
/// their index handles against.
#[derive(Copy, Clone)]
pub struct SceneContext<'a> {
    pub materials: &'a [Material],
    pub meshes: &'a [Mesh],
}

/// Container for everything needed to render a scene.
///
/// The scene exclusively owns all geometries, materials, meshes and lights
/// added to it; `add_*` hands ownership over and returns the index handle the
/// owned item is referenced by. Slices returned by the accessors stay valid
/// between additions but not across `reset`.
///
/// Deliberately not `Clone`: duplicating the ownership graph shallowly would
/// alias the handle spaces.
pub struct Scene {
    pub camera: Camera,
    pub background_color: Color3,
    pub ambient_light: Color3,
    /// Refractive index of the ambient medium surrounding the geometries.
    pub refractive_index: FloatType,

    geometries: Vec<Box<dyn Geometry>>,
    materials: Vec<Material>,
    meshes: Vec<Mesh>,
    lights: Vec<SphereLight>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    /// One-time setup hook, called once after the scene has been populated
    /// and before any rendering query. Makes sure every geometry's cached
    /// transform matrices agree with its transform attributes.
    pub fn initialize(&mut self) {
        for geometry in &mut self.geometries {
            geometry.transform_mut().recompute();
        }
        debug!(
            "initialized scene: {} geometries, {} materials, {} meshes, {} lights",
            self.geometries.len(),
            self.materials.len(),
            self.meshes.len(),
            self.lights.len(),
        );
    }

    pub fn add_geometry(&mut self, geometry: Box<dyn Geometry>) -> usize {
        self.geometries.push(geometry);
        self.geometries.len() - 1
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn add_light(&mut self, light: SphereLight) {
        self.lights.push(light);
    }

    pub fn geometries(&self) -> &[Box<dyn Geometry>] {
        &self.geometries
    }

    pub fn geometry_mut(&mut self, index: usize) -> &mut dyn Geometry {
        self.geometries[index].as_mut()
    }

    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    pub fn lights(&self) -> &[SphereLight] {
        &self.lights
    }

    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }

    pub fn context(&self) -> SceneContext<'_> {
        SceneContext {
            materials: &self.materials,
            meshes: &self.meshes,
        }
    }

    /// Drops all owned content and restores the just-constructed empty
    /// state. Idempotent.
    pub fn reset(&mut self) {
        debug!(
            "resetting scene: dropping {} geometries, {} materials, {} meshes, {} lights",
            self.geometries.len(),
            self.materials.len(),
            self.meshes.len(),
            self.lights.len(),
        );
        self.geometries.clear();
        self.materials.clear();
        self.meshes.clear();
        self.lights.clear();
        self.camera = Camera::default();
        self.background_color = BLACK;
        self.ambient_light = BLACK;
        self.refractive_index = 1.0;
    }
}

impl Default for Scene {
    fn default() -> Scene {
        Scene {
            camera: Camera::default(),
            background_color: BLACK,
            ambient_light: BLACK,
            refractive_index: 1.0,
            geometries: Vec::new(),
            materials: Vec::new(),
            meshes: Vec::new(),
            lights: Vec::new(),
        }
    }
}
