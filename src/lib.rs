pub mod camera;
pub mod geometry;
pub mod raycast;
pub mod scene;
mod util;

pub use camera::Camera;
pub use geometry::{FloatType, Ray, Transform};
pub use raycast::cast_ray;
pub use scene::{
    Attenuation, CoarseHit, Geometry, Intersection, Material, Mesh, Scene, SphereLight,
};
pub use util::{BLACK, Color3, WHITE};
