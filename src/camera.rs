use assert2::assert;
use bon::bon;

use crate::geometry::{FloatType, Orientation, WorldPoint, WorldVector};

/// Viewpoint the scene is rendered from.
///
/// Projection and pixel sampling belong to the renderer; the camera only
/// carries the placement and frustum parameters the scene file describes.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    position: WorldPoint,
    orientation: Orientation,

    /// Vertical field of view in radians
    fov: FloatType,
    aspect_ratio: FloatType,
    near_clip: FloatType,
    far_clip: FloatType,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(
        position: WorldPoint,
        orientation: Orientation,
        #[builder(default = std::f64::consts::FRAC_PI_4)] fov: FloatType,
        #[builder(default = 1.0)] aspect_ratio: FloatType,
        #[builder(default = 0.1)] near_clip: FloatType,
        #[builder(default = 100.0)] far_clip: FloatType,
    ) -> Self {
        assert!(fov > 0.0);
        assert!(fov < std::f64::consts::PI);
        assert!(aspect_ratio > 0.0);
        assert!(near_clip > 0.0);
        assert!(far_clip > near_clip);

        Camera {
            position,
            orientation,
            fov,
            aspect_ratio,
            near_clip,
            far_clip,
        }
    }
}

impl Camera {
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// View direction, the local -Z axis moved to world space.
    pub fn direction(&self) -> WorldVector {
        self.orientation * -WorldVector::z()
    }

    pub fn up(&self) -> WorldVector {
        self.orientation * WorldVector::y()
    }

    pub fn fov(&self) -> FloatType {
        self.fov
    }

    pub fn aspect_ratio(&self) -> FloatType {
        self.aspect_ratio
    }

    pub fn near_clip(&self) -> FloatType {
        self.near_clip
    }

    pub fn far_clip(&self) -> FloatType {
        self.far_clip
    }
}

impl Default for Camera {
    fn default() -> Camera {
        Camera::builder()
            .position(WorldPoint::origin())
            .orientation(Orientation::identity())
            .build()
    }
}
