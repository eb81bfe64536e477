use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint};
use crate::util::{Color3, WHITE};

/// Inverse-distance falloff coefficients for a light.
#[derive(Copy, Clone, Debug)]
pub struct Attenuation {
    pub constant: FloatType,
    pub linear: FloatType,
    pub quadratic: FloatType,
}

impl Attenuation {
    /// Falloff factor `1 / (constant + linear*d + quadratic*d^2)`.
    ///
    /// With a zero constant term the factor diverges as the distance goes to
    /// zero, callers evaluating direct lighting guard against that.
    pub fn factor(&self, distance: FloatType) -> FloatType {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

impl Default for Attenuation {
    fn default() -> Attenuation {
        Attenuation {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

/// Spherical light source. Lights are plain values owned by the scene's
/// light list, they are not shaded surfaces and have no detail pass.
#[derive(Copy, Clone, Debug)]
pub struct SphereLight {
    pub position: WorldPoint,
    /// Both the diffuse and specular color of the light.
    pub color: Color3,
    pub radius: FloatType,
    pub attenuation: Attenuation,
}

impl SphereLight {
    /// Lightweight sphere test used by shadow and visibility queries.
    /// Returns the distance to the closest intersection along the ray.
    ///
    /// Expects a ray with a unit-length direction (as built by
    /// [`Ray::new`]); directions of other lengths skew the reported
    /// distance.
    pub fn intersect(&self, ray: &Ray) -> Option<FloatType> {
        let oc = ray.origin - self.position;
        let b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = -b - sqrt_disc;
        let t2 = -b + sqrt_disc;
        if t1 > EPSILON {
            Some(t1)
        } else if t2 > EPSILON {
            Some(t2)
        } else {
            None
        }
    }

    pub fn attenuation_factor(&self, distance: FloatType) -> FloatType {
        self.attenuation.factor(distance)
    }
}

impl Default for SphereLight {
    fn default() -> SphereLight {
        SphereLight {
            position: WorldPoint::origin(),
            color: WHITE,
            radius: 0.0,
            attenuation: Attenuation::default(),
        }
    }
}
