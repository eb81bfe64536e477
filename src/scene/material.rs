use std::path::Path;

use assert2::assert;
use image::RgbaImage;
use thiserror::Error;

use crate::geometry::{FloatType, TexturePoint};
use crate::scene::MaterialProperties;
use crate::util::{BLACK, Color3, WHITE};

/// Surface description shared by any number of geometries. Owned by the
/// scene, referenced through index handles.
#[derive(Clone, Debug)]
pub struct Material {
    /// Ambient color, ignored by shading when the material is transparent.
    pub ambient: Color3,
    pub diffuse: Color3,
    pub specular: Color3,
    /// 0 means opaque, any other value is the index of refraction of a
    /// transparent dielectric.
    pub refractive_index: FloatType,
    pub texture: Option<Texture>,
}

impl Material {
    /// Texture color at the given coordinate, white for untextured materials.
    pub fn sample_texture(&self, tex_coord: &TexturePoint) -> Color3 {
        self.texture
            .as_ref()
            .map_or(WHITE, |texture| texture.sample(tex_coord))
    }

    /// Snapshot of all material channels at one surface point, as stored in
    /// the intersection record by the detail pass.
    pub fn properties_at(&self, tex_coord: &TexturePoint) -> MaterialProperties {
        MaterialProperties {
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
            refractive_index: self.refractive_index,
            texture: self.sample_texture(tex_coord),
        }
    }
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ambient: BLACK,
            diffuse: WHITE,
            specular: BLACK,
            refractive_index: 0.0,
            texture: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to load texture image")]
    Load(#[from] image::ImageError),
}

/// Image-backed texture map, sampled with wrapping texture coordinates.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    pub fn load(path: impl AsRef<Path>) -> Result<Texture, TextureError> {
        Ok(Texture::from_image(image::open(path)?.to_rgba8()))
    }

    /// The image must have at least one pixel.
    pub fn from_image(image: RgbaImage) -> Texture {
        assert!(image.width() > 0);
        assert!(image.height() > 0);
        Texture { image }
    }

    pub fn sample(&self, tex_coord: &TexturePoint) -> Color3 {
        let (width, height) = self.image.dimensions();
        let u = tex_coord.x.rem_euclid(1.0);
        let v = tex_coord.y.rem_euclid(1.0);
        let x = ((u * width as FloatType) as u32).min(width - 1);
        let y = ((v * height as FloatType) as u32).min(height - 1);
        let pixel = self.image.get_pixel(x, y);
        Color3::new(
            pixel[0] as FloatType / 255.0,
            pixel[1] as FloatType / 255.0,
            pixel[2] as FloatType / 255.0,
        )
    }
}
