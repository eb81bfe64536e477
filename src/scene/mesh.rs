use assert2::assert;

use crate::geometry::{TexturePoint, WorldPoint, WorldVector};

#[derive(Copy, Clone, Debug)]
pub struct MeshVertex {
    pub position: WorldPoint,
    pub normal: WorldVector,
    pub tex_coord: TexturePoint,
}

impl MeshVertex {
    pub fn at(position: WorldPoint) -> MeshVertex {
        MeshVertex {
            position,
            normal: WorldVector::zeros(),
            tex_coord: TexturePoint::origin(),
        }
    }
}

/// Indexed triangle mesh in object-local coordinates.
///
/// Tessellation and file loading happen outside this crate, the mesh only
/// stores the flat vertex and triangle lists that model geometries
/// intersect against.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    triangles: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>, triangles: Vec<[usize; 3]>) -> Mesh {
        for triangle in &triangles {
            for &index in triangle {
                assert!(index < vertices.len());
            }
        }
        Mesh {
            vertices,
            triangles,
        }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangle_vertices(&self, triangle: [usize; 3]) -> [&MeshVertex; 3] {
        [
            &self.vertices[triangle[0]],
            &self.vertices[triangle[1]],
            &self.vertices[triangle[2]],
        ]
    }

    /// Replaces all vertex normals with area-weighted averages of the
    /// adjacent triangle normals.
    pub fn recompute_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = WorldVector::zeros();
        }
        for i in 0..self.triangles.len() {
            let [a, b, c] = self.triangles[i];
            let [pa, pb, pc] = [
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            ];
            // Cross product length is twice the triangle area, which gives
            // the area weighting for free.
            let normal = (pb - pa).cross(&(pc - pa));
            self.vertices[a].normal += normal;
            self.vertices[b].normal += normal;
            self.vertices[c].normal += normal;
        }
        for vertex in &mut self.vertices {
            let norm = vertex.normal.norm();
            if norm > 0.0 {
                vertex.normal /= norm;
            }
        }
    }
}
