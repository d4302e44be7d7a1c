mod cube;
mod grid;

pub use cube::cube_mesh;
pub use grid::{heightmap_to_grid_mesh, sample_positions, smooth_normals, triangulate};

use bevy::{
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

pub struct MeshSettings {
    /// Multiplier applied to the 0..=255 smoothed intensity.
    pub scale: f32,
    pub color_by_normals: bool,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            scale: 0.5,
            color_by_normals: false,
        }
    }
}

/// Positions and normals are parallel; `triangles` holds index triples.
pub struct MeshData {
    vertices: Vec<Vec3>,
    triangles: Vec<u32>,
    normals: Vec<Vec3>,
}

impl MeshData {
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Flat position, normal and index buffers for a GPU upload.
    pub fn into_buffers(self) -> (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<u32>) {
        (
            self.vertices.iter().map(|v| v.to_array()).collect(),
            self.normals.iter().map(|n| n.to_array()).collect(),
            self.triangles,
        )
    }

    pub fn into_render_mesh(self, color_by_normals: bool) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.vertices);

        if color_by_normals {
            mesh.insert_attribute(
                Mesh::ATTRIBUTE_COLOR,
                self.normals
                    .iter()
                    .map(|v| Vec4::new(v.x, v.y, v.z, 1.))
                    .collect::<Vec<_>>(),
            );
        };
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals);

        mesh.set_indices(Some(Indices::U32(self.triangles)));

        mesh
    }
}
