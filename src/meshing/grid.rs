use bevy::log::{debug, info};
use bevy::prelude::Vec3;

use super::MeshData;
use crate::{HeightMap, TerrainError};

/// Builds a regular grid mesh with one vertex per heightmap cell and
/// area-weighted smooth normals.
pub fn heightmap_to_grid_mesh(terrain: &HeightMap, scale: f32) -> Result<MeshData, TerrainError> {
    let (width, depth) = terrain.dim();

    let vertices = sample_positions(terrain, scale)?;
    let triangles = triangulate(width, depth);
    let normals = smooth_normals(&vertices, &triangles)?;

    info!(
        "built {}x{} terrain mesh: {} vertices, {} triangles",
        width,
        depth,
        vertices.len(),
        triangles.len() / 3
    );

    Ok(MeshData {
        vertices,
        triangles,
        normals,
    })
}

/// One vertex per cell, row-major (`x + z * width`).
pub fn sample_positions(terrain: &HeightMap, scale: f32) -> Result<Vec<Vec3>, TerrainError> {
    let (width, depth) = terrain.dim();

    // The edge fallback reads x - 1 / z - 1, which doesn't exist on a 1-wide axis
    if width < 2 || depth < 2 {
        return Err(TerrainError::InvalidGrid { width, depth });
    }

    debug!("sampling {}x{} heightmap with scale {}", width, depth, scale);

    let mut vertices = Vec::with_capacity(width * depth);
    for z in 0..depth {
        for x in 0..width {
            vertices.push(terrain.vertex_at(x, z, scale));
        }
    }

    Ok(vertices)
}

//  0   1   .   .
//  2   3   .   .    idx(x, z) = x + z * width
//  .   .   .   .
pub fn triangulate(width: usize, depth: usize) -> Vec<u32> {
    let idx = |x: usize, z: usize| -> u32 { (x + z * width) as u32 };

    let quads = width.saturating_sub(1) * depth.saturating_sub(1);
    let mut triangles = Vec::with_capacity(quads * 6);

    for z in 0..depth.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            // Add quad to indices
            triangles.extend([idx(x, z), idx(x + 1, z + 1), idx(x + 1, z)]);
            triangles.extend([idx(x, z), idx(x, z + 1), idx(x + 1, z + 1)]);
        }
    }

    triangles
}

/// Sums the unnormalized face normal of every triangle into its three
/// vertices, then normalizes. Larger faces weigh more.
pub fn smooth_normals(vertices: &[Vec3], triangles: &[u32]) -> Result<Vec<Vec3>, TerrainError> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in triangles.chunks_exact(3) {
        let [i1, i2, i3] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

        let side1 = vertices[i2] - vertices[i1];
        let side2 = vertices[i3] - vertices[i1];
        let face_normal = side1.cross(side2);

        normals[i1] += face_normal;
        normals[i2] += face_normal;
        normals[i3] += face_normal;
    }

    normals
        .into_iter()
        .enumerate()
        .map(|(vertex, normal)| {
            normal
                .try_normalize()
                .ok_or(TerrainError::DegenerateNormal { vertex })
        })
        .collect()
}
