use bevy::prelude::Vec3;

use super::MeshData;

// Four vertices per face so each face keeps its own flat normal
const POSITIONS: [[f32; 3]; 24] = [
    // front
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    // back
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    // top
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    // bottom
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    // right
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    // left
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0., 0., 1.],
    [0., 0., -1.],
    [0., 1., 0.],
    [0., -1., 0.],
    [1., 0., 0.],
    [-1., 0., 0.],
];

#[rustfmt::skip]
const INDICES: [u32; 36] = [
    0, 2, 3,    0, 3, 1,     // front
    4, 7, 6,    4, 5, 7,     // back
    8, 11, 10,  8, 9, 11,    // top
    12, 14, 15, 12, 15, 13,  // bottom
    16, 18, 19, 16, 19, 17,  // right
    20, 23, 22, 20, 21, 23,  // left
];

/// Unit cube centered on the origin.
pub fn cube_mesh() -> MeshData {
    MeshData {
        vertices: POSITIONS.iter().copied().map(Vec3::from).collect(),
        triangles: INDICES.to_vec(),
        normals: FACE_NORMALS
            .iter()
            .flat_map(|n| [Vec3::from(*n); 4])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_sizes() {
        let cube = cube_mesh();
        assert_eq!(cube.vertices().len(), 24);
        assert_eq!(cube.normals().len(), 24);
        assert_eq!(cube.triangles().len(), 36);
    }

    #[test]
    fn test_cube_normals_match_faces() {
        let cube = cube_mesh();
        for (v, n) in cube.vertices().iter().zip(cube.normals()) {
            // Every vertex of a face lies on the plane the face normal points out of
            assert!((v.dot(*n) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let cube = cube_mesh();
        for tri in cube.triangles().chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|i| cube.vertices()[tri[i] as usize]);
            let face = (b - a).cross(c - a);
            assert!(face.dot(cube.normals()[tri[0] as usize]) > 0.);
        }
    }
}
