pub mod error;
pub mod generation;
pub mod heightmap;
pub mod meshing;

use std::path::Path;

pub use error::TerrainError;
pub use heightmap::HeightMap;
use meshing::{heightmap_to_grid_mesh, MeshData, MeshSettings};

/// Loads an image from `path` and turns it into a smoothed terrain mesh.
pub fn load_terrain(
    path: impl AsRef<Path>,
    settings: &MeshSettings,
) -> Result<MeshData, TerrainError> {
    let terrain = HeightMap::open(path)?;
    heightmap_to_grid_mesh(&terrain, settings.scale)
}
