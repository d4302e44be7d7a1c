use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("cannot load heightmap '{}': {source}", path.display())]
    ImageSource {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("heightmap '{}' has no pixels", path.display())]
    EmptyImage { path: PathBuf },

    #[error("invalid grid {width}x{depth}: both dimensions must be at least 2")]
    InvalidGrid { width: usize, depth: usize },

    #[error("vertex {vertex} has a zero-length normal")]
    DegenerateNormal { vertex: usize },

    #[error("cannot write heightmap '{}': {source}", path.display())]
    ImageExport {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
