use std::path::Path;

use bevy::prelude::Vec3;
use image::{GrayImage, ImageFormat, Luma, RgbImage};
use ndarray::Array2;

use crate::TerrainError;

/// Grid of 0..=255 intensity samples, indexed `[[x, z]]`.
pub struct HeightMap(pub Array2<u8>);

impl HeightMap {
    /// Decodes an image file and keeps the red channel of every pixel.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TerrainError::ImageSource {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgb8();

        if img.width() == 0 || img.height() == 0 {
            return Err(TerrainError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::from_rgb(&img))
    }

    pub fn from_rgb(img: &RgbImage) -> Self {
        let (width, depth) = img.dimensions();
        HeightMap(Array2::from_shape_fn(
            (width as usize, depth as usize),
            |(x, z)| img.get_pixel(x as u32, z as u32)[0],
        ))
    }

    pub fn from_luma(img: &GrayImage) -> Self {
        let (width, depth) = img.dimensions();
        HeightMap(Array2::from_shape_fn(
            (width as usize, depth as usize),
            |(x, z)| img.get_pixel(x as u32, z as u32)[0],
        ))
    }

    pub fn to_image(&self) -> GrayImage {
        let (width, depth) = self.dim();
        GrayImage::from_fn(width as u32, depth as u32, |x, z| {
            Luma([self.0[[x as usize, z as usize]]])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), TerrainError> {
        let path = path.as_ref();
        self.to_image()
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| TerrainError::ImageExport {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn sample(&self, x: usize, z: usize) -> u8 {
        self.0[[x, z]]
    }

    /// Averages a cell with its next neighbor along each axis. On the last
    /// column/row the previous neighbor is read instead, so callers must
    /// ensure both dimensions are at least 2.
    pub fn smoothed_height(&self, x: usize, z: usize) -> f32 {
        let (width, depth) = self.dim();

        let tone1 = self.sample(x, z) as f32;
        let tone2 = if x < width - 1 {
            self.sample(x + 1, z) as f32
        } else {
            self.sample(x - 1, z) as f32
        };
        let tone3 = if z < depth - 1 {
            self.sample(x, z + 1) as f32
        } else {
            self.sample(x, z - 1) as f32
        };

        (tone1 + tone2 + tone3) / 3.
    }

    pub fn vertex_at(&self, x: usize, z: usize, scale: f32) -> Vec3 {
        Vec3 {
            x: x as f32 - self.0.dim().0 as f32 / 2.,
            y: self.smoothed_height(x, z) * scale,
            z: z as f32 - self.0.dim().1 as f32 / 2.,
        }
    }

    /// (width, depth)
    pub fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use ndarray::array;

    // Row z = 0 is [0, 255], row z = 1 is [255, 0].
    fn checker() -> HeightMap {
        HeightMap(array![[0, 255], [255, 0]])
    }

    #[test]
    fn test_smoothed_height_forward_neighbors() {
        let terrain = checker();
        assert!((terrain.smoothed_height(0, 0) - 170.).abs() < 1e-5);
    }

    #[test]
    fn test_smoothed_height_backward_fallback() {
        let terrain = checker();
        // (1, 1) reads (0, 1) and (1, 0)
        assert!((terrain.smoothed_height(1, 1) - 170.).abs() < 1e-5);
        // (1, 0) reads (0, 0) and (1, 1)
        assert!((terrain.smoothed_height(1, 0) - 85.).abs() < 1e-5);
    }

    #[test]
    fn test_smoothing_is_one_sided() {
        let terrain = HeightMap(array![[0, 0, 0], [90, 90, 90], [0, 0, 0]]);
        // x = 1 only sees its forward neighbor at x = 2
        assert!((terrain.smoothed_height(0, 1) - 30.).abs() < 1e-5);
        assert!((terrain.smoothed_height(1, 1) - 60.).abs() < 1e-5);
        assert!((terrain.smoothed_height(2, 1) - 30.).abs() < 1e-5);
    }

    #[test]
    fn test_vertex_at_is_centered() {
        let terrain = HeightMap(Array2::from_elem((4, 2), 30));
        let v = terrain.vertex_at(0, 0, 0.5);
        assert_eq!(v, Vec3::new(-2., 15., -1.));
        let v = terrain.vertex_at(3, 1, 1.);
        assert_eq!(v, Vec3::new(1., 30., 0.));
    }

    #[test]
    fn test_from_rgb_reads_red_channel() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([(x + 10 * y) as u8, 200, 100]));
        let terrain = HeightMap::from_rgb(&img);
        assert_eq!(terrain.dim(), (3, 2));
        assert_eq!(terrain.sample(2, 0), 2);
        assert_eq!(terrain.sample(1, 1), 11);
    }

    #[test]
    fn test_luma_image_roundtrip() {
        let img = GrayImage::from_fn(5, 3, |x, y| Luma([(x * 40 + y) as u8]));
        let terrain = HeightMap::from_luma(&img);
        assert_eq!(terrain.sample(4, 2), 162);
        assert_eq!(terrain.to_image(), img);
    }

    #[test]
    fn test_open_missing_file() {
        let result = HeightMap::open("does/not/exist.png");
        assert!(matches!(result, Err(TerrainError::ImageSource { .. })));
    }
}
