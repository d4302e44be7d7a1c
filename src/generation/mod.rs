use super::heightmap::HeightMap;

use bevy::log::debug;
use ndarray::prelude::*;
use noise::{NoiseFn, Perlin};

pub struct NoiseSettings {
    scale: f32,
    octaves: usize,
}

impl NoiseSettings {
    pub fn new(scale: f32, octaves: usize) -> Self {
        Self { scale, octaves }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            scale: 5e-3,
            octaves: 8,
        }
    }
}

/// Fractal Perlin noise quantized to 0..=255, for running without a
/// heightmap image.
pub fn perlin_terrain(
    (width, depth): (usize, usize),
    seed: u32,
    noise_settings: NoiseSettings,
) -> HeightMap {
    let octaves = noise_settings.octaves;
    let scale_start = noise_settings.scale;

    debug!("generating {}x{} perlin heightmap, seed {}", width, depth, seed);

    let perlin = Perlin::new(seed);

    let mut data: Array2<f32> = Array::zeros((width, depth));

    for z in 0..depth {
        for x in 0..width {
            let mut scale = 1.;

            for i in 0..octaves {
                data[[x, z]] += scale
                    * perlin.get([
                        (i as f32 * 1000. + scale_start / scale * x as f32) as f64,
                        (scale_start / scale * z as f32) as f64,
                    ]) as f32;
                scale /= 2.;
            }
        }
    }

    // Calculate the maximum magnitude of the terrain
    let (max_magnitude, _) = (0..octaves).fold((0.0, 1.0), |(max_magnitude, scale), _| {
        (max_magnitude + scale, scale / 2.0)
    });

    // Convert the values from -max_magnitude..max_magnitude to 0..=255
    HeightMap(data.mapv(|v| {
        let unit = (v / max_magnitude + 1.) / 2.;
        (255. * unit.clamp(0., 1.)).round() as u8
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_terrain_dims() {
        let terrain = perlin_terrain((17, 9), 3, NoiseSettings::default());
        assert_eq!(terrain.dim(), (17, 9));
    }

    #[test]
    fn test_perlin_terrain_is_seeded() {
        let a = perlin_terrain((16, 16), 7, NoiseSettings::new(0.05, 4));
        let b = perlin_terrain((16, 16), 7, NoiseSettings::new(0.05, 4));
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn test_perlin_terrain_varies() {
        let terrain = perlin_terrain((32, 32), 1, NoiseSettings::new(0.1, 4));
        let min = terrain.0.iter().min().copied().unwrap();
        let max = terrain.0.iter().max().copied().unwrap();
        assert!(max > min);
    }
}
