use std::path::PathBuf;

use heightmap_terrain::{
    generation::{perlin_terrain, NoiseSettings},
    meshing::*,
    HeightMap, TerrainError,
};

use bevy::{
    app::AppExit,
    pbr::wireframe::WireframePlugin,
    prelude::*,
    render::{
        settings::{WgpuFeatures, WgpuSettings},
        RenderPlugin,
    },
};
use clap::Parser;

/// Renders a heightmap image as a lit terrain mesh.
#[derive(Parser, Resource, Debug)]
struct Args {
    /// Heightmap image; the red channel is used as elevation.
    /// A Perlin heightmap is generated when omitted.
    path: Option<PathBuf>,

    /// Height of a full-intensity sample
    #[arg(long, default_value_t = MeshSettings::default().scale)]
    scale: f32,

    /// Seed for the generated heightmap
    #[arg(long, default_value_t = 2)]
    seed: u32,

    /// Side length of the generated heightmap
    #[arg(long, default_value_t = 257)]
    size: usize,

    /// Write the generated heightmap to this PNG
    #[arg(long)]
    export: Option<PathBuf>,

    /// Show the fixed cube instead of terrain
    #[arg(long)]
    cube: bool,

    #[arg(long)]
    wireframe: bool,

    /// Color vertices by their normal
    #[arg(long)]
    color_by_normals: bool,
}

fn main() {
    let args = Args::parse();

    App::new()
        .add_plugins(DefaultPlugins.set(RenderPlugin {
            wgpu_settings: WgpuSettings {
                features: WgpuFeatures::POLYGON_MODE_LINE,
                ..default()
            },
        }))
        .add_plugin(WireframePlugin)
        .insert_resource(args)
        .add_startup_system(setup_mesh)
        .run();
}

fn build_mesh(args: &Args, settings: &MeshSettings) -> Result<MeshData, TerrainError> {
    if args.cube {
        return Ok(cube_mesh());
    }

    let terrain = match &args.path {
        Some(path) => HeightMap::open(path)?,
        None => perlin_terrain((args.size, args.size), args.seed, NoiseSettings::default()),
    };

    if let Some(export) = &args.export {
        terrain.save_png(export)?;
        info!("wrote heightmap to {}", export.display());
    }

    heightmap_to_grid_mesh(&terrain, settings.scale)
}

fn setup_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut exit: EventWriter<AppExit>,
    args: Res<Args>,
) {
    let settings = MeshSettings {
        scale: args.scale,
        color_by_normals: args.color_by_normals,
    };

    let mesh = match build_mesh(&args, &settings) {
        Ok(data) => data.into_render_mesh(settings.color_by_normals),
        Err(err) => {
            error!("{}", err);
            exit.send(AppExit);
            return;
        }
    };

    add_camera(&mut commands, args.cube);
    add_lights(&mut commands);

    let mut entity = commands.spawn(PbrBundle {
        mesh: meshes.add(mesh),
        material: materials.add(StandardMaterial {
            base_color: Color::rgb(0.7, 0.7, 0.7),
            perceptual_roughness: 0.5,
            unlit: false,
            ..default()
        }),
        ..default()
    });

    if args.wireframe {
        entity.insert(bevy::pbr::wireframe::Wireframe);
    }
}

fn add_camera(commands: &mut Commands, cube: bool) {
    let translation = if cube {
        Vec3::new(0., 2., 2.)
    } else {
        Vec3::new(0., 200., 200.)
    };

    commands.spawn(Camera3dBundle {
        transform: Transform::from_translation(translation).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
}

fn add_lights(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.02,
    });

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 10000.,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::IDENTITY.looking_at(Vec3::new(1., -3., -1.), Vec3::Y),
        ..default()
    });
}
