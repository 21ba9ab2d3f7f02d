//! Rendered ocean surface.
//!
//! A subdivided plane sits at the configured base level and every frame
//! its vertices are lifted to the wave field's local surface height, so
//! what is drawn matches what the buoyancy pass samples.

use bevy::{prelude::*, render::mesh::VertexAttributeValues};
use shared::sets::OceanUpdateSet;
use shared::settings::SurfaceSettings;
use shared::WaveField;

#[derive(Resource, Debug, Clone)]
pub struct SurfaceConfig(pub SurfaceSettings);

#[derive(Component)]
pub struct OceanSurface;

pub fn ocean_plugin(app: &mut App) {
    app.add_systems(Startup, spawn_ocean).add_systems(
        Update,
        displace_ocean_surface.in_set(OceanUpdateSet::Rendering),
    );
}

/// Maps a Phong shininess exponent to PBR perceptual roughness.
pub fn roughness_from_shininess(shininess: f32) -> f32 {
    (2.0 / (shininess.max(0.0) + 2.0)).sqrt().clamp(0.089, 1.0)
}

fn ocean_material(settings: &SurfaceSettings) -> StandardMaterial {
    let [r, g, b] = settings.base_color;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        reflectance: settings.specular_strength,
        perceptual_roughness: roughness_from_shininess(settings.shininess),
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn spawn_ocean(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    surface: Res<SurfaceConfig>,
    field: Res<WaveField>,
) {
    let settings = &surface.0;
    let mesh = Plane3d::default()
        .mesh()
        .size(settings.size, settings.size)
        .subdivisions(settings.subdivisions);

    commands.spawn((
        Name::new("Ocean"),
        OceanSurface,
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(ocean_material(settings))),
        Transform::from_xyz(0.0, field.config().base_level, 0.0),
    ));

    info!(
        "Spawned ocean surface: {}x{} with {} subdivisions",
        settings.size, settings.size, settings.subdivisions
    );
}

/// Lift each mesh-local vertex to the field height under it.
pub fn displace_vertices(positions: &mut [[f32; 3]], field: &WaveField, origin: Vec3) {
    for position in positions.iter_mut() {
        position[1] = field.local_surface_height(origin.x + position[0], origin.z + position[2]);
    }
}

pub fn displace_ocean_surface(
    field: Res<WaveField>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surface: Query<(&Mesh3d, &mut Transform), With<OceanSurface>>,
) {
    for (mesh_handle, mut transform) in surface.iter_mut() {
        let base_level = field.config().base_level;
        if transform.translation.y != base_level {
            transform.translation.y = base_level;
        }

        let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
            debug!("Ocean mesh not loaded yet");
            continue;
        };

        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
        else {
            warn!("Ocean mesh has no position attribute");
            continue;
        };

        displace_vertices(positions, &field, transform.translation);
        mesh.compute_normals();
    }
}
