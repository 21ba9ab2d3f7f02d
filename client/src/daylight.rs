use bevy::pbr::light_consts::lux::FULL_DAYLIGHT;
use bevy::prelude::*;
use shared::daylight::{day_phase, sun_direction, LightKind};
use shared::sets::OceanUpdateSet;

/// Ambient brightness at full hemispheric intensity
const AMBIENT_BRIGHTNESS: f32 = 1000.0;

#[derive(Resource, Debug, Clone)]
pub struct DayCycle {
    pub day_length_secs: f32,
    pub ambient_color: Color,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SceneLight(pub LightKind);

pub fn daylight_plugin(app: &mut App) {
    app.add_systems(Startup, spawn_sun).add_systems(
        Update,
        (update_sun, update_ambient_light).in_set(OceanUpdateSet::Rendering),
    );
}

fn spawn_sun(mut commands: Commands, cycle: Res<DayCycle>) {
    let phase = 0.0;
    commands.spawn((
        Name::new("Sun"),
        SceneLight(LightKind::Directional),
        DirectionalLight {
            illuminance: FULL_DAYLIGHT * LightKind::Directional.intensity(phase),
            shadows_enabled: true,
            ..default()
        },
        Transform::default().looking_to(sun_direction(phase), Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: cycle.ambient_color,
        brightness: AMBIENT_BRIGHTNESS * LightKind::Hemispheric.intensity(phase),
        ..default()
    });
}

fn update_sun(
    time: Res<Time>,
    cycle: Res<DayCycle>,
    mut lights: Query<(&SceneLight, &mut DirectionalLight, &mut Transform)>,
) {
    let phase = day_phase(time.elapsed_secs(), cycle.day_length_secs);
    for (light, mut directional, mut transform) in lights.iter_mut() {
        directional.illuminance = FULL_DAYLIGHT * light.0.intensity(phase);
        transform.look_to(sun_direction(phase), Vec3::Y);
    }
}

fn update_ambient_light(
    time: Res<Time>,
    cycle: Res<DayCycle>,
    ambient: Option<ResMut<AmbientLight>>,
) {
    let Some(mut ambient) = ambient else {
        return;
    };
    let phase = day_phase(time.elapsed_secs(), cycle.day_length_secs);
    ambient.color = cycle.ambient_color;
    ambient.brightness = AMBIENT_BRIGHTNESS * LightKind::Hemispheric.intensity(phase);
}
