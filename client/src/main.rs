mod camera;
mod constants;
mod daylight;
mod flotsam;
mod input;
mod inspector;
mod ocean;

use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    window::PresentMode,
};
use bevy_inspector_egui::{bevy_egui::EguiPlugin, DefaultInspectorConfigPlugin};
use clap::{Parser, ValueEnum};
use constants::MAX_INITIAL_FLOTSAM;
use daylight::DayCycle;
use flotsam::InitialFlotsam;
use input::keyboard::get_bindings;
use inspector::InspectorVisible;
use ocean::SurfaceConfig;
use shared::{load_or_create_settings, settings_path, OceanPhysicsPlugin, WavePreset};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Calm,
    Choppy,
    Flat,
}

impl From<PresetArg> for WavePreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Calm => WavePreset::Calm,
            PresetArg::Choppy => WavePreset::Choppy,
            PresetArg::Flat => WavePreset::Flat,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short,
        long,
        help = "Ocean settings file, created with defaults when missing (defaults to ./ocean.ron)"
    )]
    settings: Option<String>,

    #[arg(short, long, value_enum, help = "Override the wave parameters from the settings file")]
    preset: Option<PresetArg>,

    #[arg(short, long, default_value_t = 6, help = "Floating bodies scattered at startup")]
    crates: u32,

    #[arg(long, help = "Open the tuning panel and draw physics colliders")]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    if args.crates > MAX_INITIAL_FLOTSAM {
        eprintln!(
            "Error: --crates must be at most {}, got {}",
            MAX_INITIAL_FLOTSAM, args.crates
        );
        std::process::exit(1);
    }

    let settings_path = settings_path(args.settings);
    println!("Using ocean settings at {}", settings_path.display());

    let mut settings = load_or_create_settings(&settings_path);
    if let Some(preset) = args.preset {
        println!("Overriding waves with the {:?} preset", preset);
        settings.waves = WavePreset::from(preset).to_config();
    }

    let bindings_folder = settings_path.parent().unwrap_or(Path::new(""));

    let (log_filter, log_level) = if args.debug {
        ("wgpu=error,naga=warn,shared=debug,client=debug", Level::DEBUG)
    } else {
        ("wgpu=error,naga=warn", Level::INFO)
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Ocean".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: log_filter.to_string(),
                level: log_level,
                ..default()
            }),
    );

    app.add_plugins(EguiPlugin {
        enable_multipass_for_primary_context: false,
    })
    .add_plugins(DefaultInspectorConfigPlugin);

    app.add_plugins(OceanPhysicsPlugin {
        waves: settings.waves.clone(),
        buoyancy: settings.buoyancy,
        debug_render: args.debug,
    });

    let [r, g, b] = settings.surface.ambient_color;
    app.insert_resource(get_bindings(bindings_folder))
        .insert_resource(SurfaceConfig(settings.surface.clone()))
        .insert_resource(DayCycle {
            day_length_secs: settings.day_length_secs,
            ambient_color: Color::srgb(r, g, b),
        })
        .insert_resource(InitialFlotsam(args.crates))
        .insert_resource(InspectorVisible(args.debug))
        .add_plugins((
            camera::camera_plugin,
            ocean::ocean_plugin,
            flotsam::flotsam_plugin,
            daylight::daylight_plugin,
            inspector::inspector_plugin,
        ))
        .run();
}
