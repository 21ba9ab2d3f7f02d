//! Live tuning panel for the wave field and buoyancy settings.

use crate::input::data::GameAction;
use crate::input::keyboard::{is_action_just_pressed, KeyMap};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_inspector_egui::bevy_egui::EguiContext;
use bevy_inspector_egui::bevy_inspector::ui_for_resource;
use shared::sets::OceanUpdateSet;
use shared::{BuoyancySettings, Floating, WaveField};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InspectorVisible(pub bool);

pub fn inspector_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            toggle_inspector.in_set(OceanUpdateSet::Input),
            inspector_ui.in_set(OceanUpdateSet::Ui),
        ),
    );
}

fn toggle_inspector(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut visible: ResMut<InspectorVisible>,
) {
    if is_action_just_pressed(GameAction::ToggleInspector, &keyboard_input, &key_map) {
        visible.0 = !visible.0;
        debug!("Tuning panel visible: {}", visible.0);
    }
}

pub fn inspector_ui(world: &mut World) {
    if !world.get_resource::<InspectorVisible>().is_some_and(|v| v.0) {
        return;
    }

    let Ok(egui_context) = world
        .query_filtered::<&mut EguiContext, With<PrimaryWindow>>()
        .single(world)
    else {
        return;
    };
    let mut egui_context = egui_context.clone();

    let floating = world
        .query_filtered::<(), With<Floating>>()
        .iter(world)
        .count();

    egui::Window::new("Ocean")
        .default_width(320.0)
        .show(egui_context.get_mut(), |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label(format!("Floating bodies: {floating}"));
                ui.separator();
                ui.heading("Waves");
                ui_for_resource::<WaveField>(world, ui);
                ui.separator();
                ui.heading("Buoyancy");
                ui_for_resource::<BuoyancySettings>(world, ui);
            });
        });
}
