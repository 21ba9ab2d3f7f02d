use crate::constants::BINDS_PATH;
use crate::input::data::GameAction;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Resource, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "default_key_map")]
    pub map: BTreeMap<GameAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: default_key_map(),
        }
    }
}

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    if let Some(parent) = binds_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(binds_path, serialized)
}

pub fn is_action_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|key_codes| keyboard_input.any_pressed(key_codes.iter().copied()))
}

pub fn is_action_just_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|key_codes| keyboard_input.any_just_pressed(key_codes.iter().copied()))
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::MoveForward, vec![KeyCode::KeyW]);
    map.insert(GameAction::MoveBackward, vec![KeyCode::KeyS]);
    map.insert(GameAction::MoveLeft, vec![KeyCode::KeyA]);
    map.insert(GameAction::MoveRight, vec![KeyCode::KeyD]);
    map.insert(GameAction::MoveUp, vec![KeyCode::KeyE]);
    map.insert(GameAction::MoveDown, vec![KeyCode::KeyQ]);
    map.insert(GameAction::TurnLeft, vec![KeyCode::ArrowLeft]);
    map.insert(GameAction::TurnRight, vec![KeyCode::ArrowRight]);
    map.insert(GameAction::LookUp, vec![KeyCode::ArrowUp]);
    map.insert(GameAction::LookDown, vec![KeyCode::ArrowDown]);
    map.insert(GameAction::DropCrate, vec![KeyCode::Space]);
    map.insert(GameAction::RemoveOldest, vec![KeyCode::Backspace]);
    map.insert(GameAction::ToggleInspector, vec![KeyCode::F1]);
    map
}

/// Read the keybindings next to the settings file, writing the defaults
/// there on first launch.
pub fn get_bindings(folder: &Path) -> KeyMap {
    let binds_path = folder.join(BINDS_PATH);

    if let Ok(content) = fs::read_to_string(&binds_path) {
        match from_str::<KeyMap>(&content) {
            Ok(key_map) => return key_map,
            Err(e) => warn!("Ignoring invalid keybindings at {:?}: {}", binds_path, e),
        }
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, &binds_path) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}
