use bevy::prelude::*;

/// Ordering of the per-frame ocean work inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OceanUpdateSet {
    Input,
    Simulation,
    Rendering,
    Ui,
}
