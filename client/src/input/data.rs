use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
    DropCrate,
    RemoveOldest,
    ToggleInspector,
}

impl GameAction {
    pub const ALL: [GameAction; 13] = [
        GameAction::MoveForward,
        GameAction::MoveBackward,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveUp,
        GameAction::MoveDown,
        GameAction::TurnLeft,
        GameAction::TurnRight,
        GameAction::LookUp,
        GameAction::LookDown,
        GameAction::DropCrate,
        GameAction::RemoveOldest,
        GameAction::ToggleInspector,
    ];
}
