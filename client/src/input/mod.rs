pub mod data;
pub mod keyboard;
