//! egui presentation layer: a main screen and a settings screen

pub mod components;
pub mod constants;
mod manager;

pub use manager::run_gui;
