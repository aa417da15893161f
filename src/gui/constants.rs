//! GUI-specific constants for layout and window geometry

use egui::{Vec2, vec2};

/// Settings window dimensions
pub const WINDOW_SIZE: Vec2 = vec2(440.0, 380.0);
pub const WINDOW_MIN_SIZE: Vec2 = vec2(360.0, 300.0);

/// Layout spacing
pub const PADDING: f32 = 16.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Vertical offset of the greeting on the main screen
pub const MAIN_SCREEN_TOP_SPACE: f32 = 120.0;

/// Id salts for the settings combo boxes
pub const LANGUAGE_COMBO_ID: &str = "language_selector";
pub const THEME_COMBO_ID: &str = "theme_selector";
