//! Screen building blocks; each renders from a DisplayContext and reports the
//! user's choice back to the manager instead of touching settings directly.

pub mod language_settings;
pub mod main_screen;
pub mod theme_settings;
