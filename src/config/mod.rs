//! Settings management
//!
//! - **observable**: value + observer list used for change notification
//! - **settings**: SettingsModel, the observable projection of the stored settings

pub mod observable;
pub mod settings;

pub use settings::{Setting, SettingsModel, SettingsSnapshot, Subscription};
