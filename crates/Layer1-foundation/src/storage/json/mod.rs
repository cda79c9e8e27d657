mod store;

pub use store::{JsonStore, SettingsScope, PROJECT_DIR, ROSTER_DIR};
