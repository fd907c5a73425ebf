//! Configuration data structures for the monitor.

mod settings;

pub use settings::{ChartSettings, Settings, SettingsError};
