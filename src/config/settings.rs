//! Settings module.

use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::args::Args;
use crate::core::MalformedLines;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Number of most recent points kept on the chart.
    pub display_window: usize,
    /// Number of most recent observations averaged into the trend.
    pub trend_window: usize,
    /// Delay after every rendered frame.
    pub pacing_ms: u64,
    /// Recompute the trend sum from scratch every this many records; 0 disables it.
    pub trend_resync_interval: usize,
    pub malformed_lines: MalformedLines,
    /// Echo consumed lines to stdout.
    pub echo: bool,
    pub chart: ChartSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChartSettings {
    pub enabled: bool,
    pub output: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    YamlError(serde_yaml::Error),
    Invalid(String),
}

impl std::error::Error for SettingsError {}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(error) => write!(formatter, "IO error: {}", error),
            SettingsError::YamlError(error) => write!(formatter, "YAML error: {}", error),
            SettingsError::Invalid(message) => write!(formatter, "Invalid settings: {}", message),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_window: 500,
            trend_window: 1000,
            pacing_ms: 1000,
            trend_resync_interval: 0,
            malformed_lines: MalformedLines::Abort,
            echo: true,
            chart: ChartSettings::default(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            output: "survival.svg".to_string(),
            width: 1200,
            height: 700,
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = vec![];
        self.write(&mut output).map_err(|_| std::fmt::Error)?;
        write!(formatter, "{}", String::from_utf8_lossy(&output))
    }
}

impl Settings {
    pub fn write(&self, writer: &mut dyn std::io::Write) -> Result<(), SettingsError> {
        serde_yaml::to_writer(writer, self).map_err(SettingsError::YamlError)
    }

    pub fn read(reader: &mut dyn std::io::Read) -> Result<Settings, SettingsError> {
        serde_yaml::from_reader(reader).map_err(SettingsError::YamlError)
    }

    pub fn write_to_file(&self, filename: &str) -> Result<(), SettingsError> {
        let file = fs::File::create(filename).map_err(SettingsError::IoError)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write(&mut writer)
    }

    pub fn read_from_file(filename: &str) -> Result<Settings, SettingsError> {
        let file = fs::File::open(filename).map_err(SettingsError::IoError)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read(&mut reader)
    }

    /// Settings from the optional settings file with command line overrides applied.
    pub fn from_args(args: &Args) -> Result<Settings, SettingsError> {
        let mut settings = match &args.settings {
            Some(path) => Self::read_from_file(path)?,
            None => Self::default(),
        };
        settings.apply_args(args);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(display_window) = args.display_window {
            self.display_window = display_window;
        }
        if let Some(trend_window) = args.trend_window {
            self.trend_window = trend_window;
        }
        if let Some(pacing_ms) = args.pacing_ms {
            self.pacing_ms = pacing_ms;
        }
        if let Some(output) = &args.output {
            self.chart.output = output.clone();
        }
        if args.skip_malformed {
            self.malformed_lines = MalformedLines::Skip;
        }
        if args.no_chart {
            self.chart.enabled = false;
        }
        if args.no_echo {
            self.echo = false;
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.display_window == 0 {
            return Err(SettingsError::Invalid(
                "display_window must be at least 1".to_string(),
            ));
        }
        if self.trend_window == 0 {
            return Err(SettingsError::Invalid(
                "trend_window must be at least 1".to_string(),
            ));
        }
        if self.chart.enabled && (self.chart.width == 0 || self.chart.height == 0) {
            return Err(SettingsError::Invalid(
                "chart width and height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}
