use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::{RenderError, Renderer};
use crate::core::DisplayBuffers;

/// Terminal spinner showing the latest generation, rate and trend.
pub struct ProgressRenderer {
    bar: ProgressBar,
}

impl ProgressRenderer {
    pub fn new() -> Result<Self, RenderError> {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    pub fn hidden() -> Result<Self, RenderError> {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Result<Self, RenderError> {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} [{elapsed_precise}] {pos:>7} records {msg}")
                .map_err(RenderError::Template)?,
        );
        Ok(Self { bar })
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Renderer for ProgressRenderer {
    fn update(&mut self, series: &DisplayBuffers) -> Result<(), RenderError> {
        if let Some((generation, raw, trend)) = series.latest() {
            self.bar.inc(1);
            self.bar.set_message(format!(
                "generation={generation} survival={raw:.2}% trend={trend:.2}%"
            ));
        }
        Ok(())
    }
}

impl Drop for ProgressRenderer {
    fn drop(&mut self) {
        self.bar.finish_with_message("Done.");
    }
}
