use anyhow::{Context, Result};
use std::io::{self, BufRead};

use crate::args::Args;
use crate::config::Settings;
use crate::core::{
    DisplayBuffers, RunningTrendEstimator, SleepPacer, StreamDriver, StreamSummary,
};
use crate::render::{ChartRenderer, CompositeRenderer, ProgressRenderer};

pub struct Runner {
    args: Args,
    settings: Settings,
}

impl Runner {
    pub fn new(args: Args) -> Result<Runner> {
        Self::setup_logger(&args)?;
        let settings = Self::load_settings(&args)?;
        Ok(Self { args, settings })
    }

    /// Stream stdin until it ends or a line cannot be handled.
    pub fn start(&mut self) -> Result<StreamSummary> {
        let mut renderer = self.create_renderer()?;
        let mut driver = self.create_driver();

        let stdin = io::stdin();
        let summary = driver
            .run(stdin.lock().lines(), &mut renderer)
            .context("Stream processing stopped")?;

        log::info!("Finished streaming: {:?}", summary);
        Ok(summary)
    }

    /// Setup logging level and file
    fn setup_logger(args: &Args) -> Result<()> {
        let log_level = match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        simple_logging::log_to_file(args.log_file.as_str(), log_level)
            .with_context(|| format!("Unable to open log file {}", args.log_file))
    }

    /// Load settings from file and command line
    fn load_settings(args: &Args) -> Result<Settings> {
        let settings = Settings::from_args(args).context("Unable to load settings")?;
        log::info!("Loaded settings\n{}", settings);
        Ok(settings)
    }

    fn create_driver(&self) -> StreamDriver<SleepPacer> {
        let estimator = RunningTrendEstimator::with_resync_interval(
            self.settings.trend_window,
            self.settings.trend_resync_interval,
        );
        let buffers = DisplayBuffers::new(self.settings.display_window);
        StreamDriver::new(estimator, buffers, SleepPacer::new(self.settings.pacing()))
            .malformed_lines(self.settings.malformed_lines)
            .echo(self.settings.echo)
    }

    fn create_renderer(&self) -> Result<CompositeRenderer> {
        let mut renderer = CompositeRenderer::new();

        if self.settings.chart.enabled {
            let chart = ChartRenderer::new(
                self.settings.chart.output.as_str(),
                (self.settings.chart.width, self.settings.chart.height),
            )
            .context("Unable to create chart renderer")?;
            renderer.push(Box::new(chart));
        }

        if !self.args.disable_progress_bar {
            let progress = ProgressRenderer::new().context("Unable to create progress bar")?;
            renderer.push(Box::new(progress));
        }

        if renderer.is_empty() {
            log::warn!("No renderer enabled, records are only logged");
        }
        Ok(renderer)
    }
}
