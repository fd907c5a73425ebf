use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None, name = "survival-trend")]
pub struct Args {
    /// Path to settings (yaml file).
    #[clap(long, short)]
    pub settings: Option<String>,

    /// Number of most recent points kept on the chart.
    #[clap(long)]
    pub display_window: Option<usize>,

    /// Number of most recent observations averaged into the trend.
    #[clap(long)]
    pub trend_window: Option<usize>,

    /// Delay between two processed lines in milliseconds.
    #[clap(long)]
    pub pacing_ms: Option<u64>,

    /// Path of the chart image (.svg or .png).
    #[clap(long, short)]
    pub output: Option<String>,

    /// Skip lines that are not generation records instead of aborting.
    #[clap(long)]
    pub skip_malformed: bool,

    /// Do not draw the chart.
    #[clap(long)]
    pub no_chart: bool,

    /// Do not echo consumed lines to stdout.
    #[clap(long)]
    pub no_echo: bool,

    /// Disable the progress spinner.
    #[clap(long)]
    pub disable_progress_bar: bool,

    /// Path to log file.
    #[clap(long, default_value = "survival-trend.log")]
    pub log_file: String,

    /// Increase logging verbosity.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
