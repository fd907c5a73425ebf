//! This module contains the streaming pipeline: parsing, trend estimation
//! and the bounded display series.

mod display;
mod driver;
mod pacing;
mod record;
mod trend;
pub mod window;

pub use display::DisplayBuffers;
pub use driver::{MalformedLines, StreamDriver, StreamSummary};
pub use pacing::{NoPacing, Pacer, SleepPacer};
pub use record::{ParseError, ParseErrorKind, Record};
pub use trend::RunningTrendEstimator;
pub use window::RingBuffer;
