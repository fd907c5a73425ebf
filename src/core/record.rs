//! Generation records extracted from simulation log lines.
//!
//! A record line reports the end of one generation, e.g.
//!
//! ```text
//! Generation 42 over. Survivors 7/10 (70.0%)
//! ```
//!
//! Only the generation index and the survival percentage are kept; the
//! survivor counts must be present but are ignored.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static RECORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Generation ([0-9]+) over\. Survivors [0-9]+/[0-9]+ \(([0-9.]+)%\)")
        .expect("record pattern is valid")
});

pub const MAX_SURVIVAL_RATE: f64 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub generation: u64,
    pub survival_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingPattern,
    InvalidGeneration,
    InvalidSurvivalRate,
    SurvivalRateOutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub line: String,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: &str, kind: ParseErrorKind) -> Self {
        Self {
            line: line.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self.kind {
            ParseErrorKind::MissingPattern => "no generation record found",
            ParseErrorKind::InvalidGeneration => "generation is not a valid integer",
            ParseErrorKind::InvalidSurvivalRate => "survival rate is not a valid number",
            ParseErrorKind::SurvivalRateOutOfRange => "survival rate exceeds 100%",
        };
        write!(f, "ParseError: {reason} in line {:?}", self.line)
    }
}

impl std::error::Error for ParseError {}

impl Record {
    pub fn new(generation: u64, survival_rate: f64) -> Self {
        Self {
            generation,
            survival_rate,
        }
    }

    /// Extract a record from a single log line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let captures = RECORD_PATTERN
            .captures(line)
            .ok_or_else(|| ParseError::new(line, ParseErrorKind::MissingPattern))?;

        let generation: u64 = captures[1]
            .parse()
            .map_err(|_| ParseError::new(line, ParseErrorKind::InvalidGeneration))?;
        let survival_rate: f64 = captures[2]
            .parse()
            .map_err(|_| ParseError::new(line, ParseErrorKind::InvalidSurvivalRate))?;

        if survival_rate > MAX_SURVIVAL_RATE {
            return Err(ParseError::new(line, ParseErrorKind::SurvivalRateOutOfRange));
        }

        Ok(Self::new(generation, survival_rate))
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Record::parse(line)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "generation={} survival_rate={}%",
            self.generation, self.survival_rate
        )
    }
}
