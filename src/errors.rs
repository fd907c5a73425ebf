//! All errors that can stop the stream driver.

use std::fmt;
use std::io;

use crate::core::ParseError;
use crate::render::RenderError;

#[derive(Debug)]
pub enum MonitorError {
    Parse(ParseError),
    Io(io::Error),
    Render(RenderError),
}

pub type Result<T> = std::result::Result<T, MonitorError>;

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MonitorError::Parse(error) => write!(f, "{error}"),
            MonitorError::Io(error) => write!(f, "IoError: {error}"),
            MonitorError::Render(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Parse(error) => Some(error),
            MonitorError::Io(error) => Some(error),
            MonitorError::Render(error) => Some(error),
        }
    }
}

impl From<ParseError> for MonitorError {
    fn from(error: ParseError) -> Self {
        MonitorError::Parse(error)
    }
}

impl From<io::Error> for MonitorError {
    fn from(error: io::Error) -> Self {
        MonitorError::Io(error)
    }
}

impl From<RenderError> for MonitorError {
    fn from(error: RenderError) -> Self {
        MonitorError::Render(error)
    }
}
