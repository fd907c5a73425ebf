//! Drawing surfaces fed by the stream driver.

mod chart;
mod progress;

pub use chart::{ChartRenderer, axis_ranges};
pub use progress::ProgressRenderer;

use std::fmt;
use std::io;

use crate::core::DisplayBuffers;

/// Replaces whatever it shows with the given series and presents the frame.
pub trait Renderer {
    fn update(&mut self, series: &DisplayBuffers) -> Result<(), RenderError>;
}

#[derive(Debug)]
pub enum RenderError {
    Draw(String),
    Io(io::Error),
    Template(indicatif::style::TemplateError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::Draw(message) => write!(f, "RenderError: {message}"),
            RenderError::Io(error) => write!(f, "RenderError: {error}"),
            RenderError::Template(error) => write!(f, "RenderError: {error}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<io::Error> for RenderError {
    fn from(error: io::Error) -> Self {
        RenderError::Io(error)
    }
}

/// Forwards every frame to each contained renderer in order.
#[derive(Default)]
pub struct CompositeRenderer {
    renderers: Vec<Box<dyn Renderer>>,
}

impl CompositeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.push(renderer);
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Renderer for CompositeRenderer {
    fn update(&mut self, series: &DisplayBuffers) -> Result<(), RenderError> {
        self.renderers
            .iter_mut()
            .try_for_each(|renderer| renderer.update(series))
    }
}
