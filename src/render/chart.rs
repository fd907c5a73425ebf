//! Two-line survival chart drawn with plotters.
//!
//! Every frame redraws the whole chart from the display series and replaces
//! the output image. SVG frames are rendered in memory and moved into place,
//! so a viewer polling the file never reads a half-written frame. Paths ending
//! in `.png` go through the bitmap backend instead.

use itertools::{Itertools, MinMaxResult};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ffi::OsString;
use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use super::{RenderError, Renderer};
use crate::core::DisplayBuffers;

const BACKGROUND: RGBColor = RGBColor(0x12, 0x16, 0x1e);
const FOREGROUND: RGBColor = RGBColor(0xcc, 0xcc, 0xcc);
const RAW_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const TREND_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);

const FONT: &str = "sans-serif";

pub struct ChartRenderer {
    output: PathBuf,
    size: (u32, u32),
    frames: u64,
}

impl ChartRenderer {
    pub fn new(output: impl Into<PathBuf>, size: (u32, u32)) -> Result<Self, RenderError> {
        let output = output.into();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        log::info!(
            "Drawing chart to {} ({}x{})",
            output.display(),
            size.0,
            size.1
        );
        Ok(Self {
            output,
            size,
            frames: 0,
        })
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn is_bitmap(&self) -> bool {
        self.output
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("png"))
    }

    fn draw_svg(&self, series: &DisplayBuffers) -> Result<(), RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size).into_drawing_area();
            draw_chart(&root, series).map_err(draw_error)?;
        }

        let mut staging = OsString::from(self.output.as_os_str());
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        fs::write(&staging, svg)?;
        fs::rename(&staging, &self.output)?;
        Ok(())
    }

    fn draw_bitmap(&self, series: &DisplayBuffers) -> Result<(), RenderError> {
        let root = BitMapBackend::new(&self.output, self.size).into_drawing_area();
        draw_chart(&root, series).map_err(draw_error)
    }
}

impl Renderer for ChartRenderer {
    fn update(&mut self, series: &DisplayBuffers) -> Result<(), RenderError> {
        if self.is_bitmap() {
            self.draw_bitmap(series)?;
        } else {
            self.draw_svg(series)?;
        }
        self.frames += 1;
        log::trace!(
            "Presented frame {} with {} points to {}",
            self.frames,
            series.len(),
            self.output.display()
        );
        Ok(())
    }
}

fn draw_error<E>(error: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw(error.to_string())
}

/// Widen a degenerate range so plotters always gets a non-empty axis.
fn padded(low: f64, high: f64) -> Range<f64> {
    let span = high - low;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (low - pad)..(high + pad)
}

/// Axis ranges covering every generation and both value series.
pub fn axis_ranges(series: &DisplayBuffers) -> (Range<f64>, Range<f64>) {
    let x_range = match series.generations().iter().minmax() {
        MinMaxResult::NoElements => 0.0..1.0,
        MinMaxResult::OneElement(&generation) => {
            (generation as f64 - 1.0)..(generation as f64 + 1.0)
        }
        MinMaxResult::MinMax(&first, &last) if first == last => {
            (first as f64 - 1.0)..(last as f64 + 1.0)
        }
        MinMaxResult::MinMax(&first, &last) => first as f64..last as f64,
    };

    let y_range = match series.raw().iter().chain(series.trend().iter()).minmax() {
        MinMaxResult::NoElements => 0.0..100.0,
        MinMaxResult::OneElement(&value) => padded(value, value),
        MinMaxResult::MinMax(&low, &high) => padded(low, high),
    };

    (x_range, y_range)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &DisplayBuffers,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&BACKGROUND)?;
    if series.is_empty() {
        return root.present();
    }

    let (x_range, y_range) = axis_ranges(series);
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Survival Rate (%)")
        .axis_style(FOREGROUND)
        .bold_line_style(FOREGROUND.mix(0.1))
        .light_line_style(BACKGROUND)
        .label_style((FONT, 14).into_font().color(&FOREGROUND))
        .axis_desc_style((FONT, 16).into_font().color(&FOREGROUND))
        .draw()?;

    let generations = || series.generations().iter().map(|&generation| generation as f64);
    chart
        .draw_series(LineSeries::new(
            generations().zip(series.raw().iter().copied()),
            RAW_COLOR.stroke_width(2),
        ))?
        .label("survival rate")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RAW_COLOR));
    chart
        .draw_series(LineSeries::new(
            generations().zip(series.trend().iter().copied()),
            TREND_COLOR.stroke_width(2),
        ))?
        .label("trend")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TREND_COLOR));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(BACKGROUND.mix(0.8))
        .border_style(FOREGROUND)
        .label_font((FONT, 14).into_font().color(&FOREGROUND))
        .draw()?;

    root.present()
}
