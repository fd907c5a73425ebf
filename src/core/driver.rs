//! The stream driver: one pass over the input, one frame per record.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use super::display::DisplayBuffers;
use super::pacing::Pacer;
use super::record::Record;
use super::trend::RunningTrendEstimator;
use crate::errors::Result;
use crate::render::Renderer;

/// What to do with a line that is not a generation record.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLines {
    /// Stop the stream with the parse error.
    #[default]
    Abort,
    /// Log the line and continue with the next one.
    Skip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StreamSummary {
    pub lines: u64,
    pub records: u64,
    pub skipped: u64,
    pub last: Option<Record>,
}

pub struct StreamDriver<P: Pacer> {
    estimator: RunningTrendEstimator,
    buffers: DisplayBuffers,
    pacer: P,
    malformed_lines: MalformedLines,
    echo: Option<Box<dyn Write>>,
    summary: StreamSummary,
}

impl<P: Pacer> StreamDriver<P> {
    pub fn new(estimator: RunningTrendEstimator, buffers: DisplayBuffers, pacer: P) -> Self {
        Self {
            estimator,
            buffers,
            pacer,
            malformed_lines: MalformedLines::default(),
            echo: None,
            summary: StreamSummary::default(),
        }
    }

    pub fn malformed_lines(mut self, policy: MalformedLines) -> Self {
        self.malformed_lines = policy;
        self
    }

    /// Echo every consumed line to stdout before parsing it.
    pub fn echo(self, echo: bool) -> Self {
        match echo {
            true => self.echo_to(io::stdout()),
            false => Self { echo: None, ..self },
        }
    }

    /// Echo every consumed line to `sink` before parsing it.
    pub fn echo_to(mut self, sink: impl Write + 'static) -> Self {
        self.echo = Some(Box::new(sink));
        self
    }

    /// Consume `lines` until the input ends or a line cannot be handled.
    ///
    /// Every record is folded into the trend, appended to the display buffers
    /// and handed to `renderer`; the pacer runs after each rendered frame.
    pub fn run<I, S>(&mut self, lines: I, renderer: &mut dyn Renderer) -> Result<StreamSummary>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        log::info!(
            "Streaming records (trend window {}, display window {}, malformed lines: {:?})",
            self.estimator.capacity(),
            self.buffers.capacity(),
            self.malformed_lines
        );

        for line in lines {
            let line = line?;
            self.process_line(line.as_ref(), renderer)?;
        }

        log::info!(
            "End of stream after {} lines: {} records, {} skipped",
            self.summary.lines,
            self.summary.records,
            self.summary.skipped
        );
        Ok(self.summary)
    }

    fn process_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> Result<()> {
        self.summary.lines += 1;
        log::trace!("line {}: {line:?}", self.summary.lines);
        if let Some(sink) = self.echo.as_mut() {
            writeln!(sink, "{line}")?;
        }

        let record = match Record::parse(line) {
            Ok(record) => record,
            Err(error) if self.malformed_lines == MalformedLines::Skip => {
                log::warn!("Skipping line {}: {error}", self.summary.lines);
                self.summary.skipped += 1;
                return Ok(());
            }
            Err(error) => {
                log::error!("Aborting on line {}: {error}", self.summary.lines);
                return Err(error.into());
            }
        };

        if let Some(last) = self.summary.last {
            if record.generation <= last.generation {
                log::warn!(
                    "Generation {} arrived after generation {}",
                    record.generation,
                    last.generation
                );
            }
        }

        let trend = self.estimator.observe(record.survival_rate);
        self.buffers
            .append(record.generation, record.survival_rate, trend);
        log::debug!("{record} trend={trend:.3}%");

        self.summary.records += 1;
        self.summary.last = Some(record);

        renderer.update(&self.buffers)?;
        self.pacer.pause();
        Ok(())
    }

    pub fn estimator(&self) -> &RunningTrendEstimator {
        &self.estimator
    }

    pub fn buffers(&self) -> &DisplayBuffers {
        &self.buffers
    }

    pub fn summary(&self) -> &StreamSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NoPacing, ParseErrorKind};
    use crate::errors::MonitorError;
    use crate::render::RenderError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Keeps a copy of every frame it is asked to draw.
    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Vec<(u64, f64, f64)>>,
    }

    impl Renderer for RecordingRenderer {
        fn update(&mut self, series: &DisplayBuffers) -> std::result::Result<(), RenderError> {
            self.frames.push(series.points().collect());
            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn update(&mut self, _series: &DisplayBuffers) -> std::result::Result<(), RenderError> {
            Err(RenderError::Draw("surface lost".to_string()))
        }
    }

    /// Echo sink that can still be inspected after the driver took ownership.
    #[derive(Clone, Default)]
    struct SharedSink(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn driver(trend_window: usize, display_window: usize) -> StreamDriver<NoPacing> {
        StreamDriver::new(
            RunningTrendEstimator::new(trend_window),
            DisplayBuffers::new(display_window),
            NoPacing,
        )
    }

    fn input(lines: &[&str]) -> Vec<io::Result<String>> {
        lines.iter().map(|line| Ok(line.to_string())).collect()
    }

    #[test]
    fn renders_every_record() {
        let mut renderer = RecordingRenderer::default();
        let summary = driver(1000, 500)
            .run(
                input(&[
                    "Generation 1 over. Survivors 5/10 (50.0%)",
                    "Generation 2 over. Survivors 8/10 (80.0%)",
                ]),
                &mut renderer,
            )
            .unwrap();

        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(renderer.frames[0], vec![(1, 50.0, 50.0)]);
        let last_frame = renderer.frames.last().unwrap();
        assert_eq!(last_frame.last().unwrap().2, 65.0);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.last, Some(Record::new(2, 80.0)));
    }

    #[test]
    fn aborts_on_malformed_line() {
        let mut renderer = RecordingRenderer::default();
        let mut driver = driver(1000, 500);
        let result = driver.run(
            input(&[
                "Generation 1 over. Survivors 5/10 (50.0%)",
                "not a log line",
                "Generation 2 over. Survivors 8/10 (80.0%)",
            ]),
            &mut renderer,
        );

        match result {
            Err(MonitorError::Parse(error)) => {
                assert_eq!(error.kind, ParseErrorKind::MissingPattern);
                assert_eq!(error.line, "not a log line");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(driver.summary().lines, 2);
        assert_eq!(driver.buffers().len(), 1);
    }

    #[test]
    fn skips_malformed_lines_when_asked() {
        let mut renderer = RecordingRenderer::default();
        let mut driver = driver(1000, 500).malformed_lines(MalformedLines::Skip);
        let summary = driver
            .run(
                input(&[
                    "Generation 1 over. Survivors 5/10 (50.0%)",
                    "Generation completed. Survivors:",
                    "Generation 2 over. Survivors 8/10 (80.0%)",
                ]),
                &mut renderer,
            )
            .unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(driver.estimator().mean(), Some(65.0));
    }

    #[test]
    fn windows_stay_bounded() {
        let lines: Vec<io::Result<String>> = (0..50)
            .map(|generation| {
                Ok(format!(
                    "Generation {generation} over. Survivors {generation}/50 ({}%)",
                    generation * 2
                ))
            })
            .collect();
        let mut renderer = RecordingRenderer::default();
        let mut driver = driver(4, 3);
        driver.run(lines, &mut renderer).unwrap();

        assert_eq!(renderer.frames.len(), 50);
        assert!(renderer.frames.iter().all(|frame| frame.len() <= 3));
        assert_eq!(driver.estimator().len(), 4);
        assert_eq!(
            renderer.frames.last().unwrap(),
            &vec![(47, 94.0, 91.0), (48, 96.0, 93.0), (49, 98.0, 95.0)]
        );
    }

    #[test]
    fn accepts_out_of_order_generations() {
        let mut renderer = RecordingRenderer::default();
        let summary = driver(10, 10)
            .run(
                input(&[
                    "Generation 5 over. Survivors 1/2 (50.0%)",
                    "Generation 3 over. Survivors 1/4 (25.0%)",
                ]),
                &mut renderer,
            )
            .unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(renderer.frames[1], vec![(5, 50.0, 50.0), (3, 25.0, 37.5)]);
    }

    #[test]
    fn pacer_runs_after_each_frame() {
        let mut pauses = 0;
        let mut renderer = RecordingRenderer::default();
        {
            let mut driver = StreamDriver::new(
                RunningTrendEstimator::new(3),
                DisplayBuffers::new(3),
                || pauses += 1,
            )
            .malformed_lines(MalformedLines::Skip);
            driver
                .run(
                    input(&[
                        "Generation 1 over. Survivors 1/2 (50.0%)",
                        "noise",
                        "Generation 2 over. Survivors 1/2 (50.0%)",
                    ]),
                    &mut renderer,
                )
                .unwrap();
        }
        assert_eq!(pauses, 2);
    }

    #[test]
    fn stops_on_read_error() {
        let lines: Vec<io::Result<String>> = vec![
            Ok("Generation 1 over. Survivors 1/2 (50.0%)".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "stream is not utf-8")),
            Ok("Generation 2 over. Survivors 1/2 (50.0%)".to_string()),
        ];
        let mut renderer = RecordingRenderer::default();
        let result = driver(3, 3).run(lines, &mut renderer);
        assert!(matches!(result, Err(MonitorError::Io(_))));
        assert_eq!(renderer.frames.len(), 1);
    }

    #[test]
    fn stops_on_render_error() {
        let result = driver(3, 3).run(
            input(&["Generation 1 over. Survivors 1/2 (50.0%)"]),
            &mut FailingRenderer,
        );
        assert!(matches!(result, Err(MonitorError::Render(_))));
    }

    #[test]
    fn empty_input() {
        let mut renderer = RecordingRenderer::default();
        let summary = driver(3, 3).run(input(&[]), &mut renderer).unwrap();
        assert_eq!(summary, StreamSummary::default());
        assert!(renderer.frames.is_empty());
    }

    #[test]
    fn echoes_every_line() {
        let sink = SharedSink::default();
        let mut renderer = RecordingRenderer::default();
        let summary = driver(3, 3)
            .malformed_lines(MalformedLines::Skip)
            .echo_to(sink.clone())
            .run(
                input(&[
                    "Generation 1 over. Survivors 5/10 (50.0%)",
                    "noise",
                    "Generation 2 over. Survivors 8/10 (80.0%)",
                ]),
                &mut renderer,
            )
            .unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(
            String::from_utf8(sink.0.borrow().clone()).unwrap(),
            "Generation 1 over. Survivors 5/10 (50.0%)\n\
             noise\n\
             Generation 2 over. Survivors 8/10 (80.0%)\n"
        );
    }

    #[test]
    fn stops_when_echo_fails() {
        let mut renderer = RecordingRenderer::default();
        let result = driver(3, 3).echo_to(ClosedSink).run(
            input(&["Generation 1 over. Survivors 5/10 (50.0%)"]),
            &mut renderer,
        );

        assert!(matches!(result, Err(MonitorError::Io(_))));
        assert!(renderer.frames.is_empty());
    }

    #[test]
    fn echo_can_be_disabled() {
        let sink = SharedSink::default();
        let mut renderer = RecordingRenderer::default();
        driver(3, 3)
            .echo_to(sink.clone())
            .echo(false)
            .run(
                input(&["Generation 1 over. Survivors 5/10 (50.0%)"]),
                &mut renderer,
            )
            .unwrap();

        assert!(sink.0.borrow().is_empty());
        assert_eq!(renderer.frames.len(), 1);
    }
}
