//! Output formats.

use std::io::{self, Write};

use serde::Serialize;
use tickmark_core::{AnsiRenderer, HtmlRenderer, RenderError, SegmentLog, Sink, Style};
use tracing::warn;

use crate::config::Format;

/// One line of `jsonl` output.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Text { style: Style, text: &'a str },
    End { style: Style },
}

/// Writes every sink call as a JSON object on its own line.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn flush(&mut self) {
        if self.error.is_none() {
            if let Err(err) = self.out.flush() {
                self.error = Some(err);
            }
        }
    }

    pub fn finish(mut self) -> Result<W, RenderError> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write(&mut self, record: &Record<'_>) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, record)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = result {
            warn!(error = %err, "jsonl output failed; dropping further output");
            self.error = Some(err);
        }
    }
}

impl<W: Write> Sink for JsonLinesRenderer<W> {
    fn emit(&mut self, style: Style, text: &str) {
        self.write(&Record::Text { style, text });
    }

    fn end_segment(&mut self, style: Style) {
        self.write(&Record::End { style });
    }
}

/// Sink for the selected [`Format`].
#[derive(Debug)]
pub enum Renderer<W: Write> {
    Html(HtmlRenderer<W>),
    Ansi(AnsiRenderer<W>),
    Jsonl(JsonLinesRenderer<W>),
    Segments(SegmentLog, W),
}

impl<W: Write> Renderer<W> {
    pub fn new(format: Format, out: W) -> Self {
        match format {
            Format::Html => Self::Html(HtmlRenderer::new(out)),
            Format::Ansi => Self::Ansi(AnsiRenderer::new(out)),
            Format::Jsonl => Self::Jsonl(JsonLinesRenderer::new(out)),
            Format::Segments => Self::Segments(SegmentLog::new(), out),
        }
    }

    /// Make output written so far visible.
    pub fn flush(&mut self) {
        match self {
            Self::Html(renderer) => renderer.flush(),
            Self::Ansi(renderer) => renderer.flush(),
            Self::Jsonl(renderer) => renderer.flush(),
            // Printed in one go by `finish`
            Self::Segments(..) => {}
        }
    }

    pub fn finish(self) -> Result<W, RenderError> {
        match self {
            Self::Html(renderer) => renderer.finish(),
            Self::Ansi(renderer) => {
                let mut out = renderer.finish()?;
                out.write_all(b"\n")?;
                Ok(out)
            }
            Self::Jsonl(renderer) => renderer.finish(),
            Self::Segments(log, mut out) => {
                for segment in log.segments() {
                    writeln!(out, "{:<11} {:?}", segment.style, segment.text)?;
                }
                if let Some(open) = log.open_segment() {
                    writeln!(out, "{:<11} {:?} (unterminated)", open.style, open.text)?;
                }
                out.flush()?;
                Ok(out)
            }
        }
    }
}

impl<W: Write> Sink for Renderer<W> {
    fn emit(&mut self, style: Style, text: &str) {
        match self {
            Self::Html(renderer) => renderer.emit(style, text),
            Self::Ansi(renderer) => renderer.emit(style, text),
            Self::Jsonl(renderer) => renderer.emit(style, text),
            Self::Segments(log, _) => log.emit(style, text),
        }
    }

    fn end_segment(&mut self, style: Style) {
        match self {
            Self::Html(renderer) => renderer.end_segment(style),
            Self::Ansi(renderer) => renderer.end_segment(style),
            Self::Jsonl(renderer) => renderer.end_segment(style),
            Self::Segments(log, _) => log.end_segment(style),
        }
    }
}
