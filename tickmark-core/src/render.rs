//! Writer-backed renderers.
//!
//! Both renderers are [`Sink`]s that write as text arrives, so a terminal
//! or a streamed HTML response updates while a code block is still open.
//!
//! Sinks cannot fail, so the first I/O error is latched: later writes are
//! skipped and the error is returned from `finish`.

use std::borrow::Cow;
use std::io::{self, Write};

use tracing::warn;

use crate::error::RenderError;
use crate::event::{Sink, Style};

// ============================================================================
// Shared writer state
// ============================================================================

#[derive(Debug)]
struct Output<W: Write> {
    out: W,
    error: Option<io::Error>,
    /// Whether the last byte written was a newline (or nothing was written)
    at_line_start: bool,
}

impl<W: Write> Output<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            error: None,
            at_line_start: true,
        }
    }

    fn write(&mut self, text: &str) {
        if self.error.is_some() || text.is_empty() {
            return;
        }
        match self.out.write_all(text.as_bytes()) {
            Ok(()) => self.at_line_start = text.ends_with('\n'),
            Err(err) => {
                warn!(error = %err, "render output failed; dropping further output");
                self.error = Some(err);
            }
        }
    }

    fn flush(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.out.flush() {
            warn!(error = %err, "render output flush failed; dropping further output");
            self.error = Some(err);
        }
    }

    fn finish(mut self) -> Result<W, RenderError> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

// ============================================================================
// HTML
// ============================================================================

/// Inline style for inline code spans.
pub const INLINE_CODE_CSS: &str =
    "background-color:#f0f0f0;font-family:monospace;padding:2px 4px;border-radius:3px";

/// Inline style for code blocks.
pub const CODE_BLOCK_CSS: &str = "display:block;background-color:#f5f5f5;font-family:monospace;\
     padding:10px;margin:10px 0;border-radius:5px;white-space:pre";

/// Renders segments as `<span>` elements.
///
/// Each segment becomes one span; the opening tag is written with the first
/// text and the closing tag when the segment ends.
#[derive(Debug)]
pub struct HtmlRenderer<W: Write> {
    output: Output<W>,
    open: Option<Style>,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            output: Output::new(out),
            open: None,
        }
    }

    /// Flush the writer so a partial segment becomes visible.
    pub fn flush(&mut self) {
        self.output.flush();
    }

    /// Close a dangling span and return the writer.
    pub fn finish(mut self) -> Result<W, RenderError> {
        if self.open.take().is_some() {
            self.output.write("</span>");
        }
        self.output.finish()
    }

    fn open_tag(style: Style) -> Cow<'static, str> {
        match style {
            Style::Plain => Cow::Borrowed("<span>"),
            Style::InlineCode => Cow::Owned(format!("<span style=\"{}\">", INLINE_CODE_CSS)),
            Style::CodeBlock => Cow::Owned(format!("<span style=\"{}\">", CODE_BLOCK_CSS)),
        }
    }
}

impl<W: Write> Sink for HtmlRenderer<W> {
    fn emit(&mut self, style: Style, text: &str) {
        if self.open != Some(style) {
            if self.open.is_some() {
                self.output.write("</span>");
            }
            self.output.write(&Self::open_tag(style));
            self.open = Some(style);
        }
        self.output.write(&escape_html(text));
    }

    fn end_segment(&mut self, _style: Style) {
        if self.open.take().is_some() {
            self.output.write("</span>");
        }
    }
}

/// Escape text for use inside an HTML element or quoted attribute.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

// ============================================================================
// ANSI terminal
// ============================================================================

const RESET: &str = "\x1b[0m";
/// Dark text on a light grey background.
const CODE_ON: &str = "\x1b[38;5;235;48;5;254m";
/// Dim gutter drawn before each code block line.
const GUTTER: &str = "\x1b[2m│\x1b[0m ";

/// Renders segments for a 256-colour terminal.
///
/// Inline code gets a light background; code blocks start on their own
/// line, keep their whitespace, and carry a gutter on every line.
#[derive(Debug)]
pub struct AnsiRenderer<W: Write> {
    output: Output<W>,
    open: Option<Style>,
    /// Inside a code block, at the start of a line that has no gutter yet
    block_line_start: bool,
}

impl<W: Write> AnsiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            output: Output::new(out),
            open: None,
            block_line_start: false,
        }
    }

    /// Flush the writer so a partial segment becomes visible.
    pub fn flush(&mut self) {
        self.output.flush();
    }

    /// End any open segment and return the writer.
    pub fn finish(mut self) -> Result<W, RenderError> {
        if let Some(style) = self.open {
            self.end_segment(style);
        }
        self.output.finish()
    }

    fn start(&mut self, style: Style) {
        match style {
            Style::Plain => {}
            Style::InlineCode => self.output.write(CODE_ON),
            Style::CodeBlock => {
                if !self.output.at_line_start {
                    self.output.write("\n");
                }
                self.block_line_start = true;
            }
        }
        self.open = Some(style);
    }

    fn write_block(&mut self, text: &str) {
        for piece in text.split_inclusive('\n') {
            if self.block_line_start {
                self.output.write(GUTTER);
                self.output.write(CODE_ON);
                self.block_line_start = false;
            }
            match piece.strip_suffix('\n') {
                Some(line) => {
                    self.output.write(line);
                    self.output.write(RESET);
                    self.output.write("\n");
                    self.block_line_start = true;
                }
                None => self.output.write(piece),
            }
        }
    }
}

impl<W: Write> Sink for AnsiRenderer<W> {
    fn emit(&mut self, style: Style, text: &str) {
        if self.open != Some(style) {
            if let Some(previous) = self.open {
                self.end_segment(previous);
            }
            self.start(style);
        }
        match style {
            Style::CodeBlock => self.write_block(text),
            Style::Plain | Style::InlineCode => self.output.write(text),
        }
    }

    fn end_segment(&mut self, _style: Style) {
        match self.open.take() {
            Some(Style::InlineCode) => self.output.write(RESET),
            Some(Style::CodeBlock) => {
                if !self.block_line_start {
                    self.output.write(RESET);
                    self.output.write("\n");
                }
                self.block_line_start = false;
            }
            Some(Style::Plain) | None => {}
        }
    }
}
