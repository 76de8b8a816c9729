//! Diagnostic messages with precise source locations.
//!
//! Diagnostics carry a code, a main message, labels pointing into the source
//! and optional fix hints. `DiagnosticRenderer` turns them into rustc-style
//! terminal output using a `SourceCache` for the snippets.

use crate::span::Span;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }

    fn ansi(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",
            Level::Warning => "\x1b[1;33m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable code identifying each class of syntax problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A grammar production required a specific token and found another
    UnexpectedToken,
    /// Lookahead at a statement boundary matched no statement production
    InvalidStatement,
    /// An expression ended early or a factor matched nothing
    ExpectedExpression,
    /// Tokens remained after the program block was closed
    TrailingTokens,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedToken => "EP001",
            ErrorCode::InvalidStatement => "EP002",
            ErrorCode::ExpectedExpression => "EP003",
            ErrorCode::TrailingTokens => "EP004",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message anchored to a region of the source.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

/// A complete diagnostic, built with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub helps: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            helps: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }
}

/// A source file registered for diagnostic rendering.
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset of the start of each line
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Content of a 1-indexed line, without its newline.
    pub fn line(&self, line: u32) -> Option<&str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next.saturating_sub(1))
            .unwrap_or(self.source.len());
        Some(&self.source[start..end])
    }
}

/// Registry of source files, keyed by the `file_id` stored in spans.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file and returns its id.
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders diagnostics as terminal text.
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self { cache, colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.colors = false;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.colors {
            code
        } else {
            ""
        }
    }

    /// Renders one diagnostic, including the source snippet for each label.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        let reset = self.paint("\x1b[0m");
        let bold = self.paint("\x1b[1m");
        let accent = if self.colors { diagnostic.level.ansi() } else { "" };

        // error[EP001]: message
        out.push_str(&format!("{accent}{}", diagnostic.level));
        if let Some(code) = diagnostic.code {
            out.push_str(&format!("[{code}]"));
        }
        out.push_str(&format!("{reset}{bold}: {}{reset}\n", diagnostic.message));

        for label in &diagnostic.labels {
            self.render_label(&mut out, label, accent);
        }

        for help in &diagnostic.helps {
            let green = self.paint("\x1b[1;32m");
            out.push_str(&format!("  = {green}help{reset}: {help}\n"));
        }

        out
    }

    fn render_label(&self, out: &mut String, label: &Label, accent: &str) {
        let Some(file) = self.cache.get(label.span.file_id) else {
            return;
        };
        let reset = self.paint("\x1b[0m");
        let blue = self.paint("\x1b[1;34m");
        let line_no = label.span.start.line;

        out.push_str(&format!(
            " {blue}-->{reset} {}:{}:{}\n",
            file.name, line_no, label.span.start.column
        ));

        let Some(content) = file.line(line_no) else {
            return;
        };
        let gutter = " ".repeat(line_no.to_string().len());

        out.push_str(&format!(" {gutter} {blue}|{reset}\n"));
        out.push_str(&format!(" {blue}{line_no} |{reset} {content}\n"));

        // Caret line under the labelled region
        let col = label.span.start.column.max(1) as usize;
        let width = if label.span.start.line == label.span.end.line {
            (label.span.end.column.saturating_sub(label.span.start.column)).max(1) as usize
        } else {
            content.len().saturating_sub(col - 1).max(1)
        };
        let pad = " ".repeat(col - 1);
        let carets = "^".repeat(width);
        out.push_str(&format!(
            " {gutter} {blue}|{reset} {pad}{accent}{carets}{reset} {}\n",
            label.message
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;
    use pretty_assertions::assert_eq;

    fn span_on(line: u32, col: u32, offset: usize, len: usize) -> Span {
        Span::new(
            Position::new(line, col, offset),
            Position::new(line, col + len as u32, offset + len),
            0,
        )
    }

    #[test]
    fn renders_code_location_and_caret() {
        let mut cache = SourceCache::new();
        cache.add("sum.aula", "programa suma(){\n  int a\n}");

        let diagnostic = Diagnostic::error("missing ';' at the end of the declaration")
            .with_code(ErrorCode::UnexpectedToken)
            .with_label(span_on(2, 7, 23, 1), "expected ';' here")
            .with_help("terminate the declaration with ';'");

        let rendered = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);

        assert!(rendered.contains("error[EP001]"));
        assert!(rendered.contains("sum.aula:2:7"));
        assert!(rendered.contains("int a"));
        assert!(rendered.contains("^"));
        assert!(rendered.contains("help: terminate the declaration with ';'"));
    }

    #[test]
    fn renders_without_snippet_when_file_unknown() {
        let cache = SourceCache::new();
        let diagnostic = Diagnostic::error("unexpected end of input");
        let rendered = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);
        assert_eq!(rendered, "error: unexpected end of input\n");
    }
}
