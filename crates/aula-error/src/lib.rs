//! aula-error - Diagnostics for the Aula analyzer
//!
//! Spans, diagnostic messages and a terminal renderer shared by the lexer,
//! the parser and the CLI. Analysis never fails hard: problems accumulate in
//! a [`Diagnostics`] collection in discovery order and the caller decides how
//! to present them.
//!
//! # Example
//!
//! ```rust
//! use aula_error::{Diagnostic, DiagnosticRenderer, ErrorCode, SourceCache};
//! use aula_error::span::{Position, Span};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("demo.aula", "programa p(){ end; }");
//!
//! let span = Span::new(Position::new(1, 15, 14), Position::new(1, 18, 17), file_id);
//! let diagnostic = Diagnostic::error("missing ';' after 'end'")
//!     .with_code(ErrorCode::UnexpectedToken)
//!     .with_label(span, "expected ';' here");
//!
//! let renderer = DiagnosticRenderer::new(&cache);
//! println!("{}", renderer.render(&diagnostic));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, Level, SourceCache, SourceFile};
pub use span::{Position, Span};

/// Diagnostics accumulated during one analysis, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.level == Level::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Renders every diagnostic, separated by blank lines.
    pub fn render(&self, cache: &SourceCache) -> String {
        let renderer = DiagnosticRenderer::new(cache);
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn diagnostics_preserve_discovery_order() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::error("first"));
        diags.push(Diagnostic::error("second"));

        let messages: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(diags.has_errors());
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn empty_diagnostics_have_no_errors() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert!(!diags.has_errors());
    }
}
