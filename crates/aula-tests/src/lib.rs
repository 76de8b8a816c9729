//! Integration tests for the Aula analyzer
//!
//! End-to-end testing of the full analysis pipeline:
//! Source → Lexer → Parser → ParseResult

use aula_lexer::{tokenize, Token, TokenSummary};
use aula_parser::{parse, ParseResult};

/// Result of analyzing one source text through the full pipeline.
#[derive(Debug)]
pub struct Analysis {
    /// Every emitted token, in source order
    pub tokens: Vec<Token>,
    /// Aggregated counts over the token sequence
    pub summary: TokenSummary,
    /// Outcome of the syntactic analysis
    pub result: ParseResult,
}

/// Runs lexical and syntactic analysis on `source`.
pub fn analyze(source: &str) -> Analysis {
    let tokens = tokenize(source, 0);
    let summary = TokenSummary::of(&tokens);
    let result = parse(&tokens);
    Analysis {
        tokens,
        summary,
        result,
    }
}

/// Asserts that `source` parses without diagnostics.
pub fn assert_valid(source: &str) {
    let analysis = analyze(source);
    if !analysis.result.is_valid {
        panic!(
            "expected source to be valid, but got diagnostics:\n{:#?}",
            analysis.result.messages()
        );
    }
}

/// Asserts that `source` produces at least one diagnostic.
pub fn assert_invalid(source: &str) {
    let analysis = analyze(source);
    if analysis.result.is_valid {
        panic!("expected source to be invalid, but it parsed cleanly");
    }
}
