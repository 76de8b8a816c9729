//! Tokens for the Aula language
//!
//! Every token keeps the exact source text it matched (its lexeme) next to
//! its category, so presentation layers can rebuild token tables without
//! touching the source again.

use aula_error::Span;
use std::fmt;

/// The fixed reserved-word set of the language.
///
/// Matching is ASCII case-insensitive; the token lexeme keeps whatever
/// casing the source used.
pub const RESERVED_WORDS: [&str; 16] = [
    "programa", "int", "float", "double", "char", "void", "for", "while", "if", "else", "read",
    "printf", "end", "return", "system", "print",
];

/// Returns true if `ident` names a reserved word, ignoring ASCII case.
pub fn is_reserved_word(ident: &str) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(ident))
}

/// Category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier-shaped lexeme matching the reserved-word set
    ReservedWord,
    /// `[A-Za-z_]` followed by ASCII word characters
    Identifier,
    /// `"..."` on a single line, quotes included in the lexeme
    StringLiteral,
    /// Digits with an optional fractional part
    Number,
    /// Arithmetic, relational and increment symbols
    Operator,
    /// One of `; ( ) , { } . [ ]`
    Delimiter,
    /// A single character matching no other pattern; never fatal
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::ReservedWord => "reserved word",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A classified piece of source text with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact matched text, original casing preserved
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// 1-based line of the first character.
    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    /// 1-based column of the first character.
    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    /// True when the token is a reserved word with exactly this lexeme.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::ReservedWord && self.lexeme == word
    }

    /// True when the token is a delimiter or operator with this symbol.
    pub fn is_symbol(&self, kind: TokenKind, symbol: &str) -> bool {
        self.kind == kind && self.lexeme == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}('{}') at {}:{}",
            self.kind,
            self.lexeme,
            self.line(),
            self.column()
        )
    }
}

/// Aggregated token counts, one pass over a token slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenSummary {
    pub reserved_words: usize,
    pub identifiers: usize,
    pub delimiters: usize,
    pub operators: usize,
    pub numbers: usize,
    /// Every emitted token, including strings and unknowns
    pub total: usize,
}

impl TokenSummary {
    pub fn of(tokens: &[Token]) -> Self {
        let mut summary = Self {
            total: tokens.len(),
            ..Self::default()
        };

        for token in tokens {
            match token.kind {
                TokenKind::ReservedWord => summary.reserved_words += 1,
                TokenKind::Identifier => summary.identifiers += 1,
                TokenKind::Delimiter => summary.delimiters += 1,
                TokenKind::Operator => summary.operators += 1,
                TokenKind::Number => summary.numbers += 1,
                TokenKind::StringLiteral | TokenKind::Unknown => {}
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_error::{Position, Span};
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::point(Position::new(1, 1, 0), 0))
    }

    #[test]
    fn reserved_word_lookup_ignores_case() {
        assert!(is_reserved_word("programa"));
        assert!(is_reserved_word("PRINTF"));
        assert!(is_reserved_word("End"));
        assert!(!is_reserved_word("main"));
        assert!(!is_reserved_word("prog"));
    }

    #[test]
    fn summary_counts_by_kind() {
        let tokens = vec![
            tok(TokenKind::ReservedWord, "int"),
            tok(TokenKind::Identifier, "a"),
            tok(TokenKind::Operator, "="),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Delimiter, ";"),
            tok(TokenKind::StringLiteral, "\"hi\""),
            tok(TokenKind::Unknown, "#"),
        ];

        let summary = TokenSummary::of(&tokens);
        assert_eq!(
            summary,
            TokenSummary {
                reserved_words: 1,
                identifiers: 1,
                delimiters: 1,
                operators: 1,
                numbers: 1,
                total: 7,
            }
        );
    }

    #[test]
    fn word_and_symbol_checks_are_exact() {
        let end = tok(TokenKind::ReservedWord, "end");
        assert!(end.is_word("end"));
        assert!(!end.is_word("End"));

        let semi = tok(TokenKind::Delimiter, ";");
        assert!(semi.is_symbol(TokenKind::Delimiter, ";"));
        assert!(!semi.is_symbol(TokenKind::Operator, ";"));
    }
}
