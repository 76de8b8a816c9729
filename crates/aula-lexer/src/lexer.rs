//! Lexer for the Aula language
//!
//! Converts source text into a sequence of classified tokens. Scanning never
//! fails: characters matching no pattern are emitted as one-character
//! `Unknown` tokens so the caller always receives a complete sequence.

use crate::token::{is_reserved_word, Token, TokenKind};
use aula_error::{Position, Span};

/// Two-character operators, tried before their one-character prefixes.
const DOUBLE_OPERATORS: [[char; 2]; 6] = [
    ['<', '='],
    ['>', '='],
    ['=', '='],
    ['!', '='],
    ['+', '+'],
    ['-', '-'],
];

/// The Aula language lexer.
///
/// A cursor over the source characters that tracks line, column and byte
/// offset incrementally, so token positions never require a re-scan.
pub struct Lexer {
    /// Source characters
    chars: Vec<char>,
    /// Current index into `chars`
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Current column (1-indexed)
    column: u32,
    /// Byte offset of the cursor
    offset: usize,
    /// Source file id for spans
    file_id: u32,
}

impl Lexer {
    pub fn new(source: &str, file_id: u32) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            offset: 0,
            file_id,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    fn make_span(&self, start: Position) -> Span {
        Span::new(start, self.current_position(), self.file_id)
    }

    /// Skips whitespace runs and `//` line comments, in any interleaving.
    fn skip_trivia(&mut self) {
        loop {
            while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
                self.advance();
            }
            if self.peek() == Some('/') && self.peek_next() == Some('/') {
                while matches!(self.peek(), Some(ch) if ch != '\n') {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Reads digits with an optional `.digits` fraction.
    ///
    /// The dot is only consumed when a digit follows; `12.` lexes as the
    /// number `12` and a `.` delimiter.
    fn read_number(&mut self) -> Token {
        let start = self.current_position();
        let mut lexeme = String::new();

        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
            lexeme.push(self.advance().unwrap());
        }

        if self.peek() == Some('.') && self.peek_next().map_or(false, |ch| ch.is_ascii_digit()) {
            lexeme.push(self.advance().unwrap());
            while matches!(self.peek(), Some(ch) if ch.is_ascii_digit()) {
                lexeme.push(self.advance().unwrap());
            }
        }

        Token::new(TokenKind::Number, lexeme, self.make_span(start))
    }

    /// Reads a `"..."` literal confined to one line, quotes included.
    ///
    /// Without a closing quote before the end of the line there is no string
    /// to match: the opening quote alone degrades to `Unknown` and scanning
    /// resumes right after it.
    fn read_string(&mut self) -> Token {
        let start = self.current_position();

        let mut look = self.pos + 1;
        let mut closed = false;
        while let Some(&ch) = self.chars.get(look) {
            match ch {
                '"' => {
                    closed = true;
                    break;
                }
                '\n' => break,
                _ => look += 1,
            }
        }

        if !closed {
            self.advance();
            return Token::new(TokenKind::Unknown, "\"", self.make_span(start));
        }

        let mut lexeme = String::new();
        lexeme.push(self.advance().unwrap()); // opening quote
        while let Some(ch) = self.advance() {
            lexeme.push(ch);
            if ch == '"' {
                break;
            }
        }

        Token::new(TokenKind::StringLiteral, lexeme, self.make_span(start))
    }

    /// Reads an identifier, reclassifying reserved words afterwards.
    ///
    /// The lexeme keeps the source casing; only the kind changes.
    fn read_identifier(&mut self) -> Token {
        let start = self.current_position();
        let mut lexeme = String::new();

        while matches!(self.peek(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_') {
            lexeme.push(self.advance().unwrap());
        }

        let kind = if is_reserved_word(&lexeme) {
            TokenKind::ReservedWord
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, lexeme, self.make_span(start))
    }

    /// Matches operator symbols, two-character forms first.
    fn read_operator(&mut self) -> Option<Token> {
        let start = self.current_position();
        let first = self.peek()?;

        if let Some(second) = self.peek_next() {
            if DOUBLE_OPERATORS.contains(&[first, second]) {
                self.advance();
                self.advance();
                let lexeme: String = [first, second].iter().collect();
                return Some(Token::new(TokenKind::Operator, lexeme, self.make_span(start)));
            }
        }

        if matches!(first, '=' | '+' | '-' | '*' | '/' | '%' | '<' | '>') {
            self.advance();
            return Some(Token::new(
                TokenKind::Operator,
                first.to_string(),
                self.make_span(start),
            ));
        }

        None
    }

    /// Produces the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();

        let ch = self.peek()?;
        let start = self.current_position();

        if ch.is_ascii_digit() {
            return Some(self.read_number());
        }

        if ch == '"' {
            return Some(self.read_string());
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            return Some(self.read_identifier());
        }

        if let Some(token) = self.read_operator() {
            return Some(token);
        }

        if matches!(ch, ';' | '(' | ')' | ',' | '{' | '}' | '.' | '[' | ']') {
            self.advance();
            return Some(Token::new(
                TokenKind::Delimiter,
                ch.to_string(),
                self.make_span(start),
            ));
        }

        // No pattern matched: one arbitrary character, scanning continues
        self.advance();
        Some(Token::new(
            TokenKind::Unknown,
            ch.to_string(),
            self.make_span(start),
        ))
    }

    /// Tokenizes the remaining input.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}

/// Tokenizes source text in one call. Never fails.
pub fn tokenize(source: &str, file_id: u32) -> Vec<Token> {
    Lexer::new(source, file_id).tokenize()
}
