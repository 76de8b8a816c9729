//! aula-lexer - Lexer/Tokenizer for the Aula language
//!
//! This crate converts Aula source text into a sequence of tokens.
//!
//! # Features
//!
//! - Reserved words matched case-insensitively, lexemes preserved verbatim
//! - Longest-match operators (`<=`, `++`, ... before `<`, `+`, ...)
//! - `//` line comments and whitespace skipped, never emitted
//! - Graceful degradation: unmatched characters become `Unknown` tokens
//!
//! # Example
//!
//! ```rust
//! use aula_lexer::{tokenize, TokenKind};
//!
//! let tokens = tokenize("programa suma(){ end; }", 0);
//!
//! assert_eq!(tokens[0].kind, TokenKind::ReservedWord);
//! assert_eq!(tokens[0].lexeme, "programa");
//! ```

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{is_reserved_word, Token, TokenKind, TokenSummary, RESERVED_WORDS};
