//! aula-parser - Parser for the Aula language
//!
//! Validates a token sequence against the fixed grammar and reports every
//! problem as a diagnostic. No tree is built; lexical analysis alone is a
//! valid terminal operation and parsing is requested separately.
//!
//! # Example
//!
//! ```rust
//! use aula_lexer::tokenize;
//! use aula_parser::parse;
//!
//! let tokens = tokenize("programa p(){ int a; read a; end; }", 0);
//! let result = parse(&tokens);
//!
//! assert!(result.is_valid);
//! assert!(result.messages().is_empty());
//! ```

pub mod parser;

pub use parser::{parse, ParseResult, Parser};
