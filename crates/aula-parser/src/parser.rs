//! Parser for the Aula language
//!
//! Recursive descent over a borrowed token slice with an explicit cursor.
//! The parser validates structure only: it builds no tree, and its sole
//! output is a [`ParseResult`] with the diagnostics found along the way.
//!
//! Recovery is panic-mode at single-token granularity: any mismatch records
//! a diagnostic and drops exactly one token before the current production
//! continues. One root cause can therefore cascade into several diagnostics,
//! but the cursor always moves forward and parsing always terminates.
//!
//! Grammar:
//!
//! ```text
//! program    := 'programa' IDENT '(' ')' '{' stmt* '}'
//! stmt       := decl | read | printf | assign | endstmt
//! decl       := 'int' IDENT (',' IDENT)* ';'
//! read       := 'read' IDENT ';'
//! printf     := 'printf' '(' STRING ')' ';'
//! assign     := IDENT '=' expr ';'
//! endstmt    := 'end' ';'
//! expr       := term (('+'|'-') term)*
//! term       := factor (('*'|'/') factor)*
//! factor     := IDENT | NUMBER | '(' expr ')'
//! ```

use aula_error::{Diagnostic, Diagnostics, ErrorCode};
use aula_lexer::{Token, TokenKind};

/// Outcome of one syntactic analysis. Always produced, never an `Err`.
#[derive(Debug)]
pub struct ParseResult {
    /// Exactly `diagnostics.is_empty()`
    pub is_valid: bool,
    /// Problems in discovery order (left-to-right scan order)
    pub diagnostics: Diagnostics,
}

impl ParseResult {
    /// The diagnostics as self-contained text lines, for callers that only
    /// want strings. Each line already names the expected and found
    /// constructs and the source line.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}

/// Validates a token sequence against the grammar.
pub fn parse(tokens: &[Token]) -> ParseResult {
    let mut parser = Parser::new(tokens);
    parser.program();
    parser.trailing_content();
    parser.finish()
}

/// The Aula language parser.
pub struct Parser<'t> {
    /// Tokens under analysis
    tokens: &'t [Token],
    /// Cursor into `tokens`
    pos: usize,
    /// Accumulated diagnostics
    diagnostics: Diagnostics,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Consumes the parser, yielding the final result.
    pub fn finish(self) -> ParseResult {
        ParseResult {
            is_valid: self.diagnostics.is_empty(),
            diagnostics: self.diagnostics,
        }
    }

    // =========================================
    // Cursor helpers
    // =========================================

    /// Current token, or `None` past the end of the sequence.
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Advances one token, saturating at the end.
    fn bump(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// How the current position reads in a diagnostic.
    fn found_description(&self) -> String {
        match self.peek() {
            Some(token) => format!(
                "{}('{}') on line {}",
                token.kind,
                token.lexeme,
                token.line()
            ),
            None => "end of input".to_string(),
        }
    }

    /// Consumes the current token when it satisfies the kind/lexeme
    /// constraints. On a mismatch, records `message` together with what was
    /// actually found, then drops one token anyway so the production keeps
    /// moving.
    fn expect(&mut self, kind: Option<TokenKind>, lexeme: Option<&str>, message: &str) -> bool {
        if let Some(token) = self.peek() {
            let kind_ok = kind.map_or(true, |k| token.kind == k);
            let lexeme_ok = lexeme.map_or(true, |l| token.lexeme == l);
            if kind_ok && lexeme_ok {
                self.pos += 1;
                return true;
            }
        }

        let expected = match (kind, lexeme) {
            (_, Some(l)) => format!("'{l}'"),
            (Some(k), None) => format!("an {k}"),
            (None, None) => "a token".to_string(),
        };
        let mut diag = Diagnostic::error(format!("{message}, found {}", self.found_description()))
            .with_code(ErrorCode::UnexpectedToken);
        if let Some(token) = self.peek() {
            diag = diag.with_label(token.span, format!("expected {expected}"));
        }
        self.diagnostics.push(diag);

        self.bump();
        false
    }

    // =========================================
    // Grammar productions
    // =========================================

    /// program := 'programa' IDENT '(' ')' '{' stmt* '}'
    pub fn program(&mut self) {
        self.expect(
            Some(TokenKind::ReservedWord),
            Some("programa"),
            "expected the word 'programa' at the start of the program",
        );
        self.expect(
            Some(TokenKind::Identifier),
            None,
            "expected the program name after 'programa'",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some("("),
            "expected '(' after the program name",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some(")"),
            "expected ')' after the program name",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some("{"),
            "expected '{' to open the program block",
        );

        while let Some(token) = self.peek() {
            if token.is_symbol(TokenKind::Delimiter, "}") {
                break;
            }
            self.statement();
        }

        self.expect(
            Some(TokenKind::Delimiter),
            Some("}"),
            "expected '}' to close the program",
        );
    }

    /// Dispatches on the current token without consuming it. Reserved-word
    /// dispatch compares lexemes exactly, so `INT` lexes as a reserved word
    /// but starts no declaration.
    fn statement(&mut self) {
        let Some(token) = self.peek() else {
            self.diagnostics.push(
                Diagnostic::error("unexpected end of input inside the program block")
                    .with_code(ErrorCode::InvalidStatement),
            );
            return;
        };

        if token.is_word("int") {
            self.declaration();
        } else if token.is_word("read") {
            self.read_statement();
        } else if token.is_word("printf") {
            self.printf_statement();
        } else if token.is_word("end") {
            self.end_statement();
        } else if token.kind == TokenKind::Identifier {
            self.assignment();
        } else {
            self.diagnostics.push(
                Diagnostic::error(format!(
                    "invalid statement starting at {}('{}') on line {}",
                    token.kind,
                    token.lexeme,
                    token.line()
                ))
                .with_code(ErrorCode::InvalidStatement)
                .with_label(token.span, "no statement starts here"),
            );
            // Force progress at the dispatch level
            self.bump();
        }
    }

    /// decl := 'int' IDENT (',' IDENT)* ';'
    fn declaration(&mut self) {
        self.expect(Some(TokenKind::ReservedWord), Some("int"), "expected 'int'");
        self.expect(
            Some(TokenKind::Identifier),
            None,
            "expected an identifier in the declaration",
        );

        while matches!(self.peek(), Some(t) if t.is_symbol(TokenKind::Delimiter, ",")) {
            self.bump();
            self.expect(
                Some(TokenKind::Identifier),
                None,
                "expected an identifier after ','",
            );
        }

        self.expect(
            Some(TokenKind::Delimiter),
            Some(";"),
            "expected ';' at the end of the declaration",
        );
    }

    /// read := 'read' IDENT ';'
    fn read_statement(&mut self) {
        self.expect(Some(TokenKind::ReservedWord), Some("read"), "expected 'read'");
        self.expect(
            Some(TokenKind::Identifier),
            None,
            "expected an identifier after 'read'",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some(";"),
            "expected ';' after the 'read' statement",
        );
    }

    /// printf := 'printf' '(' STRING ')' ';'
    fn printf_statement(&mut self) {
        self.expect(
            Some(TokenKind::ReservedWord),
            Some("printf"),
            "expected 'printf'",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some("("),
            "expected '(' in printf",
        );
        self.expect(
            Some(TokenKind::StringLiteral),
            None,
            "expected the string inside printf",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some(")"),
            "expected ')' to close printf",
        );
        self.expect(
            Some(TokenKind::Delimiter),
            Some(";"),
            "expected ';' at the end of printf",
        );
    }

    /// assign := IDENT '=' expr ';'
    fn assignment(&mut self) {
        self.expect(
            Some(TokenKind::Identifier),
            None,
            "expected an identifier in the assignment",
        );
        self.expect(
            Some(TokenKind::Operator),
            Some("="),
            "expected '=' in the assignment",
        );
        self.expression();
        self.expect(
            Some(TokenKind::Delimiter),
            Some(";"),
            "expected ';' at the end of the assignment",
        );
    }

    /// endstmt := 'end' ';'
    fn end_statement(&mut self) {
        self.expect(Some(TokenKind::ReservedWord), Some("end"), "expected 'end'");
        self.expect(
            Some(TokenKind::Delimiter),
            Some(";"),
            "expected ';' after 'end'",
        );
    }

    /// expr := term (('+'|'-') term)*
    fn expression(&mut self) {
        self.term();
        while matches!(
            self.peek(),
            Some(t) if t.kind == TokenKind::Operator && (t.lexeme == "+" || t.lexeme == "-")
        ) {
            self.bump();
            self.term();
        }
    }

    /// term := factor (('*'|'/') factor)*
    fn term(&mut self) {
        self.factor();
        while matches!(
            self.peek(),
            Some(t) if t.kind == TokenKind::Operator && (t.lexeme == "*" || t.lexeme == "/")
        ) {
            self.bump();
            self.factor();
        }
    }

    /// factor := IDENT | NUMBER | '(' expr ')'
    ///
    /// Every failure path advances the cursor, so expressions can never
    /// stall the parser.
    fn factor(&mut self) {
        let Some(token) = self.peek() else {
            self.diagnostics.push(
                Diagnostic::error("incomplete expression, found end of input")
                    .with_code(ErrorCode::ExpectedExpression),
            );
            return;
        };

        match token.kind {
            TokenKind::Identifier | TokenKind::Number => {
                self.bump();
            }
            TokenKind::Delimiter if token.lexeme == "(" => {
                self.bump();
                self.expression();
                self.expect(
                    Some(TokenKind::Delimiter),
                    Some(")"),
                    "expected ')' to close the expression",
                );
            }
            _ => {
                self.diagnostics.push(
                    Diagnostic::error(format!(
                        "invalid factor in expression: {}('{}') on line {}",
                        token.kind,
                        token.lexeme,
                        token.line()
                    ))
                    .with_code(ErrorCode::ExpectedExpression)
                    .with_label(token.span, "not a valid factor"),
                );
                self.bump();
            }
        }
    }

    /// Reports tokens left over after the top-level block closed.
    pub fn trailing_content(&mut self) {
        if let Some(extra) = self.peek() {
            self.diagnostics.push(
                Diagnostic::error(format!(
                    "extra tokens after the program was closed, starting at '{}' on line {}",
                    extra.lexeme,
                    extra.line()
                ))
                .with_code(ErrorCode::TrailingTokens)
                .with_label(extra.span, "content after the closing '}'"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_error::{Position, Span};
    use aula_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> ParseResult {
        parse(&tokenize(source, 0))
    }

    #[test]
    fn valid_program_has_no_diagnostics() {
        let result = check("programa p(){ int a; read a; printf(\"hi\"); end; }");
        assert!(result.is_valid);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn full_sample_program_is_valid() {
        let result = check(
            "programa suma(){\n  int a,b,c;\n  read a;\n  read b;\n  c = a + b;\n  printf(\"la suma es\");\n  end;\n}",
        );
        assert!(result.is_valid, "diagnostics: {:?}", result.messages());
    }

    #[test]
    fn missing_semicolon_cites_the_declaration_line() {
        let result = check("programa p(){ int a printf(\"x\"); end; }");
        assert!(!result.is_valid);

        let messages = result.messages();
        assert!(
            messages
                .iter()
                .any(|m| m.contains("';'") && m.contains("line 1")),
            "no semicolon diagnostic in {messages:?}"
        );
    }

    #[test]
    fn unknown_character_at_statement_position_is_one_diagnostic() {
        let result = check("programa p(){ # end; }");
        assert!(!result.is_valid);

        let invalid: Vec<_> = result
            .diagnostics
            .iter()
            .filter(|d| d.code == Some(ErrorCode::InvalidStatement))
            .collect();
        assert_eq!(invalid.len(), 1);
        assert!(invalid[0].message.contains("unknown('#')"));
        // Recovery drops the '#' and the rest of the program parses clean
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn trailing_tokens_are_reported_once() {
        let result = check("programa p(){ end; } }");
        assert!(!result.is_valid);

        let messages = result.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("extra tokens"));
        assert!(messages[0].contains("'}'"));
        assert!(messages[0].contains("line 1"));
    }

    #[test]
    fn incomplete_expression_at_end_of_input() {
        let result = check("programa p(){ c = a +");
        assert!(!result.is_valid);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.code == Some(ErrorCode::ExpectedExpression)));
    }

    #[test]
    fn parenthesized_expressions_nest() {
        let result = check("programa p(){ c = (a + 2) * (b - (1 + c)); end; }");
        assert!(result.is_valid, "diagnostics: {:?}", result.messages());
    }

    #[test]
    fn reserved_dispatch_is_case_sensitive() {
        // `INT` lexes as a reserved word but matches no statement keyword
        let result = check("programa p(){ INT a; end; }");
        assert!(!result.is_valid);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.code == Some(ErrorCode::InvalidStatement)));
    }

    #[test]
    fn empty_input_reports_and_terminates() {
        let result = parse(&[]);
        assert!(!result.is_valid);

        let messages = result.messages();
        assert!(messages[0].contains("'programa'"));
        assert!(messages.iter().all(|m| m.contains("end of input")));
    }

    #[test]
    fn diagnostics_are_bounded_by_token_count() {
        // Pathological input: every token is wrong for its position
        let tokens = tokenize("( ( ( } } ) + * # # \"x\" 5 5", 0);
        let result = parse(&tokens);
        assert!(!result.is_valid);
        // Single-token recovery emits at most a small constant per token
        assert!(result.diagnostics.len() <= 2 * tokens.len() + 8);
    }

    #[test]
    fn parses_hand_built_token_sequences() {
        // The cursor works over any token slice, not just lexer output
        let span = Span::point(Position::new(1, 1, 0), 0);
        let tokens = vec![
            Token::new(TokenKind::ReservedWord, "programa", span),
            Token::new(TokenKind::Identifier, "p", span),
            Token::new(TokenKind::Delimiter, "(", span),
            Token::new(TokenKind::Delimiter, ")", span),
            Token::new(TokenKind::Delimiter, "{", span),
            Token::new(TokenKind::ReservedWord, "end", span),
            Token::new(TokenKind::Delimiter, ";", span),
            Token::new(TokenKind::Delimiter, "}", span),
        ];
        let result = parse(&tokens);
        assert!(result.is_valid);
    }

    #[test]
    fn messages_are_self_contained() {
        let result = check("programa p(){ read ; end; }");
        assert!(!result.is_valid);

        let messages = result.messages();
        assert!(
            messages[0].contains("expected an identifier after 'read'")
                && messages[0].contains("found delimiter(';') on line 1"),
            "unexpected message: {:?}",
            messages[0]
        );
    }
}
