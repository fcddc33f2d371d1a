use crate::{
    ast::{Statement, VarBlock},
    interpreter::{
        lexer::TokenKind,
        parser::core::{Parser, is_closer, is_statement_start},
    },
};

impl Parser {
    /// Parses statements until a block closer or the end of input.
    ///
    /// The closer itself is left in place; the production that opened the
    /// block decides whether it is the one it was waiting for.
    pub(super) fn parse_block(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();

        while let Some(kind) = self.peek_kind() {
            if is_closer(kind) {
                break;
            }

            if is_statement_start(kind) {
                if let Some(statement) = self.parse_statement() {
                    statements.push(statement);
                }
            } else {
                self.synchronize(&format!("Unexpected {}", kind.label()));
            }
        }

        statements
    }

    /// The main program body. Stray closers are reported and skipped so that
    /// everything up to `KTHXBYE` is still parsed.
    pub(super) fn parse_top_level(&mut self) -> Vec<Statement> {
        let mut statements = self.parse_block();

        while let Some(kind) = self.peek_kind() {
            if kind == TokenKind::Kthxbye {
                break;
            }
            self.error_here(&format!("Unexpected {} outside of its block", kind.label()));
            self.advance();
            statements.extend(self.parse_block());
        }

        statements
    }

    /// `WAZZUP declarations BUHBYE`
    pub(super) fn parse_var_block(&mut self) -> VarBlock {
        let line = self.advance().map_or(1, |token| token.line);
        let declarations = self.parse_block();
        self.expect_closer(TokenKind::Buhbye, "BUHBYE", "WAZZUP", line);

        VarBlock { declarations,
                   line }
    }

    /// Consumes the closer of a block opened on `line`.
    ///
    /// When it is missing the block is treated as closed and nothing is
    /// consumed.
    pub(super) fn expect_closer(&mut self, kind: TokenKind, closer: &str, opener: &str, line: usize) {
        if self.eat(kind).is_none() {
            self.error_here(&format!("Missing '{closer}' to close '{opener}' on line {line}"));
        }
    }
}
