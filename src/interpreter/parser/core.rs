use tracing::debug;

use crate::{
    ast::Program,
    error::{Diagnostic, Phase},
    interpreter::lexer::{Token, TokenKind},
};

/// Recursive descent parser state.
///
/// The parser owns its token buffer and a cursor into it. Every production is
/// a method; the `impl` is split over the files of this module by the kind of
/// construct it handles. Problems are recorded as [`Diagnostic`]s and parsing
/// carries on, so one pass reports everything that is wrong with a program.
pub struct Parser {
    tokens:             Vec<Token>,
    position:           usize,
    diagnostics:        Vec<Diagnostic>,
    pub(super) nesting: usize,
}

/// How deeply expressions may nest before parsing gives up on them.
pub const MAX_NESTING: usize = 256;

/// Parses a token stream into a [`Program`].
///
/// Always returns a program, even for broken input. Unknown tokens become
/// lexical diagnostics, grammar problems become syntax diagnostics.
///
/// # Example
/// ```
/// use lolz::interpreter::{lexer::scan, parser::core::parse};
///
/// let tokens = scan("HAI 1.2\nVISIBLE \"HAI WORLD\"\nKTHXBYE");
/// let (program, diagnostics) = parse(&tokens);
///
/// assert!(diagnostics.is_empty());
/// assert_eq!(program.version.as_deref(), Some("1.2"));
/// assert_eq!(program.statement_count(), 1);
/// ```
#[must_use]
pub fn parse(tokens: &[Token]) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();

    debug!(statements = program.statement_count(),
           diagnostics = parser.diagnostics.len(),
           "parsed program");

    (program, parser.diagnostics)
}

impl Parser {
    fn new(tokens: &[Token]) -> Self {
        let mut diagnostics = Vec::new();
        let tokens = tokens.iter()
                           .filter(|token| {
                               if token.kind == TokenKind::Unknown {
                                   diagnostics.push(Diagnostic::at(Phase::Lexical,
                                                                   token,
                                                                   "Unrecognized character"));
                                   false
                               } else {
                                   true
                               }
                           })
                           .cloned()
                           .collect();

        Self { tokens,
               position: 0,
               diagnostics,
               nesting: 0 }
    }

    /// `HAI [version] [WAZZUP ... BUHBYE] statements KTHXBYE`
    fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        match self.eat(TokenKind::Hai) {
            Some(hai) => {
                if let Some(version) = self.peek()
                                           .filter(|t| {
                                               t.line == hai.line
                                               && matches!(t.kind,
                                                           TokenKind::NumbarLiteral
                                                           | TokenKind::NumbrLiteral)
                                           })
                                           .cloned()
                {
                    self.position += 1;
                    program.version = Some(version.lexeme);
                }
            },
            None => self.error_here("Expected 'HAI' at start of program"),
        }

        if self.check(TokenKind::Wazzup) {
            program.var_block = Some(self.parse_var_block());
        }

        program.body = self.parse_top_level();

        if self.eat(TokenKind::Kthxbye).is_none() {
            self.error_here("Missing 'KTHXBYE' at end of program");
        } else if self.peek().is_some() {
            self.error_here("Unexpected tokens after 'KTHXBYE'");
            self.position = self.tokens.len();
        }

        program
    }

    pub(super) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(super) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Looks `n` tokens past the current one.
    pub(super) fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.position + n).map(|token| token.kind)
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consumes the current token if it has the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) { self.advance() } else { None }
    }

    /// Consumes a token of the given kind or records `Expected {what}`.
    ///
    /// On a mismatch one token is skipped, unless it starts a statement or
    /// closes a block, in which case it is left for the enclosing production.
    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if let Some(token) = self.eat(kind) {
            return Some(token);
        }

        self.error_here(&format!("Expected {what}"));
        if self.peek_kind().is_some_and(|kind| !is_boundary(kind)) {
            self.position += 1;
        }
        None
    }

    /// The line of the last consumed token.
    pub(super) fn previous_line(&self) -> usize {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(1, |token| token.line)
    }

    /// Records a syntax diagnostic at the current token, or at the end of
    /// input.
    pub(super) fn error_here(&mut self, message: &str) {
        let diagnostic = match self.peek() {
            Some(token) => Diagnostic::at(Phase::Syntactic, token, message),
            None => Diagnostic { phase:   Phase::Syntactic,
                                 line:    self.previous_line(),
                                 message: format!("{message}, found end of input"),
                                 lexeme:  String::new(), },
        };
        self.diagnostics.push(diagnostic);
    }

    /// Skips the rest of the current line, stopping before any block closer.
    pub(super) fn skip_line(&mut self) {
        let Some(line) = self.peek().map(|token| token.line) else {
            return;
        };
        while self.peek().is_some_and(|token| token.line == line && !is_closer(token.kind)) {
            self.position += 1;
        }
    }

    /// Reports the current token and skips ahead to the next statement or
    /// block boundary.
    pub(super) fn synchronize(&mut self, message: &str) {
        self.error_here(message);
        self.position += 1;
        while self.peek_kind().is_some_and(|kind| !is_boundary(kind)) {
            self.position += 1;
        }
    }
}

/// Tokens that end a block.
pub(super) const fn is_closer(kind: TokenKind) -> bool {
    matches!(kind,
             TokenKind::Kthxbye
             | TokenKind::Buhbye
             | TokenKind::YaRly
             | TokenKind::Mebbe
             | TokenKind::NoWai
             | TokenKind::Oic
             | TokenKind::Omg
             | TokenKind::Omgwtf
             | TokenKind::ImOuttaYr
             | TokenKind::IfUSaySo)
}

/// Tokens that may begin a statement.
pub(super) const fn is_statement_start(kind: TokenKind) -> bool {
    kind.starts_expression()
    || matches!(kind,
                TokenKind::IHasA
                | TokenKind::Visible
                | TokenKind::Gimmeh
                | TokenKind::ORly
                | TokenKind::Wtf
                | TokenKind::ImInYr
                | TokenKind::HowIzI
                | TokenKind::FoundYr
                | TokenKind::Gtfo)
}

/// Where recovery stops skipping.
pub(super) const fn is_boundary(kind: TokenKind) -> bool {
    is_closer(kind) || is_statement_start(kind)
}
