use ordered_float::OrderedFloat;

use crate::{
    ast::{BinaryOperator, Expr, Literal, NaryOperator, Operand, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{MAX_NESTING, Parser, is_boundary},
    },
};

impl Parser {
    /// Parses one expression.
    ///
    /// Every form is prefix, so the first token decides the production:
    ///
    /// ```text
    /// expression := binary_op expression [AN] expression
    ///             | NOT expression
    ///             | (ALL OF | ANY OF | SMOOSH) expression [AN expression]* [MKAY]
    ///             | MAEK expression [A] TYPE
    ///             | I IZ name [YR expression [AN YR expression]*] [MKAY]
    ///             | IDENTIFIER | IT | literal
    /// ```
    ///
    /// A missing `AN` between binary operands is recorded, and the right
    /// operand is parsed anyway. Expressions nested deeper than
    /// [`MAX_NESTING`] are reported once and the rest of their line is
    /// skipped.
    pub(super) fn parse_expression(&mut self) -> Option<Expr> {
        if self.nesting >= MAX_NESTING {
            self.error_here("Expression nested too deeply");
            self.skip_line();
            return None;
        }

        self.nesting += 1;
        let expr = self.parse_operation();
        self.nesting -= 1;
        expr
    }

    fn parse_operation(&mut self) -> Option<Expr> {
        let Some(token) = self.peek().cloned() else {
            self.error_here("Expected expression");
            return None;
        };
        let line = token.line;

        if let Some(op) = binary_operator(token.kind) {
            self.advance();
            let left = self.parse_expression()?;
            if self.eat(TokenKind::An).is_none() {
                self.error_here(&format!("Expected 'AN' between operands of '{op}'"));
            }
            let right = self.parse_expression()?;

            return Some(Expr::BinaryOp { op,
                                         left: Box::new(left),
                                         right: Box::new(right),
                                         line });
        }

        match token.kind {
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_expression()?;
                Some(Expr::UnaryOp { op: UnaryOperator::Not,
                                     operand: Box::new(operand),
                                     line })
            },
            TokenKind::AllOf => self.parse_nary(NaryOperator::AllOf, line),
            TokenKind::AnyOf => self.parse_nary(NaryOperator::AnyOf, line),
            TokenKind::Smoosh => self.parse_nary(NaryOperator::Smoosh, line),
            TokenKind::Maek => {
                self.advance();
                let expr = self.parse_expression()?;
                self.eat(TokenKind::A);
                let target = self.expect_type()?;
                Some(Expr::TypeCast { expr: Box::new(expr),
                                      target,
                                      line })
            },
            TokenKind::IIz => self.parse_call(line),
            TokenKind::Identifier => {
                self.advance();
                Some(Expr::Operand { operand: Operand::Variable(token.lexeme),
                                     line })
            },
            TokenKind::It => {
                self.advance();
                Some(Expr::Operand { operand: Operand::It,
                                     line })
            },
            TokenKind::NumbrLiteral
            | TokenKind::NumbarLiteral
            | TokenKind::YarnLiteral
            | TokenKind::TroofLiteral => {
                let literal = self.parse_literal()?;
                Some(Expr::Operand { operand: Operand::Literal(literal),
                                     line })
            },
            kind => {
                self.error_here(&format!("Expected expression, found {}", kind.label()));
                if !is_boundary(kind) {
                    self.advance();
                }
                None
            },
        }
    }

    /// `ALL OF`, `ANY OF` and `SMOOSH` take operands separated by `AN` up to an
    /// optional `MKAY`.
    fn parse_nary(&mut self, op: NaryOperator, line: usize) -> Option<Expr> {
        self.advance();
        let mut operands = vec![self.parse_expression()?];

        while self.eat(TokenKind::An).is_some() {
            match self.parse_expression() {
                Some(operand) => operands.push(operand),
                None => break,
            }
        }
        self.eat(TokenKind::Mkay);

        Some(Expr::NaryOp { op,
                            operands,
                            line })
    }

    /// `I IZ name [YR expr [AN YR expr]*] [MKAY]`
    fn parse_call(&mut self, line: usize) -> Option<Expr> {
        self.advance();
        let name = self.expect(TokenKind::Identifier, "function name after 'I IZ'")?.lexeme;

        let mut arguments = Vec::new();
        if self.eat(TokenKind::Yr).is_some() {
            arguments.push(self.parse_expression()?);

            while self.check(TokenKind::An) && self.peek_nth_kind(1) == Some(TokenKind::Yr) {
                self.advance();
                self.advance();
                arguments.push(self.parse_expression()?);
            }
        }
        self.eat(TokenKind::Mkay);

        Some(Expr::FuncCall { name,
                              arguments,
                              line })
    }

    /// Reads a literal token into a [`Literal`].
    ///
    /// Numbrs that do not fit in 64 bits are reported here. Yarn escapes are
    /// resolved and the quotes dropped.
    pub(super) fn parse_literal(&mut self) -> Option<Literal> {
        let Some(token) = self.peek().cloned() else {
            self.error_here("Expected literal");
            return None;
        };

        let literal = match token.kind {
            TokenKind::NumbrLiteral => token.lexeme.parse().ok().map(Literal::Numbr),
            TokenKind::NumbarLiteral => {
                token.lexeme.parse().ok().map(|x| Literal::Numbar(OrderedFloat(x)))
            },
            TokenKind::YarnLiteral => Some(Literal::Yarn(unescape_yarn(&token.lexeme))),
            TokenKind::TroofLiteral => Some(Literal::Troof(token.lexeme == "WIN")),
            kind => {
                self.error_here(&format!("Expected literal, found {}", kind.label()));
                if !is_boundary(kind) {
                    self.advance();
                }
                return None;
            },
        };

        if literal.is_none() {
            self.error_here("Numeric literal out of range");
        }
        self.advance();
        literal
    }
}

/// The binary form an operator keyword introduces, if any.
const fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let op = match kind {
        TokenKind::SumOf => BinaryOperator::Sum,
        TokenKind::DiffOf => BinaryOperator::Diff,
        TokenKind::ProduktOf => BinaryOperator::Produkt,
        TokenKind::QuoshuntOf => BinaryOperator::Quoshunt,
        TokenKind::ModOf => BinaryOperator::Mod,
        TokenKind::BiggrOf => BinaryOperator::Biggr,
        TokenKind::SmallrOf => BinaryOperator::Smallr,
        TokenKind::BothOf => BinaryOperator::BothOf,
        TokenKind::EitherOf => BinaryOperator::EitherOf,
        TokenKind::WonOf => BinaryOperator::WonOf,
        TokenKind::BothSaem => BinaryOperator::BothSaem,
        TokenKind::Diffrint => BinaryOperator::Diffrint,
        _ => return None,
    };
    Some(op)
}

/// Strips the quotes from a yarn literal and resolves its escapes.
///
/// `:)` is a newline, `:>` a tab, `:o` a bell, `:"` a quote and `::` a colon.
/// Any other character after a colon is kept as written.
///
/// # Example
/// ```
/// use lolz::interpreter::parser::expression::unescape_yarn;
///
/// assert_eq!(unescape_yarn("\"A:>B:)\""), "A\tB\n");
/// assert_eq!(unescape_yarn("\"say :\"hi:\"\""), "say \"hi\"");
/// assert_eq!(unescape_yarn("\"10::30\""), "10:30");
/// ```
#[must_use]
pub fn unescape_yarn(lexeme: &str) -> String {
    let inner = lexeme.strip_prefix('"').unwrap_or(lexeme);
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != ':' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some(')') => result.push('\n'),
            Some('>') => result.push('\t'),
            Some('o') => result.push('\u{7}'),
            Some('"') => result.push('"'),
            Some(':') => result.push(':'),
            Some(other) => {
                result.push(':');
                result.push(other);
            },
            None => result.push(':'),
        }
    }
    result
}
