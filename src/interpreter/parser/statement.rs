use crate::{
    ast::{
        ConditionKind, ElseIf, FunctionDef, LoopCondition, LoopOperation, LoopStep, Statement,
        SwitchCase,
    },
    interpreter::{lexer::TokenKind, parser::core::Parser, value::core::ValueType},
};

impl Parser {
    /// Parses a single statement.
    ///
    /// The caller guarantees that the current token can start a statement.
    /// Identifier-led statements need one extra token of lookahead: `R` makes
    /// an assignment, `IS NOW A` a cast, anything else an expression statement.
    pub(super) fn parse_statement(&mut self) -> Option<Statement> {
        let kind = self.peek_kind()?;

        match kind {
            TokenKind::IHasA => self.parse_declaration(),
            TokenKind::Identifier if self.peek_nth_kind(1) == Some(TokenKind::R) => {
                self.parse_assignment()
            },
            TokenKind::Identifier if self.peek_nth_kind(1) == Some(TokenKind::IsNowA) => {
                self.parse_recast()
            },
            TokenKind::Visible => self.parse_visible(),
            TokenKind::Gimmeh => self.parse_gimmeh(),
            TokenKind::ORly => Some(self.parse_if()),
            TokenKind::Wtf => Some(self.parse_switch()),
            TokenKind::ImInYr => Some(self.parse_loop()),
            TokenKind::HowIzI => self.parse_function_definition(),
            TokenKind::FoundYr => {
                let line = self.advance()?.line;
                let value = self.parse_expression()?;
                Some(Statement::Return { value, line })
            },
            TokenKind::Gtfo => {
                let line = self.advance()?.line;
                Some(Statement::Break { line })
            },
            _ => {
                let line = self.peek()?.line;
                let expr = self.parse_expression()?;
                Some(Statement::Expression { expr, line })
            },
        }
    }

    /// `I HAS A name [ITZ expr | ITZ A TYPE]`
    fn parse_declaration(&mut self) -> Option<Statement> {
        let line = self.advance()?.line;
        let name = self.expect(TokenKind::Identifier, "variable name after 'I HAS A'")?.lexeme;

        let mut value = None;
        let mut declared_type = None;

        if self.eat(TokenKind::Itz).is_some() {
            if self.eat(TokenKind::A).is_some() {
                declared_type = Some(self.expect_type()?);
            } else {
                value = Some(self.parse_expression()?);
            }
        }

        Some(Statement::VarDecl { name,
                                  value,
                                  declared_type,
                                  line })
    }

    /// `name R expr`
    fn parse_assignment(&mut self) -> Option<Statement> {
        let target = self.advance()?;
        self.advance();
        let value = self.parse_expression()?;

        Some(Statement::Assignment { name: target.lexeme,
                                     value,
                                     line: target.line })
    }

    /// `name IS NOW A TYPE`
    fn parse_recast(&mut self) -> Option<Statement> {
        let target = self.advance()?;
        self.advance();
        let to = self.expect_type()?;

        Some(Statement::TypeCast { name:   target.lexeme,
                                   target: to,
                                   line:   target.line, })
    }

    /// `VISIBLE expr [[AN|+] expr]*`
    ///
    /// Arguments may also be juxtaposed, but only on the line of the previous
    /// token; an expression on a later line starts a new statement.
    fn parse_visible(&mut self) -> Option<Statement> {
        let line = self.advance()?.line;
        let mut arguments = vec![self.parse_expression()?];

        loop {
            let separated = self.eat(TokenKind::An).is_some() || self.eat(TokenKind::Plus).is_some();
            if separated {
                match self.parse_expression() {
                    Some(argument) => arguments.push(argument),
                    None => break,
                }
                continue;
            }

            let juxtaposed =
                self.peek()
                    .is_some_and(|t| t.kind.starts_expression() && t.line == self.previous_line());
            if !juxtaposed {
                break;
            }
            match self.parse_expression() {
                Some(argument) => arguments.push(argument),
                None => break,
            }
        }

        Some(Statement::Visible { arguments, line })
    }

    /// `GIMMEH name`
    fn parse_gimmeh(&mut self) -> Option<Statement> {
        let line = self.advance()?.line;
        let name = self.expect(TokenKind::Identifier, "variable name after 'GIMMEH'")?.lexeme;

        Some(Statement::Input { name, line })
    }

    /// `O RLY? YA RLY ... [MEBBE expr ...]* [NO WAI ...] OIC`
    fn parse_if(&mut self) -> Statement {
        let line = self.advance().map_or(1, |token| token.line);
        self.expect(TokenKind::YaRly, "'YA RLY' after 'O RLY?'");
        let then_branch = self.parse_block();

        let mut else_ifs = Vec::new();
        while let Some(mebbe) = self.eat(TokenKind::Mebbe) {
            let condition = self.parse_expression();
            let body = self.parse_block();
            if let Some(condition) = condition {
                else_ifs.push(ElseIf { condition,
                                       body,
                                       line: mebbe.line });
            }
        }

        let else_branch = self.eat(TokenKind::NoWai).map(|_| self.parse_block());
        self.expect_closer(TokenKind::Oic, "OIC", "O RLY?", line);

        Statement::If { then_branch,
                        else_ifs,
                        else_branch,
                        line }
    }

    /// `WTF? [OMG literal ...]+ [OMGWTF ...] OIC`
    fn parse_switch(&mut self) -> Statement {
        let line = self.advance().map_or(1, |token| token.line);

        if !self.check(TokenKind::Omg) {
            self.error_here("Expected 'OMG' after 'WTF?'");
        }

        let mut cases = Vec::new();
        while let Some(omg) = self.eat(TokenKind::Omg) {
            let literal = self.parse_literal();
            let body = self.parse_block();
            if let Some(literal) = literal {
                cases.push(SwitchCase { literal,
                                        body,
                                        line: omg.line });
            }
        }

        let default = self.eat(TokenKind::Omgwtf).map(|_| self.parse_block());
        self.expect_closer(TokenKind::Oic, "OIC", "WTF?", line);

        Statement::Switch { cases,
                            default,
                            line }
    }

    /// `IM IN YR label [UPPIN|NERFIN YR var] [TIL|WILE expr] ... IM OUTTA YR
    /// label`
    fn parse_loop(&mut self) -> Statement {
        let line = self.advance().map_or(1, |token| token.line);
        let label = self.expect(TokenKind::Identifier, "loop label after 'IM IN YR'")
                        .map(|token| token.lexeme);

        let step = match self.peek_kind() {
            Some(TokenKind::Uppin) => Some(LoopStep::Uppin),
            Some(TokenKind::Nerfin) => Some(LoopStep::Nerfin),
            _ => None,
        };
        let operation = step.and_then(|step| {
                                self.advance();
                                self.expect(TokenKind::Yr, "'YR' after loop operation")?;
                                let variable = self.expect(TokenKind::Identifier, "loop variable")?;
                                Some(LoopOperation { step,
                                                     variable: variable.lexeme })
                            });

        let kind = match self.peek_kind() {
            Some(TokenKind::Til) => Some(ConditionKind::Til),
            Some(TokenKind::Wile) => Some(ConditionKind::Wile),
            _ => None,
        };
        let condition = kind.and_then(|kind| {
                                self.advance();
                                self.parse_expression().map(|expr| LoopCondition { kind, expr })
                            });

        let body = self.parse_block();

        match self.eat(TokenKind::ImOuttaYr) {
            Some(outta) => self.check_loop_label(label.as_deref(), outta.line),
            None => self.error_here(&format!("Missing 'IM OUTTA YR' to close 'IM IN YR' on line {line}")),
        }

        Statement::Loop { label,
                          operation,
                          condition,
                          body,
                          line }
    }

    /// Reads the label after `IM OUTTA YR` and compares it with the opening
    /// one. The label must be on the same line as the keyword.
    fn check_loop_label(&mut self, opening: Option<&str>, line: usize) {
        let closing = self.peek()
                          .filter(|t| t.kind == TokenKind::Identifier && t.line == line)
                          .cloned();

        match (opening, closing) {
            (Some(opening), Some(closing)) => {
                if closing.lexeme != opening {
                    self.error_here(&format!("Loop label '{}' does not match '{opening}'",
                                             closing.lexeme));
                }
                self.advance();
            },
            (Some(_), None) => self.error_here("Expected loop label after 'IM OUTTA YR'"),
            (None, Some(_)) => {
                self.advance();
            },
            (None, None) => {},
        }
    }

    /// `HOW IZ I name [YR param [AN YR param]*] ... IF U SAY SO`
    fn parse_function_definition(&mut self) -> Option<Statement> {
        let line = self.advance()?.line;
        let name = self.expect(TokenKind::Identifier, "function name after 'HOW IZ I'")?.lexeme;

        let mut params = Vec::new();
        if self.eat(TokenKind::Yr).is_some() {
            params.extend(self.expect(TokenKind::Identifier, "parameter name after 'YR'")
                              .map(|token| token.lexeme));

            while self.check(TokenKind::An) && self.peek_nth_kind(1) == Some(TokenKind::Yr) {
                self.advance();
                self.advance();
                params.extend(self.expect(TokenKind::Identifier, "parameter name after 'YR'")
                                  .map(|token| token.lexeme));
            }
        }

        let body = self.parse_block();
        self.expect_closer(TokenKind::IfUSaySo, "IF U SAY SO", "HOW IZ I", line);

        Some(Statement::FuncDef(FunctionDef { name,
                                              params,
                                              body,
                                              line }))
    }

    /// A type literal, as used by `ITZ A`, `IS NOW A` and `MAEK`.
    pub(super) fn expect_type(&mut self) -> Option<ValueType> {
        let token = self.expect(TokenKind::TypeLiteral, "type name")?;
        ValueType::from_name(&token.lexeme)
    }
}
