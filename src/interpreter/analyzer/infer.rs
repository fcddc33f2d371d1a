use crate::{
    ast::{BinaryOperator, Expr, Literal, NaryOperator, Operand},
    interpreter::{
        analyzer::core::{Analyzer, SemType},
        value::{
            coercion::{CastMode, CastRule, cast_rule},
            core::ValueType,
        },
    },
    util::num::parse_numeric,
};

impl Analyzer {
    /// Infers the type of an expression, reporting problems in its operands
    /// along the way.
    pub(super) fn expr_type(&mut self, expr: &Expr) -> SemType {
        match expr {
            Expr::Operand { operand, line } => match operand {
                Operand::Literal(literal) => SemType::from(literal.value_type()),
                Operand::Variable(name) => self.variable_type(name, *line),
                Operand::It => self.it,
            },
            Expr::BinaryOp { op, left, right, .. } => {
                let left = self.expr_type(left);
                let right = self.expr_type(right);
                binary_type(*op, left, right)
            },
            Expr::UnaryOp { operand, .. } => {
                self.expr_type(operand);
                SemType::Troof
            },
            Expr::NaryOp { op, operands, .. } => {
                for operand in operands {
                    self.expr_type(operand);
                }
                match op {
                    NaryOperator::AllOf | NaryOperator::AnyOf => SemType::Troof,
                    NaryOperator::Smoosh => SemType::Yarn,
                }
            },
            Expr::TypeCast { expr, target, line } => {
                let from = self.expr_type(expr);
                let unparsable = matches!(expr.as_ref(),
                                          Expr::Operand { operand: Operand::Literal(Literal::Yarn(text)), .. }
                                          if target.is_numeric() && parse_numeric(text).is_none());

                if unparsable {
                    self.report(*line, format!("Invalid cast from {from} to {target}"), &target.to_string());
                } else {
                    self.check_cast(from, *target, *line, &target.to_string());
                }
                SemType::from(*target)
            },
            Expr::FuncCall { name, arguments, line } => {
                for argument in arguments {
                    self.expr_type(argument);
                }

                match self.functions.get(name).cloned() {
                    None => {
                        self.report(*line, format!("Call to undefined function '{name}'"), name);
                        SemType::Wtf
                    },
                    Some(signature) if signature.arity != arguments.len() => {
                        self.report(*line,
                                    format!("Function '{name}' expects {} argument(s), found {}",
                                            signature.arity,
                                            arguments.len()),
                                    name);
                        SemType::Wtf
                    },
                    Some(signature) => signature.returns,
                }
            },
        }
    }

    /// The type of a variable read, or `Wtf` after reporting why it cannot be
    /// read. Uninitialized reads are allowed as `VISIBLE` arguments.
    pub(super) fn variable_type(&mut self, name: &str, line: usize) -> SemType {
        let Some(symbol) = self.lookup(name) else {
            self.report(line, format!("Undeclared variable '{name}'"), name);
            return SemType::Wtf;
        };

        if !symbol.initialized && !self.in_visible {
            self.report(line, format!("Use of uninitialized variable '{name}'"), name);
            return SemType::Wtf;
        }
        symbol.current
    }

    /// Reports a cast the conversion table does not allow. Operands that
    /// already failed are not reported again.
    pub(super) fn check_cast(&mut self, from: SemType, to: ValueType, line: usize, lexeme: &str) {
        let valid = match from {
            SemType::Any | SemType::Wtf => true,
            known => known.runtime()
                          .is_some_and(|from| cast_rule(from, to, CastMode::Explicit) != CastRule::Forbidden),
        };

        if !valid {
            self.report(line, format!("Invalid cast from {from} to {to}"), lexeme);
        }
    }
}

/// Result type of a binary operator.
///
/// Arithmetic stays `NUMBR` when both sides are integer-like, promotes to
/// `NUMBAR` when either side is, and is unknown when a yarn is involved.
/// `QUOSHUNT OF` always yields `NUMBAR`.
fn binary_type(op: BinaryOperator, left: SemType, right: SemType) -> SemType {
    let integer_like = |ty: SemType| matches!(ty, SemType::Numbr | SemType::Troof | SemType::Noob);
    let numeric_like = |ty: SemType| integer_like(ty) || ty == SemType::Numbar;

    if !op.is_arithmetic() {
        return SemType::Troof;
    }
    if left == SemType::Wtf || right == SemType::Wtf {
        return SemType::Wtf;
    }
    if op == BinaryOperator::Quoshunt {
        return SemType::Numbar;
    }

    if integer_like(left) && integer_like(right) {
        SemType::Numbr
    } else if numeric_like(left) && numeric_like(right) {
        SemType::Numbar
    } else {
        SemType::Any
    }
}
