use crate::{
    ast::{BinaryOperator, Expr, NaryOperator, Operand, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            io::Io,
        },
        value::{coercion::CastMode, core::Value},
    },
    util::num::i64_to_f64,
};

impl<I: Io> Interpreter<I> {
    /// Evaluates an expression to a value.
    ///
    /// Operands are evaluated left to right. Reading a declared but
    /// uninitialized variable yields `NOOB`.
    pub(super) fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Operand { operand, line } => match operand {
                Operand::Literal(literal) => Ok(Value::from(literal)),
                Operand::Variable(name) => {
                    self.scopes
                        .lookup(name)
                        .map(|variable| variable.value.clone())
                        .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                       line: *line, })
                },
                Operand::It => Ok(self.it.clone()),
            },
            Expr::BinaryOp { op,
                             left,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_binary(*op, &left, &right, *line)
            },
            Expr::UnaryOp { op: UnaryOperator::Not,
                            operand,
                            .. } => Ok(Value::Troof(!self.eval(operand)?.to_troof())),
            Expr::NaryOp { op, operands, .. } => {
                let values = operands.iter()
                                     .map(|operand| self.eval(operand))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(match op {
                    NaryOperator::AllOf => Value::Troof(values.iter().all(Value::to_troof)),
                    NaryOperator::AnyOf => Value::Troof(values.iter().any(Value::to_troof)),
                    NaryOperator::Smoosh => Value::Yarn(values.iter().map(Value::to_yarn).collect()),
                })
            },
            Expr::TypeCast { expr, target, line } => {
                self.eval(expr)?.cast(*target, CastMode::Explicit, *line)
            },
            Expr::FuncCall { name,
                             arguments,
                             line, } => self.call_function(name, arguments, *line),
        }
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// # Errors
/// Returns an error for a zero divisor, integer overflow, or an operand that
/// cannot be used as a number.
///
/// # Example
/// ```
/// use lolz::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::{evaluator::expression::eval_binary, value::core::Value},
/// };
///
/// let sum = eval_binary(BinaryOperator::Sum, &Value::Numbr(3), &Value::Numbar(2.5), 1);
/// assert_eq!(sum, Ok(Value::Numbar(5.5)));
///
/// let quotient = eval_binary(BinaryOperator::Quoshunt, &Value::Numbr(7), &Value::Numbr(2), 1);
/// assert_eq!(quotient, Ok(Value::Numbar(3.5)));
///
/// let error = eval_binary(BinaryOperator::Mod, &Value::Numbr(7), &Value::Numbr(0), 3);
/// assert_eq!(error, Err(RuntimeError::DivisionByZero { line: 3 }));
/// ```
pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match op {
        BinaryOperator::BothOf => Ok(Value::Troof(left.to_troof() && right.to_troof())),
        BinaryOperator::EitherOf => Ok(Value::Troof(left.to_troof() || right.to_troof())),
        BinaryOperator::WonOf => Ok(Value::Troof(left.to_troof() ^ right.to_troof())),
        BinaryOperator::BothSaem => Ok(Value::Troof(left.loose_eq(right))),
        BinaryOperator::Diffrint => Ok(Value::Troof(!left.loose_eq(right))),
        BinaryOperator::Sum
        | BinaryOperator::Diff
        | BinaryOperator::Produkt
        | BinaryOperator::Quoshunt
        | BinaryOperator::Mod
        | BinaryOperator::Biggr
        | BinaryOperator::Smallr => eval_arithmetic(op, &left.to_numeric(line)?, &right.to_numeric(line)?, line),
    }
}

/// Arithmetic on numeric operands. Two numbrs stay a numbr, anything else is
/// done in floating point. Quotients are always numbars.
fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match (left, right) {
        (Value::Numbr(a), Value::Numbr(b)) if op != BinaryOperator::Quoshunt => {
            integer_op(op, *a, *b, line).map(Value::Numbr)
        },
        _ => float_op(op, as_f64(left), as_f64(right), line).map(Value::Numbar),
    }
}

fn integer_op(op: BinaryOperator, a: i64, b: i64, line: usize) -> EvalResult<i64> {
    let result = match op {
        BinaryOperator::Sum => a.checked_add(b),
        BinaryOperator::Diff => a.checked_sub(b),
        BinaryOperator::Produkt => a.checked_mul(b),
        BinaryOperator::Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            a.checked_rem(b)
        },
        BinaryOperator::Biggr => Some(a.max(b)),
        BinaryOperator::Smallr => Some(a.min(b)),
        _ => {
            return Err(RuntimeError::TypeError { details: format!("'{op}' is not an integer operator"),
                                                 line });
        },
    };
    result.ok_or(RuntimeError::Overflow { line })
}

fn float_op(op: BinaryOperator, a: f64, b: f64, line: usize) -> EvalResult<f64> {
    match op {
        BinaryOperator::Sum => Ok(a + b),
        BinaryOperator::Diff => Ok(a - b),
        BinaryOperator::Produkt => Ok(a * b),
        BinaryOperator::Quoshunt | BinaryOperator::Mod if b == 0.0 => Err(RuntimeError::DivisionByZero { line }),
        BinaryOperator::Quoshunt => Ok(a / b),
        BinaryOperator::Mod => Ok(a % b),
        BinaryOperator::Biggr => Ok(a.max(b)),
        BinaryOperator::Smallr => Ok(a.min(b)),
        _ => Err(RuntimeError::TypeError { details: format!("'{op}' is not an arithmetic operator"),
                                           line }),
    }
}

const fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Numbr(n) => i64_to_f64(*n),
        Value::Numbar(x) => *x,
        _ => 0.0,
    }
}
