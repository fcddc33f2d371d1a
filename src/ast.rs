use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::interpreter::value::core::{Value, ValueType};

/// Represents a literal value in the language.
///
/// `Literal` covers the constants that can appear directly in source code. It
/// is `Eq + Hash` so that switch case keys can be compared and collected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// A `NUMBR` literal such as `42`.
    Numbr(i64),
    /// A `NUMBAR` literal such as `3.14`.
    Numbar(OrderedFloat<f64>),
    /// A `YARN` literal with quotes removed and escapes resolved.
    Yarn(String),
    /// A `TROOF` literal, `WIN` or `FAIL`.
    Troof(bool),
}

impl Literal {
    /// The type of the value this literal produces.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Numbr(_) => ValueType::Numbr,
            Self::Numbar(_) => ValueType::Numbar,
            Self::Yarn(_) => ValueType::Yarn,
            Self::Troof(_) => ValueType::Troof,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Numbr(n) => Self::Numbr(*n),
            Literal::Numbar(x) => Self::Numbar(x.into_inner()),
            Literal::Yarn(s) => Self::Yarn(s.clone()),
            Literal::Troof(b) => Self::Troof(*b),
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Value::from(self))
    }
}

/// The leaves of an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// A constant.
    Literal(Literal),
    /// Reference to a variable by name.
    Variable(String),
    /// The implicit `IT` register.
    It,
}

/// Binary operators. Both operands are separated by `AN`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// `SUM OF`
    Sum,
    /// `DIFF OF`
    Diff,
    /// `PRODUKT OF`
    Produkt,
    /// `QUOSHUNT OF`
    Quoshunt,
    /// `MOD OF`
    Mod,
    /// `BIGGR OF`, the larger operand.
    Biggr,
    /// `SMALLR OF`, the smaller operand.
    Smallr,
    /// `BOTH OF`, logical and.
    BothOf,
    /// `EITHER OF`, logical or.
    EitherOf,
    /// `WON OF`, logical xor.
    WonOf,
    /// `BOTH SAEM`, equality.
    BothSaem,
    /// `DIFFRINT`, inequality.
    Diffrint,
}

impl BinaryOperator {
    /// Returns `true` for the numeric operators.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(self,
                 Self::Sum
                 | Self::Diff
                 | Self::Produkt
                 | Self::Quoshunt
                 | Self::Mod
                 | Self::Biggr
                 | Self::Smallr)
    }
}

/// Unary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// `NOT`
    Not,
}

/// Operators taking any number of operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NaryOperator {
    /// `ALL OF ... MKAY`, true if every operand is true.
    AllOf,
    /// `ANY OF ... MKAY`, true if some operand is true.
    AnyOf,
    /// `SMOOSH ... MKAY`, string concatenation.
    Smoosh,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Sum => "SUM OF",
            Self::Diff => "DIFF OF",
            Self::Produkt => "PRODUKT OF",
            Self::Quoshunt => "QUOSHUNT OF",
            Self::Mod => "MOD OF",
            Self::Biggr => "BIGGR OF",
            Self::Smallr => "SMALLR OF",
            Self::BothOf => "BOTH OF",
            Self::EitherOf => "EITHER OF",
            Self::WonOf => "WON OF",
            Self::BothSaem => "BOTH SAEM",
            Self::Diffrint => "DIFFRINT",
        };
        write!(f, "{operator}")
    }
}

/// An abstract syntax tree (AST) node representing an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum Expr {
    /// A binary operation such as `SUM OF a AN b`.
    BinaryOp {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A unary operation, `NOT x`.
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// An operation over a variable number of operands.
    NaryOp {
        /// The operator.
        op:       NaryOperator,
        /// The operands, in source order.
        operands: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// An explicit cast, `MAEK expr A TYPE`.
    TypeCast {
        /// The expression to convert.
        expr:   Box<Self>,
        /// The requested type.
        target: ValueType,
        /// Line number in the source code.
        line:   usize,
    },
    /// A function call, `I IZ name YR arg AN YR arg MKAY`.
    FuncCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A literal, a variable reference or `IT`.
    Operand {
        /// The operand.
        operand: Operand,
        /// Line number in the source code.
        line:    usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use lolz::ast::{Expr, Operand};
    ///
    /// let expr = Expr::Operand { operand: Operand::Variable("x".to_string()),
    ///                            line:    5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::BinaryOp { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::NaryOp { line, .. }
            | Self::TypeCast { line, .. }
            | Self::FuncCall { line, .. }
            | Self::Operand { line, .. } => *line,
        }
    }
}

/// `UPPIN` or `NERFIN`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopStep {
    /// Add one after every iteration.
    Uppin,
    /// Subtract one after every iteration.
    Nerfin,
}

/// The per-iteration update of a loop, `UPPIN YR var`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopOperation {
    /// Increment or decrement.
    pub step:     LoopStep,
    /// The variable to update.
    pub variable: String,
}

/// Whether a loop condition stops on true or on false.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    /// `TIL`: stop once the condition is true.
    Til,
    /// `WILE`: stop once the condition is false.
    Wile,
}

/// The pre-condition checked before every loop iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopCondition {
    /// `TIL` or `WILE`.
    pub kind: ConditionKind,
    /// The condition expression.
    pub expr: Expr,
}

/// A `MEBBE` branch of a conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseIf {
    /// Evaluated into `IT` and tested.
    pub condition: Expr,
    /// Statements run when the condition holds.
    pub body:      Vec<Statement>,
    /// Line number in the source code.
    pub line:      usize,
}

/// An `OMG` branch of a switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    /// The key compared against `IT`.
    pub literal: Literal,
    /// Statements run when the key matches.
    pub body:    Vec<Statement>,
    /// Line number in the source code.
    pub line:    usize,
}

/// Represents a user-defined function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The positional parameter names.
    pub params: Vec<String>,
    /// The statements run when the function is called.
    pub body:   Vec<Statement>,
    /// Line number in the source code.
    pub line:   usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node")]
pub enum Statement {
    /// `I HAS A name`, optionally followed by `ITZ expr` or `ITZ A TYPE`.
    VarDecl {
        /// The name of the variable.
        name:          String,
        /// The initial value, if any.
        value:         Option<Expr>,
        /// The declared type from `ITZ A TYPE`, if any.
        declared_type: Option<ValueType>,
        /// Line number in the source code.
        line:          usize,
    },
    /// `name R expr`.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name IS NOW A TYPE`.
    TypeCast {
        /// The variable to convert in place.
        name:   String,
        /// The requested type.
        target: ValueType,
        /// Line number in the source code.
        line:   usize,
    },
    /// `VISIBLE expr ...`.
    Visible {
        /// The values to print, concatenated without separators.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `GIMMEH name`.
    Input {
        /// The variable that receives the line of input.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `O RLY? YA RLY ... [MEBBE ...]* [NO WAI ...] OIC`.
    If {
        /// Runs when `IT` is true.
        then_branch: Vec<Statement>,
        /// `MEBBE` branches in source order.
        else_ifs:    Vec<ElseIf>,
        /// Runs when nothing else matched.
        else_branch: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `WTF? [OMG literal ...]+ [OMGWTF ...] OIC`.
    Switch {
        /// Cases in source order.
        cases:   Vec<SwitchCase>,
        /// Runs when no case matched.
        default: Option<Vec<Statement>>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `IM IN YR label [UPPIN|NERFIN YR var] [TIL|WILE expr] ... IM OUTTA YR
    /// label`.
    Loop {
        /// The loop label.
        label:     Option<String>,
        /// The update applied after every iteration.
        operation: Option<LoopOperation>,
        /// The condition checked before every iteration.
        condition: Option<LoopCondition>,
        /// The loop body.
        body:      Vec<Statement>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `HOW IZ I name [YR param [AN YR param]*] ... IF U SAY SO`.
    FuncDef(FunctionDef),
    /// `FOUND YR expr`.
    Return {
        /// The returned value.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `GTFO`.
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// An expression used as a statement. Its value is stored in `IT`.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// Gets the line number from `self`.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::FuncDef(def) => def.line,
            Self::VarDecl { line, .. }
            | Self::Assignment { line, .. }
            | Self::TypeCast { line, .. }
            | Self::Visible { line, .. }
            | Self::Input { line, .. }
            | Self::If { line, .. }
            | Self::Switch { line, .. }
            | Self::Loop { line, .. }
            | Self::Return { line, .. }
            | Self::Break { line }
            | Self::Expression { line, .. } => *line,
        }
    }
}

/// The `WAZZUP ... BUHBYE` declaration block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarBlock {
    /// Statements found inside the block.
    pub declarations: Vec<Statement>,
    /// Line number of `WAZZUP`.
    pub line:         usize,
}

/// A whole program, `HAI ... KTHXBYE`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// The version written after `HAI`, if any.
    pub version:   Option<String>,
    /// The declaration block, if present.
    pub var_block: Option<VarBlock>,
    /// The main statement sequence.
    pub body:      Vec<Statement>,
}

impl Program {
    /// Counts top-level statements, including those of the declaration block.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.var_block.as_ref().map_or(0, |block| block.declarations.len()) + self.body.len()
    }
}
