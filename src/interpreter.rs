/// The semantic analyzer checks scoping and typing before execution.
///
/// It walks the AST once with a stack of scopes and an approximate type for
/// every expression, including the implicit `IT` register. Everything it
/// reports is advisory.
///
/// # Responsibilities
/// - Declarations inside `WAZZUP`, redeclarations, undeclared and
///   uninitialized reads.
/// - Result types of operators and assignment compatibility.
/// - Function arity, return type consistency, misplaced `GTFO` and `FOUND YR`.
pub mod analyzer;
/// The evaluator executes the AST.
///
/// A tree-walking interpreter with implicit coercion, the `IT` register,
/// scoped variables and user-defined functions.
///
/// # Responsibilities
/// - Executes statements and evaluates expressions.
/// - Manages the scope stack and the function table.
/// - Reports runtime errors such as division by zero or unknown variables.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens for keywords,
/// literals and identifiers, each with a line and column. This is the first
/// stage of interpretation.
///
/// # Responsibilities
/// - Recognizes multi-word keywords as single tokens.
/// - Drops comments and whitespace while keeping line numbers right.
/// - Turns unrecognized input into `Unknown` tokens instead of failing.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Validates the grammar, reporting problems with line information.
/// - Recovers from errors so that parsing always completes.
pub mod parser;
/// The value module defines the runtime data types.
///
/// # Responsibilities
/// - Defines the `Value` enum and its type tags.
/// - Implements every conversion between types in one table.
/// - Provides truth values and loose equality.
pub mod value;
