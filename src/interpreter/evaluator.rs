/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, statement execution, the `Flow` signal used
/// for `GTFO` and `FOUND YR`, and the call depth limit.
pub mod core;

/// Expression evaluation.
///
/// Operands, arithmetic with checked integers, boolean and comparison
/// operators, `SMOOSH`, and `MAEK`.
pub mod expression;

/// Conditionals, switches and loops.
pub mod control;

/// User-defined function calls.
///
/// Handles arity checks, argument binding, scope entry and exit, and return
/// values.
pub mod function;

/// Variable storage.
///
/// The scope arena with its stack of active scopes.
pub mod scope;

/// Input and output channels for `GIMMEH` and `VISIBLE`.
pub mod io;
