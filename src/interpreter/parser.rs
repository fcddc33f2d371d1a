/// Parser state, token cursor and error recovery.
///
/// Holds the `Parser` type, the `parse` entry point, the program production
/// and the stop-token sets that recovery skips to.
pub mod core;

/// Block parsing.
///
/// Statement sequences, the `WAZZUP` declaration block, and reporting of
/// missing or stray block closers.
pub mod block;

/// Expression parsing.
///
/// Prefix operators, n-ary forms, casts, calls, operands and literals,
/// including yarn escape handling.
pub mod expression;

/// Statement parsing.
///
/// Declarations, assignments, casts, I/O, conditionals, switches, loops and
/// function definitions.
pub mod statement;
