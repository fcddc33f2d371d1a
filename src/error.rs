/// Advisory diagnostics.
///
/// Lexical, syntactic and semantic problems are collected as [`Diagnostic`]
/// values instead of aborting the phase that found them. Every diagnostic
/// carries the line, a message and the offending lexeme so that callers can
/// render them however they like.
pub mod diagnostic;
/// The error returned by the convenience entry point `get_output`.
pub mod lolz_error;
/// Runtime errors.
///
/// Contains all errors that abort an execution: unknown variables and
/// functions, arity mismatches, division by zero, failed casts and integer
/// overflow.
pub mod runtime_error;

pub use diagnostic::{Diagnostic, Phase};
pub use lolz_error::LolzError;
pub use runtime_error::RuntimeError;
