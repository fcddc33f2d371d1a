use thiserror::Error;

use crate::error::{Diagnostic, RuntimeError};

/// Why a program produced no complete output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LolzError {
    /// The program has lexical or syntax errors and was not run.
    #[error("{}", summarize(.0))]
    Syntax(Vec<Diagnostic>),
    /// The program stopped with a runtime error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "Program was not run".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
