use serde::{Deserialize, Serialize};

use crate::interpreter::lexer::Token;

/// The pipeline phase that reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Unrecognized input found by the scanner.
    Lexical,
    /// Unexpected or missing tokens found by the parser.
    Syntactic,
    /// Scoping and typing problems found by the semantic analyzer.
    Semantic,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntactic => write!(f, "syntax"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

/// A problem found before execution.
///
/// Diagnostics never stop the phase that produced them; they accumulate and
/// are returned alongside a best-effort result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The phase that reported the problem.
    pub phase:   Phase,
    /// The source line where the problem occurred.
    pub line:    usize,
    /// What went wrong.
    pub message: String,
    /// The offending source text, empty at end of input.
    pub lexeme:  String,
}

impl Diagnostic {
    /// Creates a diagnostic pointing at `token`.
    #[must_use]
    pub fn at(phase: Phase, token: &Token, message: impl Into<String>) -> Self {
        Self { phase,
               line: token.line,
               message: message.into(),
               lexeme: token.lexeme.clone() }
    }

    /// Creates a semantic diagnostic that is not tied to a single token.
    #[must_use]
    pub fn semantic(line: usize, message: impl Into<String>, lexeme: impl Into<String>) -> Self {
        Self { phase: Phase::Semantic,
               line,
               message: message.into(),
               lexeme: lexeme.into() }
    }

    /// Returns `true` for diagnostics that make a program unfit to run by
    /// default, that is lexical and syntactic ones.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.phase, Phase::Lexical | Phase::Syntactic)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "Line {}: {} error: {} (token: '{}')",
               self.line, self.phase, self.message, self.lexeme)
    }
}
