use thiserror::Error;

use crate::interpreter::value::core::ValueType;

/// Represents all errors that abort an execution.
///
/// A runtime error stops the current program only. It is returned to the
/// caller as a value and never unwinds through the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read or write a variable that is not declared in any scope.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that has not been defined yet.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s), but {found} were given.")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `QUOSHUNT OF` or `MOD OF` with a zero divisor.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value could not be converted to the requested type.
    #[error("Error on line {line}: Cannot cast '{value}' to {target}.")]
    CastFailed {
        /// The rendered value that failed to convert.
        value:  String,
        /// The requested type.
        target: ValueType,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Numbr arithmetic overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Function calls nested deeper than the interpreter allows.
    #[error("Error on line {line}: Call depth exceeded {limit} nested calls.")]
    CallDepthExceeded {
        /// The maximum call depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl RuntimeError {
    /// Gets the line number from `self`.
    ///
    /// ## Example
    /// ```
    /// use lolz::error::RuntimeError;
    ///
    /// let error = RuntimeError::DivisionByZero { line: 4 };
    /// assert_eq!(error.line_number(), 4);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::UnknownVariable { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::DivisionByZero { line }
            | Self::CastFailed { line, .. }
            | Self::TypeError { line, .. }
            | Self::Overflow { line }
            | Self::CallDepthExceeded { line, .. } => *line,
        }
    }
}
