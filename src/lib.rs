//! # lolz
//!
//! lolz is a LOLCODE interpreter written in Rust.
//! Source text goes through a scanner, a recovering recursive descent parser,
//! an advisory semantic analyzer and a tree-walking evaluator with implicit
//! coercion and the `IT` register.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::{debug, warn};

use crate::{
    error::{Diagnostic, LolzError, RuntimeError},
    interpreter::{
        analyzer::core::analyze,
        evaluator::{
            core::Interpreter,
            io::{Io, ScriptedIo},
        },
        lexer::scan,
        parser::core::parse,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Program`, `Statement` and `Expr` types that
/// represent the syntactic structure of a program as a tree. The AST is built
/// by the parser, checked by the analyzer and walked by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source lines to every node for error reporting.
/// - Serializes with serde for `--emit ast`.
pub mod ast;
/// Provides error types for every phase.
///
/// # Responsibilities
/// - Defines diagnostics for lexing, parsing and analysis.
/// - Defines the runtime errors that stop an execution.
/// - Attaches line numbers and detailed messages for context.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, analysis, evaluation and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, analyzer, evaluator,
///   and value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numbers.
pub mod util;

/// Controls what [`run`] does before and instead of executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Run the semantic analyzer and include its diagnostics.
    pub analyze: bool,
    /// Execute even when there are lexical or syntax errors.
    pub force:   bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { analyze: true,
               force:   false, }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Diagnostics from every phase that ran.
    pub diagnostics: Vec<Diagnostic>,
    /// Output records, in order.
    pub output:      Vec<String>,
    /// The runtime error that stopped execution, if any.
    pub error:       Option<RuntimeError>,
    /// Whether the program was executed at all.
    pub executed:    bool,
}

impl RunReport {
    /// The output records followed by a single error record when execution
    /// failed.
    #[must_use]
    pub fn records(&self) -> Vec<String> {
        self.output
            .iter()
            .cloned()
            .chain(self.error.iter().map(ToString::to_string))
            .collect()
    }

    /// Returns `true` if the program ran to completion.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.executed && self.error.is_none()
    }
}

/// Runs the whole pipeline on `source`.
///
/// Lexical and syntax diagnostics prevent execution unless
/// [`RunOptions::force`] is set. Semantic diagnostics never do.
///
/// # Example
/// ```
/// use lolz::{RunOptions, interpreter::evaluator::io::ScriptedIo, run};
///
/// let source = "HAI\nWAZZUP\nI HAS A name\nBUHBYE\nGIMMEH name\nVISIBLE \"HAI \" name\nKTHXBYE";
/// let report = run(source, ScriptedIo::new(["CEILING CAT"]), RunOptions { analyze: false,
///                                                                         force:   false, });
///
/// assert!(report.is_success());
/// assert_eq!(report.output, ["HAI CEILING CAT"]);
/// ```
pub fn run<I: Io>(source: &str, io: I, options: RunOptions) -> RunReport {
    let tokens = scan(source);
    let (program, mut diagnostics) = parse(&tokens);

    if options.analyze {
        diagnostics.extend(analyze(&program));
    }

    if diagnostics.iter().any(Diagnostic::is_blocking) && !options.force {
        warn!(diagnostics = diagnostics.len(), "not running a program with syntax errors");
        return RunReport { diagnostics,
                           ..RunReport::default() };
    }

    let mut interpreter = Interpreter::new(io);
    let error = interpreter.execute(&program).err();
    debug!(failed = error.is_some(), "run finished");

    RunReport { diagnostics,
                output: interpreter.output().to_vec(),
                error,
                executed: true }
}

/// Runs `source` with scripted input and returns its output records.
///
/// # Errors
/// Returns [`LolzError::Syntax`] if the program has lexical or syntax errors
/// and [`LolzError::Runtime`] if execution fails.
///
/// # Examples
/// ```
/// use lolz::get_output;
///
/// let source = "HAI\nI HAS A x ITZ 17\nVISIBLE x\nKTHXBYE";
/// assert_eq!(get_output(source, &[]).unwrap(), ["17"]);
///
/// // Division by zero stops the program.
/// let source = "HAI\nVISIBLE QUOSHUNT OF 1 AN 0\nKTHXBYE";
/// assert!(get_output(source, &[]).is_err());
/// ```
pub fn get_output(source: &str, input: &[&str]) -> Result<Vec<String>, LolzError> {
    let report = run(source,
                     ScriptedIo::new(input.iter().copied()),
                     RunOptions { analyze: false,
                                  force:   false, });

    if !report.executed {
        return Err(LolzError::Syntax(report.diagnostics));
    }
    match report.error {
        Some(error) => Err(error.into()),
        None => Ok(report.output),
    }
}
