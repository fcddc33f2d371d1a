use std::{collections::VecDeque, io::BufRead};

use tracing::warn;

/// Where `GIMMEH` reads from and `VISIBLE` writes to.
pub trait Io {
    /// Reads one line of input for `variable`, without the line terminator.
    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self, variable: &str) -> Option<String>;

    /// Emits one output record.
    fn write_record(&mut self, record: &str);
}

impl<T: Io + ?Sized> Io for &mut T {
    fn read_line(&mut self, variable: &str) -> Option<String> {
        (**self).read_line(variable)
    }

    fn write_record(&mut self, record: &str) {
        (**self).write_record(record);
    }
}

/// Canned input and captured output, for tests and embedding.
///
/// # Example
/// ```
/// use lolz::interpreter::evaluator::io::{Io, ScriptedIo};
///
/// let mut io = ScriptedIo::new(["first"]);
/// assert_eq!(io.read_line("name").as_deref(), Some("first"));
/// assert_eq!(io.read_line("name"), None);
///
/// io.write_record("HAI");
/// assert_eq!(io.records(), ["HAI"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedIo {
    input:   VecDeque<String>,
    records: Vec<String>,
}

impl ScriptedIo {
    /// Queues `lines` as input.
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self { input:   lines.into_iter().map(Into::into).collect(),
               records: Vec::new(), }
    }

    /// Everything written so far.
    #[must_use]
    pub fn records(&self) -> &[String] {
        &self.records
    }
}

impl Io for ScriptedIo {
    fn read_line(&mut self, _variable: &str) -> Option<String> {
        self.input.pop_front()
    }

    fn write_record(&mut self, record: &str) {
        self.records.push(record.to_string());
    }
}

/// Standard input and output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdIo;

impl Io for StdIo {
    fn read_line(&mut self, variable: &str) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            },
            Err(e) => {
                warn!(variable, error = %e, "failed to read input");
                None
            },
        }
    }

    fn write_record(&mut self, record: &str) {
        println!("{record}");
    }
}
