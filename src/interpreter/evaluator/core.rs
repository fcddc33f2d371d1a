use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{FunctionDef, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            io::Io,
            scope::{ScopeArena, Variable},
        },
        value::{coercion::CastMode, core::Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum number of nested function calls. Sized to fit a 2 MiB thread
/// stack.
pub const MAX_CALL_DEPTH: usize = 200;

/// How control leaves a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Continue with the next statement.
    Next,
    /// `GTFO` was executed.
    Break,
    /// `FOUND YR` was executed with this value.
    Return(Value),
}

/// Stores the runtime state of one program execution.
///
/// An `Interpreter` owns all mutable state: the scope arena, the function
/// table, the `IT` register and the output records. It can run any number of
/// programs; every call to [`Interpreter::execute`] starts from a clean state.
/// Separate interpreters share nothing.
pub struct Interpreter<I: Io> {
    pub(super) scopes:    ScopeArena,
    pub(super) functions: HashMap<String, Rc<FunctionDef>>,
    pub(super) it:        Value,
    pub(super) output:    Vec<String>,
    pub(super) io:        I,
    pub(super) depth:     usize,
}

impl<I: Io> Interpreter<I> {
    /// Creates an interpreter that talks to `io`.
    pub fn new(io: I) -> Self {
        Self { scopes: ScopeArena::new(),
               functions: HashMap::new(),
               it: Value::Noob,
               output: Vec::new(),
               io,
               depth: 0 }
    }

    /// Runs a program from a clean state.
    ///
    /// The declaration block runs first, then the body. A `GTFO` or `FOUND
    /// YR` outside of any loop, switch or function ends the program.
    ///
    /// # Errors
    /// Returns the first runtime error. Output produced before the error is
    /// kept and available through [`Interpreter::output`].
    ///
    /// # Example
    /// ```
    /// use lolz::interpreter::{
    ///     evaluator::{core::Interpreter, io::ScriptedIo},
    ///     lexer::scan,
    ///     parser::core::parse,
    /// };
    ///
    /// let (program, _) = parse(&scan("HAI\nVISIBLE SUM OF 3 AN 2.5\nKTHXBYE"));
    /// let mut interpreter = Interpreter::new(ScriptedIo::default());
    ///
    /// interpreter.execute(&program).unwrap();
    /// assert_eq!(interpreter.output(), ["5.5"]);
    /// ```
    pub fn execute(&mut self, program: &Program) -> EvalResult<()> {
        self.reset();
        debug!(statements = program.statement_count(), "executing program");

        let blocks = program.var_block
                            .iter()
                            .map(|block| block.declarations.as_slice())
                            .chain(std::iter::once(program.body.as_slice()));

        for block in blocks.clone() {
            self.hoist_functions(block);
        }

        for block in blocks {
            let flow = self.execute_block(block).inspect_err(|e| debug!(error = %e, "execution failed"))?;
            if flow != Flow::Next {
                break;
            }
        }

        debug!(records = self.output.len(), "execution finished");
        Ok(())
    }

    /// The output records produced by the last execution.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The current value of `IT`.
    #[must_use]
    pub const fn it(&self) -> &Value {
        &self.it
    }

    /// The value of a global variable.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.scopes
            .globals()
            .find(|(variable, _)| variable.as_str() == name)
            .map(|(_, variable)| &variable.value)
    }

    /// Gives back the I/O channel.
    pub fn into_io(self) -> I {
        self.io
    }

    fn reset(&mut self) {
        self.scopes.reset();
        self.functions.clear();
        self.it = Value::Noob;
        self.output.clear();
        self.depth = 0;
    }

    /// Registers the functions defined directly in `statements`, so that a
    /// call may come before the definition in the same block.
    fn hoist_functions(&mut self, statements: &[Statement]) {
        for statement in statements {
            if let Statement::FuncDef(def) = statement {
                self.functions.insert(def.name.clone(), Rc::new(def.clone()));
            }
        }
    }

    /// Executes statements in order until one of them leaves the block.
    pub(super) fn execute_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            let flow = self.execute_statement(statement)?;
            if flow != Flow::Next {
                return Ok(flow);
            }
        }
        Ok(Flow::Next)
    }

    /// Executes a single statement.
    ///
    /// Assignments and expression statements store their value in `IT`.
    /// Declarations, output and input leave `IT` alone.
    pub(super) fn execute_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VarDecl { name,
                                 value,
                                 declared_type,
                                 .. } => {
                let variable = match (value, declared_type) {
                    (Some(expr), _) => Variable::with_value(self.eval(expr)?),
                    (None, Some(ty)) => Variable { declared_type: *ty,
                                                   value:         ty.default_value(),
                                                   initialized:   true, },
                    (None, None) => Variable::uninitialized(),
                };
                self.scopes.declare(name, variable);
            },
            Statement::Assignment { name, value, line } => {
                let value = self.eval(value)?;
                let variable = self.variable_mut(name, *line)?;
                variable.value = value.clone();
                variable.initialized = true;
                self.it = value;
            },
            Statement::TypeCast { name, target, line } => {
                let variable = self.variable_mut(name, *line)?;
                variable.value = variable.value.cast(*target, CastMode::Explicit, *line)?;
                variable.declared_type = *target;
                variable.initialized = true;
            },
            Statement::Visible { arguments, .. } => {
                let mut record = String::new();
                for argument in arguments {
                    record.push_str(&self.eval(argument)?.to_yarn());
                }
                self.io.write_record(&record);
                self.output.push(record);
            },
            Statement::Input { name, line } => {
                self.variable_mut(name, *line)?;
                let input = self.io.read_line(name).unwrap_or_default();
                let variable = self.variable_mut(name, *line)?;
                variable.value = Value::Yarn(input);
                variable.initialized = true;
            },
            Statement::If { then_branch,
                            else_ifs,
                            else_branch,
                            .. } => return self.execute_if(then_branch, else_ifs, else_branch.as_deref()),
            Statement::Switch { cases, default, .. } => {
                return self.execute_switch(cases, default.as_deref());
            },
            Statement::Loop { operation,
                              condition,
                              body,
                              line,
                              .. } => {
                return self.execute_loop(operation.as_ref(), condition.as_ref(), body, *line);
            },
            Statement::FuncDef(def) => {
                self.functions.insert(def.name.clone(), Rc::new(def.clone()));
            },
            Statement::Return { value, .. } => return Ok(Flow::Return(self.eval(value)?)),
            Statement::Break { .. } => return Ok(Flow::Break),
            Statement::Expression { expr, .. } => {
                self.it = self.eval(expr)?;
            },
        }

        Ok(Flow::Next)
    }

    pub(super) fn variable_mut(&mut self, name: &str, line: usize) -> EvalResult<&mut Variable> {
        self.scopes
            .lookup_mut(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }
}
