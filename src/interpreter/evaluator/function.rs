use tracing::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter, MAX_CALL_DEPTH},
            io::Io,
            scope::Variable,
        },
        value::core::Value,
    },
};

impl<I: Io> Interpreter<I> {
    /// Calls a user-defined function.
    ///
    /// Arguments are evaluated in the caller's scope, then bound positionally
    /// in a fresh scope that is popped again however the body ends. The
    /// returned value, or `NOOB` when the body has no `FOUND YR`, is also
    /// stored in `IT`.
    pub(super) fn call_function(&mut self, name: &str, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        let def = self.functions
                      .get(name)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                     line })?;

        if def.params.len() != arguments.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: def.params.len(),
                                                             found: arguments.len(),
                                                             line });
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH,
                                                         line });
        }

        let values = arguments.iter()
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        trace!(function = name, depth = self.depth, "calling function");

        self.scopes.push();
        for (param, value) in def.params.iter().zip(values) {
            self.scopes.declare(param, Variable::with_value(value));
        }

        self.depth += 1;
        let result = self.execute_block(&def.body);
        self.depth -= 1;
        self.scopes.pop();

        let value = match result? {
            Flow::Return(value) => value,
            Flow::Next | Flow::Break => Value::Noob,
        };
        self.it = value.clone();
        Ok(value)
    }
}
