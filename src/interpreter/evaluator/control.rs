use crate::{
    ast::{ConditionKind, ElseIf, LoopCondition, LoopOperation, LoopStep, Statement, SwitchCase},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            io::Io,
        },
        value::core::Value,
    },
};

impl<I: Io> Interpreter<I> {
    /// `O RLY?` tests the current `IT`. Each `MEBBE` evaluates its condition
    /// into `IT` and tests that.
    pub(super) fn execute_if(&mut self,
                             then_branch: &[Statement],
                             else_ifs: &[ElseIf],
                             else_branch: Option<&[Statement]>)
                             -> EvalResult<Flow> {
        if self.it.to_troof() {
            return self.execute_block(then_branch);
        }

        for branch in else_ifs {
            self.it = self.eval(&branch.condition)?;
            if self.it.to_troof() {
                return self.execute_block(&branch.body);
            }
        }

        else_branch.map_or(Ok(Flow::Next), |body| self.execute_block(body))
    }

    /// `WTF?` compares `IT` with each case literal by plain equality. Only the
    /// first matching case runs; a `GTFO` inside it ends the switch.
    pub(super) fn execute_switch(&mut self,
                                 cases: &[SwitchCase],
                                 default: Option<&[Statement]>)
                                 -> EvalResult<Flow> {
        let it = self.it.clone();
        let body = cases.iter()
                        .find(|case| Value::from(&case.literal) == it)
                        .map(|case| case.body.as_slice())
                        .or(default);

        match body {
            Some(body) => match self.execute_block(body)? {
                Flow::Break => Ok(Flow::Next),
                flow => Ok(flow),
            },
            None => Ok(Flow::Next),
        }
    }

    /// Runs a loop: condition, body, then the update.
    ///
    /// `TIL` stops once its condition is true and `WILE` once it is false. A
    /// `GTFO` leaves the loop at once and skips the update.
    pub(super) fn execute_loop(&mut self,
                               operation: Option<&LoopOperation>,
                               condition: Option<&LoopCondition>,
                               body: &[Statement],
                               line: usize)
                               -> EvalResult<Flow> {
        if let Some(operation) = operation {
            self.variable_mut(&operation.variable, line)?;
        }

        loop {
            if let Some(condition) = condition {
                let holds = self.eval(&condition.expr)?.to_troof();
                let done = match condition.kind {
                    ConditionKind::Til => holds,
                    ConditionKind::Wile => !holds,
                };
                if done {
                    break;
                }
            }

            match self.execute_block(body)? {
                Flow::Next => {},
                Flow::Break => break,
                flow @ Flow::Return(_) => return Ok(flow),
            }

            if let Some(operation) = operation {
                self.step(operation, line)?;
            }
        }

        Ok(Flow::Next)
    }

    /// `UPPIN`/`NERFIN`: the loop variable is made numeric, then moved by one.
    fn step(&mut self, operation: &LoopOperation, line: usize) -> EvalResult<()> {
        let variable = self.variable_mut(&operation.variable, line)?;
        let delta: i64 = match operation.step {
            LoopStep::Uppin => 1,
            LoopStep::Nerfin => -1,
        };

        variable.value = match variable.value.to_numeric(line)? {
            Value::Numbr(n) => Value::Numbr(n.checked_add(delta).ok_or(RuntimeError::Overflow { line })?),
            Value::Numbar(x) => Value::Numbar(x + if delta > 0 { 1.0 } else { -1.0 }),
            other => other,
        };
        variable.initialized = true;
        Ok(())
    }
}
