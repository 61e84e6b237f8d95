//! Statement and program execution.

use deepcoder_ir::{Operation, Program, Statement, Value};
use tracing::{debug, trace};

use crate::operations::{self, Argument};
use crate::{ProgramState, RunConfig, RunError};

/// Executes statements and programs under a fixed [`RunConfig`].
///
/// Runs return `Ok(None)` when the program is well-formed but undefined
/// for the given inputs, and `Err` when the program or the call itself is
/// malformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    config: RunConfig,
}

impl Interpreter {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> RunConfig {
        self.config
    }

    /// Apply a single operation under this interpreter's configuration.
    pub fn apply_operation(
        &self,
        operation: Operation,
        args: &[Argument],
    ) -> Result<Option<Value>, RunError> {
        operations::apply(operation, args, self.config)
    }

    /// Run one statement against `state`, returning the extended state.
    ///
    /// `state` itself is left unchanged.
    pub fn run_statement(
        &self,
        statement: &Statement,
        state: &ProgramState,
    ) -> Result<Option<ProgramState>, RunError> {
        let mut next = state.clone();
        Ok(self.execute(statement, &mut next)?.then_some(next))
    }

    /// Run a whole program on `inputs`.
    ///
    /// An input outside the value bound, or any statement without a result,
    /// aborts the run; no partial state is returned.
    pub fn run_program(
        &self,
        program: &Program,
        inputs: Vec<Value>,
    ) -> Result<Option<ProgramState>, RunError> {
        if inputs.len() != program.num_inputs() {
            return Err(RunError::InputCount {
                expected: program.num_inputs(),
                got: inputs.len(),
            });
        }
        if let Some(index) = inputs.iter().position(|input| !input.is_valid()) {
            debug!(index, "input out of bounds");
            return Ok(None);
        }

        let mut state = ProgramState::new(inputs);
        for statement in program.statements() {
            if !self.execute(statement, &mut state)? {
                return Ok(None);
            }
        }
        Ok(Some(state))
    }

    /// Execute `statement` in place. Returns `false` when it has no result,
    /// in which case `state` is unchanged.
    fn execute(&self, statement: &Statement, state: &mut ProgramState) -> Result<bool, RunError> {
        if statement.lhs() != state.len() {
            return Err(RunError::LhsIndex {
                expected: state.len(),
                got: statement.lhs(),
            });
        }

        let mut args = Vec::with_capacity(statement.operation().arity());
        if let Some(lambda) = statement.lambda() {
            args.push(Argument::Lambda(lambda));
        }
        for &index in statement.args() {
            args.push(Argument::Value(state.get(index)?.clone()));
        }

        trace!(%statement, "executing statement");
        match self.apply_operation(statement.operation(), &args)? {
            Some(value) => {
                state.add_result(value);
                Ok(true)
            }
            None => {
                debug!(%statement, "statement has no result");
                Ok(false)
            }
        }
    }
}
