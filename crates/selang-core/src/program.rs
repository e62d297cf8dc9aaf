//! Compiled programs and the two entry points: [`compile`] and
//! [`Program::run`].

use tracing::debug;

use crate::ast::Statement;
use crate::error::{Error, RuntimeError};
use crate::executor::{execute_statement, ExecutionContext};
use crate::parser;

/// A parsed program, ready to run any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Runs the program against `ctx`, leaving the final state in it.
    ///
    /// On error the context still holds every variable and output entry
    /// produced before the failing statement.
    pub fn execute(&self, ctx: &mut ExecutionContext) -> Result<(), RuntimeError> {
        debug!(statements = self.statements.len(), "running program");
        for stmt in &self.statements {
            execute_statement(stmt, ctx)?;
        }
        debug!(output = ctx.output().len(), "program finished");
        Ok(())
    }

    /// Runs the program with a fresh context and returns its output queue.
    pub fn run<I, S>(&self, inputs: I) -> Result<Vec<String>, RuntimeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ctx = ExecutionContext::new(inputs);
        self.execute(&mut ctx)?;
        Ok(ctx.into_output())
    }
}

/// Lexes and parses `source` into a [`Program`].
pub fn compile(source: &str) -> Result<Program, Error> {
    let statements = parser::parse(source)?;
    debug!(statements = statements.len(), "compiled program");
    Ok(Program::new(statements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Value;

    #[test]
    fn compile_and_run_round_trip() {
        let program = compile("baca foo\ntulis foo").unwrap();
        assert_eq!(program.statements().len(), 2);
        assert_eq!(program.run(["10"]).unwrap(), vec!["10"]);
    }

    #[test]
    fn runs_are_independent() {
        let program = compile("baca x\ntulis x * 2").unwrap();
        assert_eq!(program.run(["2"]).unwrap(), vec!["4"]);
        assert_eq!(program.run(["5"]).unwrap(), vec!["10"]);
    }

    #[test]
    fn execute_leaves_state_for_inspection() {
        let program = compile("foo itu 10\nbar itu foo + 1").unwrap();
        let mut ctx = ExecutionContext::new(Vec::<String>::new());
        program.execute(&mut ctx).unwrap();
        assert_eq!(ctx.environment().get("foo"), Some(&Value::Number(10.0)));
        assert_eq!(ctx.environment().get("bar"), Some(&Value::Number(11.0)));
    }

    #[test]
    fn statements_after_failure_do_not_run() {
        let program = compile("tulis 1\nbaca x\nfoo itu 1").unwrap();
        let mut ctx = ExecutionContext::new(Vec::<String>::new());
        let err = program.execute(&mut ctx).unwrap_err();
        assert_eq!(err, RuntimeError::MissingInput { target: "x".to_string() });
        assert_eq!(ctx.output(), ["1"]);
        assert!(!ctx.environment().contains("foo"));
    }
}
