//! Statement execution against an explicit run context.

use std::collections::VecDeque;

use tracing::trace;

use crate::ast::Statement;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::runtime::{eval_expression, Value};

/// Everything a single run reads and mutates: the root frame and the two
/// I/O queues.
///
/// The context outlives the run, so callers can inspect variables and any
/// output produced before a failure.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    environment: Environment,
    input: VecDeque<String>,
    output: Vec<String>,
}

impl ExecutionContext {
    /// Creates a context with a fresh root frame. `inputs` are consumed
    /// front to back by `baca`.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            environment: Environment::new(),
            input: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    /// Inputs not yet consumed by `baca`.
    pub fn remaining_input(&self) -> impl Iterator<Item = &str> {
        self.input.iter().map(String::as_str)
    }
}

fn as_bound(value: Value) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(RuntimeError::TypeMismatch {
            operation: "ulangin",
            left: other.type_name(),
            right: "range bound",
        }),
    }
}

/// Executes one statement, recursing into nested blocks.
pub fn execute_statement(stmt: &Statement, ctx: &mut ExecutionContext) -> Result<(), RuntimeError> {
    trace!(statement = stmt.name(), "executing");
    match stmt {
        Statement::Assignment { target, value } => {
            let value = eval_expression(value, &ctx.environment)?;
            ctx.environment.set(target.clone(), value);
        }
        Statement::If { condition, then_branch, else_branch } => {
            if eval_expression(condition, &ctx.environment)?.is_truthy() {
                execute_statement(then_branch, ctx)?;
            } else {
                execute_statement(else_branch, ctx)?;
            }
        }
        Statement::ForRange { variable, start, end, body } => {
            let start = as_bound(eval_expression(start, &ctx.environment)?)?;
            let end = as_bound(eval_expression(end, &ctx.environment)?)?;
            let mut counter = start;
            while counter <= end {
                ctx.environment.set(variable.clone(), Value::Number(counter));
                execute_statement(body, ctx)?;
                counter += 1.0;
            }
        }
        Statement::While { condition, body } => {
            while eval_expression(condition, &ctx.environment)?.is_truthy() {
                execute_statement(body, ctx)?;
            }
        }
        Statement::Input { target } => {
            let raw = ctx.input.pop_front().ok_or_else(|| RuntimeError::MissingInput {
                target: target.clone(),
            })?;
            ctx.environment.set(target.clone(), Value::from_input(&raw));
        }
        Statement::Print { value } => {
            let value = eval_expression(value, &ctx.environment)?;
            ctx.output.push(value.to_string());
        }
        Statement::Block(statements) => {
            for stmt in statements {
                execute_statement(stmt, ctx)?;
            }
        }
        Statement::Expression(expr) => {
            eval_expression(expr, &ctx.environment)?;
        }
        Statement::Empty => {}
    }
    Ok(())
}
