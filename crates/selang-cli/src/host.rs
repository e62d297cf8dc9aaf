//! Runs a compiled program on a worker thread under a time budget.
//!
//! The evaluator has no suspension points, so it cannot be cancelled from
//! the inside. When the budget expires the worker is abandoned and the
//! caller is expected to end the process, which is what actually stops it.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use selang_core::{ExecutionContext, Program, RuntimeError, Value};

/// The evaluator recurses once per tree level.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// What a finished run left behind. `error` is set when the run stopped at
/// a failing statement; `output` and `variables` still hold everything
/// produced before it.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub output: Vec<String>,
    pub variables: BTreeMap<String, Value>,
    #[serde(skip)]
    pub error: Option<RuntimeError>,
}

impl RunReport {
    fn from_context(ctx: ExecutionContext, error: Option<RuntimeError>) -> Self {
        let variables = ctx
            .environment()
            .variables()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self {
            output: ctx.into_output(),
            variables,
            error,
        }
    }
}

#[derive(Debug)]
pub enum HostError {
    /// The run did not finish within the budget.
    Timeout(Duration),
    /// The worker thread could not start or died without a report.
    Worker(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Timeout(budget) => {
                write!(f, "Execution exceeded time budget of {} ms", budget.as_millis())
            }
            HostError::Worker(msg) => write!(f, "Worker failed: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// Executes `program` with `inputs` on a dedicated worker thread, giving up
/// after `budget`.
pub async fn run_with_budget(
    program: Program,
    inputs: Vec<String>,
    budget: Duration,
) -> Result<RunReport, HostError> {
    debug!(inputs = inputs.len(), budget_ms = budget.as_millis() as u64, "starting worker");

    let (tx, rx) = tokio::sync::oneshot::channel();
    thread::Builder::new()
        .name("selang-worker".to_string())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || {
            let mut ctx = ExecutionContext::new(inputs);
            let result = program.execute(&mut ctx);
            // The receiver is gone only after a timeout.
            let _ = tx.send(RunReport::from_context(ctx, result.err()));
        })
        .map_err(|e| HostError::Worker(e.to_string()))?;

    match tokio::time::timeout(budget, rx).await {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(_)) => Err(HostError::Worker("worker exited without a report".to_string())),
        Err(_) => {
            warn!(budget_ms = budget.as_millis() as u64, "execution timed out");
            Err(HostError::Timeout(budget))
        }
    }
}
