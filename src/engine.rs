//! Port to the external rule engine.
//!
//! The engine reports completion through a one-shot callback. [`evaluate`]
//! turns that callback into a future that resolves exactly once.

use a11y_dom_sandbox::MountedRoot;
use a11y_run_options::{EngineConfiguration, RuleDescriptor, RunOptions};
use a11y_violation_report::AuditResults;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

use crate::errors::{CheckError, HarnessResult};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Completion callback handed to [`RuleEngine::run`].
pub type EngineCallback = Box<dyn FnOnce(Result<AuditResults, EngineError>) + Send + 'static>;

pub trait RuleEngine: Send + Sync {
    /// Applies engine-wide configuration. Called once per harness.
    fn configure(&self, config: &EngineConfiguration) -> Result<(), EngineError>;

    /// Rules carrying any of `tags`.
    fn rules_tagged(&self, tags: &[&str]) -> Vec<RuleDescriptor>;

    /// Evaluates the rules against `root` and reports through `callback`.
    /// The callback may be invoked on any thread, before or after `run`
    /// returns.
    fn run(&self, root: MountedRoot, options: RunOptions, callback: EngineCallback);
}

/// Runs the engine and waits for its single callback.
pub async fn evaluate(
    engine: &dyn RuleEngine,
    root: MountedRoot,
    options: RunOptions,
) -> HarnessResult<AuditResults> {
    let (tx, rx) = oneshot::channel();
    debug!(node = %root.node_id, "invoking rule engine");
    engine.run(
        root,
        options,
        Box::new(move |outcome| {
            // Receiver gone means the check future was dropped.
            let _ = tx.send(outcome);
        }),
    );

    match rx.await {
        Ok(Ok(results)) => Ok(results),
        Ok(Err(err)) => Err(CheckError::EngineFailure(err)),
        Err(_) => Err(CheckError::EngineDisconnected),
    }
}
