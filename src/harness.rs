//! Configurable check function.
//!
//! A [`Harness`] is built once from a [`HarnessConfig`] and then checks any
//! number of inputs. Each check re-merges the base runner options with that
//! call's overrides, so nothing carries over from one call to the next.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use a11y_core_types::CheckId;
use a11y_dom_sandbox::{mount_prepared, prepare, CheckInput, FrameworkRenderer, SharedDocument};
use a11y_run_options::{
    headless_rule_defaults, merge, EngineConfiguration, HarnessConfig, RunOptions,
    HEADLESS_UNSUPPORTED_TAGS,
};
use a11y_violation_report::AuditResults;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::engine::{evaluate, RuleEngine};
use crate::errors::{CheckError, HarnessResult};

/// Builds a harness with the headless defaults applied.
pub fn configure(engine: Arc<dyn RuleEngine>, config: HarnessConfig) -> HarnessResult<Harness> {
    Harness::builder(engine).config(config).build()
}

pub struct HarnessBuilder {
    engine: Arc<dyn RuleEngine>,
    config: HarnessConfig,
    document: Option<SharedDocument>,
    renderer: Option<Arc<dyn FrameworkRenderer>>,
    headless_defaults: bool,
}

impl HarnessBuilder {
    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Document to mount into. Defaults to [`SharedDocument::global`].
    pub fn document(mut self, document: SharedDocument) -> Self {
        self.document = Some(document);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn FrameworkRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Keeps rules that need real rendering enabled.
    pub fn without_headless_defaults(mut self) -> Self {
        self.headless_defaults = false;
        self
    }

    pub fn build(self) -> HarnessResult<Harness> {
        let defaults = if self.headless_defaults {
            headless_rule_defaults(&self.engine.rules_tagged(HEADLESS_UNSUPPORTED_TAGS))
        } else {
            Vec::new()
        };
        let disabled = defaults.len();
        let configuration = EngineConfiguration::build(&self.config.global, defaults);
        self.engine
            .configure(&configuration)
            .map_err(CheckError::Configure)?;
        info!(
            headless_disabled = disabled,
            global_rules = configuration.rules.len(),
            "rule engine configured"
        );

        Ok(Harness {
            engine: self.engine,
            document: self.document.unwrap_or_else(SharedDocument::global),
            renderer: self.renderer,
            runner: self.config.runner,
            configuration,
        })
    }
}

pub struct Harness {
    engine: Arc<dyn RuleEngine>,
    document: SharedDocument,
    renderer: Option<Arc<dyn FrameworkRenderer>>,
    runner: RunOptions,
    configuration: EngineConfiguration,
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("runner", &self.runner)
            .field("configuration", &self.configuration)
            .field("renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl Harness {
    pub fn builder(engine: Arc<dyn RuleEngine>) -> HarnessBuilder {
        HarnessBuilder {
            engine,
            config: HarnessConfig::default(),
            document: None,
            renderer: None,
            headless_defaults: true,
        }
    }

    /// Base runner options every check starts from.
    pub fn runner_options(&self) -> &RunOptions {
        &self.runner
    }

    /// What was passed to the engine's `configure`.
    pub fn engine_configuration(&self) -> &EngineConfiguration {
        &self.configuration
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// The options a check with `overrides` would run with.
    pub fn effective_options(&self, overrides: Option<&RunOptions>) -> RunOptions {
        match overrides {
            Some(overrides) => merge(&self.runner, overrides),
            None => self.runner.clone(),
        }
    }

    /// Validates `input` and returns the pending evaluation.
    ///
    /// Input errors are returned here, before the document is touched. The
    /// returned future mounts, runs the engine, restores the document and
    /// only then resolves.
    pub fn check(
        &self,
        input: impl Into<CheckInput>,
        overrides: Option<&RunOptions>,
    ) -> HarnessResult<PendingCheck> {
        let check_id = CheckId::new();
        let input = input.into();
        let kind = input.kind();
        let prepared = prepare(input, self.renderer.as_deref()).map_err(|err| {
            debug!(%check_id, input = kind, error = %err, "input rejected");
            CheckError::from(err)
        })?;

        let options = self.effective_options(overrides);
        let engine = Arc::clone(&self.engine);
        let document = self.document.clone();
        let span = info_span!("check", %check_id, input = kind);

        let future = async move {
            let lease = document.lease().await;
            let mounted = mount_prepared(lease, prepared);
            debug!(ownership = ?mounted.ownership(), "input mounted");
            let root = mounted.root().clone();
            let outcome = evaluate(&*engine, root, options).await;
            mounted.restore();
            match &outcome {
                Ok(results) => debug!(
                    violations = results.violations.as_ref().map(Vec::len),
                    "check finished"
                ),
                Err(err) => warn!(error = %err, "check failed"),
            }
            outcome
        }
        .instrument(span);

        Ok(PendingCheck {
            check_id,
            future: future.boxed(),
        })
    }

    /// Classifies an untyped value, then checks it.
    pub fn check_value(
        &self,
        input: Value,
        overrides: Option<&RunOptions>,
    ) -> HarnessResult<PendingCheck> {
        let input = CheckInput::try_from(input)?;
        self.check(input, overrides)
    }

    pub async fn run(
        &self,
        input: impl Into<CheckInput>,
        overrides: Option<&RunOptions>,
    ) -> HarnessResult<AuditResults> {
        self.check(input, overrides)?.await
    }
}

/// A check whose input was accepted. Resolves once the engine has reported
/// and the document has been restored.
#[must_use = "a pending check does nothing until awaited"]
pub struct PendingCheck {
    check_id: CheckId,
    future: BoxFuture<'static, HarnessResult<AuditResults>>,
}

impl PendingCheck {
    pub fn check_id(&self) -> &CheckId {
        &self.check_id
    }
}

impl fmt::Debug for PendingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCheck")
            .field("check_id", &self.check_id)
            .finish_non_exhaustive()
    }
}

impl Future for PendingCheck {
    type Output = HarnessResult<AuditResults>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.poll_unpin(cx)
    }
}
