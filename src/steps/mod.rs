// src/steps/mod.rs

//! Orchestration steps.
//!
//! Each step is a fixed, ordered pipeline of directory checks and external
//! invocations. A step never starts an invocation before the previous one
//! has finished successfully; the first failure aborts the rest.
//!
//! - [`provision`]: clone Drupal core, `site-install`, optional Coder Review
//!   and simpletest.
//! - [`review`]: Coder Review over targets discovered by [`targets`].
//! - [`make`]: build a tree from a drush makefile.

pub mod make;
pub mod provision;
pub mod review;
pub mod targets;

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::config::JobConfig;
use crate::errors::{DrupalCiError, Result};
use crate::exec::{run_checked, CommandBackend, Invocation, InvocationOutput};
use crate::fs::FileSystem;
use crate::types::Stage;

pub use make::MakeStep;
pub use provision::ProvisionStep;
pub use review::ReviewStep;

/// What a step runs against: one workspace, its filesystem, and the command
/// backend. Owned by a single build for its whole lifetime.
pub struct StepContext<'a> {
    workspace: PathBuf,
    fs: &'a dyn FileSystem,
    backend: &'a mut dyn CommandBackend,
    completed: Vec<Stage>,
}

impl<'a> StepContext<'a> {
    pub fn new(
        workspace: impl Into<PathBuf>,
        fs: &'a dyn FileSystem,
        backend: &'a mut dyn CommandBackend,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            fs,
            backend,
            completed: Vec::new(),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn fs(&self) -> &'a dyn FileSystem {
        self.fs
    }

    /// Path of `rel` inside the workspace.
    pub fn resolve(&self, rel: &Path) -> PathBuf {
        self.workspace.join(rel)
    }

    /// Create `rel` under the workspace if missing. Idempotent.
    pub fn ensure_dir(&self, rel: &Path) -> Result<PathBuf> {
        let path = self.resolve(rel);
        self.fs
            .create_dir_all(&path)
            .map_err(|e| DrupalCiError::filesystem(&path, e))?;
        Ok(path)
    }

    /// Run an invocation; a non-zero exit aborts with the stage attached.
    pub async fn run(&mut self, invocation: Invocation) -> Result<InvocationOutput> {
        let stage = invocation.stage;
        let output = run_checked(&mut *self.backend, invocation).await?;
        self.completed.push(stage);
        Ok(output)
    }

    /// Stages that finished successfully, in order.
    pub fn completed_stages(&self) -> &[Stage] {
        &self.completed
    }
}

/// Which command the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Provision,
    Review,
    Make,
}

/// A configured orchestration step.
#[derive(Debug, Clone)]
pub enum Step {
    Provision(ProvisionStep),
    Review(ReviewStep),
    Make(MakeStep),
}

impl Step {
    /// Build the step, running its configuration checks first.
    pub fn from_config(kind: StepKind, cfg: &JobConfig) -> Result<Self> {
        Ok(match kind {
            StepKind::Provision => Step::Provision(ProvisionStep::from_config(cfg)?),
            StepKind::Review => Step::Review(ReviewStep::from_config(cfg)?),
            StepKind::Make => Step::Make(MakeStep::from_config(cfg)?),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Provision(_) => "provision",
            Step::Review(_) => "review",
            Step::Make(_) => "make",
        }
    }

    pub async fn execute(&self, ctx: &mut StepContext<'_>) -> Result<()> {
        info!(step = self.name(), workspace = %ctx.workspace().display(), "step started");

        let result = match self {
            Step::Provision(step) => step.execute(ctx).await,
            Step::Review(step) => step.execute(ctx).await,
            Step::Make(step) => step.execute(ctx).await,
        };

        match &result {
            Ok(()) => info!(
                step = self.name(),
                stages = ?ctx.completed_stages(),
                "step finished"
            ),
            Err(err) => error!(
                step = self.name(),
                failed_stage = ?err.stage(),
                completed = ?ctx.completed_stages(),
                "step failed"
            ),
        }

        result
    }
}
