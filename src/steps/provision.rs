// src/steps/provision.rs

//! Provisioning: get Drupal core into the workspace, install a site, then
//! optionally run Coder Review and simpletest against it.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{
    validate_provision, CoderSection, JobConfig, ProvisionSection, SourceSection, ToolsSection,
};
use crate::errors::{DrupalCiError, Result};
use crate::exec::{CoderReviewRequest, Drush, Git};
use crate::fs::FileSystem;
use crate::steps::StepContext;

/// Files whose presence marks a checkout as Drupal (7.x and 8.x+ layouts).
pub const DRUPAL_MARKERS: [&str; 2] = ["includes/bootstrap.inc", "core/includes/bootstrap.inc"];

const SIMPLETEST_MODULE: &str = "simpletest";

#[derive(Debug, Clone)]
pub struct ProvisionStep {
    source: SourceSection,
    tools: ToolsSection,
    coder: CoderSection,
    settings: ProvisionSection,
}

impl ProvisionStep {
    /// Fails with [`DrupalCiError::InvalidConfig`] before anything runs if
    /// `[provision]` is incomplete.
    pub fn from_config(cfg: &JobConfig) -> Result<Self> {
        validate_provision(cfg.provision()).into_result()?;
        Ok(Self {
            source: cfg.source().clone(),
            tools: cfg.tools().clone(),
            coder: cfg.coder().clone(),
            settings: cfg.provision().clone(),
        })
    }

    pub fn settings(&self) -> &ProvisionSection {
        &self.settings
    }

    pub fn source(&self) -> &SourceSection {
        &self.source
    }

    pub async fn execute(&self, ctx: &mut StepContext<'_>) -> Result<()> {
        let root = ctx.ensure_dir(&self.source.directory)?;

        self.ensure_source(ctx, &root).await?;

        let drush = Drush::for_site(&self.tools.drush, &root);
        ctx.run(drush.site_install(&self.settings.db)).await?;

        if self.settings.coder {
            ctx.run(drush.download(&self.coder.project, None)).await?;
            ctx.run(drush.enable(&self.coder.module)).await?;
            ctx.run(drush.coder_review(&CoderReviewRequest::default())).await?;
        }

        if self.settings.simpletest {
            ctx.run(drush.enable(SIMPLETEST_MODULE)).await?;
            ctx.run(drush.test_run(&self.settings.uri)).await?;
        }

        Ok(())
    }

    /// Clone + checkout unless a repository is already there.
    async fn ensure_source(&self, ctx: &mut StepContext<'_>, root: &Path) -> Result<()> {
        if ctx.fs().is_dir(&root.join(".git")) {
            if self.source.reject_foreign && !looks_like_drupal(ctx.fs(), root) {
                return Err(DrupalCiError::ForeignRepository {
                    path: root.to_path_buf(),
                });
            }
            info!(path = %root.display(), "Drupal code detected, no need to clone");
            return Ok(());
        }

        if !is_empty_dir(ctx.fs(), root) {
            warn!(
                path = %root.display(),
                "checkout directory is not empty; git clone will likely refuse"
            );
        }

        info!(
            url = %self.source.url,
            tag = %self.source.tag,
            "cloning Drupal, please be patient"
        );
        let git = Git::new(&self.tools.git, root);
        ctx.run(git.clone_repository(&self.source.url, &self.source.remote, self.source.shallow))
            .await?;
        ctx.run(git.checkout_branch(&self.source.branch, &self.source.tag))
            .await?;
        Ok(())
    }
}

/// Whether `root` contains a Drupal bootstrap file.
pub fn looks_like_drupal(fs: &dyn FileSystem, root: &Path) -> bool {
    DRUPAL_MARKERS.iter().any(|m| fs.is_file(&root.join(m)))
}

fn is_empty_dir(fs: &dyn FileSystem, dir: &Path) -> bool {
    fs.read_dir(dir).map(|e| e.is_empty()).unwrap_or(true)
}
