// src/steps/review.rs

//! Coder Review over a selected set of modules, themes and profiles.

use tracing::{info, warn};

use crate::config::{validate_review, CoderSection, JobConfig, ReviewSection, ToolsSection};
use crate::errors::{DrupalCiError, Result};
use crate::exec::{CoderReviewRequest, Drush};
use crate::steps::targets::reviewable_targets;
use crate::steps::StepContext;

#[derive(Debug, Clone)]
pub struct ReviewStep {
    tools: ToolsSection,
    coder: CoderSection,
    settings: ReviewSection,
}

impl ReviewStep {
    pub fn from_config(cfg: &JobConfig) -> Result<Self> {
        validate_review(cfg.review()).into_result()?;
        Ok(Self {
            tools: cfg.tools().clone(),
            coder: cfg.coder().clone(),
            settings: cfg.review().clone(),
        })
    }

    pub fn settings(&self) -> &ReviewSection {
        &self.settings
    }

    pub async fn execute(&self, ctx: &mut StepContext<'_>) -> Result<()> {
        let logs_dir = ctx.ensure_dir(&self.settings.logs)?;

        let root = ctx.resolve(&self.settings.root);
        if !ctx.fs().is_dir(&root) {
            return Err(DrupalCiError::Filesystem {
                path: root,
                detail: "Drupal root does not exist".to_string(),
            });
        }

        let drush = Drush::for_site(&self.tools.drush, &root);
        ctx.run(drush.download(&self.coder.project, Some(&self.coder.destination)))
            .await?;
        ctx.run(drush.enable(&self.coder.module)).await?;

        let categories = self.settings.categories.to_set();
        let targets = reviewable_targets(ctx.fs(), &root, &self.settings.except)?;
        if targets.is_empty() {
            warn!(root = %root.display(), except = %self.settings.except, "no reviewable targets left after exclusions");
        }
        info!(?categories, target_count = targets.len(), "running coder review");

        let request = CoderReviewRequest {
            categories,
            targets,
            checkstyle: true,
        };
        let output = ctx.run(drush.coder_review(&request)).await?;

        let report = logs_dir.join(&self.settings.report);
        ctx.fs()
            .write(&report, output.stdout.as_bytes())
            .map_err(|e| DrupalCiError::filesystem(&report, e))?;
        info!(report = %report.display(), "coder review report written");

        Ok(())
    }
}
