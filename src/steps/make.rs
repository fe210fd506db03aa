// src/steps/make.rs

//! Build a Drupal tree from a drush makefile.

use tracing::info;

use crate::config::{validate_make, JobConfig, MakeSection, ToolsSection};
use crate::errors::{DrupalCiError, Result};
use crate::exec::Drush;
use crate::steps::StepContext;

#[derive(Debug, Clone)]
pub struct MakeStep {
    tools: ToolsSection,
    settings: MakeSection,
}

impl MakeStep {
    pub fn from_config(cfg: &JobConfig) -> Result<Self> {
        validate_make(cfg.make()).into_result()?;
        Ok(Self {
            tools: cfg.tools().clone(),
            settings: cfg.make().clone(),
        })
    }

    pub fn settings(&self) -> &MakeSection {
        &self.settings
    }

    pub async fn execute(&self, ctx: &mut StepContext<'_>) -> Result<()> {
        let makefile = ctx.resolve(&self.settings.makefile);
        if !ctx.fs().is_file(&makefile) {
            return Err(DrupalCiError::Filesystem {
                path: makefile,
                detail: "makefile not found".to_string(),
            });
        }

        let build_root = ctx.resolve(&self.settings.root);
        if let Some(parent) = build_root.parent() {
            ctx.ensure_dir(parent)?;
        }

        // drush make refuses to build into an existing tree.
        if ctx.fs().is_file(&build_root.join("index.php")) {
            info!(path = %build_root.display(), "Drupal build detected, skipping drush make");
            return Ok(());
        }

        let drush = Drush::new(&self.tools.drush, ctx.workspace());
        ctx.run(drush.make(&makefile, &build_root)).await?;
        Ok(())
    }
}
