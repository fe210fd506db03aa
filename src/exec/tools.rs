// src/exec/tools.rs

//! Builders that turn logical operations into [`Invocation`]s for `git` and
//! `drush`.
//!
//! Nothing here runs a process; the orchestrators hand the result to a
//! [`crate::exec::CommandBackend`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::exec::invocation::Invocation;
use crate::types::{ReviewCategory, Stage};

/// `git`, operating inside one directory.
#[derive(Debug, Clone)]
pub struct Git {
    executable: String,
    dir: PathBuf,
}

impl Git {
    pub fn new(executable: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            dir: dir.into(),
        }
    }

    /// Clone `url` into the directory itself (it must be empty).
    pub fn clone_repository(&self, url: &str, remote: &str, shallow: bool) -> Invocation {
        let mut inv = Invocation::new(Stage::Clone, &self.executable, "clone", &self.dir)
            .args(["--origin", remote]);
        if shallow {
            inv = inv.args(["--depth", "1", "--no-single-branch"]);
        }
        inv.args([url, "."])
    }

    /// Create `branch` at `start_point` and switch to it.
    pub fn checkout_branch(&self, branch: &str, start_point: &str) -> Invocation {
        Invocation::new(Stage::Checkout, &self.executable, "checkout", &self.dir)
            .args(["-b", branch, start_point])
    }
}

/// What `drush coder-review` should look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoderReviewRequest {
    /// Empty means "let Coder pick its defaults".
    pub categories: BTreeSet<ReviewCategory>,
    /// Empty means "everything Coder finds enabled".
    pub targets: BTreeSet<String>,
    /// Emit a checkstyle XML report on stdout.
    pub checkstyle: bool,
}

/// `drush`, non-interactive, optionally bound to a Drupal root.
#[derive(Debug, Clone)]
pub struct Drush {
    executable: String,
    cwd: PathBuf,
    root: Option<PathBuf>,
}

impl Drush {
    /// Drush running in `cwd` without a `--root`; enough for `make`.
    pub fn new(executable: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            cwd: cwd.into(),
            root: None,
        }
    }

    /// Drush bound to the Drupal site at `root`, running from there.
    pub fn for_site(executable: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            executable: executable.into(),
            cwd: root.clone(),
            root: Some(root),
        }
    }

    fn invocation(&self, stage: Stage, subcommand: &str) -> Invocation {
        let mut inv = Invocation::new(stage, &self.executable, subcommand, &self.cwd)
            .global_arg("--yes")
            .global_arg("--nocolor");
        if let Some(root) = &self.root {
            inv = inv.global_arg(format!("--root={}", root.display()));
        }
        inv
    }

    pub fn site_install(&self, db_url: &str) -> Invocation {
        self.invocation(Stage::SiteInstall, "site-install")
            .arg(format!("--db-url={db_url}"))
    }

    pub fn download(&self, project: &str, destination: Option<&str>) -> Invocation {
        let inv = self.invocation(Stage::Download, "pm-download").arg(project);
        match destination {
            Some(dest) => inv.arg(format!("--destination={dest}")),
            None => inv,
        }
    }

    pub fn enable(&self, module: &str) -> Invocation {
        self.invocation(Stage::Enable, "pm-enable").arg(module)
    }

    pub fn coder_review(&self, request: &CoderReviewRequest) -> Invocation {
        let mut inv = self.invocation(Stage::CoderReview, "coder-review");
        if !request.categories.is_empty() {
            let names: Vec<&str> = request.categories.iter().map(|c| c.as_str()).collect();
            inv = inv.arg(format!("--reviews={}", names.join(",")));
        }
        if request.checkstyle {
            inv = inv.arg("--checkstyle");
        }
        inv.args(request.targets.iter().cloned())
    }

    pub fn test_run(&self, uri: &str) -> Invocation {
        self.invocation(Stage::TestRun, "test-run")
            .args(["--all".to_string(), format!("--uri={uri}")])
    }

    pub fn make(&self, makefile: &Path, build_root: &Path) -> Invocation {
        self.invocation(Stage::Make, "make").args([
            makefile.display().to_string(),
            build_root.display().to_string(),
        ])
    }
}
