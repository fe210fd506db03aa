#![allow(dead_code)]

use std::path::PathBuf;

use drupalci::config::{CategoryFlags, JobConfig, RawJobConfig};

/// Builder for `JobConfig` to simplify test setup.
pub struct JobConfigBuilder {
    config: RawJobConfig,
}

impl JobConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawJobConfig::default(),
        }
    }

    pub fn db(mut self, db: &str) -> Self {
        self.config.provision.db = db.to_string();
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.config.provision.uri = uri.to_string();
        self
    }

    pub fn coder(mut self, val: bool) -> Self {
        self.config.provision.coder = val;
        self
    }

    pub fn simpletest(mut self, val: bool) -> Self {
        self.config.provision.simpletest = val;
        self
    }

    pub fn reject_foreign(mut self, val: bool) -> Self {
        self.config.source.reject_foreign = val;
        self
    }

    pub fn review_root(mut self, root: &str) -> Self {
        self.config.review.root = PathBuf::from(root);
        self
    }

    pub fn review_logs(mut self, logs: &str) -> Self {
        self.config.review.logs = PathBuf::from(logs);
        self
    }

    pub fn categories(mut self, flags: CategoryFlags) -> Self {
        self.config.review.categories = flags;
        self
    }

    pub fn except(mut self, except: &str) -> Self {
        self.config.review.except = except.to_string();
        self
    }

    pub fn makefile(mut self, makefile: &str) -> Self {
        self.config.make.makefile = PathBuf::from(makefile);
        self
    }

    pub fn make_root(mut self, root: &str) -> Self {
        self.config.make.root = PathBuf::from(root);
        self
    }

    pub fn build(self) -> JobConfig {
        JobConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for JobConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
