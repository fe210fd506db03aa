// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ValidationErrors;
use crate::types::Stage;

#[derive(Error, Debug)]
pub enum DrupalCiError {
    #[error("Invalid configuration:\n{0}")]
    InvalidConfig(ValidationErrors),

    #[error("Filesystem error at {}: {detail}", .path.display())]
    Filesystem { path: PathBuf, detail: String },

    #[error("{stage}: could not run `{command}`: {source}")]
    ProcessSpawn {
        stage: Stage,
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} failed: `{command}` exited with code {exit_code}\n{output}")]
    ProcessFailed {
        stage: Stage,
        command: String,
        exit_code: i32,
        output: String,
    },

    #[error("{} holds a git repository that does not look like Drupal", .path.display())]
    ForeignRepository { path: PathBuf },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl DrupalCiError {
    /// Wrap an error from the [`crate::fs::FileSystem`] seam.
    pub fn filesystem(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        DrupalCiError::Filesystem {
            path: path.into(),
            detail: format!("{err:#}"),
        }
    }

    /// Stage the error is attributed to, if it came from an external command.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            DrupalCiError::ProcessSpawn { stage, .. } | DrupalCiError::ProcessFailed { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DrupalCiError>;
