// src/exec/backend.rs

//! Pluggable command backend abstraction.
//!
//! Orchestrators talk to a `CommandBackend` instead of spawning processes
//! directly. Production uses [`ProcessBackend`]; tests swap in a backend that
//! records invocations and answers with canned results.

use std::future::Future;
use std::pin::Pin;

use crate::errors::{DrupalCiError, Result};
use crate::exec::invocation::{Invocation, InvocationOutput};
use crate::exec::process::run_invocation;

/// Number of output lines attached to a [`DrupalCiError::ProcessFailed`].
pub const FAILURE_OUTPUT_LINES: usize = 40;

/// Trait abstracting how invocations are executed.
pub trait CommandBackend: Send {
    /// Run the invocation to completion.
    ///
    /// A non-zero exit is reported through [`InvocationOutput::exit_code`],
    /// not as `Err`.
    fn invoke(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<InvocationOutput>> + Send + '_>>;
}

/// Real backend: one child process per invocation.
#[derive(Debug, Default, Clone)]
pub struct ProcessBackend;

impl ProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CommandBackend for ProcessBackend {
    fn invoke(
        &mut self,
        invocation: Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<InvocationOutput>> + Send + '_>> {
        Box::pin(async move { run_invocation(&invocation).await })
    }
}

/// Run an invocation and turn a non-zero exit into an attributable error.
pub async fn run_checked(
    backend: &mut dyn CommandBackend,
    invocation: Invocation,
) -> Result<InvocationOutput> {
    let stage = invocation.stage;
    let command = invocation.command_line();

    let output = backend.invoke(invocation).await?;
    if output.is_success() {
        Ok(output)
    } else {
        Err(DrupalCiError::ProcessFailed {
            stage,
            command,
            exit_code: output.exit_code,
            output: output.tail(FAILURE_OUTPUT_LINES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    struct Canned(InvocationOutput);

    impl CommandBackend for Canned {
        fn invoke(
            &mut self,
            _invocation: Invocation,
        ) -> Pin<Box<dyn Future<Output = Result<InvocationOutput>> + Send + '_>> {
            let out = self.0.clone();
            Box::pin(async move { Ok(out) })
        }
    }

    #[tokio::test]
    async fn success_passes_output_through() {
        let mut backend = Canned(InvocationOutput::success().with_stdout("<checkstyle/>"));
        let inv = Invocation::new(Stage::CoderReview, "drush", "coder-review", "/ws");

        let out = run_checked(&mut backend, inv).await.unwrap();
        assert_eq!(out.stdout, "<checkstyle/>");
    }

    #[tokio::test]
    async fn non_zero_exit_names_the_stage_and_command() {
        let mut backend = Canned(InvocationOutput::failure(128, "fatal: repository not found"));
        let inv = Invocation::new(Stage::Clone, "git", "clone", "/ws/drupal").arg("u");

        let err = run_checked(&mut backend, inv).await.unwrap_err();

        match &err {
            DrupalCiError::ProcessFailed {
                stage,
                command,
                exit_code,
                output,
            } => {
                assert_eq!(*stage, Stage::Clone);
                assert_eq!(command, "git clone u");
                assert_eq!(*exit_code, 128);
                assert_eq!(output, "fatal: repository not found");
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
        assert_eq!(err.stage(), Some(Stage::Clone));
    }
}
