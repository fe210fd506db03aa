// src/exec/mod.rs

//! External-tool boundary.
//!
//! All real work happens across this seam: orchestrators build
//! [`Invocation`]s, a [`CommandBackend`] runs them, and [`run_checked`] turns
//! a non-zero exit into an error that names the failing stage.
//!
//! - [`invocation`] holds the invocation / output value types.
//! - [`tools`] builds `git` and `drush` invocations.
//! - [`process`] runs an invocation with `tokio::process::Command`, streaming
//!   output to the log.
//! - [`backend`] provides the `CommandBackend` trait and the production
//!   `ProcessBackend`.

pub mod backend;
pub mod invocation;
pub mod process;
pub mod tools;

pub use backend::{run_checked, CommandBackend, ProcessBackend, FAILURE_OUTPUT_LINES};
pub use invocation::{Invocation, InvocationOutput};
pub use tools::{CoderReviewRequest, Drush, Git};
