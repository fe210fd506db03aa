// src/exec/invocation.rs

//! A single external command call and its captured result.

use std::path::PathBuf;

use crate::types::Stage;

/// One call to an external tool, bound to a working directory.
///
/// The argv is `global_args`, then `subcommand`, then `args`, which fits both
/// `git <sub> ...` and `drush --root=... <sub> ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub program: String,
    pub global_args: Vec<String>,
    pub subcommand: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(
        stage: Stage,
        program: impl Into<String>,
        subcommand: impl Into<String>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stage,
            program: program.into(),
            global_args: Vec::new(),
            subcommand: subcommand.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn global_arg(mut self, arg: impl Into<String>) -> Self {
        self.global_args.push(arg.into());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Everything after the program name.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = self.global_args.clone();
        argv.push(self.subcommand.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Human-readable command line, for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in self.argv() {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push('\'');
                line.push_str(&arg);
                line.push('\'');
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// Exit status and captured output of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOutput {
    /// Process exit code; `-1` when the process was killed by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationOutput {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Last `max_lines` lines of output, stderr first.
    ///
    /// Used to attach the relevant part of a tool's output to an error
    /// without dragging a whole test run into it.
    pub fn tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self
            .stderr
            .lines()
            .chain(self.stdout.lines())
            .filter(|l| !l.trim().is_empty())
            .collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n")
    }
}
