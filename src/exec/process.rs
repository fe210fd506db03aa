// src/exec/process.rs

//! Runs one [`Invocation`] as a child process.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::{DrupalCiError, Result};
use crate::exec::invocation::{Invocation, InvocationOutput};
use crate::types::Stage;

/// Spawn the invocation, forward every output line to the log as it arrives,
/// and wait for the process to exit.
///
/// A non-zero exit is **not** an error here; it comes back as an
/// [`InvocationOutput`] so the caller decides. Only failing to start or to
/// wait on the process is an `Err`.
pub async fn run_invocation(invocation: &Invocation) -> Result<InvocationOutput> {
    let command_line = invocation.command_line();
    let stage = invocation.stage;

    info!(
        stage = %stage,
        cmd = %command_line,
        cwd = %invocation.cwd.display(),
        "starting external command"
    );

    let mut cmd = Command::new(&invocation.program);
    cmd.args(invocation.argv())
        .current_dir(&invocation.cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let spawn_error = |source: std::io::Error| DrupalCiError::ProcessSpawn {
        stage,
        command: command_line.clone(),
        source,
    };

    let mut child = cmd.spawn().map_err(spawn_error)?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout, stderr, status) = tokio::join!(
        forward_lines(stdout, stage, "stdout"),
        forward_lines(stderr, stage, "stderr"),
        child.wait(),
    );
    let status = status.map_err(spawn_error)?;

    let exit_code = status.code().unwrap_or(-1);
    info!(
        stage = %stage,
        exit_code,
        success = status.success(),
        "external command exited"
    );

    Ok(InvocationOutput {
        exit_code,
        stdout,
        stderr,
    })
}

/// Log each line of a child stream and keep a copy of it.
///
/// Lines are decoded lossily; tools happily print Latin-1 source excerpts.
/// The stream is always read to EOF: dropping it early closes the pipe and
/// the child dies on its next write.
async fn forward_lines<R>(reader: Option<R>, stage: Stage, stream: &'static str) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return String::new();
    };

    let mut reader = BufReader::new(reader);
    let mut captured = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let decoded = String::from_utf8_lossy(&buf);
                let line = decoded.trim_end_matches(['\n', '\r']);
                info!(stage = %stage, stream, "{}", line);
                captured.push_str(line);
                captured.push('\n');
            }
            Err(err) => {
                warn!(
                    stage = %stage,
                    stream,
                    error = %err,
                    "reading child output failed, discarding the rest"
                );
                // Keep the pipe open until the child closes it.
                let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                break;
            }
        }
    }
    captured
}
