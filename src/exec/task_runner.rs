// src/exec/task_runner.rs

//! Fire-and-forget process spawning for dispatches.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::engine::Dispatch;
use crate::exec::command::CommandSpec;

/// Spawn the command for one dispatch without waiting for it.
///
/// A background task drains the child's output into the log and reports the
/// exit status. Failures (bad command, program not found, permission denied)
/// are logged and swallowed so one bad rule cannot stop the watch loop.
pub fn spawn_dispatch(dispatch: Dispatch) {
    let command = dispatch.command.clone();
    if let Err(err) = spawn_dispatch_inner(dispatch) {
        warn!(command = %command, error = %format!("{err:#}"), "failed to run command");
    }
}

fn spawn_dispatch_inner(dispatch: Dispatch) -> Result<()> {
    let spec = CommandSpec::from_dispatch(&dispatch)?;

    info!(
        dir = %dispatch.directory.display(),
        command = %dispatch.command,
        "running command"
    );

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);

    let child = cmd
        .spawn()
        .with_context(|| format!("spawning `{}`", spec.program))?;

    tokio::spawn(supervise(child, dispatch.command));
    Ok(())
}

/// Forward output to the log and report how the child ended.
async fn supervise(mut child: Child, command: String) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, command.clone(), "stdout"));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, command.clone(), "stderr"));
    }

    match child.wait().await {
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            if status.success() {
                debug!(command = %command, exit_code = code, "command exited");
            } else {
                warn!(command = %command, exit_code = code, "command exited with failure");
            }
        }
        Err(e) => warn!(command = %command, error = %e, "waiting for command failed"),
    }
}

async fn forward_lines<R>(stream: R, command: String, stream_name: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!(command = %command, stream = stream_name, "{}", line);
    }
}
