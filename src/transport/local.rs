//! Local process execution.

use super::{ExecOutput, Invocation};
use std::process::{Command, Stdio};

fn command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    if let Some(ref dir) = invocation.dir {
        cmd.current_dir(dir);
    }
    cmd
}

/// Run a process and capture stdout/stderr.
pub fn exec_captured(invocation: &Invocation) -> Result<ExecOutput, String> {
    let output = command(invocation)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| format!("failed to spawn {}: {}", invocation.program, e))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Run a process with inherited stdio so build output reaches the terminal.
/// A process killed by a signal reports -1.
pub fn exec_streaming(invocation: &Invocation) -> Result<i32, String> {
    let status = command(invocation)
        .status()
        .map_err(|e| format!("failed to spawn {}: {}", invocation.program, e))?;
    Ok(status.code().unwrap_or(-1))
}
