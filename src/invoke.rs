//! Synchronous child-process invocation with inherited stdio.
//!
//! The harness blocks on each tool invocation and leaves the child's
//! stdout/stderr attached to its own streams. No retries and no timeout: a
//! hung tool hangs the run.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Run `exec` with `args` inside `workdir`, failing on non-zero exit.
///
/// The error carries the full rendered command line.
pub fn run_tool(exec: &Path, args: &[String], workdir: &Path) -> Result<()> {
    let rendered = render_command(exec, args);
    debug!(command = %rendered, workdir = %workdir.display(), "running tool");
    let status = Command::new(exec)
        .args(args)
        .current_dir(workdir)
        .status()
        .with_context(|| format!("spawn `{rendered}`"))?;
    if !status.success() {
        bail!("command `{rendered}` failed with {status}");
    }
    Ok(())
}

/// Render an argv for traces and error messages.
pub fn render_command(exec: &Path, args: &[String]) -> String {
    let mut rendered = exec.display().to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
