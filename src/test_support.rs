//! Test-only helpers: fake version-control tools backed by shell scripts.
//!
//! The fake tool keeps one snapshot per branch under its metadata directory
//! and understands the same subcommand surface the harness delegates
//! (`init`, `add`, `commit`, `branch`, `checkout`). Staging is a no-op:
//! `commit` snapshots every top-level regular file. Two identically-behaving
//! fakes therefore never diverge, while the skewed variant plants an extra
//! working-tree file on every commit.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::config::{CommitStyle, HarnessConfig, ToolConfig};

/// `{meta}` is the tool's metadata directory name; `{skew}` is either empty
/// or an extra line run after each commit's snapshot.
const FAKE_TOOL: &str = r#"#!/bin/sh
set -eu
meta="{meta}"
cmd="$1"
shift
case "$cmd" in
  init)
    mkdir -p "$meta/branches"
    echo master > "$meta/HEAD"
    ;;
  add)
    ;;
  commit)
    head="$(cat "$meta/HEAD")"
    rm -rf "$meta/branches/$head"
    mkdir -p "$meta/branches/$head"
    find . -maxdepth 1 -type f -exec cp {} "$meta/branches/$head/" \;
{skew}    ;;
  branch)
    head="$(cat "$meta/HEAD")"
    mkdir -p "$meta/branches/$1"
    if [ -n "$(ls -A "$meta/branches/$head" 2>/dev/null)" ]; then
      cp -R "$meta/branches/$head/." "$meta/branches/$1/"
    fi
    ;;
  checkout)
    if [ ! -d "$meta/branches/$1" ]; then
      echo "no such branch: $1" >&2
      exit 1
    fi
    find . -maxdepth 1 -type f -exec rm -f {} \;
    cp -R "$meta/branches/$1/." .
    echo "$1" > "$meta/HEAD"
    ;;
  *)
    echo "unknown command: $cmd" >&2
    exit 2
    ;;
esac
"#;

const SKEW_LINE: &str = "    echo skew > skewed-commit.txt\n";

/// Two fake tools plus a config pointing the harness at them. The tempdir
/// owning the scripts and both roots lives as long as the pair.
pub struct FakePair {
    pub config: HarnessConfig,
    _dir: TempDir,
}

/// A well-behaved pair: both tools act identically, so no step diverges.
pub fn fake_pair() -> Result<FakePair> {
    build_pair(false)
}

/// A pair whose subject tool drops `skewed-commit.txt` into its working tree
/// on every commit, guaranteeing a divergence at the first commit step.
pub fn skewed_pair() -> Result<FakePair> {
    build_pair(true)
}

/// Materialize the fake tool script at `path`.
pub fn write_fake_tool(path: &Path, metadata_dir: &str, skewed: bool) -> Result<()> {
    let skew = if skewed { SKEW_LINE } else { "" };
    let script = FAKE_TOOL
        .replace("{meta}", metadata_dir)
        .replace("{skew}", skew);
    fs::write(path, script).with_context(|| format!("write {}", path.display()))?;
    let mut perms = fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).with_context(|| format!("chmod {}", path.display()))?;
    Ok(())
}

fn build_pair(skew_subject: bool) -> Result<FakePair> {
    let dir = TempDir::new().context("create tempdir")?;
    let reference_exec = dir.path().join("fakegit");
    let subject_exec = dir.path().join("fakesharp");
    write_fake_tool(&reference_exec, ".fakegit", false)?;
    write_fake_tool(&subject_exec, ".fakesharp", skew_subject)?;

    // Different commit styles so the argument translation is exercised on
    // every commit (the fake tool ignores the message either way).
    let config = HarnessConfig {
        reference: ToolConfig {
            exec: reference_exec,
            root: dir.path().join("reference"),
            metadata_dir: ".fakegit".to_string(),
            commit_style: CommitStyle::MessageFlag,
        },
        subject: ToolConfig {
            exec: subject_exec,
            root: dir.path().join("subject"),
            metadata_dir: ".fakesharp".to_string(),
            commit_style: CommitStyle::Positional,
        },
        trunk_branch: "master".to_string(),
        fail_fast: true,
    };
    config.validate()?;
    Ok(FakePair { config, _dir: dir })
}
