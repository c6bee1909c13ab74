//! Harness configuration (TOML).
//!
//! Fixed root paths, executable paths, and the fail-fast flag live in an
//! explicit structure passed to the driver, so two harness instances with
//! different tool pairs can coexist.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// How a tool's CLI accepts a commit message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommitStyle {
    /// `<tool> commit -m <message>`
    MessageFlag,
    /// `<tool> commit <message>`
    Positional,
}

/// One tool under comparison: executable, working-tree root, and the name of
/// its private metadata directory (excluded from divergence checks).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolConfig {
    pub exec: PathBuf,
    pub root: PathBuf,
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: String,
    #[serde(default = "default_commit_style")]
    pub commit_style: CommitStyle,
}

fn default_metadata_dir() -> String {
    ".git".to_string()
}

fn default_commit_style() -> CommitStyle {
    CommitStyle::MessageFlag
}

/// Harness configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to a git-vs-git pairing under `/tmp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// The known-good tool (defaults to `git` conventions).
    pub reference: ToolConfig,

    /// The reimplementation under test.
    pub subject: ToolConfig,

    /// Branch name both tools start on after `init`.
    pub trunk_branch: String,

    /// Stop a run at the first failed step. When false, the driver keeps
    /// applying commands and reports every failure at the end.
    pub fail_fast: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            reference: ToolConfig {
                exec: PathBuf::from("git"),
                root: PathBuf::from("/tmp/lockstep-reference"),
                metadata_dir: default_metadata_dir(),
                commit_style: CommitStyle::MessageFlag,
            },
            subject: ToolConfig {
                exec: PathBuf::from("git"),
                root: PathBuf::from("/tmp/lockstep-subject"),
                metadata_dir: default_metadata_dir(),
                commit_style: CommitStyle::MessageFlag,
            },
            trunk_branch: "master".to_string(),
            fail_fast: true,
        }
    }
}

impl ToolConfig {
    fn validate(&self, label: &str) -> Result<()> {
        if self.exec.as_os_str().is_empty() {
            return Err(anyhow!("{label}.exec must be non-empty"));
        }
        if self.root.as_os_str().is_empty() {
            return Err(anyhow!("{label}.root must be non-empty"));
        }
        if self.metadata_dir.trim().is_empty() {
            return Err(anyhow!("{label}.metadata_dir must be non-empty"));
        }
        if self.metadata_dir.contains('/') || self.metadata_dir.contains('\\') {
            return Err(anyhow!("{label}.metadata_dir must be a bare directory name"));
        }
        Ok(())
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        self.reference.validate("reference")?;
        self.subject.validate("subject")?;
        if self.reference.root == self.subject.root {
            return Err(anyhow!("reference and subject must use distinct roots"));
        }
        if self.trunk_branch.trim().is_empty() {
            return Err(anyhow!("trunk_branch must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `HarnessConfig::default()`.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    if !path.exists() {
        let cfg = HarnessConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HarnessConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &HarnessConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, HarnessConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("lockstep.toml");
        let cfg = HarnessConfig::default();
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn parses_per_tool_sections() {
        let input = r#"
trunk_branch = "main"
fail_fast = false

[reference]
exec = "git"
root = "/tmp/a"

[subject]
exec = "/opt/minigit/minigit"
root = "/tmp/b"
metadata_dir = ".minigit"
commit_style = "positional"
"#;
        let cfg: HarnessConfig = toml::from_str(input).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.trunk_branch, "main");
        assert!(!cfg.fail_fast);
        assert_eq!(cfg.reference.metadata_dir, ".git");
        assert_eq!(cfg.subject.metadata_dir, ".minigit");
        assert_eq!(cfg.subject.commit_style, CommitStyle::Positional);
    }

    #[test]
    fn rejects_shared_root() {
        let mut cfg = HarnessConfig::default();
        cfg.subject.root = cfg.reference.root.clone();
        let err = cfg.validate().expect_err("shared root");
        assert!(err.to_string().contains("distinct roots"));
    }

    #[test]
    fn rejects_nested_metadata_dir() {
        let mut cfg = HarnessConfig::default();
        cfg.subject.metadata_dir = "meta/dir".to_string();
        let err = cfg.validate().expect_err("nested metadata dir");
        assert!(err.to_string().contains("bare directory name"));
    }
}
