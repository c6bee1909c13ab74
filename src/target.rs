//! Target roots and the post-command divergence check.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::compare::compare_roots;
use crate::config::{CommitStyle, HarnessConfig, ToolConfig};

/// One tool's working copy: an executable paired with a fixed filesystem root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Short name used in traces and divergence reports.
    pub label: String,
    pub exec: PathBuf,
    pub root: PathBuf,
    /// Tool-private bookkeeping directory, excluded from comparison.
    pub metadata_dir: String,
    pub commit_style: CommitStyle,
}

impl Target {
    pub fn from_config(label: &str, cfg: &ToolConfig) -> Self {
        Self {
            label: label.to_string(),
            exec: cfg.exec.clone(),
            root: cfg.root.clone(),
            metadata_dir: cfg.metadata_dir.clone(),
            commit_style: cfg.commit_style,
        }
    }

    /// Destroy and recreate the root.
    pub fn reset(&self) -> Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)
                .with_context(|| format!("remove {}", self.root.display()))?;
        }
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create {}", self.root.display()))?;
        Ok(())
    }
}

/// The two fixed roots a scenario mutates in lockstep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPair {
    pub reference: Target,
    pub subject: Target,
}

impl TargetPair {
    pub fn from_config(cfg: &HarnessConfig) -> Self {
        Self {
            reference: Target::from_config("reference", &cfg.reference),
            subject: Target::from_config("subject", &cfg.subject),
        }
    }

    /// Destroy and recreate both roots.
    pub fn reset(&self) -> Result<()> {
        self.reset_one(&self.reference)?;
        self.reset_one(&self.subject)?;
        Ok(())
    }

    fn reset_one(&self, target: &Target) -> Result<()> {
        target
            .reset()
            .with_context(|| format!("reset {} root", target.label))
    }

    /// Shallow-compare both working trees; any divergence is an error
    /// listing the offending files per class.
    pub fn check_divergence(&self) -> Result<()> {
        let exclude = [
            self.reference.metadata_dir.as_str(),
            self.subject.metadata_dir.as_str(),
        ];
        let comparison = compare_roots(&self.reference.root, &self.subject.root, &exclude)?;
        if !comparison.is_divergent() {
            debug!("working trees match");
            return Ok(());
        }

        warn!(
            differing = comparison.diff_files.len(),
            only_reference = comparison.only_in_left.len(),
            only_subject = comparison.only_in_right.len(),
            "working trees diverged"
        );
        let mut msg = String::from("working trees diverged:");
        if !comparison.diff_files.is_empty() {
            msg.push_str(&format!(
                "\n  differing content: {}",
                comparison.diff_files.join(", ")
            ));
        }
        if !comparison.only_in_left.is_empty() {
            msg.push_str(&format!(
                "\n  only under {}: {}",
                self.reference.label,
                comparison.only_in_left.join(", ")
            ));
        }
        if !comparison.only_in_right.is_empty() {
            msg.push_str(&format!(
                "\n  only under {}: {}",
                self.subject.label,
                comparison.only_in_right.join(", ")
            ));
        }
        bail!(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair_in(dir: &std::path::Path) -> TargetPair {
        let mut cfg = HarnessConfig::default();
        cfg.reference.root = dir.join("reference");
        cfg.subject.root = dir.join("subject");
        TargetPair::from_config(&cfg)
    }

    #[test]
    fn reset_recreates_both_roots_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let pair = pair_in(temp.path());
        pair.reset().expect("first reset");
        fs::write(pair.reference.root.join("stale.txt"), "old").expect("write");

        pair.reset().expect("second reset");
        assert!(pair.reference.root.exists());
        assert!(pair.subject.root.exists());
        assert!(!pair.reference.root.join("stale.txt").exists());
    }

    #[test]
    fn divergence_report_names_files_per_class() {
        let temp = tempfile::tempdir().expect("tempdir");
        let pair = pair_in(temp.path());
        pair.reset().expect("reset");
        fs::write(pair.reference.root.join("a.txt"), "one").expect("write");
        fs::write(pair.subject.root.join("a.txt"), "two").expect("write");
        fs::write(pair.subject.root.join("extra.txt"), "").expect("write");

        let err = pair.check_divergence().expect_err("diverged");
        let msg = err.to_string();
        assert!(msg.contains("differing content: a.txt"), "{msg}");
        assert!(msg.contains("only under subject: extra.txt"), "{msg}");
    }

    #[test]
    fn matching_trees_pass_with_metadata_ignored() {
        let temp = tempfile::tempdir().expect("tempdir");
        let pair = pair_in(temp.path());
        pair.reset().expect("reset");
        fs::write(pair.reference.root.join("a.txt"), "same").expect("write");
        fs::write(pair.subject.root.join("a.txt"), "same").expect("write");
        fs::create_dir(pair.reference.root.join(".git")).expect("mkdir");

        pair.check_divergence().expect("trees match");
    }
}
