//! Shallow divergence detection between two directory roots.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Outcome of shallow-comparing two roots.
///
/// Any non-empty field is a divergence: the harness's invariant is that the
/// set of non-metadata top-level files, and the bytes of each, are identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Common top-level files whose byte content differs.
    pub diff_files: Vec<String>,
    /// Entries present only under the left root.
    pub only_in_left: Vec<String>,
    /// Entries present only under the right root.
    pub only_in_right: Vec<String>,
}

impl Comparison {
    pub fn is_divergent(&self) -> bool {
        !self.diff_files.is_empty() || !self.only_in_left.is_empty() || !self.only_in_right.is_empty()
    }
}

/// Shallow-compare the top-level entries of two roots.
///
/// Entry names listed in `exclude` (the tools' metadata directories) are
/// skipped on both sides. Common names are byte-compared when both sides are
/// regular files; directories are not descended into, but a name that is a
/// file on one side and a directory on the other counts as differing.
/// Results are sorted by name.
pub fn compare_roots(left: &Path, right: &Path, exclude: &[&str]) -> Result<Comparison> {
    let left_names = list_entries(left, exclude)?;
    let right_names = list_entries(right, exclude)?;

    let mut comparison = Comparison {
        diff_files: Vec::new(),
        only_in_left: left_names.difference(&right_names).cloned().collect(),
        only_in_right: right_names.difference(&left_names).cloned().collect(),
    };

    for name in left_names.intersection(&right_names) {
        let left_path = left.join(name);
        let right_path = right.join(name);
        match (left_path.is_dir(), right_path.is_dir()) {
            (true, true) => continue,
            (true, false) | (false, true) => {
                comparison.diff_files.push(name.clone());
                continue;
            }
            (false, false) => {}
        }
        let left_bytes =
            fs::read(&left_path).with_context(|| format!("read {}", left_path.display()))?;
        let right_bytes =
            fs::read(&right_path).with_context(|| format!("read {}", right_path.display()))?;
        if left_bytes != right_bytes {
            comparison.diff_files.push(name.clone());
        }
    }
    Ok(comparison)
}

fn list_entries(root: &Path, exclude: &[&str]) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(root).with_context(|| format!("read dir {}", root.display()))? {
        let entry = entry.with_context(|| format!("read entry under {}", root.display()))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if exclude.contains(&name.as_str()) {
            continue;
        }
        names.insert(name);
    }
    Ok(names)
}
