//! Repository operations applied to both targets in lockstep.

use std::fmt;
use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::CommitStyle;
use crate::invoke::run_tool;
use crate::target::{Target, TargetPair};

/// One repository operation, applied identically against both targets.
///
/// Immutable once constructed; owns only its own parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init,
    Add { files: Vec<String> },
    Commit { message: String },
    Branch { name: String },
    Checkout { name: String },
    CreateFile { name: String },
    ModifyFile { name: String, content: String },
}

impl Command {
    /// Apply the operation to both targets, then check for divergence.
    ///
    /// Tool-delegated variants invoke each target's executable inside its
    /// root; the file variants write under both roots directly, bypassing
    /// the tools entirely.
    pub fn apply(&self, targets: &TargetPair) -> Result<()> {
        match self {
            Command::CreateFile { name } => {
                info!(file = %name, "creating file");
                create_file(&targets.reference, name)?;
                create_file(&targets.subject, name)?;
            }
            Command::ModifyFile { name, content } => {
                info!(file = %name, "modifying file");
                modify_file(&targets.reference, name, content)?;
                modify_file(&targets.subject, name, content)?;
            }
            _ => {
                for target in [&targets.reference, &targets.subject] {
                    let args = self.tool_args(target.commit_style);
                    run_tool(&target.exec, &args, &target.root)
                        .with_context(|| format!("{self} on target {}", target.label))?;
                }
            }
        }
        targets.check_divergence()
    }

    /// Translate the variant into one tool's argument convention.
    ///
    /// The file variants never delegate to a tool and translate to nothing.
    pub fn tool_args(&self, commit_style: CommitStyle) -> Vec<String> {
        match self {
            Command::Init => vec!["init".to_string()],
            Command::Add { files } => {
                let mut args = vec!["add".to_string()];
                args.extend(files.iter().cloned());
                args
            }
            Command::Commit { message } => match commit_style {
                CommitStyle::MessageFlag => {
                    vec!["commit".to_string(), "-m".to_string(), message.clone()]
                }
                CommitStyle::Positional => vec!["commit".to_string(), message.clone()],
            },
            Command::Branch { name } => vec!["branch".to_string(), name.clone()],
            Command::Checkout { name } => vec!["checkout".to_string(), name.clone()],
            Command::CreateFile { .. } | Command::ModifyFile { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Init => write!(f, "init"),
            Command::Add { files } => write!(f, "add {}", files.join(" ")),
            Command::Commit { message } => write!(f, "commit {message:?}"),
            Command::Branch { name } => write!(f, "branch {name}"),
            Command::Checkout { name } => write!(f, "checkout {name}"),
            Command::CreateFile { name } => write!(f, "create {name}"),
            Command::ModifyFile { name, .. } => write!(f, "modify {name}"),
        }
    }
}

/// Create the file if missing. Existing content is left untouched, so
/// re-creating an already-existing path is a no-op.
fn create_file(target: &Target, name: &str) -> Result<()> {
    let path = target.root.join(name);
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&path)
        .with_context(|| format!("create {}", path.display()))?;
    Ok(())
}

fn modify_file(target: &Target, name: &str, content: &str) -> Result<()> {
    let path = target.root.join(name);
    fs::write(&path, content).with_context(|| format!("write {}", path.display()))
}
