//! Differential test harness for two version-control tool implementations.
//!
//! Drives a *reference* tool and a *subject* tool through identical command
//! sequences against two separate working trees, and verifies after every
//! step that the trees' top-level file contents stay byte-identical. The
//! tools are opaque executables: the harness only writes plain files, runs
//! subcommands, and compares directories. It never inspects commit graphs
//! or repository metadata.
//!
//! - [`command`]: the closed set of repository operations and how each one
//!   applies itself to both targets.
//! - [`compare`]: the shallow divergence check between the two roots.
//! - [`driver`]: scenario execution and failure reporting.
//! - [`scenario`]: the canned command sequences.

pub mod command;
pub mod compare;
pub mod config;
pub mod driver;
pub mod exit_codes;
pub mod invoke;
pub mod logging;
pub mod scenario;
pub mod target;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
