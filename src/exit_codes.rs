//! Stable exit codes for the lockstep CLI.

/// Run completed with both working trees identical after every step.
pub const OK: i32 = 0;
/// A tool invocation failed or the working trees diverged.
pub const FAILED: i32 = 1;
