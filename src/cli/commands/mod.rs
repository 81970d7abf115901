//! CLI command implementations
//!
//! Commands return process exit codes: 0 success, 2 configuration or
//! validation error, 3 collaborator failure, 5 fatal error.

pub mod calculate;
pub mod init;
pub mod validate;

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration and validation errors
pub const EXIT_INVALID: i32 = 2;
/// Exit code when PDF rendering, Drive or Sheets failed
pub const EXIT_COLLABORATOR: i32 = 3;
/// Exit code for anything else
pub const EXIT_FATAL: i32 = 5;
