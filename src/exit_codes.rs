//! Exit code constants for the smartcode CLI.
//!
//! - 0: Success
//! - 1: User error (missing/unreadable file, bad config, oversized prompt)
//! - 2: Invocation failure (model process missing, crashed, or silent)
//! - 3: Report could not be written

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The inference process could not be started or did not produce a response.
pub const INVOCATION_FAILURE: i32 = 2;

/// The report file could not be written.
pub const WRITE_FAILURE: i32 = 3;
