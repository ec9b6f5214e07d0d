//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | General error (unspecified)              |
//! | 2       | Universal  | CLI usage error (bad args)               |
//! | 10-19   | template   | Template validation codes                |
//! | 20-29   | api        | Mapping service communication codes      |

use finmap_client::ApiError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Template (10-19)
// =============================================================================

/// The sheet collection fails a save rule (blank name, duplicate, …).
pub const EXIT_TEMPLATE_INVALID: u8 = 10;

// =============================================================================
// API (20-29) — mapping service communication
// =============================================================================

/// Network failure or non-validation HTTP error from the service.
pub const EXIT_API_NETWORK: u8 = 20;

/// The service rejected the request (save with success=false, 400/422).
pub const EXIT_API_REJECTED: u8 = 21;

/// The service responded with a body we could not parse.
pub const EXIT_API_PARSE: u8 = 22;

/// Map an ApiError to its exit code.
pub fn api_exit_code(err: &ApiError) -> u8 {
    match err {
        ApiError::Network(_) | ApiError::Http(_, _) => EXIT_API_NETWORK,
        ApiError::Rejected(_) => EXIT_API_REJECTED,
        ApiError::Parse(_) => EXIT_API_PARSE,
    }
}
