//! Centralized constants for the Runloop workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Platform Endpoints
// =============================================================================

/// Production API base URL.
pub const PROD_API_BASE_URL: &str = "https://api.runloop.ai";

/// Development API base URL (selected with `RUNLOOP_ENV=dev`).
pub const DEV_API_BASE_URL: &str = "https://api.runloop.pro";

/// Production SSH proxy endpoint (`host:port`).
pub const PROD_SSH_PROXY: &str = "ssh.runloop.ai:443";

/// Development SSH proxy endpoint (`host:port`).
pub const DEV_SSH_PROXY: &str = "ssh.runloop.pro:443";

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for failed requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Upper bound for configured retries.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// List & Polling Defaults
// =============================================================================

/// Default interval between background list refreshes in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;

/// Smallest poll interval accepted from configuration.
pub const MIN_POLL_INTERVAL_MS: u64 = 500;

/// Default number of items requested by CLI list commands.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Minimum number of table rows a list screen ever asks for.
pub const DEFAULT_MIN_VIEWPORT_HEIGHT: u16 = 5;

/// Rows occupied by the search input while search mode is active.
pub const SEARCH_OVERHEAD_ROWS: u16 = 3;

// =============================================================================
// Devbox Defaults
// =============================================================================

/// How long `ssh` waits for a devbox to reach `running`, in seconds.
pub const DEFAULT_SSH_READY_TIMEOUT_SECS: u64 = 180;

/// Interval between devbox status checks while waiting, in seconds.
pub const DEFAULT_SSH_READY_POLL_SECS: u64 = 3;

/// Default login user when a devbox has no explicit user parameters.
pub const DEFAULT_SSH_USER: &str = "user";

/// Lifetime of generated object download URLs in seconds.
pub const DEFAULT_DOWNLOAD_URL_DURATION_SECS: u64 = 3600;

// =============================================================================
// TUI Runtime
// =============================================================================

/// Capacity of the bounded action channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// UI tick interval in milliseconds (spinners, toast expiry).
pub const DEFAULT_UI_TICK_MS: u64 = 250;

// =============================================================================
// Update Check
// =============================================================================

/// Minimum time between update checks, in seconds (one day).
pub const UPDATE_CHECK_INTERVAL_SECS: u64 = 86_400;

/// Timeout for the update check request, in seconds.
pub const UPDATE_CHECK_TIMEOUT_SECS: u64 = 2;
