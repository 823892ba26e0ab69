//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges CLI overrides and environment.
//! - Enforce the `DOTENV_DISABLED` gate so tests never pick up a developer `.env`.
//!
//! Does NOT handle:
//! - Persisting UI preferences (see `persistence`).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
