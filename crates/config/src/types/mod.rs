//! Configuration type definitions.
//!
//! Responsibilities:
//! - Define the resolved connection, auth, and environment settings.
//! - Define user-selectable color themes and their runtime palettes.
//!
//! Does NOT handle:
//! - Loading values from the environment (see `loader`).
//! - Persisting UI state (see `persistence`).
//!
//! Invariants:
//! - The API key is always a `secrecy::SecretString`.
//! - `ColorTheme` is the persisted representation; `Theme` is the runtime representation.

mod auth;
mod connection;
mod environment;
mod theme;

pub use auth::AuthConfig;
pub use connection::{Config, ConnectionConfig};
pub use environment::Environment;
pub use theme::{ColorTheme, Theme};
