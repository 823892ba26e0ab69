//! Configuration management for the Runloop CLI and TUI.
//!
//! This crate provides types and loaders for the Runloop API connection
//! (API key, platform environment, endpoints) plus small pieces of persisted
//! UI state and well-known filesystem locations.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{PersistedState, StateStore};
pub use types::{AuthConfig, ColorTheme, Config, ConnectionConfig, Environment, Theme};
