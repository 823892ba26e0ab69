//! Runloop TUI library.
//!
//! Interactive browser for Runloop resources. Every resource list is driven
//! by the generic [`engine::ListEngine`]; resources only declare columns and
//! operations (see [`resources`]).
//!
//! The `rl` CLI embeds this crate through [`run`].

pub mod action;
pub mod app;
pub mod cli;
pub mod engine;
pub mod resources;
pub mod runtime;
pub mod screens;
pub mod ui;

pub use action::Action;
pub use app::{App, FOOTER_HEIGHT, HEADER_HEIGHT};
pub use resources::ResourceKind;
pub use runtime::{RunOptions, run};
