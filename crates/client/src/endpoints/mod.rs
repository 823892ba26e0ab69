//! Low-level HTTP endpoint functions for the Runloop API.
//!
//! Each function performs exactly one logical API call against a
//! [`RequestContext`]. Higher-level ergonomics live on
//! [`crate::RunloopClient`].

mod request;
pub mod url_encoding;

pub mod benchmarks;
pub mod blueprints;
pub mod devboxes;
pub mod gateway_configs;
pub mod mcp_configs;
pub mod network_policies;
pub mod objects;
pub mod secrets;
pub mod snapshots;

pub use request::{RequestContext, send_request_with_retry};
pub(crate) use request::{decode, get_json, get_page, post_json};
