//! List Interaction Engine.
//!
//! One generic, terminal-independent implementation of the
//! list / search / actions / confirm / execute / result interaction used by
//! every resource screen. State changes happen only through
//! [`ListEngine::dispatch`], which returns [`Effect`]s for the caller to run;
//! [`project`] turns state into display data.
//!
//! Submodules:
//! - [`pagination`]: cursor stack, fetch bookkeeping, stale-result guard
//! - [`search`]: draft and submitted query
//! - [`viewport`]: page size from terminal height, selection clamp
//! - [`overlay`]: action menu and confirmation state machine
//! - [`list`]: composition and key handling
//! - [`projection`]: rows, status line, hints

pub mod list;
pub mod overlay;
pub mod pagination;
pub mod projection;
pub mod search;
pub mod viewport;

pub use list::{Effect, ListConfig, ListEngine, ListEvent, ListKey};
pub use overlay::{OperationOutcome, OperationPolicy, OperationSpec, Overlay};
pub use pagination::{Applied, FetchKind, FetchRequest, PaginationController, RequestId};
pub use projection::{
    Body, Column, ColumnWidth, Hint, ListView, OverlayView, ResourceNames, SearchView, hint,
    project, range_label,
};
pub use search::SearchFilter;
pub use viewport::{Viewport, clamp_selection};
