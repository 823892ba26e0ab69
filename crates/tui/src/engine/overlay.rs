//! Action menu and confirmation overlay.
//!
//! ```text
//! None -> ActionsPopup -> { Navigational: None
//!                         | Immediate:    Executing
//!                         | Destructive:  Confirm -> Executing }
//! Executing -> Result -> None
//! ```
//!
//! The operation table comes from the resource; this module knows nothing
//! about what an operation does.

/// How selecting an operation proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPolicy {
    /// Leaves the list (view details, open logs, ssh). No overlay.
    Navigational,
    /// Requires an explicit yes before running.
    Destructive,
    /// Runs as soon as it is picked.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub policy: OperationPolicy,
    /// Success changes the collection, so the page is refreshed afterwards.
    pub mutates: bool,
    pub shortcut: Option<char>,
}

impl OperationSpec {
    pub const fn navigational(id: &'static str, label: &'static str, shortcut: char) -> Self {
        Self {
            id,
            label,
            policy: OperationPolicy::Navigational,
            mutates: false,
            shortcut: Some(shortcut),
        }
    }

    pub const fn immediate(id: &'static str, label: &'static str, shortcut: char) -> Self {
        Self {
            id,
            label,
            policy: OperationPolicy::Immediate,
            mutates: true,
            shortcut: Some(shortcut),
        }
    }

    pub const fn destructive(id: &'static str, label: &'static str, shortcut: char) -> Self {
        Self {
            id,
            label,
            policy: OperationPolicy::Destructive,
            mutates: true,
            shortcut: Some(shortcut),
        }
    }

    /// Immediate operation that does not change the listed collection.
    pub const fn read_only(mut self) -> Self {
        self.mutates = false;
        self
    }
}

/// Outcome text of a finished operation.
pub type OperationOutcome = Result<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay<T> {
    None,
    ActionsPopup {
        operations: Vec<OperationSpec>,
        selected: usize,
        target: T,
    },
    Confirm {
        operation: OperationSpec,
        target: T,
    },
    Executing {
        operation: OperationSpec,
        target: T,
    },
    Result {
        operation: OperationSpec,
        target: T,
        outcome: OperationOutcome,
    },
}

impl<T> Overlay<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn is_executing(&self) -> bool {
        matches!(self, Self::Executing { .. })
    }

    /// Move the popup cursor by `delta`, clamped to the operation list.
    pub fn move_selection(&mut self, delta: isize) {
        if let Self::ActionsPopup {
            operations,
            selected,
            ..
        } = self
        {
            let last = operations.len().saturating_sub(1);
            *selected = selected.saturating_add_signed(delta).min(last);
        }
    }
}
