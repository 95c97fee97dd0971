//! Error types for the editing lifecycle.

use thiserror::Error;

use crate::lifecycle::LifecycleEvent;

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors returned to the caller of an [`EditableEntity`](crate::EditableEntity).
///
/// Store failures are not in here: they are logged and surfaced through
/// `status().error` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// `remove` was called without a base entity.
    #[error("no data available, cannot remove resource")]
    NoEntity,

    /// A save or remove is already in flight.
    #[error("entity is busy ({phase})")]
    Busy { phase: &'static str },

    /// The lifecycle was driven out of order.
    #[error("invalid lifecycle transition: {event} while {from}")]
    InvalidTransition {
        from: &'static str,
        event: LifecycleEvent,
    },
}
