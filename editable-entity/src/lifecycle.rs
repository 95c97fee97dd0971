//! Save/remove lifecycle.
//!
//! The lifecycle is a pure state machine with a guarded transition table:
//!
//! | From               | Event                       | To        |
//! |--------------------|-----------------------------|-----------|
//! | Idle / Failed      | `BeginSave`                 | Saving    |
//! | Idle / Failed      | `BeginRemove`               | Removing  |
//! | Idle / Failed      | `Settle`                    | Idle      |
//! | Saving / Removing  | `Complete`                  | Idle      |
//! | Saving / Removing  | `Fail`                      | Failed    |
//!
//! Starting anything while Saving/Removing yields [`EditError::Busy`]; any
//! other out-of-table event yields [`EditError::InvalidTransition`].

use editable_types::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EditError, EditResult};

/// Where an entity is in its save/remove lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    /// A create (`creating`) or update is in flight for `paths`.
    Saving {
        creating: bool,
        paths: Vec<FieldPath>,
    },
    Removing,
    /// The last save/remove failed; `message` is user-facing.
    Failed { message: String },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Saving { .. } => "saving",
            Phase::Removing => "removing",
            Phase::Failed { .. } => "failed",
        }
    }

    /// True while a store call is outstanding.
    pub fn is_working(&self) -> bool {
        matches!(self, Phase::Saving { .. } | Phase::Removing)
    }
}

/// Events that drive [`Lifecycle`] transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    BeginSave,
    BeginRemove,
    Settle,
    Complete,
    Fail,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleEvent::BeginSave => "begin_save",
            LifecycleEvent::BeginRemove => "begin_remove",
            LifecycleEvent::Settle => "settle",
            LifecycleEvent::Complete => "complete",
            LifecycleEvent::Fail => "fail",
        };
        f.write_str(name)
    }
}

/// The flags a consumer renders from: `working`, `creating`, `saving`,
/// `removing` and `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatus {
    pub working: bool,
    pub creating: bool,
    /// Paths included in the in-flight save, if any.
    pub saving: Option<Vec<FieldPath>>,
    pub removing: bool,
    pub error: Option<String>,
}

/// Guarded save/remove state machine.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_working(&self) -> bool {
        self.phase.is_working()
    }

    /// Enters `Saving`.
    pub fn begin_save(&mut self, creating: bool, paths: Vec<FieldPath>) -> EditResult<()> {
        self.ensure_ready()?;
        self.phase = Phase::Saving { creating, paths };
        Ok(())
    }

    /// Enters `Removing`.
    pub fn begin_remove(&mut self) -> EditResult<()> {
        self.ensure_ready()?;
        self.phase = Phase::Removing;
        Ok(())
    }

    /// Returns to `Idle` without a store call (nothing to save).
    pub fn settle(&mut self) -> EditResult<()> {
        self.ensure_ready()?;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// The in-flight operation succeeded.
    pub fn complete(&mut self) -> EditResult<()> {
        self.ensure_working(LifecycleEvent::Complete)?;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// The in-flight operation failed.
    pub fn fail(&mut self, message: impl Into<String>) -> EditResult<()> {
        self.ensure_working(LifecycleEvent::Fail)?;
        self.phase = Phase::Failed {
            message: message.into(),
        };
        Ok(())
    }

    pub fn status(&self) -> EntityStatus {
        match &self.phase {
            Phase::Idle => EntityStatus::default(),
            Phase::Saving { creating, paths } => EntityStatus {
                working: true,
                creating: *creating,
                saving: Some(paths.clone()),
                ..EntityStatus::default()
            },
            Phase::Removing => EntityStatus {
                working: true,
                removing: true,
                ..EntityStatus::default()
            },
            Phase::Failed { message } => EntityStatus {
                error: Some(message.clone()),
                ..EntityStatus::default()
            },
        }
    }

    fn ensure_ready(&self) -> EditResult<()> {
        if self.phase.is_working() {
            return Err(EditError::Busy {
                phase: self.phase.name(),
            });
        }
        Ok(())
    }

    fn ensure_working(&self, event: LifecycleEvent) -> EditResult<()> {
        if !self.phase.is_working() {
            return Err(EditError::InvalidTransition {
                from: self.phase.name(),
                event,
            });
        }
        Ok(())
    }
}
