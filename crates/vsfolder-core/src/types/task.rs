//! Asynchronous server-side task handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::ManagedObjectRef;

/// Handle to a task started by a mutating inventory call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    /// Task identifier, e.g. `task-101`.
    pub value: String,
    /// The object the task operates on.
    pub entity: ManagedObjectRef,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Waiting to run.
    Queued,
    /// In progress.
    Running,
    /// Completed successfully.
    Success,
    /// Completed with a fault.
    Error,
}

/// Final information about a completed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskInfo {
    /// The task handle.
    pub task: TaskRef,
    /// Terminal state.
    pub state: TaskState,
    /// Fault message when `state` is [`TaskState::Error`].
    pub error: Option<String>,
    /// When the task was queued.
    pub queued_at: DateTime<Utc>,
    /// When the task completed.
    pub completed_at: Option<DateTime<Utc>>,
}
