//! Domain model for task lifecycle management.
//!
//! The task domain models validated submissions, the status machine, and
//! the ordering rules for pending work, while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod query;
mod status;
mod task;

pub use error::{FieldViolation, ParseTaskStatusError, TaskDomainError, ValidationErrors};
pub use ids::{EstimatedMinutes, ExternalTaskId, TaskDescription, TaskId};
pub use query::{PendingLimit, PendingSortKey, PendingTaskQuery, SortOrder, processing_priority};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskSubmission};
