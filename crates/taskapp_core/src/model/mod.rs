//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted record behind the task list screen.
//!
//! # Invariants
//! - Every task is identified by a unique integer `TaskId`.
//! - Deletion is a hard delete; ids are only reissued through `next_id`.

pub mod task;
