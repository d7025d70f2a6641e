//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations the screens use.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
