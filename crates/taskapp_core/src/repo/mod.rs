//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts the task store is written against.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;
