//! Screen controllers for the task list and the edit form.
//!
//! # Responsibility
//! - Bind task store results to a list view and translate user events
//!   (tap, swipe-delete, search text, screen return) into store and
//!   notification calls.
//!
//! # Invariants
//! - Controllers receive the store and scheduler explicitly; there is no
//!   process-wide database handle.
//! - The list always re-queries after a mutation or a screen return.

pub mod edit;
pub mod list;
pub mod row;

pub use edit::{EditController, SaveOutcome};
pub use list::{ListController, ListState, ListView};
pub use row::{format_row_date, TaskRow, ROW_DATE_FORMAT};
