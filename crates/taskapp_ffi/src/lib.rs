//! Flutter-facing bindings for TaskApp core.

pub mod api;
