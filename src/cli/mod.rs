//! Workflow entry points shared by the binary and library callers

pub mod orchestration;

pub use orchestration::{resolve_graph, resolve_with, run_resolve, ResolveArgs, ResolveOutcome};
