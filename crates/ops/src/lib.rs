#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Operation orchestration for pyndex
//!
//! Commands in the binary call into this crate; each operation wires the
//! finder, fetch workspace, and store together and returns a typed
//! report for rendering.

mod add;
mod context;

pub use add::add;
pub use context::{OpsCtx, OpsCtxBuilder};

use serde::Serialize;

/// One package persisted by the add operation
#[derive(Debug, Clone, Serialize)]
pub struct AddedPackage {
    pub name: String,
    pub version: String,
    pub filename: String,
    pub sha256: String,
    pub size: u64,
    pub owner: String,
}

/// Result of an add invocation
#[derive(Debug, Clone, Serialize)]
pub struct AddReport {
    pub packages: Vec<AddedPackage>,
}

/// Typed result of any operation, rendered by the binary
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationResult {
    AddReport(AddReport),
}
