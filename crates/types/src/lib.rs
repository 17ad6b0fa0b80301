#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Shared type definitions for pyndex
//!
//! Requirements, versions, and distribution filenames as they appear on
//! the command line and on simple-index project pages.

mod dist;
mod package;
mod version;

pub use dist::{DistFilename, DistKind};
pub use package::{normalize_name, Requirement};
pub use version::Version;
