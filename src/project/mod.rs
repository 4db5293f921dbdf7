//! Project ingestion: many event streams in, one indexed [`Project`] out.
//!
//! [`Project`]: crate::hir::Project

mod loader;

pub use loader::{ProjectLoader, load_project};
