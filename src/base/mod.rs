//! Foundation types for the jsema toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`UnitId`], [`LocalDefId`], [`DeclId`] - Handles used for back-references
//! - [`name`] - Qualified-name helpers
//!
//! This module has NO dependencies on other jsema modules.

mod ids;
pub mod name;

pub use ids::{DeclId, LocalDefId, UnitId};
