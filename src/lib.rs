//! # jsema-base
//!
//! Semantic model and type-name resolution for Java-like source code.
//!
//! An external parser walks each source file and delivers construction
//! [`Event`](syntax::Event)s; this crate builds them into an immutable
//! semantic model and answers queries over it: resolving written type names
//! to their canonical declarations, checking annotations, and deriving
//! accessor-convention properties.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project → ingestion of many units (parallel builder passes)
//!   ↓
//! hir     → semantic model, resolution, properties, diagnostics
//!   ↓
//! syntax  → parser events and raw syntax shapes
//!   ↓
//! base    → primitives (UnitId, DeclId, qualified names)
//! ```
//!
//! ## Usage
//!
//! ```
//! use jsema::hir::{BuilderOptions, TypeRef};
//! use jsema::project::load_project;
//! use jsema::syntax::{DeclKind, Event, TypeSyntax};
//!
//! let project = load_project(
//!     vec![vec![
//!         Event::package("com.example"),
//!         Event::import("java.util.List"),
//!         Event::enter(DeclKind::Class, "Order"),
//!         Event::field(TypeSyntax::named("List"), "lines"),
//!         Event::ExitType,
//!     ]],
//!     BuilderOptions::default(),
//! )
//! .unwrap();
//!
//! let order = project.find_type("com.example.Order").unwrap();
//! let TypeRef::Object(lines) = &project.decl(order).fields()[0].ty else { unreachable!() };
//! assert_eq!(project.canonical_name(order.unit, lines).unwrap(), "java.util.List");
//! ```

/// Foundation types: unit/declaration ids, qualified names
pub mod base;

/// High-level IR: semantic model and name resolution
pub mod hir;

/// Multi-unit ingestion
pub mod project;

/// Input contract of the external parser
pub mod syntax;

// Re-export commonly needed items
pub use base::{DeclId, LocalDefId, UnitId};
pub use hir::{CompilationUnit, Project, Resolved, Scope};
