//! Error types for model construction and queries.

use smol_str::SmolStr;
use thiserror::Error;

use super::model::Scope;

/// Errors raised while turning construction events into a compilation unit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// A modifier token outside the known modifier set.
    #[error("unknown modifier: {0}")]
    UnknownModifier(SmolStr),

    /// An event that cannot occur where it was delivered.
    #[error("unexpected {event} {context}")]
    Unexpected {
        event: &'static str,
        context: &'static str,
    },

    /// A type declaration was entered but never exited.
    #[error("type declaration not closed at end of unit: {name}")]
    UnclosedType { name: SmolStr },

    /// Modifiers left in the pending buffer at end of unit.
    #[error("{count} modifier(s) not attached to any declaration")]
    DanglingModifiers { count: usize },

    /// Annotations left in the pending buffer at end of unit.
    #[error("annotation(s) not attached to any declaration: {}", .names.join(", "))]
    DanglingAnnotations { names: Vec<SmolStr> },

    /// A field initializer or annotation value could not be simplified.
    #[error(transparent)]
    Expr(#[from] ExprError),
}

impl BuildError {
    /// Create an unexpected-event error.
    pub fn unexpected(event: &'static str, context: &'static str) -> Self {
        Self::Unexpected { event, context }
    }
}

/// Errors raised while assembling a project.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectError {
    /// Two declared types share a fully qualified name.
    #[error("Duplicate type name: {0}")]
    DuplicateType(SmolStr),

    /// A compilation unit failed to build.
    #[error("compilation unit {index}: {source}")]
    Build {
        index: usize,
        #[source]
        source: BuildError,
    },
}

/// Errors raised by name resolution.
///
/// Each variant carries the scope the name was looked up from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No rule produced a declaration or external reference.
    #[error("cannot resolve type: {name}")]
    Unresolved { scope: Scope, name: SmolStr },

    /// The name could come from more than one wildcard import.
    #[error("ambiguous type name: {name} (wildcard imports: {})", .candidates.join(", "))]
    Ambiguous {
        scope: Scope,
        name: SmolStr,
        candidates: Vec<SmolStr>,
    },

    /// An annotation name resolved to something other than an annotation type.
    #[error("invalid annotation type: {name} resolves to {found}")]
    NotAnAnnotation {
        scope: Scope,
        name: SmolStr,
        found: SmolStr,
    },
}

impl ResolveError {
    /// The scope the failing lookup started from.
    pub fn scope(&self) -> Scope {
        match self {
            ResolveError::Unresolved { scope, .. }
            | ResolveError::Ambiguous { scope, .. }
            | ResolveError::NotAnAnnotation { scope, .. } => *scope,
        }
    }

    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        match self {
            ResolveError::Unresolved { name, .. }
            | ResolveError::Ambiguous { name, .. }
            | ResolveError::NotAnAnnotation { name, .. } => name,
        }
    }
}

/// Errors raised by the expression simplifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("malformed literal `{text}`: {reason}")]
    MalformedLiteral { text: SmolStr, reason: &'static str },
}

impl ExprError {
    pub fn malformed(text: &str, reason: &'static str) -> Self {
        Self::MalformedLiteral {
            text: SmolStr::new(text),
            reason,
        }
    }
}

/// Errors raised while deriving accessor-convention properties.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    #[error("duplicate field name: {0}")]
    DuplicateField(SmolStr),

    #[error("not an accessor: {0}")]
    NotAnAccessor(SmolStr),
}

/// Errors raised by a [`TypeMapper`](super::TypeMapper).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("no mapping for {name} ({shape})")]
    NoMapping { name: String, shape: &'static str },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
