//! Input contract of the external syntax parser.
//!
//! The parser is not part of this crate. It walks one source file depth
//! first and hands over [`Event`]s in source order; expression contexts
//! arrive as raw [`Leaf`] sequences.

mod event;
mod shape;

pub use event::{DeclKind, Declarator, Event};
pub use shape::{
    AnnotationSyntax, BoundKind, CreationSyntax, ElementValueSyntax, Leaf, SegmentSyntax,
    TypeArgSyntax, TypeSyntax,
};
