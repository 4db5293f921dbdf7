//! High-level IR: the semantic model of Java-like compilation units.
//!
//! The model is built once from parser [`Event`](crate::syntax::Event)s and
//! is immutable afterwards, apart from memoized name resolutions.
//!
//! ## Layers
//!
//! ```text
//! builder      → Event stream → CompilationUnit
//!   ↓
//! model        → Project, CompilationUnit, TypeDecl and members
//!   ↓
//! resolve      → simple/qualified names → Resolved (memoized per reference)
//!   ↓
//! property     → accessor-convention properties
//! mapper       → rendering type references through hooks
//! diagnostics  → unit-wide resolution checks
//! ```

mod builder;
mod diagnostics;
#[cfg(feature = "dump")]
mod dump;
mod error;
mod expr;
mod literal;
mod mapper;
mod model;
mod property;
mod resolve;
mod types;

pub use builder::{BuilderOptions, ModelBuilder, build_unit};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, SemanticChecker, Severity, check_unit, codes,
};
#[cfg(feature = "dump")]
pub use dump::{project_to_json, unit_to_json, unit_to_value};
pub use error::{BuildError, ExprError, MapError, ProjectError, PropertyError, ResolveError};
pub use expr::{ConstructorInvocation, Expression, simplify};
pub use literal::Literal;
pub use mapper::{QualifiedMapping, TypeMapper, TypeMapping};
pub use model::{
    Annotation, AnnotationValue, CompilationUnit, Constructor, Container, DeclBody, EnumConstant,
    Field, HasAnnotations, Import, ImportKind, Method, Modifier, Modifiers, Named, Parameter,
    Project, Scope, TypeDecl, TypeParameter, find_object, is_public_member,
};
pub use property::{
    Property, getter_name, is_getter, is_setter, properties, property_name, setter_name,
};
pub use resolve::{CORE_TYPES, Resolved, Resolver, is_core_type};
pub use types::{
    ArrayType, CORE_NAMESPACE, ObjectType, PrimitiveType, TypeArgument, TypeRef, Wildcard,
    WildcardBound, is_primitive_name, unbox,
};
