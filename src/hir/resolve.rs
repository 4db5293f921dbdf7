//! Name resolution: mapping type names to declarations or external references.
//!
//! A name is looked up from a [`Scope`] (a unit plus a container inside it).
//! Qualified names resolve their qualifier first and then descend. Simple
//! names go through a fixed list of prioritized rules:
//!
//! 1. type parameters of the container chain
//! 2. the container chain itself, the types nested at each level, and the
//!    unit's own top-level types
//! 3. single-type imports
//! 4. top-level types of units in the same package
//! 5. the implicitly imported core types
//! 6. the wildcard imports, if there is at most one of them
//!
//! Anything that reaches rule 6 with two or more wildcard imports is
//! reported as ambiguous instead of guessed.
//!
//! Per-reference results are memoized on [`ObjectType`] and [`Annotation`];
//! failures are never cached.

use smol_str::SmolStr;

use super::error::ResolveError;
use super::expr::Expression;
use super::model::{Annotation, Container, HasAnnotations, Project, Scope};
use super::types::{CORE_NAMESPACE, ObjectType, PrimitiveType, TypeRef, unbox};
use crate::base::name::{self, qualify};
use crate::base::{DeclId, UnitId};
use crate::syntax::DeclKind;

/// Types of the core namespace that are visible without an import.
pub const CORE_TYPES: &[&str] = &[
    "Appendable",
    "AutoCloseable",
    "Boolean",
    "Byte",
    "Character",
    "CharSequence",
    "Class",
    "ClassLoader",
    "Cloneable",
    "Comparable",
    "Deprecated",
    "Double",
    "Enum",
    "Error",
    "Exception",
    "Float",
    "FunctionalInterface",
    "Integer",
    "Iterable",
    "Long",
    "Math",
    "Number",
    "Object",
    "Override",
    "Package",
    "Process",
    "ProcessBuilder",
    "Readable",
    "Runnable",
    "Runtime",
    "SafeVarargs",
    "Short",
    "StackTraceElement",
    "String",
    "StringBuffer",
    "StringBuilder",
    "SuppressWarnings",
    "Thread",
    "ThreadGroup",
    "ThreadLocal",
    "Throwable",
    "Void",
];

/// Whether `simple_name` is implicitly imported from the core namespace.
pub fn is_core_type(simple_name: &str) -> bool {
    CORE_TYPES.contains(&simple_name)
}

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// The target of a resolved type name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolved {
    /// A type declared in the project.
    Declared(DeclId),
    /// The `index`-th type parameter of `owner`.
    TypeParameter { owner: DeclId, index: usize },
    /// A type outside the modeled sources, by qualified name.
    External(SmolStr),
}

impl Resolved {
    /// Qualified name for declared and external types, the bare name for
    /// type parameters.
    pub fn canonical_name(&self, project: &Project) -> String {
        match self {
            Resolved::Declared(id) => project.qualified_name(*id),
            Resolved::TypeParameter { owner, index } => project
                .decl(*owner)
                .type_params
                .get(*index)
                .map(|p| p.name.to_string())
                .unwrap_or_default(),
            Resolved::External(name) => name.to_string(),
        }
    }

    pub fn as_declared(&self) -> Option<DeclId> {
        match self {
            Resolved::Declared(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Resolved::External(_))
    }

    /// Short description used in error messages.
    fn describe(&self, project: &Project) -> SmolStr {
        match self {
            Resolved::Declared(id) => SmolStr::from(format!(
                "{} {}",
                project.decl(*id).kind(),
                project.qualified_name(*id)
            )),
            Resolved::TypeParameter { .. } => {
                SmolStr::from(format!("type parameter {}", self.canonical_name(project)))
            }
            Resolved::External(name) => name.clone(),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves names from one scope of a project.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'p> {
    project: &'p Project,
    scope: Scope,
}

impl<'p> Resolver<'p> {
    /// Create a resolver for the top level of `unit`.
    pub fn new(project: &'p Project, unit: UnitId) -> Self {
        Self {
            project,
            scope: Scope::unit(unit),
        }
    }

    /// Set the container names are looked up from.
    pub fn with_container(mut self, container: Container) -> Self {
        self.scope.container = container;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Resolve a simple or dotted type name.
    pub fn resolve(&self, name: &str) -> Result<Resolved, ResolveError> {
        match name::split_qualified(name) {
            (Some(qualifier), simple) => self.resolve_qualified(name, qualifier, simple),
            (None, _) => self.resolve_simple(name),
        }
    }

    fn resolve_qualified(
        &self,
        name: &str,
        qualifier: &str,
        simple: &str,
    ) -> Result<Resolved, ResolveError> {
        let outer = match self.resolve(qualifier) {
            Ok(outer) => outer,
            Err(ResolveError::Unresolved { .. }) => return Err(self.unresolved(name)),
            Err(err) => return Err(err),
        };
        match outer {
            Resolved::Declared(id) => {
                let unit = self.project.unit(id.unit);
                match unit.find_nested(id.local, simple) {
                    Some(local) => {
                        tracing::trace!(name, "resolved as nested type of qualifier");
                        Ok(Resolved::Declared(DeclId::new(id.unit, local)))
                    }
                    None => Err(self.unresolved(name)),
                }
            }
            Resolved::External(outer) => {
                tracing::trace!(name, "resolved by extending external qualifier");
                Ok(Resolved::External(qualify(Some(&outer), simple)))
            }
            Resolved::TypeParameter { .. } => Err(self.unresolved(name)),
        }
    }

    fn resolve_simple(&self, name: &str) -> Result<Resolved, ResolveError> {
        let unit_id = self.scope.unit;
        let unit = self.project.unit(unit_id);

        if let Container::Type(local) = self.scope.container {
            let type_param = unit.find_object(local, |owner, decl| {
                decl.type_params
                    .iter()
                    .position(|p| p.name == name)
                    .map(|index| Resolved::TypeParameter {
                        owner: DeclId::new(unit_id, owner),
                        index,
                    })
            });
            if let Some(found) = type_param {
                tracing::trace!(name, "resolved as type parameter");
                return Ok(found);
            }

            let declared = unit.find_object(local, |id, decl| {
                if decl.name == name {
                    Some(id)
                } else {
                    unit.find_nested(id, name)
                }
            });
            if let Some(found) = declared {
                tracing::trace!(name, "resolved in enclosing declaration");
                return Ok(Resolved::Declared(DeclId::new(unit_id, found)));
            }
        }

        if let Some(import) = unit.find_import(name) {
            tracing::trace!(name, import = %import.name, "resolved by single-type import");
            return Ok(match self.project.find_type(&import.name) {
                Some(id) => Resolved::Declared(id),
                None => Resolved::External(import.name.clone()),
            });
        }

        // the default package counts as a package here, own unit included
        for sibling in self.project.find_compilation_units(unit.package()) {
            if let Some(found) = sibling.find_top_level(name) {
                tracing::trace!(name, "resolved in same package");
                return Ok(Resolved::Declared(DeclId::new(sibling.id(), found)));
            }
        }

        if is_core_type(name) {
            tracing::trace!(name, "resolved in core namespace");
            return Ok(Resolved::External(qualify(Some(CORE_NAMESPACE), name)));
        }

        let wildcards: Vec<_> = unit.wildcard_imports().collect();
        match wildcards.as_slice() {
            [] => {
                tracing::trace!(name, "resolved into current package");
                Ok(Resolved::External(qualify(unit.package(), name)))
            }
            [only] => {
                tracing::trace!(name, namespace = %only.name, "resolved by wildcard import");
                Ok(Resolved::External(qualify(Some(&only.name), name)))
            }
            _ => Err(ResolveError::Ambiguous {
                scope: self.scope,
                name: SmolStr::new(name),
                candidates: wildcards.iter().map(|i| i.name.clone()).collect(),
            }),
        }
    }

    fn unresolved(&self, name: &str) -> ResolveError {
        ResolveError::Unresolved {
            scope: self.scope,
            name: SmolStr::new(name),
        }
    }
}

// ============================================================================
// PROJECT QUERIES
// ============================================================================

impl Project {
    /// A resolver for the given scope.
    pub fn resolver(&self, scope: Scope) -> Resolver<'_> {
        Resolver::new(self, scope.unit).with_scope(scope)
    }

    /// Resolve `name` as seen from `scope`. Not memoized.
    pub fn resolve(&self, scope: Scope, name: &str) -> Result<Resolved, ResolveError> {
        self.resolver(scope).resolve(name)
    }

    /// Resolve an object type written in `unit`, memoizing the result.
    pub fn resolve_type(&self, unit: UnitId, ty: &ObjectType) -> Result<Resolved, ResolveError> {
        if let Some(cached) = ty.resolved.get() {
            return Ok(cached.clone());
        }
        let scope = Scope::new(unit, ty.container);
        let resolved = self.resolve(scope, &ty.qualified_name())?;
        // a concurrent fill computed the same value
        let _ = ty.resolved.set(resolved.clone());
        tracing::debug!(name = %ty.name, ?resolved, "type reference resolved");
        Ok(resolved)
    }

    /// Resolve the annotation type of an annotation usage in `unit`.
    ///
    /// The result is an annotation declaration or an external reference;
    /// any other declaration is rejected.
    pub fn resolve_annotation(
        &self,
        unit: UnitId,
        annotation: &Annotation,
    ) -> Result<Resolved, ResolveError> {
        if let Some(cached) = annotation.resolved.get() {
            return Ok(cached.clone());
        }
        let scope = Scope::new(unit, annotation.container);
        let resolved = self.resolve(scope, annotation.simple_name())?;
        let is_annotation = match &resolved {
            Resolved::Declared(id) => self.decl(*id).kind() == DeclKind::Annotation,
            Resolved::External(_) => true,
            Resolved::TypeParameter { .. } => false,
        };
        if !is_annotation {
            return Err(ResolveError::NotAnAnnotation {
                scope,
                name: annotation.name.clone(),
                found: resolved.describe(self),
            });
        }
        let _ = annotation.resolved.set(resolved.clone());
        tracing::debug!(name = %annotation.name, ?resolved, "annotation resolved");
        Ok(resolved)
    }

    /// Whether `element`, declared in `unit`, carries an annotation whose
    /// type has the qualified name `qualified_name`.
    pub fn has_annotation(
        &self,
        unit: UnitId,
        element: &impl HasAnnotations,
        qualified_name: &str,
    ) -> Result<bool, ResolveError> {
        for annotation in element.annotations() {
            if self.resolve_annotation(unit, annotation)?.canonical_name(self) == qualified_name {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The value of element `name` of the first annotation of type
    /// `qualified_name` on `element`.
    pub fn find_annotation_value<'a>(
        &self,
        unit: UnitId,
        element: &'a impl HasAnnotations,
        qualified_name: &str,
        name: &str,
    ) -> Result<Option<&'a Expression>, ResolveError> {
        for annotation in element.annotations() {
            if self.resolve_annotation(unit, annotation)?.canonical_name(self) == qualified_name {
                return Ok(annotation.value(name));
            }
        }
        Ok(None)
    }

    /// Canonical name of an object type written in `unit`.
    pub fn canonical_name(&self, unit: UnitId, ty: &ObjectType) -> Result<String, ResolveError> {
        Ok(self.resolve_type(unit, ty)?.canonical_name(self))
    }

    /// Primitive `boolean` or its box type.
    pub fn is_boolean(&self, unit: UnitId, ty: &TypeRef) -> bool {
        self.primitive_or_boxed(unit, ty) == Some(PrimitiveType::Boolean)
    }

    /// A numeric primitive or its box type.
    pub fn is_number(&self, unit: UnitId, ty: &TypeRef) -> bool {
        self.primitive_or_boxed(unit, ty)
            .is_some_and(PrimitiveType::is_numeric)
    }

    pub fn is_string(&self, unit: UnitId, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Object(o) => self
                .canonical_name(unit, o)
                .is_ok_and(|name| name == "java.lang.String"),
            _ => false,
        }
    }

    fn primitive_or_boxed(&self, unit: UnitId, ty: &TypeRef) -> Option<PrimitiveType> {
        match ty {
            TypeRef::Primitive(p) => Some(*p),
            TypeRef::Object(o) => self.canonical_name(unit, o).ok().and_then(|n| unbox(&n)),
            TypeRef::Array(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::builder::build_unit;
    use crate::hir::{BuilderOptions, DeclBody};
    use crate::syntax::{AnnotationSyntax, Event, TypeSyntax};

    fn project(units: Vec<Vec<Event>>) -> Project {
        let units = units
            .into_iter()
            .map(|events| build_unit(events, BuilderOptions::default()).expect("unit"))
            .collect();
        Project::new(units).expect("project")
    }

    fn scope_of(project: &Project, qualified: &str) -> Scope {
        Scope::decl(project.find_type(qualified).expect("declared"))
    }

    #[test]
    fn test_core_types_resolve_without_import() {
        let project = project(vec![vec![
            Event::package("p"),
            Event::enter(DeclKind::Class, "A"),
            Event::ExitType,
        ]]);
        let resolved = project.resolve(scope_of(&project, "p.A"), "String").unwrap();
        assert_eq!(resolved, Resolved::External(SmolStr::new("java.lang.String")));
    }

    #[test]
    fn test_no_wildcard_falls_back_to_package() {
        let project = project(vec![
            vec![Event::package("p"), Event::enter(DeclKind::Class, "A"), Event::ExitType],
            vec![Event::enter(DeclKind::Class, "B"), Event::ExitType],
        ]);
        let a = project.resolve(scope_of(&project, "p.A"), "Missing").unwrap();
        assert_eq!(a, Resolved::External(SmolStr::new("p.Missing")));
        let b = project.resolve(scope_of(&project, "B"), "Missing").unwrap();
        assert_eq!(b, Resolved::External(SmolStr::new("Missing")));
    }

    #[test]
    fn test_own_name_and_nested_types() {
        let project = project(vec![vec![
            Event::package("p"),
            Event::enter(DeclKind::Class, "Outer"),
            Event::enter(DeclKind::Class, "Inner"),
            Event::ExitType,
            Event::enter(DeclKind::Class, "Other"),
            Event::ExitType,
            Event::ExitType,
        ]]);
        let inner = scope_of(&project, "p.Outer.Inner");
        let outer = project.find_type("p.Outer").unwrap();
        let other = project.find_type("p.Outer.Other").unwrap();

        assert_eq!(project.resolve(inner, "Outer").unwrap(), Resolved::Declared(outer));
        assert_eq!(project.resolve(inner, "Other").unwrap(), Resolved::Declared(other));
        assert_eq!(
            project.resolve(Scope::unit(outer.unit), "Outer.Other").unwrap(),
            Resolved::Declared(other)
        );
    }

    #[test]
    fn test_qualified_name_into_type_parameter_fails() {
        let project = project(vec![vec![
            Event::enter(DeclKind::Class, "Box"),
            Event::type_parameter("T"),
            Event::ExitType,
        ]]);
        let err = project.resolve(scope_of(&project, "Box"), "T.Inner").unwrap_err();
        assert!(matches!(err, ResolveError::Unresolved { ref name, .. } if name == "T.Inner"));
    }

    #[test]
    fn test_missing_nested_type_is_unresolved() {
        let project = project(vec![vec![Event::enter(DeclKind::Class, "A"), Event::ExitType]]);
        let scope = scope_of(&project, "A");
        let err = project.resolve(scope, "A.Nope").unwrap_err();
        assert_eq!(err.scope(), scope);
        assert_eq!(err.name(), "A.Nope");
        assert_eq!(err.to_string(), "cannot resolve type: A.Nope");
    }

    #[test]
    fn test_resolve_type_is_memoized() {
        let project = project(vec![vec![
            Event::package("p"),
            Event::enter(DeclKind::Class, "A"),
            Event::field(TypeSyntax::named("Integer"), "count"),
            Event::ExitType,
        ]]);
        let id = project.find_type("p.A").unwrap();
        let field = &project.decl(id).fields()[0];
        let ty = field.ty.as_object().unwrap();
        assert!(ty.cached().is_none());

        let resolved = project.resolve_type(id.unit, ty).unwrap();
        assert_eq!(ty.cached(), Some(&resolved));
        assert!(project.is_number(id.unit, &field.ty));
        assert!(!project.is_boolean(id.unit, &field.ty));
    }

    #[test]
    fn test_annotation_must_resolve_to_annotation_type() {
        let project = project(vec![vec![
            Event::package("p"),
            Event::enter(DeclKind::Annotation, "Marker"),
            Event::ExitType,
            Event::enter(DeclKind::Class, "NotMarker"),
            Event::ExitType,
            Event::Annotation(AnnotationSyntax::marker("Marker")),
            Event::Annotation(AnnotationSyntax::marker("Override")),
            Event::enter(DeclKind::Class, "A"),
            Event::ExitType,
            Event::Annotation(AnnotationSyntax::marker("NotMarker")),
            Event::enter(DeclKind::Class, "B"),
            Event::ExitType,
        ]]);
        let a = project.find_type("p.A").unwrap();
        let decl = project.decl(a);
        assert!(project.has_annotation(a.unit, decl, "p.Marker").unwrap());
        assert!(project.has_annotation(a.unit, decl, "java.lang.Override").unwrap());
        assert!(!project.has_annotation(a.unit, decl, "p.Other").unwrap());

        let b = project.find_type("p.B").unwrap();
        let err = project
            .resolve_annotation(b.unit, &project.decl(b).annotations[0])
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotAnAnnotation { .. }));
        assert!(matches!(project.decl(b).body, DeclBody::Class { .. }));
    }

    #[test]
    fn test_single_import_beats_same_unit_top_level() {
        let project = project(vec![vec![
            Event::package("p"),
            Event::import("q.Foo"),
            Event::enter(DeclKind::Class, "A"),
            Event::ExitType,
            Event::enter(DeclKind::Class, "Foo"),
            Event::ExitType,
        ]]);
        let a = scope_of(&project, "p.A");
        let expected = Resolved::External(SmolStr::new("q.Foo"));
        assert_eq!(project.resolve(a, "Foo").unwrap(), expected);
        assert_eq!(project.resolve(Scope::unit(a.unit), "Foo").unwrap(), expected);
        // a sibling without a colliding import is found in the same package
        let foo = project.find_type("p.Foo").unwrap();
        assert_eq!(project.resolve(a, "A").unwrap(), Resolved::Declared(project.find_type("p.A").unwrap()));
        assert_eq!(project.resolve(scope_of(&project, "p.Foo"), "Foo").unwrap(), Resolved::Declared(foo));
    }

    #[test]
    fn test_qualified_annotation_resolves_by_simple_name() {
        let project = project(vec![vec![
            Event::package("p"),
            Event::Annotation(AnnotationSyntax::marker("java.lang.Deprecated")),
            Event::enter(DeclKind::Class, "A"),
            Event::ExitType,
        ]]);
        let a = project.find_type("p.A").unwrap();
        let decl = project.decl(a);
        assert_eq!(
            project.resolve_annotation(a.unit, &decl.annotations[0]).unwrap(),
            Resolved::External(SmolStr::new("java.lang.Deprecated"))
        );
        assert!(project.has_annotation(a.unit, decl, "java.lang.Deprecated").unwrap());
    }
}
