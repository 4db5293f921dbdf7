//! Diagnostics: unit-wide resolution checks.
//!
//! [`SemanticChecker`] resolves every type reference and annotation of a
//! compilation unit and reports the failures. Successful resolutions are
//! memoized on the model as a side effect.

use std::sync::Arc;

use super::error::ResolveError;
use super::model::{Container, HasAnnotations, Project, Scope, TypeDecl};
use super::types::{ObjectType, TypeRef};
use crate::base::name::simple_name;
use crate::base::{DeclId, UnitId};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// A diagnostic message attached to a scope of a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The scope the offending name was looked up from.
    pub scope: Scope,
    /// Human-readable name of the scope, e.g. `com.example.Outer`.
    pub location: Arc<str>,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(scope: Scope, location: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self {
            scope,
            location: location.into(),
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(scope: Scope, location: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(scope, location, message)
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
pub mod codes {
    /// Name matches no resolution rule.
    pub const UNRESOLVED_TYPE: &str = "E0001";
    /// Name could come from several wildcard imports.
    pub const AMBIGUOUS_TYPE: &str = "E0002";
    /// Annotation name resolves to something that is not an annotation type.
    pub const NOT_AN_ANNOTATION: &str = "E0003";

    /// Several single-type imports share a simple name; the first one wins.
    pub const SHADOWED_IMPORT: &str = "W0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during semantic analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add the diagnostic for a failed resolution.
    pub fn resolve_error(&mut self, location: impl Into<Arc<str>>, error: &ResolveError) {
        let code = match error {
            ResolveError::Unresolved { .. } => codes::UNRESOLVED_TYPE,
            ResolveError::Ambiguous { .. } => codes::AMBIGUOUS_TYPE,
            ResolveError::NotAnAnnotation { .. } => codes::NOT_AN_ANNOTATION,
        };
        self.add(Diagnostic::error(error.scope(), location, error.to_string()).with_code(code));
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific unit.
    pub fn diagnostics_for_unit(&self, unit: UnitId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.scope.unit == unit).collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

// ============================================================================
// SEMANTIC CHECKER
// ============================================================================

/// Resolves every reference of a unit and collects the failures.
pub struct SemanticChecker<'a> {
    project: &'a Project,
    collector: DiagnosticCollector,
}

impl<'a> SemanticChecker<'a> {
    /// Create a new semantic checker.
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            collector: DiagnosticCollector::new(),
        }
    }

    /// Check all declarations of a unit.
    pub fn check_unit(&mut self, unit: UnitId) {
        let project = self.project;
        let compilation_unit = project.unit(unit);
        self.check_imports(unit);
        compilation_unit.visit_types(|local, decl| self.check_decl(DeclId::new(unit, local), decl));
    }

    /// Check every unit of the project.
    pub fn check_project(&mut self) {
        let project = self.project;
        for unit in project.units() {
            self.check_unit(unit.id());
        }
    }

    fn check_imports(&mut self, unit: UnitId) {
        let project = self.project;
        let compilation_unit = project.unit(unit);
        let singles: Vec<_> = compilation_unit.imports().iter().filter(|i| !i.is_wildcard()).collect();
        for (i, import) in singles.iter().enumerate() {
            let simple = simple_name(&import.name);
            let shadowed = singles[..i]
                .iter()
                .find(|earlier| simple_name(&earlier.name) == simple);
            if let Some(winner) = shadowed {
                self.collector.add(
                    Diagnostic::warning(
                        Scope::unit(unit),
                        compilation_unit.container_name(Container::Unit),
                        format!("import {} is shadowed by import {}", import.name, winner.name),
                    )
                    .with_code(codes::SHADOWED_IMPORT),
                );
            }
        }
    }

    fn check_decl(&mut self, id: DeclId, decl: &TypeDecl) {
        let location: Arc<str> = Arc::from(self.project.qualified_name(id));

        self.check_annotations(id.unit, &location, decl);
        for param in &decl.type_params {
            self.check_annotations(id.unit, &location, param);
            for bound in &param.bounds {
                self.check_object(id.unit, &location, bound);
            }
        }
        if let Some(superclass) = decl.superclass() {
            self.check_object(id.unit, &location, superclass);
        }
        for interface in &decl.interfaces {
            self.check_object(id.unit, &location, interface);
        }
        for field in decl.fields() {
            self.check_annotations(id.unit, &location, field);
            self.check_type(id.unit, &location, &field.ty);
        }
        for constant in decl.constants() {
            self.check_annotations(id.unit, &location, constant);
        }
        for constructor in decl.constructors() {
            self.check_annotations(id.unit, &location, constructor);
            for param in &constructor.parameters {
                self.check_annotations(id.unit, &location, param);
                self.check_type(id.unit, &location, &param.ty);
            }
        }
        for method in &decl.methods {
            self.check_annotations(id.unit, &location, method);
            self.check_type(id.unit, &location, &method.return_type);
            for param in &method.parameters {
                self.check_annotations(id.unit, &location, param);
                self.check_type(id.unit, &location, &param.ty);
            }
        }
    }

    fn check_annotations(&mut self, unit: UnitId, location: &Arc<str>, element: &impl HasAnnotations) {
        for annotation in element.annotations() {
            if let Err(err) = self.project.resolve_annotation(unit, annotation) {
                self.collector.resolve_error(location.clone(), &err);
            }
        }
    }

    fn check_type(&mut self, unit: UnitId, location: &Arc<str>, ty: &TypeRef) {
        for object in ty.object_types() {
            if let Err(err) = self.project.resolve_type(unit, object) {
                self.collector.resolve_error(location.clone(), &err);
            }
        }
    }

    /// Resolve `ty` and every type in its argument lists.
    fn check_object(&mut self, unit: UnitId, location: &Arc<str>, ty: &ObjectType) {
        for object in ty.object_types() {
            if let Err(err) = self.project.resolve_type(unit, object) {
                self.collector.resolve_error(location.clone(), &err);
            }
        }
    }

    /// Get the collected diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.collector.diagnostics
    }
}

/// Check a unit and return diagnostics.
pub fn check_unit(project: &Project, unit: UnitId) -> Vec<Diagnostic> {
    let mut checker = SemanticChecker::new(project);
    checker.check_unit(unit);
    checker.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::builder::{BuilderOptions, build_unit};
    use crate::syntax::{AnnotationSyntax, DeclKind, Event, TypeSyntax};

    fn project(events: Vec<Event>) -> Project {
        let unit = build_unit(events, BuilderOptions::strict()).expect("unit");
        Project::new(vec![unit]).expect("project")
    }

    #[test]
    fn test_collector_counts() {
        let scope = Scope::unit(UnitId::new(0));
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::error(scope, "A", "error 1"));
        collector.add(Diagnostic::error(scope, "A", "error 2"));
        collector.add(Diagnostic::warning(scope, "A", "warning 1"));

        assert_eq!(collector.error_count(), 2);
        assert_eq!(collector.warning_count(), 1);
        assert!(collector.has_errors());
        assert_eq!(collector.diagnostics_for_unit(UnitId::new(1)).len(), 0);
        assert_eq!(collector.take().len(), 3);
        assert!(collector.diagnostics().is_empty());
    }

    #[test]
    fn test_ambiguous_field_type() {
        let project = project(vec![
            Event::package("p"),
            Event::wildcard_import("java.util"),
            Event::wildcard_import("java.awt"),
            Event::enter(DeclKind::Class, "Widget"),
            Event::field(TypeSyntax::named("List"), "items"),
            Event::ExitType,
        ]);
        let diagnostics = check_unit(&project, UnitId::new(0));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some(codes::AMBIGUOUS_TYPE));
        assert_eq!(&*diagnostics[0].location, "p.Widget");
    }

    #[test]
    fn test_clean_unit_warms_caches() {
        let project = project(vec![
            Event::package("p"),
            Event::import("java.util.List"),
            Event::Annotation(AnnotationSyntax::marker("Deprecated")),
            Event::enter(DeclKind::Class, "Widget"),
            Event::field(
                TypeSyntax::named("List").with_arguments(vec![crate::syntax::TypeArgSyntax::ty("Widget")]),
                "children",
            ),
            Event::ExitType,
        ]);
        assert!(check_unit(&project, UnitId::new(0)).is_empty());

        let id = project.find_type("p.Widget").unwrap();
        let decl = project.decl(id);
        assert!(decl.annotations[0].cached().is_some());
        let field = decl.fields()[0].ty.as_object().unwrap();
        assert!(field.cached().is_some());
    }

    #[test]
    fn test_shadowed_import_warning() {
        let project = project(vec![
            Event::import("java.util.List"),
            Event::import("java.awt.List"),
        ]);
        let diagnostics = check_unit(&project, UnitId::new(0));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].code.as_deref(), Some(codes::SHADOWED_IMPORT));
    }
}
