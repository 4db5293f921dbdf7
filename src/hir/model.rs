//! The semantic model: project, compilation units, declared types, members.
//!
//! Ownership is strictly top-down. A [`Project`] owns its
//! [`CompilationUnit`]s, a unit owns every [`TypeDecl`] declared in it (in a
//! per-unit arena indexed by [`LocalDefId`]), and declarations own their
//! members. The reverse direction is expressed with [`Container`] ids, never
//! with references, so the whole model is a tree plus ids.
//!
//! Everything is immutable after construction except two write-once caches:
//! the resolution of an [`ObjectType`] and of an [`Annotation`].

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::error::{BuildError, ProjectError};
use super::expr::Expression;
use super::resolve::Resolved;
use super::types::{ObjectType, TypeRef};
use crate::base::name::{self, SEPARATOR};
use crate::base::{DeclId, LocalDefId, UnitId};
use crate::syntax::DeclKind;

// ============================================================================
// CONTAINERS & SCOPES
// ============================================================================

/// Where a declaration or reference lives inside its compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    /// Directly in the compilation unit (top level).
    Unit,
    /// Inside a declared type of the same unit.
    Type(LocalDefId),
}

/// A lookup context: a container within a specific unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Scope {
    pub unit: UnitId,
    pub container: Container,
}

impl Scope {
    pub const fn new(unit: UnitId, container: Container) -> Self {
        Self { unit, container }
    }

    /// The top level of a unit.
    pub const fn unit(unit: UnitId) -> Self {
        Self::new(unit, Container::Unit)
    }

    /// The body of a declared type.
    pub const fn decl(id: DeclId) -> Self {
        Self::new(id.unit, Container::Type(id.local))
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// A declaration modifier keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(rename_all = "kebab-case"))]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
    Sealed,
    NonSealed,
}

impl Modifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "static" => Modifier::Static,
            "abstract" => Modifier::Abstract,
            "final" => Modifier::Final,
            "native" => Modifier::Native,
            "synchronized" => Modifier::Synchronized,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "strictfp" => Modifier::Strictfp,
            "default" => Modifier::Default,
            "sealed" => Modifier::Sealed,
            "non-sealed" => Modifier::NonSealed,
            _ => return None,
        };
        Some(modifier)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Abstract => "abstract",
            Modifier::Final => "final",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
        }
    }
}

impl std::str::FromStr for Modifier {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifier::from_keyword(s).ok_or_else(|| BuildError::UnknownModifier(SmolStr::new(s)))
    }
}

/// The modifier set of a declaration, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(transparent))]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Modifier>> for Modifiers {
    fn from(modifiers: Vec<Modifier>) -> Self {
        Self(modifiers)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// NAMED / ANNOTATED ELEMENTS
// ============================================================================

/// Elements looked up by simple name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Elements that carry annotations.
pub trait HasAnnotations {
    fn annotations(&self) -> &[Annotation];
}

/// First element of `items` with the given name.
pub fn find_object<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

macro_rules! impl_named {
    ($($ty:ty),* $(,)?) => {
        $(impl Named for $ty {
            fn name(&self) -> &str {
                &self.name
            }
        })*
    };
}

macro_rules! impl_has_annotations {
    ($($ty:ty),* $(,)?) => {
        $(impl HasAnnotations for $ty {
            fn annotations(&self) -> &[Annotation] {
                &self.annotations
            }
        })*
    };
}

impl_named!(TypeDecl, Method, Field, Parameter, EnumConstant, TypeParameter, AnnotationValue);
impl_has_annotations!(TypeDecl, Method, Constructor, Field, Parameter, EnumConstant, TypeParameter);

// ============================================================================
// ANNOTATIONS
// ============================================================================

/// An annotation usage, e.g. `@Column(name = "id")`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Annotation {
    /// The annotation name as written (possibly qualified).
    pub name: SmolStr,
    pub values: Vec<AnnotationValue>,
    #[cfg_attr(feature = "dump", serde(skip))]
    pub(crate) container: Container,
    #[cfg_attr(feature = "dump", serde(skip))]
    pub(crate) resolved: OnceLock<Resolved>,
}

impl Annotation {
    pub(crate) fn new(container: Container, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            container,
            resolved: OnceLock::new(),
        }
    }

    /// The last segment of the written name.
    pub fn simple_name(&self) -> &str {
        name::simple_name(&self.name)
    }

    /// The container whose scope the annotation name resolves in.
    pub fn container(&self) -> Container {
        self.container
    }

    /// The value of the element `name`, e.g. `value`.
    pub fn value(&self, name: &str) -> Option<&Expression> {
        find_object(&self.values, name).map(|v| &v.value)
    }

    /// The memoized resolution, if the annotation was resolved before.
    pub fn cached(&self) -> Option<&Resolved> {
        self.resolved.get()
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

/// One `name = value` pair of an annotation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct AnnotationValue {
    pub name: SmolStr,
    pub value: Expression,
}

// ============================================================================
// MEMBERS
// ============================================================================

/// Type parameter, e.g. `T` in `class Box<T extends Comparable<T>>`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct TypeParameter {
    pub name: SmolStr,
    #[cfg_attr(feature = "dump", serde(skip_serializing_if = "Vec::is_empty"))]
    pub annotations: Vec<Annotation>,
    /// Bound constraints, e.g. `Serializable & Closeable`.
    pub bounds: Vec<ObjectType>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Method {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub return_type: TypeRef,
    pub parameters: Vec<Parameter>,
}

impl Method {
    /// Whether the method is public when declared in `owner`.
    pub fn is_public(&self, owner: &TypeDecl) -> bool {
        is_public_member(owner, &self.modifiers)
    }
}

/// A constructor; its name is the name of the declaring type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Constructor {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub parameters: Vec<Parameter>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Field {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    #[cfg_attr(feature = "dump", serde(skip_serializing_if = "Option::is_none"))]
    pub initializer: Option<Expression>,
}

impl Field {
    pub fn is_public(&self, owner: &TypeDecl) -> bool {
        is_public_member(owner, &self.modifiers)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Parameter {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub ty: TypeRef,
    pub varargs: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct EnumConstant {
    pub name: SmolStr,
    pub annotations: Vec<Annotation>,
}

/// Interface members are public unless marked otherwise; everything else
/// must say `public`.
pub fn is_public_member(owner: &TypeDecl, modifiers: &Modifiers) -> bool {
    match owner.kind() {
        DeclKind::Interface | DeclKind::Annotation => {
            !modifiers.contains(Modifier::Private) && !modifiers.contains(Modifier::Protected)
        }
        _ => modifiers.contains(Modifier::Public),
    }
}

// ============================================================================
// DECLARED TYPES
// ============================================================================

/// Kind-specific part of a type declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(tag = "kind"))]
pub enum DeclBody {
    Class {
        #[cfg_attr(feature = "dump", serde(skip_serializing_if = "Option::is_none"))]
        superclass: Option<ObjectType>,
        constructors: Vec<Constructor>,
        fields: Vec<Field>,
    },
    Interface,
    Enum {
        constants: Vec<EnumConstant>,
        constructors: Vec<Constructor>,
        fields: Vec<Field>,
    },
    /// Record components are stored as fields.
    Record {
        constructors: Vec<Constructor>,
        fields: Vec<Field>,
    },
    Annotation,
}

impl DeclBody {
    pub(crate) fn empty(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Class => DeclBody::Class {
                superclass: None,
                constructors: Vec::new(),
                fields: Vec::new(),
            },
            DeclKind::Interface => DeclBody::Interface,
            DeclKind::Enum => DeclBody::Enum {
                constants: Vec::new(),
                constructors: Vec::new(),
                fields: Vec::new(),
            },
            DeclKind::Record => DeclBody::Record {
                constructors: Vec::new(),
                fields: Vec::new(),
            },
            DeclKind::Annotation => DeclBody::Annotation,
        }
    }
}

/// A class, interface, enum, record or annotation declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct TypeDecl {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParameter>,
    pub interfaces: Vec<ObjectType>,
    pub methods: Vec<Method>,
    #[cfg_attr(feature = "dump", serde(flatten))]
    pub body: DeclBody,
    #[cfg_attr(feature = "dump", serde(skip))]
    pub(crate) container: Container,
    #[cfg_attr(feature = "dump", serde(skip))]
    pub(crate) nested: Vec<LocalDefId>,
}

impl TypeDecl {
    pub(crate) fn new(kind: DeclKind, name: impl Into<SmolStr>, container: Container) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            type_params: Vec::new(),
            interfaces: Vec::new(),
            methods: Vec::new(),
            body: DeclBody::empty(kind),
            container,
            nested: Vec::new(),
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self.body {
            DeclBody::Class { .. } => DeclKind::Class,
            DeclBody::Interface => DeclKind::Interface,
            DeclBody::Enum { .. } => DeclKind::Enum,
            DeclBody::Record { .. } => DeclKind::Record,
            DeclBody::Annotation => DeclKind::Annotation,
        }
    }

    /// The enclosing type or the unit itself.
    pub fn container(&self) -> Container {
        self.container
    }

    /// Directly nested declared types, in declaration order.
    pub fn nested(&self) -> &[LocalDefId] {
        &self.nested
    }

    pub fn fields(&self) -> &[Field] {
        match &self.body {
            DeclBody::Class { fields, .. }
            | DeclBody::Enum { fields, .. }
            | DeclBody::Record { fields, .. } => fields,
            DeclBody::Interface | DeclBody::Annotation => &[],
        }
    }

    pub fn constructors(&self) -> &[Constructor] {
        match &self.body {
            DeclBody::Class { constructors, .. }
            | DeclBody::Enum { constructors, .. }
            | DeclBody::Record { constructors, .. } => constructors,
            DeclBody::Interface | DeclBody::Annotation => &[],
        }
    }

    pub fn superclass(&self) -> Option<&ObjectType> {
        match &self.body {
            DeclBody::Class { superclass, .. } => superclass.as_ref(),
            _ => None,
        }
    }

    pub fn constants(&self) -> &[EnumConstant] {
        match &self.body {
            DeclBody::Enum { constants, .. } => constants,
            _ => &[],
        }
    }

    pub fn type_param(&self, name: &str) -> Option<&TypeParameter> {
        find_object(&self.type_params, name)
    }

    pub(crate) fn fields_mut(&mut self) -> Option<&mut Vec<Field>> {
        match &mut self.body {
            DeclBody::Class { fields, .. }
            | DeclBody::Enum { fields, .. }
            | DeclBody::Record { fields, .. } => Some(fields),
            DeclBody::Interface | DeclBody::Annotation => None,
        }
    }

    pub(crate) fn constructors_mut(&mut self) -> Option<&mut Vec<Constructor>> {
        match &mut self.body {
            DeclBody::Class { constructors, .. }
            | DeclBody::Enum { constructors, .. }
            | DeclBody::Record { constructors, .. } => Some(constructors),
            DeclBody::Interface | DeclBody::Annotation => None,
        }
    }
}

// ============================================================================
// COMPILATION UNIT
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(rename_all = "lowercase"))]
pub enum ImportKind {
    /// `import a.b.C;`
    Single,
    /// `import a.b.*;`
    Wildcard,
}

/// An import declaration. For wildcard imports `name` is the namespace
/// without the trailing `.*`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Import {
    pub name: SmolStr,
    pub kind: ImportKind,
}

impl Import {
    pub fn single(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: ImportKind::Single,
        }
    }

    pub fn wildcard(namespace: impl Into<SmolStr>) -> Self {
        Self {
            name: namespace.into(),
            kind: ImportKind::Wildcard,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == ImportKind::Wildcard
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ImportKind::Single => f.write_str(&self.name),
            ImportKind::Wildcard => write!(f, "{}{SEPARATOR}*", self.name),
        }
    }
}

/// One parsed source file.
#[derive(Clone, Debug, Default)]
pub struct CompilationUnit {
    pub(crate) id: UnitId,
    pub(crate) package: Option<SmolStr>,
    pub(crate) imports: Vec<Import>,
    /// Arena of every type declared in the unit; parents precede children.
    pub(crate) decls: Vec<TypeDecl>,
    /// Top-level declarations in source order.
    pub(crate) types: Vec<LocalDefId>,
}

impl CompilationUnit {
    /// The unit's position in its project. Zero until added to a project.
    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// The first single-type import whose last segment is `simple_name`.
    ///
    /// Colliding imports are not disambiguated: the first one wins.
    pub fn find_import(&self, simple_name: &str) -> Option<&Import> {
        self.imports
            .iter()
            .filter(|i| !i.is_wildcard())
            .find(|i| name::simple_name(&i.name) == simple_name)
    }

    pub fn wildcard_imports(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter().filter(|i| i.is_wildcard())
    }

    /// Top-level declarations in source order.
    pub fn top_level(&self) -> &[LocalDefId] {
        &self.types
    }

    /// A top-level declaration by simple name.
    pub fn find_top_level(&self, simple_name: &str) -> Option<LocalDefId> {
        self.types
            .iter()
            .copied()
            .find(|&id| self.decl(id).name == simple_name)
    }

    /// The declaration with the given id. Ids come from this unit only.
    pub fn decl(&self, id: LocalDefId) -> &TypeDecl {
        &self.decls[id.index() as usize]
    }

    pub fn get(&self, id: LocalDefId) -> Option<&TypeDecl> {
        self.decls.get(id.index() as usize)
    }

    /// Number of declared types, nested ones included.
    pub fn type_count(&self) -> usize {
        self.decls.len()
    }

    /// Walk all declared types depth first, in declaration order.
    pub fn visit_types(&self, mut callback: impl FnMut(LocalDefId, &TypeDecl)) {
        fn visit(
            unit: &CompilationUnit,
            id: LocalDefId,
            callback: &mut dyn FnMut(LocalDefId, &TypeDecl),
        ) {
            let decl = unit.decl(id);
            callback(id, decl);
            for &child in &decl.nested {
                visit(unit, child, callback);
            }
        }

        for &id in &self.types {
            visit(self, id, &mut callback);
        }
    }

    /// Walk the enclosing declared types of `id`, innermost first.
    pub fn visit_parents<'a>(&'a self, id: LocalDefId, mut callback: impl FnMut(LocalDefId, &'a TypeDecl)) {
        let mut container = self.decl(id).container;
        while let Container::Type(parent) = container {
            let decl = self.decl(parent);
            callback(parent, decl);
            container = decl.container;
        }
    }

    /// Apply `callback` to `id` and then to each enclosing type, returning
    /// the first `Some`.
    pub fn find_object<T>(
        &self,
        id: LocalDefId,
        mut callback: impl FnMut(LocalDefId, &TypeDecl) -> Option<T>,
    ) -> Option<T> {
        let mut container = Container::Type(id);
        while let Container::Type(current) = container {
            let decl = self.decl(current);
            if let Some(found) = callback(current, decl) {
                return Some(found);
            }
            container = decl.container;
        }
        None
    }

    /// A directly nested type of `id` by simple name.
    pub fn find_nested(&self, id: LocalDefId, simple_name: &str) -> Option<LocalDefId> {
        self.decl(id)
            .nested
            .iter()
            .copied()
            .find(|&child| self.decl(child).name == simple_name)
    }

    /// Package, then enclosing types outward-in, then the simple name.
    pub fn qualified_name(&self, id: LocalDefId) -> String {
        let mut segments = vec![self.decl(id).name.as_str()];
        self.visit_parents(id, |_, parent| segments.push(parent.name.as_str()));
        if let Some(package) = &self.package {
            segments.push(package.as_str());
        }
        segments.reverse();
        segments.join(".")
    }

    /// Human-readable name of a container, for messages.
    pub fn container_name(&self, container: Container) -> String {
        match container {
            Container::Unit => match &self.package {
                Some(package) => format!("<compilation unit {package}>"),
                None => "<compilation unit>".to_string(),
            },
            Container::Type(id) => self.qualified_name(id),
        }
    }
}

// ============================================================================
// PROJECT
// ============================================================================

/// All compilation units of a code base, indexed by qualified type name.
#[derive(Debug, Default)]
pub struct Project {
    units: Vec<CompilationUnit>,
    /// Qualified name -> declaration, built once in [`Project::new`].
    index: FxHashMap<SmolStr, DeclId>,
}

impl Project {
    /// Take ownership of `units` and index every declared type.
    ///
    /// Fails if two declared types share a fully qualified name.
    pub fn new(mut units: Vec<CompilationUnit>) -> Result<Self, ProjectError> {
        let mut index = FxHashMap::default();

        for (i, unit) in units.iter_mut().enumerate() {
            unit.id = UnitId::new(i as u32);
            let mut duplicate = None;
            unit.visit_types(|local, _| {
                if duplicate.is_some() {
                    return;
                }
                let qualified = SmolStr::from(unit.qualified_name(local));
                if index.contains_key(&qualified) {
                    duplicate = Some(qualified);
                } else {
                    index.insert(qualified, DeclId::new(unit.id, local));
                }
            });
            if let Some(name) = duplicate {
                tracing::debug!(name = %name, "duplicate declared type");
                return Err(ProjectError::DuplicateType(name));
            }
        }

        tracing::debug!(units = units.len(), types = index.len(), "project indexed");
        Ok(Self { units, index })
    }

    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    /// The unit with the given id. Ids come from this project only.
    pub fn unit(&self, id: UnitId) -> &CompilationUnit {
        &self.units[id.index() as usize]
    }

    /// Units declaring the given package (`None` for the default package).
    pub fn find_compilation_units<'a>(
        &'a self,
        package: Option<&'a str>,
    ) -> impl Iterator<Item = &'a CompilationUnit> + 'a {
        self.units.iter().filter(move |u| u.package() == package)
    }

    /// A declared type by fully qualified name.
    pub fn find_type(&self, qualified_name: &str) -> Option<DeclId> {
        self.index.get(qualified_name).copied()
    }

    pub fn decl(&self, id: DeclId) -> &TypeDecl {
        self.unit(id.unit).decl(id.local)
    }

    /// The type declaring `id`, or `None` for a top-level type.
    pub fn enclosing(&self, id: DeclId) -> Option<DeclId> {
        match self.decl(id).container() {
            Container::Type(local) => Some(DeclId::new(id.unit, local)),
            Container::Unit => None,
        }
    }

    pub fn qualified_name(&self, id: DeclId) -> String {
        self.unit(id.unit).qualified_name(id.local)
    }

    /// Walk every declared type of every unit, depth first.
    pub fn visit_types(&self, mut callback: impl FnMut(DeclId, &TypeDecl)) {
        for unit in &self.units {
            unit.visit_types(|local, decl| callback(DeclId::new(unit.id, local), decl));
        }
    }

    /// Number of declared types in the project.
    pub fn type_count(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// package p; class Outer { class Inner {} } interface Other {}
    fn sample_unit() -> CompilationUnit {
        let mut unit = CompilationUnit {
            package: Some(SmolStr::new("p")),
            ..CompilationUnit::default()
        };
        let mut outer = TypeDecl::new(DeclKind::Class, "Outer", Container::Unit);
        outer.nested.push(LocalDefId::new(1));
        unit.decls.push(outer);
        unit.decls.push(TypeDecl::new(
            DeclKind::Class,
            "Inner",
            Container::Type(LocalDefId::new(0)),
        ));
        unit.decls.push(TypeDecl::new(DeclKind::Interface, "Other", Container::Unit));
        unit.types = vec![LocalDefId::new(0), LocalDefId::new(2)];
        unit
    }

    #[test]
    fn test_qualified_name_walks_containers() {
        let unit = sample_unit();
        assert_eq!(unit.qualified_name(LocalDefId::new(0)), "p.Outer");
        assert_eq!(unit.qualified_name(LocalDefId::new(1)), "p.Outer.Inner");
        // recomputed on every call, never cached
        assert_eq!(unit.qualified_name(LocalDefId::new(1)), "p.Outer.Inner");
    }

    #[test]
    fn test_visit_types_depth_first() {
        let unit = sample_unit();
        let mut names = Vec::new();
        unit.visit_types(|_, decl| names.push(decl.name.to_string()));
        assert_eq!(names, ["Outer", "Inner", "Other"]);
    }

    #[test]
    fn test_visit_parents_stops_at_unit() {
        let unit = sample_unit();
        let mut parents = Vec::new();
        unit.visit_parents(LocalDefId::new(1), |_, decl| parents.push(decl.name.to_string()));
        assert_eq!(parents, ["Outer"]);

        parents.clear();
        unit.visit_parents(LocalDefId::new(0), |_, decl| parents.push(decl.name.to_string()));
        assert!(parents.is_empty());
    }

    #[test]
    fn test_find_object_includes_self() {
        let unit = sample_unit();
        let found = unit.find_object(LocalDefId::new(1), |id, decl| {
            (decl.name == "Outer").then_some(id)
        });
        assert_eq!(found, Some(LocalDefId::new(0)));
    }

    #[test]
    fn test_find_import_first_match_wins() {
        let unit = CompilationUnit {
            imports: vec![
                Import::wildcard("a.List"),
                Import::single("java.util.List"),
                Import::single("java.awt.List"),
            ],
            ..CompilationUnit::default()
        };
        let found = unit.find_import("List").map(|i| i.name.as_str());
        assert_eq!(found, Some("java.util.List"));
        assert!(unit.find_import("Map").is_none());
    }

    #[test]
    fn test_project_index() {
        let project = Project::new(vec![sample_unit()]).expect("project");
        assert_eq!(project.type_count(), 3);
        let inner = project.find_type("p.Outer.Inner").expect("inner");
        assert_eq!(project.decl(inner).name, "Inner");
        assert!(project.find_type("Outer").is_none());
        assert_eq!(project.find_compilation_units(Some("p")).count(), 1);
        assert_eq!(project.find_compilation_units(None).count(), 0);

        let outer = project.enclosing(inner).expect("outer");
        assert_eq!(project.qualified_name(outer), "p.Outer");
        assert!(project.enclosing(outer).is_none());
    }

    #[test]
    fn test_project_rejects_duplicates() {
        let err = Project::new(vec![sample_unit(), sample_unit()]).unwrap_err();
        assert_eq!(err, ProjectError::DuplicateType(SmolStr::new("p.Outer")));
    }

    #[test]
    fn test_modifier_keywords() {
        assert_eq!("non-sealed".parse::<Modifier>(), Ok(Modifier::NonSealed));
        assert_eq!(Modifier::Transient.keyword(), "transient");
        assert!(matches!(
            "const".parse::<Modifier>(),
            Err(BuildError::UnknownModifier(_))
        ));
    }

    #[test]
    fn test_interface_members_public_by_default() {
        let iface = TypeDecl::new(DeclKind::Interface, "I", Container::Unit);
        let class = TypeDecl::new(DeclKind::Class, "C", Container::Unit);
        let none = Modifiers::new();
        let private: Modifiers = [Modifier::Private].into_iter().collect();
        let public: Modifiers = [Modifier::Public].into_iter().collect();

        assert!(is_public_member(&iface, &none));
        assert!(!is_public_member(&iface, &private));
        assert!(!is_public_member(&class, &none));
        assert!(is_public_member(&class, &public));
    }
}
