//! Type references and the primitive/boxed classification tables.
//!
//! A [`TypeRef`] is one of three shapes: a primitive, a reference to a
//! declared (object) type, or an array. Object references remember the
//! container they were written in so they can be resolved lazily; the
//! resolution result is cached in a write-once cell.

use std::fmt;
use std::sync::OnceLock;

use smol_str::SmolStr;

use super::model::Container;
use super::resolve::Resolved;
use crate::base::name::SEPARATOR;
use crate::syntax::{BoundKind, TypeArgSyntax, TypeSyntax};

/// Namespace whose types are available without an import.
pub const CORE_NAMESPACE: &str = "java.lang";

// ============================================================================
// PRIMITIVES
// ============================================================================

/// A primitive type, e.g. `int` or `void`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(rename_all = "lowercase"))]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Void,
}

/// Primitive name and box type, one row per primitive.
const PRIMITIVES: [(PrimitiveType, &str, &str); 9] = [
    (PrimitiveType::Boolean, "boolean", "java.lang.Boolean"),
    (PrimitiveType::Byte, "byte", "java.lang.Byte"),
    (PrimitiveType::Char, "char", "java.lang.Character"),
    (PrimitiveType::Double, "double", "java.lang.Double"),
    (PrimitiveType::Float, "float", "java.lang.Float"),
    (PrimitiveType::Int, "int", "java.lang.Integer"),
    (PrimitiveType::Long, "long", "java.lang.Long"),
    (PrimitiveType::Short, "short", "java.lang.Short"),
    (PrimitiveType::Void, "void", "java.lang.Void"),
];

impl PrimitiveType {
    /// Look up a primitive by its keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(_, keyword, _)| *keyword == name)
            .map(|(ty, _, _)| *ty)
    }

    /// The keyword, e.g. `int`.
    pub fn name(self) -> &'static str {
        self.row().1
    }

    /// Qualified name of the box type, e.g. `java.lang.Integer`.
    pub fn boxed(self) -> &'static str {
        self.row().2
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte
                | PrimitiveType::Short
                | PrimitiveType::Int
                | PrimitiveType::Long
                | PrimitiveType::Float
                | PrimitiveType::Double
        )
    }

    fn row(self) -> &'static (PrimitiveType, &'static str, &'static str) {
        // rows are in declaration order
        &PRIMITIVES[self as usize]
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `name` is one of the primitive keywords.
pub fn is_primitive_name(name: &str) -> bool {
    PrimitiveType::from_name(name).is_some()
}

/// Map a box type's qualified name back to its primitive.
pub fn unbox(qualified_name: &str) -> Option<PrimitiveType> {
    PRIMITIVES
        .iter()
        .find(|(_, _, boxed)| *boxed == qualified_name)
        .map(|(ty, _, _)| *ty)
}

// ============================================================================
// TYPE REFERENCES
// ============================================================================

/// A type as it appears in a declaration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Object(ObjectType),
    Array(ArrayType),
}

impl TypeRef {
    /// The type name as written, without type arguments: `java.util.List`, `int[][]`.
    pub fn name(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Object(o) => o.qualified_name(),
            TypeRef::Array(a) => a.name(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Primitive(PrimitiveType::Void))
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            TypeRef::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Every object type mentioned by this type, outermost first.
    pub fn object_types(&self) -> Vec<&ObjectType> {
        let mut out = Vec::new();
        self.collect_object_types(&mut out);
        out
    }

    fn collect_object_types<'a>(&'a self, out: &mut Vec<&'a ObjectType>) {
        match self {
            TypeRef::Primitive(_) => {}
            TypeRef::Object(o) => o.collect_object_types(out),
            TypeRef::Array(a) => a.component.collect_object_types(out),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{p}"),
            TypeRef::Object(o) => write!(f, "{o}"),
            TypeRef::Array(a) => write!(f, "{}{}", a.component, "[]".repeat(a.dimension as usize)),
        }
    }
}

/// Reference to a declared type, e.g. `Map<K, V>` or `Outer<String>.Inner`.
///
/// A qualified reference is a chain: `name` is the last segment and
/// `qualifier` holds the segments before it, each with its own arguments.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct ObjectType {
    #[cfg_attr(feature = "dump", serde(skip))]
    pub(crate) container: Container,
    #[cfg_attr(feature = "dump", serde(skip_serializing_if = "Option::is_none"))]
    pub qualifier: Option<Box<ObjectType>>,
    pub name: SmolStr,
    #[cfg_attr(feature = "dump", serde(skip_serializing_if = "Vec::is_empty"))]
    pub arguments: Vec<TypeArgument>,
    #[cfg_attr(feature = "dump", serde(skip))]
    pub(crate) resolved: OnceLock<Resolved>,
}

impl ObjectType {
    pub(crate) fn new(container: Container, name: impl Into<SmolStr>) -> Self {
        Self {
            container,
            qualifier: None,
            name: name.into(),
            arguments: Vec::new(),
            resolved: OnceLock::new(),
        }
    }

    /// The container this reference was written in.
    pub fn container(&self) -> Container {
        self.container
    }

    /// The dotted name as written, without type arguments.
    pub fn qualified_name(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{}{SEPARATOR}{}", q.qualified_name(), self.name),
            None => self.name.to_string(),
        }
    }

    /// The memoized resolution, if this reference was resolved before.
    pub fn cached(&self) -> Option<&Resolved> {
        self.resolved.get()
    }

    /// This type and every object type in its argument lists.
    pub fn object_types(&self) -> Vec<&ObjectType> {
        let mut out = Vec::new();
        self.collect_object_types(&mut out);
        out
    }

    fn collect_object_types<'a>(&'a self, out: &mut Vec<&'a ObjectType>) {
        out.push(self);
        let mut segment = Some(self);
        while let Some(current) = segment {
            current.collect_argument_types(out);
            segment = current.qualifier.as_deref();
        }
    }

    fn collect_argument_types<'a>(&'a self, out: &mut Vec<&'a ObjectType>) {
        for arg in &self.arguments {
            match arg {
                TypeArgument::Type(t) => t.collect_object_types(out),
                TypeArgument::Wildcard(w) => {
                    if let Some(bound) = &w.bound {
                        bound.ty.collect_object_types(out);
                    }
                }
            }
        }
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.qualifier == other.qualifier
            && self.name == other.name
            && self.arguments == other.arguments
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(q) = &self.qualifier {
            write!(f, "{q}{SEPARATOR}")?;
        }
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Array type, e.g. `int[][]` or `String[]`. The component is never an array.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct ArrayType {
    pub component: Box<TypeRef>,
    pub dimension: u32,
}

impl ArrayType {
    pub fn name(&self) -> String {
        format!("{}{}", self.component.name(), "[]".repeat(self.dimension as usize))
    }
}

/// Type argument, e.g. `String` or `? extends Number` in `Map<String, ? extends Number>`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub enum TypeArgument {
    Type(TypeRef),
    Wildcard(Wildcard),
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArgument::Type(t) => write!(f, "{t}"),
            TypeArgument::Wildcard(w) => match &w.bound {
                Some(b) => write!(f, "? {} {}", b.kind.keyword(), b.ty),
                None => f.write_str("?"),
            },
        }
    }
}

/// Wildcard `?` with an optional bound.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct Wildcard {
    #[cfg_attr(feature = "dump", serde(skip_serializing_if = "Option::is_none"))]
    pub bound: Option<WildcardBound>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub struct WildcardBound {
    pub kind: BoundKind,
    pub ty: TypeRef,
}

// ============================================================================
// LOWERING
// ============================================================================

/// Turn parser type syntax into a type reference owned by `container`.
pub(crate) fn lower_type(syntax: &TypeSyntax, container: Container) -> TypeRef {
    match syntax {
        TypeSyntax::Named(segments) => {
            if let [only] = segments.as_slice() {
                if only.arguments.is_empty() {
                    if let Some(p) = PrimitiveType::from_name(&only.name) {
                        return TypeRef::Primitive(p);
                    }
                }
            }
            let mut current: Option<ObjectType> = None;
            for segment in segments {
                let mut ty = ObjectType::new(container, segment.name.clone());
                ty.arguments = segment
                    .arguments
                    .iter()
                    .map(|arg| lower_type_argument(arg, container))
                    .collect();
                ty.qualifier = current.take().map(Box::new);
                current = Some(ty);
            }
            match current {
                Some(ty) => TypeRef::Object(ty),
                // an empty segment list only comes from a broken parser
                None => TypeRef::Object(ObjectType::new(container, "")),
            }
        }
        TypeSyntax::Array {
            component,
            dimension,
        } => with_dimension(lower_type(component, container), *dimension),
    }
}

/// Wrap a type in `dimension` more array levels.
pub(crate) fn with_dimension(ty: TypeRef, dimension: u32) -> TypeRef {
    if dimension == 0 {
        return ty;
    }
    match ty {
        TypeRef::Array(a) => TypeRef::Array(ArrayType {
            component: a.component,
            dimension: a.dimension + dimension,
        }),
        component => TypeRef::Array(ArrayType {
            component: Box::new(component),
            dimension,
        }),
    }
}

fn lower_type_argument(syntax: &TypeArgSyntax, container: Container) -> TypeArgument {
    match syntax {
        TypeArgSyntax::Type(t) => TypeArgument::Type(lower_type(t, container)),
        TypeArgSyntax::Wildcard(bound) => TypeArgument::Wildcard(Wildcard {
            bound: bound.as_ref().map(|(kind, ty)| WildcardBound {
                kind: *kind,
                ty: lower_type(ty, container),
            }),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PrimitiveType::Boolean, "java.lang.Boolean")]
    #[case(PrimitiveType::Char, "java.lang.Character")]
    #[case(PrimitiveType::Int, "java.lang.Integer")]
    #[case(PrimitiveType::Void, "java.lang.Void")]
    fn test_box_and_unbox(#[case] primitive: PrimitiveType, #[case] boxed: &str) {
        assert_eq!(primitive.boxed(), boxed);
        assert_eq!(unbox(boxed), Some(primitive));
    }

    #[test]
    fn test_unbox_rejects_other_types() {
        assert_eq!(unbox("java.lang.String"), None);
        assert_eq!(unbox("Integer"), None);
    }

    #[test]
    fn test_primitive_names_are_closed() {
        for name in ["boolean", "byte", "char", "double", "float", "int", "long", "short", "void"] {
            let p = PrimitiveType::from_name(name).expect("primitive");
            assert_eq!(p.name(), name);
        }
        assert!(!is_primitive_name("String"));
        assert!(!is_primitive_name("Integer"));
    }

    #[test]
    fn test_lower_primitive() {
        let ty = lower_type(&TypeSyntax::named("long"), Container::Unit);
        assert_eq!(ty, TypeRef::Primitive(PrimitiveType::Long));
    }

    #[test]
    fn test_lower_qualified_chain() {
        let syntax = TypeSyntax::named("Outer")
            .with_arguments(vec![TypeArgSyntax::ty("String")])
            .member("Inner")
            .with_arguments(vec![TypeArgSyntax::ty("Number")]);
        let TypeRef::Object(ty) = lower_type(&syntax, Container::Unit) else {
            panic!("expected object type");
        };
        assert_eq!(ty.name, "Inner");
        assert_eq!(ty.qualified_name(), "Outer.Inner");
        assert_eq!(ty.to_string(), "Outer<String>.Inner<Number>");
    }

    #[test]
    fn test_lower_array_and_wildcard() {
        let syntax = TypeSyntax::array(
            TypeSyntax::named("java.util.List").with_arguments(vec![TypeArgSyntax::bounded(
                BoundKind::Extends,
                TypeSyntax::named("Number"),
            )]),
            2,
        );
        let ty = lower_type(&syntax, Container::Unit);
        assert_eq!(ty.name(), "java.util.List[][]");
        assert_eq!(ty.to_string(), "java.util.List<? extends Number>[][]");
        assert_eq!(ty.object_types().len(), 2);
    }

    #[test]
    fn test_lower_zero_dimension_array_is_component() {
        let syntax = TypeSyntax::Array {
            component: Box::new(TypeSyntax::named("int")),
            dimension: 0,
        };
        assert_eq!(lower_type(&syntax, Container::Unit), TypeRef::Primitive(PrimitiveType::Int));
    }

    #[test]
    fn test_with_dimension_flattens() {
        let ty = with_dimension(TypeRef::Primitive(PrimitiveType::Int), 1);
        let ty = with_dimension(ty, 2);
        assert_eq!(ty.name(), "int[][][]");
    }
}
