//! Raw syntax shapes handed over by the external parser.
//!
//! These are plain data: type syntax as written, annotation syntax, and the
//! leaf sequences of expression contexts. Nothing here is resolved.

use smol_str::SmolStr;

use crate::base::name::SEPARATOR;

/// Type syntax as written, e.g. `java.util.Map<K, V>` or `int[][]`.
///
/// Primitive types are written as a single unparameterized segment
/// (`int`, `void`); the builder recognizes them.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSyntax {
    /// A possibly-qualified name; one segment per dotted part.
    Named(Vec<SegmentSyntax>),
    /// An array of a non-array component.
    Array {
        component: Box<TypeSyntax>,
        dimension: u32,
    },
}

/// One dotted segment of a type name, with its type arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentSyntax {
    pub name: SmolStr,
    pub arguments: Vec<TypeArgSyntax>,
}

/// A type argument: a type or a wildcard with an optional bound.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeArgSyntax {
    Type(TypeSyntax),
    Wildcard(Option<(BoundKind, TypeSyntax)>),
}

/// Direction of a wildcard bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
#[cfg_attr(feature = "dump", serde(rename_all = "lowercase"))]
pub enum BoundKind {
    Extends,
    Super,
}

impl BoundKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BoundKind::Extends => "extends",
            BoundKind::Super => "super",
        }
    }
}

impl TypeSyntax {
    /// Dotted name without type arguments, e.g. `TypeSyntax::named("java.util.List")`.
    pub fn named(path: &str) -> Self {
        TypeSyntax::Named(
            path.split(SEPARATOR)
                .map(|name| SegmentSyntax {
                    name: SmolStr::new(name),
                    arguments: Vec::new(),
                })
                .collect(),
        )
    }

    /// Attach type arguments to the last segment of a named type.
    pub fn with_arguments(mut self, arguments: Vec<TypeArgSyntax>) -> Self {
        if let TypeSyntax::Named(segments) = &mut self {
            if let Some(last) = segments.last_mut() {
                last.arguments = arguments;
            }
        }
        self
    }

    /// Append a segment, as in `Outer<String>.Inner`.
    pub fn member(mut self, name: &str) -> Self {
        if let TypeSyntax::Named(segments) = &mut self {
            segments.push(SegmentSyntax {
                name: SmolStr::new(name),
                arguments: Vec::new(),
            });
        }
        self
    }

    /// `component[]…` with `dimension` pairs of brackets.
    pub fn array(component: TypeSyntax, dimension: u32) -> Self {
        match component {
            TypeSyntax::Array {
                component,
                dimension: inner,
            } => TypeSyntax::Array {
                component,
                dimension: inner + dimension,
            },
            component => TypeSyntax::Array {
                component: Box::new(component),
                dimension,
            },
        }
    }
}

impl TypeArgSyntax {
    pub fn ty(path: &str) -> Self {
        TypeArgSyntax::Type(TypeSyntax::named(path))
    }

    pub fn wildcard() -> Self {
        TypeArgSyntax::Wildcard(None)
    }

    pub fn bounded(kind: BoundKind, bound: TypeSyntax) -> Self {
        TypeArgSyntax::Wildcard(Some((kind, bound)))
    }
}

/// One raw element of an expression context.
#[derive(Clone, Debug, PartialEq)]
pub enum Leaf {
    /// Literal source text: `42`, `1_000L`, `"a\n"`, `'c'`, `true`, `null`.
    Literal(SmolStr),
    /// An identifier or dotted name.
    Name(SmolStr),
    /// An operator, separator or keyword token: `+`, `(`, `new`.
    Token(SmolStr),
    /// Instance creation syntax after the `new` token: `Foo(1, 2)`.
    Creation(CreationSyntax),
    /// A nested sub-sequence.
    Group(Vec<Leaf>),
    /// `{ a, b }` in annotation values and array initializers.
    ArrayInit(Vec<Vec<Leaf>>),
    /// A nested annotation used as a value.
    Annotation(AnnotationSyntax),
    /// Anything the parser cannot express as leaves, kept as source text.
    Unknown(String),
}

impl Leaf {
    pub fn literal(text: &str) -> Self {
        Leaf::Literal(SmolStr::new(text))
    }

    pub fn name(text: &str) -> Self {
        Leaf::Name(SmolStr::new(text))
    }

    pub fn token(text: &str) -> Self {
        Leaf::Token(SmolStr::new(text))
    }
}

/// Instance creation: the created type and one leaf sequence per argument.
#[derive(Clone, Debug, PartialEq)]
pub struct CreationSyntax {
    pub ty: TypeSyntax,
    pub arguments: Vec<Vec<Leaf>>,
}

/// `@Name(key = value, ...)`; a single unnamed value is keyed `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationSyntax {
    pub name: SmolStr,
    pub values: Vec<ElementValueSyntax>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementValueSyntax {
    pub name: SmolStr,
    pub value: Vec<Leaf>,
}

impl AnnotationSyntax {
    /// A marker annotation without values.
    pub fn marker(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            values: Vec::new(),
        }
    }

    /// Add a `key = value` pair.
    pub fn with_value(mut self, name: &str, value: Vec<Leaf>) -> Self {
        self.values.push(ElementValueSyntax {
            name: SmolStr::new(name),
            value,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_splits_segments() {
        let TypeSyntax::Named(segments) = TypeSyntax::named("java.util.List") else {
            panic!("expected named type");
        };
        let names: Vec<_> = segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["java", "util", "List"]);
    }

    #[test]
    fn test_array_flattens_dimensions() {
        let ty = TypeSyntax::array(TypeSyntax::array(TypeSyntax::named("int"), 1), 2);
        assert_eq!(
            ty,
            TypeSyntax::Array {
                component: Box::new(TypeSyntax::named("int")),
                dimension: 3,
            }
        );
    }
}
