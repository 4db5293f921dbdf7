//! Construction events, one per syntactic construct, in source order.

use std::fmt;

use smol_str::SmolStr;

use super::shape::{AnnotationSyntax, Leaf, TypeSyntax};

/// The kind of a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "dump", derive(serde::Serialize))]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl DeclKind {
    pub fn display(&self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Interface => "interface",
            DeclKind::Enum => "enum",
            DeclKind::Record => "record",
            DeclKind::Annotation => "annotation",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// One variable declarator of a field declaration: `a = 1` in `int a = 1, b;`.
#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
    pub name: SmolStr,
    /// Brackets written after the name, as in `int a[]`.
    pub dimension: u32,
    pub initializer: Option<Vec<Leaf>>,
}

impl Declarator {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            dimension: 0,
            initializer: None,
        }
    }

    pub fn with_initializer(mut self, leaves: Vec<Leaf>) -> Self {
        self.initializer = Some(leaves);
        self
    }
}

/// A construction callback from the external parser.
///
/// Modifiers and annotations arrive before the construct they modify.
/// Type and member declarations are bracketed by enter/exit events, so
/// nesting follows the event order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Package(SmolStr),
    /// Static imports are accepted and ignored.
    Import {
        name: SmolStr,
        wildcard: bool,
        is_static: bool,
    },
    Modifier(SmolStr),
    Annotation(AnnotationSyntax),
    EnterType {
        kind: DeclKind,
        name: SmolStr,
    },
    ExitType,
    TypeParameter {
        name: SmolStr,
    },
    /// A bound of the most recent type parameter.
    TypeParameterBound(TypeSyntax),
    Superclass(TypeSyntax),
    Interface(TypeSyntax),
    Field {
        ty: TypeSyntax,
        declarators: Vec<Declarator>,
    },
    EnumConstant {
        name: SmolStr,
    },
    RecordComponent {
        name: SmolStr,
        ty: TypeSyntax,
    },
    EnterMethod {
        name: SmolStr,
        return_type: TypeSyntax,
    },
    EnterConstructor,
    Parameter {
        name: SmolStr,
        ty: TypeSyntax,
        varargs: bool,
    },
    ExitMember,
}

impl Event {
    pub fn package(name: &str) -> Self {
        Event::Package(SmolStr::new(name))
    }

    pub fn import(name: &str) -> Self {
        Event::Import {
            name: SmolStr::new(name),
            wildcard: false,
            is_static: false,
        }
    }

    /// `import name.*;`
    pub fn wildcard_import(name: &str) -> Self {
        Event::Import {
            name: SmolStr::new(name),
            wildcard: true,
            is_static: false,
        }
    }

    pub fn modifier(token: &str) -> Self {
        Event::Modifier(SmolStr::new(token))
    }

    pub fn enter(kind: DeclKind, name: &str) -> Self {
        Event::EnterType {
            kind,
            name: SmolStr::new(name),
        }
    }

    pub fn type_parameter(name: &str) -> Self {
        Event::TypeParameter {
            name: SmolStr::new(name),
        }
    }

    pub fn field(ty: TypeSyntax, name: &str) -> Self {
        Event::Field {
            ty,
            declarators: vec![Declarator::new(name)],
        }
    }

    pub fn method(name: &str, return_type: TypeSyntax) -> Self {
        Event::EnterMethod {
            name: SmolStr::new(name),
            return_type,
        }
    }

    pub fn parameter(name: &str, ty: TypeSyntax) -> Self {
        Event::Parameter {
            name: SmolStr::new(name),
            ty,
            varargs: false,
        }
    }

    pub fn enum_constant(name: &str) -> Self {
        Event::EnumConstant {
            name: SmolStr::new(name),
        }
    }

    pub fn record_component(name: &str, ty: TypeSyntax) -> Self {
        Event::RecordComponent {
            name: SmolStr::new(name),
            ty,
        }
    }
}
