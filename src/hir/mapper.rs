//! Rendering type references into strings through per-shape hooks.
//!
//! A [`TypeMapping`] supplies hooks for the shapes it cares about; arrays
//! and wildcards have default renderings (`T[][]`, `? extends T`). A shape
//! without a hook is a [`MapError::NoMapping`].

use super::error::MapError;
use super::model::Project;
use super::types::{ArrayType, ObjectType, PrimitiveType, TypeArgument, TypeRef, Wildcard};
use crate::base::UnitId;

/// Per-shape rendering hooks. `Ok(None)` means "no mapping".
pub trait TypeMapping: Sized {
    fn primitive(&self, _ty: PrimitiveType, _mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
        Ok(None)
    }

    fn object(&self, _ty: &ObjectType, _mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
        Ok(None)
    }

    fn array(&self, ty: &ArrayType, mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
        let component = mapper.map(&ty.component)?;
        Ok(Some(format!("{component}{}", "[]".repeat(ty.dimension as usize))))
    }

    fn wildcard(&self, ty: &Wildcard, mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
        Ok(Some(match &ty.bound {
            Some(bound) => format!("? {} {}", bound.kind.keyword(), mapper.map(&bound.ty)?),
            None => "?".to_string(),
        }))
    }
}

/// Applies a [`TypeMapping`] recursively.
#[derive(Clone, Debug)]
pub struct TypeMapper<M> {
    mapping: M,
}

impl<M: TypeMapping> TypeMapper<M> {
    pub fn new(mapping: M) -> Self {
        Self { mapping }
    }

    pub fn map(&self, ty: &TypeRef) -> Result<String, MapError> {
        let (mapped, shape) = match ty {
            TypeRef::Primitive(p) => (self.mapping.primitive(*p, self)?, "primitive"),
            TypeRef::Object(o) => (self.mapping.object(o, self)?, "object"),
            TypeRef::Array(a) => (self.mapping.array(a, self)?, "array"),
        };
        mapped.ok_or_else(|| MapError::NoMapping {
            name: ty.name(),
            shape,
        })
    }

    pub fn map_argument(&self, arg: &TypeArgument) -> Result<String, MapError> {
        match arg {
            TypeArgument::Type(ty) => self.map(ty),
            TypeArgument::Wildcard(w) => self.mapping.wildcard(w, self)?.ok_or_else(|| MapError::NoMapping {
                name: "?".to_string(),
                shape: "wildcard",
            }),
        }
    }

    /// Render `<A, B>` for a non-empty argument list, else an empty string.
    pub fn map_arguments(&self, args: &[TypeArgument]) -> Result<String, MapError> {
        if args.is_empty() {
            return Ok(String::new());
        }
        let mapped = args
            .iter()
            .map(|arg| self.map_argument(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("<{}>", mapped.join(", ")))
    }
}

/// Renders types with every object type replaced by its canonical name,
/// e.g. `java.util.List<java.lang.String>`.
#[derive(Clone, Copy, Debug)]
pub struct QualifiedMapping<'p> {
    project: &'p Project,
    unit: UnitId,
}

impl<'p> QualifiedMapping<'p> {
    /// Mapping for types written in `unit`.
    pub fn new(project: &'p Project, unit: UnitId) -> Self {
        Self { project, unit }
    }
}

impl TypeMapping for QualifiedMapping<'_> {
    fn primitive(&self, ty: PrimitiveType, _mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
        Ok(Some(ty.name().to_string()))
    }

    fn object(&self, ty: &ObjectType, mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
        let name = self.project.canonical_name(self.unit, ty)?;
        Ok(Some(format!("{name}{}", mapper.map_arguments(&ty.arguments)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::builder::{BuilderOptions, build_unit};
    use crate::syntax::{BoundKind, DeclKind, Event, TypeArgSyntax, TypeSyntax};

    struct PrimitivesOnly;

    impl TypeMapping for PrimitivesOnly {
        fn primitive(&self, ty: PrimitiveType, _mapper: &TypeMapper<Self>) -> Result<Option<String>, MapError> {
            Ok(Some(ty.name().to_uppercase()))
        }
    }

    fn field_project(ty: TypeSyntax) -> Project {
        let unit = build_unit(
            vec![
                Event::package("p"),
                Event::import("java.util.List"),
                Event::enter(DeclKind::Class, "Holder"),
                Event::field(ty, "value"),
                Event::ExitType,
            ],
            BuilderOptions::strict(),
        )
        .expect("unit");
        Project::new(vec![unit]).expect("project")
    }

    #[test]
    fn test_default_array_rendering() {
        let mapper = TypeMapper::new(PrimitivesOnly);
        let ty = TypeRef::Array(ArrayType {
            component: Box::new(TypeRef::Primitive(PrimitiveType::Int)),
            dimension: 2,
        });
        assert_eq!(mapper.map(&ty).unwrap(), "INT[][]");
    }

    #[test]
    fn test_missing_hook() {
        let project = field_project(TypeSyntax::named("List"));
        let id = project.find_type("p.Holder").unwrap();
        let ty = &project.decl(id).fields()[0].ty;
        let err = TypeMapper::new(PrimitivesOnly).map(ty).unwrap_err();
        assert_eq!(
            err,
            MapError::NoMapping {
                name: "List".to_string(),
                shape: "object"
            }
        );
    }

    #[test]
    fn test_qualified_mapping() {
        let project = field_project(
            TypeSyntax::named("List").with_arguments(vec![
                TypeArgSyntax::bounded(BoundKind::Extends, TypeSyntax::named("Holder")),
            ]),
        );
        let id = project.find_type("p.Holder").unwrap();
        let ty = &project.decl(id).fields()[0].ty;
        let mapper = TypeMapper::new(QualifiedMapping::new(&project, id.unit));
        assert_eq!(mapper.map(ty).unwrap(), "java.util.List<? extends p.Holder>");
    }
}
