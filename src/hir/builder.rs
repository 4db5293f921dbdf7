//! Model builder: turns a parser event stream into a [`CompilationUnit`].
//!
//! The builder is a stack machine. Modifiers and annotations accumulate in
//! pending buffers until the next construct that can own them; type
//! declarations push and pop an enclosing-type stack; methods and
//! constructors open a member slot that receives parameters.
//!
//! Type references are lowered against the container they are written in.
//! Supertypes (`extends`/`implements`) use the container *enclosing* the
//! declared type, since a type is not in scope for its own supertype list.
//! Type parameter bounds use the declared type itself.

use smol_str::SmolStr;

use super::error::BuildError;
use super::expr::{lower_annotation, simplify};
use super::model::{
    Annotation, CompilationUnit, Constructor, Container, DeclBody, EnumConstant, Field, Import,
    Method, Modifier, Modifiers, Parameter, TypeDecl, TypeParameter,
};
use super::types::{ObjectType, TypeRef, lower_type, with_dimension};
use crate::base::LocalDefId;
use crate::syntax::{AnnotationSyntax, DeclKind, Event, TypeSyntax};

/// Options for [`ModelBuilder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Fail instead of logging when modifiers or annotations are left
    /// unattached at the end of the unit.
    pub strict: bool,
}

impl BuilderOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// The member currently receiving parameters.
#[derive(Clone, Copy, Debug)]
enum MemberSlot {
    Method(usize),
    Constructor(usize),
}

/// Where type parameter bounds go.
#[derive(Clone, Copy, Debug)]
enum TypeParamSlot {
    /// Index into the current type's parameter list.
    Type(usize),
    /// A method-level type parameter; its bounds are not modeled.
    Ignored,
}

/// Builds one compilation unit from construction events.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    options: BuilderOptions,
    unit: CompilationUnit,
    pending_modifiers: Vec<Modifier>,
    pending_annotations: Vec<AnnotationSyntax>,
    /// Enclosing type declarations, innermost last.
    types: Vec<LocalDefId>,
    member: Option<MemberSlot>,
    type_param: Option<TypeParamSlot>,
}

impl ModelBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Process one event.
    pub fn feed(&mut self, event: Event) -> Result<(), BuildError> {
        match event {
            Event::Package(name) => {
                if !self.types.is_empty() {
                    return Err(BuildError::unexpected("package declaration", "inside a type"));
                }
                self.unit.package = Some(name);
            }
            Event::Import {
                name,
                wildcard,
                is_static,
            } => {
                if is_static {
                    tracing::trace!(import = %name, "static import ignored");
                } else if wildcard {
                    self.unit.imports.push(Import::wildcard(name));
                } else {
                    self.unit.imports.push(Import::single(name));
                }
            }
            Event::Modifier(token) => {
                let modifier = token.parse::<Modifier>()?;
                self.pending_modifiers.push(modifier);
            }
            Event::Annotation(syntax) => self.pending_annotations.push(syntax),
            Event::EnterType { kind, name } => self.enter_type(kind, name)?,
            Event::ExitType => self.exit_type()?,
            Event::TypeParameter { name } => self.type_parameter(name)?,
            Event::TypeParameterBound(ty) => self.type_parameter_bound(&ty)?,
            Event::Superclass(ty) => {
                let current = self.current_type("superclass")?;
                let bound = self.supertype(current, &ty, "superclass")?;
                match &mut self.decl_mut(current).body {
                    DeclBody::Class { superclass, .. } => *superclass = Some(bound),
                    _ => return Err(BuildError::unexpected("superclass", "outside a class")),
                }
            }
            Event::Interface(ty) => {
                let current = self.current_type("implemented interface")?;
                let interface = self.supertype(current, &ty, "implemented interface")?;
                self.decl_mut(current).interfaces.push(interface);
            }
            Event::Field { ty, declarators } => {
                let current = self.current_type("field declaration")?;
                self.no_member("field declaration")?;
                let container = Container::Type(current);
                let modifiers = self.take_modifiers();
                let annotations = self.take_annotations(container)?;
                let base = lower_type(&ty, container);

                let mut fields = Vec::with_capacity(declarators.len());
                for declarator in declarators {
                    let initializer = declarator
                        .initializer
                        .as_deref()
                        .map(|leaves| simplify(leaves, container))
                        .transpose()?;
                    fields.push(Field {
                        name: declarator.name,
                        modifiers: modifiers.clone(),
                        annotations: annotations.clone(),
                        ty: with_dimension(base.clone(), declarator.dimension),
                        initializer,
                    });
                }

                let decl = self.decl_mut(current);
                let owner = decl.name.clone();
                let kind = decl.kind();
                match decl.fields_mut() {
                    Some(existing) => existing.extend(fields),
                    None => {
                        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
                        tracing::warn!(
                            %owner,
                            %kind,
                            fields = ?names,
                            "fields of this declaration kind are not modeled; dropped"
                        );
                    }
                }
            }
            Event::EnumConstant { name } => {
                let current = self.current_type("enum constant")?;
                let container = Container::Type(current);
                // enum constants take no modifiers
                self.pending_modifiers.clear();
                let annotations = self.take_annotations(container)?;
                match &mut self.decl_mut(current).body {
                    DeclBody::Enum { constants, .. } => {
                        constants.push(EnumConstant { name, annotations });
                    }
                    _ => return Err(BuildError::unexpected("enum constant", "outside an enum")),
                }
            }
            Event::RecordComponent { name, ty } => {
                let current = self.current_type("record component")?;
                let container = Container::Type(current);
                self.pending_modifiers.clear();
                let annotations = self.take_annotations(container)?;
                let field = Field {
                    name,
                    modifiers: Modifiers::from(vec![Modifier::Private, Modifier::Final]),
                    annotations,
                    ty: lower_type(&ty, container),
                    initializer: None,
                };
                match &mut self.decl_mut(current).body {
                    DeclBody::Record { fields, .. } => fields.push(field),
                    _ => return Err(BuildError::unexpected("record component", "outside a record")),
                }
            }
            Event::EnterMethod { name, return_type } => {
                let current = self.current_type("method declaration")?;
                self.no_member("method declaration")?;
                let container = Container::Type(current);
                let method = Method {
                    name,
                    modifiers: self.take_modifiers(),
                    annotations: self.take_annotations(container)?,
                    return_type: lower_type(&return_type, container),
                    parameters: Vec::new(),
                };
                let methods = &mut self.decl_mut(current).methods;
                methods.push(method);
                let index = methods.len() - 1;
                self.member = Some(MemberSlot::Method(index));
                self.type_param = None;
            }
            Event::EnterConstructor => {
                let current = self.current_type("constructor declaration")?;
                self.no_member("constructor declaration")?;
                let container = Container::Type(current);
                let constructor = Constructor {
                    modifiers: self.take_modifiers(),
                    annotations: self.take_annotations(container)?,
                    parameters: Vec::new(),
                };
                let Some(constructors) = self.decl_mut(current).constructors_mut() else {
                    return Err(BuildError::unexpected(
                        "constructor declaration",
                        "in an interface or annotation type",
                    ));
                };
                constructors.push(constructor);
                let index = constructors.len() - 1;
                self.member = Some(MemberSlot::Constructor(index));
                self.type_param = None;
            }
            Event::Parameter { name, ty, varargs } => {
                let current = self.current_type("formal parameter")?;
                let Some(slot) = self.member else {
                    return Err(BuildError::unexpected("formal parameter", "outside a method or constructor"));
                };
                let container = Container::Type(current);
                let ty = lower_type(&ty, container);
                let parameter = Parameter {
                    name,
                    modifiers: self.take_modifiers(),
                    annotations: self.take_annotations(container)?,
                    ty: if varargs { with_dimension(ty, 1) } else { ty },
                    varargs,
                };
                let decl = self.decl_mut(current);
                let parameters = match slot {
                    MemberSlot::Method(i) => decl.methods.get_mut(i).map(|m| &mut m.parameters),
                    MemberSlot::Constructor(i) => decl
                        .constructors_mut()
                        .and_then(|c| c.get_mut(i))
                        .map(|c| &mut c.parameters),
                };
                match parameters {
                    Some(parameters) => parameters.push(parameter),
                    None => return Err(BuildError::unexpected("formal parameter", "outside a method or constructor")),
                }
            }
            Event::ExitMember => {
                if self.member.take().is_none() {
                    return Err(BuildError::unexpected("end of member declaration", "outside a member"));
                }
                self.type_param = None;
            }
        }
        Ok(())
    }

    /// Finish the unit. Fails if a type declaration is still open, or, in
    /// strict mode, if modifiers or annotations were never attached.
    pub fn finish(mut self) -> Result<CompilationUnit, BuildError> {
        if let Some(&open) = self.types.last() {
            return Err(BuildError::UnclosedType {
                name: self.unit.decls[open.index() as usize].name.clone(),
            });
        }

        if !self.pending_modifiers.is_empty() {
            let count = self.pending_modifiers.len();
            if self.options.strict {
                return Err(BuildError::DanglingModifiers { count });
            }
            tracing::error!(count, "modifiers left unattached at end of compilation unit");
            debug_assert!(false, "{count} modifier(s) left unattached");
            self.pending_modifiers.clear();
        }

        if !self.pending_annotations.is_empty() {
            let names: Vec<SmolStr> = self.pending_annotations.iter().map(|a| a.name.clone()).collect();
            if self.options.strict {
                return Err(BuildError::DanglingAnnotations { names });
            }
            tracing::error!(?names, "annotations left unattached at end of compilation unit");
            debug_assert!(false, "annotation(s) left unattached: {names:?}");
            self.pending_annotations.clear();
        }

        tracing::debug!(
            package = ?self.unit.package,
            types = self.unit.decls.len(),
            imports = self.unit.imports.len(),
            "compilation unit built"
        );
        Ok(self.unit)
    }

    // ------------------------------------------------------------------------
    // Type declarations
    // ------------------------------------------------------------------------

    fn enter_type(&mut self, kind: DeclKind, name: SmolStr) -> Result<(), BuildError> {
        self.no_member("type declaration")?;
        let id = LocalDefId::new(self.unit.decls.len() as u32);
        let container = match self.types.last() {
            Some(&parent) => Container::Type(parent),
            None => Container::Unit,
        };

        let mut decl = TypeDecl::new(kind, name, container);
        decl.modifiers = self.take_modifiers();
        // annotations on a type resolve in the type's own scope
        decl.annotations = self.take_annotations(Container::Type(id))?;
        self.unit.decls.push(decl);

        match container {
            Container::Type(parent) => self.decl_mut(parent).nested.push(id),
            Container::Unit => self.unit.types.push(id),
        }
        self.types.push(id);
        self.type_param = None;
        tracing::trace!(%kind, id = ?id, "entered type declaration");
        Ok(())
    }

    fn exit_type(&mut self) -> Result<(), BuildError> {
        self.no_member("end of type declaration")?;
        if self.types.pop().is_none() {
            return Err(BuildError::unexpected("end of type declaration", "outside a type"));
        }
        self.type_param = None;
        Ok(())
    }

    fn type_parameter(&mut self, name: SmolStr) -> Result<(), BuildError> {
        let current = self.current_type("type parameter")?;
        let container = Container::Type(current);
        let annotations = self.take_annotations(container)?;
        if self.member.is_some() {
            tracing::trace!(%name, "method type parameter not modeled");
            self.type_param = Some(TypeParamSlot::Ignored);
            return Ok(());
        }
        let params = &mut self.decl_mut(current).type_params;
        params.push(TypeParameter {
            name,
            annotations,
            bounds: Vec::new(),
        });
        let index = params.len() - 1;
        self.type_param = Some(TypeParamSlot::Type(index));
        Ok(())
    }

    fn type_parameter_bound(&mut self, ty: &TypeSyntax) -> Result<(), BuildError> {
        let current = self.current_type("type parameter bound")?;
        let index = match self.type_param {
            Some(TypeParamSlot::Type(index)) => index,
            Some(TypeParamSlot::Ignored) => return Ok(()),
            None => return Err(BuildError::unexpected("type parameter bound", "without a type parameter")),
        };
        let bound = object_type(lower_type(ty, Container::Type(current)), "type parameter bound")?;
        match self.decl_mut(current).type_params.get_mut(index) {
            Some(param) => param.bounds.push(bound),
            None => return Err(BuildError::unexpected("type parameter bound", "without a type parameter")),
        }
        Ok(())
    }

    /// Lower a supertype against the container enclosing `current`.
    fn supertype(
        &self,
        current: LocalDefId,
        ty: &TypeSyntax,
        event: &'static str,
    ) -> Result<ObjectType, BuildError> {
        let container = self.unit.decls[current.index() as usize].container;
        object_type(lower_type(ty, container), event)
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn current_type(&self, event: &'static str) -> Result<LocalDefId, BuildError> {
        self.types
            .last()
            .copied()
            .ok_or_else(|| BuildError::unexpected(event, "outside a type"))
    }

    fn no_member(&self, event: &'static str) -> Result<(), BuildError> {
        match self.member {
            Some(_) => Err(BuildError::unexpected(event, "inside a member")),
            None => Ok(()),
        }
    }

    fn decl_mut(&mut self, id: LocalDefId) -> &mut TypeDecl {
        &mut self.unit.decls[id.index() as usize]
    }

    fn take_modifiers(&mut self) -> Modifiers {
        Modifiers::from(std::mem::take(&mut self.pending_modifiers))
    }

    fn take_annotations(&mut self, container: Container) -> Result<Vec<Annotation>, BuildError> {
        std::mem::take(&mut self.pending_annotations)
            .iter()
            .map(|syntax| lower_annotation(syntax, container).map_err(BuildError::from))
            .collect()
    }
}

fn object_type(ty: TypeRef, event: &'static str) -> Result<ObjectType, BuildError> {
    match ty {
        TypeRef::Object(o) => Ok(o),
        TypeRef::Primitive(_) | TypeRef::Array(_) => {
            Err(BuildError::unexpected(event, "that is not a class or interface type"))
        }
    }
}

/// Build a compilation unit from a complete event stream.
pub fn build_unit(
    events: impl IntoIterator<Item = Event>,
    options: BuilderOptions,
) -> Result<CompilationUnit, BuildError> {
    let mut builder = ModelBuilder::new(options);
    for event in events {
        builder.feed(event)?;
    }
    builder.finish()
}
