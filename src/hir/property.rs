//! Accessor-convention properties derived from a declared type.
//!
//! A property groups a field and/or a getter and/or a setter that share a
//! logical name. Properties are computed on demand and borrow from the
//! model; nothing is stored.

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::error::PropertyError;
use super::model::{Field, Method, Project, TypeDecl};
use super::types::TypeRef;
use crate::base::name::{capitalize, decapitalize};
use crate::base::{DeclId, UnitId};
use crate::syntax::DeclKind;

/// A derived property of a declared type.
#[derive(Clone, Debug, PartialEq)]
pub struct Property<'a> {
    pub name: String,
    /// The getter's return type if there is a getter, else the field type,
    /// else the setter's parameter type.
    pub ty: &'a TypeRef,
    pub field: Option<&'a Field>,
    pub getter: Option<&'a Method>,
    pub setter: Option<&'a Method>,
}

impl<'a> Property<'a> {
    fn new(name: String, ty: &'a TypeRef) -> Self {
        Self {
            name,
            ty,
            field: None,
            getter: None,
            setter: None,
        }
    }
}

/// Derive the properties of `id`, in field order followed by accessor order.
///
/// Fails if two non-static fields share a name.
pub fn properties(project: &Project, id: DeclId) -> Result<Vec<Property<'_>>, PropertyError> {
    let decl = project.decl(id);
    let mut properties: IndexMap<String, Property<'_>> = IndexMap::new();

    if matches!(decl.kind(), DeclKind::Class | DeclKind::Record | DeclKind::Enum) {
        for field in decl.fields().iter().filter(|f| !f.modifiers.is_static()) {
            match properties.entry(field.name.to_string()) {
                Entry::Occupied(_) => return Err(PropertyError::DuplicateField(field.name.clone())),
                Entry::Vacant(slot) => {
                    let mut property = Property::new(field.name.to_string(), &field.ty);
                    property.field = Some(field);
                    slot.insert(property);
                }
            }
        }
    }

    for method in decl.methods.iter().filter(|m| is_getter(project, id.unit, decl, m)) {
        let name = property_name(project, id.unit, method)?;
        let property = properties
            .entry(name.clone())
            .or_insert_with(|| Property::new(name, &method.return_type));
        property.ty = &method.return_type;
        property.getter = Some(method);
    }

    for method in decl.methods.iter().filter(|m| is_setter(decl, m)) {
        let name = property_name(project, id.unit, method)?;
        let Some(parameter) = method.parameters.first() else {
            continue;
        };
        let property = properties
            .entry(name.clone())
            .or_insert_with(|| Property::new(name, &parameter.ty));
        property.setter = Some(method);
    }

    tracing::trace!(decl = %decl.name, count = properties.len(), "properties derived");
    Ok(properties.into_values().collect())
}

/// Public, non-static, no parameters, non-void return, named `getX` (or
/// `isX` when returning a boolean).
pub fn is_getter(project: &Project, unit: UnitId, owner: &TypeDecl, method: &Method) -> bool {
    if !method.is_public(owner)
        || method.modifiers.is_static()
        || !method.parameters.is_empty()
        || method.return_type.is_void()
    {
        return false;
    }
    has_prefix(&method.name, "get")
        || (has_prefix(&method.name, "is") && project.is_boolean(unit, &method.return_type))
}

/// Public, non-static, void return, one non-void parameter, named `setX`.
pub fn is_setter(owner: &TypeDecl, method: &Method) -> bool {
    method.is_public(owner)
        && !method.modifiers.is_static()
        && method.return_type.is_void()
        && matches!(method.parameters.as_slice(), [p] if !p.ty.is_void())
        && has_prefix(&method.name, "set")
}

/// The property name of an accessor: `getURL` is `URL`, `isActive` is `active`.
pub fn property_name(project: &Project, unit: UnitId, method: &Method) -> Result<String, PropertyError> {
    let name = method.name.as_str();
    let rest = if has_prefix(name, "get") || has_prefix(name, "set") {
        &name[3..]
    } else if has_prefix(name, "is") && project.is_boolean(unit, &method.return_type) {
        &name[2..]
    } else {
        return Err(PropertyError::NotAnAccessor(method.name.clone()));
    };
    Ok(decapitalize(rest))
}

/// Conventional getter name of a field.
pub fn getter_name(project: &Project, unit: UnitId, field: &Field) -> String {
    if project.is_boolean(unit, &field.ty) {
        format!("is{}", capitalize(&field.name))
    } else {
        format!("get{}", capitalize(&field.name))
    }
}

/// Conventional setter name of a field.
pub fn setter_name(field: &Field) -> String {
    format!("set{}", capitalize(&field.name))
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    name.len() > prefix.len() && name.starts_with(prefix)
}
