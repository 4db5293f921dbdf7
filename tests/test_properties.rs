//! Accessor-convention properties derived through the public API.

use jsema::hir::{BuilderOptions, Project, Property, getter_name, properties, setter_name};
use jsema::project::load_project;
use jsema::syntax::{DeclKind, Event, TypeSyntax};
use rstest::rstest;

fn accessor(name: &str, ret: &str, params: &[(&str, &str)]) -> Vec<Event> {
    let mut events = vec![Event::modifier("public"), Event::method(name, TypeSyntax::named(ret))];
    events.extend(params.iter().map(|(param, ty)| Event::parameter(param, TypeSyntax::named(ty))));
    events.push(Event::ExitMember);
    events
}

fn project(kind: DeclKind, members: Vec<Event>) -> Project {
    let mut events = vec![Event::package("com.example"), Event::enter(kind, "Account")];
    events.extend(members);
    events.push(Event::ExitType);
    load_project(vec![events], BuilderOptions::strict()).expect("project")
}

fn summary(props: &[Property<'_>]) -> Vec<(String, String, bool, bool, bool)> {
    props
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                p.ty.name(),
                p.field.is_some(),
                p.getter.is_some(),
                p.setter.is_some(),
            )
        })
        .collect()
}

#[test]
fn test_field_getter_and_setter_merge() {
    let mut members = vec![Event::modifier("private"), Event::field(TypeSyntax::named("boolean"), "active")];
    members.extend(accessor("isActive", "boolean", &[]));
    members.extend(accessor("setActive", "void", &[("active", "boolean")]));
    let project = project(DeclKind::Class, members);
    let id = project.find_type("com.example.Account").unwrap();

    let props = properties(&project, id).unwrap();
    assert_eq!(summary(&props), [("active".to_string(), "boolean".to_string(), true, true, true)]);
}

#[test]
fn test_acronym_names_keep_their_case() {
    let mut members = accessor("getURL", "String", &[]);
    members.extend(accessor("getName", "String", &[]));
    members.extend(accessor("getX", "int", &[]));
    let project = project(DeclKind::Class, members);
    let id = project.find_type("com.example.Account").unwrap();

    let names: Vec<_> = properties(&project, id).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["URL", "name", "x"]);
}

#[test]
fn test_boxed_boolean_getter() {
    let mut members = accessor("isOpen", "Boolean", &[]);
    members.extend(accessor("isBroken", "String", &[]));
    let project = project(DeclKind::Class, members);
    let id = project.find_type("com.example.Account").unwrap();

    let names: Vec<_> = properties(&project, id).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["open"]);
}

#[test]
fn test_interface_methods_are_public_by_default() {
    let members = vec![
        Event::method("getBalance", TypeSyntax::named("long")),
        Event::ExitMember,
        Event::modifier("private"),
        Event::method("getSecret", TypeSyntax::named("long")),
        Event::ExitMember,
    ];
    let project = project(DeclKind::Interface, members);
    let id = project.find_type("com.example.Account").unwrap();

    let props = properties(&project, id).unwrap();
    assert_eq!(summary(&props), [("balance".to_string(), "long".to_string(), false, true, false)]);
}

#[test]
fn test_record_components_are_fields() {
    let project = project(
        DeclKind::Record,
        vec![
            Event::record_component("owner", TypeSyntax::named("String")),
            Event::record_component("limit", TypeSyntax::named("int")),
        ],
    );
    let id = project.find_type("com.example.Account").unwrap();

    let names: Vec<_> = properties(&project, id).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["owner", "limit"]);
}

#[rstest]
#[case("boolean", "active", "isActive", "setActive")]
#[case("Boolean", "active", "isActive", "setActive")]
#[case("int", "count", "getCount", "setCount")]
#[case("String", "url", "getUrl", "setUrl")]
fn test_conventional_accessor_names(
    #[case] ty: &str,
    #[case] field: &str,
    #[case] getter: &str,
    #[case] setter: &str,
) {
    let project = project(DeclKind::Class, vec![Event::field(TypeSyntax::named(ty), field)]);
    let id = project.find_type("com.example.Account").unwrap();
    let field = &project.decl(id).fields()[0];

    assert_eq!(getter_name(&project, id.unit, field), getter);
    assert_eq!(setter_name(field), setter);
}
