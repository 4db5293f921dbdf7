//! Acyclic structural dump of the model as JSON.
//!
//! Container back-references and memoized resolutions are left out, so a
//! dump depends only on the parsed input.

use serde::Serialize;

use super::model::{CompilationUnit, Import, Project, TypeDecl};

#[derive(Serialize)]
struct DeclDump<'a> {
    #[serde(flatten)]
    decl: &'a TypeDecl,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    types: Vec<DeclDump<'a>>,
}

#[derive(Serialize)]
struct UnitDump<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a str>,
    imports: &'a [Import],
    types: Vec<DeclDump<'a>>,
}

impl<'a> UnitDump<'a> {
    fn new(unit: &'a CompilationUnit) -> Self {
        fn tree<'a>(unit: &'a CompilationUnit, decl: &'a TypeDecl) -> DeclDump<'a> {
            DeclDump {
                decl,
                types: decl.nested().iter().map(|&id| tree(unit, unit.decl(id))).collect(),
            }
        }

        Self {
            package: unit.package(),
            imports: unit.imports(),
            types: unit.top_level().iter().map(|&id| tree(unit, unit.decl(id))).collect(),
        }
    }
}

/// Dump one compilation unit.
pub fn unit_to_value(unit: &CompilationUnit) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(UnitDump::new(unit))
}

/// Dump one compilation unit as pretty-printed JSON.
pub fn unit_to_json(unit: &CompilationUnit) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&UnitDump::new(unit))
}

/// Dump every unit of a project as a JSON array.
pub fn project_to_json(project: &Project) -> serde_json::Result<String> {
    let units: Vec<_> = project.units().iter().map(UnitDump::new).collect();
    serde_json::to_string_pretty(&units)
}
