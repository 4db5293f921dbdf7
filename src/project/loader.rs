use rayon::prelude::*;

use crate::hir::{BuilderOptions, CompilationUnit, Project, ProjectError, build_unit};
use crate::syntax::Event;

/// Builds a [`Project`] from the event streams of many source files.
///
/// Builder passes are independent and run in parallel; indexing into the
/// project runs afterwards on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProjectLoader {
    options: BuilderOptions,
}

impl ProjectLoader {
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    /// Build every unit. On failure, reports the lowest failing index.
    pub fn build_units(&self, sources: Vec<Vec<Event>>) -> Result<Vec<CompilationUnit>, ProjectError> {
        let options = self.options;

        // Build units in parallel
        let results: Vec<_> = sources
            .into_par_iter()
            .enumerate()
            .map(|(index, events)| {
                build_unit(events, options).map_err(|source| ProjectError::Build { index, source })
            })
            .collect();

        results.into_iter().collect()
    }

    /// Build every unit, then index them into a project.
    pub fn load(&self, sources: Vec<Vec<Event>>) -> Result<Project, ProjectError> {
        let count = sources.len();
        let units = self.build_units(sources)?;
        tracing::debug!(units = count, "compilation units built");
        Project::new(units)
    }
}

/// Load a project with the given builder options.
pub fn load_project(sources: Vec<Vec<Event>>, options: BuilderOptions) -> Result<Project, ProjectError> {
    ProjectLoader::new(options).load(sources)
}
