use std::collections::BTreeMap;
use std::path::Path;

use bindforge_model::InterfaceModel;
use bindforge_template::TemplateSet;

use crate::build::{self, BuildAdapter};
use crate::emitters::{self, TargetEmitter};
use crate::error::CodegenError;
use crate::mapping::Target;

/// A generated binding tree for one target, keyed by relative path.
///
/// Everything is buffered in memory first; nothing touches disk until the
/// whole target succeeded, so a failing target leaves no partial tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedBindings {
    /// Files keyed by relative path (sorted for deterministic output)
    files: BTreeMap<String, String>,
}

impl GeneratedBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write all files to the given output directory.
    pub fn write_to_disk(&self, output_dir: &Path) -> Result<(), std::io::Error> {
        for (rel_path, content) in &self.files {
            let full_path = output_dir.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }
        Ok(())
    }
}

/// Generator for one target: a source emitter paired with a build-manifest
/// adapter, sharing a parsed template set.
pub struct BindingGenerator {
    target: Target,
    emitter: Box<dyn TargetEmitter>,
    adapter: Box<dyn BuildAdapter>,
    templates: TemplateSet,
}

impl std::fmt::Debug for BindingGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingGenerator")
            .field("target", &self.target)
            .finish()
    }
}

impl BindingGenerator {
    pub fn new(target: Target) -> Result<Self, CodegenError> {
        Ok(Self {
            target,
            emitter: emitters::create_emitter(target),
            adapter: build::create_adapter(target),
            templates: build::builtin_templates()?,
        })
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Generate the full binding tree for the model.
    ///
    /// Validation runs first; emitters assume a well-formed model.
    pub fn generate(&self, model: &InterfaceModel) -> Result<GeneratedBindings, CodegenError> {
        bindforge_valid::validate(model)?;
        self.generate_unchecked(model)
    }

    fn generate_unchecked(&self, model: &InterfaceModel) -> Result<GeneratedBindings, CodegenError> {
        let mut output = GeneratedBindings::new();
        for (path, content) in self.emitter.emit(model)? {
            output.add_file(path, content);
        }
        for (path, content) in self.adapter.emit(model, &self.templates)? {
            output.add_file(path, content);
        }
        Ok(output)
    }
}

/// Outcome of a multi-target run. Targets fail independently; one target's
/// unsupported mapping never blocks the others.
#[derive(Debug, Default)]
pub struct RunReport {
    pub succeeded: Vec<(Target, GeneratedBindings)>,
    pub failed: Vec<(Target, CodegenError)>,
}

impl RunReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Write every successful target under `out_dir/<target dir>`.
    pub fn write_to_disk(&self, out_dir: &Path) -> Result<(), std::io::Error> {
        for (target, bindings) in &self.succeeded {
            bindings.write_to_disk(&out_dir.join(target.dir_name()))?;
        }
        Ok(())
    }
}

/// Generate bindings for every requested target.
///
/// The model is validated once up front; a validation failure fails all
/// targets with the same error.
pub fn generate_all(model: &InterfaceModel, targets: &[Target]) -> RunReport {
    let mut report = RunReport::default();

    if let Err(err) = bindforge_valid::validate(model) {
        for target in targets {
            report.failed.push((*target, CodegenError::Validation(err.clone())));
        }
        return report;
    }

    for target in targets {
        let outcome = BindingGenerator::new(*target).and_then(|g| g.generate_unchecked(model));
        match outcome {
            Ok(bindings) => report.succeeded.push((*target, bindings)),
            Err(err) => report.failed.push((*target, err)),
        }
    }
    report
}
