//! Face model assembly
//!
//! Imports the neutral mesh, every manifest expression and every contiguous
//! `identity###` variant found in a directory, then asks the host to bake the
//! variants into shape keys on the neutral mesh and delete the leftovers.
//!
//! # Failure policy
//!
//! | Situation                         | Expressions | Identities  |
//! |-----------------------------------|-------------|-------------|
//! | file missing                      | skip        | stop scan   |
//! | importer produced no object       | skip        | skip        |
//! | importer (or rename) errored      | skip        | stop scan   |
//!
//! Everything before the scans (directory, required files, manifest, base
//! import) is fatal, as is ending up with no variants at all.

use std::path::Path;

use crate::error::{ErrorKind, LoadError};
use crate::host::{MeshHost, ObjectId};
use crate::layout::{Layout, VariantKind, VariantSpec};
use crate::manifest::{Manifest, read_manifest};

/// Where a loader is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    ValidatingInputs,
    ImportingBase,
    ImportingExpressions,
    ImportingIdentities,
    Assembling,
    Done,
    Failed(ErrorKind),
}

/// A variant the host imported and renamed
///
/// `name` is the name the host assigned, which is also the shape key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedVariant {
    pub id: ObjectId,
    pub name: String,
    pub kind: VariantKind,
}

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// The neutral mesh, now carrying one shape key per variant
    pub face_model: ObjectId,
    /// Expression shape keys, in manifest order
    pub expressions: Vec<String>,
    /// Identity shape keys, in index order
    pub identities: Vec<String>,
}

impl LoadReport {
    pub fn expression_count(&self) -> usize {
        self.expressions.len()
    }

    pub fn identity_count(&self) -> usize {
        self.identities.len()
    }

    /// `(expressions, identities)`
    pub fn counts(&self) -> (usize, usize) {
        (self.expression_count(), self.identity_count())
    }
}

/// Single-use face model loader
///
/// `load` consumes the loader; a new one is needed for every directory.
#[derive(Debug)]
pub struct FaceModelLoader {
    layout: Layout,
    stage: PipelineStage,
}

impl FaceModelLoader {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            stage: PipelineStage::Idle,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Load the face model in `dir` into `host`.
    ///
    /// Objects imported before a failure stay in the host.
    pub fn load<H: MeshHost>(mut self, dir: &Path, host: &mut H) -> Result<LoadReport, LoadError> {
        tracing::info!("Starting model load from directory: {}", dir.display());

        match self.run(dir, host) {
            Ok(report) => {
                self.advance(PipelineStage::Done);
                Ok(report)
            }
            Err(e) => {
                tracing::error!("Face model load failed: {}", e);
                self.advance(PipelineStage::Failed(e.kind()));
                Err(e)
            }
        }
    }

    fn run<H: MeshHost>(&mut self, dir: &Path, host: &mut H) -> Result<LoadReport, LoadError> {
        self.advance(PipelineStage::ValidatingInputs);
        let manifest = self.validate_inputs(dir)?;

        self.advance(PipelineStage::ImportingBase);
        let face_model = self.import_base(dir, host)?;

        self.advance(PipelineStage::ImportingExpressions);
        let expressions = self.import_expressions(dir, &manifest, host);

        self.advance(PipelineStage::ImportingIdentities);
        let identities = self.import_identities(dir, host);

        if expressions.is_empty() && identities.is_empty() {
            return Err(LoadError::NoMorphTargets);
        }

        self.advance(PipelineStage::Assembling);
        self.assemble(face_model, &expressions, &identities, host)?;

        Ok(LoadReport {
            face_model,
            expressions: expressions.into_iter().map(|v| v.name).collect(),
            identities: identities.into_iter().map(|v| v.name).collect(),
        })
    }

    fn advance(&mut self, next: PipelineStage) {
        tracing::debug!("Loader stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    /// Check the directory and required files, then read the manifest
    fn validate_inputs(&self, dir: &Path) -> Result<Manifest, LoadError> {
        if !dir.is_dir() {
            tracing::error!("Invalid directory path: {}", dir.display());
            return Err(LoadError::InvalidDirectory(dir.to_path_buf()));
        }

        let base_path = self.layout.base_mesh_path(dir);
        let manifest_path = self.layout.manifest_path(dir);
        tracing::debug!("Neutral mesh path: {}", base_path.display());
        tracing::debug!("Config file path: {}", manifest_path.display());

        if !base_path.exists() {
            tracing::error!("Cannot find neutral mesh: {}", base_path.display());
            return Err(LoadError::MissingBaseMesh(base_path));
        }
        if !manifest_path.exists() {
            tracing::error!("Cannot find config file: {}", manifest_path.display());
            return Err(LoadError::MissingManifest(manifest_path));
        }

        Ok(read_manifest(&manifest_path)?)
    }

    fn import_base<H: MeshHost>(&self, dir: &Path, host: &mut H) -> Result<ObjectId, LoadError> {
        let spec = VariantSpec::base(&self.layout);
        let path = self.layout.spec_path(dir, &spec);
        tracing::info!("Attempting to import neutral mesh: {}", path.display());

        let imported = import_variant(host, &spec, &path)
            .map_err(|e| LoadError::Import(format!("{:#}", e)))?
            .ok_or_else(|| LoadError::Import("importer produced no object".to_string()))?;

        tracing::info!("Successfully imported neutral mesh as {}", imported.id);
        Ok(imported.id)
    }

    fn import_expressions<H: MeshHost>(
        &self,
        dir: &Path,
        manifest: &Manifest,
        host: &mut H,
    ) -> Vec<ImportedVariant> {
        let mut collected = Vec::with_capacity(manifest.expressions.len());

        for name in &manifest.expressions {
            let spec = VariantSpec::expression(name.as_str());
            let path = self.layout.spec_path(dir, &spec);
            if !path.exists() {
                tracing::warn!("Expression morph target not found: {}", path.display());
                continue;
            }

            tracing::info!("Reading expression morph target: {}", name);
            match import_variant(host, &spec, &path) {
                Ok(Some(variant)) => collected.push(variant),
                Ok(None) => tracing::warn!("Failed to import expression {}", name),
                Err(e) => tracing::error!("Error importing expression {}: {:#}", name, e),
            }
        }

        collected
    }

    fn import_identities<H: MeshHost>(&self, dir: &Path, host: &mut H) -> Vec<ImportedVariant> {
        let mut collected = Vec::new();

        for index in 0usize.. {
            let spec = VariantSpec::identity(&self.layout, index);
            let path = self.layout.spec_path(dir, &spec);
            if !path.exists() {
                if index == 0 {
                    tracing::info!("No identity morph targets found");
                } else {
                    tracing::info!(
                        "No more identity morph targets found after {}",
                        self.layout.identity_name(index - 1)
                    );
                }
                break;
            }

            tracing::info!("Reading identity morph target: {}", spec.name);
            match import_variant(host, &spec, &path) {
                Ok(Some(variant)) => collected.push(variant),
                Ok(None) => tracing::warn!("Failed to import identity {}", spec.name),
                Err(e) => {
                    tracing::error!("Error loading identity morph target {}: {:#}", spec.name, e);
                    break;
                }
            }
        }

        collected
    }

    /// Join every collected variant into the face model, then drop the variant objects
    fn assemble<H: MeshHost>(
        &self,
        face_model: ObjectId,
        expressions: &[ImportedVariant],
        identities: &[ImportedVariant],
        host: &mut H,
    ) -> Result<(), LoadError> {
        let variants: Vec<ObjectId> = expressions
            .iter()
            .chain(identities)
            .map(|v| v.id)
            .collect();

        tracing::info!(
            "Creating {} blendshapes ({} expressions, {} identities)",
            variants.len(),
            expressions.len(),
            identities.len()
        );

        host.set_selection(&variants);
        host.set_active(face_model);

        host.join_as_shapes(face_model, &variants)
            .map_err(|e| LoadError::Assembly(format!("{:#}", e)))?;
        host.delete_objects(&variants)
            .map_err(|e| LoadError::Assembly(format!("{:#}", e)))?;

        Ok(())
    }
}

/// Load the face model in `dir` with the default layout
pub fn load_face_model<H: MeshHost>(dir: &Path, host: &mut H) -> Result<LoadReport, LoadError> {
    FaceModelLoader::new(Layout::default()).load(dir, host)
}

/// Import one variant and give it its name
fn import_variant<H: MeshHost>(
    host: &mut H,
    spec: &VariantSpec,
    path: &Path,
) -> anyhow::Result<Option<ImportedVariant>> {
    tracing::debug!("Attempting to import mesh: {}", path.display());

    let Some(id) = host.import_mesh(path)? else {
        return Ok(None);
    };
    let name = host.rename(id, &spec.name)?;
    if name != spec.name {
        tracing::warn!("{} was renamed to {} by the host", spec.name, name);
    }

    Ok(Some(ImportedVariant {
        id,
        name,
        kind: spec.kind,
    }))
}
