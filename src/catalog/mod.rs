//! Immutable process/material/sample catalogs
//!
//! Catalog data ships embedded in the binary and is parsed once, on first
//! access. The invariants the pricing model leans on (every process has at
//! least one material, sample projects reference real materials) are
//! checked at load time so the rest of the crate can treat the catalog as
//! well-formed.

pub mod material;
pub mod process;
pub mod sample;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rust_embed::Embed;
use thiserror::Error;

pub use material::{Material, MaterialLookup};
pub use process::{ProcessEntry, ProcessKind};
pub use sample::SampleProject;

#[derive(Embed)]
#[folder = "data/"]
struct CatalogAssets;

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The full, validated catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    processes: Vec<ProcessEntry>,
    materials: BTreeMap<ProcessKind, Vec<Material>>,
    samples: Vec<SampleProject>,
}

impl Catalog {
    /// Get the process-wide catalog, loading and validating it on first use
    pub fn global() -> Result<&'static Catalog, CatalogError> {
        if let Some(catalog) = CATALOG.get() {
            return Ok(catalog);
        }
        let loaded = Self::load()?;
        Ok(CATALOG.get_or_init(|| loaded))
    }

    /// Parse the embedded catalog files and validate their invariants
    pub fn load() -> Result<Self, CatalogError> {
        let processes: Vec<ProcessEntry> = parse_asset("processes.yaml")?;
        let materials: BTreeMap<ProcessKind, Vec<Material>> = parse_asset("materials.yaml")?;
        let samples: Vec<SampleProject> = parse_asset("samples.yaml")?;

        let catalog = Self {
            processes,
            materials,
            samples,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for kind in ProcessKind::all() {
            let entries = self.processes.iter().filter(|p| p.id == *kind).count();
            if entries == 0 {
                return Err(CatalogError::MissingProcess(*kind));
            }
            if entries > 1 {
                return Err(CatalogError::DuplicateProcess(*kind));
            }
            if self.materials(*kind).is_empty() {
                return Err(CatalogError::NoMaterials(*kind));
            }
        }

        for sample in &self.samples {
            if sample.quantity == 0 {
                return Err(CatalogError::InvalidSample {
                    sample: sample.id.clone(),
                    reason: "quantity must be at least 1".to_string(),
                });
            }
            if sample.dimensions.volume_mm3() <= 0.0 {
                return Err(CatalogError::InvalidSample {
                    sample: sample.id.clone(),
                    reason: "dimensions must be positive".to_string(),
                });
            }
            let known = self
                .materials(sample.process)
                .iter()
                .any(|m| m.id == sample.material);
            if !known {
                return Err(CatalogError::UnknownSampleMaterial {
                    sample: sample.id.clone(),
                    material: sample.material.clone(),
                    process: sample.process,
                });
            }
        }

        Ok(())
    }

    /// All processes, in display order
    pub fn processes(&self) -> &[ProcessEntry] {
        &self.processes
    }

    /// Display metadata for one process
    pub fn process(&self, kind: ProcessKind) -> Option<&ProcessEntry> {
        self.processes.iter().find(|p| p.id == kind)
    }

    /// Materials offered for a process, default first
    pub fn materials(&self, kind: ProcessKind) -> &[Material] {
        self.materials.get(&kind).map_or(&[], |v| v.as_slice())
    }

    /// The default material selected when switching to a process
    pub fn default_material(&self, kind: ProcessKind) -> Option<&Material> {
        self.materials(kind).first()
    }

    /// Resolve a material id for a process
    ///
    /// Unknown ids degrade to the process default rather than failing;
    /// `fell_back` tells the caller the substitution happened. Returns
    /// `None` only if the process has no materials at all, which load-time
    /// validation rules out.
    pub fn resolve_material<'a>(
        &'a self,
        kind: ProcessKind,
        material_id: &str,
    ) -> Option<MaterialLookup<'a>> {
        let list = self.materials(kind);
        match list.iter().find(|m| m.id == material_id) {
            Some(material) => Some(MaterialLookup {
                material,
                fell_back: false,
            }),
            None => list.first().map(|material| MaterialLookup {
                material,
                fell_back: true,
            }),
        }
    }

    /// All sample projects
    pub fn samples(&self) -> &[SampleProject] {
        &self.samples
    }

    /// Look up a sample project by id
    pub fn sample(&self, id: &str) -> Option<&SampleProject> {
        self.samples.iter().find(|s| s.id == id)
    }
}

fn parse_asset<T: serde::de::DeserializeOwned + 'static>(name: &'static str) -> Result<T, CatalogError> {
    let file = CatalogAssets::get(name).ok_or(CatalogError::MissingAsset(name))?;
    serde_yml::from_slice(&file.data).map_err(|source| CatalogError::Parse { file: name, source })
}

/// Errors raised while loading or validating the embedded catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded catalog file '{0}' is missing from the binary")]
    MissingAsset(&'static str),

    #[error("failed to parse embedded catalog file '{file}'")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_yml::Error,
    },

    #[error("catalog has no entry for process '{0}'")]
    MissingProcess(ProcessKind),

    #[error("catalog has more than one entry for process '{0}'")]
    DuplicateProcess(ProcessKind),

    #[error("process '{0}' has an empty material list")]
    NoMaterials(ProcessKind),

    #[error("sample '{sample}' references unknown material '{material}' for process '{process}'")]
    UnknownSampleMaterial {
        sample: String,
        material: String,
        process: ProcessKind,
    },

    #[error("sample '{sample}' is invalid: {reason}")]
    InvalidSample { sample: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.processes().len(), 4);
        assert_eq!(catalog.samples().len(), 5);
    }

    #[test]
    fn test_every_process_has_materials() {
        let catalog = Catalog::load().unwrap();
        for kind in ProcessKind::all() {
            assert!(
                !catalog.materials(*kind).is_empty(),
                "process {} has no materials",
                kind
            );
        }
    }

    #[test]
    fn test_default_material_is_first_in_list() {
        let catalog = Catalog::load().unwrap();
        for kind in ProcessKind::all() {
            let default = catalog.default_material(*kind).unwrap();
            assert_eq!(default.id, catalog.materials(*kind)[0].id);
        }
    }

    #[test]
    fn test_switching_process_always_yields_valid_default() {
        // Emulates the UI flow: material stays from the old process, the
        // new process must still resolve to something in its own list.
        let catalog = Catalog::load().unwrap();
        let lookup = catalog.resolve_material(ProcessKind::Cnc, "pla").unwrap();
        assert!(lookup.fell_back);
        assert!(catalog
            .materials(ProcessKind::Cnc)
            .iter()
            .any(|m| m.id == lookup.material.id));
    }

    #[test]
    fn test_resolve_known_material_is_exact() {
        let catalog = Catalog::load().unwrap();
        let lookup = catalog.resolve_material(ProcessKind::Fdm, "nylon").unwrap();
        assert!(!lookup.fell_back);
        assert_eq!(lookup.material.id, "nylon");
        assert_eq!(lookup.material.price_per_cm3, 6.5);
    }

    #[test]
    fn test_known_reference_prices() {
        let catalog = Catalog::load().unwrap();
        let pla = catalog.resolve_material(ProcessKind::Fdm, "pla").unwrap();
        assert_eq!(pla.material.price_per_cm3, 2.5);
        let steel = catalog
            .resolve_material(ProcessKind::Cnc, "steel_304")
            .unwrap();
        assert_eq!(steel.material.price_per_cm3, 25.0);
    }

    #[test]
    fn test_samples_reference_valid_materials() {
        let catalog = Catalog::load().unwrap();
        for sample in catalog.samples() {
            assert!(catalog
                .materials(sample.process)
                .iter()
                .any(|m| m.id == sample.material));
        }
    }

    #[test]
    fn test_sample_lookup_by_id() {
        let catalog = Catalog::load().unwrap();
        let bracket = catalog.sample("bracket").unwrap();
        assert_eq!(bracket.process, ProcessKind::Cnc);
        assert_eq!(bracket.quantity, 10);
        assert!(catalog.sample("does-not-exist").is_none());
    }
}
