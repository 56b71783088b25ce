//! Catalog of the dataset versions available under one data root.
//!
//! A version is a subdirectory of the root whose name starts with `v`
//! (`data/v40`, `data/v41`, ...). The catalog owns the storage layout;
//! parsing and comparison only ever see the paths it resolves.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// File name of the DRG listing inside each version directory.
pub const APPENDIX_A: &str = "appendix_A.txt";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to scan data directory {root}: {source}")]
    Io {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested version is not in the catalog. Carries the available
    /// identifiers so callers can suggest them.
    #[error("version `{requested}` not found")]
    VersionNotFound {
        requested: String,
        available: Vec<String>,
    },

    /// A comparison of a version against itself was requested.
    #[error("cannot compare version `{0}` with itself; specify two different versions")]
    SameVersion(String),
}

/// The dataset versions discovered under one data root.
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    root: PathBuf,
    versions: BTreeSet<String>,
}

impl VersionCatalog {
    /// Scan `root` for version directories.
    ///
    /// Only directories count; stray files named `v*` are ignored. An
    /// empty catalog is not an error here, lookups against it are.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let root = root.as_ref().to_path_buf();
        let entries = fs::read_dir(&root).map_err(|source| CatalogError::Io {
            root: root.clone(),
            source,
        })?;

        let mut versions = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::Io {
                root: root.clone(),
                source,
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with('v') {
                    versions.insert(name.to_string());
                }
            }
        }

        debug!(root = %root.display(), count = versions.len(), "version catalog discovered");
        Ok(Self { root, versions })
    }

    /// The data root this catalog was discovered from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Available version identifiers in ascending order.
    pub fn versions(&self) -> Vec<&str> {
        self.versions.iter().map(String::as_str).collect()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains(version)
    }

    /// Path of the Appendix A listing for `version`.
    pub fn appendix_path(&self, version: &str) -> Result<PathBuf, CatalogError> {
        if !self.contains(version) {
            return Err(CatalogError::VersionNotFound {
                requested: version.to_string(),
                available: self.versions.iter().cloned().collect(),
            });
        }
        Ok(self.root.join(version).join(APPENDIX_A))
    }

    /// Validate a comparison request and resolve both listing paths.
    ///
    /// Both versions must exist and must differ. Existence is checked
    /// first, so asking for an unknown version twice reports it as not
    /// found rather than as a self-comparison.
    pub fn resolve_pair(&self, old: &str, new: &str) -> Result<(PathBuf, PathBuf), CatalogError> {
        let old_path = self.appendix_path(old)?;
        let new_path = self.appendix_path(new)?;
        if old == new {
            return Err(CatalogError::SameVersion(old.to_string()));
        }
        Ok((old_path, new_path))
    }
}
