//! Served-file catalog.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Immutable map of logical file names to storage paths.
///
/// Built once at startup from the configured paths; lookup is an exact match
/// on the basename a requester supplies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, PathBuf>,
}

impl Catalog {
    /// Builds a catalog from storage paths, keyed by basename.
    ///
    /// Paths without a UTF-8 basename are skipped with a warning.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut entries = HashMap::new();
        for path in paths {
            match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => {
                    entries.insert(name.to_string(), path);
                }
                None => warn!(
                    path = %path.display(),
                    "skipping catalog entry without a usable basename"
                ),
            }
        }
        Self { entries }
    }

    /// Resolves a requested logical name to its storage path.
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
