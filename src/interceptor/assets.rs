//! Allow-list of assets served from a compressed companion.

use std::collections::HashSet;

use crate::config::AssetConfig;

/// Resource identifiers that are fetched as `<name><suffix>` first.
///
/// Matching is exact string equality, the identifier is not normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSet {
    files: HashSet<String>,
    suffix: String,
}

impl AssetSet {
    pub fn new<I, S>(files: I, suffix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &AssetConfig) -> Self {
        Self::new(config.files.iter().cloned(), config.compressed_suffix.clone())
    }

    pub fn contains(&self, resource: &str) -> bool {
        self.files.contains(resource)
    }

    /// Name of the compressed companion of `resource`.
    pub fn compressed_name(&self, resource: &str) -> String {
        format!("{}{}", resource, self.suffix)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for AssetSet {
    fn default() -> Self {
        Self::from_config(&AssetConfig::default())
    }
}
