//! Keeping the configured asset list in sync with the export directory.

use std::fs;
use std::path::Path;
use serde::Serialize;

use crate::config::{loader, FetchConfig};
use crate::pack::PackError;

/// What happened to the config file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ManifestUpdate {
    Created,
    Updated,
    Unchanged,
}

/// Set `assets.files` in the config at `path` to `files`.
///
/// A missing file is created from defaults. Other settings are preserved,
/// comments are not.
pub fn update_asset_list(path: &Path, files: &[String]) -> Result<ManifestUpdate, PackError> {
    let (mut config, existed) = match fs::read_to_string(path) {
        Ok(content) => (loader::parse_config(&content)?, true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (FetchConfig::default(), false),
        Err(e) => return Err(PackError::from_io(path, e)),
    };

    if existed && config.assets.files == files {
        tracing::info!(path = %path.display(), "No changes needed in asset list");
        return Ok(ManifestUpdate::Unchanged);
    }

    config.assets.files = files.to_vec();
    let content = toml::to_string_pretty(&config)?;
    fs::write(path, content).map_err(|e| PackError::from_io(path, e))?;

    tracing::info!(path = %path.display(), files = ?files, "Asset list written");
    Ok(if existed {
        ManifestUpdate::Updated
    } else {
        ManifestUpdate::Created
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use uuid::Uuid;

    #[test]
    fn test_create_update_unchanged() {
        let path = std::env::temp_dir().join(format!("asset-manifest-{}.toml", Uuid::new_v4()));
        let files = vec!["game.pck".to_string(), "game.wasm".to_string()];

        assert_eq!(update_asset_list(&path, &files).unwrap(), ManifestUpdate::Created);
        assert_eq!(load_config(&path).unwrap().assets.files, files);

        assert_eq!(update_asset_list(&path, &files).unwrap(), ManifestUpdate::Unchanged);

        let fewer = vec!["game.wasm".to_string()];
        assert_eq!(update_asset_list(&path, &fewer).unwrap(), ManifestUpdate::Updated);
        assert_eq!(load_config(&path).unwrap().assets.files, fewer);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_other_settings_survive() {
        let path = std::env::temp_dir().join(format!("asset-manifest-{}.toml", Uuid::new_v4()));
        fs::write(
            &path,
            "[client]\nbase_url = \"http://10.0.0.2:8000/export/\"\n[decompression]\nstrategy = \"buffered\"\n",
        )
        .unwrap();

        let files = vec!["index.pck".to_string()];
        assert_eq!(update_asset_list(&path, &files).unwrap(), ManifestUpdate::Updated);

        let config = load_config(&path).unwrap();
        assert_eq!(config.client.base_url, "http://10.0.0.2:8000/export/");
        assert_eq!(config.assets.files, files);

        fs::remove_file(&path).unwrap();
    }
}
