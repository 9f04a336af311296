//! Effect configuration loader.

use std::path::Path;

use effect_core::EffectConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for effect tuning constants from TOML or RON files.
///
/// Fields missing from the file keep their [`EffectConfig::default`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data, picking the format from the file extension.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a `.toml` or `.ron` file containing EffectConfig
    pub fn load(path: &Path) -> LoadResult<EffectConfig> {
        let content = read_file(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => Self::from_toml(&content),
            "ron" => Self::from_ron(&content),
            other => Err(anyhow::anyhow!(
                "Unsupported config format '{}' for {} (expected .toml or .ron)",
                other,
                path.display()
            )),
        }
    }

    pub fn from_toml(content: &str) -> LoadResult<EffectConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    pub fn from_ron(content: &str) -> LoadResult<EffectConfig> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_partial_toml_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "effect.toml", "skill_divisor = 2.0\nresist_threshold = 60\n");

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.skill_divisor, 2.0);
        assert_eq!(config.resist_threshold, 60);
        assert_eq!(config.base_seconds, EffectConfig::DEFAULT_BASE_SECONDS);
        assert_eq!(config.reduction_cap, EffectConfig::DEFAULT_REDUCTION_CAP);
    }

    #[test]
    fn loads_ron() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "effect.ron", "(base_seconds: 30.0, cold_bonus: 5.0)");

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.base_seconds, 30.0);
        assert_eq!(config.cold_bonus, 5.0);
        assert_eq!(config.physical_bonus, EffectConfig::DEFAULT_PHYSICAL_BONUS);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(ConfigLoader::from_toml("").unwrap(), EffectConfig::default());
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "effect.json", "{}");

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::from_toml("skill_divisor = \"fast\"").is_err());
    }
}
