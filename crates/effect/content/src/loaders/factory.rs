//! Content factory for loading effect data from a data directory.

use std::path::{Path, PathBuf};

use effect_core::{EffectConfig, EntitiesState};

use crate::loaders::{ConfigLoader, LoadResult, WorldLoader};

/// Resolves content files under one data directory.
///
/// Layout:
/// - `effect.toml` (or `effect.ron`): tuning constants
/// - `worlds/{name}.ron`: starting worlds
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `effect.toml`, then `effect.ron`; defaults if neither exists.
    pub fn load_config(&self) -> LoadResult<EffectConfig> {
        for name in ["effect.toml", "effect.ron"] {
            let path = self.data_dir.join(name);
            if path.is_file() {
                return ConfigLoader::load(&path);
            }
        }
        Ok(EffectConfig::default())
    }

    /// Load a world from `worlds/{world_name}.ron`.
    pub fn load_world(&self, world_name: &str) -> LoadResult<EntitiesState> {
        let path = self
            .data_dir
            .join("worlds")
            .join(format!("{}.ron", world_name));
        WorldLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), EffectConfig::default());
    }

    #[test]
    fn loads_config_and_world_from_layout() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("effect.ron"), "(reduction_cap: 20.0)").unwrap();
        std::fs::create_dir(dir.path().join("worlds")).unwrap();
        std::fs::write(dir.path().join("worlds").join("arena.ron"), "[(id: 1), (id: 2)]").unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().reduction_cap, 20.0);
        assert_eq!(factory.load_world("arena").unwrap().len(), 2);
    }
}
