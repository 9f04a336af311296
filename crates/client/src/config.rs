//! Simulator configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::Result;
use effect_content::{ConfigLoader, WorldLoader};
use effect_core::EntitiesState;
use effect_runtime::RuntimeConfig;

/// Configuration required to bootstrap the simulator.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    pub runtime: RuntimeConfig,
    /// TOML or RON file overriding the effect constants.
    pub effect_config_path: Option<PathBuf>,
    /// RON world file; the built-in demo world is used when unset.
    pub world_path: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `EFFECT_CONFIG` - Effect constants file, `.toml` or `.ron` (default: built-in)
    /// - `EFFECT_WORLD` - World file, `.ron` (default: demo world)
    /// - `EFFECT_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `EFFECT_LOG_DIR` - Directory for logs (default: platform-specific)
    /// - plus everything [`RuntimeConfig::from_env`] reads
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::from_env(),
            effect_config_path: read_env::<PathBuf>("EFFECT_CONFIG"),
            world_path: read_env::<PathBuf>("EFFECT_WORLD"),
            session_id: env::var("EFFECT_SESSION_ID").ok(),
            log_dir: read_env::<PathBuf>("EFFECT_LOG_DIR"),
        }
    }

    /// Runtime configuration with the effect constants file applied.
    pub fn resolve_runtime(&self) -> Result<RuntimeConfig> {
        let mut runtime = self.runtime.clone();
        if let Some(path) = &self.effect_config_path {
            runtime.effect = ConfigLoader::load(path)?;
            tracing::info!("Effect config loaded from {}", path.display());
        }
        Ok(runtime)
    }

    /// Starting world from `EFFECT_WORLD`, or `fallback` when unset.
    pub fn resolve_world(&self, fallback: impl FnOnce() -> EntitiesState) -> Result<EntitiesState> {
        match &self.world_path {
            Some(path) => {
                let world = WorldLoader::load(path)?;
                tracing::info!("World loaded from {}: {} mobiles", path.display(), world.len());
                Ok(world)
            }
            None => Ok(fallback()),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
