//! Starting world loader.
//!
//! A world file is a RON list of mobiles:
//!
//! ```ron
//! [
//!     (id: 1, skills: (cast: 100.0, damage: 100.0, resist: 80.0)),
//!     (id: 2, skills: (cast: 0.0, damage: 0.0, resist: 60.0),
//!      resistances: {Fire: 75, Poison: 40}),
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use effect_core::{EntitiesState, EntityId, Mobile, ResistanceKind, Skills};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One mobile as written in a world file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MobileSpec {
    pub id: u32,
    #[serde(default)]
    pub skills: Skills,
    /// Base resistance values; kinds left out start at 0.
    #[serde(default)]
    pub resistances: BTreeMap<ResistanceKind, i32>,
}

impl MobileSpec {
    pub fn into_mobile(self) -> Mobile {
        self.resistances.into_iter().fold(
            Mobile::new(EntityId(self.id), self.skills),
            |mobile, (kind, value)| mobile.with_resistance(kind, value),
        )
    }
}

/// Loader for starting worlds from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn load(path: &Path) -> LoadResult<EntitiesState> {
        let content = read_file(path)?;
        Self::from_ron(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load world {}: {}", path.display(), e))
    }

    /// Parses a world; duplicate ids are rejected.
    pub fn from_ron(content: &str) -> LoadResult<EntitiesState> {
        let specs: Vec<MobileSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;

        let mut world = EntitiesState::empty();
        for spec in specs {
            let id = spec.id;
            if world.insert(spec.into_mobile()).is_some() {
                anyhow::bail!("Duplicate mobile id {}", id);
            }
        }
        Ok(world)
    }
}
