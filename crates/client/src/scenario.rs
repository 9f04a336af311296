//! Scripted demo session.
//!
//! A necromancer casts on a fire-resistant knight, recasts at lower strength,
//! spreads the effect to a linked squire, cleanses the knight and lets the
//! squire's instance run out. The clock is fast-forwarded through the handle
//! instead of waiting in real time.

use anyhow::Result;
use tracing::info;

use effect_core::{EntitiesState, EntityId, Mobile, ResistanceKind, Skills, Tick};
use effect_runtime::RuntimeHandle;

pub const NECROMANCER: EntityId = EntityId(1);
pub const KNIGHT: EntityId = EntityId(2);
pub const SQUIRE: EntityId = EntityId(3);

/// Built-in world used when no world file is configured.
pub fn demo_world() -> EntitiesState {
    [
        Mobile::new(NECROMANCER, Skills::new(100.0, 90.0, 80.0)),
        Mobile::new(KNIGHT, Skills::new(0.0, 0.0, 60.0))
            .with_resistance(ResistanceKind::Physical, 60)
            .with_resistance(ResistanceKind::Fire, 75)
            .with_resistance(ResistanceKind::Cold, 40)
            .with_resistance(ResistanceKind::Poison, 45),
        Mobile::new(SQUIRE, Skills::new(0.0, 0.0, 30.0))
            .with_resistance(ResistanceKind::Fire, 30),
    ]
    .into_iter()
    .collect()
}

pub async fn run(handle: &RuntimeHandle) -> Result<()> {
    let first = handle.apply(NECROMANCER, KNIGHT, 1.0).await?;
    info!(
        "Cast on {}: {:.1}s, modifiers {:?}",
        KNIGHT,
        first.duration.as_secs_f64(),
        first.modifiers
    );
    log_resistances(handle, KNIGHT).await?;

    let halfway = Tick::new(first.expires_at.as_millis() / 2);
    let expired = handle.advance(halfway).await?;
    info!("Fast-forwarded to {}, {} expired", halfway, expired);

    let refreshed = handle.apply(NECROMANCER, KNIGHT, 0.5).await?;
    info!(
        "Recast on {} at half strength (refreshed: {})",
        KNIGHT, refreshed.refreshed
    );
    log_resistances(handle, KNIGHT).await?;

    let linked = vec![KNIGHT, SQUIRE];
    let results = handle.propagate(NECROMANCER, linked.clone(), 1.0).await?;
    for (target, result) in linked.into_iter().zip(results) {
        match result {
            Ok(outcome) => info!("Propagated to {}: {}", target, outcome.instance),
            Err(error) => info!("Propagation to {} rejected: {}", target, error),
        }
    }

    let cleansed = handle.force_remove(KNIGHT).await?;
    info!("Cleansed {}: {}", KNIGHT, cleansed);
    log_resistances(handle, KNIGHT).await?;

    if let Some(instance) = handle.instance(SQUIRE).await? {
        let expired = handle.advance(instance.expires_at()).await?;
        info!("Ran {}'s instance out, {} expired", SQUIRE, expired);
    }
    log_resistances(handle, SQUIRE).await?;

    Ok(())
}

async fn log_resistances(handle: &RuntimeHandle, id: EntityId) -> Result<()> {
    let world = handle.query_world().await?;
    if let Some(mobile) = world.get(id) {
        let values: Vec<String> = [
            ResistanceKind::Physical,
            ResistanceKind::Fire,
            ResistanceKind::Cold,
            ResistanceKind::Poison,
        ]
        .into_iter()
        .map(|kind| format!("{}={}", kind, mobile.resistances.value(kind)))
        .collect();
        info!("{} resistances: {}", id, values.join(" "));
    }
    Ok(())
}
