use super::*;
use crate::effect::ExpireReason;
use crate::env::{BuffIcon, BuffInfo, BufferedSink, Notification, NullSink, SinkRecord};
use crate::error::{ApplyError, EffectError, ErrorSeverity};
use crate::state::{EntitiesState, Mobile, ResistanceKind, Skills};

const CASTER: EntityId = EntityId(1);
const TARGET: EntityId = EntityId(2);
const BYSTANDER: EntityId = EntityId(3);

struct Fixture {
    state: EffectState,
    world: EntitiesState,
    sink: BufferedSink,
}

impl Fixture {
    fn new() -> Self {
        let world = [
            Mobile::new(CASTER, Skills::new(80.0, 80.0, 50.0)),
            Mobile::new(TARGET, Skills::new(0.0, 0.0, 40.0))
                .with_resistance(ResistanceKind::Fire, 78)
                .with_resistance(ResistanceKind::Poison, 30),
            Mobile::new(BYSTANDER, Skills::new(0.0, 0.0, 20.0)),
        ]
        .into_iter()
        .collect();

        Self {
            state: EffectState::default(),
            world,
            sink: BufferedSink::new(),
        }
    }

    fn engine(&mut self) -> EffectEngine<'_> {
        EffectEngine::new(
            &mut self.state,
            EffectEnv::new(&mut self.world, &mut self.sink),
        )
    }

    fn offset(&self, id: EntityId, kind: ResistanceKind) -> i32 {
        self.world
            .get(id)
            .map(|m| m.resistances.offset(kind))
            .unwrap_or_default()
    }

    fn live_mods(&self, id: EntityId) -> usize {
        self.world
            .get(id)
            .map(|m| m.resistances.mods().len())
            .unwrap_or_default()
    }
}

#[test]
fn apply_adds_all_four_modifiers() {
    let mut fx = Fixture::new();
    let outcome = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    // reduction 12 + excess fire 8
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), -20);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Poison), -20);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Cold), 10);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Physical), 10);
    assert_eq!(fx.live_mods(TARGET), 4);

    // (80 - 40) / 2.5 + 40 = 56s
    assert_eq!(outcome.duration.as_secs_f64(), 56.0);
    assert_eq!(outcome.expires_at, Tick(56_000));
    assert!(!outcome.refreshed);
    assert!(fx.state.is_affected(TARGET));
    assert_eq!(fx.state.pending_timers(), 1);
}

#[test]
fn repeated_applies_leave_exactly_one_instance() {
    let mut fx = Fixture::new();
    let mut last = None;
    for strength in [1.0, 0.5, 1.5, 1.0] {
        last = Some(fx.engine().apply(CASTER, TARGET, strength).unwrap());
    }
    let last = last.unwrap();

    assert_eq!(fx.state.registry().len(), 1);
    assert_eq!(fx.state.pending_timers(), 1);
    assert_eq!(
        fx.state.instance(TARGET).map(|i| i.id()),
        Some(last.instance)
    );
    assert_eq!(fx.live_mods(TARGET), 4);
    let world_mods = fx.world.get(TARGET).unwrap().resistances.mods().to_vec();
    assert_eq!(world_mods, last.modifiers.to_vec());
}

#[test]
fn refresh_reverts_before_applying() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), -20);

    // Old fire -20 is reverted first, so resist reads 78 again: -(8 + 12) * 0.75
    let outcome = fx.engine().apply(CASTER, TARGET, 0.75).unwrap();
    assert!(outcome.refreshed);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), -15);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Cold), 7);
}

#[test]
fn refresh_sends_refreshed_instead_of_applied() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    assert_eq!(
        fx.sink.notifications_for(TARGET),
        vec![Notification::Applied, Notification::Refreshed]
    );
    let refreshed = fx
        .sink
        .records()
        .iter()
        .filter(|r| {
            matches!(
                r,
                SinkRecord::Expired {
                    reason: ExpireReason::Refreshed,
                    ..
                }
            )
        })
        .count();
    assert_eq!(refreshed, 1);
}

#[test]
fn stale_timer_from_refresh_does_not_fire() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.engine().advance_to(Tick(30_000));
    let outcome = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    assert_eq!(outcome.expires_at, Tick(86_000));

    // First instance would have expired at 56s.
    assert_eq!(fx.engine().advance_to(Tick(60_000)), 0);
    assert!(fx.state.is_affected(TARGET));

    assert_eq!(fx.engine().advance_to(Tick(86_000)), 1);
    assert!(!fx.state.is_affected(TARGET));
    assert_eq!(fx.live_mods(TARGET), 0);
}

#[test]
fn expire_now_is_idempotent() {
    let mut fx = Fixture::new();
    let outcome = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    assert!(fx.engine().expire_now(outcome.instance));
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), 0);
    assert_eq!(fx.live_mods(TARGET), 0);

    fx.sink.clear();
    assert!(!fx.engine().expire_now(outcome.instance));
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), 0);
    assert!(fx.sink.records().is_empty());
    assert_eq!(fx.state.pending_timers(), 0);
}

#[test]
fn expiring_old_instance_spares_its_replacement() {
    let mut fx = Fixture::new();
    let old = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    let new = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    assert!(!fx.engine().expire_now(old.instance));
    assert_eq!(
        fx.state.instance(TARGET).map(|i| i.id()),
        Some(new.instance)
    );
    assert_eq!(fx.live_mods(TARGET), 4);
}

#[test]
fn natural_expiry_sends_wore_off_and_clears_icon() {
    let mut fx = Fixture::new();
    let outcome = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.sink.clear();

    assert_eq!(fx.engine().advance_to(Tick(55_999)), 0);
    assert_eq!(fx.engine().advance_to(Tick(56_000)), 1);

    assert_eq!(
        fx.sink.records(),
        &[
            SinkRecord::Notify {
                target: TARGET,
                notification: Notification::WoreOff,
            },
            SinkRecord::RemoveBuff {
                target: TARGET,
                icon: BuffIcon::CorpseSkin,
            },
            SinkRecord::Expired {
                target: TARGET,
                instance: outcome.instance,
                reason: ExpireReason::Elapsed,
            },
        ]
    );
    assert!(!fx.state.is_affected(TARGET));
    assert_eq!(fx.live_mods(TARGET), 0);
}

#[test]
fn explicit_cancel_skips_wore_off() {
    let mut fx = Fixture::new();
    let outcome = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.sink.clear();

    fx.engine().expire_now(outcome.instance);
    assert!(fx.sink.notifications_for(TARGET).is_empty());
    assert!(fx.sink.records().contains(&SinkRecord::RemoveBuff {
        target: TARGET,
        icon: BuffIcon::CorpseSkin,
    }));
}

#[test]
fn self_target_ignores_resist_skill() {
    let mut fx = Fixture::new();
    let outcome = fx.engine().apply(CASTER, CASTER, 1.0).unwrap();
    // (80 - 0) / 2.5 + 40
    assert_eq!(outcome.duration.as_secs_f64(), 72.0);
    assert_eq!(outcome.expires_at, Tick(72_000));
}

#[test]
fn strength_scales_duration() {
    let mut fx = Fixture::new();
    let outcome = fx.engine().apply(CASTER, TARGET, 0.5).unwrap();
    assert_eq!(outcome.duration.as_secs_f64(), 28.0);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), -10);
    assert_eq!(fx.offset(TARGET, ResistanceKind::Physical), 5);
}

#[test]
fn force_remove_on_affected_target() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.sink.clear();

    assert!(fx.engine().force_remove(TARGET));
    assert!(!fx.state.is_affected(TARGET));
    assert_eq!(fx.live_mods(TARGET), 0);
    assert_eq!(
        fx.sink.notifications_for(TARGET),
        vec![Notification::WoreOff]
    );
    assert!(fx.sink.records().contains(&SinkRecord::RemoveBuff {
        target: TARGET,
        icon: BuffIcon::CorpseSkin,
    }));
    assert_eq!(fx.state.pending_timers(), 0);
}

#[test]
fn force_remove_on_unaffected_target_is_noop() {
    let mut fx = Fixture::new();
    assert!(!fx.engine().force_remove(TARGET));
    assert!(fx.sink.records().is_empty());
}

#[test]
fn non_positive_duration_expires_on_next_pump() {
    let mut fx = Fixture::new();
    fx.world.get_mut(TARGET).unwrap().skills.resist = 250.0;
    let outcome = fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    assert!(outcome.duration.is_immediate());
    assert_eq!(outcome.expires_at, Tick::ZERO);

    assert_eq!(fx.engine().advance_to(Tick::ZERO), 1);
    assert!(!fx.state.is_affected(TARGET));
    assert_eq!(fx.live_mods(TARGET), 0);
}

#[test]
fn extreme_resistances_apply_and_revert() {
    let mut fx = Fixture::new();
    let frozen = EntityId(4);
    let molten = EntityId(5);
    fx.world.insert(
        Mobile::new(frozen, Skills::new(0.0, 0.0, 40.0))
            .with_resistance(ResistanceKind::Fire, i32::MIN),
    );
    fx.world.insert(
        Mobile::new(molten, Skills::new(0.0, 0.0, 40.0))
            .with_resistance(ResistanceKind::Fire, i32::MAX),
    );

    let low = fx.engine().apply(CASTER, frozen, 1.0).unwrap();
    let high = fx.engine().apply(CASTER, molten, 1.0).unwrap();

    assert_eq!(fx.offset(frozen, ResistanceKind::Fire), -12);
    assert_eq!(
        fx.world.get(frozen).unwrap().resistances.value(ResistanceKind::Fire),
        i32::MIN
    );
    assert_eq!(fx.offset(molten, ResistanceKind::Fire), -(i32::MAX - 70) - 12);

    assert!(fx.engine().expire_now(low.instance));
    assert!(fx.engine().expire_now(high.instance));
    assert_eq!(fx.live_mods(frozen), 0);
    assert_eq!(fx.live_mods(molten), 0);
}

#[test]
fn clock_never_moves_back() {
    let mut fx = Fixture::new();
    fx.engine().advance_to(Tick(5_000));
    fx.engine().advance_to(Tick(1_000));
    assert_eq!(fx.state.clock(), Tick(5_000));
}

#[test]
fn apply_reads_current_values() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.engine().force_remove(TARGET);

    fx.world
        .get_mut(TARGET)
        .unwrap()
        .resistances
        .set_base(ResistanceKind::Fire, 90);
    fx.world.get_mut(CASTER).unwrap().skills.cast = 120.0;
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    // reduction min(15, 200 * 0.075) = 15, excess 20
    assert_eq!(fx.offset(TARGET, ResistanceKind::Fire), -35);
}

#[test]
fn host_hooks_run_on_every_application() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    let target = fx.world.get(TARGET).unwrap();
    assert_eq!(target.interruptions, 2);
    assert_eq!(target.resist_checks, 2);
    assert!(fx.sink.records().contains(&SinkRecord::Harmful {
        caster: CASTER,
        target: TARGET,
    }));
}

#[test]
fn buff_carries_duration_and_caster() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    let buff = fx
        .sink
        .records()
        .iter()
        .find_map(|r| match r {
            SinkRecord::AddBuff { buff, .. } => Some(*buff),
            _ => None,
        })
        .expect("buff registered");
    assert_eq!(buff.icon, BuffIcon::CorpseSkin);
    assert_eq!(buff.title_cliloc, BuffInfo::CORPSE_SKIN_TITLE);
    assert_eq!(buff.duration.as_secs_f64(), 56.0);
    assert_eq!(buff.caster, CASTER);
}

#[test]
fn rejects_unknown_entities_and_bad_strength() {
    let mut fx = Fixture::new();

    let err = fx.engine().apply(EntityId(99), TARGET, 1.0).unwrap_err();
    assert_eq!(err, ApplyError::CasterNotFound(EntityId(99)));
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(err.severity().as_str(), "validation");

    let err = fx.engine().apply(CASTER, EntityId(99), 1.0).unwrap_err();
    assert_eq!(err.error_code(), "APPLY_TARGET_NOT_AFFECTABLE");

    let err = fx.engine().apply(CASTER, TARGET, f64::NAN).unwrap_err();
    assert!(matches!(err, ApplyError::InvalidStrength(_)));

    assert!(fx.sink.records().is_empty());
    assert!(fx.state.registry().is_empty());
}

#[test]
fn propagate_applies_to_each_linked_target() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();

    let results = fx
        .engine()
        .propagate(CASTER, &[TARGET, BYSTANDER, EntityId(42)], 0.5);

    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().is_ok_and(|o| o.refreshed));
    assert!(results[1].as_ref().is_ok_and(|o| !o.refreshed));
    assert!(results[2].is_err());
    assert!(fx.state.is_affected(BYSTANDER));
    assert_eq!(fx.state.registry().len(), 2);
}

#[test]
fn entity_removal_drops_entry_without_revert() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    let gone = fx.world.remove(TARGET).unwrap();
    fx.sink.clear();

    assert!(fx.engine().on_entity_removed(TARGET));
    assert!(!fx.state.is_affected(TARGET));
    assert_eq!(fx.state.pending_timers(), 0);
    assert_eq!(gone.resistances.mods().len(), 4);
    assert!(matches!(
        fx.sink.records(),
        [SinkRecord::Expired {
            reason: ExpireReason::EntityRemoved,
            ..
        }]
    ));
    assert!(!fx.engine().on_entity_removed(TARGET));
}

#[test]
fn shutdown_reverts_everything() {
    let mut fx = Fixture::new();
    fx.engine().apply(CASTER, TARGET, 1.0).unwrap();
    fx.engine().apply(CASTER, BYSTANDER, 1.0).unwrap();

    assert_eq!(fx.engine().shutdown(), 2);
    assert!(fx.state.registry().is_empty());
    assert_eq!(fx.state.pending_timers(), 0);
    assert_eq!(fx.live_mods(TARGET), 0);
    assert_eq!(fx.live_mods(BYSTANDER), 0);
    assert!(
        !fx.sink
            .notifications_for(TARGET)
            .contains(&Notification::WoreOff)
    );
}

#[test]
fn works_with_a_discarding_sink() {
    let mut state = EffectState::default();
    let mut world: EntitiesState = [
        Mobile::new(CASTER, Skills::new(50.0, 50.0, 0.0)),
        Mobile::new(TARGET, Skills::default()),
    ]
    .into_iter()
    .collect();
    let mut sink = NullSink;

    let mut engine = EffectEngine::new(&mut state, EffectEnv::new(&mut world, &mut sink));
    engine.apply(CASTER, TARGET, 1.0).unwrap();
    assert!(engine.is_affected(TARGET));
    assert_eq!(engine.advance_to(Tick::from_secs(60)), 1);
    assert!(!engine.is_affected(TARGET));
}
