//! Boss tick systems.

use bevy::prelude::*;

use crate::ai::components::Boss;
use crate::ai::events::{AttackFinished, AttackStarted};
use crate::ai::target::{TargetSnapshot, TargetSource, TargetVelocity};

/// Система: одноразовый snap новых боссов на navmesh
pub fn snap_new_bosses(mut bosses: Query<(Entity, &mut Boss, &mut Transform), Added<Boss>>) {
    for (entity, mut boss, mut transform) in bosses.iter_mut() {
        if boss.controller.snap_onto_surface(&mut transform).is_none() {
            crate::log(&format!("Boss {:?} spawned at {:?}", entity, transform.translation));
        }
    }
}

/// Система: AttackFinished → `finish_attack()` (Attacking → Recover)
pub fn apply_attack_finished(mut events: EventReader<AttackFinished>, mut bosses: Query<&mut Boss>) {
    for event in events.read() {
        let Ok(mut boss) = bosses.get_mut(event.boss) else {
            crate::log_warning(&format!("AttackFinished for unknown boss {:?}", event.boss));
            continue;
        };

        boss.controller.finish_attack();
    }
}

/// Система: один тик контроллера для каждого босса
///
/// Цель без `Transform` (despawned) считается отсутствующей.
pub fn tick_bosses(
    mut bosses: Query<(Entity, &mut Boss, &mut Transform)>,
    targets: Query<(&Transform, Option<&TargetVelocity>), Without<Boss>>,
    time: Res<Time<Fixed>>,
    mut started_events: EventWriter<AttackStarted>,
) {
    let delta = time.delta_secs();
    let now = time.elapsed_secs();

    for (entity, mut boss, mut transform) in bosses.iter_mut() {
        let snapshot = boss
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|(target_transform, velocity)| TargetSnapshot::from_transform(target_transform, velocity));

        let Some(report) = boss.controller.tick(
            &mut transform,
            snapshot.as_ref().map(|s| s as &dyn TargetSource),
            delta,
            now,
        ) else {
            continue;
        };

        if let Some(started) = report.started {
            started_events.write(AttackStarted {
                boss: entity,
                attack: started.attack,
                trigger: started.trigger,
            });
        }
    }
}
