//! Headless attack clip playback.
//!
//! Вместо настоящего аниматора: AttackStarted запускает таймер клипа,
//! по истечении пишем AttackFinished (edge-triggered, один раз на атаку).

use std::collections::HashMap;

use bevy::prelude::*;

use super::AnimTrigger;
use crate::ai::events::{AttackFinished, AttackStarted};

/// Attack clip lengths for one boss + the currently playing clip.
#[derive(Component, Debug, Clone)]
pub struct AttackClip {
    /// Длительность клипа для триггеров без явной записи (секунды).
    pub default_duration: f32,
    pub durations: HashMap<AnimTrigger, f32>,
    /// Оставшееся время текущего клипа. `None` → ничего не играет.
    pub remaining: Option<f32>,
}

impl AttackClip {
    pub fn new(default_duration: f32) -> Self {
        Self {
            default_duration,
            durations: HashMap::new(),
            remaining: None,
        }
    }

    pub fn with_duration(mut self, trigger: AnimTrigger, duration: f32) -> Self {
        self.durations.insert(trigger, duration);
        self
    }

    pub fn duration_of(&self, trigger: &AnimTrigger) -> f32 {
        self.durations
            .get(trigger)
            .copied()
            .unwrap_or(self.default_duration)
    }

    pub fn is_playing(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn start(&mut self, trigger: &AnimTrigger) {
        self.remaining = Some(self.duration_of(trigger).max(0.0));
    }

    /// Count down. Returns `true` exactly once, when the clip ends.
    pub fn advance(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };

        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }

        self.remaining = None;
        true
    }
}

/// Система: проигрывание клипов атак (AttackStarted → таймер → AttackFinished)
pub fn play_attack_clips(
    mut started: EventReader<AttackStarted>,
    mut clips: Query<(Entity, &mut AttackClip)>,
    time: Res<Time<Fixed>>,
    mut finished: EventWriter<AttackFinished>,
) {
    for event in started.read() {
        let Ok((_, mut clip)) = clips.get_mut(event.boss) else {
            crate::log_error(&format!(
                "Boss {:?} started '{}' but has no AttackClip (attack never finishes)",
                event.boss, event.trigger
            ));
            continue;
        };

        clip.start(&event.trigger);
        crate::log(&format!(
            "🎬 Clip '{}' started on {:?} ({:.2}s)",
            event.trigger,
            event.boss,
            clip.duration_of(&event.trigger)
        ));
    }

    let delta = time.delta_secs();
    for (entity, mut clip) in clips.iter_mut() {
        if clip.advance(delta) {
            finished.write(AttackFinished { boss: entity });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_ends_once() {
        let mut clip = AttackClip::new(0.3);
        clip.start(&AnimTrigger::new("Slam"));
        assert!(clip.is_playing());

        assert!(!clip.advance(0.1));
        assert!(!clip.advance(0.1));
        assert!(clip.advance(0.15));
        assert!(!clip.is_playing());
        assert!(!clip.advance(0.1));
    }

    #[test]
    fn test_per_trigger_duration() {
        let clip = AttackClip::new(1.0).with_duration(AnimTrigger::new("Leap"), 2.5);
        assert_eq!(clip.duration_of(&AnimTrigger::new("Leap")), 2.5);
        assert_eq!(clip.duration_of(&AnimTrigger::new("Slam")), 1.0);
    }
}
