//! Attack selection (multi-factor scoring).
//!
//! score = weight × curve(normalized range) × facing × cooldown factor.
//! Running best starts at 0 and is replaced only by a strictly greater score,
//! so a zero score never wins and ties keep the earlier catalog entry.

use super::attack::{AttackDescriptor, AttackId};
use super::catalog::AttackCatalog;

/// Situation snapshot for one decision pass.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext {
    /// Distance actor → target.
    pub distance: f32,
    /// cos(angle) between actor forward and direction to target.
    pub facing_dot: f32,
    /// Simulation time (seconds).
    pub now: f32,
}

/// Winning attack of a decision pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackChoice {
    pub attack: AttackId,
    pub score: f32,
}

/// 0 below `required_dot` (hard gate), otherwise inverse-lerp(required, 1, dot).
pub fn facing_factor(dot: f32, required_dot: f32) -> f32 {
    if dot < required_dot {
        return 0.0;
    }
    let span = 1.0 - required_dot;
    if span <= f32::EPSILON {
        return 1.0;
    }
    ((dot - required_dot) / span).clamp(0.0, 1.0)
}

/// Score of a descriptor that already passed range/cooldown/LOS gates.
pub fn score_attack(attack: &AttackDescriptor, ctx: &SelectionContext) -> f32 {
    let norm = attack.normalized_range(ctx.distance);

    attack.weight
        * attack.distance_curve.evaluate(norm)
        * facing_factor(ctx.facing_dot, attack.required_facing_dot)
        * attack.cooldown_factor(ctx.now)
}

/// Best eligible attack in catalog order.
///
/// `line_of_sight` is queried lazily — at most once per pass, and only if some
/// in-range, off-cooldown attack actually requires LOS.
pub fn select_attack(
    catalog: &AttackCatalog,
    ctx: &SelectionContext,
    mut line_of_sight: impl FnMut() -> bool,
) -> Option<AttackChoice> {
    let mut visible: Option<bool> = None;
    let mut best: Option<AttackChoice> = None;
    let mut best_score = 0.0;

    for (id, attack) in catalog.iter() {
        if !attack.is_in_range(ctx.distance) {
            continue;
        }
        if !attack.is_off_cooldown(ctx.now) {
            continue;
        }
        if attack.requires_los && !*visible.get_or_insert_with(|| line_of_sight()) {
            continue;
        }

        let score = score_attack(attack, ctx);
        if score > best_score {
            best_score = score;
            best = Some(AttackChoice { attack: id, score });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimTrigger;

    fn ctx(distance: f32, now: f32) -> SelectionContext {
        SelectionContext {
            distance,
            facing_dot: 1.0,
            now,
        }
    }

    fn pair() -> AttackCatalog {
        AttackCatalog::new(vec![
            AttackDescriptor::new("a", AnimTrigger::new("A"), 0.0, 3.0, 2.0, 1.0),
            AttackDescriptor::new("b", AnimTrigger::new("B"), 2.0, 6.0, 5.0, 2.0),
        ])
    }

    #[test]
    fn test_facing_factor() {
        assert_eq!(facing_factor(1.0, 0.0), 1.0);
        assert_eq!(facing_factor(0.0, 0.0), 0.0);
        assert_eq!(facing_factor(0.5, 0.0), 0.5);
        assert_eq!(facing_factor(-0.1, 0.0), 0.0);
        assert_eq!(facing_factor(0.0, -1.0), 0.5);
        assert_eq!(facing_factor(1.0, 1.0), 1.0);
        assert_eq!(facing_factor(0.99, 1.0), 0.0);
    }

    #[test]
    fn test_higher_score_wins_overlap() {
        let choice = select_attack(&pair(), &ctx(2.5, 0.0), || true).expect("choice");
        assert_eq!(choice.attack, AttackId(1));
        assert_eq!(choice.score, 2.0);
    }

    #[test]
    fn test_only_in_range_attack() {
        let choice = select_attack(&pair(), &ctx(1.0, 0.0), || true).expect("choice");
        assert_eq!(choice.attack, AttackId(0));

        assert!(select_attack(&pair(), &ctx(7.0, 0.0), || true).is_none());
    }

    #[test]
    fn test_tie_keeps_catalog_order() {
        let catalog = AttackCatalog::new(vec![
            AttackDescriptor::new("first", AnimTrigger::new("F"), 0.0, 5.0, 1.0, 1.0),
            AttackDescriptor::new("second", AnimTrigger::new("S"), 0.0, 5.0, 1.0, 1.0),
        ]);
        let choice = select_attack(&catalog, &ctx(2.0, 0.0), || true).expect("choice");
        assert_eq!(choice.attack, AttackId(0));
    }

    #[test]
    fn test_cooldown_excludes_attack() {
        let mut catalog = pair();
        if let Some(b) = catalog.get_mut(AttackId(1)) {
            b.mark_used(0.0);
        }

        let choice = select_attack(&catalog, &ctx(2.5, 1.0), || true).expect("choice");
        assert_eq!(choice.attack, AttackId(0));

        let choice = select_attack(&catalog, &ctx(2.5, 5.0), || true).expect("choice");
        assert_eq!(choice.attack, AttackId(1));
    }

    #[test]
    fn test_facing_gate_is_hard() {
        let catalog = AttackCatalog::new(vec![
            AttackDescriptor::new("front", AnimTrigger::new("F"), 0.0, 5.0, 1.0, 100.0)
                .with_facing_dot(0.9),
        ]);
        let sideways = SelectionContext {
            distance: 2.0,
            facing_dot: 0.5,
            now: 0.0,
        };
        assert!(select_attack(&catalog, &sideways, || true).is_none());

        // ровно на пороге — factor 0, тоже не выбирается
        let at_threshold = SelectionContext {
            facing_dot: 0.9,
            ..sideways
        };
        assert!(select_attack(&catalog, &at_threshold, || true).is_none());
    }

    #[test]
    fn test_los_queried_lazily_once() {
        let catalog = AttackCatalog::new(vec![
            AttackDescriptor::new("x", AnimTrigger::new("X"), 0.0, 5.0, 1.0, 1.0).requiring_los(),
            AttackDescriptor::new("y", AnimTrigger::new("Y"), 0.0, 5.0, 1.0, 2.0).requiring_los(),
            AttackDescriptor::new("z", AnimTrigger::new("Z"), 0.0, 5.0, 1.0, 0.5),
        ]);

        let mut calls = 0;
        let choice = select_attack(&catalog, &ctx(2.0, 0.0), || {
            calls += 1;
            false
        })
        .expect("choice");
        assert_eq!(choice.attack, AttackId(2));
        assert_eq!(calls, 1);

        let mut calls = 0;
        let _ = select_attack(&pair(), &ctx(2.0, 0.0), || {
            calls += 1;
            true
        });
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_zero_weight_or_empty_catalog_selects_nothing() {
        let catalog = AttackCatalog::new(vec![AttackDescriptor::new(
            "idle",
            AnimTrigger::new("I"),
            0.0,
            5.0,
            1.0,
            0.0,
        )]);
        assert!(select_attack(&catalog, &ctx(1.0, 0.0), || true).is_none());
        assert!(select_attack(&AttackCatalog::default(), &ctx(1.0, 0.0), || true).is_none());
    }
}
