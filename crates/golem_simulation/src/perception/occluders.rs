//! Headless occlusion world: static axis-aligned boxes.

use std::sync::Arc;

use bevy::prelude::*;

use super::OcclusionQuery;

/// Static AABB occluder on a single layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxOccluder {
    pub min: Vec3,
    pub max: Vec3,
    pub layer: u32,
    /// Trigger-only volumes never block sight.
    pub is_trigger: bool,
}

impl BoxOccluder {
    pub fn new(a: Vec3, b: Vec3, layer: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            layer,
            is_trigger: false,
        }
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Slab test: does the ray `origin + dir * t` hit the box for some t ∈ [0, max_t]?
    fn intersects(&self, origin: Vec3, dir: Vec3, max_t: f32) -> bool {
        let mut t_near = 0.0_f32;
        let mut t_far = max_t;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < 1e-6 {
                // параллельно слэбу — либо внутри, либо промах
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return false;
            }
        }

        true
    }
}

/// Shared, immutable set of occluders. Cheap to clone per actor.
#[derive(Debug, Clone, Default)]
pub struct OccluderSet {
    boxes: Arc<Vec<BoxOccluder>>,
}

impl OccluderSet {
    pub fn new(boxes: Vec<BoxOccluder>) -> Self {
        Self {
            boxes: Arc::new(boxes),
        }
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl OcclusionQuery for OccluderSet {
    fn raycast_blocked(&self, from: Vec3, to: Vec3, max_distance: f32, block_mask: u32) -> bool {
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return false;
        }

        let dir = delta / length;
        let max_t = length.min(max_distance);

        self.boxes
            .iter()
            .filter(|b| !b.is_trigger && b.layer & block_mask != 0)
            .any(|b| b.intersects(from, dir, max_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::LAYER_ENVIRONMENT;

    fn pillar() -> BoxOccluder {
        BoxOccluder::new(Vec3::new(1.0, 0.0, -1.0), Vec3::new(2.0, 3.0, 1.0), LAYER_ENVIRONMENT)
    }

    #[test]
    fn test_segment_through_box() {
        let set = OccluderSet::new(vec![pillar()]);
        assert!(set.raycast_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 1.0, 0.0), 10.0, LAYER_ENVIRONMENT));
    }

    #[test]
    fn test_segment_stops_short() {
        let set = OccluderSet::new(vec![pillar()]);
        assert!(!set.raycast_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.5, 1.0, 0.0), 10.0, LAYER_ENVIRONMENT));
        // max_distance обрезает луч раньше стены
        assert!(!set.raycast_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 1.0, 0.0), 0.5, LAYER_ENVIRONMENT));
    }

    #[test]
    fn test_segment_passes_over() {
        let set = OccluderSet::new(vec![pillar()]);
        assert!(!set.raycast_blocked(Vec3::new(0.0, 5.0, 0.0), Vec3::new(4.0, 5.0, 0.0), 10.0, LAYER_ENVIRONMENT));
    }

    #[test]
    fn test_corners_are_normalized() {
        let flipped = BoxOccluder::new(Vec3::new(2.0, 3.0, 1.0), Vec3::new(1.0, 0.0, -1.0), LAYER_ENVIRONMENT);
        assert_eq!(flipped, pillar());
    }
}
