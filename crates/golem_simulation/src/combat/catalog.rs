//! Ordered attack catalog (arena of descriptors).

use serde::{Deserialize, Serialize};

use super::attack::{AttackDescriptor, AttackId};
use crate::ai::error::ConfigError;

/// Ordered attack list. Catalog order is the tie-breaker during selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttackCatalog {
    attacks: Vec<AttackDescriptor>,
}

impl AttackCatalog {
    pub fn new(attacks: Vec<AttackDescriptor>) -> Self {
        Self { attacks }
    }

    /// Parse a JSON array of descriptors and validate every entry.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let catalog: AttackCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.attacks.iter().try_for_each(AttackDescriptor::validate)
    }

    pub fn push(&mut self, attack: AttackDescriptor) -> AttackId {
        self.attacks.push(attack);
        AttackId(self.attacks.len() - 1)
    }

    pub fn get(&self, id: AttackId) -> Option<&AttackDescriptor> {
        self.attacks.get(id.0)
    }

    pub fn get_mut(&mut self, id: AttackId) -> Option<&mut AttackDescriptor> {
        self.attacks.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<AttackId> {
        self.attacks.iter().position(|a| a.name == name).map(AttackId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttackId, &AttackDescriptor)> {
        self.attacks.iter().enumerate().map(|(i, a)| (AttackId(i), a))
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimTrigger;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut catalog = AttackCatalog::default();
        let a = catalog.push(AttackDescriptor::new("a", AnimTrigger::new("A"), 0.0, 3.0, 2.0, 1.0));
        let b = catalog.push(AttackDescriptor::new("b", AnimTrigger::new("B"), 2.0, 6.0, 5.0, 2.0));

        assert_eq!(a, AttackId(0));
        assert_eq!(b, AttackId(1));
        assert_eq!(catalog.find("b"), Some(b));
        assert_eq!(catalog.find("c"), None);
        assert_eq!(catalog.get(a).map(|d| d.name.as_str()), Some("a"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "name": "slam", "trigger": "Attack01", "min_range": 0.0, "max_range": 3.0,
              "cooldown": 3.0, "weight": 1.0 },
            { "name": "leap", "trigger": "Leap", "min_range": 4.0, "max_range": 8.0,
              "cooldown": 6.0, "weight": 1.5, "requires_los": true,
              "required_facing_dot": 0.5,
              "distance_curve": { "Linear": { "start": 0.5, "end": 1.0 } } }
        ]"#;

        let catalog = AttackCatalog::from_json_str(json).expect("valid catalog");
        assert_eq!(catalog.len(), 2);

        let leap = catalog.get(AttackId(1)).expect("leap");
        assert!(leap.requires_los);
        assert_eq!(leap.trigger.as_str(), "Leap");
        assert_eq!(leap.last_used, None);
        assert_eq!(catalog.get(AttackId(0)).map(|a| a.required_facing_dot), Some(0.0));
    }

    #[test]
    fn test_from_json_rejects_invalid_attack() {
        let json = r#"[{ "name": "broken", "trigger": "X", "min_range": 5.0, "max_range": 1.0,
                         "cooldown": 1.0, "weight": 1.0 }]"#;
        assert!(matches!(
            AttackCatalog::from_json_str(json),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(matches!(AttackCatalog::from_json_str("not json"), Err(ConfigError::Parse(_))));
    }
}
