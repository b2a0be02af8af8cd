//! Player progression: orb balance and skin unlocks
//!
//! Persisted as a flat JSON record. The simulation only reports rewards;
//! applying them and running the shop happens here.

use serde::{Deserialize, Serialize};

use crate::shop::{self, DEFAULT_SKIN_ID};

/// Result of a shop interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopOutcome {
    /// Already owned; now equipped
    Equipped,
    /// Bought and auto-equipped
    Purchased,
    /// Not enough orbs, nothing changed
    InsufficientOrbs,
    /// Id not in the catalog, nothing changed
    UnknownItem,
}

/// Persistent progression record
///
/// Missing fields in a stored record take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progression {
    pub orbs: u32,
    pub unlocked_skins: Vec<String>,
    pub equipped_skin: String,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            orbs: 0,
            unlocked_skins: vec![DEFAULT_SKIN_ID.to_string()],
            equipped_skin: DEFAULT_SKIN_ID.to_string(),
        }
    }
}

impl Progression {
    pub fn owns(&self, id: &str) -> bool {
        self.unlocked_skins.iter().any(|s| s == id)
    }

    /// Color of the equipped skin (catalog lookup)
    pub fn equipped_color(&self) -> &'static str {
        shop::skin_color(&self.equipped_skin)
    }

    /// Credit orbs earned by a finished run
    pub fn apply_reward(&mut self, orbs: u32) {
        if orbs == 0 {
            return;
        }
        self.orbs = self.orbs.saturating_add(orbs);
        log::info!("Earned {} orbs (balance {})", orbs, self.orbs);
    }

    /// Equip an owned skin, or buy (and equip) an affordable one
    pub fn buy_or_equip(&mut self, id: &str) -> ShopOutcome {
        if self.owns(id) {
            self.equipped_skin = id.to_string();
            return ShopOutcome::Equipped;
        }

        let Some(item) = shop::find_item(id) else {
            return ShopOutcome::UnknownItem;
        };
        if self.orbs < item.price {
            return ShopOutcome::InsufficientOrbs;
        }

        self.orbs -= item.price;
        self.unlocked_skins.push(item.id.to_string());
        self.equipped_skin = item.id.to_string();
        log::info!("Purchased skin '{}' for {} orbs", item.id, item.price);
        ShopOutcome::Purchased
    }

    /// Repair invariants after loading untrusted data.
    ///
    /// Returns true if anything had to change.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        if !self.owns(DEFAULT_SKIN_ID) {
            self.unlocked_skins.insert(0, DEFAULT_SKIN_ID.to_string());
            changed = true;
        }
        let before = self.unlocked_skins.len();
        let mut seen: Vec<String> = Vec::with_capacity(before);
        self.unlocked_skins.retain(|s| {
            if seen.contains(s) {
                false
            } else {
                seen.push(s.clone());
                true
            }
        });
        changed |= self.unlocked_skins.len() != before;
        if !self.owns(&self.equipped_skin) {
            self.equipped_skin = DEFAULT_SKIN_ID.to_string();
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let p = Progression::default();
        assert_eq!(p.orbs, 0);
        assert!(p.owns(DEFAULT_SKIN_ID));
        assert_eq!(p.equipped_skin, DEFAULT_SKIN_ID);
        assert_eq!(p.equipped_color(), shop::DEFAULT_SKIN_COLOR);
    }

    #[test]
    fn test_buy_with_enough_orbs() {
        let mut p = Progression {
            orbs: 60,
            ..Default::default()
        };
        assert_eq!(p.buy_or_equip("crimson"), ShopOutcome::Purchased);
        assert_eq!(p.orbs, 10);
        assert!(p.owns("crimson"));
        assert_eq!(p.equipped_skin, "crimson");
    }

    #[test]
    fn test_buy_insufficient_orbs_changes_nothing() {
        let mut p = Progression {
            orbs: 49,
            ..Default::default()
        };
        let before = p.clone();
        assert_eq!(p.buy_or_equip("crimson"), ShopOutcome::InsufficientOrbs);
        assert_eq!(p, before);
    }

    #[test]
    fn test_equip_owned_is_free() {
        let mut p = Progression {
            orbs: 5,
            unlocked_skins: vec!["default".into(), "gold".into()],
            equipped_skin: "gold".into(),
        };
        assert_eq!(p.buy_or_equip("default"), ShopOutcome::Equipped);
        assert_eq!(p.orbs, 5);
        assert_eq!(p.equipped_skin, "default");
    }

    #[test]
    fn test_unknown_item() {
        let mut p = Progression {
            orbs: 10_000,
            ..Default::default()
        };
        assert_eq!(p.buy_or_equip("rainbow"), ShopOutcome::UnknownItem);
        assert_eq!(p.orbs, 10_000);
    }

    #[test]
    fn test_apply_reward() {
        let mut p = Progression::default();
        p.apply_reward(30);
        p.apply_reward(0);
        assert_eq!(p.orbs, 30);
    }

    #[test]
    fn test_sanitize_repairs_invariants() {
        let mut p = Progression {
            orbs: 3,
            unlocked_skins: vec!["gold".into(), "gold".into()],
            equipped_skin: "void".into(),
        };
        assert!(p.sanitize());
        assert_eq!(p.unlocked_skins, vec!["default".to_string(), "gold".to_string()]);
        assert_eq!(p.equipped_skin, "default");
        assert!(!p.sanitize());
    }

    #[test]
    fn test_serde_layout() {
        let json = serde_json::to_string(&Progression::default()).unwrap();
        assert_eq!(
            json,
            r#"{"orbs":0,"unlockedSkins":["default"],"equippedSkin":"default"}"#
        );
    }

    #[test]
    fn test_partial_record_merges_defaults() {
        let p: Progression = serde_json::from_str(r#"{"orbs":42}"#).unwrap();
        assert_eq!(p.orbs, 42);
        assert_eq!(p.unlocked_skins, vec!["default".to_string()]);
        assert_eq!(p.equipped_skin, "default");
    }
}
