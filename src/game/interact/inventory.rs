//! Player inventory: keys for locked doors.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    pub id: String,
    /// Remaining uses; `None` never runs out
    pub uses: Option<u32>,
}

impl Key {
    pub fn new(id: &str, uses: Option<u32>) -> Self {
        Self {
            id: id.to_string(),
            uses,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.uses == Some(0)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inventory {
    keys: Vec<Key>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_key(&mut self, key: Key) {
        self.keys.push(key);
    }

    pub fn find_key(&self, id: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.id == id && !k.is_spent())
    }

    pub fn has_key(&self, id: &str) -> bool {
        self.find_key(id).is_some()
    }

    /// Spend one use of the key. Spent keys are dropped.
    pub fn use_key(&mut self, id: &str) -> bool {
        let Some(index) = self.keys.iter().position(|k| k.id == id && !k.is_spent()) else {
            return false;
        };
        if let Some(uses) = self.keys[index].uses.as_mut() {
            *uses -= 1;
        }
        if self.keys[index].is_spent() {
            let key = self.keys.remove(index);
            tracing::debug!(key = %key.id, "key used up");
        }
        true
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_use_key_is_removed() {
        let mut inventory = Inventory::new();
        inventory.add_key(Key::new("shed", Some(1)));
        assert!(inventory.use_key("shed"));
        assert!(!inventory.has_key("shed"));
        assert!(!inventory.use_key("shed"));
        assert!(inventory.keys().is_empty());
    }

    #[test]
    fn test_unlimited_key_stays() {
        let mut inventory = Inventory::new();
        inventory.add_key(Key::new("master", None));
        assert!(inventory.use_key("master"));
        assert!(inventory.use_key("master"));
        assert!(inventory.has_key("master"));
        assert!(!inventory.has_key("shed"));
    }
}
