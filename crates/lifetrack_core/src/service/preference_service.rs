//! Theme preference persisted under `lifetrack_theme`.

use crate::store::{Storage, StorageKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub struct PreferenceService<'s> {
    store: &'s Storage,
}

impl<'s> PreferenceService<'s> {
    pub fn new(store: &'s Storage) -> Self {
        Self { store }
    }

    /// Stored theme; `Light` when unset or unreadable.
    pub fn theme(&self) -> Theme {
        self.store.get(StorageKey::Theme).unwrap_or_default()
    }

    /// Returns whether the preference was written.
    pub fn set_theme(&self, theme: Theme) -> bool {
        self.store.set(StorageKey::Theme, &theme)
    }
}
