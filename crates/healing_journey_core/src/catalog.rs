//! crates/healing_journey_core/src/catalog.rs
//!
//! The therapy catalog for one language: exactly one record per category key.

use crate::domain::{CategoryKey, TherapyRecord};

/// One treatment per category.
///
/// Every category is a named field, so adding a category without giving it a
/// record in each language fails to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapyCatalog {
    pub energy_reset: TherapyRecord,
    pub jetlag_recovery: TherapyRecord,
    pub silent_healing: TherapyRecord,
    pub couple_healing: TherapyRecord,
    pub default: TherapyRecord,
}

impl TherapyCatalog {
    pub fn get(&self, key: CategoryKey) -> &TherapyRecord {
        match key {
            CategoryKey::EnergyReset => &self.energy_reset,
            CategoryKey::JetlagRecovery => &self.jetlag_recovery,
            CategoryKey::SilentHealing => &self.silent_healing,
            CategoryKey::CoupleHealing => &self.couple_healing,
            CategoryKey::Default => &self.default,
        }
    }

    /// Looks up a possibly unset key. Never fails: no key means the default record.
    pub fn lookup(&self, key: Option<CategoryKey>) -> &TherapyRecord {
        self.get(key.unwrap_or_default())
    }

    /// Looks up a raw key string; unknown keys resolve to the default record.
    pub fn lookup_str(&self, key: &str) -> &TherapyRecord {
        self.get(CategoryKey::from_key_lossy(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, &TherapyRecord)> {
        CategoryKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{CategoryKey, Language};
    use crate::localization::LocalizationStore;

    #[test]
    fn every_key_resolves_in_every_language() {
        let store = LocalizationStore::new();
        for lang in Language::ALL {
            let catalog = &store.get(lang).therapies;
            for (key, record) in catalog.iter() {
                assert!(!record.name.is_empty(), "{key} in {lang} has no name");
                assert!(
                    record.booking_url.starts_with("https://"),
                    "{key} in {lang} has no booking url"
                );
            }
            assert_eq!(catalog.iter().count(), CategoryKey::ALL.len());
        }
    }

    #[test]
    fn unset_and_unknown_keys_fall_back_to_default() {
        let store = LocalizationStore::new();
        let catalog = &store.get(Language::En).therapies;
        assert_eq!(catalog.lookup(None), &catalog.default);
        assert_eq!(catalog.lookup_str("hot-tub"), &catalog.default);
        assert_eq!(
            catalog.lookup(Some(CategoryKey::CoupleHealing)),
            &catalog.couple_healing
        );
    }

    #[test]
    fn booking_urls_are_shared_across_languages() {
        let store = LocalizationStore::new();
        let en = &store.get(Language::En).therapies;
        let vi = &store.get(Language::Vi).therapies;
        for key in CategoryKey::ALL {
            assert_eq!(en.get(key).booking_url, vi.get(key).booking_url);
            assert_ne!(en.get(key).name, vi.get(key).name);
        }
    }
}
