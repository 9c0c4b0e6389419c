//! Cookie consent banner state

use std::collections::HashMap;

use tracing::warn;

/// Key-value persistence the consent flag lives in (`localStorage` on the page)
pub trait ConsentStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// Value written when the visitor accepts
pub const ACCEPTED_VALUE: &str = "true";

pub struct Consent<S: ConsentStore> {
    store: S,
    key: String,
}

impl<S: ConsentStore> Consent<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Any non-empty stored value counts as accepted.
    pub fn needs_prompt(&self) -> bool {
        self.store
            .get(&self.key)
            .map_or(true, |value| value.is_empty())
    }

    /// Persist acceptance. A storage failure is logged; the banner still closes.
    pub fn accept(&mut self) {
        if let Err(e) = self.store.set(&self.key, ACCEPTED_VALUE) {
            warn!(key = %self.key, error = %e, "Could not persist cookie consent");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// In-memory store. Acceptance lasts for the current page session only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl ConsentStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The page's persistent store, or a session-only [`MemoryStore`] when
/// persistent storage is unavailable
#[derive(Debug, Clone)]
pub enum PageStore<S> {
    Persistent(S),
    Session(MemoryStore),
}

impl<S> PageStore<S> {
    pub fn or_session(store: Option<S>) -> Self {
        match store {
            Some(store) => PageStore::Persistent(store),
            None => PageStore::Session(MemoryStore::default()),
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, PageStore::Persistent(_))
    }
}

impl<S: ConsentStore> ConsentStore for PageStore<S> {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            PageStore::Persistent(store) => store.get(key),
            PageStore::Session(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match self {
            PageStore::Persistent(store) => store.set(key, value),
            PageStore::Session(store) => store.set(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl ConsentStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), String> {
            Err("QuotaExceededError".to_string())
        }
    }

    #[test]
    fn test_first_visit_prompts() {
        let consent = Consent::new(MemoryStore::default(), "cookiesAccepted");
        assert!(consent.needs_prompt());
    }

    #[test]
    fn test_accept_persists() {
        let mut consent = Consent::new(MemoryStore::default(), "cookiesAccepted");
        consent.accept();
        assert!(!consent.needs_prompt());
        assert_eq!(
            consent.store().get("cookiesAccepted").as_deref(),
            Some(ACCEPTED_VALUE)
        );

        // A later page load sees the same store
        let store = consent.store().clone();
        assert!(!Consent::new(store, "cookiesAccepted").needs_prompt());
    }

    #[test]
    fn test_empty_value_still_prompts() {
        let mut store = MemoryStore::default();
        store.set("cookiesAccepted", "").unwrap();
        assert!(Consent::new(store, "cookiesAccepted").needs_prompt());
    }

    #[test]
    fn test_any_value_counts_as_accepted() {
        let mut store = MemoryStore::default();
        store.set("cookiesAccepted", "false").unwrap();
        assert!(!Consent::new(store, "cookiesAccepted").needs_prompt());
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let mut consent = Consent::new(ReadOnlyStore, "cookiesAccepted");
        consent.accept();
        assert!(consent.needs_prompt());
    }

    #[test]
    fn test_missing_storage_falls_back_to_session() {
        let store = PageStore::<ReadOnlyStore>::or_session(None);
        assert!(!store.is_persistent());

        let mut consent = Consent::new(store, "cookiesAccepted");
        assert!(consent.needs_prompt());
        consent.accept();
        // Accepted for the rest of this page session
        assert!(!consent.needs_prompt());
    }

    #[test]
    fn test_persistent_store_is_used_when_present() {
        let mut backing = MemoryStore::default();
        backing.set("cookiesAccepted", "true").unwrap();
        let store = PageStore::or_session(Some(backing));
        assert!(store.is_persistent());
        assert!(!Consent::new(store, "cookiesAccepted").needs_prompt());

        // A failing persistent store is not swapped for the session one
        let mut consent = Consent::new(PageStore::or_session(Some(ReadOnlyStore)), "cookiesAccepted");
        consent.accept();
        assert!(consent.needs_prompt());
    }
}
