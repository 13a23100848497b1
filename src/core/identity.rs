use std::fmt;

use tracing::{info, warn};
use uuid::Uuid;

use super::local_store::{LocalStore, USER_ID_KEY};
use crate::shared::error::AppResult;

/// Anonymous per-install user id, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity(String);

impl UserIdentity {
    /// Reads the persisted id, or creates and persists a fresh UUID v4.
    pub fn resolve(store: &dyn LocalStore) -> AppResult<Self> {
        if let Some(existing) = store.get(USER_ID_KEY)? {
            let existing = existing.trim();
            if !existing.is_empty() {
                return Ok(Self(existing.to_string()));
            }
            warn!("[Identity] Stored user id is blank, replacing it");
        }

        let id = Uuid::new_v4().to_string();
        store.set(USER_ID_KEY, &id)?;
        info!("[Identity] Created new user id");
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserIdentity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::local_store::MemoryLocalStore;

    #[test]
    fn test_resolve_creates_once_and_reuses() {
        let store = MemoryLocalStore::new();
        let first = UserIdentity::resolve(&store).unwrap();
        assert!(Uuid::parse_str(first.as_str()).is_ok());

        let second = UserIdentity::resolve(&store).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.get(USER_ID_KEY).unwrap().as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_resolve_replaces_blank_id() {
        let store = MemoryLocalStore::new();
        store.set(USER_ID_KEY, "  ").unwrap();
        let identity = UserIdentity::resolve(&store).unwrap();
        assert!(Uuid::parse_str(identity.as_str()).is_ok());
    }
}
