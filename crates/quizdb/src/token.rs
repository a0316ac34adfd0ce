//! Refresh-token bookkeeping.
//!
//! Issued refresh tokens are remembered together with the user they were
//! issued to, so a refresh request can be rejected when the token was never
//! issued here or has been revoked. The store is passed to whoever needs it;
//! tests get a fresh one instead of sharing process-wide state.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Storage for issued refresh tokens, keyed by the token string.
pub trait RefreshTokenStore: Send + Sync {
    /// User the token was issued to, if it is known.
    fn get(&self, token: &str) -> Option<i64>;

    /// Remember `token` as issued to `user_id`, replacing any previous owner.
    fn put(&self, token: String, user_id: i64);

    /// Forget `token`. Returns whether it was known.
    fn delete(&self, token: &str) -> bool;

    /// Whether `token` is known and was issued to `user_id`.
    fn verify(&self, token: &str, user_id: i64) -> bool {
        self.get(token) == Some(user_id)
    }
}

/// In-memory [`RefreshTokenStore`]. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    tokens: Arc<RwLock<HashMap<String, i64>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RefreshTokenStore for MemoryTokenStore {
    fn get(&self, token: &str) -> Option<i64> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .copied()
    }

    fn put(&self, token: String, user_id: i64) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token, user_id);
    }

    fn delete(&self, token: &str) -> bool {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }
}

impl<S: RefreshTokenStore + ?Sized> RefreshTokenStore for Arc<S> {
    fn get(&self, token: &str) -> Option<i64> {
        (**self).get(token)
    }

    fn put(&self, token: String, user_id: i64) {
        (**self).put(token, user_id)
    }

    fn delete(&self, token: &str) -> bool {
        (**self).delete(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_requires_matching_user() {
        let store = MemoryTokenStore::new();
        store.put("tok".into(), 1);
        assert!(store.verify("tok", 1));
        assert!(!store.verify("tok", 2));
        assert!(!store.verify("other", 1));
    }

    #[test]
    fn delete_revokes() {
        let store = MemoryTokenStore::new();
        store.put("tok".into(), 1);
        assert!(store.delete("tok"));
        assert!(!store.delete("tok"));
        assert_eq!(store.get("tok"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_state_but_new_stores_do_not() {
        let a = MemoryTokenStore::new();
        let b = a.clone();
        a.put("tok".into(), 9);
        assert_eq!(b.get("tok"), Some(9));
        assert_eq!(MemoryTokenStore::new().get("tok"), None);
    }

    #[test]
    fn usable_as_trait_object() {
        let store: Arc<dyn RefreshTokenStore> = Arc::new(MemoryTokenStore::new());
        store.put("tok".into(), 3);
        assert!(store.verify("tok", 3));
    }
}
