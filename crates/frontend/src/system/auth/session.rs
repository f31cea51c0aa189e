//! The single owner of client-side credentials.
//!
//! Every read, write and clear of the token pair goes through `Session`.
//! A 401 anywhere calls `invalidate`, which clears the credentials and fires
//! the unauthorized hook once per login, however many requests fail together.

use super::claims::decode_claims;
use super::storage::{CredentialStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use contracts::system::auth::{TokenClaims, TokenPair};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type Hook = Arc<dyn Fn() + Send + Sync>;

struct SessionInner {
    store: Box<dyn CredentialStore>,
    /// True while a login is live; flipped off by the first invalidation
    active: AtomicBool,
    on_unauthorized: Mutex<Option<Hook>>,
}

#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new(store: impl CredentialStore + 'static) -> Self {
        let active = store.get(ACCESS_TOKEN_KEY).is_some();
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                active: AtomicBool::new(active),
                on_unauthorized: Mutex::new(None),
            }),
        }
    }

    /// Called when a stored login is invalidated by the server.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.inner.on_unauthorized.lock() {
            *slot = Some(Arc::new(hook));
        }
    }

    pub fn save_tokens(&self, tokens: &TokenPair) {
        self.inner.store.set(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.inner.store.set(REFRESH_TOKEN_KEY, &tokens.refresh_token);
        self.inner.active.store(true, Ordering::SeqCst);
    }

    /// Replace only the access token (after a refresh that does not rotate).
    pub fn save_access_token(&self, token: &str) {
        self.inner.store.set(ACCESS_TOKEN_KEY, token);
        self.inner.active.store(true, Ordering::SeqCst);
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.store.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.store.get(REFRESH_TOKEN_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        let token = self.access_token()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                log::warn!("Stored access token is unreadable: {}", e);
                None
            }
        }
    }

    /// True when there is no usable access token at `now_secs`.
    pub fn is_access_expired(&self, now_secs: i64) -> bool {
        self.claims()
            .map(|c| c.is_expired_at(now_secs))
            .unwrap_or(true)
    }

    pub fn has_role(&self, role_id: i64) -> bool {
        self.claims().and_then(|c| c.role_id) == Some(role_id)
    }

    /// Local sign-out: logout button, idle timeout, tab hidden, page unload.
    pub fn clear(&self) {
        self.inner.store.remove(ACCESS_TOKEN_KEY);
        self.inner.store.remove(REFRESH_TOKEN_KEY);
        self.inner.active.store(false, Ordering::SeqCst);
    }

    /// Server rejected the credentials. Returns true for the invalidation
    /// that ended the login (and fired the hook), false for later ones.
    pub fn invalidate(&self) -> bool {
        self.inner.store.remove(ACCESS_TOKEN_KEY);
        self.inner.store.remove(REFRESH_TOKEN_KEY);
        if !self.inner.active.swap(false, Ordering::SeqCst) {
            return false;
        }
        log::info!("Session invalidated by the server");
        let hook = self
            .inner
            .on_unauthorized
            .lock()
            .ok()
            .and_then(|slot| slot.clone());
        if let Some(hook) = hook {
            hook();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::claims::make_token;
    use crate::system::auth::storage::MemoryStore;
    use std::sync::atomic::AtomicUsize;

    fn tokens() -> TokenPair {
        TokenPair {
            access_token: make_token(r#"{"exp": 2000, "roleId": 1, "userId": 5}"#),
            refresh_token: "refresh".into(),
        }
    }

    #[test]
    fn test_save_read_clear() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_authenticated());
        session.save_tokens(&tokens());
        assert!(session.is_authenticated());
        assert_eq!(session.refresh_token().as_deref(), Some("refresh"));
        assert_eq!(session.claims().and_then(|c| c.user_id), Some(5));
        assert!(session.has_role(1));
        session.clear();
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn test_expiry() {
        let session = Session::new(MemoryStore::new());
        assert!(session.is_access_expired(0));
        session.save_tokens(&tokens());
        assert!(!session.is_access_expired(1999));
        assert!(session.is_access_expired(2000));
    }

    #[test]
    fn test_concurrent_unauthorized_fires_hook_once() {
        let session = Session::new(MemoryStore::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        session.set_unauthorized_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        session.save_tokens(&tokens());

        assert!(session.invalidate());
        assert!(!session.invalidate());
        assert!(!session.invalidate());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!session.is_authenticated());

        // A new login re-arms the hook
        session.save_tokens(&tokens());
        assert!(session.invalidate());
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_local_clear_does_not_fire_hook() {
        let session = Session::new(MemoryStore::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        session.set_unauthorized_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        session.save_tokens(&tokens());
        session.clear();
        assert!(!session.invalidate());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_restores_active_from_store() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "x.y.z");
        let session = Session::new(store);
        assert!(session.invalidate());
    }
}
