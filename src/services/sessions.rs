// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Server-side session store.
//!
//! The browser only ever holds an opaque random token. The store keys
//! entries by the SHA-256 of that token, so the map never contains a value
//! that could be replayed as a cookie.
//!
//! Expiry is sliding: every successful lookup renews the entry for another
//! TTL. Expired entries are dropped when looked up and by a periodic sweep.

use crate::models::User;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, thiserror::Error)]
#[error("Failed to generate session token")]
pub struct TokenGenerationError;

struct SessionEntry {
    /// Snapshot taken at login; not refreshed if the user row changes.
    user: Arc<User>,
    expires_at: Instant,
}

/// Concurrent in-memory session store with sliding expiration.
#[derive(Clone)]
pub struct SessionManager {
    entries: Arc<DashMap<String, SessionEntry>>,
    ttl: Duration,
    rng: SystemRandom,
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
            rng: SystemRandom::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for `user` and return the token for the cookie.
    pub fn create(&self, user: User) -> Result<String, TokenGenerationError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| TokenGenerationError)?;
        let token = URL_SAFE_NO_PAD.encode(bytes);

        tracing::debug!(user_id = user.id, "Session created");

        self.entries.insert(
            token_key(&token),
            SessionEntry {
                user: Arc::new(user),
                expires_at: Instant::now() + self.ttl,
            },
        );

        Ok(token)
    }

    /// Resolve a token to its user, renewing the session.
    pub fn get(&self, token: &str) -> Option<Arc<User>> {
        let key = token_key(token);
        let now = Instant::now();

        if let Some(mut entry) = self.entries.get_mut(&key) {
            if entry.expires_at > now {
                entry.expires_at = now + self.ttl;
                return Some(Arc::clone(&entry.user));
            }
        } else {
            return None;
        }

        // Expired: the shard guard above is released before removing.
        self.entries.remove_if(&key, |_, entry| entry.expires_at <= now);
        tracing::debug!("Expired session evicted on lookup");
        None
    }

    /// End a session. Unknown or already-destroyed tokens are a no-op.
    pub fn destroy(&self, token: &str) {
        if self.entries.remove(&token_key(token)).is_some() {
            tracing::debug!("Session destroyed");
        }
    }

    /// Drop every expired entry and return how many went.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before.saturating_sub(self.entries.len())
    }

    /// Number of live (possibly expired but not yet swept) sessions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Periodically purge expired sessions until the handle is aborted.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let sessions = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let purged = sessions.purge_expired();
                if purged > 0 {
                    tracing::info!(purged, remaining = sessions.len(), "Swept expired sessions");
                }
            }
        })
    }
}

fn token_key(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            nombre: "Ana".to_string(),
            direccion: "Calle 1".to_string(),
            telefono: "555-0101".to_string(),
            correo: "ana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let token = sessions.create(user()).unwrap();

        let found = sessions.get(&token).expect("session should exist");
        assert_eq!(found.id, 7);
        assert!(sessions.get("not-a-token").is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique_and_opaque() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let a = sessions.create(user()).unwrap();
        let b = sessions.create(user()).unwrap();

        assert_ne!(a, b);
        assert!(!a.contains("ana"));
        assert_eq!(a.len(), 43); // 32 bytes, unpadded base64
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let token = sessions.create(user()).unwrap();

        sessions.destroy(&token);
        sessions.destroy(&token);
        sessions.destroy("never-existed");

        assert!(sessions.get(&token).is_none());
        assert!(sessions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expires_after_ttl() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let token = sessions.create(user()).unwrap();

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(sessions.get(&token).is_none());
        assert!(sessions.is_empty(), "expired entry is evicted on lookup");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_slides_on_access() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let token = sessions.create(user()).unwrap();

        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(45)).await;
            assert!(sessions.get(&token).is_some());
        }

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(sessions.get(&token).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let stale = sessions.create(user()).unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;
        let fresh = sessions.create(user()).unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(sessions.purge_expired(), 1);
        assert!(sessions.get(&stale).is_none());
        assert!(sessions.get(&fresh).is_some());
    }

    async fn let_sweeper_run() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_idle_sessions() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        sessions.create(user()).unwrap();
        let sweeper = sessions.spawn_sweeper(Duration::from_secs(10));

        tokio::time::advance(Duration::from_secs(30)).await;
        let_sweeper_run().await;
        assert_eq!(sessions.len(), 1, "live session survives a sweep");

        // Past the TTL plus one sweep interval, with no lookups at all.
        tokio::time::advance(Duration::from_secs(45)).await;
        let_sweeper_run().await;
        assert!(sessions.is_empty());

        sweeper.abort();
    }

    #[tokio::test]
    async fn test_snapshot_is_not_live() {
        let sessions = SessionManager::new(Duration::from_secs(60));
        let mut original = user();
        let token = sessions.create(original.clone()).unwrap();

        original.nombre = "Ana María".to_string();

        assert_eq!(sessions.get(&token).unwrap().nombre, "Ana");
    }

    #[tokio::test]
    async fn test_concurrent_create_and_destroy() {
        let sessions = SessionManager::new(Duration::from_secs(60));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let sessions = sessions.clone();
                tokio::spawn(async move {
                    let token = sessions.create(user()).unwrap();
                    assert!(sessions.get(&token).is_some());
                    sessions.destroy(&token);
                    sessions.destroy(&token);
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert!(sessions.is_empty());
    }
}
