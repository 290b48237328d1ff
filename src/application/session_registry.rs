//! SessionRegistry - Owns the live state of every support session.
//!
//! Each `(UserId, SessionId)` maps to its own `Mutex<SupportSession>`.
//! Callers lock a session only for synchronous work and never across an
//! `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, TryLockError};

use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::planning::Locale;
use crate::domain::support::SupportSession;
use crate::ports::SupportRepository;

/// Seconds without a turn after which a session may be evicted.
pub const DEFAULT_IDLE_TTL_SECS: u64 = 3600;

/// Upper bound on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Key of one live session.
pub type SessionKey = (UserId, SessionId);

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<SupportSession>>;

/// Locks a session, recovering the state if a previous holder panicked.
pub fn lock_session(handle: &SessionHandle) -> MutexGuard<'_, SupportSession> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registry of live sessions.
///
/// Bounded by `max_sessions`. When full, idle sessions are dropped first,
/// then the least recently active one.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionKey, SessionHandle>>,
    repository: Option<Arc<dyn SupportRepository>>,
    locale: Locale,
    idle_ttl_secs: u64,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(locale: Locale, repository: Option<Arc<dyn SupportRepository>>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            repository,
            locale,
            idle_ttl_secs: DEFAULT_IDLE_TTL_SECS,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_limits(mut self, idle_ttl_secs: u64, max_sessions: usize) -> Self {
        self.idle_ttl_secs = idle_ttl_secs;
        self.max_sessions = max_sessions.max(1);
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the session if it is live.
    pub fn get(&self, user_id: &UserId, session_id: &SessionId) -> Option<SessionHandle> {
        let sessions = self.sessions.read().unwrap_or_else(|p| p.into_inner());
        sessions.get(&(user_id.clone(), *session_id)).cloned()
    }

    /// Builds a session hydrated from the user's persisted turns without
    /// registering it. A failing repository leaves the memory empty.
    pub async fn load_session(&self, user_id: &UserId, session_id: &SessionId) -> SupportSession {
        let turns = match &self.repository {
            Some(repository) => match repository.load_conversations(user_id).await {
                Ok(turns) => turns,
                Err(e) => {
                    tracing::warn!(
                        user_id = %user_id,
                        error = %e,
                        "Failed to load conversation history, starting empty"
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut session = SupportSession::new(user_id.clone(), *session_id, self.locale);
        session.hydrate(&turns);
        session
    }

    /// Returns the live session, creating and hydrating it first if needed.
    pub async fn get_or_create(&self, user_id: &UserId, session_id: &SessionId) -> SessionHandle {
        if let Some(handle) = self.get(user_id, session_id) {
            return handle;
        }

        let session = self.load_session(user_id, session_id).await;
        let hydrated_turns = session.memory().exchange_count();

        let key = (user_id.clone(), *session_id);
        let mut sessions = self.sessions.write().unwrap_or_else(|p| p.into_inner());
        if !sessions.contains_key(&key) && sessions.len() >= self.max_sessions {
            self.make_room(&mut sessions, Timestamp::now());
        }
        let handle = sessions.entry(key).or_insert_with(|| {
            tracing::debug!(
                user_id = %user_id,
                session_id = %session_id,
                hydrated_turns,
                "Created support session"
            );
            Arc::new(Mutex::new(session))
        });
        Arc::clone(handle)
    }

    /// Drops sessions with no turn within the idle TTL. Returns how many.
    pub fn evict_idle(&self, now: Timestamp) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(|p| p.into_inner());
        self.evict_idle_locked(&mut sessions, now)
    }

    fn evict_idle_locked(&self, sessions: &mut HashMap<SessionKey, SessionHandle>, now: Timestamp) -> usize {
        let cutoff = now.plus_secs(-i64::try_from(self.idle_ttl_secs).unwrap_or(i64::MAX));
        let before = sessions.len();
        sessions.retain(|_, handle| match last_active(handle) {
            Some(last) => !last.is_before(&cutoff),
            // busy with a turn right now
            None => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    fn make_room(&self, sessions: &mut HashMap<SessionKey, SessionHandle>, now: Timestamp) {
        if self.evict_idle_locked(sessions, now) > 0 {
            return;
        }
        let oldest = sessions
            .iter()
            .filter_map(|(key, handle)| last_active(handle).map(|t| (key.clone(), t)))
            .min_by_key(|(_, t)| *t)
            .map(|(key, _)| key);
        if let Some(key) = oldest {
            sessions.remove(&key);
            tracing::warn!(
                max_sessions = self.max_sessions,
                "Session registry full, evicted least recently active session"
            );
        }
    }

    /// Drops every live session of the user. Returns how many were removed.
    pub fn remove_user(&self, user_id: &UserId) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(|p| p.into_inner());
        let before = sessions.len();
        sessions.retain(|(owner, _), _| owner != user_id);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last activity of a session, or `None` if it is locked by a running turn.
fn last_active(handle: &SessionHandle) -> Option<Timestamp> {
    match handle.try_lock() {
        Ok(session) => Some(session.last_active()),
        Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner().last_active()),
        Err(TryLockError::WouldBlock) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySupportRepository;
    use crate::domain::foundation::Timestamp;
    use crate::domain::support::ConversationTurn;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn get_or_create_returns_same_handle() {
        let registry = SessionRegistry::new(Locale::Turkish, None);
        let (u, s) = (user("u"), SessionId::new());

        let a = registry.get_or_create(&u, &s).await;
        let b = registry.get_or_create(&u, &s).await;

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn sessions_are_scoped_by_user_and_session() {
        let registry = SessionRegistry::new(Locale::Turkish, None);
        let s = SessionId::new();

        registry.get_or_create(&user("a"), &s).await;
        registry.get_or_create(&user("b"), &s).await;
        registry.get_or_create(&user("a"), &SessionId::new()).await;

        assert_eq!(registry.len(), 3);
        assert!(registry.get(&user("c"), &s).is_none());
    }

    #[tokio::test]
    async fn new_session_is_hydrated_from_repository() {
        let repository = Arc::new(InMemorySupportRepository::new());
        let u = user("u");
        let now = Timestamp::now();
        repository
            .save_conversation(&u, &ConversationTurn::new("later", "b", now.plus_secs(5)))
            .await
            .unwrap();
        repository
            .save_conversation(&u, &ConversationTurn::new("earlier", "a", now))
            .await
            .unwrap();

        let registry = SessionRegistry::new(Locale::English, Some(repository));
        let handle = registry.get_or_create(&u, &SessionId::new()).await;
        let session = lock_session(&handle);

        let contents: Vec<_> = session
            .memory()
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["earlier", "a", "later", "b"]);
        assert_eq!(session.locale(), Locale::English);
    }

    #[tokio::test]
    async fn remove_user_drops_only_their_sessions() {
        let registry = SessionRegistry::new(Locale::Turkish, None);
        registry.get_or_create(&user("a"), &SessionId::new()).await;
        registry.get_or_create(&user("a"), &SessionId::new()).await;
        registry.get_or_create(&user("b"), &SessionId::new()).await;

        assert_eq!(registry.remove_user(&user("a")), 2);
        assert_eq!(registry.len(), 1);
    }

    fn touch(registry: &SessionRegistry, u: &UserId, s: &SessionId, at: Timestamp) {
        let handle = registry.get(u, s).unwrap();
        lock_session(&handle).touch(at);
    }

    #[tokio::test]
    async fn load_session_does_not_register() {
        let registry = SessionRegistry::new(Locale::Turkish, None);
        for _ in 0..50 {
            registry.load_session(&user("u"), &SessionId::new()).await;
        }
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn evict_idle_drops_only_stale_sessions() {
        let registry = SessionRegistry::new(Locale::Turkish, None).with_limits(60, 100);
        let now = Timestamp::now();
        let (stale, fresh) = (SessionId::new(), SessionId::new());
        registry.get_or_create(&user("u"), &stale).await;
        registry.get_or_create(&user("u"), &fresh).await;
        touch(&registry, &user("u"), &stale, now.plus_secs(-120));
        touch(&registry, &user("u"), &fresh, now.plus_secs(-30));

        assert_eq!(registry.evict_idle(now), 1);
        assert!(registry.get(&user("u"), &stale).is_none());
        assert!(registry.get(&user("u"), &fresh).is_some());
    }

    #[tokio::test]
    async fn busy_session_survives_eviction() {
        let registry = SessionRegistry::new(Locale::Turkish, None).with_limits(0, 100);
        let s = SessionId::new();
        let handle = registry.get_or_create(&user("u"), &s).await;
        let _turn = lock_session(&handle);

        assert_eq!(registry.evict_idle(Timestamp::now().plus_secs(10)), 0);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn capacity_is_never_exceeded() {
        let registry = SessionRegistry::new(Locale::Turkish, None).with_limits(3600, 3);
        let now = Timestamp::now();
        let first = SessionId::new();
        registry.get_or_create(&user("u"), &first).await;
        touch(&registry, &user("u"), &first, now.plus_secs(-10));
        for _ in 0..10 {
            registry.get_or_create(&user("u"), &SessionId::new()).await;
        }

        assert_eq!(registry.len(), 3);
        assert!(registry.get(&user("u"), &first).is_none());
    }
}
