use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::models::{CoverLetter, GeneratedResume, MatchResult};
use crate::profile::models::Profile;
use crate::session::status::OperationBoard;

/// Everything one wizard session owns. Mutated only through the profile
/// handlers and the generation pipelines.
#[derive(Debug)]
pub struct Session {
    pub profile: Profile,
    pub generated_resume: Option<GeneratedResume>,
    pub match_result: Option<MatchResult>,
    pub cover_letter: Option<CoverLetter>,
    pub board: OperationBoard,
    last_touched: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            generated_resume: None,
            match_result: None,
            cover_letter: None,
            board: OperationBoard::default(),
            last_touched: Instant::now(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let mut sessions = self.sessions.lock().await;
        let id = loop {
            let candidate = Uuid::new_v4();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(id, Session::default());
        id
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(id))
    }

    /// Runs `f` against the session under the lock. `f` is synchronous, so
    /// the lock can never be held across a model call.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        session.last_touched = Instant::now();
        Ok(f(session))
    }

    /// Like [`with_session`](Self::with_session) for closures that can fail.
    pub async fn try_with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        self.with_session(id, f).await?
    }

    /// Drops every session untouched for longer than `max_idle`. Returns how
    /// many were dropped.
    pub async fn purge_stale(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        let now = Instant::now();
        sessions.retain(|_, session| now.duration_since(session.last_touched) < max_idle);
        let purged = before - sessions.len();
        if purged > 0 {
            info!("Purged {purged} idle sessions");
        }
        purged
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_access() {
        let store = SessionStore::new();
        let id = store.create().await;
        store
            .with_session(id, |s| s.profile.full_name = "Alex".to_string())
            .await
            .unwrap();
        let name = store
            .with_session(id, |s| s.profile.full_name.clone())
            .await
            .unwrap();
        assert_eq!(name, "Alex");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let result = store.with_session(Uuid::new_v4(), |_| ()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_drops_session() {
        let store = SessionStore::new();
        let id = store.create().await;
        store.remove(id).await.unwrap();
        assert!(matches!(store.remove(id).await, Err(AppError::NotFound(_))));
        assert!(store.with_session(id, |_| ()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_stale_drops_only_idle_sessions() {
        let store = SessionStore::new();
        let idle = store.create().await;
        let active = store.create().await;

        tokio::time::advance(Duration::from_secs(50)).await;
        store.with_session(active, |_| ()).await.unwrap();
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(store.purge_stale(Duration::from_secs(60)).await, 1);
        assert!(matches!(
            store.with_session(idle, |_| ()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.with_session(active, |_| ()).await.is_ok());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;
        store
            .with_session(a, |s| s.profile.skills = "Rust".to_string())
            .await
            .unwrap();
        let skills_b = store.with_session(b, |s| s.profile.skills.clone()).await.unwrap();
        assert!(skills_b.is_empty());
    }
}
