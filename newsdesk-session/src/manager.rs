//! Keyed session registry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::session::Session;

/// A registry of live sessions keyed by session id.
///
/// One session exists per user interaction; handing the same session to
/// two concurrent users corrupts both conversations, so callers look
/// sessions up by key instead of holding a process-wide one. Starting a
/// new topic is an explicit caller action: [`remove`](SessionManager::remove)
/// the old session, then [`insert`](SessionManager::insert) a fresh one.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionManager {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its id.
    pub async fn insert(&self, session: Session) -> String {
        let id = session.id().to_string();
        debug!(session = %id, "registering session");
        self.sessions.write().await.insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    /// Look up a session by id.
    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Discard a session. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        debug!(session = %id, "discarding session");
        self.sessions.write().await.remove(id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the registry holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
