use crate::state::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub type ConversationId = String;

pub type SessionHandle = Arc<Mutex<Session>>;

// one mutex per session, so conversations never wait on each other
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<ConversationId, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session(&self, conversation_id: &str) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(conversation_id) {
            return handle.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(conversation_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(conversation_id = %conversation_id, "Created session");
                Arc::new(Mutex::new(Session::new()))
            })
            .clone()
    }

    pub async fn snapshot(&self, conversation_id: &str) -> Option<Session> {
        let handle = self.sessions.read().await.get(conversation_id).cloned()?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    pub async fn reset(&self, conversation_id: &str) {
        let handle = self.session(conversation_id).await;
        let mut session = handle.lock().await;
        *session = session.reset();
    }

    pub async fn contains(&self, conversation_id: &str) -> bool {
        self.sessions.read().await.contains_key(conversation_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
