use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::Principal;

/// Receiver of "establish a session for this principal"
///
/// Cookie or token issuance belongs to the web layer. The authentication
/// service never calls this on its own; callers do so after a successful
/// [`authenticate`](super::AuthenticationService::authenticate).
#[async_trait]
pub trait SessionLayer: Send + Sync {
    async fn establish(&self, principal: &Principal, persistent: bool) -> anyhow::Result<()>;
}

/// A principal held by [`MemorySessions`]
#[derive(Clone, Debug)]
pub struct Session {
    pub principal: Principal,
    pub persistent: bool,
}

/// In-process session layer, one session per user
///
/// Establishing a session for a user replaces the previous one.
#[derive(Debug, Default)]
pub struct MemorySessions {
    sessions: DashMap<Uuid, Session>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's session if it is still inside its validity window
    ///
    /// Expired sessions are dropped on read.
    pub fn current(&self, user_id: Uuid) -> Option<Session> {
        let now = Utc::now();

        // Only an entry that is still expired under the shard lock is removed
        if self
            .sessions
            .remove_if(&user_id, |_, session| !session.principal.is_active_at(now))
            .is_some()
        {
            tracing::debug!(%user_id, "Session expired");
            return None;
        }

        self.sessions
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .filter(|session| session.principal.is_active_at(now))
    }

    /// End the user's session (logout); returns whether one existed
    pub fn end(&self, user_id: Uuid) -> bool {
        self.sessions.remove(&user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionLayer for MemorySessions {
    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.user_id))]
    async fn establish(&self, principal: &Principal, persistent: bool) -> anyhow::Result<()> {
        self.sessions.insert(
            principal.user_id,
            Session {
                principal: principal.clone(),
                persistent,
            },
        );
        tracing::debug!("Session established");
        Ok(())
    }
}
