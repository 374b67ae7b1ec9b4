use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use tiller_data::Member;

/// The user profile kept in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub wyc_number: u32,
    pub first: Option<String>,
    pub last: Option<String>,
    pub email: Option<String>,
}

impl From<&Member> for AuthUser {
    fn from(member: &Member) -> Self {
        Self {
            wyc_number: member.wyc_number,
            first: member.first.clone(),
            last: member.last.clone(),
            email: member.email.clone(),
        }
    }
}

/// Session storage as seen by the auth flow. The cookie-backed
/// implementation lives with the web layer; here only the interface
/// matters, so the flow can be tested against an in-memory store.
#[async_trait]
pub trait Session {
    async fn user_id(&self) -> Option<u32>;
    async fn set_user(&self, user: AuthUser) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// In-memory session, used in tests and by the one-shot CLI.
#[derive(Default)]
pub struct MemorySession {
    user: Mutex<Option<AuthUser>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn user_id(&self) -> Option<u32> {
        self.user.lock().await.as_ref().map(|user| user.wyc_number)
    }

    async fn set_user(&self, user: AuthUser) -> Result<()> {
        *self.user.lock().await = Some(user);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.user.lock().await = None;
        Ok(())
    }
}
