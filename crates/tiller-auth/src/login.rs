use anyhow::Result;
use thiserror::Error as ThisError;

use tiller_data::{password, Member, MemberFilter, Query};

use crate::{AuthUser, Session};

/// The one message shown for every credential failure. Unknown WYC
/// numbers and wrong passwords must be indistinguishable to a caller.
pub const INVALID_CREDENTIALS: &str = "Invalid WYC number or password";

#[derive(Debug, Clone, ThisError)]
pub enum AuthError {
    #[error("Unauthorized: No session found")]
    Unauthorized,
}

/// Outcome of a login attempt. Credential failures are values, not
/// errors; only datastore problems propagate as errors.
#[derive(Debug, Clone)]
pub struct Login {
    pub success: bool,
    pub message: String,
    pub user: Option<AuthUser>,
}

impl Login {
    fn rejected() -> Self {
        Self {
            success: false,
            message: INVALID_CREDENTIALS.to_string(),
            user: None,
        }
    }
}

/// Check credentials against the roster and store the user in the
/// session on success.
pub async fn login<DB, S>(
    db: &DB,
    session: &S,
    wyc_number: u32,
    password: &str,
) -> Result<Login>
where
    DB: Query<Member, Filter = MemberFilter>,
    S: Session,
{
    let members: Vec<Member> = db
        .query(&MemberFilter {
            wyc_id: Some(wyc_number.to_string()),
            ..Default::default()
        })
        .await?;

    let member = match members.first() {
        Some(member) => member,
        None => return Ok(Login::rejected()),
    };

    // An account without a stored hash can never log in
    let stored_hash = match &member.password {
        Some(hash) => hash,
        None => return Ok(Login::rejected()),
    };

    if !password::verify_password(password, stored_hash) {
        return Ok(Login::rejected());
    }

    let user = AuthUser::from(member);
    session.set_user(user.clone()).await?;

    Ok(Login {
        success: true,
        message: "Login successful".to_string(),
        user: Some(user),
    })
}

/// Drop the session.
pub async fn logout<S: Session>(session: &S) -> Result<()> {
    session.clear().await
}

/// The authenticated user id, or an error for anonymous callers.
pub async fn require_auth<S: Session>(session: &S) -> Result<u32> {
    session
        .user_id()
        .await
        .ok_or_else(|| AuthError::Unauthorized.into())
}

/// The authenticated user id, if any.
pub async fn optional_auth<S: Session>(session: &S) -> Option<u32> {
    session.user_id().await
}

#[cfg(test)]
mod tests {
    use super::*;

    use tiller_data::{password::hash_password, Insert};
    use tiller_db::Connection;

    use crate::MemorySession;

    async fn roster_with_member(wyc_number: u32, secret: Option<&str>) -> Connection {
        let db = Connection::open_test().await;
        db.insert(Member {
            wyc_number,
            first: Some("Robin".to_string()),
            last: Some("Spinnaker".to_string()),
            email: Some("robin@wyc.example".to_string()),
            password: secret.map(hash_password),
            ..Default::default()
        })
        .await
        .unwrap();
        db
    }

    #[tokio::test]
    async fn test_login_success() {
        let db = roster_with_member(42, Some("halyard")).await;
        let session = MemorySession::new();

        let login = login(&db, &session, 42, "halyard").await.unwrap();
        assert!(login.success);
        assert_eq!(login.user.as_ref().unwrap().wyc_number, 42);
        assert_eq!(session.user_id().await, Some(42));
        assert_eq!(require_auth(&session).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let db = roster_with_member(42, Some("halyard")).await;
        let session = MemorySession::new();

        let result = login(&db, &session, 42, "mizzen").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, INVALID_CREDENTIALS);
        assert_eq!(session.user_id().await, None);
    }

    #[tokio::test]
    async fn test_login_unknown_member_same_message() {
        let db = roster_with_member(42, Some("halyard")).await;
        let session = MemorySession::new();

        let result = login(&db, &session, 23, "halyard").await.unwrap();
        assert!(!result.success);
        // Same message as a wrong password, so callers can not probe
        // which WYC numbers exist
        assert_eq!(result.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_without_stored_hash_fails() {
        let db = roster_with_member(42, None).await;
        let session = MemorySession::new();

        let result = login(&db, &session, 42, "").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let db = roster_with_member(42, Some("halyard")).await;
        let session = MemorySession::new();

        login(&db, &session, 42, "halyard").await.unwrap();
        assert_eq!(optional_auth(&session).await, Some(42));

        logout(&session).await.unwrap();
        assert_eq!(optional_auth(&session).await, None);
        assert!(require_auth(&session).await.is_err());
    }
}
