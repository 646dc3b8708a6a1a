use supabase_client::Client;
use tracing::{error, instrument};

use crate::domain::error::DomainError;
use crate::domain::user::SessionUser;

/// Thin wrapper over the backend's session auth. No credentials are checked
/// locally; tokens stay opaque.
#[derive(Clone)]
pub struct AuthService {
    client: Client,
}

impl AuthService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Password sign-in. Invalid credentials surface as `Unauthorized` so
    /// the login page can re-render instead of failing hard.
    #[instrument(skip(self, password))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, SessionUser), DomainError> {
        match self.client.auth().sign_in(email, password).await {
            Ok(session) => {
                let user = SessionUser {
                    id: session.user.id,
                    email: session.user.email.unwrap_or_else(|| email.to_string()),
                };
                Ok((session.access_token, user))
            }
            Err(e @ supabase_client::Error::Api { status: 400, .. }) => {
                error!("sign-in rejected: {}", e);
                Err(DomainError::Unauthorized)
            }
            Err(e) => {
                error!("sign-in failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Resolve the user behind a stored session token. An invalid or expired
    /// token is an absent session, never a failure.
    pub async fn current_user(&self, token: &str) -> Result<Option<SessionUser>, DomainError> {
        let user = self.client.auth().current_user(token).await.map_err(|e| {
            error!("session lookup failed: {}", e);
            DomainError::from(e)
        })?;

        Ok(user.map(|u| SessionUser {
            id: u.id,
            email: u.email.unwrap_or_default(),
        }))
    }

    pub async fn sign_out(&self, token: &str) -> Result<(), DomainError> {
        self.client.auth().sign_out(token).await.map_err(|e| {
            error!("sign-out failed: {}", e);
            DomainError::from(e)
        })
    }
}
