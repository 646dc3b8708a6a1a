use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::Client;
use crate::error::Error;

/// Session-based auth against the backend's GoTrue endpoints. Tokens are
/// opaque to this crate; callers store and present them as-is.
pub struct AuthApi<'a> {
    pub(crate) client: &'a Client,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

impl AuthApi<'_> {
    /// Password sign-in. Returns the session (access token + user) on
    /// success; invalid credentials come back as an API error with the
    /// backend's 400 status.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, Error> {
        let resp = self
            .client
            .http
            .post(format!("{}/auth/v1/token", self.client.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", self.client.api_key_header())
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(resp.json::<Session>().await?)
        } else {
            Err(Error::from_response(resp).await)
        }
    }

    /// Resolve the user behind an access token. An expired or invalid token
    /// is an absent session, not a failure.
    pub async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, Error> {
        let resp = self
            .client
            .http
            .get(format!("{}/auth/v1/user", self.client.base_url))
            .header("apikey", self.client.api_key_header())
            .bearer_auth(access_token)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => Ok(Some(resp.json::<AuthUser>().await?)),
            _ => Err(Error::from_response(resp).await),
        }
    }

    /// Revoke the session behind an access token. A token the backend no
    /// longer recognizes counts as already signed out.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), Error> {
        let resp = self
            .client
            .http
            .post(format!("{}/auth/v1/logout", self.client.base_url))
            .header("apikey", self.client.api_key_header())
            .bearer_auth(access_token)
            .send()
            .await?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(()),
            status if status.is_success() => Ok(()),
            _ => Err(Error::from_response(resp).await),
        }
    }
}
