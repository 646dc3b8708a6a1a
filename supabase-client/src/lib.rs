//! Minimal client for the hosted backend: PostgREST-style row access,
//! password auth and object storage. Only the surface this application
//! consumes is implemented.

pub mod auth;
pub mod error;
pub mod rows;
pub mod storage;

pub use auth::{AuthApi, AuthUser, Session};
pub use error::Error;
pub use rows::{Order, QueryBuilder};
pub use storage::StorageApi;

use reqwest::header::HeaderValue;

/// Handle to one backend project. Holds the base URL and the API key;
/// cheap to clone and safe to share across requests.
#[derive(Clone)]
pub struct Client {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a row query or mutation against `table`.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder::new(self, table)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    pub fn storage(&self) -> StorageApi<'_> {
        StorageApi { client: self }
    }

    pub(crate) fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.api_key_header())
            .bearer_auth(&self.api_key)
    }

    pub(crate) fn api_key_header(&self) -> HeaderValue {
        HeaderValue::from_str(&self.api_key).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}
