use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::Author;

/// A post row as stored by the backend, joined with its author user.
/// `full_content` is author-supplied HTML and is rendered unescaped; the
/// trusted-author policy is deliberate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub full_content: String,
    #[serde(default)]
    pub url_image: Option<String>,
    pub author: Uuid,
    /// Joined user behind `author`; absent when the select skipped the join
    /// or the reference is dangling.
    #[serde(default)]
    pub author_user: Option<Author>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub read_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape: everything the author supplies. Identifier, timestamps and
/// the author reference are filled in elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub full_content: String,
    #[serde(default)]
    pub url_image: Option<String>,
    pub read_time: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update shape. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
