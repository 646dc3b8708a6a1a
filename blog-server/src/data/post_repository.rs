use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use supabase_client::{Client, Order};
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostChanges, PostDraft};

/// Columns every post read selects: the full row plus the joined author
/// user, embedded under `author_user`.
pub const POST_SELECT: &str = "*,author_user:author(id,name,email)";

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError>;
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

#[derive(Clone)]
pub struct SupabasePostRepository {
    client: Client,
}

impl SupabasePostRepository {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct NewPostRow<'a> {
    #[serde(flatten)]
    draft: &'a PostDraft,
    author: Uuid,
}

#[derive(Serialize)]
struct PostPatch<'a> {
    #[serde(flatten)]
    changes: &'a PostChanges,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for SupabasePostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        self.client
            .from("posts")
            .select(POST_SELECT)
            .order("created_at", Order::Desc)
            .fetch::<Post>()
            .await
            .map_err(|e| {
                error!("failed to list posts: {}", e);
                DomainError::from(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        match self
            .client
            .from("posts")
            .select(POST_SELECT)
            .eq("id", id)
            .single::<Post>()
            .await
        {
            Ok(post) => Ok(Some(post)),
            // "no rows" is absence, not a failure; callers render 404 from it
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => {
                error!("failed to fetch post {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
        let row = NewPostRow {
            draft: &draft,
            author: author_id,
        };
        let post: Post = self
            .client
            .from("posts")
            .select(POST_SELECT)
            .insert(&[row])
            .await
            .map_err(|e| {
                error!("failed to create post: {}", e);
                DomainError::from(e)
            })?;

        info!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, DomainError> {
        let patch = PostPatch {
            changes: &changes,
            updated_at: Utc::now(),
        };
        match self
            .client
            .from("posts")
            .select(POST_SELECT)
            .eq("id", id)
            .update(&patch)
            .await
        {
            Ok(post) => {
                info!(post_id = %id, "post updated");
                Ok(Some(post))
            }
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => {
                error!("failed to update post {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.client
            .from("posts")
            .eq("id", id)
            .delete()
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::from(e)
            })?;

        info!(post_id = %id, "post deleted");
        Ok(())
    }
}
