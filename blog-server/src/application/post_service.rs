use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostChanges, PostDraft};
use crate::domain::user::SessionUser;

#[derive(Clone)]
pub struct PostService<R: PostRepository + 'static> {
    repo: Arc<R>,
}

impl<R> PostService<R>
where
    R: PostRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    /// Creating a post requires a session; the author reference is the
    /// session user. The check runs before any row is written.
    #[instrument(skip(self, session, draft))]
    pub async fn create_post(
        &self,
        session: Option<&SessionUser>,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let user = session.ok_or(DomainError::Unauthorized)?;
        self.repo.create(user.id, draft).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        self.repo
            .update(id, changes)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;

    /// Backend stand-in: rows live in memory, timestamps are stamped the way
    /// the hosted backend stamps them.
    #[derive(Default)]
    struct MemoryPostRepository {
        rows: Mutex<Vec<Post>>,
    }

    impl MemoryPostRepository {
        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PostRepository for MemoryPostRepository {
        async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned())
        }

        async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
            let now = Utc::now();
            let post = Post {
                id: Uuid::new_v4(),
                title: draft.title,
                content: draft.content,
                full_content: draft.full_content,
                url_image: draft.url_image,
                author: author_id,
                author_user: None,
                published_at: Some(now),
                read_time: draft.read_time,
                tags: draft.tags,
                created_at: now,
                updated_at: now,
            };
            self.rows.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn update(
            &self,
            id: Uuid,
            changes: PostChanges,
        ) -> Result<Option<Post>, DomainError> {
            let mut rows = self.rows.lock().unwrap();
            let Some(post) = rows.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            if let Some(title) = changes.title {
                post.title = title;
            }
            if let Some(content) = changes.content {
                post.content = content;
            }
            if let Some(full_content) = changes.full_content {
                post.full_content = full_content;
            }
            if let Some(url_image) = changes.url_image {
                post.url_image = Some(url_image);
            }
            if let Some(read_time) = changes.read_time {
                post.read_time = read_time;
            }
            if let Some(tags) = changes.tags {
                post.tags = tags;
            }
            post.updated_at = Utc::now();
            Ok(Some(post.clone()))
        }

        async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
            self.rows.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }
    }

    fn service() -> (PostService<MemoryPostRepository>, Arc<MemoryPostRepository>) {
        let repo = Arc::new(MemoryPostRepository::default());
        (PostService::new(Arc::clone(&repo)), repo)
    }

    fn session() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
        }
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: "Resumo curto".to_string(),
            full_content: "<p>Conteúdo completo</p>".to_string(),
            url_image: None,
            read_time: "5 min read".to_string(),
            tags: vec!["rust".to_string(), "web".to_string()],
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_the_draft() {
        let (service, _) = service();
        let user = session();

        let created = service
            .create_post(Some(&user), draft("Primeiro post"))
            .await
            .unwrap();
        let fetched = service.get_post(created.id).await.unwrap();

        assert_eq!(fetched.title, "Primeiro post");
        assert_eq!(fetched.content, "Resumo curto");
        assert_eq!(fetched.full_content, "<p>Conteúdo completo</p>");
        assert_eq!(fetched.read_time, "5 min read");
        assert_eq!(fetched.tags, vec!["rust", "web"]);
        assert_eq!(fetched.author, user.id);
    }

    #[tokio::test]
    async fn get_of_absent_id_is_not_found() {
        let (service, _) = service();
        let missing = Uuid::new_v4();

        match service.get_post(missing).await {
            Err(DomainError::PostNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected PostNotFound, got {:?}", other.map(|p| p.id)),
        }
    }

    #[tokio::test]
    async fn update_reflects_change_and_advances_updated_at() {
        let (service, _) = service();
        let created = service
            .create_post(Some(&session()), draft("Antes"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;

        let changes = PostChanges {
            title: Some("Depois".to_string()),
            ..PostChanges::default()
        };
        let updated = service.update_post(created.id, changes).await.unwrap();

        assert_eq!(updated.title, "Depois");
        assert_eq!(updated.content, created.content);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn update_of_absent_id_is_not_found() {
        let (service, _) = service();
        let missing = Uuid::new_v4();

        let result = service.update_post(missing, PostChanges::default()).await;
        assert!(matches!(result, Err(DomainError::PostNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (service, _) = service();
        let created = service
            .create_post(Some(&session()), draft("Efêmero"))
            .await
            .unwrap();

        service.delete_post(created.id).await.unwrap();

        assert!(matches!(
            service.get_post(created.id).await,
            Err(DomainError::PostNotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_is_ordered_by_creation_time_descending() {
        let (service, _) = service();
        let user = session();

        service
            .create_post(Some(&user), draft("Mais antigo"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        service
            .create_post(Some(&user), draft("Do meio"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        service
            .create_post(Some(&user), draft("Mais novo"))
            .await
            .unwrap();

        let titles: Vec<String> = service
            .list_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Mais novo", "Do meio", "Mais antigo"]);
    }

    #[tokio::test]
    async fn unauthenticated_create_fails_before_any_row_is_written() {
        let (service, repo) = service();

        let result = service.create_post(None, draft("Não deve existir")).await;

        assert!(matches!(result, Err(DomainError::Unauthorized)));
        assert_eq!(repo.len(), 0);
    }
}
