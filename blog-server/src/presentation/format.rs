use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Shown when the author join resolved nothing.
pub const UNKNOWN_AUTHOR: &str = "Autor desconhecido";

/// pt-BR abbreviated month names, matching what the already-rendered pages
/// use. The exact strings matter.
const MONTHS_PT_BR: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// A post shaped for display: resolved author name, locale-formatted
/// publication date, everything else passed through unchanged.
#[derive(Debug, Clone)]
pub struct FormattedPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub url_image: Option<String>,
    pub author: String,
    pub published_at: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub full_content: String,
}

/// Pure transform from the stored record to the display shape. The author
/// falls back to a placeholder; a missing publication timestamp is malformed
/// input and surfaces as a validation error.
pub fn format_post(post: &Post) -> Result<FormattedPost, DomainError> {
    let published_at = post
        .published_at
        .ok_or_else(|| DomainError::Validation(format!("post {} has no published_at", post.id)))?;

    let author = post
        .author_user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    Ok(FormattedPost {
        id: post.id,
        title: post.title.clone(),
        content: post.content.clone(),
        url_image: post.url_image.clone(),
        author,
        published_at: format_date_pt_br(published_at),
        read_time: post.read_time.clone(),
        tags: post.tags.clone(),
        full_content: post.full_content.clone(),
    })
}

/// `03 de ago. de 2025` — two-digit day, abbreviated month, numeric year.
fn format_date_pt_br(date: DateTime<Utc>) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::user::Author;

    fn stored_post() -> Post {
        let author_id = Uuid::new_v4();
        Post {
            id: Uuid::new_v4(),
            title: "Título".to_string(),
            content: "Resumo".to_string(),
            full_content: "<p>Corpo</p>".to_string(),
            url_image: Some("https://cdn.example/cover.png".to_string()),
            author: author_id,
            author_user: Some(Author {
                id: author_id,
                name: "Ana Silva".to_string(),
                email: "ana@example.com".to_string(),
            }),
            published_at: Some(Utc.with_ymd_and_hms(2025, 8, 3, 0, 0, 0).unwrap()),
            read_time: "7 min read".to_string(),
            tags: vec!["rust".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn joined_author_name_and_fixed_date_pattern() {
        let formatted = format_post(&stored_post()).unwrap();
        assert_eq!(formatted.author, "Ana Silva");
        assert_eq!(formatted.published_at, "03 de ago. de 2025");
    }

    #[test]
    fn missing_join_falls_back_to_placeholder() {
        let mut post = stored_post();
        post.author_user = None;
        let formatted = format_post(&post).unwrap();
        assert_eq!(formatted.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn missing_published_at_is_a_validation_error() {
        let mut post = stored_post();
        post.published_at = None;
        assert!(matches!(
            format_post(&post),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn passthrough_fields_are_untouched() {
        let post = stored_post();
        let formatted = format_post(&post).unwrap();
        assert_eq!(formatted.tags, post.tags);
        assert_eq!(formatted.read_time, post.read_time);
        assert_eq!(formatted.full_content, post.full_content);
        assert_eq!(formatted.url_image, post.url_image);
    }

    #[test]
    fn every_month_abbreviation_is_the_pt_br_one() {
        let december = Utc.with_ymd_and_hms(2024, 12, 25, 12, 0, 0).unwrap();
        assert_eq!(format_date_pt_br(december), "25 de dez. de 2024");
        let january = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date_pt_br(january), "01 de jan. de 2026");
    }
}
