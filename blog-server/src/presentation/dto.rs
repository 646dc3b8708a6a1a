use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use serde::Deserialize;

use crate::application::image_store::UploadedImage;
use crate::domain::error::DomainError;
use crate::domain::post::{PostChanges, PostDraft};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// ======================= POSTS =======================

/// The create/edit form as submitted: text fields plus an optional image
/// file. Shared by both flows; the image is uploaded separately before the
/// row mutation.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub full_content: String,
    pub read_time: String,
    pub tags: Vec<String>,
    pub image: Option<UploadedImage>,
}

impl PostForm {
    pub async fn from_multipart(mut payload: Multipart) -> Result<Self, DomainError> {
        let mut form = PostForm::default();

        while let Some(mut field) = payload.try_next().await.map_err(bad_payload)? {
            let name = field.name().to_string();
            let filename = field
                .content_disposition()
                .get_filename()
                .map(|s| s.to_string());
            let content_type = field
                .content_type()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await.map_err(bad_payload)? {
                bytes.extend_from_slice(&chunk);
            }

            match name.as_str() {
                "title" => form.title = text(bytes)?,
                "content" => form.content = text(bytes)?,
                "full_content" => form.full_content = text(bytes)?,
                "read_time" => form.read_time = text(bytes)?,
                "tags" => form.tags = parse_tags(&text(bytes)?),
                "image" => {
                    // a file input left empty still submits an empty part
                    if let Some(filename) = filename.filter(|f| !f.is_empty()) {
                        if !bytes.is_empty() {
                            form.image = Some(UploadedImage {
                                filename,
                                content_type,
                                bytes,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (value, label) in [
            (&self.title, "title"),
            (&self.content, "content"),
            (&self.full_content, "full_content"),
            (&self.read_time, "read_time"),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{} is required", label)));
            }
        }
        Ok(())
    }

    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            full_content: self.full_content.clone(),
            url_image: None,
            read_time: self.read_time.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn changes(&self) -> PostChanges {
        PostChanges {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            full_content: Some(self.full_content.clone()),
            url_image: None,
            read_time: Some(self.read_time.clone()),
            tags: Some(self.tags.clone()),
        }
    }
}

fn text(bytes: Vec<u8>) -> Result<String, DomainError> {
    String::from_utf8(bytes).map_err(|_| DomainError::Validation("invalid utf-8 field".into()))
}

fn bad_payload(e: actix_multipart::MultipartError) -> DomainError {
    DomainError::Validation(format!("invalid form payload: {}", e))
}

/// Comma-separated tag input: trimmed, empties dropped, de-duplicated
/// keeping first-seen order.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let tag = raw.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_deduplicated_in_order() {
        assert_eq!(
            parse_tags("rust,  web , rust, ,backend"),
            vec!["rust", "web", "backend"]
        );
    }

    #[test]
    fn empty_input_yields_no_tags() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn blank_required_field_fails_validation() {
        let mut form = PostForm {
            title: "t".into(),
            content: "c".into(),
            full_content: "<p>f</p>".into(),
            read_time: "1 min read".into(),
            ..PostForm::default()
        };
        assert!(form.validate().is_ok());

        form.read_time = "   ".into();
        assert!(matches!(
            form.validate(),
            Err(DomainError::Validation(_))
        ));
    }
}
