use actix_web::{HttpResponse, http::StatusCode};
use askama::Template;

use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::SessionUser;
use crate::presentation::format::FormattedPost;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub posts: Vec<FormattedPost>,
    pub user: Option<SessionUser>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub post: FormattedPost,
    pub user: Option<SessionUser>,
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub heading: String,
    pub submit_label: String,
    pub action: String,
    pub email: String,
    pub title: String,
    pub content: String,
    pub full_content: String,
    pub read_time: String,
    pub tags: String,
    pub current_image: Option<String>,
    pub error: Option<String>,
}

impl PostFormTemplate {
    pub fn new_post(user: &SessionUser) -> Self {
        Self {
            heading: "Criar novo post".to_string(),
            submit_label: "Criar post".to_string(),
            action: "/post/new".to_string(),
            email: user.email.clone(),
            title: String::new(),
            content: String::new(),
            full_content: String::new(),
            read_time: String::new(),
            tags: String::new(),
            current_image: None,
            error: None,
        }
    }

    pub fn edit_post(user: &SessionUser, post: &Post) -> Self {
        Self {
            heading: "Editar post".to_string(),
            submit_label: "Salvar alterações".to_string(),
            action: format!("/post/{}/edit", post.id),
            email: user.email.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            full_content: post.full_content.clone(),
            read_time: post.read_time.clone(),
            tags: post.tags.join(", "),
            current_image: post.url_image.clone(),
            error: None,
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

pub fn render<T: Template>(template: &T) -> Result<HttpResponse, DomainError> {
    render_with_status(template, StatusCode::OK)
}

pub fn render_with_status<T: Template>(
    template: &T,
    status: StatusCode,
) -> Result<HttpResponse, DomainError> {
    let body = template
        .render()
        .map_err(|e| DomainError::Internal(format!("template error: {}", e)))?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

/// The dedicated 404 page, used wherever a post identifier resolves to
/// nothing.
pub fn not_found_page() -> Result<HttpResponse, DomainError> {
    render_with_status(&NotFoundTemplate, StatusCode::NOT_FOUND)
}
