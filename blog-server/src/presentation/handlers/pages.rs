use actix_web::{HttpResponse, get, web};
use uuid::Uuid;

use crate::application::post_service::PostService;
use crate::data::post_repository::SupabasePostRepository;
use crate::domain::error::DomainError;
use crate::presentation::format::format_post;
use crate::presentation::templates::{IndexTemplate, PostTemplate, not_found_page, render};
use crate::presentation::utils::MaybeUser;

#[get("/")]
pub async fn index(
    user: MaybeUser,
    posts: web::Data<PostService<SupabasePostRepository>>,
) -> Result<HttpResponse, DomainError> {
    let records = posts.list_posts().await?;
    let formatted = records
        .iter()
        .map(format_post)
        .collect::<Result<Vec<_>, _>>()?;

    render(&IndexTemplate {
        posts: formatted,
        user: user.0,
    })
}

#[get("/post/{id}")]
pub async fn post_detail(
    user: MaybeUser,
    posts: web::Data<PostService<SupabasePostRepository>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    match posts.get_post(id).await {
        Ok(post) => render(&PostTemplate {
            post: format_post(&post)?,
            user: user.0,
        }),
        Err(DomainError::PostNotFound(_)) => not_found_page(),
        Err(e) => Err(e),
    }
}
