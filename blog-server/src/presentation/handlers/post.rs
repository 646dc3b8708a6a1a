use actix_multipart::Multipart;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, get, post, web};
use tracing::info;
use uuid::Uuid;

use crate::application::image_store::ImageStore;
use crate::application::post_service::PostService;
use crate::data::post_repository::SupabasePostRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::PostForm;
use crate::presentation::templates::{PostFormTemplate, not_found_page, render};
use crate::presentation::utils::{MaybeUser, ensure_author, redirect};

#[get("/post/new")]
pub async fn new_form(user: MaybeUser) -> Result<HttpResponse, DomainError> {
    let Some(user) = user.0 else {
        return Ok(redirect("/auth/login"));
    };
    render(&PostFormTemplate::new_post(&user))
}

#[post("/post/new")]
pub async fn create_post(
    req: HttpRequest,
    user: MaybeUser,
    posts: web::Data<PostService<SupabasePostRepository>>,
    images: web::Data<ImageStore>,
    payload: Multipart,
) -> Result<HttpResponse, DomainError> {
    let Some(user) = user.0 else {
        return Ok(redirect("/auth/login"));
    };

    let form = PostForm::from_multipart(payload).await?;
    form.validate()?;

    // image first; a failed upload aborts before any row is written
    let mut draft = form.draft();
    if let Some(image) = &form.image {
        draft.url_image = Some(images.upload(image).await?);
    }

    let created = posts.create_post(Some(&user), draft).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %created.id,
        email = %user.email,
        "post created"
    );

    Ok(redirect("/"))
}

#[get("/post/{id}/edit")]
pub async fn edit_form(
    user: MaybeUser,
    posts: web::Data<PostService<SupabasePostRepository>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let Some(user) = user.0 else {
        return Ok(redirect("/auth/login"));
    };

    match posts.get_post(path.into_inner()).await {
        Ok(post) => {
            ensure_author(&post.author, &user.id)?;
            render(&PostFormTemplate::edit_post(&user, &post))
        }
        Err(DomainError::PostNotFound(_)) => not_found_page(),
        Err(e) => Err(e),
    }
}

#[post("/post/{id}/edit")]
pub async fn update_post(
    req: HttpRequest,
    user: MaybeUser,
    posts: web::Data<PostService<SupabasePostRepository>>,
    images: web::Data<ImageStore>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, DomainError> {
    let Some(user) = user.0 else {
        return Ok(redirect("/auth/login"));
    };

    let id = path.into_inner();
    let existing = posts.get_post(id).await?;
    ensure_author(&existing.author, &user.id)?;

    let form = PostForm::from_multipart(payload).await?;
    form.validate()?;

    let mut changes = form.changes();
    if let Some(image) = &form.image {
        changes.url_image = Some(images.upload(image).await?);
    }

    posts.update_post(id, changes).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %id,
        email = %user.email,
        "post updated"
    );

    Ok(redirect(&format!("/post/{}", id)))
}

#[post("/post/{id}/delete")]
pub async fn delete_post(
    req: HttpRequest,
    user: MaybeUser,
    posts: web::Data<PostService<SupabasePostRepository>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let Some(user) = user.0 else {
        return Ok(redirect("/auth/login"));
    };

    let id = path.into_inner();
    posts.delete_post(id).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %id,
        email = %user.email,
        "post deleted"
    );

    Ok(redirect("/"))
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<crate::presentation::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
