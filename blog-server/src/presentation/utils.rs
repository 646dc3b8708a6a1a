use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::SessionUser;

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Only the post's author may change it.
pub fn ensure_author(post_author: &Uuid, user_id: &Uuid) -> Result<(), DomainError> {
    if post_author != user_id {
        Err(DomainError::Forbidden)
    } else {
        Ok(())
    }
}

/// Extractor for pages that render with or without a session. The session
/// middleware has already resolved the cookie; this just reads the result.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(
            req.extensions().get::<SessionUser>().cloned(),
        )))
    }
}
