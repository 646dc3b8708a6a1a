use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, Scope, get, post, web};
use tracing::{info, warn};

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::LoginForm;
use crate::presentation::middleware::SESSION_COOKIE;
use crate::presentation::templates::{LoginTemplate, render, render_with_status};
use crate::presentation::utils::{MaybeUser, redirect};

pub fn scope() -> Scope {
    web::scope("/auth")
        .service(login_form)
        .service(login)
        .service(logout)
}

#[get("/login")]
async fn login_form(user: MaybeUser) -> Result<HttpResponse, DomainError> {
    if user.0.is_some() {
        return Ok(redirect("/"));
    }
    render(&LoginTemplate { error: None })
}

#[post("/login")]
async fn login(
    auth: web::Data<AuthService>,
    payload: web::Form<LoginForm>,
) -> Result<HttpResponse, DomainError> {
    match auth.sign_in(&payload.email, &payload.password).await {
        Ok((token, user)) => {
            info!(user_id = %user.id, email = %user.email, "user logged in");

            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();

            Ok(HttpResponse::SeeOther()
                .cookie(cookie)
                .insert_header((header::LOCATION, "/"))
                .finish())
        }
        Err(DomainError::Unauthorized) => render_with_status(
            &LoginTemplate {
                error: Some("E-mail ou senha inválidos.".to_string()),
            },
            StatusCode::UNAUTHORIZED,
        ),
        Err(e) => Err(e),
    }
}

#[post("/logout")]
async fn logout(
    req: HttpRequest,
    auth: web::Data<AuthService>,
) -> Result<HttpResponse, DomainError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        // revoking the backend session is best effort; the cookie goes away
        // either way
        if let Err(e) = auth.sign_out(cookie.value()).await {
            warn!("sign-out failed: {}", e);
        }
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::SeeOther()
        .cookie(removal)
        .insert_header((header::LOCATION, "/"))
        .finish())
}
