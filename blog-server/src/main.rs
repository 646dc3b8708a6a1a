mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use supabase_client::Client;

use application::auth_service::AuthService;
use application::image_store::ImageStore;
use application::post_service::PostService;
use data::post_repository::SupabasePostRepository;
use infrastructure::config::AppConfig;
use infrastructure::logging::init_logging;
use presentation::handlers;
use presentation::middleware::{RequestIdMiddleware, SessionMiddleware, TimingMiddleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let client = Client::new(&config.supabase_url, &config.supabase_anon_key)
        .expect("failed to build backend client");

    let post_repo = Arc::new(SupabasePostRepository::new(client.clone()));
    let post_service = PostService::new(Arc::clone(&post_repo));
    let auth_service = AuthService::new(client.clone());
    let image_store = ImageStore::new(client, config.storage_bucket.clone());

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(TimingMiddleware)
            .wrap(SessionMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(image_store.clone()))
            .service(handlers::pages::index)
            .service(handlers::auth::scope())
            // /post/new must be registered ahead of /post/{id}
            .service(handlers::post::new_form)
            .service(handlers::post::create_post)
            .service(handlers::post::edit_form)
            .service(handlers::post::update_post)
            .service(handlers::post::delete_post)
            .service(handlers::pages::post_detail)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
