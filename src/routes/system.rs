use actix_files::NamedFile;
use actix_web::{web, HttpResponse, Responder};
use crate::models::MessageResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(index))
        .route("/test", web::get().to(test_backend));
}

/// Serve the front-end entry document
async fn index(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(&state.index_file).await?)
}

/// Connectivity check used by the front-end
async fn test_backend() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse::new("Backend connecté avec succès !"))
}
