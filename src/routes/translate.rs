use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ErrorResponse, TranslateRequest, TranslateResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/translate", web::post().to(translate));
}

/// Translate text through Azure Translator
///
/// POST /translate
///
/// Request body:
/// ```json
/// {
///   "text": "string",
///   "language": "en"
/// }
/// ```
async fn translate(
    state: web::Data<AppState>,
    req: web::Json<TranslateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for translate request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "Validation failed: {}",
            errors
        )));
    }

    match state.translator.translate(&req.text, &req.language).await {
        Ok(translated_text) => HttpResponse::Ok().json(TranslateResponse { translated_text }),
        Err(e) => {
            tracing::error!("Translation to {} failed: {}", req.language, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}
