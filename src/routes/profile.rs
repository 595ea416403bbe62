use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::summarize;
use crate::models::{ErrorResponse, MessageResponse, SaveUserDataRequest, SummaryRequest, SummaryResponse, UserProfile};
use crate::routes::AppState;
use crate::services::CosmosError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/saveuserdata", web::post().to(save_user_data))
        .route("/getsummary", web::post().to(get_summary));
}

/// Persist a user profile
///
/// POST /saveuserdata
///
/// Request body:
/// ```json
/// {
///   "goal": "string",
///   "allergies": "string" | ["string"],
///   "preferences": "string" | ["string"]
/// }
/// ```
async fn save_user_data(
    state: web::Data<AppState>,
    req: web::Json<SaveUserDataRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for saveuserdata request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(format!(
            "Validation failed: {}",
            errors
        )));
    }

    let profile = UserProfile::from(req.into_inner());

    match state.cosmos.create_profile(&profile).await {
        Ok(()) => {
            tracing::info!("Saved profile {}", profile.id);
            HttpResponse::Ok().json(MessageResponse::new(
                "Données sauvegardées avec succès dans Cosmos DB !",
            ))
        }
        Err(CosmosError::Conflict(id)) => {
            tracing::warn!("Profile {} already exists", id);
            HttpResponse::BadRequest().json(ErrorResponse::new("Données déjà existantes avec cet ID."))
        }
        Err(e) => {
            tracing::error!("Failed to save profile {}: {}", profile.id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

/// Summarize the submitted profile in one sentence
///
/// POST /getsummary
async fn get_summary(req: web::Json<SummaryRequest>) -> impl Responder {
    HttpResponse::Ok().json(SummaryResponse {
        summary: summarize(&req),
    })
}
