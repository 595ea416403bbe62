use actix_web::{web, HttpResponse, Responder};
use crate::models::{AdviceRequest, AdviceResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/nutritionadvice", web::post().to(nutrition_advice));
}

/// Nutrition advice for the labels recognized in an image
///
/// POST /nutritionadvice
async fn nutrition_advice(
    state: web::Data<AppState>,
    req: web::Json<AdviceRequest>,
) -> impl Responder {
    HttpResponse::Ok().json(AdviceResponse {
        advice: state.advice.advise(req.recognized_items.as_slice()),
    })
}
