use actix_web::{web, HttpResponse};
use sac_event_feedback_api_structs::get_service_health::*;

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Feedback reminders are up".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
