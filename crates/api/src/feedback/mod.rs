mod submit_feedback;

use actix_web::web;
use submit_feedback::submit_feedback_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/feedback", web::post().to(submit_feedback_controller));
}
