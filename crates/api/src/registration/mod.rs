mod set_participation;
mod subscribers;

use actix_web::web;
use set_participation::set_participation_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/registrations/{uuid}/participation",
        web::put().to(set_participation_controller),
    );
}
