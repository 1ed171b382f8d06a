pub mod group;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    group::configure(cfg);
}
