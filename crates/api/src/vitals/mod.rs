mod add_vitals;
mod calculate_bmi;
mod get_profile;
pub mod send_vitals_reminders;

use actix_web::web;
use add_vitals::add_vitals_controller;
use calculate_bmi::calculate_bmi_controller;
use get_profile::get_profile_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(get_profile_controller));
    cfg.route("/profile/vitals", web::post().to(add_vitals_controller));
    cfg.route("/bmi", web::post().to(calculate_bmi_controller));
}
