pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{http::header, web, HttpResponse};

use crate::flash::{self, Flash};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(tasks::home)
        .service(tasks::create_task)
        .service(tasks::mark_done)
        .service(tasks::restore_task)
        .service(tasks::delete_task)
        .service(tasks::edit_form)
        .service(tasks::edit_task)
        .service(auth::sign_up_form)
        .service(auth::sign_up)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout);
}

/// Redirect-after-action response.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Redirect that leaves an advisory for the next render.
pub(crate) fn see_other_with_flash(location: &str, advisory: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash::set(advisory))
        .finish()
}
