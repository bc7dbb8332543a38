use crate::{
    auth::{
        clear_session_cookie, generate_token, hash_password, session_cookie, verify_password,
        LoginRequest, RegisterRequest,
    },
    error::AppError,
    flash::{self, Flash},
    models::User,
    routes::{see_other, see_other_with_flash},
};
use actix_web::{get, http::header, post, web, HttpRequest, HttpResponse, Responder};
use log::info;
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Render payload for the registration and login pages: the page name plus
/// any pending advisory, which is consumed here.
fn render_form_page(page: &str, req: &HttpRequest) -> HttpResponse {
    let advisory = flash::take(req);
    let mut response = HttpResponse::Ok();
    if advisory.is_some() {
        response.cookie(flash::clear());
    }
    response.json(json!({
        "page": page,
        "flash": advisory.map(|f| f.message()),
    }))
}

#[get("/sign_up")]
pub async fn sign_up_form(req: HttpRequest) -> impl Responder {
    render_form_page("sign_up", &req)
}

/// Processes the registration form.
///
/// A taken email leaves an advisory and sends the user back to the form.
/// Success redirects home without establishing a session: registering does
/// not log the user in.
#[post("/sign_up")]
pub async fn sign_up(
    pool: web::Data<SqlitePool>,
    form: web::Form<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    form.validate()?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE email = ?")
        .bind(&form.email)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Ok(see_other_with_flash("/sign_up", Flash::EmailTaken));
    }

    let password_hash = hash_password(&form.password)?;

    sqlx::query("INSERT INTO users (email, username, password_hash) VALUES (?, ?, ?)")
        .bind(&form.email)
        .bind(&form.username)
        .bind(password_hash)
        .execute(&**pool)
        .await?;

    info!("Registered account for {}", form.email);
    Ok(see_other("/"))
}

#[get("/login")]
pub async fn login_form(req: HttpRequest) -> impl Responder {
    render_form_page("login", &req)
}

/// Processes the login form.
///
/// Unknown email and wrong password are distinct outcomes internally, but
/// both surface as an advisory and a redirect back to the form. Success
/// sets the session cookie and redirects home.
#[post("/login")]
pub async fn login(
    pool: web::Data<SqlitePool>,
    form: web::Form<LoginRequest>,
) -> Result<impl Responder, AppError> {
    form.validate()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, username, password_hash FROM users WHERE email = ?",
    )
    .bind(&form.email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => {
            if verify_password(&form.password, &user.password_hash)? {
                let token = generate_token(user.id)?;
                Ok(HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/"))
                    .cookie(session_cookie(token))
                    .finish())
            } else {
                info!("Failed login for {}: wrong password", form.email);
                Ok(see_other_with_flash("/login", Flash::WrongPassword))
            }
        }
        None => {
            info!("Failed login for {}: no such account", form.email);
            Ok(see_other_with_flash("/login", Flash::UnknownEmail))
        }
    }
}

/// Clears the session and redirects home.
#[get("/logout")]
pub async fn logout() -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(clear_session_cookie())
        .finish()
}
