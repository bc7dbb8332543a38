use crate::{
    auth::Identity,
    due,
    error::AppError,
    flash::{self, Flash},
    models::{Task, TaskInput},
    routes::{see_other, see_other_with_flash},
    tasks,
};
use actix_web::{get, post, route, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Builds the task-list render payload: both list views (overdue flags
/// freshly recomputed), the create-form date/time defaults, and any pending
/// advisory, which is consumed here.
async fn render_home(pool: &SqlitePool, req: &HttpRequest) -> Result<HttpResponse, AppError> {
    let (pending, completed) = tasks::list(pool, &due::now_string()).await?;

    let advisory = flash::take(req);
    let mut response = HttpResponse::Ok();
    if advisory.is_some() {
        response.cookie(flash::clear());
    }
    Ok(response.json(json!({
        "date": due::today_string(),
        "time": due::current_time_string(),
        "pending": pending,
        "completed": completed,
        "flash": advisory.map(|f| f.message()),
    })))
}

/// Loads a task and checks it belongs to the caller. Foreign tasks are
/// answered exactly like missing ones.
async fn owned_task(pool: &SqlitePool, task_id: i64, identity: Identity) -> Result<Task, AppError> {
    let user_id = identity
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("Sign in to modify tasks".into()))?;

    let task = tasks::fetch(pool, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    if task.user_id != user_id {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(task)
}

#[get("/")]
pub async fn home(
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    render_home(&pool, &req).await
}

/// Creates a task owned by the caller, then renders the refreshed list.
/// Anonymous callers get an advisory and a redirect home instead; the store
/// is never touched.
#[post("/")]
pub async fn create_task(
    pool: web::Data<SqlitePool>,
    identity: Identity,
    form: web::Form<TaskInput>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let user_id = match identity.user_id() {
        Some(id) => id,
        None => return Ok(see_other_with_flash("/", Flash::SignInRequired)),
    };

    form.validate()?;
    tasks::insert(&pool, user_id, &form).await?;

    render_home(&pool, &req).await
}

#[route("/done/{id}", method = "GET", method = "POST")]
pub async fn mark_done(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    owned_task(&pool, task_id, identity).await?;
    tasks::set_done(&pool, task_id, true).await?;
    Ok(see_other("/"))
}

#[route("/restore/{id}", method = "GET", method = "POST")]
pub async fn restore_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    owned_task(&pool, task_id, identity).await?;
    tasks::set_done(&pool, task_id, false).await?;
    Ok(see_other("/"))
}

#[route("/delete/{id}", method = "GET", method = "POST")]
pub async fn delete_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    owned_task(&pool, task_id, identity).await?;
    tasks::delete(&pool, task_id).await?;
    Ok(see_other("/"))
}

/// Renders the edit form payload with the due value split back into its
/// date and time parts.
#[get("/edit/{id}")]
pub async fn edit_form(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let task = owned_task(&pool, task_id.into_inner(), identity).await?;

    let (date, time) = match task.due.as_deref() {
        Some(due) => {
            let (date, time) = due::split_due(due);
            (date.to_string(), time.to_string())
        }
        None => (String::new(), String::new()),
    };

    Ok(HttpResponse::Ok().json(json!({
        "task": task,
        "date": date,
        "time": time,
    })))
}

/// Applies text/due edits and redirects home. The done flag survives.
#[post("/edit/{id}")]
pub async fn edit_task(
    pool: web::Data<SqlitePool>,
    task_id: web::Path<i64>,
    identity: Identity,
    form: web::Form<TaskInput>,
) -> Result<impl Responder, AppError> {
    form.validate()?;

    let task_id = task_id.into_inner();
    owned_task(&pool, task_id, identity).await?;
    tasks::update(&pool, task_id, &form).await?;

    Ok(see_other("/"))
}
