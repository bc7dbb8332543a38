use actix_web::{middleware::Logger, web, App, HttpServer};
use duetrack::{config::Config, db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open the database");
    db::init_schema(&pool)
        .await
        .expect("Failed to create the database schema");

    log::info!("Starting duetrack server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
