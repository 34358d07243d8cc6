use actix_session::SessionMiddleware;
use actix_session::config::{PersistentSession, TtlExtensionPolicy};
use actix_web::{App, HttpServer, cookie::time::Duration, middleware, web};

use school_portal::auth::file_store::FileSessionStore;
use school_portal::config::Config;
use school_portal::{auth, db, handlers};

const SESSION_TTL: Duration = Duration::hours(1);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();

    std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");

    let pool = db::init_pool(
        config
            .database_path()
            .to_str()
            .expect("Database path is not valid UTF-8"),
    );
    db::run_migrations(&pool);

    // Seeding completes before the server accepts its first connection.
    if config.seed_demo {
        db::seed_demo(&pool).expect("Failed to seed demo dataset");
    }

    let session_store =
        FileSessionStore::new(config.session_dir.clone()).expect("Failed to create session dir");
    let secret_key = config.session_key();

    log::info!("Starting server at http://127.0.0.1:{}", config.port);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(session_store.clone(), secret_key.clone())
            .cookie_secure(false)
            .cookie_http_only(true)
            .session_lifecycle(
                PersistentSession::default()
                    .session_ttl(SESSION_TTL)
                    .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
            )
            .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Public routes
            .route("/", web::get().to(handlers::auth_handlers::root))
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            .route("/signup", web::get().to(handlers::auth_handlers::signup_page))
            .route("/signup", web::post().to(handlers::auth_handlers::signup_submit))
            // Protected routes
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("/dashboard", web::get().to(handlers::dashboard::index))
                    .route("/logout", web::get().to(handlers::auth_handlers::logout)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(("127.0.0.1", config.port))?
    .run()
    .await
}
