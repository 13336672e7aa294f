//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use crate::domain::ports::{FixtureCourseRepository, FixtureUserRepository};
use crate::inbound::http::courses::{
    create_course, delete_course, get_course, list_courses, update_course,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, get_current_user};
use crate::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselUserRepository, PoolConfig,
};

/// Build handler state from the configured pool, or fall back to in-memory
/// fixtures when no database is configured.
pub fn build_state(pool: Option<DbPool>) -> HttpState {
    match pool {
        Some(pool) => HttpState::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCourseRepository::new(pool)),
        ),
        None => {
            warn!("DATABASE_URL not set; using in-memory fixture repositories");
            let users = Arc::new(FixtureUserRepository::new());
            let courses = Arc::new(FixtureCourseRepository::new(users.clone()));
            HttpState::new(users, courses)
        }
    }
}

/// Assemble the application with every route registered.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(get_current_user)
        .service(create_user)
        .service(list_courses)
        .service(get_course)
        .service(create_course)
        .service(update_course)
        .service(delete_course)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.route(
        "/api-docs/openapi.json",
        web::get().to(crate::doc::openapi_json),
    );

    app
}

/// Construct the HTTP server: pool (when configured), state, and listener.
///
/// Readiness flips on only after state construction succeeds, so probes stay
/// 503 while the pool is still being built.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let pool = match config.database_url() {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            info!("connected to PostgreSQL");
            Some(pool)
        }
        None => None,
    };

    let http_state = web::Data::new(build_state(pool));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
