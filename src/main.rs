use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use careersync_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{
        auth::{require_auth, require_employer, require_talent},
        cors::permissive_cors,
        rate_limit::{new_rps_state, rps_middleware},
    },
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let auth_public = Router::new()
        .route("/api/v1/auth/register", post(routes::auth::register))
        .route("/api/v1/auth/login", post(routes::auth::login))
        .route("/api/v1/auth/logout", get(routes::auth::logout))
        .route("/api/v1/auth/verify-Email", get(routes::auth::verify_email))
        .route(
            "/api/v1/auth/resend-verification",
            post(routes::auth::resend_verification),
        )
        .layer(from_fn_with_state(
            new_rps_state(config.auth_rps),
            rps_middleware,
        ));

    let auth_protected = Router::new()
        .route("/api/v1/auth/updateUser", patch(routes::auth::update_user))
        .route(
            "/api/v1/auth/showCurrentUser",
            get(routes::auth::show_current_user),
        )
        .route(
            "/api/v1/auth/updateUserPassword",
            patch(routes::auth::update_user_password),
        )
        .layer(from_fn(require_auth));

    let jobs_employer = Router::new()
        .route(
            "/api/v1/jobs",
            post(routes::jobs::create_job).get(routes::jobs::list_jobs),
        )
        .route(
            "/api/v1/jobs/:id",
            get(routes::jobs::get_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route("/api/v1/jobs/:id/close", patch(routes::jobs::close_job))
        .layer(from_fn(require_employer));

    let jobs_talent = Router::new()
        .route(
            "/api/v1/jobs/applyForJob/:id",
            post(routes::jobs::apply_for_job),
        )
        .route(
            "/api/v1/jobs/myApplications",
            get(routes::jobs::my_applications),
        )
        .layer(from_fn(require_talent));

    let applications_talent = Router::new()
        .route(
            "/api/v1/applications/my",
            get(routes::applications::my_applications),
        )
        .route(
            "/api/v1/applications/:id/withdraw",
            patch(routes::applications::withdraw),
        )
        .layer(from_fn(require_talent));

    let applications_employer = Router::new()
        .route(
            "/api/v1/applications/job/:jobId",
            get(routes::applications::job_applications),
        )
        .route(
            "/api/v1/applications/:id/:applicantId/status",
            patch(routes::applications::update_status),
        )
        .layer(from_fn(require_employer));

    let organizations_employer = Router::new()
        .route(
            "/api/v1/organization",
            post(routes::organizations::create_organization)
                .get(routes::organizations::my_organizations),
        )
        .route(
            "/api/v1/organization/:id",
            patch(routes::organizations::update_organization)
                .delete(routes::organizations::delete_organization),
        )
        .route(
            "/api/v1/organization/:id/followers",
            get(routes::organizations::organization_followers),
        )
        .layer(from_fn(require_employer));

    let organizations_talent = Router::new()
        .route(
            "/api/v1/organization/:id/follow",
            post(routes::organizations::follow_organization),
        )
        .route(
            "/api/v1/organization/:id/is-following",
            get(routes::organizations::is_following),
        )
        .layer(from_fn(require_talent));

    let organizations_public = Router::new()
        .route(
            "/api/v1/organization/public",
            get(routes::organizations::public_organizations),
        )
        .route(
            "/api/v1/organization/public/:id",
            get(routes::organizations::public_organization),
        )
        .route(
            "/api/v1/organization/public/:id/followers/count",
            get(routes::organizations::public_follower_count),
        )
        .layer(from_fn_with_state(
            new_rps_state(config.public_rps),
            rps_middleware,
        ));

    let talents_employer = Router::new()
        .route("/api/v1/talents", get(routes::talents::list_talents))
        .route(
            "/api/v1/talents/export-applications",
            get(routes::talents::export_applications),
        )
        .route(
            "/api/v1/talents/:talentId",
            get(routes::talents::get_talent),
        )
        .layer(from_fn(require_employer));

    let uploads_dir = config.uploads_dir.clone();
    info!("Serving uploads from: {}", uploads_dir);

    let app = base_routes
        .merge(auth_public)
        .merge(auth_protected)
        .merge(jobs_employer)
        .merge(jobs_talent)
        .merge(applications_talent)
        .merge(applications_employer)
        .merge(organizations_employer)
        .merge(organizations_talent)
        .merge(organizations_public)
        .merge(talents_employer)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(uploads_dir),
        )
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
