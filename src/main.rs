use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use faculty_wear_api::application::use_cases::auth::ensure_admin::EnsureAdmin;
use faculty_wear_api::bootstrap::app_context::{AppContext, AppServices};
use faculty_wear_api::bootstrap::config::{Config, MediaBackend};
use faculty_wear_api::infrastructure::db::repositories::faculty_wear_repository_sqlx::SqlxFacultyWearRepository;
use faculty_wear_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            faculty_wear_api::presentation::http::auth::register,
            faculty_wear_api::presentation::http::auth::login,
            faculty_wear_api::presentation::http::auth::logout,
            faculty_wear_api::presentation::http::auth::me,
            faculty_wear_api::presentation::http::faculty_wear::list_wears,
            faculty_wear_api::presentation::http::faculty_wear::get_wear,
            faculty_wear_api::presentation::http::faculty_wear::create_wear,
            faculty_wear_api::presentation::http::faculty_wear::update_wear,
            faculty_wear_api::presentation::http::faculty_wear::delete_wear,
            faculty_wear_api::presentation::http::health::health,
        ),
        components(schemas(
            faculty_wear_api::presentation::http::auth::RegisterRequest,
            faculty_wear_api::presentation::http::auth::LoginRequest,
            faculty_wear_api::presentation::http::auth::LoginResponse,
            faculty_wear_api::presentation::http::auth::UserResponse,
            faculty_wear_api::presentation::http::faculty_wear::FacultyWearItem,
            faculty_wear_api::presentation::http::faculty_wear::WearResponse,
            faculty_wear_api::presentation::http::faculty_wear::WearListResponse,
            faculty_wear_api::presentation::http::faculty_wear::WearMultipart,
            faculty_wear_api::presentation::http::envelope::ErrorResponse,
            faculty_wear_api::presentation::http::envelope::MessageResponse,
            faculty_wear_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Authentication"),
            (name = "Faculty Wear", description = "Faculty wear catalogue"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
            http::Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);

    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin).allow_credentials(true),
        Some(Err(_)) => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
        // Production refuses to start without FRONTEND_URL, deny everything anyway
        None if cfg.is_production => {
            base.allow_origin(AllowOrigin::exact(HeaderValue::from_static("http://invalid")))
        }
        None => base
            .allow_origin(AllowOrigin::mirror_request())
            .allow_credentials(true),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "ctrl_c_listener_failed");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!(error = ?e, "sigterm_listener_failed"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown_signal_received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "faculty_wear_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting faculty wear API");

    // Database
    let pool = faculty_wear_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
    faculty_wear_api::infrastructure::db::migrate(&pool).await?;

    let wear_repo = Arc::new(SqlxFacultyWearRepository::new(pool.clone()));
    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));

    if let (Some(email), Some(password)) = (&cfg.admin_email, &cfg.admin_password) {
        let uc = EnsureAdmin {
            repo: user_repo.as_ref(),
        };
        if !uc.execute(email, &cfg.admin_name, password).await? {
            info!(email = %email, "admin_account_exists");
        }
    }

    // Ensure uploads dir exists
    if matches!(cfg.media_backend, MediaBackend::Filesystem) {
        if let Err(e) = tokio::fs::create_dir_all(&cfg.storage_root).await {
            tracing::warn!(error = ?e, dir = %cfg.storage_root, "Failed to create uploads dir");
        }
    }
    let media_store = faculty_wear_api::infrastructure::media::build_media_store(&cfg).await?;
    info!(backend = ?cfg.media_backend, folder = %cfg.media_folder, "media_store_ready");

    let services = AppServices::new(wear_repo, user_repo, media_store);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = Router::new()
        .nest(
            "/api",
            faculty_wear_api::presentation::http::health::routes(pool.clone()),
        )
        .merge(faculty_wear_api::presentation::http::api_router(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("server_stopped");
    Ok(())
}
