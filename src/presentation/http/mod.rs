pub mod auth;
pub mod envelope;
pub mod faculty_wear;
pub mod health;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::services::ServeDir;

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::MediaBackend;
use crate::infrastructure::media::UPLOADS_ROUTE;

/// Room for multipart boundaries, part headers and the text fields on top of
/// the image itself, which `read_wear_form` limits separately.
pub const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes that only need the application context: auth, the catalogue and,
/// for the filesystem media backend, the uploaded images themselves.
pub fn api_router(ctx: AppContext) -> Router {
    let mut router = Router::new()
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", faculty_wear::routes(ctx.clone()));
    if ctx.cfg.media_backend == MediaBackend::Filesystem {
        router = router.nest_service(UPLOADS_ROUTE, ServeDir::new(&ctx.cfg.storage_root));
    }
    router.layer(DefaultBodyLimit::max(
        ctx.cfg.upload_max_bytes.saturating_add(FORM_OVERHEAD_BYTES),
    ))
}
