use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::faculty_wear::create_wear::CreateWear;
use crate::application::use_cases::faculty_wear::delete_wear::DeleteWear;
use crate::application::use_cases::faculty_wear::get_wear::GetWear;
use crate::application::use_cases::faculty_wear::list_wears::{ListQuery, ListWears};
use crate::application::use_cases::faculty_wear::update_wear::UpdateWear;
use crate::bootstrap::app_context::AppContext;
use crate::domain::faculty_wear::{FacultyWear, ImageUpload, WearForm};
use crate::presentation::http::auth::{Bearer, validate_bearer};
use crate::presentation::http::envelope::{ApiError, MessageResponse};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyWearItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub badge_text: String,
    pub standard_price: f64,
    pub custom_price: Option<f64>,
    pub add_to_cart_text: String,
    pub add_to_cart_link: String,
    pub buy_now_text: String,
    pub buy_now_link: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FacultyWear> for FacultyWearItem {
    fn from(w: FacultyWear) -> Self {
        Self {
            id: w.id,
            title: w.title,
            description: w.description,
            image_url: w.image_url,
            badge_text: w.badge_text,
            standard_price: w.standard_price,
            custom_price: w.custom_price,
            add_to_cart_text: w.add_to_cart_text,
            add_to_cart_link: w.add_to_cart_link,
            buy_now_text: w.buy_now_text,
            buy_now_link: w.buy_now_link,
            order: w.display_order,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WearResponse {
    pub success: bool,
    pub data: FacultyWearItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WearListResponse {
    pub success: bool,
    pub data: Vec<FacultyWearItem>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// Form fields accepted by create and update.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct WearMultipart {
    title: String,
    description: String,
    standard_price: String,
    order: String,
    badge_text: Option<String>,
    custom_price: Option<String>,
    add_to_cart_text: Option<String>,
    add_to_cart_link: Option<String>,
    buy_now_text: Option<String>,
    buy_now_link: Option<String>,
    /// Required on create, optional on update
    #[schema(value_type = String, format = Binary)]
    image: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/faculty-wear", get(list_wears).post(create_wear))
        .route("/faculty-wear/", get(list_wears).post(create_wear))
        .route(
            "/faculty-wear/:id",
            get(get_wear).put(update_wear).delete(delete_wear),
        )
        .with_state(ctx)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::BadRequest("Invalid wear id".into()))
}

fn parse_number(raw: Option<&str>, name: &str) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{name} must be a whole number"))),
    }
}

/// Splits a multipart body into text fields and the optional image part.
/// A file part without a filename counts as no file.
async fn read_wear_form(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<(WearForm, Option<ImageUpload>), ApiError> {
    let mut form = WearForm::default();
    let mut image = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            if bytes.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge);
            }
            if let Some(filename) = filename.filter(|f| !f.trim().is_empty()) {
                image = Some(ImageUpload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await?;
            if !form.set_field(&name, value) {
                tracing::debug!(field = %name, "unknown_form_field_ignored");
            }
        }
    }
    Ok((form, image))
}

#[utoipa::path(get, path = "/api/faculty-wear", tag = "Faculty Wear", params(
        ("page" = Option<i64>, Query, description = "1-based page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 5, at most 100)"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on title, description or badge text")
    ), security(()), responses(
    (status = 200, body = WearListResponse),
    (status = 400, body = crate::presentation::http::envelope::ErrorResponse)
))]
pub async fn list_wears(
    State(ctx): State<AppContext>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<WearListResponse>, ApiError> {
    let Query(params) = params?;
    let query = ListQuery {
        page: parse_number(params.page.as_deref(), "page")?,
        limit: parse_number(params.limit.as_deref(), "limit")?,
        search: params.search,
    };
    let repo = ctx.wear_repo();
    let uc = ListWears {
        repo: repo.as_ref(),
    };
    let page = uc.execute(&query).await?;
    Ok(Json(WearListResponse {
        success: true,
        data: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }))
}

#[utoipa::path(get, path = "/api/faculty-wear/{id}", tag = "Faculty Wear", params(("id" = Uuid, Path, description = "Wear ID")), security(()), responses(
    (status = 200, body = WearResponse),
    (status = 404, body = crate::presentation::http::envelope::ErrorResponse)
))]
pub async fn get_wear(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<WearResponse>, ApiError> {
    let id = parse_id(&id)?;
    let repo = ctx.wear_repo();
    let uc = GetWear {
        repo: repo.as_ref(),
    };
    let wear = uc.execute(id).await?;
    Ok(Json(WearResponse {
        success: true,
        data: wear.into(),
        message: None,
    }))
}

#[utoipa::path(post, path = "/api/faculty-wear", tag = "Faculty Wear", request_body(content = WearMultipart, content_type = "multipart/form-data"), responses(
    (status = 201, body = WearResponse),
    (status = 400, body = crate::presentation::http::envelope::ErrorResponse),
    (status = 401, body = crate::presentation::http::envelope::ErrorResponse),
    (status = 413, body = crate::presentation::http::envelope::ErrorResponse)
))]
pub async fn create_wear(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    multipart: Multipart,
) -> Result<(StatusCode, Json<WearResponse>), ApiError> {
    let user_id = validate_bearer(&ctx.cfg, bearer)?;
    let (form, image) = read_wear_form(multipart, ctx.cfg.upload_max_bytes).await?;
    let repo = ctx.wear_repo();
    let media = ctx.media_store();
    let uc = CreateWear {
        repo: repo.as_ref(),
        media: media.as_ref(),
        folder: &ctx.cfg.media_folder,
    };
    let wear = uc.execute(&form, image.as_ref()).await?;
    tracing::debug!(user_id = %user_id, wear_id = %wear.id, "create_wear_handled");
    Ok((
        StatusCode::CREATED,
        Json(WearResponse {
            success: true,
            data: wear.into(),
            message: Some("Faculty wear created successfully".into()),
        }),
    ))
}

#[utoipa::path(put, path = "/api/faculty-wear/{id}", tag = "Faculty Wear", params(("id" = Uuid, Path, description = "Wear ID")), request_body(content = WearMultipart, content_type = "multipart/form-data"), responses(
    (status = 200, body = WearResponse),
    (status = 400, body = crate::presentation::http::envelope::ErrorResponse),
    (status = 401, body = crate::presentation::http::envelope::ErrorResponse),
    (status = 404, body = crate::presentation::http::envelope::ErrorResponse)
))]
pub async fn update_wear(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<WearResponse>, ApiError> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = parse_id(&id)?;
    let (form, image) = read_wear_form(multipart, ctx.cfg.upload_max_bytes).await?;
    let repo = ctx.wear_repo();
    let media = ctx.media_store();
    let uc = UpdateWear {
        repo: repo.as_ref(),
        media: media.as_ref(),
        folder: &ctx.cfg.media_folder,
    };
    let wear = uc.execute(id, &form, image.as_ref()).await?;
    Ok(Json(WearResponse {
        success: true,
        data: wear.into(),
        message: Some("Faculty wear updated successfully".into()),
    }))
}

#[utoipa::path(delete, path = "/api/faculty-wear/{id}", tag = "Faculty Wear", params(("id" = Uuid, Path, description = "Wear ID")), responses(
    (status = 200, body = MessageResponse),
    (status = 401, body = crate::presentation::http::envelope::ErrorResponse),
    (status = 404, body = crate::presentation::http::envelope::ErrorResponse)
))]
pub async fn delete_wear(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_bearer(&ctx.cfg, bearer)?;
    let id = parse_id(&id)?;
    let repo = ctx.wear_repo();
    let media = ctx.media_store();
    let uc = DeleteWear {
        repo: repo.as_ref(),
        media: media.as_ref(),
    };
    uc.execute(id).await?;
    Ok(Json(MessageResponse::new("Faculty wear deleted successfully")))
}
