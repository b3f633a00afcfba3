use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use coachdesk_core::permissions::PermissionKey;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::{RequireAdminsDelete, RequireAdminsRead, RequireAdminsWrite};
use crate::modules::admins::controller::ErrorResponse;
use crate::modules::admins::model::TogglePermissionDto;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreatePresetDto, Preset, UpdatePresetDto};
use super::service::PresetService;

#[utoipa::path(
    get,
    path = "/api/permission-presets",
    responses(
        (status = 200, description = "List of presets", body = Vec<Preset>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Presets",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_presets(
    State(state): State<AppState>,
    RequireAdminsRead(_auth): RequireAdminsRead,
) -> Result<Json<Vec<Preset>>, AppError> {
    let presets = PresetService::get_presets(&state.db).await?;
    Ok(Json(presets))
}

#[utoipa::path(
    post,
    path = "/api/permission-presets",
    request_body = CreatePresetDto,
    responses(
        (status = 201, description = "Preset created", body = Preset),
        (status = 400, description = "Unknown permissions or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Missing name or empty permission list", body = ErrorResponse)
    ),
    tag = "Presets",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_preset(
    State(state): State<AppState>,
    RequireAdminsWrite(_auth): RequireAdminsWrite,
    ValidatedJson(dto): ValidatedJson<CreatePresetDto>,
) -> Result<(StatusCode, Json<Preset>), AppError> {
    let preset = PresetService::create_preset(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(preset)))
}

#[utoipa::path(
    patch,
    path = "/api/permission-presets/{id}",
    params(("id" = Uuid, Path, description = "Preset ID")),
    request_body = UpdatePresetDto,
    responses(
        (status = 200, description = "Preset updated", body = Preset),
        (status = 400, description = "Unknown permissions or duplicate name", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Preset not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Presets",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_preset(
    State(state): State<AppState>,
    RequireAdminsWrite(_auth): RequireAdminsWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePresetDto>,
) -> Result<Json<Preset>, AppError> {
    let preset = PresetService::update_preset(&state.db, id, dto).await?;
    Ok(Json(preset))
}

#[utoipa::path(
    post,
    path = "/api/permission-presets/{id}/permissions/toggle",
    params(("id" = Uuid, Path, description = "Preset ID")),
    request_body = TogglePermissionDto,
    responses(
        (status = 200, description = "Grant flipped with its cascade applied", body = Preset),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Preset not found", body = ErrorResponse),
        (status = 422, description = "Malformed permission key", body = ErrorResponse)
    ),
    tag = "Presets",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn toggle_preset_permission(
    State(state): State<AppState>,
    RequireAdminsWrite(_auth): RequireAdminsWrite,
    Path(id): Path<Uuid>,
    Json(dto): Json<TogglePermissionDto>,
) -> Result<Json<Preset>, AppError> {
    let key: PermissionKey = dto
        .permission
        .parse()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("{}", e)))?;

    let preset = PresetService::toggle_permission(&state.db, id, &key).await?;
    Ok(Json(preset))
}

#[utoipa::path(
    delete,
    path = "/api/permission-presets/{id}",
    params(("id" = Uuid, Path, description = "Preset ID")),
    responses(
        (status = 204, description = "Preset deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Preset not found", body = ErrorResponse)
    ),
    tag = "Presets",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_preset(
    State(state): State<AppState>,
    RequireAdminsDelete(_auth): RequireAdminsDelete,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    PresetService::delete_preset(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
