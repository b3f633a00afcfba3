use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use coachdesk_core::permissions::{self, PermissionKey};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::middleware::auth::{RequireAdminsDelete, RequireAdminsRead, RequireAdminsWrite};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    Admin, AdminFilterParams, AdminListResponse, GroupedPermissionsResponse, ModulePermissions,
    RegisterAdminDto, TogglePermissionDto, UpdateAdminDto,
};
use super::service::AdminService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    get,
    path = "/api/admins",
    params(AdminFilterParams),
    responses(
        (status = 200, description = "Administrators plus the permission catalog", body = AdminListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_admins(
    State(state): State<AppState>,
    RequireAdminsRead(_auth): RequireAdminsRead,
    Query(params): Query<AdminFilterParams>,
) -> Result<Json<AdminListResponse>, AppError> {
    let admins = AdminService::get_admins(&state.db, params.status).await?;

    Ok(Json(AdminListResponse {
        available_permissions: permissions::catalog(),
        admins,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admins/permissions",
    responses(
        (status = 200, description = "Permission catalog grouped by module", body = GroupedPermissionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument]
pub async fn get_grouped_permissions(
    RequireAdminsRead(_auth): RequireAdminsRead,
) -> Json<GroupedPermissionsResponse> {
    let modules = permissions::group_by_module(&permissions::catalog())
        .into_iter()
        .map(|(module, actions)| ModulePermissions { module, actions })
        .collect();

    Json(GroupedPermissionsResponse { modules })
}

#[utoipa::path(
    post,
    path = "/api/admins/register",
    request_body = RegisterAdminDto,
    responses(
        (status = 201, description = "Administrator created", body = Admin),
        (status = 400, description = "Unknown permissions or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn register_admin(
    State(state): State<AppState>,
    RequireAdminsWrite(auth): RequireAdminsWrite,
    ValidatedJson(dto): ValidatedJson<RegisterAdminDto>,
) -> Result<(StatusCode, Json<Admin>), AppError> {
    let admin = AdminService::register_admin(&state.db, dto, auth.name()).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

#[utoipa::path(
    put,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Administrator ID")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Administrator updated", body = Admin),
        (status = 400, description = "Unknown permissions or duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Administrator not found", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_admin(
    State(state): State<AppState>,
    RequireAdminsWrite(_auth): RequireAdminsWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAdminDto>,
) -> Result<Json<Admin>, AppError> {
    let admin = AdminService::update_admin(&state.db, id, dto).await?;
    Ok(Json(admin))
}

#[utoipa::path(
    post,
    path = "/api/admins/{id}/permissions/toggle",
    params(("id" = Uuid, Path, description = "Administrator ID")),
    request_body = TogglePermissionDto,
    responses(
        (status = 200, description = "Grant flipped with its cascade applied", body = Admin),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Administrator not found", body = ErrorResponse),
        (status = 422, description = "Malformed permission key", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn toggle_admin_permission(
    State(state): State<AppState>,
    RequireAdminsWrite(_auth): RequireAdminsWrite,
    Path(id): Path<Uuid>,
    Json(dto): Json<TogglePermissionDto>,
) -> Result<Json<Admin>, AppError> {
    let key: PermissionKey = dto
        .permission
        .parse()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("{}", e)))?;

    let admin = AdminService::toggle_permission(&state.db, id, &key).await?;
    Ok(Json(admin))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "Administrator ID")),
    responses(
        (status = 204, description = "Administrator soft-deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Administrator not found", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn soft_delete_admin(
    State(state): State<AppState>,
    RequireAdminsDelete(_auth): RequireAdminsDelete,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminService::soft_delete_admin(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/admins/{id}/restore",
    params(("id" = Uuid, Path, description = "Administrator ID")),
    responses(
        (status = 200, description = "Administrator restored", body = Admin),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "No deleted administrator with this ID", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn restore_admin(
    State(state): State<AppState>,
    RequireAdminsDelete(_auth): RequireAdminsDelete,
    Path(id): Path<Uuid>,
) -> Result<Json<Admin>, AppError> {
    let admin = AdminService::restore_admin(&state.db, id).await?;
    Ok(Json(admin))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}/permanent",
    params(("id" = Uuid, Path, description = "Administrator ID")),
    responses(
        (status = 204, description = "Administrator permanently removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "No deleted administrator with this ID", body = ErrorResponse)
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn permanent_delete_admin(
    State(state): State<AppState>,
    RequireAdminsDelete(_auth): RequireAdminsDelete,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminService::permanent_delete_admin(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
