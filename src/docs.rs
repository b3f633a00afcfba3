use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coachdesk_core::pagination::{PaginationMeta, PaginationParams};
use coachdesk_core::permissions::Action;

use crate::modules::admins::controller::ErrorResponse;
use crate::modules::admins::model::{
    Admin, AdminFilterParams, AdminListResponse, AdminStatus, GroupedPermissionsResponse,
    ModulePermissions, RegisterAdminDto, TogglePermissionDto, UpdateAdminDto,
};
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::presets::model::{CreatePresetDto, Preset, UpdatePresetDto};
use crate::modules::students::model::{
    CreateStudentDto, Gender, PaginatedStudentsResponse, Student, StudentFilterParams,
    UpdateStudentDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_admin,
        crate::modules::admins::controller::get_admins,
        crate::modules::admins::controller::get_grouped_permissions,
        crate::modules::admins::controller::register_admin,
        crate::modules::admins::controller::update_admin,
        crate::modules::admins::controller::toggle_admin_permission,
        crate::modules::admins::controller::soft_delete_admin,
        crate::modules::admins::controller::restore_admin,
        crate::modules::admins::controller::permanent_delete_admin,
        crate::modules::presets::controller::get_presets,
        crate::modules::presets::controller::create_preset,
        crate::modules::presets::controller::update_preset,
        crate::modules::presets::controller::toggle_preset_permission,
        crate::modules::presets::controller::delete_preset,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
    ),
    components(
        schemas(
            Action,
            Admin,
            AdminFilterParams,
            AdminListResponse,
            AdminStatus,
            CreatePresetDto,
            CreateStudentDto,
            ErrorResponse,
            Gender,
            GroupedPermissionsResponse,
            LoginRequest,
            LoginResponse,
            ModulePermissions,
            PaginatedStudentsResponse,
            PaginationMeta,
            PaginationParams,
            Preset,
            RegisterAdminDto,
            Student,
            StudentFilterParams,
            TogglePermissionDto,
            UpdateAdminDto,
            UpdatePresetDto,
            UpdateStudentDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Administrator login"),
        (name = "Admins", description = "Administrator and permission management"),
        (name = "Presets", description = "Reusable permission-set templates"),
        (name = "Students", description = "Student directory")
    ),
    info(
        title = "Coachdesk API",
        version = "0.1.0",
        description = "REST backend for a coaching-center administration panel: admin login, hierarchical permission management and the student directory.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
