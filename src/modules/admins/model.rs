//! Administrator data models and DTOs.
//!
//! An administrator carries a flat permission set (`module:action` strings)
//! edited through the hierarchy engine, and a lifecycle: active, blocked
//! (`is_active = false`) or soft-deleted (`deleted_at` set). Soft-deleted
//! rows can be restored or purged.

use coachdesk_core::permissions::Action;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// An administrator account.
///
/// The password hash never leaves the database layer; this struct is the
/// response shape.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    /// Display name of the administrator who created this account
    pub added_by: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Lifecycle filter for the admin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Active,
    Blocked,
    Deleted,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AdminFilterParams {
    /// Lifecycle filter; omitted means every non-deleted admin
    pub status: Option<AdminStatus>,
}

// DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterAdminDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    /// Initial permission grants; must all be catalog keys
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(email(message = "A valid email address is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: Option<String>,
    /// Full replacement of the grant list when present (preset application)
    pub permissions: Option<Vec<String>>,
    /// `false` blocks the account without deleting it
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TogglePermissionDto {
    /// The `module:action` key being flipped
    pub permission: String,
}

/// Admin list plus the permission catalog the panel renders checkboxes from.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminListResponse {
    pub available_permissions: Vec<String>,
    pub admins: Vec<Admin>,
}

/// One module of the catalog with its actions in canonical order.
#[derive(Debug, Serialize, ToSchema)]
pub struct ModulePermissions {
    pub module: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupedPermissionsResponse {
    pub modules: Vec<ModulePermissions>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_admin_dto_validation() {
        let dto = RegisterAdminDto {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
            phone_number: "01700000000".to_string(),
            permissions: vec![],
        };
        assert!(dto.validate().is_ok());

        let dto_short_password = RegisterAdminDto {
            password: "short".to_string(),
            ..dto
        };
        assert!(dto_short_password.validate().is_err());
    }

    #[test]
    fn test_register_admin_dto_permissions_default_empty() {
        let json = r#"{"name":"Jane","email":"jane@test.com","password":"password123","phone_number":"01700000000"}"#;
        let dto: RegisterAdminDto = serde_json::from_str(json).unwrap();
        assert!(dto.permissions.is_empty());
    }

    #[test]
    fn test_update_admin_dto_rejects_bad_email() {
        let dto = UpdateAdminDto {
            name: None,
            email: Some("not-an-email".to_string()),
            phone_number: None,
            permissions: None,
            is_active: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_admin_status_deserializes_lowercase() {
        let status: AdminStatus = serde_json::from_str(r#""blocked""#).unwrap();
        assert_eq!(status, AdminStatus::Blocked);
        assert!(serde_json::from_str::<AdminStatus>(r#""retired""#).is_err());
    }
}
