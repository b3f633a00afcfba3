//! Permission preset models and DTOs.
//!
//! A preset is a named, reusable permission-set template. Applying one to an
//! admin form replaces the current selection wholesale; presets themselves
//! are edited through the same hierarchy engine as admin grants, so a saved
//! preset is consistent by construction.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Preset {
    pub id: Uuid,
    pub name: String,
    pub permissions: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// DTOs

/// A preset needs a name and at least one permission before it can be
/// saved; both rules fail the request before any query runs.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePresetDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Preset name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(min = 1, message = "A preset needs at least one permission"))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePresetDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Preset name must be between 1 and 100 characters"
    ))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "A preset needs at least one permission"))]
    pub permissions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_preset_dto_requires_name_and_permissions() {
        let valid = CreatePresetDto {
            name: "Front desk".to_string(),
            permissions: vec!["students:read".to_string()],
        };
        assert!(valid.validate().is_ok());

        let no_name = CreatePresetDto {
            name: String::new(),
            permissions: vec!["students:read".to_string()],
        };
        assert!(no_name.validate().is_err());

        let no_permissions = CreatePresetDto {
            name: "Front desk".to_string(),
            permissions: vec![],
        };
        assert!(no_permissions.validate().is_err());
    }

    #[test]
    fn test_update_preset_dto_rejects_emptied_permissions() {
        let emptied = UpdatePresetDto {
            name: None,
            permissions: Some(vec![]),
        };
        assert!(emptied.validate().is_err());

        let untouched = UpdatePresetDto {
            name: Some("Renamed".to_string()),
            permissions: None,
        };
        assert!(untouched.validate().is_ok());
    }
}
