//! Student directory models and DTOs.

use coachdesk_core::pagination::{PaginationMeta, PaginationParams};
use coachdesk_core::serde::deserialize_optional_bool;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A student enrolled at the coaching center.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Optional portal credential
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
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
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StudentFilterParams {
    /// Filter by enrollment status
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_student_dto_validation() {
        let dto = CreateStudentDto {
            name: "Riad Hasan".to_string(),
            email: "riad@example.com".to_string(),
            password: None,
            phone_number: "01812345678".to_string(),
            guardian_name: Some("Kamal Hasan".to_string()),
            guardian_phone: Some("01898765432".to_string()),
            date_of_birth: None,
            gender: Some(Gender::Male),
            address: Some("Mirpur, Dhaka".to_string()),
        };
        assert!(dto.validate().is_ok());

        let bad_email = CreateStudentDto {
            email: "not-an-email".to_string(),
            ..dto
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_short_optional_password_is_rejected() {
        let json = r#"{"name":"Riad","email":"riad@test.com","password":"short","phone_number":"018"}"#;
        let dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_gender_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), r#""FEMALE""#);
        let parsed: Gender = serde_json::from_str(r#""OTHER""#).unwrap();
        assert_eq!(parsed, Gender::Other);
    }
}
