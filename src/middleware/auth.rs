use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and exposes the authenticated
/// administrator's claims.
///
/// The claims are the session context for a request: populated at login,
/// presented on every call, gone when the token expires. Authorization reads
/// the flat permission list straight from them — the read/write/delete
/// hierarchy is enforced when the set is edited, not re-derived here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Check if the administrator holds a specific permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.0.permissions.iter().any(|p| p == permission)
    }

    /// Check if the administrator holds any of the specified permissions
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// Check if the administrator holds all of the specified permissions
    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }

    /// Get the administrator ID as UUID
    pub fn admin_id(&self) -> Result<uuid::Uuid, AppError> {
        uuid::Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid admin ID in token".to_string()))
    }

    /// Get the administrator's display name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Get the administrator's email
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Generates an extractor that authenticates the request and requires one
/// permission, so handlers state their guard in the signature.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::utils::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                if !auth_user.has_permission($permission) {
                    return Err($crate::utils::errors::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

// One extractor per catalog permission

// Students permissions
require_permission!(RequireStudentsRead, coachdesk_core::permissions::STUDENTS_READ);
require_permission!(RequireStudentsWrite, coachdesk_core::permissions::STUDENTS_WRITE);
require_permission!(RequireStudentsDelete, coachdesk_core::permissions::STUDENTS_DELETE);

// Admins permissions
require_permission!(RequireAdminsRead, coachdesk_core::permissions::ADMINS_READ);
require_permission!(RequireAdminsWrite, coachdesk_core::permissions::ADMINS_WRITE);
require_permission!(RequireAdminsDelete, coachdesk_core::permissions::ADMINS_DELETE);

// Attendance permissions
require_permission!(RequireAttendanceRead, coachdesk_core::permissions::ATTENDANCE_READ);
require_permission!(RequireAttendanceWrite, coachdesk_core::permissions::ATTENDANCE_WRITE);

// Reports permissions
require_permission!(RequireReportsRead, coachdesk_core::permissions::REPORTS_READ);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;
    use uuid::Uuid;

    fn create_test_claims(permissions: Vec<String>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            name: "Test Admin".to_string(),
            email: "test@example.com".to_string(),
            permissions,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_has_permission() {
        let claims = create_test_claims(vec![
            "students:read".to_string(),
            "students:write".to_string(),
        ]);
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_permission("students:read"));
        assert!(auth_user.has_permission("students:write"));
        assert!(!auth_user.has_permission("students:delete"));
    }

    #[test]
    fn test_has_any_permission() {
        let claims = create_test_claims(vec!["admins:read".to_string()]);
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_any_permission(&["admins:read", "admins:delete"]));
        assert!(!auth_user.has_any_permission(&["admins:write", "admins:delete"]));
    }

    #[test]
    fn test_has_all_permissions() {
        let claims = create_test_claims(vec![
            "students:read".to_string(),
            "students:write".to_string(),
            "admins:read".to_string(),
        ]);
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_all_permissions(&["students:read", "admins:read"]));
        assert!(!auth_user.has_all_permissions(&["students:read", "students:delete"]));
    }

    #[test]
    fn test_inconsistent_stored_set_is_honored_verbatim() {
        // A write grant without its implied read is authorized as stored;
        // the hierarchy belongs to the editing flow, not the checks.
        let claims = create_test_claims(vec!["students:write".to_string()]);
        let auth_user = AuthUser(claims);

        assert!(auth_user.has_permission("students:write"));
        assert!(!auth_user.has_permission("students:read"));
    }

    #[test]
    fn test_admin_id() {
        let admin_id = Uuid::new_v4();
        let claims = Claims {
            sub: admin_id.to_string(),
            name: "Test Admin".to_string(),
            email: "test@example.com".to_string(),
            permissions: vec![],
            exp: 9999999999,
            iat: 1234567890,
        };
        let auth_user = AuthUser(claims);

        assert_eq!(auth_user.admin_id().unwrap(), admin_id);
    }
}
