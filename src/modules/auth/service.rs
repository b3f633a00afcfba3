use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::admins::model::Admin;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_admin(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct AdminWithPassword {
            id: Uuid,
            name: String,
            email: String,
            password: String,
            phone_number: String,
            permissions: Vec<String>,
            is_active: bool,
            added_by: Option<String>,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
            deleted_at: Option<chrono::DateTime<chrono::Utc>>,
        }

        // Soft-deleted admins are invisible to login; blocked ones are
        // refused after the row is found so the message stays generic.
        let row = sqlx::query_as::<_, AdminWithPassword>(
            "SELECT id, name, email, password, phone_number, permissions, is_active, added_by, \
                    created_at, updated_at, deleted_at \
             FROM admins WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        let is_valid = verify_password(&dto.password, &row.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if !row.is_active {
            return Err(AppError::unauthorized(
                "This account has been blocked".to_string(),
            ));
        }

        let access_token = create_access_token(
            row.id,
            &row.name,
            &row.email,
            row.permissions.clone(),
            jwt_config,
        )?;

        let admin = Admin {
            id: row.id,
            name: row.name,
            email: row.email,
            phone_number: row.phone_number,
            permissions: row.permissions,
            is_active: row.is_active,
            added_by: row.added_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        };

        Ok(LoginResponse {
            access_token,
            admin,
        })
    }
}
