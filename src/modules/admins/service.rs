use anyhow::anyhow;
use coachdesk_core::permissions::{self, PermissionKey, PermissionSet};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{Admin, AdminStatus, RegisterAdminDto, UpdateAdminDto};

const ADMIN_COLUMNS: &str = "id, name, email, phone_number, permissions, is_active, added_by, \
     created_at, updated_at, deleted_at";

/// Rejects grant lists carrying keys outside the catalog, so malformed or
/// unknown permissions never reach storage.
fn ensure_known_grants(grants: &[String]) -> Result<(), AppError> {
    let unknown = permissions::unknown_grants(grants);
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(AppError::bad_request(anyhow!(
            "Unknown permissions: {}",
            unknown.join(", ")
        )))
    }
}

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db))]
    pub async fn get_admins(db: &PgPool, status: Option<AdminStatus>) -> Result<Vec<Admin>, AppError> {
        let filter = match status {
            None => "deleted_at IS NULL",
            Some(AdminStatus::Active) => "deleted_at IS NULL AND is_active = TRUE",
            Some(AdminStatus::Blocked) => "deleted_at IS NULL AND is_active = FALSE",
            Some(AdminStatus::Deleted) => "deleted_at IS NOT NULL",
        };

        let query = format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE {filter} ORDER BY created_at DESC"
        );

        let admins = sqlx::query_as::<_, Admin>(&query).fetch_all(db).await?;

        Ok(admins)
    }

    #[instrument(skip(db))]
    pub async fn get_admin_by_id(db: &PgPool, id: Uuid) -> Result<Admin, AppError> {
        let query = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Administrator not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn register_admin(
        db: &PgPool,
        dto: RegisterAdminDto,
        added_by: &str,
    ) -> Result<Admin, AppError> {
        ensure_known_grants(&dto.permissions)?;

        let hashed_password = hash_password(&dto.password)?;
        // Deduplicate without reinterpreting what the caller selected.
        let grants = PermissionSet::from(dto.permissions).to_vec();

        let query = format!(
            "INSERT INTO admins (name, email, password, phone_number, permissions, added_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ADMIN_COLUMNS}"
        );

        let admin = sqlx::query_as::<_, Admin>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&hashed_password)
            .bind(&dto.phone_number)
            .bind(&grants)
            .bind(added_by)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow!(
                            "An administrator with email {} already exists",
                            dto.email
                        ));
                    }
                }
                AppError::from(e)
            })?;

        Ok(admin)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_admin(db: &PgPool, id: Uuid, dto: UpdateAdminDto) -> Result<Admin, AppError> {
        let existing = Self::get_admin_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let phone_number = dto.phone_number.unwrap_or(existing.phone_number);
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        // A submitted list replaces the stored grants wholesale, the preset
        // application path. The stored set is never merged into it.
        let grants = match dto.permissions {
            Some(submitted) => {
                ensure_known_grants(&submitted)?;
                PermissionSet::from(submitted).to_vec()
            }
            None => existing.permissions,
        };

        let query = format!(
            "UPDATE admins \
             SET name = $1, email = $2, phone_number = $3, permissions = $4, is_active = $5, \
                 updated_at = NOW() \
             WHERE id = $6 AND deleted_at IS NULL \
             RETURNING {ADMIN_COLUMNS}"
        );

        let admin = sqlx::query_as::<_, Admin>(&query)
            .bind(&name)
            .bind(&email)
            .bind(&phone_number)
            .bind(&grants)
            .bind(is_active)
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow!(
                            "An administrator with email {} already exists",
                            email
                        ));
                    }
                }
                AppError::from(e)
            })?;

        Ok(admin)
    }

    /// Flips one grant through the hierarchy engine and persists the
    /// cascaded result.
    #[instrument(skip(db))]
    pub async fn toggle_permission(
        db: &PgPool,
        id: Uuid,
        key: &PermissionKey,
    ) -> Result<Admin, AppError> {
        let existing = Self::get_admin_by_id(db, id).await?;

        let grants = PermissionSet::from(existing.permissions)
            .toggle(key)
            .to_vec();

        let query = format!(
            "UPDATE admins SET permissions = $1, updated_at = NOW() \
             WHERE id = $2 AND deleted_at IS NULL \
             RETURNING {ADMIN_COLUMNS}"
        );

        let admin = sqlx::query_as::<_, Admin>(&query)
            .bind(&grants)
            .bind(id)
            .fetch_one(db)
            .await?;

        Ok(admin)
    }

    #[instrument(skip(db))]
    pub async fn soft_delete_admin(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE admins SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Administrator not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn restore_admin(db: &PgPool, id: Uuid) -> Result<Admin, AppError> {
        let query = format!(
            "UPDATE admins SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NOT NULL \
             RETURNING {ADMIN_COLUMNS}"
        );

        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("No deleted administrator with this ID")))
    }

    /// Purges a soft-deleted row. A live admin must be soft-deleted first.
    #[instrument(skip(db))]
    pub async fn permanent_delete_admin(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1 AND deleted_at IS NOT NULL")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!(
                "No deleted administrator with this ID"
            )));
        }

        Ok(())
    }
}
