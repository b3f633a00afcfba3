use anyhow::anyhow;
use coachdesk_core::permissions::{self, PermissionKey, PermissionSet};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreatePresetDto, Preset, UpdatePresetDto};

const PRESET_COLUMNS: &str = "id, name, permissions, created_at, updated_at";

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

pub struct PresetService;

impl PresetService {
    #[instrument(skip(db))]
    pub async fn get_presets(db: &PgPool) -> Result<Vec<Preset>, AppError> {
        let query = format!("SELECT {PRESET_COLUMNS} FROM permission_presets ORDER BY name");

        let presets = sqlx::query_as::<_, Preset>(&query).fetch_all(db).await?;

        Ok(presets)
    }

    #[instrument(skip(db))]
    pub async fn get_preset_by_id(db: &PgPool, id: Uuid) -> Result<Preset, AppError> {
        let query = format!("SELECT {PRESET_COLUMNS} FROM permission_presets WHERE id = $1");

        sqlx::query_as::<_, Preset>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Preset not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_preset(db: &PgPool, dto: CreatePresetDto) -> Result<Preset, AppError> {
        ensure_known_grants(&dto.permissions)?;

        let grants = PermissionSet::from(dto.permissions).to_vec();

        let query = format!(
            "INSERT INTO permission_presets (name, permissions) VALUES ($1, $2) \
             RETURNING {PRESET_COLUMNS}"
        );

        let preset = sqlx::query_as::<_, Preset>(&query)
            .bind(&dto.name)
            .bind(&grants)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow!(
                            "A preset named {} already exists",
                            dto.name
                        ));
                    }
                }
                AppError::from(e)
            })?;

        Ok(preset)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_preset(
        db: &PgPool,
        id: Uuid,
        dto: UpdatePresetDto,
    ) -> Result<Preset, AppError> {
        let existing = Self::get_preset_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let grants = match dto.permissions {
            Some(submitted) => {
                ensure_known_grants(&submitted)?;
                PermissionSet::from(submitted).to_vec()
            }
            None => existing.permissions,
        };

        let query = format!(
            "UPDATE permission_presets SET name = $1, permissions = $2, updated_at = NOW() \
             WHERE id = $3 \
             RETURNING {PRESET_COLUMNS}"
        );

        let preset = sqlx::query_as::<_, Preset>(&query)
            .bind(&name)
            .bind(&grants)
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow!(
                            "A preset named {} already exists",
                            name
                        ));
                    }
                }
                AppError::from(e)
            })?;

        Ok(preset)
    }

    /// Flips one grant through the hierarchy engine and persists the
    /// cascaded result.
    #[instrument(skip(db))]
    pub async fn toggle_permission(
        db: &PgPool,
        id: Uuid,
        key: &PermissionKey,
    ) -> Result<Preset, AppError> {
        let existing = Self::get_preset_by_id(db, id).await?;

        let grants = PermissionSet::from(existing.permissions)
            .toggle(key)
            .to_vec();

        let query = format!(
            "UPDATE permission_presets SET permissions = $1, updated_at = NOW() \
             WHERE id = $2 \
             RETURNING {PRESET_COLUMNS}"
        );

        let preset = sqlx::query_as::<_, Preset>(&query)
            .bind(&grants)
            .bind(id)
            .fetch_one(db)
            .await?;

        Ok(preset)
    }

    #[instrument(skip(db))]
    pub async fn delete_preset(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM permission_presets WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Preset not found")));
        }

        Ok(())
    }
}
