//! Command-line utilities.
//!
//! The panel has no self-signup; the first administrator is created from the
//! command line with every catalog permission, and creates the rest through
//! the API.

use coachdesk_core::permissions;
use sqlx::PgPool;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Inserts the bootstrap administrator with the full permission catalog.
pub async fn create_root_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    phone_number: &str,
) -> Result<(), AppError> {
    let hashed_password = hash_password(password)?;

    sqlx::query(
        "INSERT INTO admins (name, email, password, phone_number, permissions, added_by) \
         VALUES ($1, $2, $3, $4, $5, 'cli')",
    )
    .bind(name)
    .bind(email)
    .bind(&hashed_password)
    .bind(phone_number)
    .bind(permissions::catalog())
    .execute(db)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::bad_request(anyhow::anyhow!(
                    "An administrator with email {} already exists",
                    email
                ));
            }
        }
        AppError::from(e)
    })?;

    Ok(())
}
