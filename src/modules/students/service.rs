use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateStudentDto, Student, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, name, email, phone_number, guardian_name, guardian_phone, \
     date_of_birth, gender, address, is_active, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        let query = format!(
            "INSERT INTO students \
                 (name, email, password, phone_number, guardian_name, guardian_phone, \
                  date_of_birth, gender, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&query)
            .bind(&dto.name)
            .bind(&dto.email)
            .bind(&hashed_password)
            .bind(&dto.phone_number)
            .bind(&dto.guardian_name)
            .bind(&dto.guardian_phone)
            .bind(dto.date_of_birth)
            .bind(dto.gender)
            .bind(&dto.address)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow!(
                            "A student with email {} already exists",
                            dto.email
                        ));
                    }
                }
                AppError::from(e)
            })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        is_active: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let (students, total) = match is_active {
            Some(active) => {
                let query = format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE is_active = $1 \
                     ORDER BY name LIMIT $2 OFFSET $3"
                );
                let students = sqlx::query_as::<_, Student>(&query)
                    .bind(active)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(db)
                    .await?;
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE is_active = $1")
                        .bind(active)
                        .fetch_one(db)
                        .await?;
                (students, total)
            }
            None => {
                let query = format!(
                    "SELECT {STUDENT_COLUMNS} FROM students ORDER BY name LIMIT $1 OFFSET $2"
                );
                let students = sqlx::query_as::<_, Student>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(db)
                    .await?;
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
                    .fetch_one(db)
                    .await?;
                (students, total)
            }
        };

        Ok((students, total))
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");

        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let phone_number = dto.phone_number.unwrap_or(existing.phone_number);
        let guardian_name = dto.guardian_name.or(existing.guardian_name);
        let guardian_phone = dto.guardian_phone.or(existing.guardian_phone);
        let date_of_birth = dto.date_of_birth.or(existing.date_of_birth);
        let gender = dto.gender.or(existing.gender);
        let address = dto.address.or(existing.address);
        let is_active = dto.is_active.unwrap_or(existing.is_active);

        let query = format!(
            "UPDATE students \
             SET name = $1, email = $2, phone_number = $3, guardian_name = $4, \
                 guardian_phone = $5, date_of_birth = $6, gender = $7, address = $8, \
                 is_active = $9, updated_at = NOW() \
             WHERE id = $10 \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&query)
            .bind(&name)
            .bind(&email)
            .bind(&phone_number)
            .bind(&guardian_name)
            .bind(&guardian_phone)
            .bind(date_of_birth)
            .bind(gender)
            .bind(&address)
            .bind(is_active)
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow!(
                            "A student with email {} already exists",
                            email
                        ));
                    }
                }
                AppError::from(e)
            })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        Ok(())
    }
}
