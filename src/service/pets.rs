//! Pet CRUD and the adopt transition.

use crate::error::AppError;
use crate::model::{NewPet, Pet, PetStatus};
use sqlx::SqliteConnection;

const PET_COLUMNS: &str = "id, name, type, breed, age, gender, size, weight, color, vaccinated, \
     personality, training, compatibility_pets, compatibility_kids, special_needs, status, image";

pub struct PetService;

impl PetService {
    /// All pets in storage order.
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Pet>, AppError> {
        let sql = format!("SELECT {} FROM pets ORDER BY id", PET_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let pets = sqlx::query_as::<_, Pet>(&sql).fetch_all(conn).await?;
        Ok(pets)
    }

    pub async fn read(conn: &mut SqliteConnection, id: i64) -> Result<Option<Pet>, AppError> {
        let sql = format!("SELECT {} FROM pets WHERE id = ?", PET_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let pet = sqlx::query_as::<_, Pet>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(pet)
    }

    /// Insert one pet with status `Available`. Returns the new id.
    pub async fn create(conn: &mut SqliteConnection, pet: &NewPet) -> Result<i64, AppError> {
        let sql = "INSERT INTO pets (name, type, breed, age, gender, size, weight, color, \
                   vaccinated, personality, training, compatibility_pets, compatibility_kids, \
                   special_needs, status, image) \
                   VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
        tracing::debug!(sql = %sql, name = %pet.name, "query");
        let result = sqlx::query(sql)
            .bind(&pet.name)
            .bind(&pet.kind)
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.gender.as_str())
            .bind(&pet.size)
            .bind(pet.weight)
            .bind(&pet.color)
            .bind(pet.vaccinated.as_str())
            .bind(&pet.personality)
            .bind(&pet.training)
            .bind(&pet.compatibility_pets)
            .bind(&pet.compatibility_kids)
            .bind(&pet.special_needs)
            .bind(PetStatus::Available.as_str())
            .bind(&pet.image)
            .execute(conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Set status to `Adopted` without looking at the prior status.
    /// Returns false when no pet has this id.
    pub async fn adopt(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let sql = "UPDATE pets SET status = ? WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(PetStatus::Adopted.as_str())
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete one pet; its adoption requests go with it via `ON DELETE CASCADE`.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM pets WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(conn).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM pets WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(found.is_some())
    }
}
