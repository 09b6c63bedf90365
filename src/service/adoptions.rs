//! Adoption request submission and listing.

use crate::error::AppError;
use crate::model::{AdoptionRequest, AdoptionStatus, NewAdoptionRequest};
use crate::service::PetService;
use sqlx::SqliteConnection;

pub struct AdoptionService;

impl AdoptionService {
    /// Store a `Pending` request. Fails with `NotFound` if the pet does not exist.
    pub async fn create(
        conn: &mut SqliteConnection,
        req: &NewAdoptionRequest,
    ) -> Result<i64, AppError> {
        if !PetService::exists(&mut *conn, req.pet_id).await? {
            return Err(AppError::NotFound(format!("pet {}", req.pet_id)));
        }
        let sql = "INSERT INTO adoptions (name, email, phone, address, pet_id, status) \
                   VALUES (?, ?, ?, ?, ?, ?)";
        tracing::debug!(sql = %sql, pet_id = req.pet_id, "query");
        let result = sqlx::query(sql)
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.phone)
            .bind(&req.address)
            .bind(req.pet_id)
            .bind(AdoptionStatus::Pending.as_str())
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// All requests in id order, optionally only those for one pet.
    pub async fn list(
        conn: &mut SqliteConnection,
        pet_id: Option<i64>,
    ) -> Result<Vec<AdoptionRequest>, AppError> {
        let base = "SELECT id, name, email, phone, address, pet_id, status FROM adoptions";
        let rows = match pet_id {
            Some(pet_id) => {
                let sql = format!("{} WHERE pet_id = ? ORDER BY id", base);
                tracing::debug!(sql = %sql, pet_id, "query");
                sqlx::query_as::<_, AdoptionRequest>(&sql)
                    .bind(pet_id)
                    .fetch_all(conn)
                    .await?
            }
            None => {
                let sql = format!("{} ORDER BY id", base);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, AdoptionRequest>(&sql).fetch_all(conn).await?
            }
        };
        Ok(rows)
    }
}
