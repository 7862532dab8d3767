use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::repo_types::{Location, MealRecord, NewMealRecord};
use crate::error::AppError;

/// Append-only meal log. Records are only ever inserted and later located.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// `None` when a record with the same `token_id` already exists.
    async fn insert(&self, record: NewMealRecord) -> Result<Option<Uuid>, AppError>;

    /// Attaches a location to the user's most recent record. `None` when the user has none.
    async fn update_location(
        &self,
        user_id: &str,
        location: &Location,
    ) -> Result<Option<Uuid>, AppError>;

    /// Attaches a location to one specific record owned by `user_id`.
    async fn update_location_for(
        &self,
        user_id: &str,
        id: Uuid,
        location: &Location,
    ) -> Result<bool, AppError>;

    /// Newest first, at most `limit` rows.
    async fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<MealRecord>, AppError>;
}

#[derive(Clone)]
pub struct PgMealStore {
    db: PgPool,
}

impl PgMealStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealStore for PgMealStore {
    async fn insert(&self, record: NewMealRecord) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO meal_records
                (id, user_id, food_name, protein, carbohydrate, fat, sodium, calories,
                 materials, details, token_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (token_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.user_id)
        .bind(&record.food_name)
        .bind(record.protein)
        .bind(record.carbohydrate)
        .bind(record.fat)
        .bind(record.sodium)
        .bind(record.calories)
        .bind(&record.materials)
        .bind(&record.details)
        .bind(&record.token_id)
        .fetch_optional(&self.db)
        .await?;
        match id {
            Some(id) => debug!(%id, user_id = %record.user_id, "meal record inserted"),
            None => debug!(user_id = %record.user_id, "duplicate token; nothing inserted"),
        }
        Ok(id)
    }

    async fn update_location(
        &self,
        user_id: &str,
        location: &Location,
    ) -> Result<Option<Uuid>, AppError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE meal_records
               SET latitude = $2, longitude = $3, location_name = $4
             WHERE id = (
                   SELECT id
                     FROM meal_records
                    WHERE user_id = $1
                    ORDER BY created_at DESC
                    LIMIT 1
             )
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(&location.name)
        .fetch_optional(&self.db)
        .await?;
        Ok(id)
    }

    async fn update_location_for(
        &self,
        user_id: &str,
        id: Uuid,
        location: &Location,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE meal_records
               SET latitude = $3, longitude = $4, location_name = $5
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(&location.name)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn list_recent(&self, user_id: &str, limit: i64) -> Result<Vec<MealRecord>, AppError> {
        let rows = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, user_id, food_name, protein, carbohydrate, fat, sodium, calories,
                   materials, details, latitude, longitude, location_name, created_at
              FROM meal_records
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit.max(0))
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
