use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::diets::repo_types::{DietPatch, DietRecord};
use crate::error::{AppError, AppResult};

/// Diet record persistence. `upsert` is the single writer for a
/// (member, date): lookup-or-create, merge and save happen as one step.
#[async_trait]
pub trait DietStore: Send + Sync {
    async fn find(&self, member_id: Uuid, date: Date) -> AppResult<Option<DietRecord>>;

    async fn upsert(&self, member_id: Uuid, date: Date, patch: &DietPatch)
        -> AppResult<DietRecord>;

    /// All records of a member, newest date first.
    async fn list_by_member(&self, member_id: Uuid) -> AppResult<Vec<DietRecord>>;
}

const DIET_COLUMNS: &str = r#"
    id, member_id, diet_date, breakfast, lunch, dinner,
    breakfast_kcal, breakfast_carbs, breakfast_protein, breakfast_fat,
    lunch_kcal, lunch_carbs, lunch_protein, lunch_fat,
    dinner_kcal, dinner_carbs, dinner_protein, dinner_fat,
    total_kcal, created_at
"#;

#[derive(Clone)]
pub struct PgDietStore {
    db: PgPool,
}

impl PgDietStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn lock_or_create(
        tx: &mut Transaction<'_, Postgres>,
        member_id: Uuid,
        date: Date,
    ) -> Result<DietRecord, sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO diet_records (member_id, diet_date)
            VALUES ($1, $2)
            ON CONFLICT (member_id, diet_date) DO NOTHING
            "#,
        )
        .bind(member_id)
        .bind(date)
        .execute(&mut **tx)
        .await?;

        // row lock held until commit serializes concurrent saves
        sqlx::query_as::<_, DietRecord>(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_records \
             WHERE member_id = $1 AND diet_date = $2 FOR UPDATE"
        ))
        .bind(member_id)
        .bind(date)
        .fetch_one(&mut **tx)
        .await
    }

    async fn write(
        tx: &mut Transaction<'_, Postgres>,
        r: &DietRecord,
    ) -> Result<DietRecord, sqlx::Error> {
        sqlx::query_as::<_, DietRecord>(&format!(
            r#"
            UPDATE diet_records SET
                breakfast = $2, lunch = $3, dinner = $4,
                breakfast_kcal = $5, breakfast_carbs = $6, breakfast_protein = $7, breakfast_fat = $8,
                lunch_kcal = $9, lunch_carbs = $10, lunch_protein = $11, lunch_fat = $12,
                dinner_kcal = $13, dinner_carbs = $14, dinner_protein = $15, dinner_fat = $16,
                total_kcal = $17
            WHERE id = $1
            RETURNING {DIET_COLUMNS}
            "#
        ))
        .bind(r.id)
        .bind(&r.breakfast)
        .bind(&r.lunch)
        .bind(&r.dinner)
        .bind(r.breakfast_kcal)
        .bind(r.breakfast_carbs)
        .bind(r.breakfast_protein)
        .bind(r.breakfast_fat)
        .bind(r.lunch_kcal)
        .bind(r.lunch_carbs)
        .bind(r.lunch_protein)
        .bind(r.lunch_fat)
        .bind(r.dinner_kcal)
        .bind(r.dinner_carbs)
        .bind(r.dinner_protein)
        .bind(r.dinner_fat)
        .bind(r.total_kcal)
        .fetch_one(&mut **tx)
        .await
    }
}

#[async_trait]
impl DietStore for PgDietStore {
    async fn find(&self, member_id: Uuid, date: Date) -> AppResult<Option<DietRecord>> {
        let record = sqlx::query_as::<_, DietRecord>(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_records WHERE member_id = $1 AND diet_date = $2"
        ))
        .bind(member_id)
        .bind(date)
        .fetch_optional(&self.db)
        .await?;
        Ok(record)
    }

    async fn upsert(
        &self,
        member_id: Uuid,
        date: Date,
        patch: &DietPatch,
    ) -> AppResult<DietRecord> {
        let mut tx = self.db.begin().await?;
        let mut record = Self::lock_or_create(&mut tx, member_id, date)
            .await
            .map_err(AppError::from_upsert)?;
        record.apply(patch);
        let saved = Self::write(&mut tx, &record)
            .await
            .map_err(AppError::from_upsert)?;
        tx.commit().await.map_err(AppError::from_upsert)?;
        debug!(%member_id, %date, diet_id = %saved.id, "diet record saved");
        Ok(saved)
    }

    async fn list_by_member(&self, member_id: Uuid) -> AppResult<Vec<DietRecord>> {
        let rows = sqlx::query_as::<_, DietRecord>(&format!(
            "SELECT {DIET_COLUMNS} FROM diet_records WHERE member_id = $1 \
             ORDER BY diet_date DESC"
        ))
        .bind(member_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

/// In-process store; the mutex is held across read, merge and write.
#[derive(Default)]
pub struct MemoryDietStore {
    records: Mutex<HashMap<(Uuid, Date), DietRecord>>,
}

#[async_trait]
impl DietStore for MemoryDietStore {
    async fn find(&self, member_id: Uuid, date: Date) -> AppResult<Option<DietRecord>> {
        Ok(self.records.lock().await.get(&(member_id, date)).cloned())
    }

    async fn upsert(
        &self,
        member_id: Uuid,
        date: Date,
        patch: &DietPatch,
    ) -> AppResult<DietRecord> {
        let mut records = self.records.lock().await;
        let record = records
            .entry((member_id, date))
            .or_insert_with(|| DietRecord::new(member_id, date, OffsetDateTime::now_utc()));
        record.apply(patch);
        Ok(record.clone())
    }

    async fn list_by_member(&self, member_id: Uuid) -> AppResult<Vec<DietRecord>> {
        let mut out: Vec<DietRecord> = self
            .records
            .lock()
            .await
            .values()
            .filter(|r| r.member_id == member_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.diet_date.cmp(&a.diet_date));
        Ok(out)
    }
}
