use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::foods::repo_types::{FoodRecord, FoodRecordRow, NewFoodRecord};

/// Food log collaborator: records are written once and only read afterwards.
#[async_trait]
pub trait FoodLog: Send + Sync {
    /// Records of `member_id` with `start <= recorded_at < end`.
    async fn list_between(
        &self,
        member_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> AppResult<Vec<FoodRecord>>;

    async fn insert(&self, record: NewFoodRecord) -> AppResult<FoodRecord>;
}

#[derive(Clone)]
pub struct PgFoodLog {
    db: PgPool,
}

impl PgFoodLog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodLog for PgFoodLog {
    async fn list_between(
        &self,
        member_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> AppResult<Vec<FoodRecord>> {
        let rows = sqlx::query_as::<_, FoodRecordRow>(
            r#"
            SELECT id, member_id, food_name, calories, protein, fat, carbohydrates,
                   meal_slot, recorded_at
            FROM food_records
            WHERE member_id = $1 AND recorded_at >= $2 AND recorded_at < $3
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(member_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(FoodRecord::from).collect())
    }

    async fn insert(&self, record: NewFoodRecord) -> AppResult<FoodRecord> {
        let row = sqlx::query_as::<_, FoodRecordRow>(
            r#"
            INSERT INTO food_records
                (member_id, food_name, calories, protein, fat, carbohydrates, meal_slot, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, member_id, food_name, calories, protein, fat, carbohydrates,
                      meal_slot, recorded_at
            "#,
        )
        .bind(record.member_id)
        .bind(&record.food_name)
        .bind(record.calories)
        .bind(record.protein)
        .bind(record.fat)
        .bind(record.carbohydrates)
        .bind(record.meal_slot.map(|s| s.as_str()))
        .bind(record.recorded_at)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }
}

#[derive(Default)]
pub struct MemoryFoodLog {
    records: RwLock<Vec<FoodRecord>>,
}

#[async_trait]
impl FoodLog for MemoryFoodLog {
    async fn list_between(
        &self,
        member_id: Uuid,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> AppResult<Vec<FoodRecord>> {
        let records = self.records.read().await;
        let mut out: Vec<FoodRecord> = records
            .iter()
            .filter(|r| r.member_id == member_id && r.recorded_at >= start && r.recorded_at < end)
            .cloned()
            .collect();
        out.sort_by_key(|r| r.recorded_at);
        Ok(out)
    }

    async fn insert(&self, record: NewFoodRecord) -> AppResult<FoodRecord> {
        let stored = FoodRecord {
            id: Uuid::new_v4(),
            member_id: record.member_id,
            food_name: record.food_name,
            calories: record.calories,
            protein: record.protein,
            fat: record.fat,
            carbohydrates: record.carbohydrates,
            meal_slot: record.meal_slot,
            recorded_at: record.recorded_at,
        };
        self.records.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::MealSlot;
    use time::macros::datetime;

    fn new_record(member_id: Uuid, at: OffsetDateTime) -> NewFoodRecord {
        NewFoodRecord {
            member_id,
            food_name: "bibimbap".into(),
            calories: Some(560.0),
            protein: Some(20.0),
            fat: Some(14.0),
            carbohydrates: Some(85.0),
            meal_slot: Some(MealSlot::Lunch),
            recorded_at: at,
        }
    }

    #[tokio::test]
    async fn list_between_is_half_open_and_per_member() {
        let log = MemoryFoodLog::default();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        log.insert(new_record(me, datetime!(2024-05-01 00:00 UTC))).await.unwrap();
        log.insert(new_record(me, datetime!(2024-05-01 23:59 UTC))).await.unwrap();
        log.insert(new_record(me, datetime!(2024-05-02 00:00 UTC))).await.unwrap();
        log.insert(new_record(other, datetime!(2024-05-01 12:00 UTC))).await.unwrap();

        let day = log
            .list_between(
                me,
                datetime!(2024-05-01 00:00 UTC),
                datetime!(2024-05-02 00:00 UTC),
            )
            .await
            .unwrap();
        assert_eq!(day.len(), 2);
        assert!(day.iter().all(|r| r.member_id == me));
    }
}
