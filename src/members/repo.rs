use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::members::repo_types::MemberProfile;

/// Member management collaborator.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn profile(&self, member_id: Uuid) -> AppResult<Option<MemberProfile>>;
}

#[derive(Clone)]
pub struct PgMemberDirectory {
    db: PgPool,
}

impl PgMemberDirectory {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemberDirectory for PgMemberDirectory {
    async fn profile(&self, member_id: Uuid) -> AppResult<Option<MemberProfile>> {
        let profile = sqlx::query_as::<_, MemberProfile>(
            r#"
            SELECT id, name, sex, height_cm, weight_kg, birth_date
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(profile)
    }
}

#[derive(Default)]
pub struct MemoryMemberDirectory {
    profiles: RwLock<HashMap<Uuid, MemberProfile>>,
}

impl MemoryMemberDirectory {
    pub async fn put(&self, profile: MemberProfile) {
        self.profiles.write().await.insert(profile.id, profile);
    }
}

#[async_trait]
impl MemberDirectory for MemoryMemberDirectory {
    async fn profile(&self, member_id: Uuid) -> AppResult<Option<MemberProfile>> {
        Ok(self.profiles.read().await.get(&member_id).cloned())
    }
}
