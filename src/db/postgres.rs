use anyhow::Context as _;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::db::{DashboardStore, StoreResult};
use crate::error::StoreError;
use crate::models::{
    ClassEntity, Enrollment, Evaluation, GuardianLink, Member, MemberSkill, Person, Skill,
};

/// A [DashboardStore] over a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("Failed to connect to the database")?;
        info!(max_connections = config.max_connections, "Connected to database");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DashboardStore for PgStore {
    async fn person_by_email(&self, email: &str) -> StoreResult<Option<Person>> {
        let mut people = sqlx::query_as::<_, Person>(
            "SELECT person_id::text AS person_id, first_name, last_name, email
             FROM person WHERE lower(email) = lower($1) LIMIT 2",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        if people.len() > 1 {
            return Err(StoreError::Ambiguous {
                table: "person",
                key: email.to_owned(),
            });
        }

        Ok(people.pop())
    }

    async fn guardian_links(&self, guardian_person_id: &str) -> StoreResult<Vec<GuardianLink>> {
        sqlx::query_as::<_, GuardianLink>(
            "SELECT guardian_person_id::text AS guardian_person_id, member_id::text AS member_id
             FROM guardian_member WHERE guardian_person_id::text = $1",
        )
        .bind(guardian_person_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn members(&self, member_ids: &[String]) -> StoreResult<Vec<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT member_id::text AS member_id, first_name, last_name, level
             FROM member WHERE member_id::text = ANY($1)
             ORDER BY first_name, last_name",
        )
        .bind(member_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn member_skills(&self, member_ids: &[String]) -> StoreResult<Vec<MemberSkill>> {
        sqlx::query_as::<_, MemberSkill>(
            "SELECT member_id::text AS member_id, skill_id::text AS skill_id,
                 progress::text AS progress, date_acquired::date AS date_acquired
             FROM member_skill WHERE member_id::text = ANY($1)",
        )
        .bind(member_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn skills(&self, skill_ids: &[String]) -> StoreResult<Vec<Skill>> {
        sqlx::query_as::<_, Skill>(
            "SELECT skill_id::text AS skill_id, name
             FROM skill WHERE skill_id::text = ANY($1)",
        )
        .bind(skill_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn enrollments(&self, member_ids: &[String]) -> StoreResult<Vec<Enrollment>> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT member_id::text AS member_id, class_id::text AS class_id
             FROM enrollment WHERE member_id::text = ANY($1)",
        )
        .bind(member_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn classes(&self, class_ids: &[String]) -> StoreResult<Vec<ClassEntity>> {
        sqlx::query_as::<_, ClassEntity>(
            "SELECT class_id::text AS class_id, name, schedule
             FROM class_entity WHERE class_id::text = ANY($1)",
        )
        .bind(class_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn recent_evaluations(
        &self,
        member_ids: &[String],
        limit: usize,
    ) -> StoreResult<Vec<Evaluation>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        sqlx::query_as::<_, Evaluation>(
            "SELECT evaluation_id::text AS evaluation_id, member_id::text AS member_id,
                 feedback, evaluation_date::date AS evaluation_date
             FROM evaluation WHERE member_id::text = ANY($1)
             ORDER BY evaluation_date DESC NULLS LAST
             LIMIT $2",
        )
        .bind(member_ids)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }
}
