//! Read access to the backing store.
//!
//! The resolver only talks to a [DashboardStore]. [PgStore] is the
//! production implementation; tests use the in-memory store in
//! `crate::testing::mock`.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{
    ClassEntity, Enrollment, Evaluation, GuardianLink, Member, MemberSkill, Person, Skill,
};

pub mod postgres;

pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// The reads a dashboard snapshot is built from.
///
/// Every method is a single round trip and none of them write. `in`-list
/// reads are given already de-duplicated identifiers and may be given an
/// empty slice.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// The person whose email matches case-insensitively.
    ///
    /// More than one match is an error, not an arbitrary pick.
    async fn person_by_email(&self, email: &str) -> StoreResult<Option<Person>>;

    async fn guardian_links(&self, guardian_person_id: &str) -> StoreResult<Vec<GuardianLink>>;

    async fn members(&self, member_ids: &[String]) -> StoreResult<Vec<Member>>;

    async fn member_skills(&self, member_ids: &[String]) -> StoreResult<Vec<MemberSkill>>;

    async fn skills(&self, skill_ids: &[String]) -> StoreResult<Vec<Skill>>;

    async fn enrollments(&self, member_ids: &[String]) -> StoreResult<Vec<Enrollment>>;

    async fn classes(&self, class_ids: &[String]) -> StoreResult<Vec<ClassEntity>>;

    /// The newest evaluations for the given swimmers, newest first, at most `limit` of them.
    async fn recent_evaluations(
        &self,
        member_ids: &[String],
        limit: usize,
    ) -> StoreResult<Vec<Evaluation>>;
}
