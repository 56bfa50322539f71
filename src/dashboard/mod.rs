//! The account dashboard snapshot.
//!
//! [resolve] turns a caller's email into a [Snapshot] of the swimmers they
//! are guardian to: each swimmer's level and next session, their skill
//! progress, and the latest instructor notes. The whole snapshot is built
//! or an error is returned; there is no partial result.

use tracing::debug;

use crate::db::DashboardStore;
use crate::error::{DashboardError, DashboardResult, Stage, StageContext};
use crate::models::{ClassEntity, Enrollment, MemberSkill, Skill};

pub mod shape;
pub mod snapshot;

pub use snapshot::{Note, SkillProgress, Snapshot, Swimmer};

/// How many of the newest evaluations a snapshot carries.
pub const RECENT_NOTES_LIMIT: usize = 20;

pub async fn resolve(store: &dyn DashboardStore, email: &str) -> DashboardResult<Snapshot> {
    if email.is_empty() {
        return Err(DashboardError::MissingParameter("email"));
    }

    let person = store
        .person_by_email(email)
        .await
        .stage(Stage::Identity)?
        .ok_or_else(|| DashboardError::NotFound {
            email: email.to_owned(),
        })?;
    debug!(stage = %Stage::Identity, person_id = %person.person_id, "Resolved person");
    let user_name = person.display_name();

    let links = store
        .guardian_links(&person.person_id)
        .await
        .stage(Stage::Links)?;
    let member_ids = shape::distinct(links.iter().map(|link| link.member_id.as_str()));
    debug!(stage = %Stage::Links, swimmers = member_ids.len(), "Resolved guardian links");

    if member_ids.is_empty() {
        return Ok(Snapshot::empty(user_name));
    }

    let (members, (member_skills, skills), (enrollments, classes), mut evaluations) = tokio::try_join!(
        async {
            let members = store.members(&member_ids).await.stage(Stage::Members)?;
            debug!(stage = %Stage::Members, rows = members.len(), "Loaded members");
            Ok::<_, DashboardError>(members)
        },
        fetch_skills(store, &member_ids),
        fetch_classes(store, &member_ids),
        async {
            let evaluations = store
                .recent_evaluations(&member_ids, RECENT_NOTES_LIMIT)
                .await
                .stage(Stage::Notes)?;
            debug!(stage = %Stage::Notes, rows = evaluations.len(), "Loaded evaluations");
            Ok::<_, DashboardError>(evaluations)
        },
    )?;
    evaluations.truncate(RECENT_NOTES_LIMIT);

    let next_sessions = shape::next_session_labels(&enrollments, &classes);

    Ok(Snapshot {
        user_name,
        swimmers: shape::swimmers(&members, &next_sessions),
        skills_by_swimmer: shape::skills_by_swimmer(&member_skills, &skills),
        notes: shape::notes(&evaluations, &members),
    })
}

/// Skill rows for the swimmers, then names for just the skills those rows mention.
async fn fetch_skills(
    store: &dyn DashboardStore,
    member_ids: &[String],
) -> DashboardResult<(Vec<MemberSkill>, Vec<Skill>)> {
    let rows = store.member_skills(member_ids).await.stage(Stage::Skills)?;
    debug!(stage = %Stage::Skills, rows = rows.len(), "Loaded member skills");

    let skill_ids = shape::distinct(rows.iter().map(|row| row.skill_id.as_str()));
    let skills = if skill_ids.is_empty() {
        Vec::new()
    } else {
        store.skills(&skill_ids).await.stage(Stage::SkillNames)?
    };
    debug!(stage = %Stage::SkillNames, rows = skills.len(), "Loaded skill names");

    Ok((rows, skills))
}

/// Enrollments for the swimmers, then the classes they point at.
async fn fetch_classes(
    store: &dyn DashboardStore,
    member_ids: &[String],
) -> DashboardResult<(Vec<Enrollment>, Vec<ClassEntity>)> {
    let enrollments = store
        .enrollments(member_ids)
        .await
        .stage(Stage::Enrollments)?;
    debug!(stage = %Stage::Enrollments, rows = enrollments.len(), "Loaded enrollments");

    let class_ids = shape::distinct(enrollments.iter().map(|row| row.class_id.as_str()));
    let classes = if class_ids.is_empty() {
        Vec::new()
    } else {
        store.classes(&class_ids).await.stage(Stage::Classes)?
    };
    debug!(stage = %Stage::Classes, rows = classes.len(), "Loaded classes");

    Ok((enrollments, classes))
}
