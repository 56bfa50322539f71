use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use time::macros::date;

use crate::db::{DashboardStore, StoreResult};
use crate::error::{Stage, StoreError};
use crate::models::{
    ClassEntity, Enrollment, Evaluation, GuardianLink, Member, MemberSkill, Person, Skill,
};

pub const GUARDIAN_EMAIL: &str = "sarah.johnson@example.com";
pub const UNLINKED_EMAIL: &str = "coach.kim@example.com";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Failure {
    Error,
    Panic,
    OpaquePanic,
}

/// An in-memory [DashboardStore] that records every read made against it.
///
/// Filtering and ordering mirror the Postgres queries.
#[derive(Debug, Default)]
pub struct MockStore {
    pub people: Vec<Person>,
    pub links: Vec<GuardianLink>,
    pub members: Vec<Member>,
    pub member_skills: Vec<MemberSkill>,
    pub skills: Vec<Skill>,
    pub enrollments: Vec<Enrollment>,
    pub classes: Vec<ClassEntity>,
    pub evaluations: Vec<Evaluation>,
    failure: Option<(Stage, Failure)>,
    calls: Mutex<Vec<(Stage, Vec<String>)>>,
}

impl MockStore {
    /// Make the given read return an error.
    pub fn fail_at(mut self, stage: Stage) -> Self {
        self.failure = Some((stage, Failure::Error));
        self
    }

    /// Make the given read panic.
    pub fn panic_at(mut self, stage: Stage) -> Self {
        self.failure = Some((stage, Failure::Panic));
        self
    }

    /// Make the given read panic with a payload that carries no message.
    pub fn opaque_panic_at(mut self, stage: Stage) -> Self {
        self.failure = Some((stage, Failure::OpaquePanic));
        self
    }

    /// The reads made so far, in the order they were made.
    pub fn calls(&self) -> Vec<Stage> {
        self.lock_calls().iter().map(|(stage, _)| *stage).collect()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    /// The ids passed to each read of the given stage.
    pub fn requested_ids(&self, stage: Stage) -> Vec<Vec<String>> {
        self.lock_calls()
            .iter()
            .filter(|(called, _)| *called == stage)
            .map(|(_, ids)| ids.clone())
            .collect()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(Stage, Vec<String>)>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, stage: Stage, ids: &[String]) -> StoreResult<()> {
        self.lock_calls().push((stage, ids.to_vec()));

        match self.failure {
            Some((failing, Failure::Error)) if failing == stage => {
                Err(StoreError::Other(format!("simulated {} outage", stage)))
            }
            Some((failing, Failure::Panic)) if failing == stage => {
                panic!("simulated {} panic", stage)
            }
            Some((failing, Failure::OpaquePanic)) if failing == stage => {
                std::panic::panic_any(42u8)
            }
            _ => Ok(()),
        }
    }

    /// A guardian with two swimmers, plus rows that belong to nobody in the family.
    pub fn johnson_family() -> Self {
        Self {
            people: vec![
                person("p-sarah", Some("Sarah"), Some("Johnson"), GUARDIAN_EMAIL),
                person("p-kim", None, None, UNLINKED_EMAIL),
            ],
            links: vec![link("p-sarah", "m-emma"), link("p-sarah", "m-jack")],
            members: vec![
                member("m-jack", "Jack", None),
                member("m-emma", "Emma", Some("Level 2")),
                member("m-liam", "Liam", Some("Level 4")),
            ],
            member_skills: vec![
                member_skill("m-emma", "s-flip", Some("40"), None),
                member_skill("m-emma", "s-free", Some("100"), Some(date!(2026 - 02 - 10))),
                member_skill("m-emma", "s-back", None, Some(date!(2026 - 01 - 28))),
                member_skill("m-jack", "s-float", Some("50"), None),
                member_skill("m-jack", "s-flip", None, None),
                member_skill("m-liam", "s-dive", None, Some(date!(2025 - 11 - 02))),
            ],
            skills: vec![
                skill("s-flip", "Flip turn"),
                skill("s-free", "Freestyle breathing"),
                skill("s-back", "Backstroke arms"),
                skill("s-float", "Front float"),
                skill("s-dive", "Shallow dive"),
            ],
            enrollments: vec![
                enrollment("m-emma", "c-guppies"),
                enrollment("m-emma", "c-minnows"),
                enrollment("m-liam", "c-sharks"),
            ],
            classes: vec![
                class("c-guppies", "Level 2 Guppies", Some("Tue/Thu 4:00 PM")),
                class("c-minnows", "Minnows", None),
                class("c-sharks", "Sharks", Some("Sat 9:00 AM")),
            ],
            evaluations: vec![
                evaluation("e-1", "m-jack", Some("Working on floats"), date!(2026 - 02 - 04)),
                evaluation("e-2", "m-emma", Some("Great streamline"), date!(2026 - 02 - 11)),
                evaluation("e-3", "m-liam", Some("Ready for Level 5"), date!(2026 - 02 - 12)),
            ],
            ..Self::default()
        }
    }
}

#[async_trait]
impl DashboardStore for MockStore {
    async fn person_by_email(&self, email: &str) -> StoreResult<Option<Person>> {
        self.record(Stage::Identity, &[email.to_owned()])?;

        let email = email.to_lowercase();
        let mut matches: Vec<_> = self
            .people
            .iter()
            .filter(|person| person.email.to_lowercase() == email)
            .cloned()
            .collect();

        if matches.len() > 1 {
            return Err(StoreError::Ambiguous {
                table: "person",
                key: email,
            });
        }

        Ok(matches.pop())
    }

    async fn guardian_links(&self, guardian_person_id: &str) -> StoreResult<Vec<GuardianLink>> {
        self.record(Stage::Links, &[guardian_person_id.to_owned()])?;

        Ok(self
            .links
            .iter()
            .filter(|link| link.guardian_person_id == guardian_person_id)
            .cloned()
            .collect())
    }

    async fn members(&self, member_ids: &[String]) -> StoreResult<Vec<Member>> {
        self.record(Stage::Members, member_ids)?;

        let mut members: Vec<_> = self
            .members
            .iter()
            .filter(|member| member_ids.contains(&member.member_id))
            .cloned()
            .collect();
        members.sort_by(|a, b| {
            (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name))
        });

        Ok(members)
    }

    async fn member_skills(&self, member_ids: &[String]) -> StoreResult<Vec<MemberSkill>> {
        self.record(Stage::Skills, member_ids)?;

        Ok(self
            .member_skills
            .iter()
            .filter(|row| member_ids.contains(&row.member_id))
            .cloned()
            .collect())
    }

    async fn skills(&self, skill_ids: &[String]) -> StoreResult<Vec<Skill>> {
        self.record(Stage::SkillNames, skill_ids)?;

        Ok(self
            .skills
            .iter()
            .filter(|skill| skill_ids.contains(&skill.skill_id))
            .cloned()
            .collect())
    }

    async fn enrollments(&self, member_ids: &[String]) -> StoreResult<Vec<Enrollment>> {
        self.record(Stage::Enrollments, member_ids)?;

        Ok(self
            .enrollments
            .iter()
            .filter(|row| member_ids.contains(&row.member_id))
            .cloned()
            .collect())
    }

    async fn classes(&self, class_ids: &[String]) -> StoreResult<Vec<ClassEntity>> {
        self.record(Stage::Classes, class_ids)?;

        Ok(self
            .classes
            .iter()
            .filter(|class| class_ids.contains(&class.class_id))
            .cloned()
            .collect())
    }

    async fn recent_evaluations(
        &self,
        member_ids: &[String],
        limit: usize,
    ) -> StoreResult<Vec<Evaluation>> {
        self.record(Stage::Notes, member_ids)?;

        let mut evaluations: Vec<_> = self
            .evaluations
            .iter()
            .filter(|evaluation| member_ids.contains(&evaluation.member_id))
            .cloned()
            .collect();
        evaluations.sort_by(|a, b| b.evaluation_date.cmp(&a.evaluation_date));
        evaluations.truncate(limit);

        Ok(evaluations)
    }
}

fn person(id: &str, first_name: Option<&str>, last_name: Option<&str>, email: &str) -> Person {
    Person {
        person_id: id.to_owned(),
        first_name: first_name.map(Into::into),
        last_name: last_name.map(Into::into),
        email: email.to_owned(),
    }
}

fn link(guardian_person_id: &str, member_id: &str) -> GuardianLink {
    GuardianLink {
        guardian_person_id: guardian_person_id.to_owned(),
        member_id: member_id.to_owned(),
    }
}

fn member(id: &str, first_name: &str, level: Option<&str>) -> Member {
    Member {
        member_id: id.to_owned(),
        first_name: Some(first_name.to_owned()),
        last_name: Some("Johnson".to_owned()),
        level: level.map(Into::into),
    }
}

fn member_skill(
    member_id: &str,
    skill_id: &str,
    progress: Option<&str>,
    date_acquired: Option<time::Date>,
) -> MemberSkill {
    MemberSkill {
        member_id: member_id.to_owned(),
        skill_id: skill_id.to_owned(),
        progress: progress.map(Into::into),
        date_acquired,
    }
}

fn skill(id: &str, name: &str) -> Skill {
    Skill {
        skill_id: id.to_owned(),
        name: name.to_owned(),
    }
}

fn enrollment(member_id: &str, class_id: &str) -> Enrollment {
    Enrollment {
        member_id: member_id.to_owned(),
        class_id: class_id.to_owned(),
    }
}

fn class(id: &str, name: &str, schedule: Option<&str>) -> ClassEntity {
    ClassEntity {
        class_id: id.to_owned(),
        name: name.to_owned(),
        schedule: schedule.map(Into::into),
    }
}

fn evaluation(id: &str, member_id: &str, feedback: Option<&str>, date: time::Date) -> Evaluation {
    Evaluation {
        evaluation_id: id.to_owned(),
        member_id: member_id.to_owned(),
        feedback: feedback.map(Into::into),
        evaluation_date: Some(date),
    }
}
