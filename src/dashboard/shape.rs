//! Turns the fetched rows into the snapshot's sections.
//!
//! Everything here is a pure function of rows already in hand. Lookups
//! across rows never fail: a dangling id gets a placeholder name and the
//! row is kept.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::dashboard::snapshot::{Note, SkillProgress, Swimmer};
use crate::models::{format_date, ClassEntity, Enrollment, Evaluation, Member, MemberSkill, Skill};

pub const NO_UPCOMING_SESSION: &str = "No upcoming session";
pub const UNKNOWN_SKILL: &str = "Unknown skill";
pub const UNKNOWN_SWIMMER: &str = "Unknown swimmer";

/// The distinct values in first-seen order.
pub fn distinct<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .map(str::to_owned)
        .collect()
}

/// Labels each swimmer's next session from the first enrollment whose class resolves.
///
/// This is the first enrollment in the order the store returned them,
/// not the nearest upcoming meeting.
pub fn next_session_labels(
    enrollments: &[Enrollment],
    classes: &[ClassEntity],
) -> HashMap<String, String> {
    let class_by_id: HashMap<&str, &ClassEntity> = classes
        .iter()
        .map(|class| (class.class_id.as_str(), class))
        .collect();

    let mut labels = HashMap::new();
    for enrollment in enrollments {
        if labels.contains_key(&enrollment.member_id) {
            continue;
        }

        if let Some(class) = class_by_id.get(enrollment.class_id.as_str()) {
            labels.insert(enrollment.member_id.clone(), class.session_label());
        }
    }

    labels
}

pub fn swimmers(members: &[Member], next_sessions: &HashMap<String, String>) -> Vec<Swimmer> {
    members
        .iter()
        .map(|member| Swimmer {
            id: member.member_id.clone(),
            name: member.full_name(),
            level: member.level_label().to_owned(),
            next_session: next_sessions
                .get(&member.member_id)
                .cloned()
                .unwrap_or_else(|| NO_UPCOMING_SESSION.to_owned()),
        })
        .collect()
}

/// Groups skill rows by swimmer, each group sorted with [sort_skills].
pub fn skills_by_swimmer(
    rows: &[MemberSkill],
    skills: &[Skill],
) -> BTreeMap<String, Vec<SkillProgress>> {
    let name_by_id: HashMap<&str, &str> = skills
        .iter()
        .map(|skill| (skill.skill_id.as_str(), skill.name.as_str()))
        .collect();

    let mut grouped: BTreeMap<String, Vec<SkillProgress>> = BTreeMap::new();
    for row in rows {
        grouped
            .entry(row.member_id.clone())
            .or_default()
            .push(SkillProgress {
                id: row.skill_id.clone(),
                name: name_by_id
                    .get(row.skill_id.as_str())
                    .copied()
                    .unwrap_or(UNKNOWN_SKILL)
                    .to_owned(),
                mastered: row.is_mastered(),
                date_acquired: row.date_acquired.map(format_date),
            });
    }

    for skills in grouped.values_mut() {
        sort_skills(skills);
    }

    grouped
}

/// Mastered skills first, then alphabetically by name within each group.
pub fn sort_skills(skills: &mut [SkillProgress]) {
    skills.sort_by(|a, b| {
        b.mastered
            .cmp(&a.mastered)
            .then_with(|| compare_names(&a.name, &b.name))
    });
}

/// Case-insensitive ordering. Names that differ only in case put lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.chars().map(swap_case).cmp(b.chars().map(swap_case)))
}

fn swap_case(c: char) -> char {
    if c.is_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c.to_ascii_uppercase()
    }
}

/// Notes in the order the evaluations were given.
pub fn notes(evaluations: &[Evaluation], members: &[Member]) -> Vec<Note> {
    let name_by_id: HashMap<&str, String> = members
        .iter()
        .map(|member| (member.member_id.as_str(), member.full_name()))
        .collect();

    evaluations
        .iter()
        .map(|evaluation| Note {
            id: evaluation.evaluation_id.clone(),
            swimmer_name: name_by_id
                .get(evaluation.member_id.as_str())
                .cloned()
                .unwrap_or_else(|| UNKNOWN_SWIMMER.to_owned()),
            note: evaluation.feedback.clone().unwrap_or_default(),
            date: evaluation.evaluation_date.map(format_date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn member(id: &str, first_name: &str) -> Member {
        Member {
            member_id: id.to_owned(),
            first_name: Some(first_name.to_owned()),
            last_name: Some("Johnson".to_owned()),
            level: Some("Level 2".to_owned()),
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

    fn skill_row(skill_id: &str, date_acquired: Option<time::Date>) -> MemberSkill {
        MemberSkill {
            member_id: "m-1".to_owned(),
            skill_id: skill_id.to_owned(),
            progress: None,
            date_acquired,
        }
    }

    fn skill(id: &str, name: &str) -> Skill {
        Skill {
            skill_id: id.to_owned(),
            name: name.to_owned(),
        }
    }

    #[test]
    fn distinct_keeps_first_seen_order() {
        assert_eq!(distinct(["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
        assert!(distinct(std::iter::empty()).is_empty());
    }

    #[test]
    fn first_resolvable_enrollment_wins() {
        let enrollments = [
            enrollment("m-1", "missing"),
            enrollment("m-1", "c-2"),
            enrollment("m-1", "c-1"),
            enrollment("m-2", "c-1"),
        ];
        let classes = [
            class("c-1", "Guppies", Some("Tue 4:00 PM")),
            class("c-2", "Minnows", None),
        ];

        let labels = next_session_labels(&enrollments, &classes);
        assert_eq!(labels["m-1"], "Minnows: Schedule TBD");
        assert_eq!(labels["m-2"], "Guppies: Tue 4:00 PM");
    }

    #[test]
    fn swimmers_without_enrollments_have_no_session() {
        let members = [member("m-1", "Emma"), member("m-2", "Jack")];
        let labels = next_session_labels(
            &[enrollment("m-1", "c-1")],
            &[class("c-1", "Guppies", None)],
        );

        let swimmers = swimmers(&members, &labels);
        assert_eq!(swimmers[0].next_session, "Guppies: Schedule TBD");
        assert_eq!(swimmers[1].next_session, "No upcoming session");
        assert_eq!(swimmers[1].name, "Jack Johnson");
        assert_eq!(swimmers[1].level, "Level 2");
    }

    #[test]
    fn mastered_skills_sort_first_then_by_name() {
        let rows = [
            skill_row("s-flip", None),
            skill_row("s-free", Some(date!(2026 - 02 - 10))),
            skill_row("s-back", Some(date!(2026 - 01 - 28))),
        ];
        let skills = [
            skill("s-flip", "Flip turn"),
            skill("s-free", "Freestyle breathing"),
            skill("s-back", "Backstroke arms"),
        ];

        let grouped = skills_by_swimmer(&rows, &skills);
        let names: Vec<_> = grouped["m-1"].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Backstroke arms", "Freestyle breathing", "Flip turn"]);

        let backstroke = &grouped["m-1"][0];
        assert!(backstroke.mastered);
        assert_eq!(backstroke.date_acquired.as_deref(), Some("Jan 28, 2026"));
        assert_eq!(grouped["m-1"][2].date_acquired, None);
    }

    #[test]
    fn mastery_ignores_progress() {
        let mut row = skill_row("s-1", None);
        row.progress = Some("100".to_owned());

        let grouped = skills_by_swimmer(&[row], &[skill("s-1", "Treading water")]);
        assert!(!grouped["m-1"][0].mastered);
    }

    #[test]
    fn unresolved_skills_are_kept_with_a_placeholder() {
        let grouped = skills_by_swimmer(&[skill_row("gone", None)], &[]);

        assert_eq!(grouped["m-1"][0].name, "Unknown skill");
        assert_eq!(grouped["m-1"][0].id, "gone");
    }

    #[test]
    fn name_comparison_ignores_case() {
        assert_eq!(compare_names("backstroke", "Flip turn"), Ordering::Less);
        assert_eq!(compare_names("Zipper", "apple"), Ordering::Greater);
        assert_eq!(compare_names("float", "Float"), Ordering::Less);
        assert_eq!(compare_names("Front Float", "Front float"), Ordering::Greater);
        assert_eq!(compare_names("Float", "Float"), Ordering::Equal);
    }

    #[test]
    fn notes_keep_order_and_fill_gaps() {
        let evaluations = [
            Evaluation {
                evaluation_id: "e-2".to_owned(),
                member_id: "m-1".to_owned(),
                feedback: Some("Great streamline".to_owned()),
                evaluation_date: Some(date!(2026 - 02 - 11)),
            },
            Evaluation {
                evaluation_id: "e-1".to_owned(),
                member_id: "m-9".to_owned(),
                feedback: None,
                evaluation_date: None,
            },
        ];

        let notes = notes(&evaluations, &[member("m-1", "Emma")]);
        assert_eq!(notes[0].id, "e-2");
        assert_eq!(notes[0].swimmer_name, "Emma Johnson");
        assert_eq!(notes[0].date.as_deref(), Some("Feb 11, 2026"));
        assert_eq!(notes[1].swimmer_name, "Unknown swimmer");
        assert_eq!(notes[1].note, "");
        assert_eq!(notes[1].date, None);
    }
}
