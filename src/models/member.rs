use sqlx::FromRow;
use time::Date;

use crate::models::full_name;

pub const UNASSIGNED_LEVEL: &str = "Unassigned level";

/// Pairs a guardian with one of their swimmers.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GuardianLink {
    pub guardian_person_id: String,
    pub member_id: String,
}

/// A swimmer.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Member {
    pub member_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// The level the swimmer is assigned to, if any
    pub level: Option<String>,
}

impl Member {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    pub fn level_label(&self) -> &str {
        self.level.as_deref().unwrap_or(UNASSIGNED_LEVEL)
    }
}

/// A swimmer's progress on a single skill.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MemberSkill {
    pub member_id: String,
    pub skill_id: String,
    pub progress: Option<String>,
    /// When the skill was acquired
    pub date_acquired: Option<Date>,
}

impl MemberSkill {
    /// A skill is mastered once it has an acquisition date, whatever its progress says.
    pub fn is_mastered(&self) -> bool {
        self.date_acquired.is_some()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn mastery_follows_the_acquisition_date() {
        let mut row = MemberSkill {
            member_id: "m-1".to_owned(),
            skill_id: "s-1".to_owned(),
            progress: Some("100".to_owned()),
            date_acquired: None,
        };
        assert!(!row.is_mastered());

        row.progress = Some("0".to_owned());
        row.date_acquired = Some(date!(2026 - 01 - 28));
        assert!(row.is_mastered());
    }

    #[test]
    fn missing_level_reads_unassigned() {
        let member = Member {
            member_id: "m-1".to_owned(),
            first_name: Some("Jack".to_owned()),
            last_name: Some("Johnson".to_owned()),
            level: None,
        };

        assert_eq!(member.level_label(), "Unassigned level");
        assert_eq!(member.full_name(), "Jack Johnson");
    }
}
