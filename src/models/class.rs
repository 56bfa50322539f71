use sqlx::FromRow;

pub const SCHEDULE_TBD: &str = "Schedule TBD";

/// Places a swimmer in a class.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Enrollment {
    pub member_id: String,
    pub class_id: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ClassEntity {
    pub class_id: String,
    pub name: String,
    /// Free-form meeting times, e.g. `Tue/Thu 4:00 PM`
    pub schedule: Option<String>,
}

impl ClassEntity {
    /// `"{name}: {schedule}"`, with a placeholder when no schedule is set.
    pub fn session_label(&self) -> String {
        format!(
            "{}: {}",
            self.name,
            self.schedule.as_deref().unwrap_or(SCHEDULE_TBD)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_label_uses_the_schedule_when_present() {
        let mut class = ClassEntity {
            class_id: "c-1".to_owned(),
            name: "Level 2 Guppies".to_owned(),
            schedule: Some("Tue/Thu 4:00 PM".to_owned()),
        };
        assert_eq!(class.session_label(), "Level 2 Guppies: Tue/Thu 4:00 PM");

        class.schedule = None;
        assert_eq!(class.session_label(), "Level 2 Guppies: Schedule TBD");
    }
}
