use sqlx::FromRow;

use crate::models::full_name;

/// A human identity, looked up by email.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Person {
    pub person_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }

    /// The person's full name, or their email if they have no name on file.
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(first_name: Option<&str>, last_name: Option<&str>) -> Person {
        Person {
            person_id: "p-1".to_owned(),
            first_name: first_name.map(Into::into),
            last_name: last_name.map(Into::into),
            email: "sarah@example.com".to_owned(),
        }
    }

    #[test]
    fn display_name_prefers_the_full_name() {
        assert_eq!(
            person(Some("Sarah"), Some("Johnson")).display_name(),
            "Sarah Johnson"
        );
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(person(None, None).display_name(), "sarah@example.com");
        assert_eq!(person(Some(" "), None).display_name(), "sarah@example.com");
    }
}
