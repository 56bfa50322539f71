use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything the account dashboard shows, in one payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// The caller's name, or their email when they have none on file
    pub user_name: String,
    pub swimmers: Vec<Swimmer>,
    /// Each swimmer's skills, keyed by member id, mastered skills first
    pub skills_by_swimmer: BTreeMap<String, Vec<SkillProgress>>,
    /// The most recent instructor notes, newest first
    pub notes: Vec<Note>,
}

impl Snapshot {
    /// A snapshot for someone with no linked swimmers.
    pub fn empty(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swimmer {
    pub id: String,
    pub name: String,
    pub level: String,
    pub next_session: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    pub id: String,
    pub name: String,
    pub mastered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_acquired: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub swimmer_name: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut snapshot = Snapshot::empty("Sarah Johnson");
        snapshot.swimmers.push(Swimmer {
            id: "m-1".to_owned(),
            name: "Emma Johnson".to_owned(),
            level: "Level 2".to_owned(),
            next_session: "No upcoming session".to_owned(),
        });
        snapshot.skills_by_swimmer.insert(
            "m-1".to_owned(),
            vec![SkillProgress {
                id: "s-1".to_owned(),
                name: "Flip turn".to_owned(),
                mastered: false,
                date_acquired: None,
            }],
        );

        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "userName": "Sarah Johnson",
                "swimmers": [{
                    "id": "m-1",
                    "name": "Emma Johnson",
                    "level": "Level 2",
                    "nextSession": "No upcoming session",
                }],
                "skillsBySwimmer": {
                    "m-1": [{ "id": "s-1", "name": "Flip turn", "mastered": false }],
                },
                "notes": [],
            })
        );
    }

    #[test]
    fn absent_dates_are_omitted() {
        let note = Note {
            id: "e-1".to_owned(),
            swimmer_name: "Jack Johnson".to_owned(),
            note: String::new(),
            date: None,
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value, json!({ "id": "e-1", "swimmerName": "Jack Johnson", "note": "" }));
    }
}
