//! Rows read from the backing store.
//!
//! Identifiers are carried as strings; the queries cast key columns to
//! text so the rows decode the same whatever the key column type is.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

pub mod class;
pub mod evaluation;
pub mod member;
pub mod person;
pub mod skill;

pub use class::{ClassEntity, Enrollment};
pub use evaluation::Evaluation;
pub use member::{GuardianLink, Member, MemberSkill};
pub use person::Person;
pub use skill::Skill;

/// Dates shown to callers, e.g. `Feb 10, 2026`.
pub const DISPLAY_DATE: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE)
        .unwrap_or_else(|_| date.to_string())
}

/// Joins optional first and last names, dropping whichever is missing.
pub(crate) fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    format!(
        "{} {}",
        first_name.unwrap_or_default(),
        last_name.unwrap_or_default()
    )
    .trim()
    .to_owned()
}
