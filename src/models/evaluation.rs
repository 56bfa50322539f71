use sqlx::FromRow;
use time::Date;

/// Instructor feedback on a swimmer.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Evaluation {
    pub evaluation_id: String,
    pub member_id: String,
    pub feedback: Option<String>,
    pub evaluation_date: Option<Date>,
}
