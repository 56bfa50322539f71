use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
}
