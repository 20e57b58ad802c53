//! Per-resource repository functions. Plain async functions over a
//! [`sqlx::PgPool`]; dynamic `ORDER BY` fragments come from whitelisted
//! enums, everything else is bound.

pub mod question;
pub mod techstack;
pub mod topic;
