//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

pub mod job_match;
pub mod resume;
pub mod resume_analysis;
pub mod user;

/// JSON array of strings stored in a single column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}
