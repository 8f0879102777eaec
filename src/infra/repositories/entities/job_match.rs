//! Job match database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::StringList;
use crate::domain::{JobMatch, MatchReport};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "job_matches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    #[sea_orm(column_type = "Text")]
    pub job_description: String,
    pub match_score: f64,
    #[sea_orm(column_type = "Json")]
    pub overlapping_skills: StringList,
    #[sea_orm(column_type = "Json")]
    pub missing_skills: StringList,
    #[sea_orm(column_type = "Json")]
    pub suggestions: StringList,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for JobMatch {
    fn from(model: Model) -> Self {
        JobMatch {
            id: model.id,
            resume_id: model.resume_id,
            user_id: model.user_id,
            job_title: model.job_title,
            job_description: model.job_description,
            report: MatchReport {
                match_score: model.match_score,
                overlapping_skills: model.overlapping_skills.0,
                missing_skills: model.missing_skills.0,
                suggestions: model.suggestions.0,
            },
            created_at: model.created_at,
        }
    }
}
