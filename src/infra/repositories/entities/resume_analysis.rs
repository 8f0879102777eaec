//! Resume analysis database entity for SeaORM.

use sea_orm::entity::prelude::*;

use super::StringList;
use crate::domain::{AnalysisReport, Feedback, ResumeAnalysis};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resume_analyses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub resume_id: Uuid,
    pub ats_score: f64,
    pub grammar_score: f64,
    pub formatting_score: f64,
    pub keyword_score: f64,
    #[sea_orm(column_type = "Json")]
    pub skills: StringList,
    #[sea_orm(column_type = "Json")]
    pub strengths: StringList,
    #[sea_orm(column_type = "Json")]
    pub weaknesses: StringList,
    #[sea_orm(column_type = "Json")]
    pub suggestions: StringList,
    pub analyzed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ResumeAnalysis {
    fn from(model: Model) -> Self {
        ResumeAnalysis {
            id: model.id,
            resume_id: model.resume_id,
            report: AnalysisReport {
                ats_score: model.ats_score,
                grammar_score: model.grammar_score,
                formatting_score: model.formatting_score,
                keyword_score: model.keyword_score,
                skills: model.skills.0,
                feedback: Feedback {
                    strengths: model.strengths.0,
                    weaknesses: model.weaknesses.0,
                },
                suggestions: model.suggestions.0,
            },
            analyzed_at: model.analyzed_at,
        }
    }
}
