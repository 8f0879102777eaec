//! Resume database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{FileType, Resume};

/// Stored form of [`FileType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum FileKind {
    #[sea_orm(string_value = "pdf")]
    Pdf,
    #[sea_orm(string_value = "docx")]
    Docx,
}

impl From<FileType> for FileKind {
    fn from(file_type: FileType) -> Self {
        match file_type {
            FileType::Pdf => FileKind::Pdf,
            FileType::Docx => FileKind::Docx,
        }
    }
}

impl From<FileKind> for FileType {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Pdf => FileType::Pdf,
            FileKind::Docx => FileType::Docx,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resumes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub file_type: FileKind,
    pub file_size: i64,
    pub storage_key: String,
    #[sea_orm(column_type = "Text")]
    pub content_text: String,
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Resume {
    fn from(model: Model) -> Self {
        Resume {
            id: model.id,
            user_id: model.user_id,
            filename: model.filename,
            file_type: model.file_type.into(),
            file_size: model.file_size,
            storage_key: model.storage_key,
            content_text: model.content_text,
            uploaded_at: model.uploaded_at,
        }
    }
}
