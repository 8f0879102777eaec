//! Resume entity and upload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported resume document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
        }
    }

    /// File extension used for storage keys.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Detect the format from the declared content type, falling back to the
    /// file extension when the content type is missing or generic.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Option<Self> {
        let by_mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .and_then(|ct| match ct.as_str() {
                PDF_MIME => Some(FileType::Pdf),
                DOCX_MIME => Some(FileType::Docx),
                _ => None,
            });

        by_mime.or_else(|| {
            let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
            Self::parse(&ext)
        })
    }

    /// Parse the stored lowercase name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded resume with its extracted text.
#[derive(Debug, Clone)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: i64,
    pub storage_key: String,
    pub content_text: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Data required to persist a new resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub file_type: FileType,
    pub file_size: i64,
    pub storage_key: String,
    pub content_text: String,
}

/// Storage key for a resume file: `<user_id>/<resume_id>.<ext>`.
pub fn storage_key(user_id: Uuid, resume_id: Uuid, file_type: FileType) -> String {
    format!("{}/{}.{}", user_id, resume_id, file_type.extension())
}

/// Resume metadata returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResumeResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Original upload file name
    #[schema(example = "jane_doe_resume.pdf")]
    pub filename: String,
    pub file_type: FileType,
    /// Size in bytes
    #[schema(example = 48213)]
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Resume> for ResumeResponse {
    fn from(resume: Resume) -> Self {
        Self {
            id: resume.id,
            filename: resume.filename,
            file_type: resume.file_type,
            file_size: resume.file_size,
            uploaded_at: resume.uploaded_at,
        }
    }
}
