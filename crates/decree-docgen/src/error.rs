use thiserror::Error;

use crate::doctype::DocumentType;

/// Defects in authored mapping tables or aggregate sets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("mapping table for {document} writes field '{dest}' twice")]
    DuplicateDestination {
        document: DocumentType,
        dest: String,
    },
}

/// Failures reading an authored form template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("template '{title}' has no pages")]
    Empty { title: String },
}

/// Failures at the storage seams.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no template available for {0}")]
    NotFound(DocumentType),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("responses failed validation; submit refused")]
    RejectedSubmit,

    #[error("stored responses are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Top-level failure of one document-generation request.
///
/// One failed request never poisons anything; the caller can retry with the
/// same inputs or generate a different document type immediately.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} is assembled from scratch and has no fillable template")]
    NoTemplate(DocumentType),
}
