//! Storage seams: where templates come from and where responses go.
//!
//! The engine itself never touches these; the generation orchestrator pulls
//! template bytes through `TemplateStore`, and the CLI persists drafts
//! through `ResponseStore`. Both ship filesystem implementations; a hosted
//! deployment substitutes its own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use decree_spec::{QuestionnaireSpec, ResponseSet, validate_all};
use tracing::debug;

use crate::doctype::DocumentType;
use crate::error::StoreError;

/// Source of fillable template bytes.
pub trait TemplateStore {
    fn fetch(&self, document_type: DocumentType) -> Result<Vec<u8>, StoreError>;
}

/// Templates on disk under a root directory, laid out by the
/// `DocumentType::template_path` convention.
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    root: PathBuf,
}

impl DirTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateStore for DirTemplateStore {
    fn fetch(&self, document_type: DocumentType) -> Result<Vec<u8>, StoreError> {
        let Some(relative) = document_type.template_path() else {
            return Err(StoreError::NotFound(document_type));
        };
        let path = self.root.join(relative);
        debug!(template = %path.display(), "loading template");
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(document_type))
            }
            Err(error) => Err(StoreError::Io(error)),
        }
    }
}

/// Persistence contract for response snapshots.
///
/// `save` stores any draft, however incomplete; `submit` is the one gate
/// that refuses invalid answers.
pub trait ResponseStore {
    fn save(&mut self, set: &ResponseSet) -> Result<(), StoreError>;
    fn submit(&mut self, spec: &QuestionnaireSpec, set: &ResponseSet) -> Result<(), StoreError>;
    fn load(&self, questionnaire_id: &str) -> Result<Option<ResponseSet>, StoreError>;
}

/// Drafts as pretty JSON files under a directory, one per questionnaire.
#[derive(Debug, Clone)]
pub struct JsonFileResponseStore {
    root: PathBuf,
}

impl JsonFileResponseStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn draft_path(&self, questionnaire_id: &str) -> PathBuf {
        self.root.join(format!("{questionnaire_id}.json"))
    }

    fn submitted_path(&self, questionnaire_id: &str) -> PathBuf {
        self.root.join(format!("{questionnaire_id}.submitted.json"))
    }

    fn write(&self, path: &Path, set: &ResponseSet) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = set.to_json_pretty().map_err(StoreError::Malformed)?;
        fs::write(path, text)?;
        Ok(())
    }
}

impl ResponseStore for JsonFileResponseStore {
    fn save(&mut self, set: &ResponseSet) -> Result<(), StoreError> {
        self.write(&self.draft_path(&set.questionnaire_id), set)
    }

    fn submit(&mut self, spec: &QuestionnaireSpec, set: &ResponseSet) -> Result<(), StoreError> {
        let result = validate_all(spec, &set.responses);
        if !result.valid {
            return Err(StoreError::RejectedSubmit);
        }
        self.write(&self.submitted_path(&set.questionnaire_id), set)
    }

    fn load(&self, questionnaire_id: &str) -> Result<Option<ResponseSet>, StoreError> {
        let path = self.draft_path(questionnaire_id);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StoreError::Io(error)),
        };
        let set = ResponseSet::from_json(&text).map_err(StoreError::Malformed)?;
        Ok(Some(set))
    }
}
