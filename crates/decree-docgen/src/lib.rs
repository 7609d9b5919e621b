#![allow(missing_docs)]

pub mod aggregate;
pub mod compose;
pub mod doctype;
pub mod error;
pub mod fill;
pub mod generate;
pub mod mapping;
pub mod registry;
pub mod store;
pub mod template_doc;
pub mod transform;

pub use aggregate::{AggregateSpec, compute as compute_aggregates};
pub use compose::{DocumentBuilder, PageLayout, compose_settlement, wrap};
pub use doctype::{DocumentType, UnknownDocumentType};
pub use error::{ConfigError, GenerateError, StoreError, TemplateError};
pub use fill::{FillReport, fill, finalize, is_truthy};
pub use generate::{
    GenerateOptions, GeneratedDocument, Generator, PREPARED_ON_FIELD, packet_for,
};
pub use mapping::{FieldKind, FieldMapping, MappingTable};
pub use registry::{aggregates_for, table_for};
pub use store::{
    DirTemplateStore, JsonFileResponseStore, ResponseStore, TemplateStore,
};
pub use template_doc::{FieldControl, FormField, FormTemplate, TemplatePage, TextRun};
pub use transform::Transform;
