//! One request in, one finished document out.
//!
//! The orchestrator wires the seams together: fetch template bytes, resolve
//! the mapping table, apply, compute aggregates, fill, stamp, finalize.
//! Freeform documents skip all of that and go through the composer. Nothing
//! here holds state between requests; generating two documents concurrently
//! shares only immutable inputs.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use decree_spec::ResponseMap;

use crate::aggregate;
use crate::compose::{self, PageLayout};
use crate::doctype::DocumentType;
use crate::error::GenerateError;
use crate::fill::{self, FillReport};
use crate::registry;
use crate::store::TemplateStore;
use crate::template_doc::FormTemplate;

/// Field name every fillable template reserves for the generation date.
pub const PREPARED_ON_FIELD: &str = "PreparedOn";

/// Knobs for one generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Burn values into the page text and drop the form fields.
    pub flatten: bool,
    /// Stamp this date instead of today. The stamp is the only
    /// generation-time-dependent output, so fixing it makes byte-identical
    /// runs possible.
    pub prepared_on: Option<NaiveDate>,
}

/// A finished document. Bytes only; where they go is the caller's business.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub document_type: DocumentType,
    pub bytes: Vec<u8>,
    pub generated_at: DateTime<Utc>,
    pub report: FillReport,
}

/// Document generation over a template source.
#[derive(Debug)]
pub struct Generator<S> {
    templates: S,
}

impl<S: TemplateStore> Generator<S> {
    pub fn new(templates: S) -> Self {
        Self { templates }
    }

    pub fn generate(
        &self,
        document_type: DocumentType,
        responses: &ResponseMap,
        options: &GenerateOptions,
    ) -> Result<GeneratedDocument, GenerateError> {
        let generated_at = Utc::now();

        if document_type.is_freeform() {
            let bytes = compose::compose_settlement(responses, PageLayout::default());
            info!(doc = %document_type, bytes = bytes.len(), "composed document");
            return Ok(GeneratedDocument {
                document_type,
                bytes,
                generated_at,
                report: FillReport::default(),
            });
        }

        let table = registry::table_for(document_type)
            .ok_or(GenerateError::NoTemplate(document_type))?;
        table.check()?;

        let template_bytes = self.templates.fetch(document_type)?;
        let mut template = FormTemplate::from_bytes(&template_bytes)?;

        // Mapping pass first, then aggregates, so computed totals overwrite
        // anything stale the mapping wrote to the same fields.
        let mut values = table.apply(responses);
        values.extend(aggregate::compute(
            &registry::aggregates_for(document_type),
            responses,
        ));

        let prepared = options
            .prepared_on
            .unwrap_or_else(|| generated_at.date_naive());
        values.push((
            PREPARED_ON_FIELD.to_string(),
            prepared.format("%B %-d, %Y").to_string(),
        ));

        let report = fill::fill(&mut template, &values, &table.entries);
        info!(
            doc = %document_type,
            written = report.written,
            skipped = report.skipped.len(),
            "filled template"
        );

        let bytes = fill::finalize(template, options.flatten)?;
        Ok(GeneratedDocument {
            document_type,
            bytes,
            generated_at,
            report,
        })
    }
}

/// Which documents a filing needs, given the answers: the with-children
/// petition and worksheet replace their childless counterparts when minor
/// children are involved.
pub fn packet_for(responses: &ResponseMap) -> Vec<DocumentType> {
    let with_children = responses
        .get("has-minor-children")
        .and_then(decree_spec::AnswerValue::coerce_bool)
        .unwrap_or(false);

    let mut packet = Vec::new();
    if with_children {
        packet.push(DocumentType::PetitionWithChildren);
    } else {
        packet.push(DocumentType::Petition);
    }
    packet.push(DocumentType::Summons);
    packet.push(DocumentType::FinancialAffidavit);
    if with_children {
        packet.push(DocumentType::ChildSupportWorksheet);
    }
    packet.push(DocumentType::SettlementAgreement);
    packet.push(DocumentType::FinalDecree);
    packet
}
