use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The paperwork set Decree can assemble.
///
/// The set is closed: adding a document means adding a variant, its mapping
/// table (or composer), and a fixture template, which keeps "what can we
/// generate" answerable by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Petition,
    PetitionWithChildren,
    Summons,
    FinancialAffidavit,
    ChildSupportWorksheet,
    SettlementAgreement,
    FinalDecree,
}

impl DocumentType {
    pub const ALL: [DocumentType; 7] = [
        DocumentType::Petition,
        DocumentType::PetitionWithChildren,
        DocumentType::Summons,
        DocumentType::FinancialAffidavit,
        DocumentType::ChildSupportWorksheet,
        DocumentType::SettlementAgreement,
        DocumentType::FinalDecree,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::Petition => "petition",
            DocumentType::PetitionWithChildren => "petition-with-children",
            DocumentType::Summons => "summons",
            DocumentType::FinancialAffidavit => "financial-affidavit",
            DocumentType::ChildSupportWorksheet => "child-support-worksheet",
            DocumentType::SettlementAgreement => "settlement-agreement",
            DocumentType::FinalDecree => "final-decree",
        }
    }

    /// Where the fillable template for this document lives, relative to a
    /// template root. Freeform documents are assembled from scratch and have
    /// no template.
    pub fn template_path(&self) -> Option<String> {
        if self.is_freeform() {
            return None;
        }
        Some(format!("templates/{}.json", self.slug()))
    }

    pub fn is_freeform(&self) -> bool {
        matches!(self, DocumentType::SettlementAgreement)
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Petition => "Petition for Dissolution of Marriage",
            DocumentType::PetitionWithChildren => {
                "Petition for Dissolution of Marriage (With Children)"
            }
            DocumentType::Summons => "Summons",
            DocumentType::FinancialAffidavit => "Financial Affidavit",
            DocumentType::ChildSupportWorksheet => "Child Support Worksheet",
            DocumentType::SettlementAgreement => "Marital Settlement Agreement",
            DocumentType::FinalDecree => "Final Decree of Dissolution",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown document type '{0}'; expected one of petition, petition-with-children, summons, financial-affidavit, child-support-worksheet, settlement-agreement, final-decree")]
pub struct UnknownDocumentType(String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|doc| doc.slug() == raw)
            .ok_or_else(|| UnknownDocumentType(raw.to_string()))
    }
}
