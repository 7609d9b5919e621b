//! The authored wiring: one mapping table and one aggregate set per
//! fillable document type.
//!
//! Tables live in code rather than data files so renaming a response key or
//! template field is a grep-able change, and so `check()` runs in CI via the
//! unit tests below.

use crate::aggregate::AggregateSpec;
use crate::doctype::DocumentType;
use crate::mapping::{FieldMapping, MappingTable};
use crate::transform::Transform;

/// The mapping table for a document type; `None` for freeform documents,
/// which are composed rather than filled.
pub fn table_for(document_type: DocumentType) -> Option<MappingTable> {
    match document_type {
        DocumentType::Petition => Some(petition()),
        DocumentType::PetitionWithChildren => Some(MappingTable::compose(
            &petition(),
            DocumentType::PetitionWithChildren,
            children_entries(),
        )),
        DocumentType::Summons => Some(summons()),
        DocumentType::FinancialAffidavit => Some(MappingTable::compose(
            &income_core(DocumentType::FinancialAffidavit),
            DocumentType::FinancialAffidavit,
            affidavit_entries(),
        )),
        DocumentType::ChildSupportWorksheet => Some(MappingTable::compose(
            &income_core(DocumentType::ChildSupportWorksheet),
            DocumentType::ChildSupportWorksheet,
            worksheet_entries(),
        )),
        DocumentType::FinalDecree => Some(final_decree()),
        DocumentType::SettlementAgreement => None,
    }
}

/// Computed money fields written after the mapping pass.
pub fn aggregates_for(document_type: DocumentType) -> Vec<AggregateSpec> {
    match document_type {
        DocumentType::FinancialAffidavit => vec![
            AggregateSpec::sum(
                "TotalMonthlyIncome",
                &["petitioner-monthly-income", "respondent-monthly-income"],
            ),
            AggregateSpec::sum(
                "TotalMonthlyExpenses",
                &["petitioner-monthly-expenses", "respondent-monthly-expenses"],
            ),
            AggregateSpec::difference(
                "NetMonthlyIncome",
                &["petitioner-monthly-income", "respondent-monthly-income"],
                &["petitioner-monthly-expenses", "respondent-monthly-expenses"],
            ),
        ],
        DocumentType::ChildSupportWorksheet => vec![
            AggregateSpec::sum(
                "CombinedMonthlyIncome",
                &["petitioner-monthly-income", "respondent-monthly-income"],
            ),
            AggregateSpec::sum("TotalChildSupport", &["child-support-monthly"]),
        ],
        _ => Vec::new(),
    }
}

fn petition() -> MappingTable {
    MappingTable::new(
        DocumentType::Petition,
        vec![
            FieldMapping::text("filing-county", "CountyOfFiling")
                .with_transform(Transform::CountyName)
                .with_section_tag("caption"),
            FieldMapping::text("petitioner-full-name", "PetitionerFullName")
                .with_section_tag("caption"),
            FieldMapping::text("respondent-full-name", "RespondentFullName")
                .with_section_tag("caption"),
            FieldMapping::text("petitioner-address", "PetitionerAddress")
                .with_section_tag("parties"),
            FieldMapping::text("petitioner-phone", "PetitionerPhone").with_section_tag("parties"),
            FieldMapping::text("petitioner-email", "PetitionerEmail").with_section_tag("parties"),
            FieldMapping::text("respondent-address", "RespondentAddress")
                .with_section_tag("parties"),
            FieldMapping::date("marriage-date", "MarriageDate").with_section_tag("marriage"),
            FieldMapping::text("marriage-city", "MarriageCity").with_section_tag("marriage"),
            FieldMapping::text("marriage-state", "MarriageState").with_section_tag("marriage"),
            FieldMapping::date("separation-date", "SeparationDate").with_section_tag("marriage"),
            FieldMapping::text("residency-months", "ResidencyMonths").with_section_tag("marriage"),
            FieldMapping::text("reconciliation-possible", "ReconciliationPossible")
                .with_transform(Transform::YesNoWord)
                .with_section_tag("marriage"),
            FieldMapping::checkbox("owns-marital-home", "OwnsRealProperty")
                .with_section_tag("relief"),
            FieldMapping::checkbox("petitioner-restore-name", "NameRestorationRequested")
                .with_section_tag("relief"),
            FieldMapping::text("petitioner-former-name", "FormerNameToRestore")
                .with_section_tag("relief"),
        ],
    )
}

fn children_entries() -> Vec<FieldMapping> {
    vec![
        FieldMapping::checkbox("has-minor-children", "MinorChildrenOfMarriage")
            .with_section_tag("children"),
        FieldMapping::text("children-count", "NumberOfMinorChildren").with_section_tag("children"),
        FieldMapping::text("children-names", "MinorChildrenNames").with_section_tag("children"),
        FieldMapping::text("custody-arrangement", "CustodyRequested")
            .with_transform(Transform::LegalAuthority)
            .with_section_tag("children"),
        FieldMapping::text("parenting-schedule", "ParentingSchedule")
            .with_transform(Transform::ScheduleType)
            .with_section_tag("children"),
        FieldMapping::currency("child-support-monthly", "MonthlyChildSupport")
            .with_section_tag("children"),
    ]
}

fn summons() -> MappingTable {
    MappingTable::new(
        DocumentType::Summons,
        vec![
            FieldMapping::text("filing-county", "CountyOfFiling")
                .with_transform(Transform::CountyName),
            FieldMapping::text("petitioner-full-name", "PetitionerFullName"),
            FieldMapping::text("respondent-full-name", "RespondentFullName"),
            FieldMapping::text("respondent-address", "ServiceAddress"),
            FieldMapping::text("respondent-attorney-name", "RespondentAttorney"),
        ],
    )
}

fn income_core(document_type: DocumentType) -> MappingTable {
    MappingTable::new(
        document_type,
        vec![
            FieldMapping::currency("petitioner-monthly-income", "PetitionerMonthlyIncome")
                .with_section_tag("income"),
            FieldMapping::currency("respondent-monthly-income", "RespondentMonthlyIncome")
                .with_section_tag("income"),
        ],
    )
}

fn affidavit_entries() -> Vec<FieldMapping> {
    vec![
        FieldMapping::text("petitioner-full-name", "AffiantName").with_section_tag("caption"),
        FieldMapping::text("filing-county", "CountyOfFiling")
            .with_transform(Transform::CountyName)
            .with_section_tag("caption"),
        FieldMapping::currency("petitioner-monthly-expenses", "PetitionerMonthlyExpenses")
            .with_section_tag("expenses"),
        FieldMapping::currency("respondent-monthly-expenses", "RespondentMonthlyExpenses")
            .with_section_tag("expenses"),
        FieldMapping::currency("child-support-monthly", "MonthlyChildSupport")
            .with_section_tag("support"),
        FieldMapping::currency("spousal-support-monthly", "MonthlySpousalSupport")
            .with_section_tag("support"),
    ]
}

fn worksheet_entries() -> Vec<FieldMapping> {
    vec![
        FieldMapping::text("children-count", "NumberOfChildren").with_section_tag("children"),
        FieldMapping::currency("child-support-monthly", "AgreedMonthlySupport")
            .with_section_tag("support"),
    ]
}

fn final_decree() -> MappingTable {
    MappingTable::new(
        DocumentType::FinalDecree,
        vec![
            FieldMapping::text("filing-county", "CountyOfFiling")
                .with_transform(Transform::CountyName),
            FieldMapping::text("petitioner-full-name", "PetitionerFullName"),
            FieldMapping::text("respondent-full-name", "RespondentFullName"),
            FieldMapping::date("marriage-date", "MarriageDate"),
            FieldMapping::date("separation-date", "SeparationDate"),
            FieldMapping::text("custody-arrangement", "CustodyOrdered")
                .with_transform(Transform::LegalAuthority),
            FieldMapping::currency("child-support-monthly", "ChildSupportOrdered"),
            FieldMapping::currency("spousal-support-monthly", "SpousalSupportOrdered"),
            FieldMapping::text("petitioner-former-name", "RestoredName"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_authored_table_passes_check() {
        for doc in DocumentType::ALL {
            if let Some(table) = table_for(doc) {
                table.check().unwrap_or_else(|error| {
                    panic!("table for {doc} is defective: {error}");
                });
                assert_eq!(table.document_type, doc);
                assert!(!table.entries.is_empty());
            }
        }
    }

    #[test]
    fn composed_petition_keeps_base_order_then_extends() {
        let base = table_for(DocumentType::Petition).unwrap();
        let composed = table_for(DocumentType::PetitionWithChildren).unwrap();

        assert!(composed.entries.len() > base.entries.len());
        for (index, entry) in base.entries.iter().enumerate() {
            assert_eq!(composed.entries[index].dest, entry.dest);
        }
        let tail: Vec<&str> = composed.entries[base.entries.len()..]
            .iter()
            .map(|entry| entry.dest.as_str())
            .collect();
        assert!(tail.contains(&"MonthlyChildSupport"));
    }

    #[test]
    fn worksheet_shares_the_income_core() {
        let affidavit = table_for(DocumentType::FinancialAffidavit).unwrap();
        let worksheet = table_for(DocumentType::ChildSupportWorksheet).unwrap();

        assert_eq!(affidavit.entries[0].dest, "PetitionerMonthlyIncome");
        assert_eq!(worksheet.entries[0].dest, "PetitionerMonthlyIncome");
        assert_eq!(affidavit.entries[1].dest, worksheet.entries[1].dest);
    }

    #[test]
    fn only_financial_documents_carry_aggregates() {
        assert!(aggregates_for(DocumentType::Petition).is_empty());
        let affidavit = aggregates_for(DocumentType::FinancialAffidavit);
        let dests: Vec<&str> = affidavit.iter().map(|spec| spec.dest.as_str()).collect();
        assert_eq!(
            dests,
            vec!["TotalMonthlyIncome", "TotalMonthlyExpenses", "NetMonthlyIncome"]
        );
    }
}
