//! The marital settlement agreement, composed clause by clause.
//!
//! No official template exists for this document; the parties' answers
//! decide which articles appear and how each one reads. Article numbering is
//! continuous over whatever ends up included. Missing answers degrade to
//! neutral wording rather than failing: the agreement a court sees must
//! always be a complete sentence, never a hole.

use decree_spec::{AnswerValue, ResponseMap};

use crate::aggregate::AggregateSpec;
use crate::compose::layout::{DocumentBuilder, PageLayout};
use crate::transform::Transform;

/// Lines a signature block needs; used to keep it on one page.
const SIGNATURE_BLOCK_LINES: usize = 16;

/// Compose the full agreement against the current answers.
pub fn compose_settlement(responses: &ResponseMap, layout: PageLayout) -> Vec<u8> {
    let mut doc = DocumentBuilder::new(layout);

    heading(&mut doc, responses);
    recitals(&mut doc, responses);

    separation_article(&mut doc, responses);
    real_property_article(&mut doc, responses);
    vehicles_article(&mut doc, responses);
    debts_article(&mut doc, responses);
    spousal_support_article(&mut doc, responses);
    children_articles(&mut doc, responses);
    name_restoration_article(&mut doc, responses);
    additional_terms_article(&mut doc, responses);
    entire_agreement_article(&mut doc, responses);

    signature_blocks(&mut doc, responses);
    disclaimer(&mut doc);

    doc.into_bytes()
}

fn heading(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let county = transformed(responses, "filing-county", Transform::CountyName)
        .unwrap_or_else(|| "the county of filing".to_string());

    doc.centered("IN THE COURT OF COMMON PLEAS");
    doc.centered(&county.to_uppercase());
    doc.blank();
    doc.centered("MARITAL SETTLEMENT AGREEMENT");
    doc.blank();
    doc.line(&format!(
        "Petitioner: {}",
        answered_text(responses, "petitioner-full-name").unwrap_or_default()
    ));
    doc.line(&format!(
        "Respondent: {}",
        answered_text(responses, "respondent-full-name").unwrap_or_default()
    ));
    doc.line("Case No. ____________________");
    doc.blank();
}

fn recitals(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let petitioner = party_name(responses, "petitioner-full-name", "the Petitioner");
    let respondent = party_name(responses, "respondent-full-name", "the Respondent");
    let married_on = transformed(responses, "marriage-date", Transform::LongDate)
        .unwrap_or_else(|| "a date the parties will supply".to_string());
    let separated_on = transformed(responses, "separation-date", Transform::LongDate)
        .unwrap_or_else(|| "a date the parties will supply".to_string());

    let mut place = String::new();
    if let Some(city) = answered_text(responses, "marriage-city") {
        place.push_str(&format!(" in {city}"));
        if let Some(state) = answered_text(responses, "marriage-state") {
            place.push_str(&format!(", {state}"));
        }
    }

    doc.wrapped(&format!(
        "This Marital Settlement Agreement is entered into between {petitioner} \
         (\"Petitioner\") and {respondent} (\"Respondent\"). The parties were married \
         on {married_on}{place} and separated on {separated_on}. The marriage is \
         irretrievably broken with no reasonable prospect of reconciliation, and the \
         parties intend this agreement to resolve every issue between them."
    ));
    doc.blank();
}

fn separation_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let separated_on = transformed(responses, "separation-date", Transform::LongDate)
        .unwrap_or_else(|| "the date of separation".to_string());
    doc.paragraph(
        "Separation",
        &format!(
            "The parties have lived separate and apart since {separated_on} and shall \
             continue to live separate and apart."
        ),
    );
}

fn real_property_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    if !is_yes(responses, "owns-marital-home") {
        return;
    }

    let body = match answered_text(responses, "home-disposition").as_deref() {
        Some("keep") => {
            let keeper = party_label(responses, "home-keeper", "the party retaining it");
            format!(
                "The marital home shall be retained by {keeper}, who assumes sole \
                 responsibility for the mortgage, taxes, and insurance on it. The other \
                 party shall execute a quitclaim deed conveying their entire interest \
                 within thirty days of entry of the final decree."
            )
        }
        Some("sell-and-split") => "The marital home shall be listed for sale at a mutually \
             agreed price within sixty days of entry of the final decree, and the net \
             proceeds of sale shall be divided equally between the parties."
            .to_string(),
        Some("unequal-split") => {
            let share = share_percent(responses);
            format!(
                "The marital home shall be listed for sale at a mutually agreed price \
                 within sixty days of entry of the final decree. The net proceeds of \
                 sale shall be divided {share} percent to the Petitioner and {balance} \
                 percent to the Respondent.",
                balance = 100.0 - share,
                share = share,
            )
        }
        Some("buyout") => {
            let payer = party_label(responses, "home-buyout-payer", "the acquiring party");
            let amount = transformed(responses, "home-buyout-amount", Transform::Currency)
                .unwrap_or_else(|| "$0.00".to_string());
            format!(
                "The marital home shall be acquired by {payer}, who shall pay the \
                 other party {amount} for that party's entire interest, with payment \
                 and deed exchange completed within ninety days of entry of the final \
                 decree."
            )
        }
        _ => "The parties shall divide their interest in the marital home as separately \
             agreed in writing."
            .to_string(),
    };

    doc.paragraph("Real Property", &body);
}

fn vehicles_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let body = answered_text(responses, "vehicle-division").unwrap_or_else(|| {
        "Each party shall keep the vehicles and personal property currently in their \
         possession, free of any claim by the other."
            .to_string()
    });
    doc.paragraph("Vehicles and Personal Property", &body);
}

fn debts_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let body = match answered_text(responses, "debt-division").as_deref() {
        Some("split-equally") => "All marital debts shall be divided equally between the \
             parties, each paying one half of every jointly incurred obligation."
            .to_string(),
        Some("custom") => answered_text(responses, "debt-division-notes").unwrap_or_else(|| {
            "The parties shall divide their marital debts as separately agreed in writing."
                .to_string()
        }),
        _ => "Each party shall pay the debts standing in their own name and shall \
             indemnify and hold the other harmless from them."
            .to_string(),
    };
    doc.paragraph("Debts", &body);
}

fn spousal_support_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let body = match answered_text(responses, "spousal-support").as_deref() {
        Some("petitioner-pays") => support_sentence(responses, "The Petitioner", "the Respondent"),
        Some("respondent-pays") => support_sentence(responses, "The Respondent", "the Petitioner"),
        _ => "Each party knowingly and voluntarily waives any claim to spousal support \
             from the other, now and in the future, regardless of any change in \
             circumstances."
            .to_string(),
    };
    doc.paragraph("Spousal Support", &body);
}

fn support_sentence(responses: &ResponseMap, payer: &str, payee: &str) -> String {
    let amount = transformed(responses, "spousal-support-monthly", Transform::Currency)
        .unwrap_or_else(|| "$0.00".to_string());
    let months = answered_text(responses, "spousal-support-months")
        .unwrap_or_else(|| "an agreed number of".to_string());
    format!(
        "{payer} shall pay {payee} spousal support of {amount} per month for {months} \
         consecutive months, beginning with the first full month after entry of the \
         final decree, terminating earlier only on the death of either party or the \
         remarriage of the recipient."
    )
}

fn children_articles(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    if !is_yes(responses, "has-minor-children") {
        return;
    }

    let custody = transformed(responses, "custody-arrangement", Transform::LegalAuthority)
        .unwrap_or_else(|| "Custody as the parties separately agree".to_string());
    let mut custody_body = format!("{custody}.");
    if let Some(names) = answered_text(responses, "children-names") {
        let count = answered_text(responses, "children-count").unwrap_or_else(|| "the".to_string());
        custody_body.push_str(&format!(
            " The parties have {count} minor child(ren) of the marriage: {}.",
            names.replace('\n', "; ")
        ));
    }
    doc.paragraph("Custody of Minor Children", &custody_body);

    let schedule = transformed(responses, "parenting-schedule", Transform::ScheduleType)
        .unwrap_or_else(|| "A schedule the parties will agree in writing".to_string());
    doc.paragraph(
        "Parenting Time",
        &format!("{schedule} shall govern parenting time, holidays alternating annually."),
    );

    let monthly = transformed(responses, "child-support-monthly", Transform::Currency)
        .unwrap_or_else(|| "$0.00".to_string());
    let combined = AggregateSpec::sum(
        "CombinedMonthlyIncome",
        &["petitioner-monthly-income", "respondent-monthly-income"],
    )
    .amount(responses);
    let mut support_body = format!(
        "Based on the parties' combined gross monthly income of {}, child support of \
         {monthly} per month shall be paid as the parties have agreed, due on the \
         first day of each month.",
        decree_spec::format::currency(combined)
    );
    if let Some(reason) = answered_text(responses, "deviation-reason") {
        support_body.push_str(&format!(
            " Support deviates from the guideline amount by agreement because {reason}."
        ));
    }
    doc.paragraph("Child Support", &support_body);
}

fn name_restoration_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    if !is_yes(responses, "petitioner-restore-name") {
        return;
    }
    let former = answered_text(responses, "petitioner-former-name")
        .unwrap_or_else(|| "the name stated in the petition".to_string());
    doc.paragraph(
        "Name Restoration",
        &format!(
            "Upon entry of the final decree, the Petitioner's former name, {former}, \
             shall be restored."
        ),
    );
}

fn additional_terms_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    if let Some(terms) = answered_text(responses, "additional-terms") {
        doc.paragraph("Additional Terms", &terms);
    }
}

fn entire_agreement_article(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    let county = transformed(responses, "filing-county", Transform::CountyName)
        .unwrap_or_else(|| "the county of filing".to_string());
    doc.paragraph(
        "Entire Agreement",
        &format!(
            "This agreement contains the parties' entire understanding. Each party \
             signs voluntarily, after full disclosure and with the opportunity to \
             consult independent counsel. It shall be incorporated into the final \
             decree entered in {county} and is binding on the parties' heirs and \
             assigns."
        ),
    );
}

fn signature_blocks(doc: &mut DocumentBuilder, responses: &ResponseMap) {
    // Never orphan the signatures at a page bottom.
    if doc.cursor() + SIGNATURE_BLOCK_LINES > doc.layout().lines {
        doc.break_page();
    }

    let petitioner = answered_text(responses, "petitioner-full-name").unwrap_or_default();
    let respondent = answered_text(responses, "respondent-full-name").unwrap_or_default();

    doc.blank();
    doc.line("AGREED AND SIGNED:");
    doc.blank();
    doc.line("_____________________________________          ______________________");
    doc.line(&format!("{:<47}Date", petitioner.to_uppercase()));
    doc.blank();
    doc.line("_____________________________________          ______________________");
    doc.line(&format!("{:<47}Date", respondent.to_uppercase()));
    doc.blank();
    doc.line("State of ____________________");
    doc.line("County of ___________________");
    doc.blank();
    doc.line("Subscribed and sworn to before me this ____ day of ____________, 20___.");
    doc.blank();
    doc.line("_____________________________________");
    doc.line("Notary Public");
}

fn disclaimer(doc: &mut DocumentBuilder) {
    doc.blank();
    doc.wrapped(
        "This document was prepared with self-help software at the direction of the \
         parties and is not legal advice. Each party had the opportunity to have it \
         reviewed by independent counsel before signing.",
    );
}

fn answered_text(responses: &ResponseMap, key: &str) -> Option<String> {
    responses
        .get(key)
        .filter(|value| value.answered())
        .map(AnswerValue::display_string)
}

fn transformed(responses: &ResponseMap, key: &str, transform: Transform) -> Option<String> {
    responses
        .get(key)
        .filter(|value| value.answered())
        .map(|value| transform.apply(value))
}

fn is_yes(responses: &ResponseMap, key: &str) -> bool {
    responses
        .get(key)
        .and_then(AnswerValue::coerce_bool)
        .unwrap_or(false)
}

fn party_name(responses: &ResponseMap, key: &str, fallback: &str) -> String {
    answered_text(responses, key).unwrap_or_else(|| fallback.to_string())
}

/// `petitioner` / `respondent` option codes into caption labels.
fn party_label(responses: &ResponseMap, key: &str, fallback: &str) -> String {
    match answered_text(responses, key).as_deref() {
        Some("petitioner") => "the Petitioner".to_string(),
        Some("respondent") => "the Respondent".to_string(),
        Some(other) => other.to_string(),
        None => fallback.to_string(),
    }
}

fn share_percent(responses: &ResponseMap) -> f64 {
    responses
        .get("petitioner-home-share")
        .and_then(AnswerValue::coerce_number)
        .unwrap_or(50.0)
        .clamp(0.0, 100.0)
}
