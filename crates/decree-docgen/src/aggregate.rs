//! Computed money fields: sums over response keys, minus sums over others.
//!
//! Official financial forms carry totals the filer never types. These are
//! recomputed from the raw answers at every generation, after the mapping
//! pass, so a stale stored total can never reach a form.

use decree_spec::{AnswerValue, ResponseMap};
use serde::{Deserialize, Serialize};

use decree_spec::format;

/// One computed field: `sum(add) - sum(subtract)`, currency-rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSpec {
    pub dest: String,
    pub add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtract: Vec<String>,
}

impl AggregateSpec {
    pub fn sum(dest: &str, add: &[&str]) -> Self {
        Self {
            dest: dest.to_string(),
            add: add.iter().map(|key| key.to_string()).collect(),
            subtract: Vec::new(),
        }
    }

    pub fn difference(dest: &str, add: &[&str], subtract: &[&str]) -> Self {
        Self {
            dest: dest.to_string(),
            add: add.iter().map(|key| key.to_string()).collect(),
            subtract: subtract.iter().map(|key| key.to_string()).collect(),
        }
    }

    /// Numeric value of this aggregate. Absent and non-numeric inputs count
    /// as zero; a partially-filled affidavit still totals what is there.
    pub fn amount(&self, responses: &ResponseMap) -> f64 {
        let added: f64 = self.add.iter().map(|key| numeric(responses, key)).sum();
        let subtracted: f64 = self
            .subtract
            .iter()
            .map(|key| numeric(responses, key))
            .sum();
        added - subtracted
    }
}

/// Evaluate a set of aggregates into `(dest, currency)` pairs, in spec order.
pub fn compute(specs: &[AggregateSpec], responses: &ResponseMap) -> Vec<(String, String)> {
    specs
        .iter()
        .map(|spec| (spec.dest.clone(), format::currency(spec.amount(responses))))
        .collect()
}

fn numeric(responses: &ResponseMap, key: &str) -> f64 {
    responses
        .get(key)
        .and_then(AnswerValue::coerce_number)
        .unwrap_or(0.0)
}
