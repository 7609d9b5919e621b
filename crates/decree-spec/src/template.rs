//! Answer interpolation for question labels and help text.
//!
//! Content authors may reference earlier answers inside wording, e.g.
//! `"Does {{answers.spouse-first-name}} live in the marital home?"`. The
//! engine renders these with handlebars; helpers mirror the document-side
//! transforms so money and dates read identically everywhere.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{Value, json};

use crate::answers::ResponseMap;
use crate::error::TemplateError;
use crate::format;
use crate::schema::question::QuestionSpec;

/// How unresolved references behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Unknown keys are an error. Content lint tooling runs strict.
    Strict,
    /// Unknown keys render as empty text. The live engine runs lenient, since
    /// a label may legitimately reference a question not yet answered.
    Lenient,
}

/// Handlebars wrapper with the Decree helper set registered.
pub struct TemplateEngine {
    strict: Handlebars<'static>,
    lenient: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut strict = Handlebars::new();
        strict.set_strict_mode(true);
        register_default_helpers(&mut strict);

        let mut lenient = Handlebars::new();
        register_default_helpers(&mut lenient);

        Self { strict, lenient }
    }

    /// Render a template against the current responses.
    pub fn render(
        &self,
        text: &str,
        responses: &ResponseMap,
        mode: ResolutionMode,
    ) -> Result<String, TemplateError> {
        let ctx = json!({ "answers": serde_json::to_value(responses)? });
        let registry = match mode {
            ResolutionMode::Strict => &self.strict,
            ResolutionMode::Lenient => &self.lenient,
        };
        Ok(registry.render_template(text, &ctx)?)
    }

    /// Lenient label resolution with the raw label as fallback, for callers
    /// that must always have something to display.
    pub fn resolve_label(&self, question: &QuestionSpec, responses: &ResponseMap) -> String {
        self.render(&question.label, responses, ResolutionMode::Lenient)
            .unwrap_or_else(|_| question.label.clone())
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Register the `currency`, `longdate`, and `upper` helpers on a registry.
pub fn register_default_helpers(registry: &mut Handlebars<'_>) {
    registry.register_helper("currency", Box::new(currency_helper));
    registry.register_helper("longdate", Box::new(longdate_helper));
    registry.register_helper("upper", Box::new(upper_helper));
}

fn currency_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let amount = h.param(0).map(|param| param.value()).and_then(json_number);
    out.write(&format::currency_opt(amount))?;
    Ok(())
}

fn longdate_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h
        .param(0)
        .and_then(|param| param.value().as_str())
        .unwrap_or_default();
    let rendered = format::long_date(raw).unwrap_or_else(|| raw.to_string());
    out.write(&rendered)?;
    Ok(())
}

fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h
        .param(0)
        .and_then(|param| param.value().as_str())
        .unwrap_or_default();
    out.write(&raw.to_uppercase())?;
    Ok(())
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|ch| *ch != '$' && *ch != ',')
                .collect();
            cleaned.parse().ok()
        }
        _ => None,
    }
}
