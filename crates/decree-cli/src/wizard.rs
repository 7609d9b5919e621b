use std::fmt::Write;

use decree_spec::{
    Progress, QuestionSpec, QuestionType, QuestionnaireSpec, ResponseSet, ValidationIssue,
};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: question prompts only.
    Clean,
    /// Verbose output: progress, section table, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Prints headers, prompts, and completion output for the wizard loop.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_responses_json: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, show_responses_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_responses_json,
        }
    }

    pub fn show_header(&mut self, spec: &QuestionnaireSpec) {
        if self.header_printed {
            return;
        }
        println!("Questionnaire: {} (v{})", spec.name, spec.version);
        if self.verbosity.is_verbose() {
            if let Some(minutes) = spec.metadata.estimated_minutes {
                println!("Estimated time: about {} minutes", minutes);
            }
            if !spec.metadata.required_supporting_documents.is_empty() {
                println!(
                    "Have these documents ready: {}",
                    spec.metadata.required_supporting_documents.join(", ")
                );
            }
        }
        println!("Answer each question. Press Enter to skip optional ones; type 'exit' to stop.");
        self.header_printed = true;
    }

    pub fn show_status(&self, progress: &Progress) {
        if !self.verbosity.is_verbose() {
            return;
        }
        println!("Progress: {}%", progress.percent);
        for section in &progress.sections {
            let mark = if section.complete { "done" } else { "    " };
            println!("  [{mark}] {}", section.section_id);
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("[{:>3}%] {}", prompt.percent, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{line}");
        if let Some(help) = &prompt.help {
            println!("{help}");
        }
        if self.verbosity.is_verbose() && !prompt.choices.is_empty() {
            println!("Choices: {}", prompt.choices.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {debug}");
        }
    }

    pub fn show_issues(&self, issues: &[ValidationIssue]) {
        for issue in issues {
            eprintln!("Invalid answer: {}", issue.message);
        }
    }

    pub fn show_completion(&self, set: &ResponseSet) {
        println!("Done ✅");
        match set.to_cbor() {
            Ok(bytes) => println!("Responses (CBOR hex): {}", encode_hex(&bytes)),
            Err(err) => eprintln!("Failed to serialize responses to CBOR: {err}"),
        }
        if self.show_responses_json {
            match set.to_json_pretty() {
                Ok(pretty) => println!("{pretty}"),
                Err(err) => eprintln!("Failed to serialize responses to JSON: {err}"),
            }
        }
    }
}

/// Context used to format a single prompt.
pub struct PromptContext {
    pub label: String,
    pub required: bool,
    pub percent: u8,
    pub hint: Option<String>,
    pub help: Option<String>,
    pub choices: Vec<String>,
}

impl PromptContext {
    pub fn new(question: &QuestionSpec, label: String, required: bool, percent: u8) -> Self {
        let choices: Vec<String> = question
            .options
            .iter()
            .map(|option| format!("{} ({})", option.value, option.label))
            .collect();
        Self {
            label,
            required,
            percent,
            hint: kind_hint(question),
            help: question.help_text.clone(),
            choices,
        }
    }
}

fn kind_hint(question: &QuestionSpec) -> Option<String> {
    let values = question.option_values();
    match question.kind {
        QuestionType::YesNo => Some("(yes/no)".to_string()),
        QuestionType::Number => Some("(number)".to_string()),
        QuestionType::Date => Some("(YYYY-MM-DD)".to_string()),
        QuestionType::SingleChoice if !values.is_empty() => {
            Some(format!("({})", values.join("/")))
        }
        QuestionType::MultiChoice if !values.is_empty() => {
            Some(format!("({}; comma separated)", values.join("/")))
        }
        QuestionType::AddressBlock => Some("(separate lines with ;)".to_string()),
        _ => None,
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut encoded, "{byte:02x}").expect("writing to string cannot fail");
    }
    encoded
}
