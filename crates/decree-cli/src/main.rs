mod wizard;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;

use decree_docgen::{
    DirTemplateStore, DocumentType, GenerateOptions, Generator, JsonFileResponseStore,
    ResponseStore, table_for,
};
use decree_spec::{
    AnswerValue, QuestionSpec, QuestionType, QuestionnaireSpec, ResponseMap, ResponseSet,
    TemplateEngine, ValidationResult, effective_required, progress, resolve_visibility,
    response_schema, sample_responses, validate_all, validate_question,
};
use wizard::{AnswerParseError, PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// The questionnaire used when no `--spec` is given.
const DEFAULT_SPEC: &str =
    include_str!("../../decree-spec/tests/fixtures/uncontested_divorce.json");

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Guided uncontested-divorce paperwork from the terminal",
    long_about = "Walks a questionnaire, validates the answers, and assembles the filing packet documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer the questionnaire interactively.
    Wizard {
        /// Path to a questionnaire spec JSON (defaults to the built-in one).
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        /// Resume from previously saved responses.
        #[arg(long, value_name = "RESPONSES")]
        responses: Option<PathBuf>,
        /// Directory where drafts and completed responses are written.
        #[arg(long, value_name = "DIR")]
        save_dir: Option<PathBuf>,
        /// Show progress, section status, and parse expectations.
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit response JSON on completion.
        #[arg(long)]
        responses_json: bool,
    },
    /// Validate responses against a questionnaire spec.
    Validate {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        #[arg(long, value_name = "RESPONSES")]
        responses: PathBuf,
    },
    /// Report completion percentage and per-section status.
    Progress {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        #[arg(long, value_name = "RESPONSES")]
        responses: PathBuf,
    },
    /// Emit a JSON Schema for the currently-expected response object.
    Schema {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
        /// Responses that decide which conditional questions are visible.
        #[arg(long, value_name = "RESPONSES")]
        responses: Option<PathBuf>,
    },
    /// Emit an example response object for the questionnaire.
    Example {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
    },
    /// Integrity-check a questionnaire spec and the document wiring.
    Check {
        #[arg(long, value_name = "SPEC")]
        spec: Option<PathBuf>,
    },
    /// Generate one filing document from completed responses.
    Generate {
        /// Document type slug, e.g. petition or financial-affidavit.
        #[arg(long, value_name = "TYPE")]
        doc: String,
        #[arg(long, value_name = "RESPONSES")]
        responses: PathBuf,
        /// Directory holding the form templates.
        #[arg(long, value_name = "DIR")]
        templates: PathBuf,
        /// Output file for the generated document.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Keep the form fields editable instead of burning them in.
        #[arg(long)]
        no_flatten: bool,
        /// Stamp this date instead of today (YYYY-MM-DD).
        #[arg(long, value_name = "DATE")]
        prepared_on: Option<NaiveDate>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Wizard {
            spec,
            responses,
            save_dir,
            verbose,
            responses_json,
        } => run_wizard(spec, responses, save_dir, verbose, responses_json),
        Command::Validate { spec, responses } => run_validate(spec, responses),
        Command::Progress { spec, responses } => run_progress(spec, responses),
        Command::Schema { spec, responses } => run_schema(spec, responses),
        Command::Example { spec } => run_example(spec),
        Command::Check { spec } => run_check(spec),
        Command::Generate {
            doc,
            responses,
            templates,
            out,
            no_flatten,
            prepared_on,
        } => run_generate(doc, responses, templates, out, no_flatten, prepared_on),
    }
}

enum PromptOutcome {
    Answer(AnswerValue),
    Skipped,
    Aborted,
}

fn run_wizard(
    spec_path: Option<PathBuf>,
    responses_path: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    verbose: bool,
    responses_json: bool,
) -> CliResult<()> {
    let spec = load_spec(spec_path.as_deref())?;
    let mut responses = match responses_path {
        Some(path) => read_responses(&path)?,
        None => ResponseMap::new(),
    };
    let engine = TemplateEngine::new();
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), responses_json);
    presenter.show_header(&spec);

    // Questions the user chose to leave blank this session. A skip only
    // sticks while the question stays optional; the submission gate clears
    // it again if a later answer makes the question required.
    let mut skipped: Vec<String> = Vec::new();

    loop {
        let Some(question) = select_next(&spec, &responses, &skipped) else {
            let outcome = validate_all(&spec, &responses);
            if outcome.valid {
                let set = snapshot(&spec, &responses);
                presenter.show_completion(&set);
                if let Some(dir) = &save_dir {
                    submit_responses(dir, &spec, &set)?;
                }
                return Ok(());
            }
            println!("Some answers still need attention:");
            describe_validation(&outcome);
            // Put every failing question back into play: skipped ones become
            // promptable again and bad stored answers get re-asked.
            skipped.retain(|id| !outcome.errors_by_question.contains_key(id));
            for id in outcome.errors_by_question.keys() {
                responses.remove(id);
            }
            continue;
        };

        let snapshot_progress = progress(&spec, &responses);
        presenter.show_status(&snapshot_progress);

        let label = engine.resolve_label(question, &responses);
        let required = effective_required(question, &responses);
        let prompt = PromptContext::new(question, label, required, snapshot_progress.percent);

        match prompt_question(&prompt, question, required, &presenter)? {
            PromptOutcome::Answer(value) => {
                let issues = validate_question(question, Some(&value), &responses);
                if issues.is_empty() {
                    responses.insert(question.id.clone(), value);
                } else {
                    presenter.show_issues(&issues);
                }
            }
            PromptOutcome::Skipped => skipped.push(question.id.clone()),
            PromptOutcome::Aborted => {
                if let Some(dir) = &save_dir {
                    save_draft(dir, &snapshot(&spec, &responses))?;
                }
                println!(
                    "Stopped at {}% complete.",
                    progress(&spec, &responses).percent
                );
                return Ok(());
            }
        }
    }
}

/// The first visible required unanswered question, then the first visible
/// optional one the user has not already skipped, in schema order throughout.
fn select_next<'a>(
    spec: &'a QuestionnaireSpec,
    responses: &ResponseMap,
    skipped: &[String],
) -> Option<&'a QuestionSpec> {
    let visibility = resolve_visibility(spec, responses);
    let open = |question: &QuestionSpec| {
        visibility.get(&question.id).copied().unwrap_or(true)
            && !responses
                .get(&question.id)
                .map(|value| value.answered())
                .unwrap_or(false)
    };

    spec.iter_questions()
        .find(|question| open(question) && effective_required(question, responses))
        .or_else(|| {
            spec.iter_questions()
                .find(|question| open(question) && !skipped.contains(&question.id))
        })
}

fn prompt_question(
    prompt: &PromptContext,
    question: &QuestionSpec,
    required: bool,
    presenter: &WizardPresenter,
) -> CliResult<PromptOutcome> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // Input ran dry; treat like an explicit exit so scripted runs
            // stop cleanly instead of spinning on the same prompt.
            return Ok(PromptOutcome::Aborted);
        }

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Ok(PromptOutcome::Aborted);
        }
        if trimmed.is_empty() {
            if required {
                presenter.show_parse_error(&AnswerParseError::new(
                    "This question requires an answer.",
                    None,
                ));
                continue;
            }
            return Ok(PromptOutcome::Skipped);
        }

        match parse_answer(question, trimmed) {
            Ok(value) => return Ok(PromptOutcome::Answer(value)),
            Err(error) => presenter.show_parse_error(&error),
        }
    }
}

fn parse_answer(question: &QuestionSpec, raw: &str) -> Result<AnswerValue, AnswerParseError> {
    match question.kind {
        QuestionType::YesNo => match raw.to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "t" | "1" => Ok(AnswerValue::Bool(true)),
            "no" | "n" | "false" | "f" | "0" => Ok(AnswerValue::Bool(false)),
            _ => Err(AnswerParseError::new(
                "Please answer yes or no.",
                Some("expected yes/no/y/n".to_string()),
            )),
        },
        QuestionType::Number => AnswerValue::from(raw)
            .coerce_number()
            .map(AnswerValue::Number)
            .ok_or_else(|| {
                AnswerParseError::new("Please enter a number.", Some("expected numeric input".to_string()))
            }),
        QuestionType::Date => {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() {
                Ok(AnswerValue::from(raw))
            } else {
                Err(AnswerParseError::new(
                    "Please enter the date as YYYY-MM-DD.",
                    Some("expected an ISO date".to_string()),
                ))
            }
        }
        QuestionType::SingleChoice => match_choice(question, raw)
            .map(AnswerValue::from)
            .ok_or_else(|| choice_error(question)),
        QuestionType::MultiChoice => {
            let mut picks: Vec<String> = Vec::new();
            for part in raw.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                match match_choice(question, part) {
                    Some(value) => {
                        if !picks.contains(&value) {
                            picks.push(value);
                        }
                    }
                    None => return Err(choice_error(question)),
                }
            }
            if picks.is_empty() {
                return Err(choice_error(question));
            }
            Ok(AnswerValue::Many(picks))
        }
        QuestionType::AddressBlock => {
            let lines: Vec<&str> = raw
                .split(';')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();
            Ok(AnswerValue::from(lines.join("\n")))
        }
        QuestionType::ShortText | QuestionType::LongText => Ok(AnswerValue::from(raw)),
    }
}

/// Accept an option by stored value or by visible label, case-insensitively.
fn match_choice(question: &QuestionSpec, raw: &str) -> Option<String> {
    question.options.iter().find_map(|option| {
        if option.value.eq_ignore_ascii_case(raw) || option.label.eq_ignore_ascii_case(raw) {
            Some(option.value.clone())
        } else {
            None
        }
    })
}

fn choice_error(question: &QuestionSpec) -> AnswerParseError {
    AnswerParseError::new(
        format!(
            "Please choose one of: {}.",
            question.option_values().join(", ")
        ),
        Some("expected a listed option".to_string()),
    )
}

fn run_validate(spec_path: Option<PathBuf>, responses_path: PathBuf) -> CliResult<()> {
    let spec = load_spec(spec_path.as_deref())?;
    let responses = read_responses(&responses_path)?;

    let result = validate_all(&spec, &responses);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &ValidationResult) {
    for (question_id, messages) in &result.errors_by_question {
        for message in messages {
            println!("  {} - {}", question_id, message);
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required answers: {}",
            result.missing_required.join(", ")
        );
    }
    if let Some(first) = &result.first_failing {
        println!("Start with: {first}");
    }
}

fn run_progress(spec_path: Option<PathBuf>, responses_path: PathBuf) -> CliResult<()> {
    let spec = load_spec(spec_path.as_deref())?;
    let responses = read_responses(&responses_path)?;

    let outcome = progress(&spec, &responses);
    println!("Progress: {}%", outcome.percent);
    for section in &outcome.sections {
        let mark = if section.complete { "done" } else { "    " };
        println!("  [{mark}] {}", section.section_id);
    }
    Ok(())
}

fn run_schema(spec_path: Option<PathBuf>, responses_path: Option<PathBuf>) -> CliResult<()> {
    let spec = load_spec(spec_path.as_deref())?;
    let responses = match responses_path {
        Some(path) => read_responses(&path)?,
        None => ResponseMap::new(),
    };

    let visibility = resolve_visibility(&spec, &responses);
    let schema = response_schema(&spec, &visibility, &responses);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn run_example(spec_path: Option<PathBuf>) -> CliResult<()> {
    let spec = load_spec(spec_path.as_deref())?;
    let responses = ResponseMap::new();
    let visibility = resolve_visibility(&spec, &responses);
    let example = sample_responses(&spec, &visibility);
    println!("{}", serde_json::to_string_pretty(&example)?);
    Ok(())
}

fn run_check(spec_path: Option<PathBuf>) -> CliResult<()> {
    let text = spec_text(spec_path.as_deref())?;
    let spec = match QuestionnaireSpec::load_json(&text) {
        Ok(spec) => spec,
        Err(error) => return Err(format!("spec check failed: {error}").into()),
    };
    println!(
        "OK: {} v{} ({} sections, {} questions)",
        spec.id,
        spec.version,
        spec.sections.len(),
        spec.iter_questions().count()
    );

    for doc in DocumentType::ALL {
        if let Some(table) = table_for(doc) {
            table.check()?;
        }
    }
    println!("Document mapping tables: OK");
    Ok(())
}

fn run_generate(
    doc: String,
    responses_path: PathBuf,
    templates: PathBuf,
    out: PathBuf,
    no_flatten: bool,
    prepared_on: Option<NaiveDate>,
) -> CliResult<()> {
    let document_type = DocumentType::from_str(&doc)?;
    let responses = read_responses(&responses_path)?;

    let generator = Generator::new(DirTemplateStore::new(templates));
    let options = GenerateOptions {
        flatten: !no_flatten,
        prepared_on,
    };
    let document = generator.generate(document_type, &responses, &options)?;

    if !document.report.skipped.is_empty() {
        eprintln!(
            "Fields missing from the template were skipped: {}",
            document.report.skipped.join(", ")
        );
    }
    fs::write(&out, &document.bytes)?;
    println!(
        "Generated {} at {} ({} bytes)",
        document.document_type.title(),
        out.display(),
        document.bytes.len()
    );
    Ok(())
}

fn spec_text(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => Ok(DEFAULT_SPEC.to_string()),
    }
}

fn load_spec(path: Option<&Path>) -> CliResult<QuestionnaireSpec> {
    Ok(QuestionnaireSpec::load_json(&spec_text(path)?)?)
}

/// Accept either a bare `{question-id: value}` object or a full saved
/// response set.
fn read_responses(path: &Path) -> CliResult<ResponseMap> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    if value.get("responses").is_some() {
        Ok(ResponseSet::from_json(&text)?.responses)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

fn snapshot(spec: &QuestionnaireSpec, responses: &ResponseMap) -> ResponseSet {
    ResponseSet {
        questionnaire_id: spec.id.clone(),
        spec_version: spec.version.clone(),
        responses: responses.clone(),
        meta: None,
    }
}

fn save_draft(dir: &Path, set: &ResponseSet) -> CliResult<()> {
    let mut store = JsonFileResponseStore::new(dir);
    store.save(set)?;
    println!(
        "Draft saved to {}",
        dir.join(format!("{}.json", set.questionnaire_id)).display()
    );
    Ok(())
}

fn submit_responses(dir: &Path, spec: &QuestionnaireSpec, set: &ResponseSet) -> CliResult<()> {
    let mut store = JsonFileResponseStore::new(dir);
    store.submit(spec, set)?;
    println!(
        "Responses recorded at {}",
        dir.join(format!("{}.submitted.json", set.questionnaire_id))
            .display()
    );
    Ok(())
}
