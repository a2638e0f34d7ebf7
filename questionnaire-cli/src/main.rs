use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use questionnaire::{PresentationSurface, SessionError, SessionOptions, TestSurface, ask_client};
use questionnaire_egui_form::EguiFormSurface;
use questionnaire_ratatui_form::RatatuiFormSurface;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Ask a human to fill in a questionnaire and print the transcript.
///
/// The questionnaire is JSON with `title`, `author`, `introduction` and
/// `questions` (each `{ "question": ..., "options": [...] }`). Missing title,
/// author or introduction fall back to defaults.
#[derive(Parser, Debug)]
#[command(name = "questionnaire", version)]
struct Args {
    /// Questionnaire JSON file, `-` for stdin
    #[arg(long, short, required_unless_present = "demo", conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Use a built-in questionnaire instead of a file
    #[arg(long, value_enum)]
    demo: Option<Demo>,

    /// Where to show the form
    #[arg(long, value_enum, default_value_t = SurfaceKind::Tui)]
    surface: SurfaceKind,

    /// Response JSON the scripted surface submits; `null` closes the form instead
    #[arg(long, required_if_eq("surface", "scripted"))]
    answers: Option<PathBuf>,

    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Window width for the gui surface
    #[arg(long, default_value_t = 480.0)]
    window_width: f32,

    /// Window height for the gui surface
    #[arg(long, default_value_t = 640.0)]
    window_height: f32,

    /// Window title for the gui surface
    #[arg(long)]
    window_title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SurfaceKind {
    /// Terminal form on stderr
    Tui,
    /// Desktop window
    Gui,
    /// Answer from `--answers` without a human
    Scripted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// Website redesign kickoff, sent without an author
    Kickoff,
    /// One question, two options
    Color,
    /// Questions without options
    Retrospective,
}

impl Demo {
    fn raw(self) -> Result<Value> {
        Ok(match self {
            Self::Kickoff => example_questionnaires::kickoff::raw_without_author(),
            Self::Color => example_questionnaires::color::raw(),
            Self::Retrospective => serde_json::to_value(example_questionnaires::open_ended()?)?,
        })
    }
}

/// The questionnaire input could not be parsed as JSON.
#[derive(Debug, Error)]
#[error("{path} is not valid JSON")]
struct InvalidQuestionnaireJson {
    path: String,
    #[source]
    source: serde_json::Error,
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read questionnaire from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn load_questionnaire(args: &Args) -> Result<Value> {
    match (&args.input, args.demo) {
        (_, Some(demo)) => demo.raw(),
        (Some(path), None) => {
            let text = read_source(path)?;
            let raw = serde_json::from_str(&text).map_err(|source| InvalidQuestionnaireJson {
                path: path.display().to_string(),
                source,
            })?;
            Ok(raw)
        }
        (None, None) => anyhow::bail!("either --input or --demo is required"),
    }
}

fn scripted_surface(path: &Path) -> Result<TestSurface> {
    let text = read_source(path)?;
    let answers: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if answers.is_null() {
        return Ok(TestSurface::abandoning());
    }
    let response = serde_json::from_value(answers)
        .with_context(|| format!("{} is not a questionnaire response", path.display()))?;
    Ok(TestSurface::submitting(response))
}

fn session_options(args: &Args) -> SessionOptions {
    match args.timeout {
        Some(secs) => SessionOptions::new().with_timeout(Duration::from_secs(secs)),
        None => SessionOptions::new(),
    }
}

fn ask<S: PresentationSurface>(raw: Value, surface: &S, options: SessionOptions) -> Result<String> {
    Ok(ask_client(raw, surface, options)?)
}

fn run(args: &Args) -> Result<String> {
    let raw = load_questionnaire(args)?;
    let options = session_options(args);
    debug!(surface = ?args.surface, ?options, "starting questionnaire");

    match args.surface {
        SurfaceKind::Tui => ask(raw, &RatatuiFormSurface::new(), options),
        SurfaceKind::Gui => {
            let mut surface =
                EguiFormSurface::new().with_window_size([args.window_width, args.window_height]);
            if let Some(title) = &args.window_title {
                surface = surface.with_title(title);
            }
            ask(raw, &surface, options)
        }
        SurfaceKind::Scripted => {
            let path = args
                .answers
                .as_deref()
                .context("--answers is required for the scripted surface")?;
            ask(raw, &scripted_surface(path)?, options)
        }
    }
}

fn exit_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<SessionError>() {
        Some(SessionError::Schema(_)) => ExitCode::from(2),
        Some(SessionError::Abandoned | SessionError::TimedOut(_)) => ExitCode::from(3),
        Some(_) => ExitCode::FAILURE,
        None if err.downcast_ref::<InvalidQuestionnaireJson>().is_some() => ExitCode::from(2),
        None => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(transcript) => {
            println!("{transcript}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    }
}
