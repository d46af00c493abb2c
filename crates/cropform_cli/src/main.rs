//! Command-line checks over a headless prediction page.
//!
//! # Responsibility
//! - Verify `cropform_core` wiring without a browser or Flutter host.
//! - Keep output deterministic for quick local sanity checks.

use clap::{Parser, Subcommand};
use cropform_core::{
    build_prediction_page, core_version, format_input_value, init_logging, Document, FieldName,
    MemoryDocument, Page, PageConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "cropform", version, about = "Headless crop recommendation form checks")]
struct Cli {
    /// JSON page config overriding the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fill and submit the prediction form, printing each verdict
    Check {
        #[arg(long, allow_hyphen_values = true)]
        nitrogen: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        phosphorus: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        potassium: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        temperature: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        humidity: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        ph: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        rainfall: Option<String>,
    },
    /// Round a value to a field's display precision
    Format {
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Print the initialized page HTML
    Snapshot,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(cropform_core::default_log_level(), log_dir).map_err(|err| err.to_string())?;
    }
    let config = load_config(cli.config.as_ref())?;

    match cli.cmd {
        Cmd::Check {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        } => {
            let values = [
                (FieldName::Nitrogen, nitrogen),
                (FieldName::Phosphorus, phosphorus),
                (FieldName::Potassium, potassium),
                (FieldName::Temperature, temperature),
                (FieldName::Humidity, humidity),
                (FieldName::Ph, ph),
                (FieldName::Rainfall, rainfall),
            ];
            check(config, values)
        }
        Cmd::Format { field, value } => {
            println!("{}", format_input_value(field.as_str(), value));
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Snapshot => {
            let (page, _) = headless_page(config)?;
            println!("{}", page.document().document_html());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(config: PageConfig, values: [(FieldName, Option<String>); 7]) -> Result<ExitCode, String> {
    let (mut page, markup) = headless_page(config)?;
    println!("cropform_core version={}", core_version());

    for (field, value) in &values {
        let Some(input) = markup.input(*field) else {
            continue;
        };
        let raw = value.as_deref().unwrap_or_default();
        page.fill(input, raw).map_err(|err| err.to_string())?;
        page.blur(input);
        let verdict = page.validate_input(input).map_err(|err| err.to_string())?;
        match verdict.message {
            Some(message) if !verdict.is_valid => {
                println!("{:<12} invalid: {message}", field.as_str())
            }
            _ => println!("{:<12} ok", field.as_str()),
        }
    }

    let outcome = page.submit(markup.form);
    if outcome.default_prevented {
        println!("submit rejected");
        Ok(ExitCode::FAILURE)
    } else {
        let label = page.document().text_content(markup.submit_button);
        println!("submit accepted button={label:?}");
        Ok(ExitCode::SUCCESS)
    }
}

fn headless_page(
    config: PageConfig,
) -> Result<(Page<MemoryDocument>, cropform_core::PredictionPage), String> {
    let mut document = MemoryDocument::new();
    let markup = build_prediction_page(&mut document).map_err(|err| err.to_string())?;
    let mut page = Page::new(document, config);
    page.initialize();
    Ok((page, markup))
}

fn load_config(path: Option<&PathBuf>) -> Result<PageConfig, String> {
    let Some(path) = path else {
        return Ok(PageConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
    PageConfig::from_json_str(&raw).map_err(|err| err.to_string())
}
