// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! roomcheck - room and door numbering checks
//!
//! Runs the numbering rules over a document snapshot exported from the CAD
//! host and prints the report as markdown or JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use roomcheck_model::HostDocument;
use roomcheck_snapshot::DocumentSnapshot;
use roomcheck_validator::{ConfigTables, ValidationMode, ValidationReport, Validator, ValidatorConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Run configuration looked up in the config directory
const DEFAULT_CONFIG_FILE: &str = "roomcheck.toml";

/// Exit status of a completed run that found issues, with `--fail-on-issues`
const ISSUES_FOUND: u8 = 2;

/// roomcheck - validate room numbers and door marks
#[derive(Parser, Debug)]
#[command(name = "roomcheck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Document snapshot (JSON) exported from the CAD host
    document: PathBuf,

    /// Directory holding the lookup tables and `roomcheck.toml`
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,

    /// Run configuration file (TOML), overrides the config directory's
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View to validate, by name (defaults to the snapshot's active view)
    #[arg(long)]
    view: Option<String>,

    /// Rooms to validate: ALL, FOH or BOH
    #[arg(short, long, default_value = "ALL")]
    mode: String,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Exit with status 2 when any room or door has an issue
    #[arg(long)]
    fail_on_issues: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn load_config(cli: &Cli) -> Result<ValidatorConfig> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => {
            let path = cli.config_dir.join(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                log::debug!("no {} found, using defaults", path.display());
                return Ok(ValidatorConfig::default());
            }
            path
        }
    };
    ValidatorConfig::from_file(&path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn load_document(path: &Path, view: Option<&str>) -> Result<DocumentSnapshot> {
    let doc = roomcheck_snapshot::load_path(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    let Some(name) = view else {
        return Ok(doc);
    };
    let id = doc
        .view_named(name)
        .with_context(|| format!("view '{name}' not found in {}", path.display()))?;
    Ok(doc.with_active_view(id)?)
}

fn run(cli: &Cli) -> Result<ValidationReport> {
    let config = load_config(cli)?;
    let tables = ConfigTables::load(&cli.config_dir, &config.tables)
        .context("failed to load lookup tables")?;
    let doc = load_document(&cli.document, cli.view.as_deref())?;
    let mode = ValidationMode::from_alias(&cli.mode);

    log::info!(
        "checking view {} of {}",
        doc.query().active_view(),
        doc.metadata().title.as_deref().unwrap_or("untitled document")
    );
    let report = Validator::new(&doc, &config, &tables, mode)
        .run()
        .context("validation run failed")?;
    Ok(report)
}

fn print_report(report: &ValidationReport, format: Format) -> Result<()> {
    match format {
        Format::Markdown => print!("{report}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn exit_status(report: &ValidationReport, fail_on_issues: bool) -> u8 {
    if fail_on_issues && !report.is_clean() {
        let total = report.total();
        log::info!("{} issues, {} valid", total.issues, total.valid);
        return ISSUES_FOUND;
    }
    0
}

fn print_error(err: &anyhow::Error, format: Format) {
    match format {
        Format::Markdown => {
            println!("### Script Error");
            println!("```\n{err:?}\n```");
        }
        Format::Json => {
            let chain: Vec<String> = err.chain().map(ToString::to_string).collect();
            println!("{}", serde_json::json!({ "error": chain }));
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let outcome = run(&cli).and_then(|report| {
        print_report(&report, cli.format)?;
        Ok(exit_status(&report, cli.fail_on_issues))
    });
    match outcome {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            print_error(&err, cli.format);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["roomcheck", "tower.json"]).unwrap();
        assert_eq!(cli.document, PathBuf::from("tower.json"));
        assert_eq!(cli.config_dir, PathBuf::from("."));
        assert_eq!(cli.format, Format::Markdown);
        assert_eq!(ValidationMode::from_alias(&cli.mode), ValidationMode::All);
        assert!(cli.view.is_none());
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "roomcheck",
            "tower.json",
            "--mode",
            "Front of House (FOH)",
            "--format",
            "json",
            "--view",
            "L2 Plan",
        ])
        .unwrap();
        assert_eq!(
            ValidationMode::from_alias(&cli.mode),
            ValidationMode::FrontOfHouse
        );
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.view.as_deref(), Some("L2 Plan"));
    }

    #[test]
    fn test_missing_config_dir_uses_defaults() {
        let cli = Cli::try_parse_from([
            "roomcheck",
            "tower.json",
            "--config-dir",
            "/nonexistent/roomcheck",
        ])
        .unwrap();
        assert_eq!(load_config(&cli).unwrap(), ValidatorConfig::default());
    }

    const ONE_ROOM: &str = r#"{
        "active_view": 900,
        "phases": [ { "id": 2, "name": "New" } ],
        "scope_boxes": [
            { "id": 20, "name": "100_1001",
              "bounding_box": { "min": [0, 0, 0], "max": [100, 100, 30] } }
        ],
        "views": [
            { "id": 900, "name": "L2 Plan", "scope_box": 20, "rooms": [31] },
            { "id": 901, "name": "L2 Empty", "scope_box": 20 }
        ],
        "rooms": [
            { "id": 31, "bounding_box": { "min": [8, 8, 0], "max": [12, 12, 10] },
              "parameters": { "Name": "Office", "Number": "L2-1001-0101", "GIFA NAME": "Office" } }
        ]
    }"#;

    fn report_for(view: &str) -> ValidationReport {
        let doc = roomcheck_snapshot::load(ONE_ROOM).unwrap();
        let id = doc.view_named(view).unwrap();
        let doc = doc.with_active_view(id).unwrap();
        let config = ValidatorConfig::default();
        let tables = ConfigTables::empty();
        Validator::new(&doc, &config, &tables, ValidationMode::All)
            .run()
            .unwrap()
    }

    #[test]
    fn test_exit_status_with_issues() {
        // The room has no level, which is counted as an issue
        let report = report_for("L2 Plan");
        assert!(!report.is_clean());
        assert_eq!(exit_status(&report, true), ISSUES_FOUND);
        assert_eq!(exit_status(&report, false), 0);
    }

    #[test]
    fn test_exit_status_clean_run() {
        let report = report_for("L2 Empty");
        assert!(report.is_clean());
        assert_eq!(exit_status(&report, true), 0);
    }

    #[test]
    fn test_fail_on_issues_flag() {
        let cli = Cli::try_parse_from(["roomcheck", "tower.json", "--fail-on-issues"]).unwrap();
        assert!(cli.fail_on_issues);
    }

    #[test]
    fn test_missing_document_is_an_error() {
        let err = load_document(Path::new("/nonexistent/tower.json"), None).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load snapshot"));
    }
}
