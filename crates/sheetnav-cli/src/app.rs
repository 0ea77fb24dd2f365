//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sheetnav_data::Workbook;
use sheetnav_reports::reports::{burn_chart, pricing, validation};
use sheetnav_reports::reports::{comparison, comparison_tag};
use sheetnav_reports::{reporting_friday, BurnChart, PricingAnalysis, Validator};

use crate::settings::Settings;

/// Output format for reports printed to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "sheetnav")]
#[command(author, version, about = "Budget tracker reports by label", long_about = None)]
struct Cli {
    /// Settings file (defaults to sheetnav.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check charged timesheet hours against the staffing plan
    Validate {
        /// Tracker workbook (defaults to paths.this_week)
        workbook: Option<PathBuf>,

        /// Older tracker to compare charged hours against
        #[arg(long)]
        compare: Option<PathBuf>,

        /// Print the report without saving it
        #[arg(long)]
        no_save: bool,
    },

    /// Compare the proposed pricing scenario with its baseline
    Pricing {
        /// Tracker workbook (defaults to paths.this_week)
        workbook: Option<PathBuf>,

        /// Print the report without saving it
        #[arg(long)]
        no_save: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Build the weekly burn chart spreadsheet
    BurnChart {
        /// Tracker workbook (defaults to paths.this_week)
        workbook: Option<PathBuf>,

        /// Week offset of the reporting Friday (-1 = last week)
        #[arg(long, allow_negative_numbers = true, conflicts_with = "friday")]
        week: Option<i64>,

        /// Reporting Friday as YYYY-MM-DD
        #[arg(long)]
        friday: Option<NaiveDate>,

        /// Print the chart without saving it
        #[arg(long)]
        no_save: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run every report on the workbooks named in the settings file
    Run,
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate {
            workbook,
            compare,
            no_save,
        } => {
            let workbook = resolve_workbook(&settings, workbook)?;
            validate_command(&settings, &workbook, compare.as_deref(), !no_save)?;
        }
        Commands::Pricing {
            workbook,
            no_save,
            format,
        } => {
            let workbook = resolve_workbook(&settings, workbook)?;
            pricing_command(&settings, &workbook, !no_save, format)?;
        }
        Commands::BurnChart {
            workbook,
            week,
            friday,
            no_save,
            format,
        } => {
            let workbook = resolve_workbook(&settings, workbook)?;
            let friday = match friday {
                Some(friday) => friday,
                None => {
                    let week = week.unwrap_or(settings.burn_chart.week);
                    resolve_friday(Local::now().date_naive(), week)?
                }
            };
            burn_chart_command(&settings, &workbook, friday, !no_save, format)?;
        }
        Commands::Run => {
            run_all_command(&settings, Local::now().date_naive())?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_workbook(settings: &Settings, workbook: Option<PathBuf>) -> Result<PathBuf> {
    match workbook.or_else(|| settings.this_week()) {
        Some(path) => Ok(path),
        None => anyhow::bail!("No workbook given and no paths.this_week in the settings"),
    }
}

fn resolve_friday(today: NaiveDate, week: i64) -> Result<NaiveDate> {
    reporting_friday(today, week)
        .with_context(|| format!("Week offset {} is out of range", week))
}

fn open_workbook(path: &Path) -> Result<Workbook> {
    if !path.exists() {
        anyhow::bail!("Workbook not found: {}", path.display());
    }
    Workbook::open(path).with_context(|| format!("Failed to open workbook: {}", path.display()))
}

/// Execute the validate command, optionally with the comparison report
pub fn validate_command(
    settings: &Settings,
    workbook: &Path,
    compare: Option<&Path>,
    save: bool,
) -> Result<()> {
    let this = open_workbook(workbook)?;
    let validator = Validator::load(&this, &settings.validation)
        .with_context(|| format!("Failed to validate {}", workbook.display()))?;

    let report = validator.render();
    println!("{}", report);

    let writer = settings.writer();
    if save {
        let path = writer
            .write_text(validation::REPORT_NAME, &this.tag(), &report)
            .context("Failed to save validation report")?;
        println!("Saved: {}", path.display());
    }

    if let Some(old_path) = compare {
        let old = open_workbook(old_path)?;
        let old_validator = Validator::load(&old, &settings.validation)
            .with_context(|| format!("Failed to validate {}", old_path.display()))?;

        let text = comparison(
            &workbook.display().to_string(),
            &validator,
            &old_path.display().to_string(),
            &old_validator,
        );
        println!("{}", text);

        if save {
            let path = writer
                .write_text(
                    validation::COMPARISON_NAME,
                    &comparison_tag(&this.tag(), &old.tag()),
                    &text,
                )
                .context("Failed to save comparison report")?;
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

/// Execute the pricing command
pub fn pricing_command(
    settings: &Settings,
    workbook: &Path,
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    let book = open_workbook(workbook)?;
    let analysis = PricingAnalysis::load(&book, &settings.pricing)
        .with_context(|| format!("Failed to analyse pricing in {}", workbook.display()))?;
    let report = analysis.render();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis)
                .context("Failed to serialize pricing analysis to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => println!("{}", report),
    }

    if save {
        let path = settings
            .writer()
            .write_text(pricing::REPORT_NAME, &book.tag(), &report)
            .context("Failed to save pricing analysis")?;
        if format == OutputFormat::Text {
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

/// Execute the burn-chart command for the week ending on `friday`
pub fn burn_chart_command(
    settings: &Settings,
    workbook: &Path,
    friday: NaiveDate,
    save: bool,
    format: OutputFormat,
) -> Result<()> {
    let book = open_workbook(workbook)?;
    let chart = BurnChart::load(&book, &settings.burn_chart, friday).with_context(|| {
        format!(
            "Failed to build burn chart for {} in {}",
            friday,
            workbook.display()
        )
    })?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(chart.data())
                .context("Failed to serialize burn chart to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Burn chart for the week ending {}", friday);
            println!("{}", chart.to_table());
        }
    }

    if save {
        let path = settings
            .writer()
            .write_sheet(burn_chart::REPORT_NAME, &book.tag(), &chart.rows())
            .context("Failed to save burn chart")?;
        if format == OutputFormat::Text {
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

/// Execute every report on the settings' workbooks, saving each one
pub fn run_all_command(settings: &Settings, today: NaiveDate) -> Result<()> {
    let Some(workbook) = settings.this_week() else {
        anyhow::bail!("paths.this_week is not set in the settings");
    };
    let last_week = settings.last_week();

    validate_command(settings, &workbook, last_week.as_deref(), true)?;
    pricing_command(settings, &workbook, true, OutputFormat::Text)?;

    let friday = resolve_friday(today, settings.burn_chart.week)?;
    burn_chart_command(settings, &workbook, friday, true, OutputFormat::Text)?;

    Ok(())
}
