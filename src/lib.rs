//! Shapejoin: join attribute tables to shapefile polygons by key.
//!
//! Shapejoin takes the geometry records a shapefile reader produces (a point
//! stream plus part offsets per shape) and an attribute table keyed by the
//! same identifier, and builds one polygon feature per matched row, ready
//! for a choropleth renderer.
//!
//! # Modules
//!
//! - [`ir`]: Data model (rows, records, rings, polygons) and file I/O
//! - [`join`]: Ring decoding, key indexing, polygon assembly and the join
//! - [`validation`]: Input checks for the assumptions the decoder makes
//! - [`error`]: Error types for shapejoin operations

pub mod error;
pub mod ir;
pub mod join;
pub mod logging;
pub mod validation;

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, warn};

pub use error::ShapejoinError;

/// The shapejoin CLI application.
#[derive(Parser)]
#[command(name = "shapejoin")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Join an attribute table to geometry records and write GeoJSON.
    Join(JoinArgs),
    /// Validate geometry records for offset and coordinate problems.
    Validate(ValidateArgs),
}

/// Arguments for the join subcommand.
#[derive(clap::Args)]
struct JoinArgs {
    /// Attribute table (CSV with a header row).
    attributes: PathBuf,

    /// Geometry records (JSON array).
    geometry: PathBuf,

    /// Name of the key column in the attribute table.
    #[arg(long, env = "SHAPEJOIN_KEY")]
    key: String,

    /// How attribute keys are read ('auto', 'int', or 'text').
    #[arg(long, default_value = "auto")]
    key_kind: String,

    /// Write GeoJSON here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Property name for the key in GeoJSON output (defaults to --key).
    #[arg(long)]
    key_property: Option<String>,

    /// Report format ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,

    /// Decode every part of records that share a key, not just the first.
    #[arg(long)]
    all_parts: bool,

    /// Drop zero-length rings from polygons.
    #[arg(long)]
    drop_empty_rings: bool,

    /// Join even if geometry validation finds errors.
    #[arg(long)]
    allow_invalid: bool,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Geometry records to validate (JSON array).
    input: PathBuf,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the shapejoin CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ShapejoinError> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Join(args)) => run_join(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            // No subcommand: just print a banner and exit successfully
            println!("shapejoin {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Join attribute tables to shapefile polygons by key.");
            println!();
            println!("Run 'shapejoin --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the join subcommand.
fn run_join(args: JoinArgs) -> Result<(), ShapejoinError> {
    let key_kind = parse_key_kind(&args.key_kind)?;
    let report_format = parse_report_format(&args.report)?;

    let csv_opts = ir::io_attributes_csv::AttributeCsvOptions::new(args.key.clone())
        .with_key_kind(key_kind);
    let rows = ir::io_attributes_csv::read_attributes_csv(&args.attributes, &csv_opts)?;
    let records = ir::io_geometry_json::read_geometry_json(&args.geometry)?;
    info!(
        rows = rows.len(),
        records = records.len(),
        "loaded join inputs"
    );

    // Check the decoder's assumptions before trusting the offsets
    let validate_opts = validation::ValidateOptions::default();
    let mut validation_report = validation::validate_geometry_records(&records, &validate_opts);
    validation_report.merge(validation::validate_attribute_rows(&rows, &validate_opts));
    if !validation_report.is_ok() && !args.allow_invalid {
        eprint!("{}", validation_report);
        return Err(ShapejoinError::ValidationFailed {
            error_count: validation_report.error_count(),
            warning_count: validation_report.warning_count(),
            report: validation_report,
        });
    }
    for issue in &validation_report.issues {
        warn!(
            severity = ?issue.severity,
            code = ?issue.code,
            context = %issue.context,
            "{}",
            issue.message
        );
    }

    let join_opts = join::JoinOptions {
        duplicate_rings: if args.all_parts {
            join::DuplicateRings::AllParts
        } else {
            join::DuplicateRings::FirstPartOnly
        },
        keep_empty_rings: !args.drop_empty_rings,
    };
    let output = join::join_with_options(&rows, &records, &join_opts)?;

    let key_property = args.key_property.as_deref().unwrap_or(&args.key);
    let report_text = match report_format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&output.report).map_err(ShapejoinError::ReportWrite)?
                + "\n"
        }
        ReportFormat::Text if output.report.is_lossy() => format!(
            "Joined {} feature(s), dropped {} row(s) without geometry:\n{}",
            output.dataset.len(),
            output.report.dropped_rows,
            output.report
        ),
        ReportFormat::Text => format!(
            "Joined all {} feature(s):\n{}",
            output.dataset.len(),
            output.report
        ),
    };

    // The report goes to stdout only when stdout is not carrying GeoJSON
    match &args.output {
        Some(path) => {
            ir::io_geojson::write_geojson(path, &output.dataset, key_property)?;
            print!("{}", report_text);
        }
        None => {
            let geojson = ir::io_geojson::to_geojson_string(&output.dataset, key_property)
                .map_err(|source| ShapejoinError::GeoJsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", geojson)?;
            eprint!("{}", report_text);
        }
    }

    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), ShapejoinError> {
    let output_format = parse_report_format(&args.output)?;
    let records = ir::io_geometry_json::read_geometry_json(&args.input)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_geometry_records(&records, &opts);

    match output_format {
        ReportFormat::Json => {
            let json = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": &report.issues,
            });
            let text = serde_json::to_string_pretty(&json).map_err(ShapejoinError::ReportWrite)?;
            println!("{}", text);
        }
        ReportFormat::Text => print!("{}", report),
    }

    // Determine exit status
    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(ShapejoinError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum ReportFormat {
    Text,
    Json,
}

fn parse_report_format(s: &str) -> Result<ReportFormat, ShapejoinError> {
    match s {
        "text" => Ok(ReportFormat::Text),
        "json" => Ok(ReportFormat::Json),
        other => Err(ShapejoinError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn parse_key_kind(s: &str) -> Result<ir::KeyKind, ShapejoinError> {
    match s {
        "auto" => Ok(ir::KeyKind::Auto),
        "int" | "integer" => Ok(ir::KeyKind::Int),
        "text" | "string" => Ok(ir::KeyKind::Text),
        other => Err(ShapejoinError::UnsupportedFormat(format!(
            "key kind '{}' (supported: auto, int, text)",
            other
        ))),
    }
}
