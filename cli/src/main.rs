use std::fs;
use std::path::{Path, PathBuf};

use api_report_analysis::config::AnalyzerConfig;
use api_report_analysis::conversion::convert;
use api_report_analysis::docs::generate_documentation;
use api_report_analysis::docs_html::render_documentation;
use api_report_analysis::extractor::{SourceShape, extract};
use api_report_analysis::html::render_conversion_report;
use api_report_analysis::output::{
    OutputFormat, ReportFile, format_analysis, format_endpoints, to_json,
};
use api_report_analysis::{AnalysisError, analyze_api_text};
use api_report_core::ApiFormat;
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "api-report")]
#[command(about = "Convert, analyze and document API descriptions", version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the supported API formats.
    Formats,
    /// Print the endpoints found in an API description.
    Extract(InputArgs),
    /// Classify, group, validate and document an API description.
    Analyze(InputArgs),
    /// Convert an API description and write conversion reports.
    Convert(ConvertArgs),
    /// Write HTML documentation for an API description.
    Docs(DocsArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Postman collection or OpenAPI/Swagger document (JSON).
    #[arg(long)]
    input: PathBuf,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Postman collection or OpenAPI/Swagger document (JSON).
    #[arg(long)]
    input: PathBuf,
    /// Source format (postman or swagger).
    #[arg(long)]
    from: Option<ApiFormat>,
    /// Target format.
    #[arg(long)]
    to: Option<ApiFormat>,
    /// Directory for the converted file and reports.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Comma-separated report files to write (json, html).
    #[arg(long, value_delimiter = ',')]
    report: Vec<ReportFile>,
    /// Title of the HTML report.
    #[arg(long)]
    title: Option<String>,
    /// YAML file with default settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DocsArgs {
    /// Postman collection or OpenAPI/Swagger document (JSON).
    #[arg(long)]
    input: PathBuf,
    /// Source format shown in the page (detected from the document if omitted).
    #[arg(long)]
    from: Option<ApiFormat>,
    /// Target format shown in the page.
    #[arg(long)]
    to: Option<ApiFormat>,
    /// Output HTML file.
    #[arg(long)]
    output: PathBuf,
    /// YAML file with default settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Formats => {
            print!("{}", format_catalog());
            Ok(())
        }
        Command::Extract(args) => run_extract(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Convert(args) => run_convert(args),
        Command::Docs(args) => run_docs(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_extract(args: InputArgs) -> Result<(), String> {
    let text = read_input(&args.input)?;
    let extraction = extract(&text).map_err(|err| err.to_string())?;
    debug!(shape = ?extraction.shape, endpoints = extraction.endpoints.len(), "Extracted");
    let output = format_endpoints(&extraction.endpoints, args.format).map_err(|err| err.to_string())?;
    println!("{}", output.trim_end());
    Ok(())
}

fn run_analyze(args: InputArgs) -> Result<(), String> {
    let text = read_input(&args.input)?;
    let analysis = analyze_api_text(&text).map_err(|err| err.to_string())?;
    let output = format_analysis(&analysis, args.format).map_err(|err| err.to_string())?;
    println!("{}", output.trim_end());
    Ok(())
}

// ---------------------------------------------------------------------------
// convert command
// ---------------------------------------------------------------------------

/// Effective settings for a conversion after merging flags over config.
#[derive(Debug, PartialEq)]
struct ConvertSettings {
    source: ApiFormat,
    target: ApiFormat,
    output_dir: PathBuf,
    reports: Vec<ReportFile>,
    title: String,
}

fn resolve_convert_settings(
    args: &ConvertArgs,
    config: AnalyzerConfig,
) -> Result<ConvertSettings, String> {
    let source = args
        .from
        .or(config.source)
        .ok_or_else(|| "Missing source format: pass --from or set `source` in the config".to_string())?;
    let target = args
        .to
        .or(config.target)
        .ok_or_else(|| "Missing target format: pass --to or set `target` in the config".to_string())?;
    let output_dir = args
        .output
        .clone()
        .or(config.output_dir)
        .ok_or_else(|| {
            "Missing output directory: pass --output or set `output_dir` in the config".to_string()
        })?;
    let reports = if args.report.is_empty() {
        config.reports
    } else {
        args.report.clone()
    };
    let title = args.title.clone().unwrap_or(config.html_title);

    Ok(ConvertSettings {
        source,
        target,
        output_dir,
        reports,
        title,
    })
}

fn run_convert(args: ConvertArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let settings = resolve_convert_settings(&args, config)?;
    let text = read_input(&args.input)?;
    let (timestamp, date) = timestamp_parts(Utc::now());

    let run = convert(&text, settings.source, settings.target, &timestamp)
        .map_err(|err| err.to_string())?;

    fs::create_dir_all(&settings.output_dir).map_err(|err| {
        format!(
            "Failed to create output directory '{}': {err}",
            settings.output_dir.display()
        )
    })?;

    let artifact_path = settings
        .output_dir
        .join(settings.target.artifact_file_name());
    write_output(&artifact_path, &run.artifact)?;

    for report in &settings.reports {
        let content = match report {
            ReportFile::Json => to_json(&run.report).map_err(|err| err.to_string())?,
            ReportFile::Html => render_conversion_report(
                &run.report,
                settings.source,
                settings.target,
                &settings.title,
            ),
        };
        write_output(&settings.output_dir.join(report.file_name(&date)), &content)?;
    }

    info!(
        output = %settings.output_dir.display(),
        reports = settings.reports.len(),
        "Wrote conversion outputs"
    );
    println!("{}", run.summary());
    Ok(())
}

// ---------------------------------------------------------------------------
// docs command
// ---------------------------------------------------------------------------

/// Source format implied by the document's shape.
fn detected_source(shape: SourceShape) -> ApiFormat {
    match shape {
        SourceShape::Collection => ApiFormat::Postman,
        SourceShape::PathMap | SourceShape::Unrecognized => ApiFormat::Swagger,
    }
}

fn run_docs(args: DocsArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let text = read_input(&args.input)?;
    let extraction = extract(&text).map_err(|err| err.to_string())?;

    let source = args
        .from
        .or(config.source)
        .unwrap_or_else(|| detected_source(extraction.shape));
    if !source.is_parseable() {
        return Err(AnalysisError::UnsupportedSource(source).to_string());
    }
    let target = args.to.or(config.target).unwrap_or(ApiFormat::Swagger);

    let docs = generate_documentation(&extraction.endpoints);
    let generated_on = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let html = render_documentation(&docs, source, target, &generated_on);

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("Failed to create directory '{}': {err}", parent.display())
            })?;
        }
    }
    write_output(&args.output, &html)?;
    println!(
        "Documented {} endpoints in {}",
        docs.endpoints.len(),
        args.output.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------

fn format_catalog() -> String {
    let mut out = format!("{:<12} {:<24} {}\n", "ID", "NAME", "USE");
    for format in ApiFormat::ALL {
        let usage = if format.is_parseable() {
            "source, target"
        } else {
            "target"
        };
        out.push_str(&format!(
            "{:<12} {:<24} {usage}\n",
            format.id(),
            format.display_name()
        ));
    }
    out
}

/// RFC 3339 timestamp for report contents and the `YYYY-MM-DD` date for
/// report file names.
fn timestamp_parts(now: DateTime<Utc>) -> (String, String) {
    (
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        now.format("%Y-%m-%d").to_string(),
    )
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig, String> {
    match path {
        Some(path) => AnalyzerConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn read_input(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}

fn write_output(path: &Path, content: &str) -> Result<(), String> {
    fs::write(path, content).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}
