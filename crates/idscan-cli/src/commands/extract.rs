//! Extract command - pull structured fields from one document.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::SecondsFormat;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use idscan_core::models::config::IdscanConfig;
use idscan_core::{ExtractionResult, Extractor, OcrProvider, TesseractCli};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"];

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file: OCR text, or an image to run OCR on (default: stdin text)
    input: Option<PathBuf>,

    /// Document type identifier (e.g. drivingLicense, passport)
    #[arg(short = 't', long)]
    document_type: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR language code (overrides config)
    #[arg(long)]
    lang: Option<String>,

    /// Show extraction confidence summary on stderr
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = IdscanConfig::load(config_path.map(Path::new))?;

    let raw_text = match &args.input {
        Some(path) => read_input(path, &args, &config)?,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let document_type = args
        .document_type
        .clone()
        .unwrap_or_else(|| config.extraction.default_document_type.to_string());

    let extractor = Extractor::new().with_fallback(config.extraction.fallback_document_type);
    let result = extractor.extract(&document_type, &raw_text)?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        let score = result
            .confidence_score
            .map(|s| format!("{}%", s))
            .unwrap_or_else(|| "undefined".to_string());
        eprintln!(
            "{} Extraction confidence: {} ({}/{} fields)",
            style("ℹ").blue(),
            score,
            result.fields.filled(),
            result.fields.len()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(path: &Path, args: &ExtractArgs, config: &IdscanConfig) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Reading input: {}", path.display());

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        let language = args.lang.as_deref().unwrap_or(&config.ocr.language);
        return recognize_image(path, language, config);
    }

    Ok(fs::read_to_string(path)?)
}

fn recognize_image(path: &Path, language: &str, config: &IdscanConfig) -> anyhow::Result<String> {
    let image = fs::read(path)?;
    let ocr = TesseractCli::from_config(&config.ocr);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Running OCR ({})...", ocr.name()));

    let text = ocr.recognize(&image, language);
    pb.finish_and_clear();

    let text = text?;
    if text.trim().is_empty() {
        anyhow::bail!("No text detected in {}", path.display());
    }

    Ok(text)
}

fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = result.fields.iter().map(|f| f.name.as_str()).collect();
    header.extend(["documentType", "extractedAt", "confidenceScore"]);
    wtr.write_record(&header)?;

    let mut row: Vec<String> = result
        .fields
        .iter()
        .map(|f| f.value.clone().unwrap_or_default())
        .collect();
    row.push(result.document_type.to_string());
    row.push(result.extracted_at.to_rfc3339_opts(SecondsFormat::Millis, true));
    row.push(
        result
            .confidence_score
            .map(|s| s.to_string())
            .unwrap_or_default(),
    );
    wtr.write_record(&row)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", result.document_type.description()));
    output.push('\n');

    let width = result.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for field in result.fields.iter() {
        output.push_str(&format!(
            "  {:width$}  {}\n",
            field.name,
            field.value.as_deref().unwrap_or("-"),
            width = width
        ));
    }

    output.push('\n');
    match result.confidence_score {
        Some(score) => output.push_str(&format!("Confidence: {}%\n", score)),
        None => output.push_str("Confidence: undefined (no fields declared)\n"),
    }

    output
}
