//! docsift CLI - outline extraction and persona analysis over span layouts.
//!
//! Input files are span-layout JSON documents: either a bare array of spans
//! or `{"name": ..., "spans": [...]}`. Boundary ceilings (page count, file
//! size) are enforced here before the core pipeline runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use docsift::{
    analysis_to_json, outline_to_json, AnalyzeOptions, Docsift, DocumentSpans, JsonFormat,
    LayoutProfile, RawSpan,
};

/// Default page-count ceiling for one document.
const DEFAULT_MAX_PAGES: u32 = 50;

/// Default input-size ceiling in megabytes.
const DEFAULT_MAX_SIZE_MB: u64 = 50;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract document outlines and rank sections by relevance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Page-count ceiling per document
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Input-size ceiling per file, in MB
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SIZE_MB)]
    max_size_mb: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and H1/H2/H3 outline of each document
    Outline {
        /// Input span-layout JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input) or directory (stdout if not specified)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Rank sections across documents for a persona and job-to-be-done
    Analyze {
        /// Input span-layout JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Persona description (e.g. "Chemistry Student")
        #[arg(short, long)]
        persona: String,

        /// Job to be done (e.g. "Summarize Key Reactions")
        #[arg(short, long)]
        job: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Number of top sections that get refined excerpts
        #[arg(long, default_value = "5")]
        top_k: usize,

        /// Per-document processing budget in seconds
        #[arg(long, default_value = "10")]
        timeout_secs: u64,

        /// Worker pool size (0 = available CPU count)
        #[arg(long, default_value = "0")]
        jobs: usize,
    },

    /// Show layout statistics for a document
    Info {
        /// Input span-layout JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// Accepted span-file shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpanFile {
    Named {
        name: Option<String>,
        spans: Vec<RawSpan>,
    },
    Bare(Vec<RawSpan>),
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let limits = Limits {
        max_pages: cli.max_pages,
        max_bytes: cli.max_size_mb * 1024 * 1024,
    };

    let result = match cli.command {
        Commands::Outline {
            inputs,
            output,
            compact,
        } => cmd_outline(&inputs, output.as_deref(), compact, &limits),
        Commands::Analyze {
            inputs,
            persona,
            job,
            output,
            compact,
            top_k,
            timeout_secs,
            jobs,
        } => cmd_analyze(
            &inputs,
            &persona,
            &job,
            output.as_deref(),
            compact,
            top_k,
            timeout_secs,
            jobs,
            &limits,
        ),
        Commands::Info { input } => cmd_info(&input, &limits),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Boundary ceilings enforced before the core pipeline runs.
struct Limits {
    max_pages: u32,
    max_bytes: u64,
}

fn cmd_outline(
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    limits: &Limits,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = json_format(compact);
    let options = AnalyzeOptions::default();

    if inputs.len() > 1 {
        let output_dir = match output {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        };
        fs::create_dir_all(&output_dir)?;

        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        for input in inputs {
            pb.set_message(input.display().to_string());
            let doc = load_document(input, limits)?;
            let outline = docsift::extract_outline(&doc, &options);
            let json = outline_to_json(&outline, format)?;

            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            fs::write(output_dir.join(format!("{stem}.json")), json)?;
            pb.inc(1);
        }
        pb.finish_with_message("done");
        return Ok(());
    }

    let doc = load_document(&inputs[0], limits)?;
    let outline = docsift::extract_outline(&doc, &options);
    let json = outline_to_json(&outline, format)?;
    write_output(output, &json)
}

#[allow(clippy::too_many_arguments)]
fn cmd_analyze(
    inputs: &[PathBuf],
    persona: &str,
    job: &str,
    output: Option<&Path>,
    compact: bool,
    top_k: usize,
    timeout_secs: u64,
    jobs: usize,
    limits: &Limits,
) -> Result<(), Box<dyn std::error::Error>> {
    let docs: Vec<DocumentSpans> = inputs
        .iter()
        .map(|input| load_document(input, limits))
        .collect::<Result<_, _>>()?;

    let sift = Docsift::new()
        .with_top_k(top_k)
        .with_workers(jobs)
        .with_document_timeout(Duration::from_secs(timeout_secs));

    let analysis = sift.analyze(&docs, persona, job);

    for doc in &analysis.documents {
        for diagnostic in &doc.diagnostics {
            eprintln!("{}: {}: {}", "Warning".yellow().bold(), doc.name, diagnostic);
        }
    }

    let json = analysis_to_json(&analysis, &sift.options().rank, json_format(compact))?;
    write_output(output, &json)
}

fn cmd_info(input: &Path, limits: &Limits) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input, limits)?;

    println!("{}: {}", "Document".bold(), doc.name);
    println!("  Spans: {}", doc.spans.len());
    println!("  Pages: {}", doc.page_count());

    match LayoutProfile::compute(&doc.spans) {
        Ok(profile) => {
            println!("  Body font size: {:.1}pt", profile.body_font_size);
            println!(
                "  Size percentiles: p75 {:.1} / p90 {:.1} / p95 {:.1}",
                profile.p75, profile.p90, profile.p95
            );
        }
        Err(_) => println!("  {}", "No extractable text".yellow()),
    }

    Ok(())
}

/// Load a span-layout JSON file, enforcing the boundary ceilings.
fn load_document(
    path: &Path,
    limits: &Limits,
) -> Result<DocumentSpans, Box<dyn std::error::Error>> {
    let size = fs::metadata(path)?.len();
    if size > limits.max_bytes {
        return Err(format!(
            "{} is {:.1}MB, exceeding the {}MB limit",
            path.display(),
            size as f64 / (1024.0 * 1024.0),
            limits.max_bytes / (1024 * 1024)
        )
        .into());
    }

    let data = fs::read_to_string(path)?;
    let file: SpanFile = serde_json::from_str(&data)
        .map_err(|e| format!("{}: not a span-layout JSON file: {e}", path.display()))?;

    let default_name = || {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    };
    let (name, raw_spans) = match file {
        SpanFile::Named { name, spans } => (name.unwrap_or_else(default_name), spans),
        SpanFile::Bare(spans) => (default_name(), spans),
    };

    let (doc, skipped) = DocumentSpans::from_raw(name, raw_spans);
    if skipped > 0 {
        log::warn!("{}: skipped {skipped} malformed spans", path.display());
    }

    let pages = doc.page_count();
    if pages > limits.max_pages {
        return Err(format!(
            "{} has {pages} pages, exceeding the {}-page limit",
            path.display(),
            limits.max_pages
        )
        .into());
    }

    Ok(doc)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, json: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("{} {}", "Wrote".green(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn limits() -> Limits {
        Limits {
            max_pages: DEFAULT_MAX_PAGES,
            max_bytes: DEFAULT_MAX_SIZE_MB * 1024 * 1024,
        }
    }

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_bare_span_array() {
        let file = write_temp(
            r#"[{"text":"Hello","font_size":12.0,"page":1,"bbox":{"x0":0,"y0":0,"x1":50,"y1":12}}]"#,
        );
        let doc = load_document(file.path(), &limits()).unwrap();
        assert_eq!(doc.spans.len(), 1);
        assert!(!doc.name.is_empty());
    }

    #[test]
    fn test_load_named_document() {
        let file = write_temp(
            r#"{"name":"report.pdf","spans":[{"text":"Hi","font_size":10.0,"page":2,"bbox":{"x0":0,"y0":0,"x1":20,"y1":10}}]}"#,
        );
        let doc = load_document(file.path(), &limits()).unwrap();
        assert_eq!(doc.name, "report.pdf");
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_page_ceiling_rejected() {
        let file = write_temp(
            r#"[{"text":"Deep","font_size":10.0,"page":51,"bbox":{"x0":0,"y0":0,"x1":20,"y1":10}}]"#,
        );
        let err = load_document(file.path(), &limits()).unwrap_err();
        assert!(err.to_string().contains("page limit"));
    }

    #[test]
    fn test_malformed_spans_skipped_not_fatal() {
        let file = write_temp(
            r#"[{"text":"Good","font_size":10.0,"page":1,"bbox":{"x0":0,"y0":0,"x1":20,"y1":10}},{"text":"No size"}]"#,
        );
        let doc = load_document(file.path(), &limits()).unwrap();
        assert_eq!(doc.spans.len(), 1);
    }

    #[test]
    fn test_bad_json_rejected() {
        let file = write_temp("not json at all");
        assert!(load_document(file.path(), &limits()).is_err());
    }
}
