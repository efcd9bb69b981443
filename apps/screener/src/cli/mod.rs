pub mod progress;
pub mod render;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::screening::export::export_csv;
use crate::screening::{run_batch, AnalysisRequest, ResumeFile, Screener};

use self::progress::{create_progress_bar, ProgressObserver};
use self::render::{render_details, render_failures, render_summary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Score PDF resumes against a job description", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Overrides GEMINI_MODEL.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Overrides POLL_INTERVAL_MS.
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Overrides POLL_MAX_ATTEMPTS.
    #[arg(long, global = true)]
    pub max_polls: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve POST /analyze over HTTP.
    Serve {
        /// Overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Screen a batch of resumes and print a ranked table.
    Screen(ScreenArgs),
    /// Screen one resume and print the raw analysis JSON.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct JobDescriptionArgs {
    /// Job description text.
    #[arg(short = 'j', long)]
    pub job_description: Option<String>,

    /// File holding the job description.
    #[arg(long)]
    pub job_file: Option<PathBuf>,
}

impl JobDescriptionArgs {
    pub fn resolve(&self) -> Result<String> {
        let text = match (&self.job_description, &self.job_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read job description {}", path.display()))?,
            (None, None) => bail!("A job description is required"),
        };
        if text.trim().is_empty() {
            bail!("Job description cannot be empty");
        }
        Ok(text)
    }
}

#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// PDF files, or directories whose *.pdf entries are screened.
    #[arg(required = true)]
    pub resumes: Vec<PathBuf>,

    #[command(flatten)]
    pub job: JobDescriptionArgs,

    /// Write the summary table to this CSV file (or a timestamped file in this directory).
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Skip the per-candidate detail panels.
    #[arg(long)]
    pub no_details: bool,

    /// Also print the ranked analyses as a JSON array.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// A single PDF resume.
    pub resume: PathBuf,

    #[command(flatten)]
    pub job: JobDescriptionArgs,
}

/// `screen`: sequential batch with progress, ranked table, details, CSV.
pub async fn run_screen(screener: &Screener, args: &ScreenArgs) -> Result<()> {
    let job_description = args.job.resolve()?;
    let files = collect_resumes(&args.resumes)?;
    if files.is_empty() {
        bail!("No PDF resumes found in the given paths");
    }

    let colour = std::io::stdout().is_terminal();
    println!("Analyzing {} file(s)", files.len());

    let bar = create_progress_bar(files.len() as u64).context("Failed to create progress bar")?;
    let mut observer = ProgressObserver::new(bar, colour);
    let table = run_batch(screener, &job_description, files, &mut observer).await;
    observer.finish();

    let failures = render_failures(&table, colour);
    if !failures.is_empty() {
        eprint!("{failures}");
    }

    if table.is_empty() {
        warn!("No resume could be scored");
        return Ok(());
    }

    println!("\nCandidate ranking");
    print!("{}", render_summary(&table, colour));

    if !args.no_details {
        println!("\nCandidate details");
        print!("{}", render_details(&table, colour));
    }

    if args.json {
        let results: Vec<_> = table.ranked().into_iter().map(|r| &r.result).collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    if let Some(csv) = &args.csv {
        let path = csv_output_path(csv);
        export_csv(&table, &path)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

/// `analyze`: one resume, pretty JSON on stdout.
pub async fn run_analyze(screener: &Screener, args: &AnalyzeArgs) -> Result<()> {
    let job_description = args.job.resolve()?;
    let file = read_resume(&args.resume)?;
    let request = AnalysisRequest {
        job_description,
        file_name: file.file_name,
        bytes: file.bytes,
    };
    let result = screener
        .analyze(&request)
        .await
        .with_context(|| format!("Failed to analyze {}", args.resume.display()))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Expands directories to their PDF entries (sorted by name) and reads every file.
pub fn collect_resumes(paths: &[PathBuf]) -> Result<Vec<ResumeFile>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_pdf_path(p))
                .collect();
            entries.sort();
            for entry in entries {
                files.push(read_resume(&entry)?);
            }
        } else if is_pdf_path(path) {
            files.push(read_resume(path)?);
        } else {
            warn!("Skipping {}: not a PDF", path.display());
        }
    }
    info!("Collected {} resume(s)", files.len());
    Ok(files)
}

fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn read_resume(path: &Path) -> Result<ResumeFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Resume path has no file name")?
        .to_string();
    Ok(ResumeFile {
        file_name,
        bytes: Bytes::from(bytes),
    })
}

/// A directory gets a timestamped file name; anything else is used as-is.
pub fn csv_output_path(requested: &Path) -> PathBuf {
    if requested.is_dir() {
        requested.join(Local::now().format("screening_%Y%m%d_%H%M%S.csv").to_string())
    } else {
        requested.to_path_buf()
    }
}
