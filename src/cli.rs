//! CLI argument parsing and the `tag` pipeline

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use crate::audio::{collect_inputs, read_batch};
use crate::batch::process;
use crate::error::Result;
use crate::export::{BatchReport, OutputWriter};
use crate::metadata::{MetadataRecord, load_metadata, write_template};

const DEFAULT_REPORT_NAME: &str = "batch-report.json";

/// seo-tagger - rewrite ID3 tags and give files search-friendly names
///
/// Applies one album-level metadata record to every input file, numbering
/// tracks in input order.
#[derive(Parser, Debug)]
#[command(name = "seo-tagger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show debug output in the terminal
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Do not write a log file
    #[arg(long, global = true)]
    pub no_log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tag and rename a batch of audio files
    Tag(TagArgs),

    /// Write a metadata JSON template with every field present
    Template {
        /// Where to write the template
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct TagArgs {
    /// Input files or directories, in track order
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Metadata JSON file (all fields default when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Output directory for tagged files
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Where to write the JSON batch report (defaults to OUTPUT/batch-report.json)
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Show planned output names without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error when any file could not be tagged
    #[arg(long)]
    pub strict: bool,

    /// Override the album artist from the metadata file
    #[arg(long, value_name = "NAME")]
    pub album_artist: Option<String>,

    /// Override the album title from the metadata file
    #[arg(long, value_name = "TITLE")]
    pub album_title: Option<String>,

    /// Override the filename keywords (comma separated)
    #[arg(long, value_name = "LIST")]
    pub keywords: Option<String>,
}

impl Cli {
    /// Terminal log level from the verbosity flags
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

impl TagArgs {
    pub fn report_path(&self) -> PathBuf {
        self.report
            .clone()
            .unwrap_or_else(|| self.output.join(DEFAULT_REPORT_NAME))
    }

    /// Load the metadata file and apply command-line overrides
    pub fn load_record(&self) -> Result<MetadataRecord> {
        let mut record = match &self.metadata {
            Some(path) => load_metadata(path)?,
            None => MetadataRecord::default(),
        };

        if let Some(artist) = &self.album_artist {
            record.album_artist = artist.clone();
        }
        if let Some(title) = &self.album_title {
            record.album_title = title.clone();
        }
        if let Some(keywords) = &self.keywords {
            record.keywords = Some(keywords.clone());
        }

        Ok(record.normalized())
    }
}

/// Counts reported back to the caller after a `tag` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub tagged: usize,
    pub failed: usize,
    pub collisions: usize,
    pub report: Option<PathBuf>,
}

/// Run the `tag` subcommand
pub fn run_tag(args: &TagArgs) -> Result<RunSummary> {
    let record = args.load_record()?;
    let paths = collect_inputs(&args.inputs)?;
    let batch = read_batch(&paths)?;

    let outcome = process(batch, &record);

    let report = if args.dry_run {
        for item in &outcome.tagged {
            println!("{} -> {}", item.source_filename, item.filename);
        }
        for failure in &outcome.failures {
            println!("{} -> FAILED: {}", failure.filename, failure.error);
        }
        None
    } else {
        let writer = OutputWriter::new(&args.output)?;
        writer.write_items(&outcome.tagged)?;

        let report_path = args.report_path();
        BatchReport::new(&outcome, &record).save(&report_path)?;
        Some(report_path)
    };

    Ok(RunSummary {
        tagged: outcome.tagged.len(),
        failed: outcome.failures.len(),
        collisions: outcome.collisions.len(),
        report,
    })
}

/// Run the `template` subcommand
pub fn run_template(path: &std::path::Path) -> Result<()> {
    write_template(path)?;
    log::info!("Template written to {}", path.display());
    Ok(())
}
