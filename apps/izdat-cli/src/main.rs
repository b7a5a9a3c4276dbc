//! izdat command line
//!
//! Converts a journal/article model (JSON) into the publishing XML dialects
//! and imports JATS documents back into model JSON. The model file is the
//! serde form of `{ "journal": ..., "article": ... }`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use izdat_domain::{ArticleMeta, JournalMeta};
use izdat_xml::crossref::DepositHead;

#[derive(Parser)]
#[command(
    name = "izdat",
    about = "Convert journal-article metadata between model JSON and publishing XML dialects",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a JATS 1.4 archiving document from a model file
    Jats {
        /// Model JSON file
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a JATS document into a model file
    Import {
        /// JATS XML file
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a Crossref 4.4.2 deposit batch from a model file
    Crossref {
        /// Model JSON file
        #[arg(short, long)]
        input: PathBuf,
        /// Depositor name for the batch head
        #[arg(long)]
        depositor: String,
        /// Depositor email address
        #[arg(long)]
        email: String,
        /// Registrant for the batch head
        #[arg(long)]
        registrant: String,
        /// Batch timestamp (YYYYMMDDHHMM when omitted)
        #[arg(long)]
        timestamp: Option<String>,
        /// Print publication date of the issue (ISO, may stop at year or month)
        #[arg(long)]
        print_date: Option<String>,
        /// Online publication date of the issue
        #[arg(long)]
        online_date: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate DOAJ records from a model file
    Doaj {
        /// Model JSON file
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// On-disk form of one editing session's state.
#[derive(Serialize, Deserialize)]
struct ModelFile {
    journal: JournalMeta,
    article: ArticleMeta,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Jats { input, output } => {
            let model = read_model(&input)?;
            let xml = izdat_xml::jats::generate(&model.journal, &model.article)?;
            write_output(output.as_deref(), &xml)
        }
        Command::Import { input, output } => {
            let xml = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let (journal, article) = izdat_xml::jats::parse(&xml)?;
            tracing::info!(
                authors = article.authors.len(),
                affiliations = article.affiliations.len(),
                "imported JATS document"
            );
            let json = serde_json::to_string_pretty(&ModelFile { journal, article })?;
            write_output(output.as_deref(), &json)
        }
        Command::Crossref {
            input,
            depositor,
            email,
            registrant,
            timestamp,
            print_date,
            online_date,
            output,
        } => {
            let model = read_model(&input)?;
            let head = DepositHead {
                timestamp: timestamp
                    .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d%H%M").to_string()),
                depositor_name: depositor,
                email_address: email,
                registrant,
                publication_date: print_date.unwrap_or_default(),
                epublication_date: online_date.unwrap_or_default(),
            };
            let xml = izdat_xml::crossref::generate(&head, &[(model.journal, model.article)])?;
            write_output(output.as_deref(), &xml)
        }
        Command::Doaj { input, output } => {
            let model = read_model(&input)?;
            let xml = izdat_xml::doaj::generate(&[(model.journal, model.article)])?;
            write_output(output.as_deref(), &xml)
        }
    }
}

fn read_model(path: &Path) -> Result<ModelFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing model file {}", path.display()))
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{content}"),
    }
    Ok(())
}
