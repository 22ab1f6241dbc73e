//! billet CLI — content model tooling for the blog studio.
//!
//! Commands: schema, validate, preview, slugify, completions

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser};
use tracing::debug;

use billet_core::slug;
use billet_schema::{registry, schema_for, Document, DocumentSet};

#[derive(Parser)]
#[command(name = "billet")]
#[command(version)]
#[command(about = "Content model and validation for the blog studio")]
struct Cli {
    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the declarative schema surface as JSON
    Schema {
        /// Restrict to one type (author, category, post, bContent)
        #[arg(long)]
        doc_type: Option<String>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Validate document files; exits non-zero on any violation
    #[command(alias = "v")]
    Validate {
        /// JSON or YAML document files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Machine-readable report
        #[arg(long)]
        json: bool,
    },
    /// Print the list preview projection of each document
    Preview {
        /// JSON or YAML document files; post authors are resolved
        /// within this set
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Derive a slug from free text
    Slugify {
        input: String,
        /// Which generator to apply
        #[arg(long, value_enum, default_value_t = SlugStyle::Default)]
        strategy: SlugStyle,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SlugStyle {
    /// Platform default: trim, lowercase, hyphenate
    Default,
    /// Post normalizer: also strips symbols
    Post,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    match run(cli.command) {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("billet: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `false` when validation found violations.
fn run(command: Commands) -> anyhow::Result<bool> {
    match command {
        Commands::Schema { doc_type, pretty } => {
            let json = match doc_type {
                Some(name) => {
                    let entry = schema_for(&name)
                        .with_context(|| format!("unknown schema type '{name}'"))?;
                    to_json(&entry, pretty)?
                }
                None => to_json(&registry(), pretty)?,
            };
            println!("{json}");
            Ok(true)
        }
        Commands::Validate { files, json } => {
            let set = load_documents(&files)?;
            let reports = set.validate_all();
            let clean = reports.iter().all(|report| report.is_valid());
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    let label = report
                        .id
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| "(sans id)".to_string());
                    if report.is_valid() {
                        println!("ok   {} {}", report.doc_type, label);
                    } else {
                        println!("FAIL {} {}", report.doc_type, label);
                        for violation in &report.violations {
                            println!("     {violation}");
                        }
                    }
                }
                let total: usize = reports.iter().map(|r| r.violations.len()).sum();
                println!(
                    "{} document(s), {} violation(s)",
                    reports.len(),
                    total
                );
            }
            Ok(clean)
        }
        Commands::Preview { files } => {
            let set = load_documents(&files)?;
            println!("{}", serde_json::to_string_pretty(&set.previews())?);
            Ok(true)
        }
        Commands::Slugify { input, strategy } => {
            let slug = match strategy {
                SlugStyle::Default => slug::default_slugify(&input),
                SlugStyle::Post => slug::normalize(&input),
            };
            println!("{slug}");
            Ok(true)
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "billet", &mut std::io::stdout());
            Ok(true)
        }
    }
}

fn load_documents(files: &[PathBuf]) -> anyhow::Result<DocumentSet> {
    let mut set = DocumentSet::new();
    for path in files {
        let doc = load_document(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        debug!(path = %path.display(), doc_type = %doc.doc_type(), "loaded document");
        set.insert(doc);
    }
    Ok(set)
}

fn load_document(path: &Path) -> anyhow::Result<Document> {
    let raw = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let doc = match extension {
        "json" => serde_json::from_str(&raw)?,
        "yaml" | "yml" => serde_yaml::from_str(&raw)?,
        other => bail!("unsupported file extension '{other}' (expected json, yaml, or yml)"),
    };
    Ok(doc)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
