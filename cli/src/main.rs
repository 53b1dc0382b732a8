use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use graphql_upgrader_core::{is_eligible, upgrade, UpgradeOptions, UpgradeReport};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "graphql-upgrader")]
#[command(about = "Upgrade legacy `.define do` GraphQL-Ruby types to class-based declarations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade legacy type definitions
    Upgrade {
        /// Ruby files, or directories to scan for `*.rb` files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Rewrite files in place instead of printing the upgraded source
        #[arg(short, long)]
        write: bool,

        /// Write a JSON report of rewrites and skipped declarations
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// List the files that still use legacy definitions
    Check {
        /// Ruby files, or directories to scan for `*.rb` files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// JSON options file (`legacy-namespace`, `base-namespace`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Namespace of the legacy `<Kind>Type.define` builders
    #[arg(long)]
    legacy_namespace: Option<String>,

    /// Namespace holding the `Base<Kind>` classes to inherit from
    #[arg(long)]
    base_namespace: Option<String>,
}

impl OptionArgs {
    /// Options file first, then command-line overrides.
    fn resolve(&self) -> Result<UpgradeOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to open config file: {}", path.display()))?;
                UpgradeOptions::from_json(&json)
                    .with_context(|| format!("Failed to parse config from: {}", path.display()))?
            }
            None => UpgradeOptions::default(),
        };
        if let Some(ns) = &self.legacy_namespace {
            options.legacy_namespace = ns.clone();
        }
        if let Some(ns) = &self.base_namespace {
            options.base_namespace = ns.clone();
        }
        options.validate().context("Invalid options")?;
        Ok(options)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    report: UpgradeReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — logs go to stderr so stdout stays clean for source
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Upgrade {
            paths,
            write,
            report,
            format,
            options,
        } => {
            let options = options.resolve()?;
            let files = collect_source_files(&paths)?;
            let print_headers = files.len() > 1;

            let mut stdout = BufWriter::new(io::stdout());
            let mut reports = Vec::new();
            let mut written = 0usize;

            for path in &files {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;

                if !is_eligible(&source, &options)? {
                    tracing::debug!(path = %path.display(), "not a legacy definition, skipping");
                    continue;
                }

                let result = upgrade(&source, &options)
                    .map_err(|e| anyhow::Error::from(e).context("Upgrade failed"))?;

                for skipped in &result.report.skipped {
                    eprintln!(
                        "Warning: {}:{}: {}: {}",
                        path.display(),
                        skipped.line,
                        skipped.reason,
                        skipped.text
                    );
                }

                if write {
                    if result.source != source {
                        fs::write(path, &result.source).with_context(|| {
                            format!("Failed to write output file: {}", path.display())
                        })?;
                        written += 1;
                    }
                } else {
                    if print_headers {
                        writeln!(stdout, "==> {} <==", path.display())
                            .context("Failed to write output")?;
                    }
                    stdout
                        .write_all(result.source.as_bytes())
                        .context("Failed to write output")?;
                }

                reports.push(FileReport {
                    path: path.display().to_string(),
                    report: result.report,
                });
            }
            stdout.flush().context("Failed to write output")?;

            if write {
                tracing::info!(files = files.len(), upgraded = written, "upgrade finished");
            }

            if let Some(report_path) = report {
                write_json(&reports, &report_path, format)?;
            }
        }
        Commands::Check { paths, options } => {
            let options = options.resolve()?;
            let mut stdout = BufWriter::new(io::stdout());

            for path in collect_source_files(&paths)? {
                let source = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                if is_eligible(&source, &options)? {
                    writeln!(stdout, "{}", path.display()).context("Failed to write output")?;
                }
            }
            stdout.flush().context("Failed to write output")?;
        }
    }

    Ok(())
}

/// Expand the command-line paths into the files to process. Files named
/// directly are always included; directories contribute their `*.rb` files.
fn collect_source_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            bail!("Failed to open input path: {}", path.display());
        }

        tracing::debug!(path = %path.display(), "scanning directory");
        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to scan directory: {}", path.display()))?;
            if entry.file_type().is_file() && is_ruby_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn is_ruby_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == OsStr::new("rb"))
}

fn write_json<T: Serialize>(val: &T, path: &Path, format: OutputFormat) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to write JSON")?;

    Ok(())
}
