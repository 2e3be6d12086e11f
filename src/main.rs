use anyhow::Result;
use clap::Parser;
use cyrillic_lint::config::{settings, ScanConfig};
use cyrillic_lint::core::ScanEngine;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Report Cyrillic text found in the files of a directory tree.
#[derive(Debug, Parser)]
#[command(name = "cyrillic-lint", version, about)]
struct Cli {
    /// Root directory to scan
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Glob restricting which files are scanned (default: all files)
    #[arg(short, long)]
    pattern: Option<String>,

    /// Highlight the matched text
    #[arg(long)]
    colorize: bool,

    /// Print `path:line:column` for every match
    #[arg(long, conflicts_with = "no_file_names")]
    show_file_names: bool,

    #[arg(long)]
    no_file_names: bool,

    /// Print the matched text with surrounding context
    #[arg(long, conflicts_with = "no_content")]
    show_content: bool,

    #[arg(long)]
    no_content: bool,

    /// Add exclusions derived from <dir>/.gitignore
    #[arg(long)]
    git_ignore: bool,

    /// Extra exclusion glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    ignore: Vec<String>,

    /// Comma-separated extensions to skip, e.g. `png,svg`
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    ignore_exts: Vec<String>,

    /// Exit with status 1 when any match is found
    #[arg(long)]
    error_code_on_found: bool,

    /// Load options from a JSON config file; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective options to a JSON config file and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,
}

impl Cli {
    /// Layers command-line flags over the config file (or the defaults).
    fn resolve_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => settings::load_config(path)?,
            None => ScanConfig::default(),
        };

        if let Some(dir) = &self.dir {
            config.dir = dir.clone();
        }
        if let Some(pattern) = &self.pattern {
            config.pattern = Some(pattern.clone());
        }

        config.colorize |= self.colorize;
        config.git_ignore |= self.git_ignore;
        config.error_code_on_found |= self.error_code_on_found;

        if self.show_file_names {
            config.show_file_names = true;
        } else if self.no_file_names {
            config.show_file_names = false;
        }
        if self.show_content {
            config.show_content = true;
        } else if self.no_content {
            config.show_content = false;
        }

        config.ignore.extend(self.ignore.iter().cloned());
        config.ignore_exts.extend(self.ignore_exts.iter().cloned());
        Ok(config)
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.resolve_config()?;

    if let Some(path) = &cli.write_config {
        settings::save_config(&config, path)?;
        return Ok(ExitCode::SUCCESS);
    }

    let out = BufWriter::new(io::stdout());
    let summary = ScanEngine::new().run(&config, out).await?;
    tracing::info!(
        "Summary: {}",
        serde_json::to_string(&summary).unwrap_or_default()
    );

    Ok(summary.exit_code(config.error_code_on_found))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
