//! Command-line driver.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::config::{DEFAULT_CONFIG_FILE, UnabstractConfig};
use crate::logging::targets;
use crate::{Error, Result, Unabstracter};

#[derive(Parser, Debug)]
#[command(name = "unabstract")]
#[command(version, about = "Un-abstracts Tailwind CSS classes given your markup and SCSS files")]
pub struct Cli {
    /// Path to markup files.
    pub markup_dir: Option<PathBuf>,

    /// Path to Tailwind CSS (SCSS) files.
    pub stylesheet_dir: Option<PathBuf>,

    /// Directories to exclude [default: vendor node_modules].
    pub exclude: Vec<String>,

    /// Config file [default: unabstract.toml if present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Accept every replacement without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// List replacements without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Merge the config file with the command line.
    pub fn resolve_config(&self) -> Result<UnabstractConfig> {
        let config = match &self.config {
            Some(path) => UnabstractConfig::load(path)?,
            None => UnabstractConfig::load_or_default(DEFAULT_CONFIG_FILE)?,
        };

        Ok(config.with_overrides(
            self.markup_dir.clone(),
            self.stylesheet_dir.clone(),
            self.exclude.clone(),
        ))
    }
}

/// Answers yes/no questions.
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Asks on the terminal, defaulting to no.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}

/// Says yes to everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl Confirmer for AcceptAll {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Outcome of an interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub cancelled: bool,
    pub replaced: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Report warnings, ask for the go-ahead, then walk the candidates.
///
/// Per-candidate failures (unreadable markup, failed rewrites) are logged
/// and counted; only prompt and output failures end the session early.
pub fn run_session(
    run: &mut Unabstracter,
    confirmer: &mut dyn Confirmer,
    out: &mut dyn Write,
) -> Result<SessionSummary> {
    let warning_count = {
        let warnings = run.prepare()?;
        for warning in warnings {
            writeln!(out, "WARNING: {}.", warning).map_err(output_error)?;
        }
        warnings.len()
    };

    let question = format!(
        "I have found {} abstractions in {} files with {} warnings (see above). \
         Would you like to un-abstract? This will override your files! You will be asked each time.",
        run.abstractions().len(),
        run.stylesheet_count(),
        warning_count,
    );

    let mut summary = SessionSummary::default();
    if !confirmer.confirm(&question)? {
        writeln!(out, "Cancelled.").map_err(output_error)?;
        summary.cancelled = true;
        return Ok(summary);
    }

    for candidate in run.candidates() {
        let candidate = match candidate {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::error!(target: targets::CLI, error = %err, "skipping markup file");
                summary.failed += 1;
                continue;
            }
        };

        let question = format!("{}\nContext: '{}'", candidate, candidate.context());
        if !confirmer.confirm(&question)? {
            summary.skipped += 1;
            continue;
        }

        match run.replace(&candidate) {
            Ok(()) => summary.replaced += 1,
            Err(err) => {
                tracing::error!(
                    target: targets::CLI,
                    file = %candidate.file_path.display(),
                    line = candidate.display_line_number(),
                    error = %err,
                    "replacement failed"
                );
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        target: targets::CLI,
        replaced = summary.replaced,
        skipped = summary.skipped,
        failed = summary.failed,
        "session finished"
    );
    writeln!(out, "Done.").map_err(output_error)?;
    Ok(summary)
}

fn output_error(err: std::io::Error) -> Error {
    Error::Prompt(err.to_string())
}

/// Entry point used by the binary.
pub fn run(cli: &Cli) -> Result<SessionSummary> {
    let config = cli.resolve_config()?;
    let options = config.discovery_options()?;
    tracing::debug!(target: targets::CLI, ?options, "starting run");

    let mut run = Unabstracter::new(&options)?.dry_run(cli.dry_run);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.yes {
        run_session(&mut run, &mut AcceptAll, &mut out)
    } else {
        run_session(&mut run, &mut TerminalConfirmer, &mut out)
    }
}
