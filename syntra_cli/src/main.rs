//! `syntra`: lex or syntax-check Syntra source files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use syntra_analyzer::{Diagnostic, Error, check, lex, render_diagnostics};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod error;
mod view;

use error::CliError;
use view::{CheckResult, TokensResult, ViewCtx};

const ACCEPTED: &str = "Parsing completed successfully";

#[derive(Parser)]
#[command(name = "syntra")]
#[command(about = "Syntra lexer and syntax checker", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log lexer and parser activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a source file, one per line
    Tokens {
        /// Source file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Check that a source file is a syntactically valid program
    Check {
        /// Source file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Outcome of a command that ran to completion.
enum Verdict {
    Accepted,
    Rejected,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Tokens { file, format } => run_tokens(file, *format),
        Commands::Check { file, format } => run_check(file, *format),
    };

    match result {
        Ok(Verdict::Accepted) => ExitCode::SUCCESS,
        Ok(Verdict::Rejected) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("syntra_analyzer=debug,syntra_cli=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = source.len(), "read source");
    Ok(source)
}

fn run_tokens(path: &Path, format: Format) -> Result<Verdict, CliError> {
    let source = read_source(path)?;
    let lexed = lex(&source);

    if format == Format::Json {
        let ctx = ViewCtx::new(&source);
        let result = match &lexed {
            Ok(tokens) => TokensResult {
                tokens: ctx.tokens(tokens),
                diagnostics: vec![],
            },
            Err(err) => TokensResult {
                tokens: vec![],
                diagnostics: vec![ctx.diag(&Diagnostic::from(err))],
            },
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(verdict(lexed.is_ok()));
    }

    match lexed {
        Ok(tokens) => {
            for token in &tokens {
                println!("{} {}", token.kind.class().tag(), token.kind.value());
            }
            Ok(Verdict::Accepted)
        }
        Err(err) => {
            report(path, &source, Diagnostic::from(&err));
            Ok(Verdict::Rejected)
        }
    }
}

fn run_check(path: &Path, format: Format) -> Result<Verdict, CliError> {
    let source = read_source(path)?;
    let checked = check(&source);
    if let Ok(output) = &checked {
        debug!(events = output.events.len(), "program accepted");
    }

    if format == Format::Json {
        let ctx = ViewCtx::new(&source);
        let result = CheckResult {
            accepted: checked.is_ok(),
            diagnostics: checked
                .as_ref()
                .err()
                .map(|err: &Error| ctx.diag(&Diagnostic::from(err)))
                .into_iter()
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(verdict(result.accepted));
    }

    match checked {
        Ok(_) => {
            println!("{ACCEPTED}");
            Ok(Verdict::Accepted)
        }
        Err(err) => {
            report(path, &source, Diagnostic::from(&err));
            Ok(Verdict::Rejected)
        }
    }
}

fn report(path: &Path, source: &str, diag: Diagnostic) {
    let name = path.display().to_string();
    eprint!("{}", render_diagnostics(&name, source, vec![diag]));
}

fn verdict(accepted: bool) -> Verdict {
    if accepted {
        Verdict::Accepted
    } else {
        Verdict::Rejected
    }
}
