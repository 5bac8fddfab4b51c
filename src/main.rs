mod cli;

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as _;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use cli::{Cli, Mode};
use smlc::lexer::{self, LexError};
use smlc::limits::{CONFIG_FILE_NAME, CompilerLimits};
use smlc::parser::Parser;

fn main() -> anyhow::Result<ExitCode> {
    initialize_logging();

    let cli = Cli::parse();

    let limits = CompilerLimits::from_toml_file(CONFIG_FILE_NAME)?;
    debug!(?limits, "loaded limits");

    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    debug!(file = %cli.file.display(), bytes = source.len(), "read source");

    match cli.mode() {
        Mode::Lex => print_tokens(&source, &limits),
        Mode::Parse => print_tree(&source, limits),
    }
}

fn print_tokens(source: &str, limits: &CompilerLimits) -> anyhow::Result<ExitCode> {
    let tokens = lexer::tokenize(source, limits)?;

    let mut out = io::stdout().lock();
    for token in &tokens.list {
        // Eof has no category and is not listed
        if let Some(category) = token.kind.category() {
            writeln!(out, "({}, {})", category, token.value)?;
        }
    }

    report_lex_errors(&tokens.errors);
    Ok(ExitCode::SUCCESS)
}

fn print_tree(source: &str, limits: CompilerLimits) -> anyhow::Result<ExitCode> {
    let mut parser = Parser::new(source, limits)?;
    let result = parser.parse_program();

    report_lex_errors(parser.lex_errors());

    match result {
        Ok(root) => {
            println!("{}", smlc::render(Some(&root)));
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report_lex_errors(errors: &[LexError]) {
    for error in errors {
        eprintln!("{}", error);
    }
}

fn initialize_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_filter(env_filter),
        )
        .init();
}
