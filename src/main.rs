//! # SQL Advisor
//!
//! Normalizes SQL and reports static optimization findings.
//!
//! ```bash
//! # Analyze inline SQL
//! sql-advisor analyze "SELECT * FROM users WHERE LOWER(email) = 'a@b.com'"
//!
//! # Markdown report from a file, with a rewrite from a local model
//! sql-advisor analyze -q queries.sql -f markdown --use-llm
//!
//! # Execution plan
//! DATABASE_URL=postgres://localhost/app sql-advisor explain "SELECT * FROM users"
//! ```
//!
//! # Exit Codes
//!
//! - `0` - No findings, or only low severity
//! - `1` - Medium findings, or a failure (reported on stderr)
//! - `2` - High findings

use std::process;

use clap::Parser;
use sql_advisor::{
    app::{AnalyzeParams, ExplainParams, run_analyze, run_explain},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tokio::main;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> AppResult<i32> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            sql,
            queries,
            dialect,
            use_llm,
            model,
            ollama_url,
            output_format,
            no_color
        } => {
            let params = AnalyzeParams {
                sql,
                queries_path: queries,
                dialect,
                use_llm,
                model,
                ollama_url,
                output_format,
                verbose: cli.verbose,
                no_color
            };
            let result = run_analyze(params, config).await?;
            println!("{}", result.output);
            Ok(result.exit_code)
        }
        Commands::Explain {
            dsn,
            sql,
            queries,
            analyze,
            buffers,
            timeout_ms,
            output_format
        } => {
            let params = ExplainParams {
                dsn,
                sql,
                queries_path: queries,
                analyze,
                buffers,
                timeout_ms,
                output_format
            };
            let output = run_explain(params, config).await?;
            println!("{}", output);
            Ok(0)
        }
    }
}
