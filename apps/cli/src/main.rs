//! pureget CLI - resolve an app package to a direct download link
//!
//! Prints exactly one JSON object on stdout. Exit code 1 is reserved for
//! invalid arguments and fatal errors; a package that cannot be resolved
//! is a normal outcome and exits 0.

mod commands;
mod logging;
mod output;

use clap::error::ErrorKind;
use clap::Parser;
use pureget_types::ResultEnvelope;
use std::process::ExitCode;

/// pureget - direct download links for catalog apps
#[derive(Parser)]
#[command(name = "pureget")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package name to resolve, e.g. com.example.app
    package: Option<String>,

    /// Catalog origin
    #[arg(long, env = "PUREGET_BASE_URL")]
    base_url: Option<String>,

    /// Locale segment used by the last listing guess
    #[arg(long, env = "PUREGET_LOCALE")]
    locale: Option<String>,

    /// Proxy for all catalog requests
    #[arg(long, env = "PUREGET_PROXY")]
    proxy: Option<String>,

    /// Skip the randomized pauses before requests
    #[arg(long)]
    no_delay: bool,

    /// Output format
    #[arg(long, default_value = "json")]
    output: OutputFormat,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Human,
}

/// Print a failure envelope as JSON and return exit code 1
fn fail(error: impl Into<String>) -> ExitCode {
    let envelope = ResultEnvelope::failure(error);
    match output::render_json(&envelope) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("{}", e),
    }
    ExitCode::FAILURE
}

fn clap_message(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error:").trim().to_string()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => return fail(clap_message(&e)),
    };

    logging::init_logging(cli.verbose);

    let package = match commands::package_from_args(cli.package.as_deref()) {
        Ok(package) => package,
        Err(e) => return fail(e.to_string()),
    };

    let config = commands::config_from_cli(&cli);
    let format = cli.output;

    let result = async {
        let envelope = commands::resolve_package(&package, config).await?;
        output::print_envelope(&envelope, format)
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            fail(format!("Script error: {:#}", e))
        }
    }
}
