//! md CLI - Directive-annotated markdown to HTML.
//!
//! Converts each `.md` argument into a standalone HTML page, expanding
//! `:include:`, `:css:`, `:title:` and heading attribute directives.

mod convert;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use convert::ConvertArgs;
use output::Output;

/// md - Markdown to HTML with include directives.
#[derive(Parser)]
#[command(name = "md", version, about)]
struct Cli {
    #[command(flatten)]
    args: ConvertArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.args.execute() {
        output.failed(&err);
        std::process::exit(1);
    }
}
