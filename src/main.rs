//! # chatsplit CLI
//!
//! Command-line interface for the chatsplit library.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`; `--debug` raises
//! the default level from `warn` to `debug`.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatsplit::ChatsplitError;
use chatsplit::cli::Args;
use chatsplit::core::processor::split_export;
use chatsplit::progress::console_narrator;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.debug);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep going either way.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Runs the split. Returns `Ok(false)` when some records failed.
fn run(args: &Args) -> Result<bool, ChatsplitError> {
    let total_start = Instant::now();

    let format = args.format()?;
    let input = args.input_path(format);
    let output_dir = args.output_dir(format);
    tracing::debug!(?format, input = %input.display(), output = %output_dir.display(), "resolved arguments");

    if !args.quiet {
        println!("📦 chatsplit v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let extractor = args.extractor(format);
    let narrator = console_narrator(!args.quiet);
    let report = split_export(extractor.as_ref(), &input, &output_dir, Some(&narrator))?;

    if !args.quiet {
        println!();
        println!("📊 Summary:");
        println!("   Conversations: {}", report.total);
        println!("   Written:       {}", report.written.len());
        println!("   Skipped:       {}", report.skipped.len());
        println!("   Failed:        {}", report.failures.len());
        println!();
        println!(
            "⚡ Finished in {:.2}s, output in {}",
            total_start.elapsed().as_secs_f64(),
            output_dir.display()
        );
    }

    Ok(report.is_success())
}
