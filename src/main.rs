/*!
 * Command-line interface for structify
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use structify::config::{Args, Config};
use structify::logging::init_tracing;
use structify::report::{ReportFormat, Reporter};
use structify::select::TerminalPrompter;

const SPINNER_TEMPLATE: &str =
    "{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} ⏱️  {elapsed_precise}";

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_configuration() {
                eprintln!("Run with --help for usage.");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> structify::Result<()> {
    let config = if args.no_interactive {
        Config::from_args(&args)?
    } else {
        println!("Welcome to Structify!\n");
        Config::from_prompts(&args, &mut TerminalPrompter::stdio())?
    };

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Scanning");
    progress.set_message(format!("📂 {}", config.start_dir.display()));

    let outcome = structify::run(&config, Arc::new(progress.clone()));
    progress.finish_and_clear();
    let report = outcome?;

    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    println!("Done! File created: {}", config.output_file.display());

    Ok(())
}
