//! seo-tagger CLI entry point

use clap::Parser;
use seo_tagger::cli::{Cli, Command, run_tag, run_template};
use seo_tagger::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level(), !cli.no_log_file);

    match &cli.command {
        Command::Tag(args) => match run_tag(args) {
            Ok(summary) => {
                println!(
                    "Summary: {} tagged, {} failed, {} name collision(s)",
                    summary.tagged, summary.failed, summary.collisions
                );
                if let Some(report) = &summary.report {
                    println!("Report: {}", report.display());
                }

                if args.strict && summary.failed > 0 {
                    ExitCode::from(1)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        },
        Command::Template { path } => match run_template(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        },
    }
}
