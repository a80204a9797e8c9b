use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spdlog::warn;

use postkit::config::open_config;
use postkit::logger::configure_logger;
use postkit::validator::Validator;

/// Checks the frontmatter of every blog post before publishing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. Defaults to ./postkit.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also require every translationKey to exist in both languages
    #[arg(long)]
    strict_translations: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match open_config(args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let strict = args.strict_translations || config.validation.strict_translations;
    let validator = Validator::new(&config.paths.content_dir).with_strict_translations(strict);

    let report = match validator.run(&mut io::stdout()) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };

    if report.is_valid() {
        println!("All {} posts are valid.", report.files_checked);
        ExitCode::SUCCESS
    } else {
        eprintln!("{} problem(s) found in {} posts.", report.issues.len(), report.files_checked);
        ExitCode::FAILURE
    }
}
