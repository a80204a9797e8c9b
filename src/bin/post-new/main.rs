use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use spdlog::warn;

use postkit::config::{open_config, Config};
use postkit::logger::configure_logger;
use postkit::post_template::HERO_FILE_NAME;
use postkit::prompt::TerminalPrompter;
use postkit::scaffold::{resolve_options, PostArgs, Scaffolder};
use postkit::tag_store::TagStore;

/// Creates a new dated post folder with en/es stubs and a placeholder hero image
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Title of the post
    #[arg(short, long)]
    title: Option<String>,

    /// URL slug. Derived from the title when empty
    #[arg(short, long)]
    slug: Option<String>,

    /// Publish date as YYYY-MM-DD. Today when empty
    #[arg(short, long)]
    date: Option<String>,

    /// Key shared by both language versions. The slug when empty
    #[arg(long = "translationKey", alias = "translation-key")]
    translation_key: Option<String>,

    /// Config path. Defaults to ./postkit.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn post_cmd(args: Args, config: &Config) -> Result<PathBuf> {
    let store = TagStore::load(&config.paths.tags_file)?;
    let today = Local::now().date_naive();

    let post_args = PostArgs {
        title: args.title,
        slug: args.slug,
        date: args.date,
        translation_key: args.translation_key,
    };
    let options = resolve_options(post_args, &mut TerminalPrompter, today, store.tags())?;

    Scaffolder::new(&config.paths.content_dir, &config.paths.tags_file).create(&options)
}

fn main() -> ExitCode {
    let mut args = Args::parse();

    let config = match open_config(args.config.take()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match post_cmd(args, &config) {
        Ok(dir) => {
            println!("Created post in {}", dir.display());
            println!("Replace {} with the real hero image and fill in the content of both languages.", dir.join(HERO_FILE_NAME).display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
