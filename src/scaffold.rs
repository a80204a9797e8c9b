use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use spdlog::{debug, info};

use crate::post_template::{hero_placeholder, render_post, HERO_FILE_NAME};
use crate::tag_store::{normalize_tag, TagStore};
use crate::prompt::Prompter;
use crate::text_utils::{is_valid_slug, parse_strict_date, slugify};
use crate::Lang;

/// Raw values given on the command line
#[derive(Debug, Default, Clone)]
pub struct PostArgs {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub translation_key: Option<String>,
}

/// Everything needed to write a new post, resolved and validated
#[derive(Debug, Clone, PartialEq)]
pub struct PostOptions {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub translation_key: String,
    pub tags: Vec<String>,
    /// Subset of `tags` missing from the tag store
    pub new_tags: Vec<String>,
}

fn flag_or_prompt(
    flag: Option<String>,
    prompter: &mut dyn Prompter,
    message: &str,
    default: Option<&str>,
) -> Result<String> {
    match flag {
        Some(value) => Ok(value.trim().to_string()),
        None => prompter.ask_text(message, default),
    }
}

fn check_slug(name: &str, value: &str) -> Result<()> {
    if !is_valid_slug(value) {
        bail!("Invalid {} '{}': use lowercase letters, digits and single hyphens (e.g. my-post)", name, value);
    }
    Ok(())
}

/// Flags win over prompts, prompts over defaults. Each value is checked as
/// soon as it is known, and tags are asked last, so a bad flag stops the
/// tool before any question about tags.
pub fn resolve_options(
    args: PostArgs,
    prompter: &mut dyn Prompter,
    today: NaiveDate,
    known_tags: &[String],
) -> Result<PostOptions> {
    let title = flag_or_prompt(args.title, prompter, "Title?", None)?;
    if title.is_empty() {
        bail!("Title is required");
    }
    if title.chars().any(char::is_control) {
        bail!("Title must be a single line without control characters");
    }

    let default_slug = slugify(&title);
    let slug = flag_or_prompt(args.slug, prompter, "Slug?", Some(&default_slug))?;
    check_slug("slug", &slug)?;

    let default_date = today.format("%Y-%m-%d").to_string();
    let date = flag_or_prompt(args.date, prompter, "Publish date (YYYY-MM-DD)?", Some(&default_date))?;
    let date = parse_strict_date(&date).map_err(anyhow::Error::msg)?;

    let translation_key = flag_or_prompt(args.translation_key, prompter, "Translation key?", Some(&slug))?;
    check_slug("translationKey", &translation_key)?;

    let selection = prompter.ask_tags(known_tags)?;
    let (tags, new_tags) = resolve_tags(&selection, known_tags)?;

    Ok(PostOptions {
        title,
        slug,
        date,
        translation_key,
        tags,
        new_tags,
    })
}

/// Splits `1, new-feature` into tags. Numbers pick from `known` (1-based),
/// anything else is normalized and is new unless already known.
/// Returns (all tags in input order, the new ones).
pub fn resolve_tags(input: &str, known: &[String]) -> Result<(Vec<String>, Vec<String>)> {
    let mut tags: Vec<String> = vec![];
    let mut new_tags: Vec<String> = vec![];

    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let tag = if entry.chars().all(|c| c.is_ascii_digit()) {
            let index: usize = entry.parse()?;
            match index.checked_sub(1).and_then(|i| known.get(i)) {
                Some(tag) => tag.clone(),
                None => bail!("Tag number {} is not in the list (1-{})", index, known.len()),
            }
        } else {
            let Some(tag) = normalize_tag(entry) else {
                continue;
            };
            match known.iter().find(|k| k.to_lowercase() == tag) {
                Some(existing) => existing.clone(),
                None => {
                    if !new_tags.contains(&tag) {
                        new_tags.push(tag.clone());
                    }
                    tag
                }
            }
        };

        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    Ok((tags, new_tags))
}

/// `<content_dir>/<yyyy>/<mm>/<dd>`
pub fn post_dir(content_dir: &Path, date: &NaiveDate) -> PathBuf {
    content_dir
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("{:02}", date.day()))
}

pub struct Scaffolder {
    pub content_dir: PathBuf,
    pub tags_file: PathBuf,
}

impl Scaffolder {
    pub fn new(content_dir: &Path, tags_file: &Path) -> Scaffolder {
        Scaffolder {
            content_dir: content_dir.to_path_buf(),
            tags_file: tags_file.to_path_buf(),
        }
    }

    fn check_collision(dir: &Path) -> Result<()> {
        for lang in Lang::ALL {
            let existing = dir.join(lang.file_name());
            if existing.exists() {
                bail!("{} already exists, refusing to overwrite it", existing.display());
            }
        }
        Ok(())
    }

    /// Writes the new post folder and returns its path.
    /// New tags are persisted before any post file, and nothing at all is
    /// written if the folder already holds a post.
    pub fn create(&self, options: &PostOptions) -> Result<PathBuf> {
        let dir = post_dir(&self.content_dir, &options.date);
        Self::check_collision(&dir)?;

        if !options.new_tags.is_empty() {
            let mut store = TagStore::load(&self.tags_file)?;
            store.merge_and_save(&options.new_tags)?;
        }

        fs::create_dir_all(&dir)
            .with_context(|| format!("Unable to create post folder {}", dir.display()))?;

        for lang in Lang::ALL {
            let path = dir.join(lang.file_name());
            fs::write(&path, render_post(options, lang))
                .with_context(|| format!("Unable to write {}", path.display()))?;
            debug!("Wrote {}", path.display());
        }

        let hero = dir.join(HERO_FILE_NAME);
        if !hero.exists() {
            fs::write(&hero, hero_placeholder()?)
                .with_context(|| format!("Unable to write {}", hero.display()))?;
        }

        info!("Created post '{}' in {}", options.slug, dir.display());
        Ok(dir)
    }
}
