use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use spdlog::{debug, info};

use crate::content::{parse_frontmatter, Frontmatter};
use crate::post_list::PostList;
use crate::text_utils::{is_valid_slug, parse_loose_date};
use crate::Lang;

#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    Unreadable(String),
    MissingFrontmatter,
    MissingSlug,
    InvalidSlug(String),
    InvalidTranslationKey(String),
    MissingPubDate,
    InvalidPubDate(String),
    InvalidHeroImage,
    HeroImageNotFound(PathBuf),
    InvalidLang(String),
    MissingTranslation { key: String, lang: Lang },
}

/// One failed check on one post file
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub file: PathBuf,
    pub kind: IssueKind,
}

impl Issue {
    fn new(file: &Path, kind: IssueKind) -> Issue {
        Issue {
            file: file.to_path_buf(),
            kind,
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = self.file.display();
        match &self.kind {
            IssueKind::Unreadable(e) => write!(f, "Unreadable file ({}): {}", e, file),
            IssueKind::MissingFrontmatter => write!(f, "Missing frontmatter: {}", file),
            IssueKind::MissingSlug => write!(f, "Missing slug: {}", file),
            IssueKind::InvalidSlug(s) => write!(f, "Invalid slug '{}': {}", s, file),
            IssueKind::InvalidTranslationKey(k) => write!(f, "Invalid translationKey '{}': {}", k, file),
            IssueKind::MissingPubDate => write!(f, "Missing pubDate: {}", file),
            IssueKind::InvalidPubDate(d) => write!(f, "Invalid pubDate '{}': {}", d, file),
            IssueKind::InvalidHeroImage => write!(f, "Invalid heroImage: {}", file),
            IssueKind::HeroImageNotFound(resolved) => write!(f, "heroImage not found: {}", resolved.display()),
            IssueKind::InvalidLang(l) => write!(f, "Invalid lang '{}': {}", l, file),
            IssueKind::MissingTranslation { key, lang } => {
                write!(f, "Missing {} translation for translationKey '{}': {}", lang, key, file)
            }
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub files_checked: usize,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs every check against one post. Checks do not short-circuit each
/// other, except that nothing is checked without a frontmatter.
pub fn check_post(file: &Path, text: &str) -> Vec<Issue> {
    let Some(fm) = parse_frontmatter(text) else {
        return vec![Issue::new(file, IssueKind::MissingFrontmatter)];
    };

    let mut issues = vec![];

    match fm.get_str("slug") {
        None => issues.push(Issue::new(file, IssueKind::MissingSlug)),
        Some(slug) if !is_valid_slug(slug) => {
            issues.push(Issue::new(file, IssueKind::InvalidSlug(slug.to_string())))
        }
        Some(_) => {}
    }

    if fm.contains_key("translationKey") {
        let key = fm.get_str("translationKey").unwrap_or_default();
        if !is_valid_slug(key) {
            issues.push(Issue::new(file, IssueKind::InvalidTranslationKey(key.to_string())));
        }
    }

    match fm.get_str("pubDate") {
        None => issues.push(Issue::new(file, IssueKind::MissingPubDate)),
        Some(date) => {
            if let Err(e) = parse_loose_date(date) {
                debug!("{} - file={}", e, file.display());
                issues.push(Issue::new(file, IssueKind::InvalidPubDate(date.to_string())));
            }
        }
    }

    if fm.contains_key("heroImage") {
        issues.extend(check_hero_image(file, &fm));
    }

    issues
}

fn check_hero_image(file: &Path, fm: &Frontmatter) -> Option<Issue> {
    let hero = match fm.get_str("heroImage") {
        Some(hero) if !hero.is_empty() => hero,
        _ => return Some(Issue::new(file, IssueKind::InvalidHeroImage)),
    };

    let post_dir = file.parent().unwrap_or_else(|| Path::new(""));
    let resolved = post_dir.join(hero);
    if resolved.is_file() {
        None
    } else {
        Some(Issue::new(file, IssueKind::HeroImageNotFound(resolved)))
    }
}

// (file, lang, translationKey) of a parsed post
type TranslationEntry = (PathBuf, Lang, String);

/// Cross-file rule: every translationKey must exist once per language.
/// Posts with an unknown `lang` are reported and left out of the pairing.
pub fn check_translations(posts: &[(PathBuf, Frontmatter)]) -> Vec<Issue> {
    let mut issues = vec![];
    let mut entries: Vec<TranslationEntry> = vec![];

    for (file, fm) in posts {
        let lang_code = fm.get_str("lang").unwrap_or(Lang::En.code());
        let lang = match lang_code.parse::<Lang>() {
            Ok(lang) => lang,
            Err(_) => {
                issues.push(Issue::new(file, IssueKind::InvalidLang(lang_code.to_string())));
                continue;
            }
        };

        if let Some(key) = fm.get_str("translationKey") {
            if is_valid_slug(key) {
                entries.push((file.clone(), lang, key.to_string()));
            }
        }
    }

    let mut langs_by_key: BTreeMap<&str, BTreeSet<Lang>> = BTreeMap::new();
    for (_, lang, key) in &entries {
        langs_by_key.entry(key.as_str()).or_default().insert(*lang);
    }

    for (file, lang, key) in &entries {
        let counterpart = lang.counterpart();
        let found = langs_by_key
            .get(key.as_str())
            .map(|langs| langs.contains(&counterpart))
            .unwrap_or(false);
        if !found {
            issues.push(Issue::new(file, IssueKind::MissingTranslation {
                key: key.clone(),
                lang: counterpart,
            }));
        }
    }

    issues
}

pub struct Validator {
    pub content_dir: PathBuf,
    pub strict_translations: bool,
}

impl Validator {
    pub fn new(content_dir: &Path) -> Validator {
        Validator {
            content_dir: content_dir.to_path_buf(),
            strict_translations: false,
        }
    }

    pub fn with_strict_translations(mut self, strict: bool) -> Validator {
        self.strict_translations = strict;
        self
    }

    /// Checks every post under the content dir, writing each issue to `out`
    /// as soon as it is found. Fails only when no post can be discovered.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<Report> {
        let files = PostList::new(&self.content_dir)
            .retrieve_files()
            .with_context(|| format!("Error listing posts in {}", self.content_dir.display()))?;

        if files.is_empty() {
            bail!("No markdown files found in {}", self.content_dir.display());
        }

        info!("Validating {} posts in {}", files.len(), self.content_dir.display());

        let mut issues = vec![];
        let mut parsed: Vec<(PathBuf, Frontmatter)> = vec![];

        for file in &files {
            let file_issues = match fs::read_to_string(file) {
                Ok(text) => {
                    if self.strict_translations {
                        if let Some(fm) = parse_frontmatter(&text) {
                            parsed.push((file.clone(), fm));
                        }
                    }
                    check_post(file, &text)
                }
                Err(e) => vec![Issue::new(file, IssueKind::Unreadable(e.to_string()))],
            };

            for issue in file_issues {
                writeln!(out, "{}", issue)?;
                issues.push(issue);
            }
        }

        if self.strict_translations {
            for issue in check_translations(&parsed) {
                writeln!(out, "{}", issue)?;
                issues.push(issue);
            }
        }

        Ok(Report {
            files_checked: files.len(),
            issues,
        })
    }
}
