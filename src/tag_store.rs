use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spdlog::info;

use crate::text_utils::slugify;

/// Trims, lowercases and kebab-cases a typed tag. `None` if nothing is left.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = slugify(raw.trim());
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// The known tags, kept in a JSON array on disk.
/// Loaded once, changed in memory, then written back whole.
pub struct TagStore {
    path: PathBuf,
    tags: Vec<String>,
}

impl TagStore {
    /// A missing file is an empty store.
    pub fn load(path: &Path) -> Result<TagStore> {
        let tags = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str::<Vec<String>>(&content)
                .with_context(|| format!("Error parsing tag file {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => vec![],
            Err(e) => {
                return Err(e).with_context(|| format!("Error reading tag file {}", path.display()))
            }
        };

        Ok(TagStore {
            path: path.to_path_buf(),
            tags,
        })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Adds the tags not known yet (case-insensitive), then dedups and sorts
    /// the whole set. Returns the tags that were actually added.
    pub fn merge(&mut self, tags: &[String]) -> Vec<String> {
        let mut added = vec![];
        for tag in tags {
            if !self.contains(tag) {
                self.tags.push(tag.clone());
                added.push(tag.clone());
            }
        }

        let mut seen = HashSet::new();
        self.tags.retain(|t| seen.insert(t.to_lowercase()));
        self.tags.sort();

        added
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut json = serde_json::to_string_pretty(&self.tags)?;
        json.push('\n');
        fs::write(&self.path, json)
            .with_context(|| format!("Error writing tag file {}", self.path.display()))
    }

    /// Merges and writes only if something new came in. Returns whether the
    /// file was written.
    pub fn merge_and_save(&mut self, tags: &[String]) -> Result<bool> {
        let added = self.merge(tags);
        if added.is_empty() {
            return Ok(false);
        }

        self.save()?;
        info!("Added tags {:?} to {}", added, self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("  Swift "), Some("swift".to_string()));
        assert_eq!(normalize_tag("New Feature"), Some("new-feature".to_string()));
        assert_eq!(normalize_tag("C#"), Some("c".to_string()));
        assert_eq!(normalize_tag("   "), None);
        assert_eq!(normalize_tag("!!"), None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = TagStore::load(&dir.path().join("tags.json")).unwrap();
        assert!(store.tags().is_empty());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, "{\"not\": \"an array\"}").unwrap();
        assert!(TagStore::load(&path).is_err());
    }

    #[test]
    fn test_merge_sorts_and_dedups() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags.json");
        fs::write(&path, "[\"swift\", \"Rust\", \"astro\", \"rust\"]").unwrap();

        let mut store = TagStore::load(&path).unwrap();
        let added = store.merge(&strings(&["new-feature", "SWIFT", "new-feature"]));

        assert_eq!(added, strings(&["new-feature"]));
        assert_eq!(store.tags(), strings(&["Rust", "astro", "new-feature", "swift"]).as_slice());
    }

    #[test]
    fn test_save_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("content").join("tags.json");

        let mut store = TagStore::load(&path).unwrap();
        assert!(store.merge_and_save(&strings(&["swift", "astro"])).unwrap());

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  \"astro\",\n  \"swift\"\n]\n");
    }

    #[test]
    fn test_redundant_merge_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags.json");
        // Not in canonical form, so any rewrite would show up
        fs::write(&path, "[\"swift\",\"astro\"]").unwrap();

        let mut store = TagStore::load(&path).unwrap();
        assert!(!store.merge_and_save(&strings(&["swift"])).unwrap());
        assert!(!store.merge_and_save(&strings(&["Astro", "swift"])).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\"swift\",\"astro\"]");
    }

    #[test]
    fn test_merge_twice_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tags.json");

        let mut store = TagStore::load(&path).unwrap();
        store.merge_and_save(&strings(&["new-feature"])).unwrap();
        let before = fs::read(&path).unwrap();

        let mut store = TagStore::load(&path).unwrap();
        assert!(!store.merge_and_save(&strings(&["new-feature"])).unwrap());
        assert_eq!(fs::read(&path).unwrap(), before);
        assert_eq!(store.tags(), strings(&["new-feature"]).as_slice());
    }
}
