use lazy_static::lazy_static;
use regex::Regex;

use crate::content::{FieldValue, Frontmatter};

const DELIMITER: &str = "---";

/// Extracts the `---` delimited header at the top of a post.
///
/// Returns `None` when the text does not start with a `---` line or when the
/// header is never closed. The grammar is deliberately small:
///
/// ```text
/// key: value
/// key: 'quoted value'
/// key: [one, 'two', "three"]
/// key:
///   - item
/// ```
///
/// Anything else inside the header is ignored.
pub fn parse_frontmatter(text: &str) -> Option<Frontmatter> {
    let mut lines = text.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));

    if lines.next()? != DELIMITER {
        return None;
    }

    let mut header: Vec<&str> = vec![];
    let mut closed = false;
    for line in lines {
        if line == DELIMITER {
            closed = true;
            break;
        }
        header.push(line);
    }

    if !closed {
        return None;
    }

    let mut fm = Frontmatter::default();
    let mut current_key: Option<String> = None;

    for line in header {
        if let Some((key, val)) = extract_key_val(line) {
            fm.set(key, parse_value(val));
            current_key = Some(key.to_string());
        } else if let Some(item) = extract_bullet(line) {
            // Bullets before any key have nowhere to go
            if let Some(ref key) = current_key {
                let item = unquote(item.trim());
                if !item.is_empty() {
                    fm.push_item(key, item);
                }
            }
        }
    }

    Some(fm)
}

fn extract_key_val(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref KEY_VAL_REGEX: Regex = Regex::new(r"^(?P<key>[A-Za-z_][A-Za-z0-9_-]*):(?:\s+(?P<value>.*))?\s*$").unwrap();
    }

    KEY_VAL_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key")?.as_str();
        let val = cap.name("value").map(|v| v.as_str()).unwrap_or("");
        Some((key, val))
    })
}

fn extract_bullet(line: &str) -> Option<&str> {
    lazy_static! {
        static ref BULLET_REGEX: Regex = Regex::new(r"^\s*-\s+(?P<item>.*)$").unwrap();
    }

    BULLET_REGEX
        .captures(line)
        .and_then(|cap| cap.name("item").map(|v| v.as_str()))
}

fn parse_value(raw: &str) -> FieldValue {
    let raw = raw.trim();

    if raw.starts_with('[') && raw.ends_with(']') {
        let inner = &raw[1..raw.len() - 1];
        let items = inner
            .split(',')
            .map(|s| unquote(s.trim()))
            .filter(|s| !s.is_empty())
            .collect();
        return FieldValue::List(items);
    }

    FieldValue::Scalar(unquote(raw))
}

/// Drops the surrounding quotes. Inside single quotes `''` stands for `'`.
fn unquote(s: &str) -> String {
    if s.len() >= 2 && s.starts_with('\'') && s.ends_with('\'') {
        return s[1..s.len() - 1].replace("''", "'");
    }
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        return s[1..s.len() - 1].to_string();
    }
    s.to_string()
}
