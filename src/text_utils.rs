use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
    static ref STRICT_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref YEAR_MONTH_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}$").unwrap();
}

// Shapes accepted by parse_loose_date, tried in order
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATE_TIME_FORMATS: [&str; 11] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
];

/// Lowercase kebab-case: `my-post-2`
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Turns a free-text title into a kebab-case slug.
/// Accented characters are transliterated first, so `Ábaco` becomes `abaco`.
/// The result is either empty or matches [`is_valid_slug`].
pub fn slugify(title: &str) -> String {
    let ascii = unidecode::unidecode(title).to_ascii_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Date parsing used by the validator. Accepts the usual shapes a browser
/// `Date` understands: ISO dates and date-times, RFC 2822 and
/// `Mar 5 2025` style dates.
pub fn parse_loose_date(buf: &str) -> Result<NaiveDate, String> {
    let buf = buf.trim();
    if buf.is_empty() {
        return Err("Empty date".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(buf) {
        return Ok(dt.date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(buf) {
        return Ok(dt.date_naive());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(buf, fmt) {
            return Ok(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(buf, fmt) {
            return Ok(d);
        }
    }

    // `2025-03` is the first of the month
    if YEAR_MONTH_REGEX.is_match(buf) {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{}-01", buf), "%Y-%m-%d") {
            return Ok(d);
        }
    }

    Err(format!("Unable to parse date {}", buf))
}

/// Date parsing used by the scaffolder: only a literal `YYYY-MM-DD` that is
/// also a real calendar day.
pub fn parse_strict_date(buf: &str) -> Result<NaiveDate, String> {
    if !STRICT_DATE_REGEX.is_match(buf) {
        return Err(format!("Date must have the form YYYY-MM-DD, got '{}'", buf));
    }

    NaiveDate::parse_from_str(buf, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", buf, e))
}

/// `Mar 5 2025`
pub fn format_pub_date(date: &NaiveDate) -> String {
    date.format("%b %-d %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("my-article"));
        assert!(is_valid_slug("swift"));
        assert!(is_valid_slug("rust-2024-edition"));
        assert!(is_valid_slug("42"));

        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Bad_Slug"));
        assert!(!is_valid_slug("My-Article"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("with space"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Article"), "my-article");
        assert_eq!(slugify("  Hello,   World!  "), "hello-world");
        assert_eq!(slugify("Post title of mine Ábaco - dir2"), "post-title-of-mine-abaco-dir2");
        assert_eq!(slugify("C++ & Rust: a love story?"), "c-rust-a-love-story");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_output_is_valid_and_idempotent() {
        let titles = [
            "My Article",
            "¿Qué es Rust?",
            "--- weird --- input ---",
            "2025: a year in review",
            "UPPER lower MiXeD",
            "tabs\tand\nnewlines",
        ];

        for title in titles {
            let slug = slugify(title);
            assert!(is_valid_slug(&slug), "slug '{}' from '{}'", slug, title);
            assert_eq!(slugify(&slug), slug);
        }
    }

    #[test]
    fn test_parse_loose_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();

        assert_eq!(parse_loose_date("2025-03-05").unwrap(), expected);
        assert_eq!(parse_loose_date("2025/03/05").unwrap(), expected);
        assert_eq!(parse_loose_date("03/05/2025").unwrap(), expected);
        assert_eq!(parse_loose_date("Mar 5 2025").unwrap(), expected);
        assert_eq!(parse_loose_date("Mar 05 2025").unwrap(), expected);
        assert_eq!(parse_loose_date("March 5, 2025").unwrap(), expected);
        assert_eq!(parse_loose_date("2025-03-05T10:42:32Z").unwrap(), expected);
        assert_eq!(parse_loose_date("2025-03-05T10:42:32+02:00").unwrap(), expected);
        assert_eq!(parse_loose_date("2025-03-05 10:42:32").unwrap(), expected);
        assert_eq!(parse_loose_date("Wed, 05 Mar 2025 10:42:32 +0000").unwrap(), expected);
        assert_eq!(parse_loose_date("2025-03-05T10:42:32.000Z").unwrap(), expected);
    }

    #[test]
    fn test_parse_loose_date_short_and_mixed_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();

        assert_eq!(parse_loose_date("2025-03-05T10:42").unwrap(), expected);
        assert_eq!(parse_loose_date("2025-03-05 10:42").unwrap(), expected);
        assert_eq!(parse_loose_date("5 March 2025").unwrap(), expected);
        assert_eq!(parse_loose_date("5 Mar 2025 10:42").unwrap(), expected);
        assert_eq!(parse_loose_date("Mar 5, 2025 10:00").unwrap(), expected);
        assert_eq!(parse_loose_date("Mar 5 2025 10:00:30").unwrap(), expected);
        assert_eq!(parse_loose_date("March 5, 2025 10:00").unwrap(), expected);
        assert_eq!(parse_loose_date("2025-03").unwrap(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(parse_loose_date("2025-13").is_err());
    }

    #[test]
    fn test_parse_loose_date_rejects() {
        assert!(parse_loose_date("").is_err());
        assert!(parse_loose_date("not a date").is_err());
        assert!(parse_loose_date("2025-02-30").is_err());
        assert!(parse_loose_date("2025-13-01").is_err());
    }

    #[test]
    fn test_parse_strict_date() {
        let date = parse_strict_date("2025-03-05").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());

        assert!(parse_strict_date("2025-3-5").is_err());
        assert!(parse_strict_date("Mar 5 2025").is_err());
        assert!(parse_strict_date("2025/03/05").is_err());
        assert!(parse_strict_date(" 2025-03-05").is_err());
        assert!(parse_strict_date("2025-02-30").is_err());
    }

    #[test]
    fn test_format_pub_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_pub_date(&date), "Mar 5 2025");

        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_pub_date(&date), "Dec 31 2024");
        assert_eq!(parse_loose_date(&format_pub_date(&date)).unwrap(), date);
    }
}
