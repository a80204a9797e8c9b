use std::fmt::Write;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::scaffold::PostOptions;
use crate::text_utils::format_pub_date;
use crate::Lang;

pub const HERO_FILE_NAME: &str = "hero.png";

// 1x1 transparent PNG
const HERO_PLACEHOLDER_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAAC0lEQVR4nGNgAAIAAAUAAXpeqz8AAAAASUVORK5CYII=";

pub fn hero_placeholder() -> Result<Vec<u8>> {
    Ok(STANDARD.decode(HERO_PLACEHOLDER_B64)?)
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn render_tags(tags: &[String]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| quote(t)).collect();
    format!("[{}]", quoted.join(", "))
}

fn render_header(options: &PostOptions, lang: Lang) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: {}", quote(&options.title));
    let _ = writeln!(&mut buf, "description: 'TODO'");
    let _ = writeln!(&mut buf, "pubDate: {}", quote(&format_pub_date(&options.date)));
    let _ = writeln!(&mut buf, "heroImage: {}", quote(&format!("./{}", HERO_FILE_NAME)));
    let _ = writeln!(&mut buf, "lang: {}", quote(lang.code()));
    let _ = writeln!(&mut buf, "translationKey: {}", quote(&options.translation_key));
    let _ = writeln!(&mut buf, "slug: {}", quote(&options.slug));
    let _ = writeln!(&mut buf, "tags: {}", render_tags(&options.tags));
    let _ = writeln!(&mut buf, "---");
    buf
}

/// Full stub file for one language: frontmatter, blank line, placeholder
pub fn render_post(options: &PostOptions, lang: Lang) -> String {
    let mut buf = render_header(options, lang);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "{}", lang.placeholder_body());
    buf
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::content::parse_frontmatter;
    use crate::test_data::VALID_POST;

    use super::*;

    fn options() -> PostOptions {
        PostOptions {
            title: "My Article".to_string(),
            slug: "my-article".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            translation_key: "my-article".to_string(),
            tags: vec!["swift".to_string(), "new-feature".to_string()],
            new_tags: vec!["new-feature".to_string()],
        }
    }

    #[test]
    fn test_render_en() {
        assert_eq!(render_post(&options(), Lang::En), VALID_POST);
    }

    #[test]
    fn test_render_es() {
        let post = render_post(&options(), Lang::Es);
        assert!(post.contains("\nlang: 'es'\n"));
        assert!(post.ends_with("---\n\nEscribe tu artículo aquí.\n"));

        let fm = parse_frontmatter(&post).unwrap();
        assert_eq!(fm.get_str("slug"), Some("my-article"));
        assert_eq!(fm.get_str("translationKey"), Some("my-article"));
    }

    #[test]
    fn test_render_no_tags_and_quotes() {
        let mut options = options();
        options.title = "It's here".to_string();
        options.tags = vec![];

        let post = render_post(&options, Lang::En);
        assert!(post.contains("\ntitle: 'It''s here'\n"));
        assert!(post.contains("\ntags: []\n"));

        let fm = parse_frontmatter(&post).unwrap();
        assert_eq!(fm.get_str("title"), Some("It's here"));
    }

    #[test]
    fn test_hero_placeholder_is_png() {
        let png = hero_placeholder().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png.len(), 68);
    }
}
