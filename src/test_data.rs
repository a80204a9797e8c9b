#[cfg(test)]
pub const VALID_POST: &str = "---
title: 'My Article'
description: 'TODO'
pubDate: 'Mar 5 2025'
heroImage: './hero.png'
lang: 'en'
translationKey: 'my-article'
slug: 'my-article'
tags: ['swift', 'new-feature']
---

Write your article here.
";

#[cfg(test)]
pub const BULLET_TAGS_POST: &str = "---
title: Bullets
pubDate: 2024-02-27
slug: bullets
tags:
  - rust
  - cli
  - 'quoted'
---

# Bullets

Some body text.
";

#[cfg(test)]
pub const NO_FRONTMATTER_POST: &str = "# What I learned after 20+ years of software development

How to be a great software engineer?
";

/// Builds a post with the given frontmatter lines
#[cfg(test)]
pub fn post_with(lines: &[&str]) -> String {
    format!("---\n{}\n---\n\nBody.\n", lines.join("\n"))
}
