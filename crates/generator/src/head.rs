//! Document head state and the metadata synchronizer.
//!
//! A page's `<head>` is modelled as a [`HeadState`]: the title plus an ordered
//! list of `<meta>`/`<link>` tags addressed by [`TagKey`]. [`HeadState::sync`]
//! creates or updates the tracked tags from a [`SeoConfig`] and is idempotent.

use appshelf_core::SeoConfig;
use std::collections::HashMap;
use std::fmt::Write as _;

pub const DEFAULT_OG_TYPE: &str = "website";
pub const DEFAULT_TWITTER_CARD: &str = "summary_large_image";

/// Identity of a tracked head tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey {
    /// `<meta name="..." content="...">`
    Name(&'static str),
    /// `<meta property="..." content="...">`
    Property(&'static str),
    /// `<link rel="..." href="...">`
    Link(&'static str),
}

impl TagKey {
    pub const DESCRIPTION: TagKey = TagKey::Name("description");
    pub const KEYWORDS: TagKey = TagKey::Name("keywords");
    pub const OG_TITLE: TagKey = TagKey::Property("og:title");
    pub const OG_DESCRIPTION: TagKey = TagKey::Property("og:description");
    pub const OG_TYPE: TagKey = TagKey::Property("og:type");
    pub const OG_IMAGE: TagKey = TagKey::Property("og:image");
    pub const OG_URL: TagKey = TagKey::Property("og:url");
    pub const TWITTER_CARD: TagKey = TagKey::Name("twitter:card");
    pub const TWITTER_TITLE: TagKey = TagKey::Name("twitter:title");
    pub const TWITTER_DESCRIPTION: TagKey = TagKey::Name("twitter:description");
    pub const CANONICAL: TagKey = TagKey::Link("canonical");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTag {
    pub key: TagKey,
    pub value: String,
}

impl HeadTag {
    fn write_html(&self, out: &mut String) {
        let value = html_escape(&self.value);
        // Writing to a String cannot fail
        let _ = match self.key {
            TagKey::Name(name) => write!(out, r#"<meta name="{}" content="{}">"#, name, value),
            TagKey::Property(property) => {
                write!(out, r#"<meta property="{}" content="{}">"#, property, value)
            }
            TagKey::Link(rel) => write!(out, r#"<link rel="{}" href="{}">"#, rel, value),
        };
    }
}

/// Scroll offset of the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollPosition {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadState {
    title: Option<String>,
    tags: Vec<HeadTag>,
    index: HashMap<TagKey, usize>,
    scroll: ScrollPosition,
}

impl HeadState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Site-wide starting point every page head is derived from.
    pub fn with_default_image(image: Option<&str>) -> Self {
        let mut head = Self::new();
        if let Some(image) = image {
            head.upsert(TagKey::OG_IMAGE, image);
        }
        head
    }

    /// Copy of `self` synced with a page's config.
    pub fn for_page(&self, config: &SeoConfig) -> Self {
        let mut head = self.clone();
        head.sync(config);
        head
    }

    /// Align the head with `config`.
    ///
    /// Tags whose key is already present are updated in place, others are
    /// appended. Optional tags missing or empty in `config` (`og:image`,
    /// `og:url`, `canonical`) keep whatever value they had; other empty
    /// overrides fall back to their defaults. Scroll resets to the origin.
    pub fn sync(&mut self, config: &SeoConfig) {
        self.title = Some(config.title.clone());

        self.upsert(TagKey::DESCRIPTION, &config.description);
        self.upsert(TagKey::KEYWORDS, &config.keywords);

        let og_title = present(&config.og_title).unwrap_or(&config.title);
        let og_description = present(&config.og_description).unwrap_or(&config.description);
        self.upsert(TagKey::OG_TITLE, og_title);
        self.upsert(TagKey::OG_DESCRIPTION, og_description);
        self.upsert(
            TagKey::OG_TYPE,
            present(&config.og_type).unwrap_or(DEFAULT_OG_TYPE),
        );
        if let Some(image) = present(&config.og_image) {
            self.upsert(TagKey::OG_IMAGE, image);
        }
        if let Some(url) = present(&config.og_url) {
            self.upsert(TagKey::OG_URL, url);
        }

        self.upsert(
            TagKey::TWITTER_CARD,
            present(&config.twitter_card).unwrap_or(DEFAULT_TWITTER_CARD),
        );
        self.upsert(
            TagKey::TWITTER_TITLE,
            present(&config.twitter_title).unwrap_or(og_title),
        );
        self.upsert(
            TagKey::TWITTER_DESCRIPTION,
            present(&config.twitter_description).unwrap_or(og_description),
        );

        if let Some(canonical) = present(&config.canonical) {
            self.upsert(TagKey::CANONICAL, canonical);
        }

        self.scroll = ScrollPosition::default();
    }

    fn upsert(&mut self, key: TagKey, value: &str) {
        match self.index.get(&key) {
            Some(&i) => {
                if self.tags[i].value != value {
                    self.tags[i].value = value.to_string();
                }
            }
            None => {
                self.index.insert(key, self.tags.len());
                self.tags.push(HeadTag {
                    key,
                    value: value.to_string(),
                });
            }
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn get(&self, key: TagKey) -> Option<&str> {
        self.index.get(&key).map(|&i| self.tags[i].value.as_str())
    }

    pub fn tags(&self) -> &[HeadTag] {
        &self.tags
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    pub fn scroll_to(&mut self, x: u32, y: u32) {
        self.scroll = ScrollPosition { x, y };
    }

    /// Render the title and tracked tags, one element per line, in insertion order.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(out, "<title>{}</title>", html_escape(title));
        }
        for tag in &self.tags {
            tag.write_html(&mut out);
            out.push('\n');
        }
        out
    }
}

/// An optional field counts as absent when it is empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// HTML-escape a string for text and attribute positions
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn minimal() -> SeoConfig {
        SeoConfig::new("X", "Y", "Z")
    }

    #[test]
    fn test_html_escape_basic_characters() {
        assert_eq!(html_escape("&"), "&amp;");
        assert_eq!(html_escape("<>"), "&lt;&gt;");
        assert_eq!(html_escape(r#""'"#), "&quot;&#x27;");
        assert_eq!(html_escape("DropDock — Files"), "DropDock — Files");
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_html_escape_attribute_breakout() {
        assert_eq!(
            html_escape(r#"" onload="alert(1)"#),
            "&quot; onload=&quot;alert(1)"
        );
    }

    #[test]
    fn test_sync_on_empty_head() {
        let mut head = HeadState::new();
        head.sync(&minimal());

        assert_eq!(head.title(), Some("X"));
        assert_eq!(head.get(TagKey::DESCRIPTION), Some("Y"));
        assert_eq!(head.get(TagKey::KEYWORDS), Some("Z"));
        assert_eq!(head.get(TagKey::OG_TYPE), Some("website"));

        let html = head.to_html();
        assert!(html.contains("<title>X</title>"));
        assert!(html.contains(r#"<meta name="description" content="Y">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
    }

    #[test]
    fn test_default_derivation() {
        let mut head = HeadState::new();
        head.sync(&minimal());

        assert_eq!(head.get(TagKey::OG_TITLE), Some("X"));
        assert_eq!(head.get(TagKey::OG_DESCRIPTION), Some("Y"));
        assert_eq!(head.get(TagKey::OG_TYPE), Some("website"));
        assert_eq!(head.get(TagKey::TWITTER_CARD), Some("summary_large_image"));
        assert_eq!(head.get(TagKey::TWITTER_TITLE), Some("X"));
        assert_eq!(head.get(TagKey::TWITTER_DESCRIPTION), Some("Y"));
        assert_eq!(head.get(TagKey::OG_IMAGE), None);
        assert_eq!(head.get(TagKey::OG_URL), None);
        assert_eq!(head.get(TagKey::CANONICAL), None);
    }

    #[test]
    fn test_twitter_fields_follow_og_overrides() {
        let config = SeoConfig {
            og_title: Some("OG title".into()),
            og_description: Some("OG description".into()),
            ..minimal()
        };
        let mut head = HeadState::new();
        head.sync(&config);

        assert_eq!(head.get(TagKey::TWITTER_TITLE), Some("OG title"));
        assert_eq!(head.get(TagKey::TWITTER_DESCRIPTION), Some("OG description"));

        let config = SeoConfig {
            twitter_title: Some("Tweet title".into()),
            twitter_card: Some("summary".into()),
            ..config
        };
        head.sync(&config);
        assert_eq!(head.get(TagKey::TWITTER_TITLE), Some("Tweet title"));
        assert_eq!(head.get(TagKey::TWITTER_CARD), Some("summary"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let config = SeoConfig {
            og_image: Some("https://cdn.example.com/og.png".into()),
            og_url: Some("https://apps.example.com/dropdock".into()),
            canonical: Some("https://apps.example.com/dropdock".into()),
            ..minimal()
        };

        let mut once = HeadState::new();
        once.sync(&config);
        let mut twice = HeadState::new();
        twice.sync(&config);
        twice.sync(&config);

        assert_eq!(once, twice);
        assert_eq!(twice.tags().len(), 11);
        assert_eq!(once.to_html(), twice.to_html());
    }

    #[test]
    fn test_sparse_overwrite_keeps_previous_image() {
        let a = SeoConfig {
            og_image: Some("https://cdn.example.com/a.png".into()),
            canonical: Some("https://apps.example.com/a".into()),
            ..SeoConfig::new("A", "About A", "a")
        };
        let b = SeoConfig::new("B", "About B", "b");

        let mut head = HeadState::new();
        head.sync(&a);
        head.sync(&b);

        assert_eq!(head.title(), Some("B"));
        assert_eq!(head.get(TagKey::DESCRIPTION), Some("About B"));
        assert_eq!(head.get(TagKey::OG_IMAGE), Some("https://cdn.example.com/a.png"));
        assert_eq!(head.get(TagKey::CANONICAL), Some("https://apps.example.com/a"));
    }

    #[test]
    fn test_update_in_place_preserves_order() {
        let mut head = HeadState::new();
        head.sync(&minimal());
        let keys: Vec<TagKey> = head.tags().iter().map(|t| t.key).collect();

        head.sync(&SeoConfig::new("X2", "Y2", "Z2"));
        let keys_after: Vec<TagKey> = head.tags().iter().map(|t| t.key).collect();

        assert_eq!(keys, keys_after);
        assert_eq!(head.tags()[0].value, "Y2");
    }

    #[test]
    fn test_sync_resets_scroll() {
        let mut head = HeadState::new();
        head.scroll_to(0, 1200);
        head.sync(&minimal());
        assert_eq!(head.scroll_position(), ScrollPosition { x: 0, y: 0 });
    }

    #[test]
    fn test_for_page_starts_from_base() {
        let base = HeadState::with_default_image(Some("https://cdn.example.com/site.png"));
        let with_image = base.for_page(&SeoConfig {
            og_image: Some("https://cdn.example.com/app.png".into()),
            ..minimal()
        });
        let without_image = base.for_page(&minimal());

        assert_eq!(
            with_image.get(TagKey::OG_IMAGE),
            Some("https://cdn.example.com/app.png")
        );
        assert_eq!(
            without_image.get(TagKey::OG_IMAGE),
            Some("https://cdn.example.com/site.png")
        );
        assert_eq!(base.title(), None);
    }

    #[test]
    fn test_to_html_escapes_values() {
        let mut head = HeadState::new();
        head.sync(&SeoConfig::new("Tom & Jerry", r#"say "hi""#, "<b>"));
        let html = head.to_html();
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains(r#"content="say &quot;hi&quot;""#));
        assert!(html.contains(r#"<meta name="keywords" content="&lt;b&gt;">"#));
    }

    #[test]
    fn test_empty_overrides_fall_back_to_defaults() {
        let mut head = HeadState::new();
        head.sync(&SeoConfig {
            og_title: Some(String::new()),
            og_description: Some(String::new()),
            og_type: Some(String::new()),
            twitter_card: Some(String::new()),
            twitter_title: Some(String::new()),
            ..minimal()
        });

        assert_eq!(head.get(TagKey::OG_TITLE), Some("X"));
        assert_eq!(head.get(TagKey::OG_DESCRIPTION), Some("Y"));
        assert_eq!(head.get(TagKey::OG_TYPE), Some(DEFAULT_OG_TYPE));
        assert_eq!(head.get(TagKey::TWITTER_CARD), Some(DEFAULT_TWITTER_CARD));
        assert_eq!(head.get(TagKey::TWITTER_TITLE), Some("X"));
        assert_eq!(head.get(TagKey::TWITTER_DESCRIPTION), Some("Y"));
    }

    #[test]
    fn test_empty_optional_tags_are_skipped() {
        let empty = SeoConfig {
            og_image: Some(String::new()),
            og_url: Some(String::new()),
            canonical: Some(String::new()),
            ..minimal()
        };

        let mut head = HeadState::new();
        head.sync(&empty);
        assert_eq!(head.get(TagKey::OG_IMAGE), None);
        assert_eq!(head.get(TagKey::OG_URL), None);
        assert_eq!(head.get(TagKey::CANONICAL), None);
        assert!(!head.to_html().contains(r#"content="""#));

        // An empty value does not clear what an earlier sync set
        let base = HeadState::with_default_image(Some("https://cdn.example.com/site.png"));
        assert_eq!(
            base.for_page(&empty).get(TagKey::OG_IMAGE),
            Some("https://cdn.example.com/site.png")
        );
    }
}
