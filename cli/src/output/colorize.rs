use chrono::{DateTime, Utc};
use linknova::listing::Grouping;
use linknova::models::{Bookmark, Category, Topic};
use linknova::utils::{format_relative_time, truncate_text};
use owo_colors::{OwoColorize, Style};

/// Terminal rendering of one record; plain text when `color` is false
pub trait Render {
    /// Key used when a list of these is wrapped in a TOML table
    const COLLECTION: &'static str;

    fn render(&self, color: bool) -> String;
}

/// Characters of bookmark content shown under the URL
const CONTENT_PREVIEW: usize = 160;

fn paint(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

fn age_line(created: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> Option<String> {
    let now = Utc::now();
    match (created, updated) {
        (Some(c), Some(u)) if u > c => Some(format!(
            "created {}, updated {}",
            format_relative_time(c, now),
            format_relative_time(u, now)
        )),
        (Some(c), _) => Some(format!("created {}", format_relative_time(c, now))),
        (None, Some(u)) => Some(format!("updated {}", format_relative_time(u, now))),
        (None, None) => None,
    }
}

fn render_group<T: Grouping>(
    item: &T,
    public: bool,
    related_marker: &str,
    color: bool,
) -> String {
    let mut s = String::new();
    let name = paint(item.name(), Style::new().bright_blue(), color);
    s.push_str(&name);
    if item.label() != item.name() {
        let label = paint(item.label(), Style::new().bold().green(), color);
        s.push_str(&format!(" {}", label));
    }
    let mut tags = vec![format!("priority {}", item.priority())];
    if !public {
        tags.push("private".to_string());
    }
    let tags = format!("[{}]", tags.join(", "));
    s.push_str(&format!(" {}\n", paint(&tags, Style::new().dimmed(), color)));

    let padding = 2;
    if let Some(desc) = item.description().filter(|d| !d.trim().is_empty()) {
        s.push_str(&format!(
            "{:>padding$} {}\n",
            paint("+", Style::new().red(), color),
            desc
        ));
    }
    if !item.related().is_empty() {
        s.push_str(&format!(
            "{:>padding$} {}\n",
            paint(related_marker, Style::new().red(), color),
            paint(&item.related().join(", "), Style::new().blue(), color)
        ));
    }
    if let Some(age) = age_line(item.created_on(), item.updated_on()) {
        s.push_str(&format!(
            "{:>padding$} {}\n",
            paint("~", Style::new().red(), color),
            paint(&age, Style::new().dimmed(), color)
        ));
    }
    s
}

impl Render for Topic {
    const COLLECTION: &'static str = "topics";

    fn render(&self, color: bool) -> String {
        render_group(self, self.public, "#", color)
    }
}

impl Render for Category {
    const COLLECTION: &'static str = "categories";

    fn render(&self, color: bool) -> String {
        render_group(self, self.public, "@", color)
    }
}

impl Render for Bookmark {
    const COLLECTION: &'static str = "bookmarks";

    fn render(&self, color: bool) -> String {
        let mut s = String::new();
        let id = self.id.to_string();
        s.push_str(&format!(
            "{}. {} {}\n",
            paint(&id, Style::new().bright_blue(), color),
            paint(self.label(), Style::new().bold().green(), color),
            paint(&format!("[{}]", self.status), Style::new().dimmed(), color)
        ));
        let padding = id.len() + 3;
        // padding for alignment
        s.push_str(&format!(
            "{:>padding$} {}\n",
            paint(">", Style::new().red(), color),
            paint(&self.url, Style::new().yellow(), color)
        ));

        if let Some(content) = self.content.as_deref().filter(|c| !c.trim().is_empty()) {
            s.push_str(&format!(
                "{:>padding$} {}\n",
                paint("+", Style::new().red(), color),
                truncate_text(content.trim(), CONTENT_PREVIEW)
            ));
        }

        if !self.categories.is_empty() {
            s.push_str(&format!(
                "{:>padding$} {}\n",
                paint("#", Style::new().red(), color),
                paint(&self.categories.join(", "), Style::new().blue(), color)
            ));
        }

        if let Some(age) = age_line(self.created_on, self.updated_on) {
            s.push_str(&format!(
                "{:>padding$} {}\n",
                paint("~", Style::new().red(), color),
                paint(&age, Style::new().dimmed(), color)
            ));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use linknova::models::BookmarkStatus;

    #[test]
    fn test_bookmark_plain_layout() {
        let mut bookmark = Bookmark::new(7, "https://www.rust-lang.org");
        bookmark.title = Some("Rust".to_string());
        bookmark.content = Some("The book".to_string());
        bookmark.status = BookmarkStatus::Read;
        bookmark.categories = vec!["rust".to_string(), "books".to_string()];

        let out = bookmark.render(false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "7. Rust [read]");
        assert_eq!(lines[1], "   > https://www.rust-lang.org");
        assert_eq!(lines[2], "   + The book");
        assert_eq!(lines[3], "   # rust, books");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_bookmark_long_content_is_cut() {
        let mut bookmark = Bookmark::new(3, "https://example.com");
        bookmark.content = Some("é".repeat(CONTENT_PREVIEW + 40));

        let out = bookmark.render(false);
        let content_line = out.lines().nth(2).unwrap();
        let expected = format!("   + {}...", "é".repeat(CONTENT_PREVIEW));
        assert_eq!(content_line, expected);
    }

    #[test]
    fn test_bookmark_without_title_uses_url() {
        let bookmark = Bookmark::new(1, "https://example.com");
        let out = bookmark.render(false);
        assert!(out.starts_with("1. https://example.com [unread]"));
        assert!(!out.lines().any(|l| l.trim_start().starts_with('#')));
    }

    #[test]
    fn test_bookmark_colored_has_escapes() {
        let bookmark = Bookmark::new(1, "https://example.com");
        assert!(bookmark.render(true).contains('\u{1b}'));
    }

    #[test]
    fn test_topic_plain_layout() {
        let mut topic = Topic::new("rust");
        topic.display_name = Some("Rust Language".to_string());
        topic.description = Some("Systems programming".to_string());
        topic.priority = 2;
        topic.public = false;
        topic.categories = vec!["async".to_string(), "web".to_string()];

        let out = topic.render(false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "rust Rust Language [priority 2, private]");
        assert_eq!(lines[1], " + Systems programming");
        assert_eq!(lines[2], " # async, web");
    }

    #[test]
    fn test_category_shows_topics_and_age() {
        let mut category = Category::new("web");
        category.public = true;
        category.topics = vec!["rust".to_string()];
        category.created_on = Some(Utc::now() - Duration::days(3));

        let out = category.render(false);
        assert!(out.starts_with("web [priority 0]\n"));
        assert!(out.contains(" @ rust"));
        assert!(out.contains("created 3 days ago"));
    }
}
