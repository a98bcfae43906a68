//! In-memory filtering and sorting for topic, category and bookmark lists.
//!
//! Every list view loads the full collection once and narrows it locally;
//! these helpers are that narrowing step. All sorts are stable, so items with
//! equal keys keep the order the server returned them in.

use crate::error::{LinkNovaError, Result};
use crate::models::{Bookmark, BookmarkStatus, Category, Topic};
use crate::utils::extract_domain;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = LinkNovaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(LinkNovaError::InvalidInput(format!(
                "Unknown sort order '{}' (expected asc or desc)",
                other
            ))),
        }
    }
}

impl SortOrder {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Sort keys shared by topics and categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupSort {
    #[default]
    Name,
    Priority,
    CreatedOn,
    UpdatedOn,
}

impl FromStr for GroupSort {
    type Err = LinkNovaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(GroupSort::Name),
            "priority" => Ok(GroupSort::Priority),
            "created" | "created_on" => Ok(GroupSort::CreatedOn),
            "updated" | "updated_on" => Ok(GroupSort::UpdatedOn),
            other => Err(LinkNovaError::InvalidInput(format!(
                "Unknown sort field '{}' (expected name, priority, created_on or updated_on)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookmarkSort {
    Title,
    Url,
    #[default]
    CreatedOn,
    UpdatedOn,
    Status,
}

impl BookmarkSort {
    /// Direction used when the user names a field but no order
    pub fn default_order(self) -> SortOrder {
        match self {
            BookmarkSort::CreatedOn | BookmarkSort::UpdatedOn => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

impl FromStr for BookmarkSort {
    type Err = LinkNovaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(BookmarkSort::Title),
            "url" => Ok(BookmarkSort::Url),
            "created" | "created_on" => Ok(BookmarkSort::CreatedOn),
            "updated" | "updated_on" => Ok(BookmarkSort::UpdatedOn),
            "status" => Ok(BookmarkSort::Status),
            other => Err(LinkNovaError::InvalidInput(format!(
                "Unknown sort field '{}' (expected title, url, created_on, updated_on or status)",
                other
            ))),
        }
    }
}

/// Common view over topics and categories for filtering and sorting
pub trait Grouping {
    fn name(&self) -> &str;
    fn label(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn priority(&self) -> i32;
    fn created_on(&self) -> Option<DateTime<Utc>>;
    fn updated_on(&self) -> Option<DateTime<Utc>>;
    /// Names on the other side of the topic/category relation
    fn related(&self) -> &[String];
}

impl Grouping for Topic {
    fn name(&self) -> &str {
        &self.name
    }
    fn label(&self) -> &str {
        Topic::label(self)
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn priority(&self) -> i32 {
        self.priority
    }
    fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }
    fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.updated_on
    }
    fn related(&self) -> &[String] {
        &self.categories
    }
}

impl Grouping for Category {
    fn name(&self) -> &str {
        &self.name
    }
    fn label(&self) -> &str {
        Category::label(self)
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn priority(&self) -> i32 {
        self.priority
    }
    fn created_on(&self) -> Option<DateTime<Utc>> {
        self.created_on
    }
    fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.updated_on
    }
    fn related(&self) -> &[String] {
        &self.topics
    }
}

fn normalize(query: &str) -> Option<String> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        None
    } else {
        Some(q)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn group_matches<T: Grouping>(item: &T, needle: &str) -> bool {
    contains_ci(item.name(), needle)
        || contains_ci(item.label(), needle)
        || item.description().is_some_and(|d| contains_ci(d, needle))
        || item.related().iter().any(|r| contains_ci(r, needle))
}

/// Items whose name, display name, description or related names contain `query`
pub fn filter_groups<T: Grouping + Clone>(items: &[T], query: &str) -> Vec<T> {
    match normalize(query) {
        None => items.to_vec(),
        Some(needle) => items
            .iter()
            .filter(|item| group_matches(*item, &needle))
            .cloned()
            .collect(),
    }
}

pub fn filter_topics(topics: &[Topic], query: &str) -> Vec<Topic> {
    filter_groups(topics, query)
}

pub fn filter_categories(categories: &[Category], query: &str) -> Vec<Category> {
    filter_groups(categories, query)
}

pub fn sort_groups<T: Grouping>(items: &mut [T], field: GroupSort, order: SortOrder) {
    items.sort_by(|a, b| {
        let ord = match field {
            GroupSort::Name => a.label().to_lowercase().cmp(&b.label().to_lowercase()),
            GroupSort::Priority => a.priority().cmp(&b.priority()),
            GroupSort::CreatedOn => a.created_on().cmp(&b.created_on()),
            GroupSort::UpdatedOn => a.updated_on().cmp(&b.updated_on()),
        };
        order.apply(ord)
    });
}

/// Criteria for narrowing a bookmark list; unset fields don't filter
#[derive(Debug, Clone, Default)]
pub struct BookmarkFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub status: Option<BookmarkStatus>,
    /// Categories of the selected topic; a bookmark must carry one of them
    pub topic_categories: Option<Vec<String>>,
}

pub fn in_any_category(bookmark: &Bookmark, categories: &[String]) -> bool {
    bookmark.categories.iter().any(|c| categories.contains(c))
}

fn bookmark_matches(bookmark: &Bookmark, needle: &str) -> bool {
    bookmark.title.as_deref().is_some_and(|t| contains_ci(t, needle))
        || contains_ci(&bookmark.url, needle)
        || bookmark.content.as_deref().is_some_and(|c| contains_ci(c, needle))
        || contains_ci(&extract_domain(&bookmark.url), needle)
        || bookmark.categories.iter().any(|c| contains_ci(c, needle))
}

pub fn filter_bookmarks(bookmarks: &[Bookmark], filter: &BookmarkFilter) -> Vec<Bookmark> {
    let needle = filter.query.as_deref().and_then(normalize);
    let category = filter.category.as_deref().filter(|c| !c.is_empty());

    bookmarks
        .iter()
        .filter(|b| needle.as_deref().is_none_or(|n| bookmark_matches(b, n)))
        .filter(|b| category.is_none_or(|c| b.has_category(c)))
        .filter(|b| filter.status.is_none_or(|s| b.status == s))
        .filter(|b| {
            filter
                .topic_categories
                .as_deref()
                .is_none_or(|cats| in_any_category(b, cats))
        })
        .cloned()
        .collect()
}

pub fn sort_bookmarks(bookmarks: &mut [Bookmark], field: BookmarkSort, order: SortOrder) {
    bookmarks.sort_by(|a, b| {
        let ord = match field {
            BookmarkSort::Title => a.label().to_lowercase().cmp(&b.label().to_lowercase()),
            BookmarkSort::Url => a.url.to_lowercase().cmp(&b.url.to_lowercase()),
            BookmarkSort::CreatedOn => a.created_on.cmp(&b.created_on),
            BookmarkSort::UpdatedOn => a.updated_on.cmp(&b.updated_on),
            BookmarkSort::Status => a.status.cmp(&b.status),
        };
        order.apply(ord)
    });
}

/// Keep the first `limit` items
pub fn apply_limit<T>(items: &mut Vec<T>, limit: Option<usize>) {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn topic(name: &str, display: Option<&str>, priority: i32, day: u32) -> Topic {
        let mut t = Topic::new(name);
        t.display_name = display.map(|d| d.to_string());
        t.priority = priority;
        t.created_on = Some(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap());
        t
    }

    fn bookmark(id: i64, url: &str, title: Option<&str>, cats: &[&str], day: u32) -> Bookmark {
        let mut b = Bookmark::new(id, url);
        b.title = title.map(|t| t.to_string());
        b.categories = cats.iter().map(|c| c.to_string()).collect();
        b.created_on = Some(Utc.with_ymd_and_hms(2024, 2, day, 12, 0, 0).unwrap());
        b
    }

    fn sample_bookmarks() -> Vec<Bookmark> {
        let mut read = bookmark(2, "https://go.dev/doc", Some("Go docs"), &["go"], 3);
        read.status = BookmarkStatus::Read;
        let mut archived = bookmark(3, "https://news.ycombinator.com", None, &[], 2);
        archived.status = BookmarkStatus::Archived;
        archived.content = Some("Hacker News front page".to_string());
        vec![
            bookmark(1, "https://doc.rust-lang.org/book", Some("The Rust Book"), &["rust", "books"], 1),
            read,
            archived,
        ]
    }

    #[rstest]
    #[case("name", GroupSort::Name)]
    #[case("Priority", GroupSort::Priority)]
    #[case("created_on", GroupSort::CreatedOn)]
    #[case("updated", GroupSort::UpdatedOn)]
    fn test_group_sort_from_str(#[case] input: &str, #[case] expected: GroupSort) {
        assert_eq!(input.parse::<GroupSort>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_sort_values() {
        assert!("size".parse::<GroupSort>().is_err());
        assert!("priority".parse::<BookmarkSort>().is_err());
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[rstest]
    #[case("", 3)]
    #[case("   ", 3)]
    #[case("RUST", 1)]
    #[case("front page", 1)]
    #[case("ycombinator", 1)]
    #[case("books", 1)]
    #[case("nothing-matches", 0)]
    fn test_filter_bookmarks_query(#[case] query: &str, #[case] expected: usize) {
        let filter = BookmarkFilter {
            query: Some(query.to_string()),
            ..Default::default()
        };
        assert_eq!(filter_bookmarks(&sample_bookmarks(), &filter).len(), expected);
    }

    #[test]
    fn test_filter_bookmarks_combined() {
        let all = sample_bookmarks();

        let by_status = BookmarkFilter {
            status: Some(BookmarkStatus::Read),
            ..Default::default()
        };
        assert_eq!(filter_bookmarks(&all, &by_status)[0].id, 2);

        let by_category = BookmarkFilter {
            category: Some("rust".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_bookmarks(&all, &by_category)[0].id, 1);

        let by_topic = BookmarkFilter {
            topic_categories: Some(vec!["go".to_string(), "python".to_string()]),
            query: Some("docs".to_string()),
            ..Default::default()
        };
        let found = filter_bookmarks(&all, &by_topic);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);

        let empty_topic = BookmarkFilter {
            topic_categories: Some(vec![]),
            ..Default::default()
        };
        assert!(filter_bookmarks(&all, &empty_topic).is_empty());
    }

    #[test]
    fn test_filter_topics_matches_categories() {
        let mut dev = topic("dev", Some("Development"), 1, 1);
        dev.categories = vec!["Rust".to_string()];
        let topics = vec![dev, topic("food", None, 2, 2)];

        assert_eq!(filter_topics(&topics, "rust").len(), 1);
        assert_eq!(filter_topics(&topics, "develop").len(), 1);
        assert_eq!(filter_topics(&topics, "FOOD")[0].name, "food");
    }

    #[test]
    fn test_filter_categories_matches_topics() {
        let mut cat = Category::new("rust");
        cat.topics = vec!["programming".to_string()];
        let cats = vec![cat, Category::new("baking")];

        let found = filter_categories(&cats, "program");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "rust");
    }

    #[test]
    fn test_sort_groups_by_name_uses_display_name() {
        let mut topics = vec![
            topic("zeta", Some("alpha"), 0, 1),
            topic("beta", None, 0, 2),
            topic("Alpha2", None, 0, 3),
        ];
        sort_groups(&mut topics, GroupSort::Name, SortOrder::Asc);
        let names: Vec<_> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "Alpha2", "beta"]);
    }

    #[test]
    fn test_sort_groups_priority_desc_is_stable() {
        let mut topics = vec![
            topic("a", None, 1, 1),
            topic("b", None, 5, 2),
            topic("c", None, 1, 3),
            topic("d", None, 5, 4),
        ];
        sort_groups(&mut topics, GroupSort::Priority, SortOrder::Desc);
        let names: Vec<_> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_sort_groups_missing_dates_first_when_ascending() {
        let mut undated = topic("undated", None, 0, 1);
        undated.created_on = None;
        let mut topics = vec![topic("late", None, 0, 9), undated, topic("early", None, 0, 2)];
        sort_groups(&mut topics, GroupSort::CreatedOn, SortOrder::Asc);
        let names: Vec<_> = topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["undated", "early", "late"]);
    }

    #[rstest]
    #[case(BookmarkSort::CreatedOn, SortOrder::Desc, vec![2, 3, 1])]
    #[case(BookmarkSort::CreatedOn, SortOrder::Asc, vec![1, 3, 2])]
    #[case(BookmarkSort::Title, SortOrder::Asc, vec![2, 3, 1])]
    #[case(BookmarkSort::Url, SortOrder::Asc, vec![1, 2, 3])]
    #[case(BookmarkSort::Status, SortOrder::Desc, vec![3, 2, 1])]
    fn test_sort_bookmarks(
        #[case] field: BookmarkSort,
        #[case] order: SortOrder,
        #[case] expected: Vec<i64>,
    ) {
        let mut all = sample_bookmarks();
        sort_bookmarks(&mut all, field, order);
        let ids: Vec<i64> = all.iter().map(|b| b.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_apply_limit() {
        let mut items = vec![1, 2, 3, 4];
        apply_limit(&mut items, Some(2));
        assert_eq!(items, vec![1, 2]);
        apply_limit(&mut items, None);
        assert_eq!(items, vec![1, 2]);
        apply_limit(&mut items, Some(10));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_bookmark_sort_default_order() {
        assert_eq!(BookmarkSort::default(), BookmarkSort::CreatedOn);
        assert_eq!(BookmarkSort::CreatedOn.default_order(), SortOrder::Desc);
        assert_eq!(BookmarkSort::Title.default_order(), SortOrder::Asc);
    }
}
