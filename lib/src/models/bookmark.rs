use crate::error::{LinkNovaError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reading state of a bookmark, encoded on the wire as `UN` / `RD` / `AR`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BookmarkStatus {
    #[default]
    #[serde(rename = "UN")]
    Unread,
    #[serde(rename = "RD")]
    Read,
    #[serde(rename = "AR")]
    Archived,
    /// Any code this client doesn't know; never sent back to the server
    #[serde(rename = "??", other)]
    Unknown,
}

impl BookmarkStatus {
    pub fn code(self) -> &'static str {
        match self {
            BookmarkStatus::Unread => "UN",
            BookmarkStatus::Read => "RD",
            BookmarkStatus::Archived => "AR",
            BookmarkStatus::Unknown => "??",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookmarkStatus::Unread => "unread",
            BookmarkStatus::Read => "read",
            BookmarkStatus::Archived => "archived",
            BookmarkStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BookmarkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BookmarkStatus {
    type Err = LinkNovaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "un" | "unread" => Ok(BookmarkStatus::Unread),
            "rd" | "read" => Ok(BookmarkStatus::Read),
            "ar" | "archived" => Ok(BookmarkStatus::Archived),
            other => Err(LinkNovaError::InvalidInput(format!(
                "Unknown bookmark status '{}' (expected UN, RD or AR)",
                other
            ))),
        }
    }
}

/// A bookmark as returned by the `bm` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub status: BookmarkStatus,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Bookmark {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            title: None,
            content: None,
            referrer: None,
            status: BookmarkStatus::Unread,
            categories: Vec::new(),
            created_on: None,
            updated_on: None,
        }
    }

    /// Title for display, falling back to the URL
    pub fn label(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.url,
        }
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkCreate {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookmarkStatus>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookmarkStatus>,
}

impl BookmarkUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.referrer.is_none()
            && self.status.is_none()
    }
}
