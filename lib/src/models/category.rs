use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category as returned by the `cat` endpoints; `name` is the immutable key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub public: bool,
    /// Topics this category belongs to
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            about: None,
            priority: 0,
            public: false,
            topics: Vec::new(),
            created_on: None,
            updated_on: None,
        }
    }

    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(d) if !d.trim().is_empty() => d,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub priority: i32,
    pub public: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
