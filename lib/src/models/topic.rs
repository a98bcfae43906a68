use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A topic groups categories; `name` is the immutable key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
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
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            description: None,
            about: None,
            priority: 0,
            public: false,
            categories: Vec::new(),
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
pub struct TopicCreate {
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
pub struct TopicUpdate {
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

impl TopicUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_topic() {
        let topic: Topic = serde_json::from_value(json!({
            "name": "programming",
            "display_name": "Programming",
            "priority": 5,
            "public": true,
            "categories": ["rust", "go"],
            "created_on": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(topic.label(), "Programming");
        assert_eq!(topic.categories.len(), 2);
        assert!(topic.public);
        assert!(topic.updated_on.is_none());
    }

    #[test]
    fn test_update_only_sends_changed_fields() {
        let update = TopicUpdate {
            priority: Some(9),
            public: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"priority": 9, "public": false})
        );
        assert!(TopicUpdate::default().is_empty());
    }
}
