use super::require_names;
use crate::client::ApiClient;
use crate::error::Result;
use crate::models::{CategoryNames, Topic, TopicCreate, TopicUpdate};
use crate::pending::CategoryAssignment;
use serde::de::IgnoredAny;

/// Wrappers around the `topic` endpoints
pub struct TopicsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TopicsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Topic>> {
        let topics: Option<Vec<Topic>> = self.client.get(self.client.api_url(&["topic"]))?;
        Ok(topics.unwrap_or_default())
    }

    pub fn get(&self, name: &str) -> Result<Topic> {
        self.client.get(self.client.api_url(&["topic", name]))
    }

    pub fn create(&self, topic: &TopicCreate) -> Result<()> {
        let _: IgnoredAny = self.client.post(self.client.api_url(&["topic"]), topic)?;
        Ok(())
    }

    pub fn update(&self, name: &str, update: &TopicUpdate) -> Result<()> {
        let _: IgnoredAny = self.client.put(self.client.api_url(&["topic", name]), update)?;
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete::<_, ()>(self.client.api_url(&["topic", name]), None)?;
        Ok(())
    }

    pub fn add_categories(&self, name: &str, categories: &[String]) -> Result<()> {
        require_names(categories)?;
        let body = CategoryNames {
            categories: categories.to_vec(),
        };
        let _: IgnoredAny = self
            .client
            .put(self.client.api_url(&["topic", name, "add-cats"]), &body)?;
        Ok(())
    }

    pub fn remove_categories(&self, name: &str, categories: &[String]) -> Result<()> {
        require_names(categories)?;
        let body = CategoryNames {
            categories: categories.to_vec(),
        };
        let _: IgnoredAny = self
            .client
            .delete(self.client.api_url(&["topic", name, "remove-cats"]), Some(&body))?;
        Ok(())
    }

    /// Category assignment target for a single topic
    pub fn assignment(&self, name: &str) -> TopicCategories<'a> {
        TopicCategories {
            client: self.client,
            name: name.to_string(),
        }
    }
}

pub struct TopicCategories<'a> {
    client: &'a ApiClient,
    name: String,
}

impl CategoryAssignment for TopicCategories<'_> {
    fn add_categories(&self, categories: &[String]) -> Result<()> {
        self.client.topics().add_categories(&self.name, categories)
    }

    fn remove_categories(&self, categories: &[String]) -> Result<()> {
        self.client.topics().remove_categories(&self.name, categories)
    }
}
