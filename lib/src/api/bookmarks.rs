use super::require_names;
use crate::client::ApiClient;
use crate::error::Result;
use crate::listing;
use crate::models::{Bookmark, BookmarkCreate, BookmarkUpdate, CategoryNames};
use crate::pending::CategoryAssignment;
use serde::de::IgnoredAny;

/// Wrappers around the `bm` endpoints
pub struct BookmarksApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BookmarksApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Bookmark>> {
        let bookmarks: Option<Vec<Bookmark>> = self.client.get(self.client.api_url(&["bm"]))?;
        Ok(bookmarks.unwrap_or_default())
    }

    pub fn get(&self, id: i64) -> Result<Bookmark> {
        self.client.get(self.client.api_url(&["bm", &id.to_string()]))
    }

    pub fn create(&self, bookmark: &BookmarkCreate) -> Result<()> {
        let _: IgnoredAny = self.client.post(self.client.api_url(&["bm"]), bookmark)?;
        Ok(())
    }

    pub fn update(&self, id: i64, update: &BookmarkUpdate) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .put(self.client.api_url(&["bm", &id.to_string()]), update)?;
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete::<_, ()>(self.client.api_url(&["bm", &id.to_string()]), None)?;
        Ok(())
    }

    pub fn add_categories(&self, id: i64, categories: &[String]) -> Result<()> {
        require_names(categories)?;
        let body = CategoryNames {
            categories: categories.to_vec(),
        };
        let url = self.client.api_url(&["bm", "add-cats", &id.to_string()]);
        let _: IgnoredAny = self.client.put(url, &body)?;
        Ok(())
    }

    pub fn remove_categories(&self, id: i64, categories: &[String]) -> Result<()> {
        require_names(categories)?;
        let body = CategoryNames {
            categories: categories.to_vec(),
        };
        let url = self.client.api_url(&["bm", "remove-cats", &id.to_string()]);
        let _: IgnoredAny = self.client.delete(url, Some(&body))?;
        Ok(())
    }

    pub fn by_category(&self, name: &str) -> Result<Vec<Bookmark>> {
        let all = self.list()?;
        Ok(all.into_iter().filter(|b| b.has_category(name)).collect())
    }

    /// Bookmarks carrying any category of the topic; empty if the topic has none
    pub fn by_topic(&self, topic: &str) -> Result<Vec<Bookmark>> {
        let topic = self.client.topics().get(topic)?;
        if topic.categories.is_empty() {
            return Ok(Vec::new());
        }
        let all = self.list()?;
        Ok(all
            .into_iter()
            .filter(|b| listing::in_any_category(b, &topic.categories))
            .collect())
    }

    pub fn assignment(&self, id: i64) -> BookmarkCategories<'a> {
        BookmarkCategories {
            client: self.client,
            id,
        }
    }
}

pub struct BookmarkCategories<'a> {
    client: &'a ApiClient,
    id: i64,
}

impl CategoryAssignment for BookmarkCategories<'_> {
    fn add_categories(&self, categories: &[String]) -> Result<()> {
        self.client.bookmarks().add_categories(self.id, categories)
    }

    fn remove_categories(&self, categories: &[String]) -> Result<()> {
        self.client.bookmarks().remove_categories(self.id, categories)
    }
}
