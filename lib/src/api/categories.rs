use crate::client::ApiClient;
use crate::error::Result;
use crate::listing;
use crate::models::{Category, CategoryCreate, CategoryUpdate, Topic};
use serde::de::IgnoredAny;

/// Wrappers around the `cat` endpoints
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Category>> {
        let cats: Option<Vec<Category>> = self.client.get(self.client.api_url(&["cat"]))?;
        Ok(cats.unwrap_or_default())
    }

    pub fn get(&self, name: &str) -> Result<Category> {
        self.client.get(self.client.api_url(&["cat", name]))
    }

    /// Server-side search, falling back to filtering the full list locally
    /// when the search endpoint is unavailable
    pub fn search(&self, query: &str) -> Result<Vec<Category>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list();
        }

        let mut url = self.client.api_url(&["cat", "search"]);
        url.query_pairs_mut().append_pair("q", query);

        match self.client.get::<Option<Vec<Category>>>(url) {
            Ok(found) => Ok(found.unwrap_or_default()),
            Err(e) => {
                log::warn!("Category search endpoint failed ({}), filtering locally", e);
                let all = self.list()?;
                Ok(listing::filter_categories(&all, query))
            }
        }
    }

    pub fn create(&self, category: &CategoryCreate) -> Result<()> {
        let _: IgnoredAny = self.client.post(self.client.api_url(&["cat"]), category)?;
        Ok(())
    }

    pub fn update(&self, name: &str, update: &CategoryUpdate) -> Result<()> {
        let _: IgnoredAny = self.client.put(self.client.api_url(&["cat", name]), update)?;
        Ok(())
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete::<_, ()>(self.client.api_url(&["cat", name]), None)?;
        Ok(())
    }

    /// Topics that list `name` among their categories
    pub fn topics_of(&self, name: &str) -> Result<Vec<Topic>> {
        let topics = self.client.topics().list()?;
        Ok(topics
            .into_iter()
            .filter(|t| t.categories.iter().any(|c| c == name))
            .collect())
    }
}
