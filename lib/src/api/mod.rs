pub mod auth;
pub mod bookmarks;
pub mod categories;
pub mod misc;
pub mod topics;

pub use auth::{AuthApi, Credentials};
pub use bookmarks::BookmarksApi;
pub use categories::CategoriesApi;
pub use misc::UrlMetadata;
pub use topics::TopicsApi;

use crate::error::{LinkNovaError, Result};

/// Add/remove-categories calls refuse empty batches before any request is sent
pub(crate) fn require_names(categories: &[String]) -> Result<()> {
    if categories.is_empty() {
        return Err(LinkNovaError::InvalidInput(
            "Categories must be a non-empty list".to_string(),
        ));
    }
    Ok(())
}
