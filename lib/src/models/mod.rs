pub mod bookmark;
pub mod category;
pub mod topic;

pub use bookmark::{Bookmark, BookmarkCreate, BookmarkStatus, BookmarkUpdate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use topic::{Topic, TopicCreate, TopicUpdate};

/// Request body for the add-cats / remove-cats endpoints
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryNames {
    pub categories: Vec<String>,
}
