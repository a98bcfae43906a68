pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod models;
pub mod names;
pub mod pending;
pub mod utils;

// Re-export the types most callers need
pub use client::ApiClient;
pub use error::LinkNovaError;
