// src/application/mod.rs
pub mod error;
pub mod forms;
pub mod services;

// Re-export key services for easier imports
pub use services::bookmark_service_impl::BookmarkServiceImpl;
pub use services::tag_service_impl::TagServiceImpl;
