// src/domain/mod.rs
pub mod bookmark;
pub mod bookmark_view;
pub mod error;
pub mod owner;
pub mod repositories;
pub mod services;
pub mod tag;
pub mod tag_string;
