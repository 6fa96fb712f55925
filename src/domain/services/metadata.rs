// src/domain/services/metadata.rs
use crate::domain::error::DomainResult;
use std::fmt::Debug;

/// Title and description scraped from a web page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebsiteMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Collaborator that loads website metadata for a URL.
///
/// Implementations live outside the domain; the crate itself ships only a
/// no-op fetcher.
pub trait MetadataFetcher: Send + Sync + Debug {
    fn fetch(&self, url: &str) -> DomainResult<WebsiteMetadata>;
}
