// src/infrastructure/metadata.rs
use crate::domain::error::DomainResult;
use crate::domain::services::metadata::{MetadataFetcher, WebsiteMetadata};
use tracing::trace;

/// Fetcher used when no website loader is wired in: never finds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetadataFetcher;

impl MetadataFetcher for NoopMetadataFetcher {
    fn fetch(&self, url: &str) -> DomainResult<WebsiteMetadata> {
        trace!("Skipping metadata fetch for {}", url);
        Ok(WebsiteMetadata::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_any_url_when_fetch_then_returns_empty_metadata() {
        let metadata = NoopMetadataFetcher.fetch("https://example.com").unwrap();
        assert_eq!(metadata, WebsiteMetadata::default());
    }
}
