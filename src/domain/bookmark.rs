// src/domain/bookmark.rs
use crate::domain::owner::OwnerId;
use crate::domain::services::metadata::WebsiteMetadata;
use crate::domain::tag::Tag;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of URL characters shown by the `Display` impl
const DISPLAY_URL_CHARS: usize = 30;

/// A saved URL with user-entered and website-fetched metadata
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Bookmark {
    #[builder(setter(strip_option), default)]
    pub id: Option<i32>,
    pub url: String,
    #[builder(default)]
    pub title: String,
    #[builder(default)]
    pub description: String,
    #[builder(setter(strip_option), default)]
    pub website_title: Option<String>,
    #[builder(setter(strip_option), default)]
    pub website_description: Option<String>,
    #[builder(default = "true")]
    pub unread: bool,
    #[builder(default = "Utc::now()")]
    pub date_added: DateTime<Utc>,
    #[builder(default = "Utc::now()")]
    pub date_modified: DateTime<Utc>,
    #[builder(setter(strip_option), default)]
    pub date_accessed: Option<DateTime<Utc>>,
    pub owner: OwnerId,
    /// Many-to-many relationship; order is whatever the store returned
    #[builder(default)]
    pub tags: Vec<Tag>,
}

impl Bookmark {
    /// Title to display: the user's title, or the website's when that is empty
    pub fn resolved_title(&self) -> Option<&str> {
        if self.title.is_empty() {
            self.website_title.as_deref()
        } else {
            Some(&self.title)
        }
    }

    /// Description to display, with the same fallback as [`Bookmark::resolved_title`]
    pub fn resolved_description(&self) -> Option<&str> {
        if self.description.is_empty() {
            self.website_description.as_deref()
        } else {
            Some(&self.description)
        }
    }

    /// Names of the associated tags in collection order
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.clone()).collect()
    }

    /// Replace the tag relationship. Tags with the same id are collapsed.
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        let mut unique: Vec<Tag> = Vec::with_capacity(tags.len());
        for tag in tags {
            let duplicate = tag.id.is_some() && unique.iter().any(|t| t.id == tag.id);
            if !duplicate {
                unique.push(tag);
            }
        }
        self.tags = unique;
    }

    pub fn apply_website_metadata(&mut self, metadata: WebsiteMetadata) {
        self.website_title = metadata.title;
        self.website_description = metadata.description;
    }

    pub fn record_access(&mut self) {
        self.date_accessed = Some(Utc::now());
    }

    pub fn mark_read(&mut self) {
        self.unread = false;
    }

    pub fn mark_unread(&mut self) {
        self.unread = true;
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.date_modified = Utc::now();
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url_prefix: String = self.url.chars().take(DISPLAY_URL_CHARS).collect();
        write!(
            f,
            "{} ({}...)",
            self.resolved_title().unwrap_or_default(),
            url_prefix
        )
    }
}
