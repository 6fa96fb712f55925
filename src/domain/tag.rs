// src/domain/tag.rs
use crate::domain::owner::OwnerId;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user-owned label attachable to bookmarks.
///
/// Names are stored as entered. Nothing here prevents an owner from having two
/// tags with the same name.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Tag {
    #[builder(setter(strip_option), default)]
    pub id: Option<i32>,
    pub name: String,
    #[builder(default = "Utc::now()")]
    pub date_added: DateTime<Utc>,
    pub owner: OwnerId,
}

impl Tag {
    /// Creates an unsaved tag dated now
    pub fn new<S: Into<String>>(name: S, owner: OwnerId) -> Self {
        Self {
            id: None,
            name: name.into(),
            date_added: Utc::now(),
            owner,
        }
    }

    pub fn from_storage(id: i32, name: String, date_added: DateTime<Utc>, owner: OwnerId) -> Self {
        Self {
            id: Some(id),
            name,
            date_added,
            owner,
        }
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Case-insensitive name comparison, used when looking up existing tags
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
