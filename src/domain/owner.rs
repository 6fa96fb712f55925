// src/domain/owner.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to the user identity owning tags and bookmarks.
///
/// The identity itself lives with the authentication layer; this crate only
/// stores its primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub i32);

impl OwnerId {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for OwnerId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
