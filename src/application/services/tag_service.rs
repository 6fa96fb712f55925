// src/application/services/tag_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::owner::OwnerId;
use crate::domain::tag::Tag;

/// Service interface for tag-related operations
pub trait TagService: Send + Sync + std::fmt::Debug {
    /// Resolve names to saved tags, creating the ones the owner does not have yet.
    /// Lookup ignores case; the returned tags follow the order of `names`.
    fn get_or_create_tags(&self, owner: OwnerId, names: &[String]) -> ApplicationResult<Vec<Tag>>;

    /// All tags of an owner ordered by name
    fn get_all_tags(&self, owner: OwnerId) -> ApplicationResult<Vec<Tag>>;
}
