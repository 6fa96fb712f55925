// src/domain/repositories/repository.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::bookmark_view::BookmarkView;
use crate::domain::error::DomainResult;
use crate::domain::owner::OwnerId;
use crate::domain::tag::Tag;

/// Persistence of bookmarks and their tag relationship.
///
/// All lookups are scoped to an owner.
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Get a bookmark with its tags by ID
    fn get_by_id(&self, owner: OwnerId, id: i32) -> DomainResult<Option<Bookmark>>;

    /// Get a bookmark by its exact URL
    fn get_by_url(&self, owner: OwnerId, url: &str) -> DomainResult<Option<Bookmark>>;

    /// Insert a new bookmark and link its tags; assigns the ID.
    /// Every tag must already be saved.
    fn add(&self, bookmark: &mut Bookmark) -> DomainResult<()>;

    /// Update an existing bookmark and replace its tag links
    fn update(&self, bookmark: &Bookmark) -> DomainResult<()>;

    /// Delete a bookmark by ID, returns whether a row was removed
    fn delete(&self, owner: OwnerId, id: i32) -> DomainResult<bool>;

    /// List bookmarks with query-computed tag count and tag string,
    /// newest first
    fn list_views(&self, owner: OwnerId) -> DomainResult<Vec<BookmarkView>>;
}

/// Persistence of tags
pub trait TagRepository: std::fmt::Debug + Send + Sync {
    /// Find a tag by name ignoring case; the oldest wins if names repeat
    fn find_by_name(&self, owner: OwnerId, name: &str) -> DomainResult<Option<Tag>>;

    /// Insert a tag and assign its ID
    fn add(&self, tag: &mut Tag) -> DomainResult<()>;

    /// All tags of an owner ordered by name, ignoring case
    fn get_all(&self, owner: OwnerId) -> DomainResult<Vec<Tag>>;
}
