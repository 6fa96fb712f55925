// src/application/services/bookmark_service.rs
use crate::application::error::ApplicationResult;
use crate::application::forms::BookmarkForm;
use crate::domain::bookmark::Bookmark;
use crate::domain::bookmark_view::BookmarkView;
use crate::domain::owner::OwnerId;
use std::fmt::Debug;

/// Service interface for bookmark-related operations
pub trait BookmarkService: Send + Sync + Debug {
    /// Validate the form and save a new bookmark.
    /// If the owner already bookmarked the URL, that bookmark is updated instead.
    fn create_bookmark(&self, owner: OwnerId, form: &BookmarkForm) -> ApplicationResult<Bookmark>;

    /// Validate the form and apply it to an existing bookmark
    fn update_bookmark(
        &self,
        owner: OwnerId,
        id: i32,
        form: &BookmarkForm,
    ) -> ApplicationResult<Bookmark>;

    /// Get a bookmark by ID
    fn get_bookmark(&self, owner: OwnerId, id: i32) -> ApplicationResult<Option<Bookmark>>;

    /// Delete a bookmark by ID
    fn delete_bookmark(&self, owner: OwnerId, id: i32) -> ApplicationResult<bool>;

    /// Stamp the access date of a bookmark
    fn record_access(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark>;

    fn mark_as_read(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark>;

    fn mark_as_unread(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark>;

    /// Bookmarks of an owner with their tag projections, newest first
    fn list_bookmarks(&self, owner: OwnerId) -> ApplicationResult<Vec<BookmarkView>>;
}
