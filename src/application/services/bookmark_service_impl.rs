// src/application/services/bookmark_service_impl.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::forms::{BookmarkDraft, BookmarkForm, FieldError, FormErrors, FormField};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::tag_service::TagService;
use crate::domain::bookmark::Bookmark;
use crate::domain::bookmark_view::BookmarkView;
use crate::domain::owner::OwnerId;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::services::metadata::MetadataFetcher;

#[derive(Debug)]
pub struct BookmarkServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
    tag_service: Arc<dyn TagService>,
    metadata_fetcher: Arc<dyn MetadataFetcher>,
    fetch_metadata: bool,
}

impl<R: BookmarkRepository> BookmarkServiceImpl<R> {
    pub fn new(
        repository: Arc<R>,
        tag_service: Arc<dyn TagService>,
        metadata_fetcher: Arc<dyn MetadataFetcher>,
    ) -> Self {
        Self {
            repository,
            tag_service,
            metadata_fetcher,
            fetch_metadata: true,
        }
    }

    /// Turn website metadata loading on or off (on by default)
    pub fn with_fetch_metadata(mut self, fetch_metadata: bool) -> Self {
        self.fetch_metadata = fetch_metadata;
        self
    }

    #[instrument(skip(self), level = "trace")]
    fn validate_bookmark_id(&self, id: i32) -> ApplicationResult<()> {
        if id <= 0 {
            return Err(ApplicationError::Validation(format!(
                "Invalid bookmark ID: {}",
                id
            )));
        }
        Ok(())
    }

    fn require_bookmark(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark> {
        self.validate_bookmark_id(id)?;
        self.repository
            .get_by_id(owner, id)?
            .ok_or(ApplicationError::BookmarkNotFound(id))
    }

    /// Fill the website fields; a failed fetch leaves them empty
    fn load_website_metadata(&self, bookmark: &mut Bookmark) {
        if !self.fetch_metadata {
            debug!("Metadata fetching disabled, skipping {}", bookmark.url);
            return;
        }
        match self.metadata_fetcher.fetch(&bookmark.url) {
            Ok(metadata) => bookmark.apply_website_metadata(metadata),
            Err(e) => {
                warn!("Failed to fetch website metadata for {}: {}", bookmark.url, e);
                bookmark.website_title = None;
                bookmark.website_description = None;
            }
        }
    }

    fn assign_tags(
        &self,
        owner: OwnerId,
        bookmark: &mut Bookmark,
        draft: &BookmarkDraft,
    ) -> ApplicationResult<()> {
        let tags = self
            .tag_service
            .get_or_create_tags(owner, &draft.tag_names())?;
        bookmark.set_tags(tags);
        Ok(())
    }

    /// Apply validated form values to a stored bookmark and persist it
    fn apply_draft(
        &self,
        owner: OwnerId,
        mut bookmark: Bookmark,
        draft: BookmarkDraft,
    ) -> ApplicationResult<Bookmark> {
        let url_changed = bookmark.url != draft.url;
        self.assign_tags(owner, &mut bookmark, &draft)?;

        bookmark.url = draft.url;
        bookmark.title = draft.title;
        bookmark.description = draft.description;
        if url_changed {
            self.load_website_metadata(&mut bookmark);
        }
        bookmark.touch();

        self.repository.update(&bookmark)?;
        Ok(bookmark)
    }
}

impl<R: BookmarkRepository> BookmarkService for BookmarkServiceImpl<R> {
    #[instrument(skip(self, form), level = "debug", fields(url = %form.url))]
    fn create_bookmark(&self, owner: OwnerId, form: &BookmarkForm) -> ApplicationResult<Bookmark> {
        let draft = form.validate()?;

        if let Some(existing) = self.repository.get_by_url(owner, &draft.url)? {
            debug!(
                "URL already bookmarked as {:?}, updating instead",
                existing.id
            );
            return self.apply_draft(owner, existing, draft);
        }

        let mut bookmark = draft.clone().into_bookmark(owner)?;
        self.load_website_metadata(&mut bookmark);
        self.assign_tags(owner, &mut bookmark, &draft)?;

        let now = Utc::now();
        bookmark.date_added = now;
        bookmark.date_modified = now;

        self.repository.add(&mut bookmark)?;
        debug!("Created bookmark {}", bookmark);
        Ok(bookmark)
    }

    #[instrument(skip(self, form), level = "debug")]
    fn update_bookmark(
        &self,
        owner: OwnerId,
        id: i32,
        form: &BookmarkForm,
    ) -> ApplicationResult<Bookmark> {
        let draft = form.validate()?;
        let bookmark = self.require_bookmark(owner, id)?;

        if bookmark.url != draft.url {
            if let Some(other) = self.repository.get_by_url(owner, &draft.url)? {
                debug!("URL already bookmarked as {:?}", other.id);
                let mut errors = FormErrors::default();
                errors.add(FormField::Url, FieldError::DuplicateUrl);
                return Err(errors.into());
            }
        }
        self.apply_draft(owner, bookmark, draft)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmark(&self, owner: OwnerId, id: i32) -> ApplicationResult<Option<Bookmark>> {
        self.validate_bookmark_id(id)?;
        Ok(self.repository.get_by_id(owner, id)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_bookmark(&self, owner: OwnerId, id: i32) -> ApplicationResult<bool> {
        self.validate_bookmark_id(id)?;
        Ok(self.repository.delete(owner, id)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn record_access(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark> {
        let mut bookmark = self.require_bookmark(owner, id)?;
        bookmark.record_access();
        self.repository.update(&bookmark)?;
        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn mark_as_read(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark> {
        let mut bookmark = self.require_bookmark(owner, id)?;
        bookmark.mark_read();
        self.repository.update(&bookmark)?;
        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn mark_as_unread(&self, owner: OwnerId, id: i32) -> ApplicationResult<Bookmark> {
        let mut bookmark = self.require_bookmark(owner, id)?;
        bookmark.mark_unread();
        self.repository.update(&bookmark)?;
        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn list_bookmarks(&self, owner: OwnerId) -> ApplicationResult<Vec<BookmarkView>> {
        Ok(self.repository.list_views(owner)?)
    }
}
