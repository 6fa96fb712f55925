// src/application/services/tag_service_impl.rs
use std::sync::Arc;

use crate::application::error::ApplicationResult;
use crate::application::services::tag_service::TagService;
use crate::domain::owner::OwnerId;
use crate::domain::repositories::repository::TagRepository;
use crate::domain::tag::Tag;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct TagServiceImpl<R: TagRepository> {
    repository: Arc<R>,
}

impl<R: TagRepository> TagServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        debug!("Creating new TagServiceImpl");
        Self { repository }
    }

    fn get_or_create_tag(&self, owner: OwnerId, name: &str) -> ApplicationResult<Tag> {
        if let Some(tag) = self.repository.find_by_name(owner, name)? {
            return Ok(tag);
        }

        let mut tag = Tag::new(name, owner);
        self.repository.add(&mut tag)?;
        debug!("Created tag '{}' for owner {}", tag.name, owner);
        Ok(tag)
    }
}

impl<R: TagRepository> TagService for TagServiceImpl<R> {
    #[instrument(skip(self), level = "debug", fields(repo_type = std::any::type_name::<R>()))]
    fn get_or_create_tags(&self, owner: OwnerId, names: &[String]) -> ApplicationResult<Vec<Tag>> {
        names
            .iter()
            .map(|name| self.get_or_create_tag(owner, name))
            .collect()
    }

    #[instrument(skip(self), level = "debug")]
    fn get_all_tags(&self, owner: OwnerId) -> ApplicationResult<Vec<Tag>> {
        Ok(self.repository.get_all(owner)?)
    }
}
