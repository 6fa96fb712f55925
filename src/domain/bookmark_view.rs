// src/domain/bookmark_view.rs
use crate::domain::bookmark::Bookmark;
use crate::domain::tag_string::{build_tag_string, parse_tag_string};
use serde::Serialize;

/// Read model of a bookmark as returned by list queries.
///
/// `tag_count` and `tag_string` are computed by the query layer for display
/// and are not authoritative; the bookmark's tag relationship is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkView {
    pub bookmark: Bookmark,
    pub tag_count: usize,
    pub tag_string: Option<String>,
}

impl BookmarkView {
    /// Project a loaded bookmark, deriving the counters from its tags
    pub fn from_bookmark(bookmark: Bookmark) -> Self {
        let tag_count = bookmark.tags.len();
        let tag_string = if bookmark.tags.is_empty() {
            None
        } else {
            Some(build_tag_string(&bookmark.tag_names()))
        };
        Self {
            bookmark,
            tag_count,
            tag_string,
        }
    }

    pub fn with_tag_string<S: Into<String>>(bookmark: Bookmark, tag_string: S) -> Self {
        let tag_string = tag_string.into();
        Self {
            tag_count: parse_tag_string(&tag_string).len(),
            bookmark,
            tag_string: Some(tag_string),
        }
    }

    /// Tag names from the projected string when present, else from the relationship
    pub fn tag_names(&self) -> Vec<String> {
        match self.tag_string.as_deref() {
            Some(tag_string) if !tag_string.is_empty() => parse_tag_string(tag_string),
            _ => self.bookmark.tag_names(),
        }
    }

    pub fn resolved_title(&self) -> Option<&str> {
        self.bookmark.resolved_title()
    }

    pub fn resolved_description(&self) -> Option<&str> {
        self.bookmark.resolved_description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkBuilder;
    use crate::domain::owner::OwnerId;
    use crate::domain::tag::Tag;

    fn bookmark() -> Bookmark {
        BookmarkBuilder::default()
            .url("https://example.com")
            .owner(OwnerId(1))
            .build()
            .unwrap()
    }

    #[test]
    fn given_tag_string_without_tag_rows_when_tag_names_then_parses_string() {
        let view = BookmarkView::with_tag_string(bookmark(), "zeta,Alpha");

        assert_eq!(view.tag_names(), vec!["Alpha", "zeta"]);
        assert_eq!(view.tag_count, 2);
    }

    #[test]
    fn given_empty_tag_string_when_tag_names_then_falls_back_to_relationship() {
        let mut bm = bookmark();
        bm.tags = vec![Tag::new("b", OwnerId(1)), Tag::new("a", OwnerId(1))];
        let view = BookmarkView {
            bookmark: bm,
            tag_count: 2,
            tag_string: Some(String::new()),
        };

        assert_eq!(view.tag_names(), vec!["b", "a"]);
    }

    #[test]
    fn given_bookmark_with_tags_when_from_bookmark_then_derives_counters() {
        let mut bm = bookmark();
        bm.tags = vec![Tag::new("x", OwnerId(1)), Tag::new("y", OwnerId(1))];

        let view = BookmarkView::from_bookmark(bm);

        assert_eq!(view.tag_count, 2);
        assert_eq!(view.tag_string.as_deref(), Some("x,y"));
    }

    #[test]
    fn given_bookmark_without_tags_when_from_bookmark_then_has_no_tag_string() {
        let view = BookmarkView::from_bookmark(bookmark());

        assert_eq!(view.tag_count, 0);
        assert!(view.tag_string.is_none());
        assert!(view.tag_names().is_empty());
    }
}
