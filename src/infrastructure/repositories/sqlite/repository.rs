// src/infrastructure/repositories/sqlite/repository.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Integer;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::bookmark::Bookmark;
use crate::domain::bookmark_view::BookmarkView;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::owner::OwnerId;
use crate::domain::repositories::repository::{BookmarkRepository, TagRepository};
use crate::domain::tag::Tag;
use crate::infrastructure::repositories::sqlite::model::{
    DbBookmark, DbBookmarkChanges, DbBookmarkView, DbTag, NewBookmark, NewBookmarkTag, NewTag,
};
use crate::infrastructure::repositories::sqlite::schema::{bookmark_tags, bookmarks, tags};

const LIST_VIEWS_QUERY: &str = "
    SELECT b.id, b.url, b.title, b.description, b.website_title, b.website_description,
           b.unread, b.date_added, b.date_modified, b.date_accessed, b.owner_id,
           COUNT(t.id) AS tag_count,
           GROUP_CONCAT(t.name, ',') AS tag_string
    FROM bookmarks b
    LEFT JOIN bookmark_tags bt ON bt.bookmark_id = b.id
    LEFT JOIN tags t ON t.id = bt.tag_id
    WHERE b.owner_id = ?
    GROUP BY b.id
    ORDER BY b.date_added DESC, b.id DESC
";

fn to_utc(ts: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)
}

/// SQLite store for bookmarks and tags, backed by an r2d2 pool
#[derive(Clone, Debug)]
pub struct SqliteBookmarkRepository {
    pool: ConnectionPool,
}

impl SqliteBookmarkRepository {
    /// Create a new SQLite repository with the provided connection pool
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Create a new SQLite repository with the provided database URL
    #[instrument(skip_all, level = "debug")]
    pub fn from_url(database_url: &str) -> SqliteResult<Self> {
        let pool = super::connection::init_pool(database_url)?;
        Ok(Self { pool })
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    fn to_domain_tag(db_tag: DbTag) -> Tag {
        Tag::from_storage(
            db_tag.id,
            db_tag.name,
            to_utc(db_tag.date_added),
            OwnerId(db_tag.owner_id),
        )
    }

    /// Convert a database row plus its linked tags to a domain entity
    fn to_domain_model(db_bookmark: DbBookmark, tags: Vec<Tag>) -> Bookmark {
        Bookmark {
            id: Some(db_bookmark.id),
            url: db_bookmark.url,
            title: db_bookmark.title,
            description: db_bookmark.description,
            website_title: db_bookmark.website_title,
            website_description: db_bookmark.website_description,
            unread: db_bookmark.unread,
            date_added: to_utc(db_bookmark.date_added),
            date_modified: to_utc(db_bookmark.date_modified),
            date_accessed: db_bookmark.date_accessed.map(to_utc),
            owner: OwnerId(db_bookmark.owner_id),
            tags,
        }
    }

    fn to_new_model(bookmark: &Bookmark) -> NewBookmark {
        NewBookmark {
            url: bookmark.url.clone(),
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            website_title: bookmark.website_title.clone(),
            website_description: bookmark.website_description.clone(),
            unread: bookmark.unread,
            date_added: bookmark.date_added.naive_utc(),
            date_modified: bookmark.date_modified.naive_utc(),
            date_accessed: bookmark.date_accessed.map(|ts| ts.naive_utc()),
            owner_id: bookmark.owner.value(),
        }
    }

    fn to_changes(bookmark: &Bookmark) -> DbBookmarkChanges {
        DbBookmarkChanges {
            url: bookmark.url.clone(),
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            website_title: bookmark.website_title.clone(),
            website_description: bookmark.website_description.clone(),
            unread: bookmark.unread,
            date_modified: bookmark.date_modified.naive_utc(),
            date_accessed: bookmark.date_accessed.map(|ts| ts.naive_utc()),
        }
    }

    /// Tags linked to one bookmark, in link order
    fn load_tags(conn: &mut SqliteConnection, bookmark_id: i32) -> SqliteResult<Vec<Tag>> {
        let rows = bookmark_tags::table
            .inner_join(tags::table)
            .filter(bookmark_tags::bookmark_id.eq(bookmark_id))
            .order(bookmark_tags::id.asc())
            .select(DbTag::as_select())
            .load::<DbTag>(conn)?;

        Ok(rows.into_iter().map(Self::to_domain_tag).collect())
    }

    /// Tags linked to the bookmarks of one owner, grouped by bookmark ID
    fn load_owner_links(
        conn: &mut SqliteConnection,
        owner: OwnerId,
    ) -> SqliteResult<HashMap<i32, Vec<Tag>>> {
        let rows = bookmark_tags::table
            .inner_join(tags::table)
            .inner_join(bookmarks::table)
            .filter(bookmarks::owner_id.eq(owner.value()))
            .order(bookmark_tags::id.asc())
            .select((bookmark_tags::bookmark_id, DbTag::as_select()))
            .load::<(i32, DbTag)>(conn)?;

        let mut grouped: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (bookmark_id, db_tag) in rows {
            grouped
                .entry(bookmark_id)
                .or_default()
                .push(Self::to_domain_tag(db_tag));
        }
        Ok(grouped)
    }

    /// Replace the tag links of a bookmark
    fn write_links(conn: &mut SqliteConnection, bookmark_id: i32, tags: &[Tag]) -> SqliteResult<()> {
        let mut seen = HashSet::new();
        let mut links = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag_id = tag
                .id
                .ok_or_else(|| SqliteRepositoryError::UnsavedTag(tag.name.clone()))?;
            if seen.insert(tag_id) {
                links.push(NewBookmarkTag {
                    bookmark_id,
                    tag_id,
                });
            }
        }

        diesel::delete(bookmark_tags::table.filter(bookmark_tags::bookmark_id.eq(bookmark_id)))
            .execute(conn)?;

        if !links.is_empty() {
            diesel::insert_into(bookmark_tags::table)
                .values(&links)
                .execute(conn)?;
        }
        debug!("Linked {} tags to bookmark {}", links.len(), bookmark_id);
        Ok(())
    }
}

impl BookmarkRepository for SqliteBookmarkRepository {
    #[instrument(skip(self), level = "debug")]
    fn get_by_id(&self, owner: OwnerId, id: i32) -> DomainResult<Option<Bookmark>> {
        let mut conn = self.get_connection()?;

        let result = bookmarks::table
            .filter(bookmarks::id.eq(id))
            .filter(bookmarks::owner_id.eq(owner.value()))
            .select(DbBookmark::as_select())
            .first::<DbBookmark>(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        match result {
            Some(db_bookmark) => {
                let tags = Self::load_tags(&mut conn, db_bookmark.id)?;
                Ok(Some(Self::to_domain_model(db_bookmark, tags)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_url(&self, owner: OwnerId, url: &str) -> DomainResult<Option<Bookmark>> {
        let mut conn = self.get_connection()?;

        let result = bookmarks::table
            .filter(bookmarks::url.eq(url))
            .filter(bookmarks::owner_id.eq(owner.value()))
            .order(bookmarks::id.asc())
            .select(DbBookmark::as_select())
            .first::<DbBookmark>(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        match result {
            Some(db_bookmark) => {
                let tags = Self::load_tags(&mut conn, db_bookmark.id)?;
                Ok(Some(Self::to_domain_model(db_bookmark, tags)))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip_all, level = "debug", fields(url = %bookmark.url))]
    fn add(&self, bookmark: &mut Bookmark) -> DomainResult<()> {
        let mut conn = self.get_connection()?;
        let new_bookmark = Self::to_new_model(bookmark);
        let tags = &bookmark.tags;

        let id = conn.transaction::<_, SqliteRepositoryError, _>(|conn| {
            let id: i32 = diesel::insert_into(bookmarks::table)
                .values(&new_bookmark)
                .returning(bookmarks::id)
                .get_result(conn)?;
            Self::write_links(conn, id, tags)?;
            Ok(id)
        })?;

        bookmark.set_id(id);
        debug!("Added bookmark {}", id);
        Ok(())
    }

    #[instrument(skip_all, level = "debug", fields(id = ?bookmark.id))]
    fn update(&self, bookmark: &Bookmark) -> DomainResult<()> {
        let id = bookmark.id.ok_or_else(|| {
            DomainError::BookmarkOperationFailed("Cannot update a bookmark without ID".to_string())
        })?;
        let mut conn = self.get_connection()?;
        let changes = Self::to_changes(bookmark);
        let owner_id = bookmark.owner.value();

        conn.transaction::<_, SqliteRepositoryError, _>(|conn| {
            let updated = diesel::update(
                bookmarks::table
                    .filter(bookmarks::id.eq(id))
                    .filter(bookmarks::owner_id.eq(owner_id)),
            )
            .set(&changes)
            .execute(conn)?;

            if updated == 0 {
                return Err(SqliteRepositoryError::BookmarkNotFound(id));
            }
            Self::write_links(conn, id, &bookmark.tags)
        })?;

        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn delete(&self, owner: OwnerId, id: i32) -> DomainResult<bool> {
        let mut conn = self.get_connection()?;

        let deleted = conn.transaction::<_, SqliteRepositoryError, _>(|conn| {
            let exists = bookmarks::table
                .filter(bookmarks::id.eq(id))
                .filter(bookmarks::owner_id.eq(owner.value()))
                .select(bookmarks::id)
                .first::<i32>(conn)
                .optional()?;
            if exists.is_none() {
                return Ok(0);
            }

            diesel::delete(bookmark_tags::table.filter(bookmark_tags::bookmark_id.eq(id)))
                .execute(conn)?;
            Ok(diesel::delete(bookmarks::table.filter(bookmarks::id.eq(id))).execute(conn)?)
        })?;

        debug!("Deleted {} bookmark(s) with ID {}", deleted, id);
        Ok(deleted > 0)
    }

    #[instrument(skip(self), level = "debug")]
    fn list_views(&self, owner: OwnerId) -> DomainResult<Vec<BookmarkView>> {
        let mut conn = self.get_connection()?;

        let rows = sql_query(LIST_VIEWS_QUERY)
            .bind::<Integer, _>(owner.value())
            .load::<DbBookmarkView>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        let mut tags_by_bookmark = Self::load_owner_links(&mut conn, owner)?;

        let views = rows
            .into_iter()
            .map(|mut row| {
                let tag_count = usize::try_from(row.tag_count).unwrap_or_default();
                let tag_string = row.tag_string.take();
                let db_bookmark = DbBookmark::from(row);
                let tags = tags_by_bookmark.remove(&db_bookmark.id).unwrap_or_default();
                BookmarkView {
                    bookmark: Self::to_domain_model(db_bookmark, tags),
                    tag_count,
                    tag_string,
                }
            })
            .collect();

        Ok(views)
    }
}

impl TagRepository for SqliteBookmarkRepository {
    #[instrument(skip(self), level = "debug")]
    fn find_by_name(&self, owner: OwnerId, name: &str) -> DomainResult<Option<Tag>> {
        // Case folding happens here rather than in SQL: SQLite's lower() is ASCII only
        Ok(self
            .load_owner_tags(owner)?
            .into_iter()
            .find(|tag| tag.has_name(name)))
    }

    #[instrument(skip_all, level = "debug", fields(name = %tag.name))]
    fn add(&self, tag: &mut Tag) -> DomainResult<()> {
        let mut conn = self.get_connection()?;
        let new_tag = NewTag {
            name: tag.name.clone(),
            date_added: tag.date_added.naive_utc(),
            owner_id: tag.owner.value(),
        };

        let id: i32 = diesel::insert_into(tags::table)
            .values(&new_tag)
            .returning(tags::id)
            .get_result(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        tag.set_id(id);
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn get_all(&self, owner: OwnerId) -> DomainResult<Vec<Tag>> {
        let mut tags = self.load_owner_tags(owner)?;
        tags.sort_by_cached_key(|tag| tag.name.to_lowercase());
        Ok(tags)
    }
}

impl SqliteBookmarkRepository {
    /// Tags of an owner ordered by ID
    fn load_owner_tags(&self, owner: OwnerId) -> SqliteResult<Vec<Tag>> {
        let mut conn = self.get_connection()?;

        let rows = tags::table
            .filter(tags::owner_id.eq(owner.value()))
            .order(tags::id.asc())
            .select(DbTag::as_select())
            .load::<DbTag>(&mut conn)?;

        Ok(rows.into_iter().map(Self::to_domain_tag).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bookmark::BookmarkBuilder;
    use crate::util::testing::{init_test_env, setup_test_db, TestDb};

    fn saved_tag(repo: &SqliteBookmarkRepository, name: &str, owner: OwnerId) -> Tag {
        let mut tag = Tag::new(name, owner);
        TagRepository::add(repo, &mut tag).unwrap();
        tag
    }

    fn new_bookmark(url: &str, owner: OwnerId, tags: Vec<Tag>) -> Bookmark {
        BookmarkBuilder::default()
            .url(url)
            .title("Title")
            .owner(owner)
            .tags(tags)
            .build()
            .unwrap()
    }

    fn setup() -> TestDb {
        let _ = init_test_env();
        setup_test_db()
    }

    #[test]
    fn given_new_bookmark_when_add_then_assigns_id_and_persists_tags() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        let tags = vec![saved_tag(repo, "zeta", owner), saved_tag(repo, "Alpha", owner)];

        let mut bm = new_bookmark("https://example.com", owner, tags);
        BookmarkRepository::add(repo, &mut bm).unwrap();

        let id = bm.id.expect("id assigned");
        let loaded = repo.get_by_id(owner, id).unwrap().unwrap();
        assert_eq!(loaded.url, "https://example.com");
        assert_eq!(loaded.title, "Title");
        assert!(loaded.unread);
        assert_eq!(loaded.tag_names(), vec!["zeta", "Alpha"]);
    }

    #[test]
    fn given_unsaved_tag_when_add_then_fails_without_inserting() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);

        let mut bm = new_bookmark("https://example.com", owner, vec![Tag::new("new", owner)]);
        let result = BookmarkRepository::add(repo, &mut bm);

        assert!(matches!(result, Err(DomainError::TagOperationFailed(_))));
        assert!(bm.id.is_none());
        assert!(repo.list_views(owner).unwrap().is_empty());
    }

    #[test]
    fn given_other_owner_when_get_by_id_then_returns_none() {
        let db = setup();
        let repo = &db.repository;

        let mut bm = new_bookmark("https://example.com", OwnerId(1), vec![]);
        BookmarkRepository::add(repo, &mut bm).unwrap();

        assert!(repo.get_by_id(OwnerId(2), bm.id.unwrap()).unwrap().is_none());
        assert!(repo
            .get_by_url(OwnerId(2), "https://example.com")
            .unwrap()
            .is_none());
        assert!(repo
            .get_by_url(OwnerId(1), "https://example.com")
            .unwrap()
            .is_some());
    }

    #[test]
    fn given_changed_bookmark_when_update_then_replaces_fields_and_links() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        let a = saved_tag(repo, "a", owner);
        let b = saved_tag(repo, "b", owner);

        let mut bm = new_bookmark("https://example.com", owner, vec![a]);
        BookmarkRepository::add(repo, &mut bm).unwrap();

        bm.title = String::new();
        bm.website_title = Some("From site".to_string());
        bm.tags = vec![b];
        bm.mark_read();
        bm.record_access();
        repo.update(&bm).unwrap();

        let loaded = repo.get_by_id(owner, bm.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded.resolved_title(), Some("From site"));
        assert_eq!(loaded.tag_names(), vec!["b"]);
        assert!(!loaded.unread);
        assert!(loaded.date_accessed.is_some());
    }

    #[test]
    fn given_missing_bookmark_when_update_then_returns_not_found() {
        let db = setup();
        let mut bm = new_bookmark("https://example.com", OwnerId(1), vec![]);
        bm.set_id(999);

        let result = db.repository.update(&bm);

        assert!(matches!(result, Err(DomainError::BookmarkNotFound(_))));
    }

    #[test]
    fn given_bookmark_when_delete_then_removes_row_once() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        let tag = saved_tag(repo, "a", owner);
        let mut bm = new_bookmark("https://example.com", owner, vec![tag]);
        BookmarkRepository::add(repo, &mut bm).unwrap();
        let id = bm.id.unwrap();

        assert!(!repo.delete(OwnerId(2), id).unwrap());
        assert!(repo.delete(owner, id).unwrap());
        assert!(!repo.delete(owner, id).unwrap());
        assert!(repo.get_by_id(owner, id).unwrap().is_none());
        // tags outlive their bookmarks
        assert_eq!(repo.get_all(owner).unwrap().len(), 1);
    }

    #[test]
    fn given_bookmarks_when_list_views_then_computes_tag_count_and_string() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        let zeta = saved_tag(repo, "zeta", owner);
        let alpha = saved_tag(repo, "Alpha", owner);

        let mut tagged = new_bookmark("https://tagged.example.com", owner, vec![zeta, alpha]);
        BookmarkRepository::add(repo, &mut tagged).unwrap();
        let mut untagged = new_bookmark("https://plain.example.com", owner, vec![]);
        BookmarkRepository::add(repo, &mut untagged).unwrap();
        let mut foreign = new_bookmark("https://other.example.com", OwnerId(2), vec![]);
        BookmarkRepository::add(repo, &mut foreign).unwrap();

        let views = repo.list_views(owner).unwrap();
        assert_eq!(views.len(), 2);

        let tagged_view = views
            .iter()
            .find(|v| v.bookmark.id == tagged.id)
            .expect("tagged view");
        assert_eq!(tagged_view.tag_count, 2);
        assert!(tagged_view.tag_string.is_some());
        assert_eq!(tagged_view.tag_names(), vec!["Alpha", "zeta"]);
        assert_eq!(tagged_view.bookmark.tags.len(), 2);

        let untagged_view = views
            .iter()
            .find(|v| v.bookmark.id == untagged.id)
            .expect("untagged view");
        assert_eq!(untagged_view.tag_count, 0);
        assert!(untagged_view.tag_string.is_none());
        assert!(untagged_view.tag_names().is_empty());
    }

    #[test]
    fn given_more_bookmarks_than_sql_variables_when_list_views_then_lists_all() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        let count = 33_000;

        let mut conn = repo.get_connection().unwrap();
        sql_query(format!(
            "INSERT INTO bookmarks (url, title, description, unread, date_added, date_modified, owner_id)
             WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < {count})
             SELECT 'https://example.com/' || n, '', '', 1,
                    '2024-01-01 00:00:00', '2024-01-01 00:00:00', {owner}
             FROM seq",
            count = count,
            owner = owner.value()
        ))
        .execute(&mut conn)
        .unwrap();
        drop(conn);

        let tag = saved_tag(repo, "bulk", owner);
        let mut tagged = new_bookmark("https://tagged.example.com", owner, vec![tag]);
        BookmarkRepository::add(repo, &mut tagged).unwrap();

        let views = repo.list_views(owner).unwrap();

        assert_eq!(views.len(), count + 1);
        let tagged_view = views
            .iter()
            .find(|v| v.bookmark.id == tagged.id)
            .expect("tagged view");
        assert_eq!(tagged_view.bookmark.tag_names(), vec!["bulk"]);
        assert_eq!(tagged_view.tag_count, 1);
    }

    #[test]
    fn given_other_owner_links_when_list_views_then_tags_stay_with_their_owner() {
        let db = setup();
        let repo = &db.repository;
        let mine = saved_tag(repo, "mine", OwnerId(1));
        let theirs = saved_tag(repo, "theirs", OwnerId(2));

        let mut own = new_bookmark("https://example.com", OwnerId(1), vec![mine]);
        BookmarkRepository::add(repo, &mut own).unwrap();
        let mut other = new_bookmark("https://example.com", OwnerId(2), vec![theirs]);
        BookmarkRepository::add(repo, &mut other).unwrap();

        let views = repo.list_views(OwnerId(1)).unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].bookmark.tag_names(), vec!["mine"]);
    }

    #[test]
    fn given_duplicate_tag_names_when_find_by_name_then_returns_oldest_ignoring_case() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        let first = saved_tag(repo, "Rust", owner);
        let _second = saved_tag(repo, "rust", owner);
        let _foreign = saved_tag(repo, "rust", OwnerId(2));

        let found = repo.find_by_name(owner, "RUST").unwrap().unwrap();

        assert_eq!(found.id, first.id);
        assert_eq!(found.name, "Rust");
        assert!(repo.find_by_name(owner, "python").unwrap().is_none());
    }

    #[test]
    fn given_tags_when_get_all_then_sorted_by_name_ignoring_case() {
        let db = setup();
        let repo = &db.repository;
        let owner = OwnerId(1);
        for name in ["b", "C", "a"] {
            saved_tag(repo, name, owner);
        }

        let names: Vec<String> = repo
            .get_all(owner)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(names, vec!["a", "b", "C"]);
    }
}
