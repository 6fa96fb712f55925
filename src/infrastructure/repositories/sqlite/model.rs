// src/infrastructure/repositories/sqlite/model.rs
use chrono::NaiveDateTime;
use diesel::sql_types::{BigInt, Bool, Integer, Nullable, Text, Timestamp};
use diesel::{AsChangeset, Insertable, Queryable, QueryableByName, Selectable};

use crate::infrastructure::repositories::sqlite::schema::{bookmark_tags, bookmarks, tags};

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbBookmark {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub description: String,
    pub website_title: Option<String>,
    pub website_description: Option<String>,
    pub unread: bool,
    pub date_added: NaiveDateTime,
    pub date_modified: NaiveDateTime,
    pub date_accessed: Option<NaiveDateTime>,
    pub owner_id: i32,
}

/// New bookmark for insertion
#[derive(Insertable, Debug)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub website_title: Option<String>,
    pub website_description: Option<String>,
    pub unread: bool,
    pub date_added: NaiveDateTime,
    pub date_modified: NaiveDateTime,
    pub date_accessed: Option<NaiveDateTime>,
    pub owner_id: i32,
}

/// Changes for updating a bookmark; owner and creation date never change
#[derive(AsChangeset, Debug)]
#[diesel(table_name = bookmarks)]
pub struct DbBookmarkChanges {
    pub url: String,
    pub title: String,
    pub description: String,
    #[diesel(treat_none_as_null = true)]
    pub website_title: Option<String>,
    #[diesel(treat_none_as_null = true)]
    pub website_description: Option<String>,
    pub unread: bool,
    pub date_modified: NaiveDateTime,
    #[diesel(treat_none_as_null = true)]
    pub date_accessed: Option<NaiveDateTime>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbTag {
    pub id: i32,
    pub name: String,
    pub date_added: NaiveDateTime,
    pub owner_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = tags)]
pub struct NewTag {
    pub name: String,
    pub date_added: NaiveDateTime,
    pub owner_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = bookmark_tags)]
pub struct NewBookmarkTag {
    pub bookmark_id: i32,
    pub tag_id: i32,
}

/// Bookmark row with the aggregate columns of the list query
#[derive(QueryableByName, Debug)]
pub struct DbBookmarkView {
    #[diesel(sql_type = Integer)]
    pub id: i32,
    #[diesel(sql_type = Text)]
    pub url: String,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub description: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub website_title: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub website_description: Option<String>,
    #[diesel(sql_type = Bool)]
    pub unread: bool,
    #[diesel(sql_type = Timestamp)]
    pub date_added: NaiveDateTime,
    #[diesel(sql_type = Timestamp)]
    pub date_modified: NaiveDateTime,
    #[diesel(sql_type = Nullable<Timestamp>)]
    pub date_accessed: Option<NaiveDateTime>,
    #[diesel(sql_type = Integer)]
    pub owner_id: i32,
    #[diesel(sql_type = BigInt)]
    pub tag_count: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub tag_string: Option<String>,
}

impl From<DbBookmarkView> for DbBookmark {
    fn from(row: DbBookmarkView) -> Self {
        Self {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            website_title: row.website_title,
            website_description: row.website_description,
            unread: row.unread,
            date_added: row.date_added,
            date_modified: row.date_modified,
            date_accessed: row.date_accessed,
            owner_id: row.owner_id,
        }
    }
}
