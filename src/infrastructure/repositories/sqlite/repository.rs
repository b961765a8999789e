// src/infrastructure/repositories/sqlite/repository.rs

use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Bool, Integer};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use super::model::{DbBookmark, TagUsage};
use super::schema::{bookmarks, tags, tags_bookmarks};
use super::transaction::BookmarkTransaction;
use crate::domain::bookmark::Bookmark;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::draft::{BookmarkDraft, ImportRecord};
use crate::domain::error::DomainResult;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::tag::Tag;

const TAG_USAGE_QUERY: &str = "
    SELECT t.id, t.name, t.is_author, COUNT(tb.tag_id) AS num_entries
    FROM tags t
    JOIN tags_bookmarks tb ON tb.tag_id = t.id
    JOIN bookmarks b ON tb.bookmark_id = b.id
    WHERE t.is_author = ? AND b.deleted_at = 0
    GROUP BY t.id, t.name, t.is_author
    ORDER BY t.name;
";

const BOOKMARK_TAGS_QUERY: &str = "
    SELECT t.id, t.name, t.is_author,
           (SELECT COUNT(*) FROM tags_bookmarks x
              JOIN bookmarks b ON x.bookmark_id = b.id
             WHERE x.tag_id = t.id AND b.deleted_at = 0) AS num_entries
    FROM tags t
    JOIN tags_bookmarks tb ON tb.tag_id = t.id
    WHERE tb.bookmark_id = ?
    ORDER BY t.name;
";

#[derive(Debug, Clone, Copy)]
enum ListScope {
    All,
    Unread,
    Shortcuts,
}

#[derive(Clone, Debug)]
pub struct SqliteBookmarkRepository {
    pool: ConnectionPool,
    clock: Arc<dyn Clock>,
}

impl SqliteBookmarkRepository {
    /// Create a new SQLite repository with the provided connection pool
    pub fn new(pool: ConnectionPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: ConnectionPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Create a new SQLite repository with the provided database URL
    #[instrument(skip_all, level = "debug")]
    pub fn from_url(database_url: &str) -> SqliteResult<Self> {
        let pool = super::connection::init_pool(database_url)?;
        Ok(Self::new(pool))
    }

    /// Get a connection from the pool
    #[instrument(skip_all, level = "trace")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    /// Run `f` as one atomic write.
    ///
    /// The transaction is opened with `BEGIN IMMEDIATE`, so concurrent writers
    /// queue on the database lock before reading anything. It commits when `f`
    /// returns `Ok` and rolls back otherwise.
    #[instrument(skip_all, level = "debug")]
    pub fn write<T, F>(&self, f: F) -> SqliteResult<T>
    where
        F: FnOnce(&mut BookmarkTransaction<'_>) -> SqliteResult<T>,
    {
        let mut conn = self.get_connection()?;
        let now = self.clock.now();
        let result = conn.immediate_transaction(|conn| {
            let mut tx = BookmarkTransaction::new(conn, now);
            f(&mut tx)
        });
        if let Err(e) = &result {
            debug!("Write rolled back: {}", e);
        }
        result
    }

    fn load_live(&self, scope: ListScope) -> SqliteResult<Vec<Bookmark>> {
        let mut conn = self.get_connection()?;
        let mut query = bookmarks::table
            .filter(bookmarks::deleted_at.eq(0))
            .select(DbBookmark::as_select())
            .into_boxed();

        match scope {
            ListScope::All => {}
            ListScope::Unread => query = query.filter(bookmarks::read_at.eq(0)),
            ListScope::Shortcuts => query = query.filter(bookmarks::shortcut.ne("")),
        }

        let rows = query
            .order((bookmarks::created_at.desc(), bookmarks::id.desc()))
            .load::<DbBookmark>(&mut *conn)?;
        debug!("Loaded {} bookmarks for {:?}", rows.len(), scope);
        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    fn tag_usage(&self, is_author: bool) -> SqliteResult<Vec<Tag>> {
        let mut conn = self.get_connection()?;
        let rows: Vec<TagUsage> = sql_query(TAG_USAGE_QUERY)
            .bind::<Bool, _>(is_author)
            .load(&mut *conn)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }
}

impl BookmarkRepository for SqliteBookmarkRepository {
    #[instrument(skip_all, level = "debug")]
    fn create(&self, draft: &BookmarkDraft) -> DomainResult<i32> {
        Ok(self.write(|tx| tx.create(draft))?)
    }

    #[instrument(skip_all, level = "debug")]
    fn import(&self, record: &ImportRecord) -> DomainResult<i32> {
        Ok(self.write(|tx| tx.import(record))?)
    }

    #[instrument(skip(self, draft), level = "debug")]
    fn update(&self, id: i32, draft: &BookmarkDraft) -> DomainResult<()> {
        Ok(self.write(|tx| tx.update(id, draft))?)
    }

    #[instrument(skip(self), level = "debug")]
    fn mark_read(&self, id: i32) -> DomainResult<bool> {
        Ok(self.write(|tx| tx.mark_read(id))?)
    }

    #[instrument(skip(self), level = "debug")]
    fn soft_delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.write(|tx| tx.soft_delete(id))?)
    }

    #[instrument(skip_all, level = "debug")]
    fn get_all(&self) -> DomainResult<Vec<Bookmark>> {
        Ok(self.load_live(ListScope::All)?)
    }

    #[instrument(skip_all, level = "debug")]
    fn get_unread(&self) -> DomainResult<Vec<Bookmark>> {
        Ok(self.load_live(ListScope::Unread)?)
    }

    #[instrument(skip_all, level = "debug")]
    fn get_shortcuts(&self) -> DomainResult<Vec<Bookmark>> {
        Ok(self.load_live(ListScope::Shortcuts)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_id(&self, id: i32) -> DomainResult<Option<Bookmark>> {
        let mut conn = self.get_connection()?;
        let row = bookmarks::table
            .filter(bookmarks::id.eq(id))
            .filter(bookmarks::deleted_at.eq(0))
            .select(DbBookmark::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;
        Ok(row.map(Bookmark::from))
    }

    #[instrument(skip(self), level = "debug")]
    fn get_by_tag(&self, name: &str) -> DomainResult<Vec<Bookmark>> {
        let mut conn = self.get_connection()?;
        let rows = bookmarks::table
            .inner_join(tags_bookmarks::table.inner_join(tags::table))
            .filter(tags::name.eq(name))
            .filter(bookmarks::deleted_at.eq(0))
            .order((bookmarks::created_at.desc(), bookmarks::id.desc()))
            .select(DbBookmark::as_select())
            .load(&mut *conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;
        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    fn shortcut_url(&self, shortcut: &str) -> DomainResult<Option<String>> {
        let mut conn = self.get_connection()?;
        let url = bookmarks::table
            .filter(bookmarks::shortcut.eq(shortcut))
            .filter(bookmarks::deleted_at.eq(0))
            .order((bookmarks::created_at.desc(), bookmarks::id.desc()))
            .select(bookmarks::url)
            .first::<String>(&mut *conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;
        Ok(url)
    }

    #[instrument(skip_all, level = "debug")]
    fn all_tags(&self) -> DomainResult<Vec<Tag>> {
        Ok(self.tag_usage(false)?)
    }

    #[instrument(skip_all, level = "debug")]
    fn all_authors(&self) -> DomainResult<Vec<Tag>> {
        Ok(self.tag_usage(true)?)
    }

    #[instrument(skip(self), level = "trace")]
    fn tags_of(&self, bookmark_id: i32) -> DomainResult<Vec<Tag>> {
        let mut conn = self.get_connection()?;
        let rows: Vec<TagUsage> = sql_query(BOOKMARK_TAGS_QUERY)
            .bind::<Integer, _>(bookmark_id)
            .load(&mut *conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::infrastructure::repositories::sqlite::model::{DbTagBookmark, NewTag};
    use crate::infrastructure::repositories::sqlite::tag_repository;
    use crate::util::testing::{setup_test_db, setup_test_db_with_clock, TEST_EPOCH};
    use std::collections::BTreeSet;

    fn draft(url: &str, tags: &str) -> BookmarkDraft {
        BookmarkDraft::builder()
            .url(url)
            .title(format!("Title of {}", url))
            .tags(tags)
            .build()
            .unwrap()
    }

    fn links(repo: &SqliteBookmarkRepository, bookmark_id: i32) -> Vec<DbTagBookmark> {
        let mut conn = repo.get_connection().unwrap();
        tags_bookmarks::table
            .filter(tags_bookmarks::bookmark_id.eq(bookmark_id))
            .select((tags_bookmarks::bookmark_id, tags_bookmarks::tag_id))
            .order(tags_bookmarks::tag_id)
            .load::<DbTagBookmark>(&mut *conn)
            .unwrap()
    }

    fn tag_names(repo: &SqliteBookmarkRepository, bookmark_id: i32) -> BTreeSet<String> {
        repo.tags_of(bookmark_id)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect()
    }

    fn tag_row_count(repo: &SqliteBookmarkRepository) -> i64 {
        let mut conn = repo.get_connection().unwrap();
        tags::table.count().get_result(&mut *conn).unwrap()
    }

    #[test]
    fn given_new_draft_when_create_then_row_and_links_consistent() {
        let (_dir, repo) = setup_test_db();

        let id = repo
            .create(&draft("https://go.dev", "go  systems go by:rob"))
            .unwrap();
        let bm = repo.get_by_id(id).unwrap().unwrap();

        assert_eq!(bm.url, "https://go.dev");
        assert_eq!(bm.tags, "go systems by:rob");
        assert_eq!(bm.created_at, TEST_EPOCH);
        assert_eq!(bm.updated_at, TEST_EPOCH);
        assert_eq!(bm.read_at, TEST_EPOCH);
        assert_eq!(bm.deleted_at, 0);

        let stored: BTreeSet<String> = bm.all_tags().into_iter().collect();
        assert_eq!(tag_names(&repo, id), stored);
        assert_eq!(links(&repo, id).len(), 3);
    }

    #[test]
    fn given_to_read_draft_when_create_then_unread() {
        let (_dir, repo) = setup_test_db();
        let mut d = draft("https://later.test", "");
        d.to_read = true;

        let id = repo.create(&d).unwrap();

        assert_eq!(repo.get_by_id(id).unwrap().unwrap().read_at, 0);
        let unread: Vec<i32> = repo.get_unread().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(unread, vec![id]);
        assert!(links(&repo, id).is_empty());
    }

    #[test]
    fn given_two_bookmarks_sharing_tag_when_create_then_one_tag_row() {
        let (_dir, repo) = setup_test_db();

        let a = repo.create(&draft("https://a.test", "rust")).unwrap();
        let b = repo.create(&draft("https://b.test", "rust by:ann")).unwrap();

        assert_eq!(tag_row_count(&repo), 2);
        assert_eq!(links(&repo, a)[0].tag_id, links(&repo, b)[0].tag_id);
    }

    #[test]
    fn given_unchanged_tags_when_update_then_links_identical() {
        let (_dir, repo, clock) = setup_test_db_with_clock();
        let id = repo.create(&draft("https://x.test", "a b by:c")).unwrap();
        let before = links(&repo, id);

        clock.advance(60);
        let mut edit = draft("https://x.test/new", "a b by:c");
        edit.title = "Renamed".to_string();
        repo.update(id, &edit).unwrap();

        let bm = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(bm.title, "Renamed");
        assert_eq!(bm.url, "https://x.test/new");
        assert_eq!(bm.created_at, TEST_EPOCH);
        assert_eq!(bm.updated_at, TEST_EPOCH + 60);
        assert_eq!(links(&repo, id), before);
    }

    #[test]
    fn given_changed_tags_when_update_then_links_replaced_and_tags_kept() {
        let (_dir, repo) = setup_test_db();
        let id = repo.create(&draft("https://x.test", "old shared")).unwrap();

        repo.update(id, &draft("https://x.test", "shared new")).unwrap();

        let expected: BTreeSet<String> = ["new", "shared"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tag_names(&repo, id), expected);

        // Tags are never removed, even when nothing references them.
        let mut conn = repo.get_connection().unwrap();
        assert!(tag_repository::find_id(&mut conn, "old").unwrap().is_some());
        assert_eq!(tag_row_count(&repo), 3);
    }

    #[test]
    fn given_read_bookmark_when_edited_as_read_then_read_time_preserved() {
        let (_dir, repo, clock) = setup_test_db_with_clock();
        let id = repo.create(&draft("https://x.test", "")).unwrap();

        clock.advance(100);
        repo.update(id, &draft("https://x.test", "")).unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().read_at, TEST_EPOCH);

        let mut to_read = draft("https://x.test", "");
        to_read.to_read = true;
        repo.update(id, &to_read).unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().read_at, 0);

        let now = clock.advance(100);
        repo.update(id, &draft("https://x.test", "")).unwrap();
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().read_at, now);
    }

    #[test]
    fn given_missing_or_deleted_bookmark_when_update_then_not_found() {
        let (_dir, repo) = setup_test_db();
        let id = repo.create(&draft("https://x.test", "")).unwrap();
        repo.soft_delete(id).unwrap();

        for target in [id, 9999] {
            let err = repo.update(target, &draft("https://y.test", "")).unwrap_err();
            assert!(matches!(err, DomainError::BookmarkNotFound(_)));
        }
    }

    #[test]
    fn given_unread_bookmark_when_mark_read_then_read_at_is_now() {
        let (_dir, repo, clock) = setup_test_db_with_clock();
        let mut d = draft("https://x.test", "");
        d.to_read = true;
        let id = repo.create(&d).unwrap();

        let now = clock.advance(30);
        assert!(repo.mark_read(id).unwrap());

        assert_eq!(repo.get_by_id(id).unwrap().unwrap().read_at, now);
        assert!(repo.get_unread().unwrap().is_empty());
        assert!(!repo.mark_read(4242).unwrap());
    }

    #[test]
    fn given_deleted_bookmark_when_listing_then_hidden_but_links_kept() {
        let (_dir, repo) = setup_test_db();
        let keep = repo.create(&draft("https://keep.test", "t")).unwrap();
        let gone = repo.create(&draft("https://gone.test", "t")).unwrap();

        assert!(repo.soft_delete(gone).unwrap());
        assert!(!repo.soft_delete(gone).unwrap());

        assert!(repo.get_by_id(gone).unwrap().is_none());
        let ids: Vec<i32> = repo.get_all().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![keep]);
        assert_eq!(links(&repo, gone).len(), 1);

        let tags = repo.all_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].num_entries, 1);
    }

    #[test]
    fn given_deleted_unread_shortcut_with_author_when_querying_then_excluded_everywhere() {
        let (_dir, repo) = setup_test_db();
        let live = repo.create(&draft("https://live.test", "shared")).unwrap();
        let gone_draft = BookmarkDraft::builder()
            .url("https://gone.test")
            .shortcut("gone")
            .tags("shared by:ghost")
            .to_read(true)
            .build()
            .unwrap();
        let gone = repo.create(&gone_draft).unwrap();
        assert_eq!(repo.get_unread().unwrap().len(), 1);

        assert!(repo.soft_delete(gone).unwrap());

        let shared: Vec<i32> = repo.get_by_tag("shared").unwrap().iter().map(|b| b.id).collect();
        assert_eq!(shared, vec![live]);
        assert!(repo.get_by_tag("by:ghost").unwrap().is_empty());
        assert!(repo.get_unread().unwrap().is_empty());
        assert!(repo.get_shortcuts().unwrap().is_empty());
        assert_eq!(repo.shortcut_url("gone").unwrap(), None);
        assert!(repo.all_authors().unwrap().is_empty());
        assert!(repo.get_by_id(gone).unwrap().is_none());
        let tags = repo.all_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!((tags[0].name.as_str(), tags[0].num_entries), ("shared", 1));
        assert_eq!(links(&repo, gone).len(), 2);
    }

    #[test]
    fn given_bookmarks_when_get_all_then_newest_first() {
        let (_dir, repo, clock) = setup_test_db_with_clock();
        let first = repo.create(&draft("https://1.test", "")).unwrap();
        clock.advance(10);
        let second = repo.create(&draft("https://2.test", "")).unwrap();
        let third = repo.create(&draft("https://3.test", "")).unwrap();

        let ids: Vec<i32> = repo.get_all().unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn given_reused_shortcut_when_lookup_then_most_recent_url() {
        let (_dir, repo, clock) = setup_test_db_with_clock();
        let mut old = draft("https://old.test", "");
        old.shortcut = "gh".to_string();
        repo.create(&old).unwrap();

        clock.advance(5);
        let mut new = draft("https://new.test", "");
        new.shortcut = "gh".to_string();
        repo.create(&new).unwrap();
        repo.create(&draft("https://plain.test", "")).unwrap();

        assert_eq!(
            repo.shortcut_url("gh").unwrap().as_deref(),
            Some("https://new.test")
        );
        assert_eq!(repo.shortcut_url("nope").unwrap(), None);
        assert_eq!(repo.get_shortcuts().unwrap().len(), 2);
    }

    #[test]
    fn given_tagged_bookmarks_when_get_by_tag_then_exact_name_match() {
        let (_dir, repo) = setup_test_db();
        let a = repo.create(&draft("https://a.test", "Rust")).unwrap();
        let b = repo.create(&draft("https://b.test", "rust")).unwrap();

        let hits: Vec<i32> = repo
            .get_by_tag("rust")
            .unwrap()
            .iter()
            .map(|bm| bm.id)
            .collect();
        assert_eq!(hits, vec![b]);
        assert_ne!(a, b);
        assert!(repo.get_by_tag("missing").unwrap().is_empty());
    }

    #[test]
    fn given_mixed_tags_when_listing_then_authors_split_and_counted() {
        let (_dir, repo) = setup_test_db();
        repo.create(&draft("https://a.test", "zig by:andrew c")).unwrap();
        repo.create(&draft("https://b.test", "c by:andrew")).unwrap();

        let plain: Vec<(String, i64)> = repo
            .all_tags()
            .unwrap()
            .into_iter()
            .map(|t| (t.name, t.num_entries))
            .collect();
        assert_eq!(plain, vec![("c".to_string(), 2), ("zig".to_string(), 1)]);

        let authors = repo.all_authors().unwrap();
        assert_eq!(authors.len(), 1);
        assert!(authors[0].is_author);
        assert_eq!(authors[0].display_name(), "andrew");
        assert_eq!(authors[0].num_entries, 2);
    }

    #[test]
    fn given_import_record_when_import_then_history_kept() {
        let (_dir, repo) = setup_test_db();
        let record = ImportRecord::new("https://old.test", "Old", "notes", "a by:b", 1_000, 0);

        let id = repo.import(&record).unwrap();
        let bm = repo.get_by_id(id).unwrap().unwrap();

        assert_eq!(bm.created_at, 1_000);
        assert_eq!(bm.updated_at, 1_000);
        assert_eq!(bm.read_at, 0);
        assert_eq!(links(&repo, id).len(), 2);
    }

    #[test]
    fn given_failing_closure_when_write_then_nothing_persisted() {
        let (_dir, repo) = setup_test_db();

        let result: SqliteResult<i32> = repo.write(|tx| {
            tx.create(&draft("https://rolled.back", "fresh by:ghost"))?;
            Err(SqliteRepositoryError::OperationFailed("forced".to_string()))
        });

        assert!(result.is_err());
        assert!(repo.get_all().unwrap().is_empty());
        assert_eq!(tag_row_count(&repo), 0);
    }

    #[test]
    fn given_write_when_resolving_tags_then_shares_clock_sample() {
        let (_dir, repo) = setup_test_db();

        let (now, id) = repo
            .write(|tx| Ok((tx.now(), tx.resolve_tag("by:someone")?)))
            .unwrap();

        assert_eq!(now, TEST_EPOCH);
        let mut conn = repo.get_connection().unwrap();
        assert_eq!(
            tag_repository::find_id(&mut conn, "by:someone").unwrap(),
            Some(id)
        );
    }

    #[test]
    fn given_duplicate_tag_insert_when_mapped_then_constraint_violation() {
        let (_dir, repo) = setup_test_db();
        let mut conn = repo.get_connection().unwrap();
        let tag = NewTag {
            name: "dup",
            is_author: false,
        };
        diesel::insert_into(tags::table)
            .values(&tag)
            .execute(&mut *conn)
            .unwrap();

        let err = diesel::insert_into(tags::table)
            .values(&tag)
            .execute(&mut *conn)
            .unwrap_err();
        let domain = DomainError::from(SqliteRepositoryError::from(err));

        assert!(domain.is_conflict());
    }

    #[test]
    fn given_concurrent_writers_when_same_new_tag_then_single_tag_row() {
        let (_dir, repo) = setup_test_db();

        std::thread::scope(|s| {
            for i in 0..8 {
                let repo = repo.clone();
                s.spawn(move || {
                    repo.create(&draft(&format!("https://{}.test", i), "shared by:team"))
                        .unwrap();
                });
            }
        });

        assert_eq!(repo.get_all().unwrap().len(), 8);
        assert_eq!(tag_row_count(&repo), 2);
        let shared = repo
            .all_tags()
            .unwrap()
            .into_iter()
            .find(|t| t.name == "shared")
            .unwrap();
        assert_eq!(shared.num_entries, 8);
    }
}
