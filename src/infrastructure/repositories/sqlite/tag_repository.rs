// src/infrastructure/repositories/sqlite/tag_repository.rs
//! Tag lookup and lazy creation.
//!
//! These functions take the connection of an open write transaction; they
//! never begin or commit one themselves.

use super::error::SqliteResult;
use super::model::{DbTag, NewTag};
use super::schema::tags::dsl;
use crate::domain::tag::is_author_name;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Return the id of the tag named `name`, inserting it if absent.
///
/// An existing tag is returned untouched, including its `is_author` flag.
/// A new tag is an author tag iff its name carries the `by:` marker.
#[instrument(skip(conn), level = "trace")]
pub fn resolve_or_create(conn: &mut SqliteConnection, name: &str) -> SqliteResult<i32> {
    if let Some(id) = find_id(conn, name)? {
        return Ok(id);
    }

    let id = diesel::insert_into(dsl::tags)
        .values(&NewTag {
            name,
            is_author: is_author_name(name),
        })
        .returning(dsl::id)
        .get_result::<i32>(conn)?;

    debug!("Created tag {} with id {}", name, id);
    Ok(id)
}

/// Resolve every token, collapsing duplicates to one entry per name.
#[instrument(skip(conn), level = "debug")]
pub fn resolve_all(
    conn: &mut SqliteConnection,
    names: &[String],
) -> SqliteResult<BTreeMap<String, i32>> {
    let mut resolved = BTreeMap::new();
    for name in names {
        let id = resolve_or_create(conn, name)?;
        resolved.insert(name.clone(), id);
    }
    Ok(resolved)
}

pub fn find_id(conn: &mut SqliteConnection, name: &str) -> SqliteResult<Option<i32>> {
    Ok(dsl::tags
        .filter(dsl::name.eq(name))
        .select(dsl::id)
        .first::<i32>(conn)
        .optional()?)
}

pub fn find_by_name(conn: &mut SqliteConnection, name: &str) -> SqliteResult<Option<DbTag>> {
    Ok(dsl::tags
        .filter(dsl::name.eq(name))
        .select(DbTag::as_select())
        .first(conn)
        .optional()?)
}
