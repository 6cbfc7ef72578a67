use comfy_table::{Cell, Table};
use rusqlite::Connection;

use crate::db::get_connection;
use crate::error::{Result, RupeeError};
use crate::settings::{current_user, get_data_dir};

pub fn add(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    add_category(&conn, &current_user(), name)?;
    println!("Added category: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let categories = list_categories(&conn, &current_user())?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for (id, name) in categories {
        table.add_row(vec![Cell::new(id), Cell::new(name)]);
    }
    println!("Categories\n{table}");
    Ok(())
}

pub fn rename(name: &str, new_name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let id = find_category_by_name(&conn, &user, name)?;
    rename_category(&conn, &user, id, new_name)?;
    println!("Renamed category {name} to: {new_name}");
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let id = find_category_by_name(&conn, &user, name)?;
    remove_category(&conn, id)?;
    println!("Removed category: {name}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Data layer
// ---------------------------------------------------------------------------

pub fn add_category(conn: &Connection, user_id: &str, name: &str) -> Result<i64> {
    if name.trim().is_empty() {
        return Err(RupeeError::Other("Category name is required".into()));
    }
    let live: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1 AND user_id = ?2 AND deleted_at IS NULL)",
        rusqlite::params![name, user_id],
        |row| row.get(0),
    )?;
    if live {
        return Err(RupeeError::Other(format!("Category name already exists: {name}")));
    }
    // A removed category keeps its row to satisfy UNIQUE(name, user_id);
    // re-adding the same name revives it instead of inserting.
    let revived = conn.execute(
        "UPDATE categories SET deleted_at = NULL, updated_at = datetime('now')
         WHERE name = ?1 AND user_id = ?2 AND deleted_at IS NOT NULL",
        rusqlite::params![name, user_id],
    )?;
    if revived > 0 {
        return find_category_by_name(conn, user_id, name);
    }
    conn.execute(
        "INSERT INTO categories (name, user_id) VALUES (?1, ?2)",
        rusqlite::params![name, user_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_category_by_name(conn: &Connection, user_id: &str, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM categories WHERE name = ?1 AND user_id = ?2 AND deleted_at IS NULL",
        rusqlite::params![name, user_id],
        |row| row.get(0),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => RupeeError::UnknownCategory(name.to_string()),
        other => RupeeError::Db(other),
    })
}

pub fn list_categories(conn: &Connection, user_id: &str) -> Result<Vec<(i64, String)>> {
    let mut stmt = conn.prepare(
        "SELECT id, name FROM categories WHERE user_id = ?1 AND deleted_at IS NULL ORDER BY name ASC",
    )?;
    let categories = stmt
        .query_map([user_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(categories)
}

pub fn rename_category(conn: &Connection, user_id: &str, id: i64, new_name: &str) -> Result<()> {
    if new_name.trim().is_empty() {
        return Err(RupeeError::Other("Category name is required".into()));
    }
    let taken: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1 AND user_id = ?2 AND id != ?3 AND deleted_at IS NULL)",
        rusqlite::params![new_name, user_id, id],
        |row| row.get(0),
    )?;
    if taken {
        return Err(RupeeError::Other(format!("Category name already exists: {new_name}")));
    }
    let updated = conn.execute(
        "UPDATE categories SET name = ?1, updated_at = datetime('now') \
         WHERE id = ?2 AND deleted_at IS NULL",
        rusqlite::params![new_name, id],
    )?;
    if updated == 0 {
        return Err(RupeeError::UnknownCategory(format!("id {id}")));
    }
    Ok(())
}

/// Soft-delete a category; its transactions keep their category_id but the
/// category stops appearing in listings and lookups.
pub fn remove_category(conn: &Connection, id: i64) -> Result<()> {
    let updated = conn.execute(
        "UPDATE categories SET deleted_at = datetime('now') WHERE id = ?1 AND deleted_at IS NULL",
        [id],
    )?;
    if updated == 0 {
        return Err(RupeeError::UnknownCategory(format!("id {id}")));
    }
    Ok(())
}
