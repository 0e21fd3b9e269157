//! Inventory repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `items` table.
//! - Decrement stock in a single statement so concurrent sales cannot go negative.
//!
//! # Invariants
//! - `list_items` is ordered by `name ASC, id ASC`.
//! - Prices must be finite; NaN/infinite values are rejected as invalid data.

use super::{RepoError, RepoResult};
use crate::model::item::{Item, ItemId, NewItem};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ITEM_SELECT_SQL: &str = "SELECT id, name, price, quantity FROM items";

/// Repository interface for inventory rows.
pub trait ItemRepository {
    fn list_items(&self) -> RepoResult<Vec<Item>>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn insert_item(&self, item: &NewItem) -> RepoResult<Item>;
    fn update_item(&self, item: &Item) -> RepoResult<Item>;
    /// Sells one unit; quantity is floored at zero.
    fn sell_one(&self, id: ItemId) -> RepoResult<Item>;
    fn delete_item(&self, id: ItemId) -> RepoResult<bool>;
}

/// SQLite-backed inventory repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn list_items(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn insert_item(&self, item: &NewItem) -> RepoResult<Item> {
        ensure_finite_price(item.price)?;
        self.conn.execute(
            "INSERT INTO items (name, price, quantity) VALUES (?1, ?2, ?3);",
            params![item.name.as_str(), item.price, item.quantity],
        )?;

        Ok(item.clone().into_item(self.conn.last_insert_rowid()))
    }

    fn update_item(&self, item: &Item) -> RepoResult<Item> {
        ensure_finite_price(item.price)?;
        let changed = self.conn.execute(
            "UPDATE items SET name = ?1, price = ?2, quantity = ?3 WHERE id = ?4;",
            params![item.name.as_str(), item.price, item.quantity, item.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(item.id));
        }

        Ok(item.clone())
    }

    fn sell_one(&self, id: ItemId) -> RepoResult<Item> {
        let updated = self
            .conn
            .query_row(
                "UPDATE items SET quantity = MAX(quantity - 1, 0) WHERE id = ?1
                 RETURNING id, name, price, quantity;",
                [id],
                |row| Ok(parse_item_row(row)),
            )
            .optional()?;

        match updated {
            Some(item) => item,
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM items WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let price: f64 = row.get("price")?;
    if !price.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "invalid price `{price}` in items.price"
        )));
    }

    Ok(Item {
        id: row.get("id")?,
        name: row.get("name")?,
        price,
        quantity: row.get("quantity")?,
    })
}

fn ensure_finite_price(price: f64) -> RepoResult<()> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(RepoError::InvalidData(format!("price must be finite, got `{price}`")))
    }
}
