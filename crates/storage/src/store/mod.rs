#![forbid(unsafe_code)]

mod contents;
mod error;
mod schema;

pub use error::StoreError;

use cart_core::ids::{ProductId, Username};
use contents::{decode_contents, encode_contents};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE_NAME: &str = "carts.db";

#[derive(Debug)]
pub struct CartStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl CartStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        schema::install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Contents for `username`, in insertion order. A user without a cart row
    /// reads the same as a user with an emptied cart.
    pub fn get_cart(&self, username: &Username) -> Result<Vec<ProductId>, StoreError> {
        let stored = self
            .conn
            .query_row(
                "SELECT contents FROM carts WHERE username = ?1",
                params![username.as_str()],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        decode_contents(stored.flatten())
    }

    /// Appends `product` to the user's cart, creating the row on first add.
    /// Duplicates are kept; there is no catalog check.
    pub fn add_to_cart(
        &mut self,
        username: &Username,
        product: ProductId,
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let mut items = decode_contents(cart_contents_tx(&tx, username)?.flatten())?;
        items.push(product);
        upsert_cart_tx(&tx, username, &items)?;
        tx.commit()?;
        Ok(())
    }

    /// Removes the first occurrence of `product` from the user's cart. A
    /// missing user or a missing product is a no-op, not an error.
    pub fn remove_from_cart(
        &mut self,
        username: &Username,
        product: ProductId,
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let Some(stored) = cart_contents_tx(&tx, username)? else {
            return Ok(());
        };
        let mut items = decode_contents(stored)?;
        let Some(position) = items.iter().position(|item| *item == product) else {
            return Ok(());
        };
        items.remove(position);
        upsert_cart_tx(&tx, username, &items)?;
        tx.commit()?;
        Ok(())
    }

    /// Deleting a cart that never existed is a no-op.
    pub fn delete_cart(&mut self, username: &Username) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM carts WHERE username = ?1",
            params![username.as_str()],
        )?;
        Ok(())
    }
}

/// Outer `None` means no row for this user; inner `None` means a row whose
/// contents column is NULL (reads as an empty cart).
fn cart_contents_tx(
    tx: &Transaction<'_>,
    username: &Username,
) -> Result<Option<Option<String>>, StoreError> {
    Ok(tx
        .query_row(
            "SELECT contents FROM carts WHERE username = ?1",
            params![username.as_str()],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?)
}

fn upsert_cart_tx(
    tx: &Transaction<'_>,
    username: &Username,
    items: &[ProductId],
) -> Result<(), StoreError> {
    tx.execute(
        r#"
        INSERT INTO carts(username, contents, cost)
        VALUES (?1, ?2, 0)
        ON CONFLICT(username) DO UPDATE SET contents=excluded.contents, cost=excluded.cost
        "#,
        params![username.as_str(), encode_contents(items)],
    )?;
    Ok(())
}
