//! State holder for the inventory screen.

use crate::db::Database;
use crate::model::item::{Item, ItemId, NewItem};
use crate::repo::item_repo::{ItemRepository, SqliteItemRepository};
use crate::repo::RepoResult;
use log::{debug, error};
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Observable snapshot published to the inventory screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryUiState {
    /// Rows ordered by name, then id.
    pub items: Vec<Item>,
}

impl InventoryUiState {
    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn upsert(&mut self, item: Item) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.push(item);
        self.items.sort_by(listing_order);
    }
}

fn listing_order(a: &Item, b: &Item) -> CmpOrdering {
    a.name.cmp(&b.name).then(a.id.cmp(&b.id))
}

/// Bridges the `items` store to subscribers of [`InventoryUiState`].
pub struct InventoryViewModel {
    db: Database,
    state: watch::Sender<InventoryUiState>,
    initialized: AtomicBool,
}

impl InventoryViewModel {
    pub fn new(db: Database) -> Self {
        let (state, _) = watch::channel(InventoryUiState::default());
        Self {
            db,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<InventoryUiState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> InventoryUiState {
        self.state.borrow().clone()
    }

    /// Looks `id` up in the current snapshot.
    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.state.borrow().find(id).cloned()
    }

    /// Loads the table once per holder; a failed load may be retried.
    pub async fn initialize(&self) -> RepoResult<()> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Err(err) = self.reload().await {
            self.initialized.store(false, Ordering::SeqCst);
            return Err(err);
        }
        Ok(())
    }

    pub async fn reload(&self) -> RepoResult<()> {
        let items = self
            .db
            .run(|conn| SqliteItemRepository::new(conn).list_items())
            .await
            .inspect_err(|err| {
                error!("event=item_reload module=state status=error error={err}");
            })?;

        debug!(
            "event=item_reload module=state status=ok count={}",
            items.len()
        );
        self.state.send_replace(InventoryUiState { items });
        Ok(())
    }

    pub async fn add(&self, item: NewItem) -> RepoResult<Item> {
        let created = self
            .db
            .run(move |conn| SqliteItemRepository::new(conn).insert_item(&item))
            .await?;

        debug!("event=item_add module=state status=ok id={}", created.id);
        let row = created.clone();
        self.state.send_modify(|state| state.upsert(row));
        Ok(created)
    }

    /// Replaces every field of the stored item; fails with `NotFound` when absent.
    pub async fn update(&self, item: Item) -> RepoResult<Item> {
        let updated = self
            .db
            .run(move |conn| SqliteItemRepository::new(conn).update_item(&item))
            .await?;

        debug!("event=item_update module=state status=ok id={}", updated.id);
        let row = updated.clone();
        self.state.send_modify(|state| state.upsert(row));
        Ok(updated)
    }

    /// Sells one unit of the snapshot row with `id`.
    ///
    /// Returns `Ok(None)` without touching the store when `id` is not in the
    /// snapshot.
    pub async fn sell_one(&self, id: ItemId) -> RepoResult<Option<Item>> {
        if self.state.borrow().find(id).is_none() {
            debug!("event=item_sell module=state status=skipped id={id}");
            return Ok(None);
        }

        let updated = self
            .db
            .run(move |conn| SqliteItemRepository::new(conn).sell_one(id))
            .await?;

        debug!(
            "event=item_sell module=state status=ok id={id} quantity={}",
            updated.quantity
        );
        let row = updated.clone();
        self.state.send_modify(|state| state.upsert(row));
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: ItemId) -> RepoResult<bool> {
        if self.state.borrow().find(id).is_none() {
            debug!("event=item_delete module=state status=skipped id={id}");
            return Ok(false);
        }

        let removed = self
            .db
            .run(move |conn| SqliteItemRepository::new(conn).delete_item(id))
            .await?;

        debug!("event=item_delete module=state status=ok id={id} removed={removed}");
        self.state
            .send_modify(|state| state.items.retain(|item| item.id != id));
        Ok(removed)
    }
}
