//! Inventory screen: item entry/edit form plus the stock list.
//!
//! # Invariants
//! - The form is submitted only when name, price and quantity are all non-blank.
//! - Price and quantity must parse as non-negative numbers.

use crate::model::item::{format_price, Item, ItemId, NewItem};
use crate::repo::RepoError;
use crate::state::inventory_state::{InventoryUiState, InventoryViewModel};
use std::fmt::Write as _;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

const TITLE: &str = "INVENTORY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("`{0}` must not be blank")]
    Blank(&'static str),
    #[error("`{field}` is not a valid number: `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("`{0}` must not be negative")]
    Negative(&'static str),
}

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Text fields of the item entry/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl ItemForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
        }
    }

    /// Whether every field holds non-blank text.
    pub fn is_valid(&self) -> bool {
        [&self.name, &self.price, &self.quantity]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn to_new_item(&self) -> Result<NewItem, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Blank("name"));
        }

        let price = parse_field::<f64>("price", &self.price)?;
        if !price.is_finite() {
            return Err(FormError::InvalidNumber {
                field: "price",
                value: self.price.trim().to_string(),
            });
        }
        if price < 0.0 {
            return Err(FormError::Negative("price"));
        }

        let quantity = parse_field::<i64>("quantity", &self.quantity)?;
        if quantity < 0 {
            return Err(FormError::Negative("quantity"));
        }

        Ok(NewItem::new(name, price, quantity))
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::Blank(field));
    }
    trimmed.parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: trimmed.to_string(),
    })
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub quantity: i64,
    pub in_stock: bool,
}

pub struct InventoryScreen {
    view_model: Arc<InventoryViewModel>,
    snapshot: watch::Receiver<InventoryUiState>,
    form: ItemForm,
    editing: Option<ItemId>,
}

impl InventoryScreen {
    pub fn new(view_model: Arc<InventoryViewModel>) -> Self {
        let snapshot = view_model.subscribe();
        Self {
            view_model,
            snapshot,
            form: ItemForm::default(),
            editing: None,
        }
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ItemForm {
        &mut self.form
    }

    /// Id of the item currently loaded for editing, if any.
    pub fn editing(&self) -> Option<ItemId> {
        self.editing
    }

    /// Adds the form contents as a new item and resets the form.
    ///
    /// Returns `Ok(None)` and stores nothing when a field is blank.
    pub async fn submit(&mut self) -> Result<Option<Item>, ScreenError> {
        if !self.form.is_valid() {
            return Ok(None);
        }

        let draft = self.form.to_new_item()?;
        let created = self.view_model.add(draft).await?;
        self.form = ItemForm::default();
        Ok(Some(created))
    }

    /// Loads the snapshot row with `id` into the form.
    ///
    /// Returns `false` when the row is not in the snapshot.
    pub fn edit(&mut self, id: ItemId) -> bool {
        match self.view_model.item(id) {
            Some(item) => {
                self.form = ItemForm::from_item(&item);
                self.editing = Some(id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form = ItemForm::default();
    }

    /// Replaces the edited item with the form contents.
    ///
    /// Returns `Ok(None)` when nothing is being edited or a field is blank.
    pub async fn save_edit(&mut self) -> Result<Option<Item>, ScreenError> {
        let Some(id) = self.editing else {
            return Ok(None);
        };
        if !self.form.is_valid() {
            return Ok(None);
        }

        let item = self.form.to_new_item()?.into_item(id);
        let updated = self.view_model.update(item).await?;
        self.cancel_edit();
        Ok(Some(updated))
    }

    pub async fn sell_one(&self, id: ItemId) -> Result<Option<Item>, ScreenError> {
        Ok(self.view_model.sell_one(id).await?)
    }

    pub async fn delete(&self, id: ItemId) -> Result<bool, ScreenError> {
        Ok(self.view_model.delete(id).await?)
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) {
        let _ = self.snapshot.changed().await;
    }

    pub fn rows(&self) -> Vec<ItemRow> {
        self.snapshot
            .borrow()
            .items
            .iter()
            .map(|item| ItemRow {
                id: item.id,
                name: item.name.clone(),
                price: format_price(item.price),
                quantity: item.quantity,
                in_stock: item.is_in_stock(),
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = String::from(TITLE);
        out.push('\n');
        for row in self.rows() {
            let stock = if row.in_stock {
                format!("qty {}", row.quantity)
            } else {
                "out of stock".to_string()
            };
            let _ = writeln!(out, "#{} {} {} {stock}", row.id, row.name, row.price);
        }
        out
    }
}
