//! Domain records owned by the two local stores.
//!
//! # Responsibility
//! - Define the inventory `Item` and the `TodoItem` records.
//! - Provide insert drafts that carry every field except the generated id.
//!
//! # Invariants
//! - Ids are assigned by the store at insertion time and never mutated.
//! - In-memory records are disposable copies of stored rows.

pub mod item;
pub mod todo;
