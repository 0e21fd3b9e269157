//! Headless screens rendering state-holder snapshots.
//!
//! # Responsibility
//! - Own transient input buffers and validate them before forwarding intents.
//! - Render the latest snapshot as rows or plain text.
//!
//! # Invariants
//! - Screens never talk to the store directly.
//! - Invalid or blank input never reaches a state holder.

pub mod inventory_screen;
pub mod todo_screen;
