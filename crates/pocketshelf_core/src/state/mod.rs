//! Per-screen state holders.
//!
//! # Responsibility
//! - Mirror one store into an observable snapshot.
//! - Dispatch store calls to the blocking pool and patch the snapshot with
//!   the record each call returns.
//!
//! # Invariants
//! - The snapshot is only replaced wholesale by `reload()`; every other
//!   mutation patches exactly the affected row.
//! - Intents naming an id absent from the snapshot never reach the store.
//! - Concurrent intents are not serialized; a double-submitted add stores two
//!   rows.

pub mod inventory_state;
pub mod todo_state;
