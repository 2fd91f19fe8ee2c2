//! Domain core of the account lifecycle engine.
//!
//! Entities, field-level validation and slug derivation only. No I/O,
//! no async; the application crate owns workflows and the adapters
//! crate owns the outside world.

pub mod account;
pub mod role;
pub mod slug;
pub mod validate;
