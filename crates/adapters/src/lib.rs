//! Adapters wiring the application's outbound ports to the outside
//! world: PostgreSQL and in-memory stores, password and token digests,
//! clocks and notification dispatch.

pub mod outbound;
