//! Clock port.

use chrono::{DateTime, Utc};

/// Port for reading the current time, so workflows stay testable with
/// a pinned clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
