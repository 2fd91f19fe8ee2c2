//! Self-service profile port.

use async_trait::async_trait;
use domain::account::Account;

use crate::dto::ProfileUpdate;
use crate::error::Result;

/// Inbound port for self-service profile updates.
#[async_trait]
pub trait UpdateProfile: Send + Sync {
    async fn update_profile(
        &self,
        account: &Account,
        update: ProfileUpdate,
    ) -> Result<Account>;
}
