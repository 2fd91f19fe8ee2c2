//! Authentication workflow.

use std::sync::Arc;

use async_trait::async_trait;
use domain::account::Account;

use crate::error::{Result, WorkflowError};
use crate::ports::inbound::Authenticate;
use crate::ports::outbound::{AccountStore, Clock, PasswordDigest};
use crate::usecases::normalize_email;

/// The ordered credential checks, shared with the password-change
/// workflow so its failures propagate unchanged.
///
/// The order is observable behavior: a wrong password on a blocked,
/// unactivated account still reports the wrong password.
pub(crate) async fn check_credentials(
    store: &dyn AccountStore,
    digest: &dyn PasswordDigest,
    email: &str,
    password: &str,
) -> Result<Account> {
    let Some(account) = store.find_by_email(&normalize_email(email)).await?
    else {
        return Err(WorkflowError::UnauthorizedWrongEmail);
    };

    if !digest.verify(password, &account.salt, &account.hashed_secret)? {
        return Err(WorkflowError::UnauthorizedWrongPassword);
    }
    if !account.activated {
        return Err(WorkflowError::UnauthorizedNotActivated);
    }
    if account.blocked {
        return Err(WorkflowError::UnauthorizedAccountBlocked);
    }

    Ok(account)
}

/// Authentication workflow service.
pub struct AuthenticateUseCase {
    store: Arc<dyn AccountStore>,
    digest: Arc<dyn PasswordDigest>,
    clock: Arc<dyn Clock>,
}

impl AuthenticateUseCase {
    pub fn new(
        store: Arc<dyn AccountStore>,
        digest: Arc<dyn PasswordDigest>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            digest,
            clock,
        }
    }
}

#[async_trait]
impl Authenticate for AuthenticateUseCase {
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account> {
        match check_credentials(
            self.store.as_ref(),
            self.digest.as_ref(),
            email,
            password,
        )
        .await
        {
            Ok(account) => Ok(account),
            Err(err) => {
                tracing::debug!(error = %err, "authentication refused");
                Err(err)
            },
        }
    }

    async fn record_login(
        &self,
        account: &Account,
        ip: Option<&str>,
    ) -> Result<Account> {
        let mut account = account.clone();
        account.login_count += 1;
        account.last_ip = account.current_ip.take();
        account.current_ip = ip.map(str::to_string);
        account.last_login_at = account.current_login_at.take();
        account.current_login_at = Some(self.clock.now());

        self.store.raw_update(&account).await?;
        Ok(account)
    }

    async fn record_failed_login(
        &self,
        email: &str,
        ip: Option<&str>,
    ) -> Result<()> {
        let Some(mut account) =
            self.store.find_by_email(&normalize_email(email)).await?
        else {
            return Ok(());
        };

        account.last_failed_ip = ip.map(str::to_string);
        account.last_failed_login_at = Some(self.clock.now());

        self.store.raw_update(&account).await?;
        Ok(())
    }
}
