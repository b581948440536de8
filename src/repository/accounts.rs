//! Login account and password reset methods on Repository

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::account::{Account, PasswordReset},
};

impl Repository {
    pub async fn accounts_find_by_email(&self, email: &str) -> Option<Account> {
        let state = self.state.read().await;
        state.accounts.values().find(|a| a.email == email).cloned()
    }

    /// Insert an account; the email check and the insert share one lock
    pub async fn accounts_create(&self, account: Account) -> AppResult<Account> {
        let mut state = self.state.write().await;
        if state.accounts.values().any(|a| a.email == account.email) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    pub async fn accounts_update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::AccountNotFound("Account does not exist".to_string()))?;
        account.password_hash = password_hash;
        Ok(())
    }

    /// Store a reset, replacing any earlier one for the same account
    pub async fn password_resets_store(&self, reset: PasswordReset) {
        let mut state = self.state.write().await;
        state
            .password_resets
            .retain(|r| r.account_id != reset.account_id);
        state.password_resets.push(reset);
    }

    /// Consume the reset matching `token_digest` if it has not expired.
    /// Expired entries are dropped on the way.
    pub async fn password_resets_take(
        &self,
        token_digest: &str,
        now: DateTime<Utc>,
    ) -> Option<PasswordReset> {
        let mut state = self.state.write().await;
        state.password_resets.retain(|r| r.expires_at > now);
        let index = state
            .password_resets
            .iter()
            .position(|r| r.token_digest == token_digest)?;
        Some(state.password_resets.swap_remove(index))
    }
}
