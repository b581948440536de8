//! Signup, login and password recovery

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Duration;
use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::Validate;

use crate::{
    clock::Clock,
    config::AuthConfig,
    error::{AppError, AppResult},
    models::account::{
        is_valid_password, Account, AccountClaims, AccountRole, LoginRequest, PasswordReset,
        SignupRequest, PASSWORD_RULE_MESSAGE,
    },
    repository::Repository,
};

const RESET_TOKEN_LENGTH: usize = 48;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Register a new account.
    ///
    /// Checks run in order: role, password rule, email format, uniqueness.
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<Account> {
        let role: AccountRole = request
            .role
            .parse()
            .map_err(|_| AppError::InvalidRole("Invalid role".to_string()))?;

        if !is_valid_password(&request.password) {
            return Err(AppError::WeakPassword(PASSWORD_RULE_MESSAGE.to_string()));
        }

        request.validate()?;

        let account = Account {
            id: Uuid::new_v4(),
            email: request.email.clone(),
            password_hash: self.hash_password(&request.password)?,
            role,
            created_at: self.clock.now(),
        };

        let account = self.repository.accounts_create(account).await?;
        tracing::info!(account_id = %account.id, role = %account.role, "Account created");
        Ok(account)
    }

    /// Authenticate and return a JWT together with the account
    pub async fn login(&self, request: &LoginRequest) -> AppResult<(String, Account)> {
        let account = self
            .repository
            .accounts_find_by_email(&request.email)
            .await
            .ok_or_else(|| AppError::AccountNotFound("Account does not exist".to_string()))?;

        // an empty role means no role was chosen
        if let Some(role) = request.role.as_deref().filter(|r| !r.is_empty()) {
            if role != account.role.as_str() {
                return Err(AppError::Authentication("Invalid role".to_string()));
            }
        }

        if !self.verify_password(&account, &request.password)? {
            tracing::debug!(account_id = %account.id, "Rejected login with wrong password");
            return Err(AppError::Authentication("Invalid password".to_string()));
        }

        let token = self.create_token_for_account(&account)?;
        Ok((token, account))
    }

    /// Issue a reset token for the account. Only its digest is stored.
    pub async fn forgot_password(&self, email: &str) -> AppResult<String> {
        let account = self
            .repository
            .accounts_find_by_email(email)
            .await
            .ok_or_else(|| AppError::AccountNotFound("Account does not exist".to_string()))?;

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RESET_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let expires_at = self.clock.now() + Duration::minutes(self.config.reset_token_minutes);
        self.repository
            .password_resets_store(PasswordReset {
                account_id: account.id,
                token_digest: token_digest(&token),
                expires_at,
            })
            .await;

        tracing::info!(account_id = %account.id, %expires_at, "Password reset requested");
        // no mailer: the link is only available in debug logs
        tracing::debug!(account_id = %account.id, reset_token = %token, "Password reset token issued");
        Ok(token)
    }

    /// Consume a reset token and set a new password
    pub async fn reset_password(&self, token: &str, password: &str) -> AppResult<()> {
        if !is_valid_password(password) {
            return Err(AppError::WeakPassword(PASSWORD_RULE_MESSAGE.to_string()));
        }

        let reset = self
            .repository
            .password_resets_take(&token_digest(token), self.clock.now())
            .await
            .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

        let hash = self.hash_password(password)?;
        self.repository
            .accounts_update_password(reset.account_id, hash)
            .await?;
        tracing::info!(account_id = %reset.account_id, "Password reset completed");
        Ok(())
    }

    /// Account behind a validated token
    pub async fn current_account(&self, claims: &AccountClaims) -> AppResult<Account> {
        self.repository
            .accounts_find_by_email(&claims.sub)
            .await
            .filter(|account| account.id == claims.account_id)
            .ok_or_else(|| AppError::Authentication("Account no longer exists".to_string()))
    }

    /// Create JWT token for an account
    fn create_token_for_account(&self, account: &Account) -> AppResult<String> {
        let now = self.clock.now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = AccountClaims {
            sub: account.email.clone(),
            account_id: account.id,
            role: account.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify account password
    fn verify_password(&self, account: &Account, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&account.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}

fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    fn service() -> AuthService {
        AuthService::new(Repository::new(), AuthConfig::default(), Arc::new(SystemClock))
    }

    fn signup(email: &str, password: &str, role: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    fn login(email: &str, password: &str, role: Option<&str>) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_signup_checks() {
        let svc = service();
        assert!(matches!(
            svc.signup(&signup("a@example.com", "Abcdefgh!", "admin")).await,
            Err(AppError::InvalidRole(_))
        ));
        assert!(matches!(
            svc.signup(&signup("a@example.com", "weak", "customer")).await,
            Err(AppError::WeakPassword(_))
        ));
        assert!(matches!(
            svc.signup(&signup("not-an-email", "Abcdefgh!", "customer")).await,
            Err(AppError::Validation(_))
        ));

        let account = svc
            .signup(&signup("a@example.com", "Abcdefgh!", "customer"))
            .await
            .unwrap();
        assert_eq!(account.role, AccountRole::Customer);
        assert_ne!(account.password_hash, "Abcdefgh!");

        assert!(matches!(
            svc.signup(&signup("a@example.com", "Abcdefgh!", "technician")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let svc = service();
        svc.signup(&signup("tech@example.com", "Wrench#2024", "technician"))
            .await
            .unwrap();

        assert!(matches!(
            svc.login(&login("nobody@example.com", "Wrench#2024", None)).await,
            Err(AppError::AccountNotFound(_))
        ));
        assert!(matches!(
            svc.login(&login("tech@example.com", "Wrench#2024", Some("customer"))).await,
            Err(AppError::Authentication(msg)) if msg == "Invalid role"
        ));
        assert!(matches!(
            svc.login(&login("tech@example.com", "wrong", None)).await,
            Err(AppError::Authentication(msg)) if msg == "Invalid password"
        ));

        assert!(svc
            .login(&login("tech@example.com", "Wrench#2024", Some("")))
            .await
            .is_ok());

        let (token, account) = svc
            .login(&login("tech@example.com", "Wrench#2024", Some("technician")))
            .await
            .unwrap();
        let claims = AccountClaims::from_token(&token, &AuthConfig::default().jwt_secret).unwrap();
        assert_eq!(claims.account_id, account.id);
        assert_eq!(claims.role, AccountRole::Technician);
    }

    #[tokio::test]
    async fn test_password_reset_flow() {
        let svc = service();
        svc.signup(&signup("c@example.com", "Original#1", "customer"))
            .await
            .unwrap();

        assert!(matches!(
            svc.forgot_password("missing@example.com").await,
            Err(AppError::AccountNotFound(_))
        ));

        let token = svc.forgot_password("c@example.com").await.unwrap();
        assert!(matches!(
            svc.reset_password(&token, "short").await,
            Err(AppError::WeakPassword(_))
        ));
        svc.reset_password(&token, "Replaced#22").await.unwrap();
        assert!(svc.reset_password(&token, "Replaced#33").await.is_err());

        assert!(svc.login(&login("c@example.com", "Original#1", None)).await.is_err());
        assert!(svc.login(&login("c@example.com", "Replaced#22", None)).await.is_ok());
    }
}
