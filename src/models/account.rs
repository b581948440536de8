//! Login accounts, tokens and the password rule

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const PASSWORD_RULE_MESSAGE: &str =
    "Password must contain uppercase, lowercase, special character and be longer than 8 characters";

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
// anything but an ASCII letter or digit, underscore included
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());
static MIN_LENGTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.{9,}$").unwrap());

/// Lowercase, uppercase, special character, more than 8 characters
pub fn is_valid_password(password: &str) -> bool {
    LOWERCASE.is_match(password)
        && UPPERCASE.is_match(password)
        && SPECIAL.is_match(password)
        && MIN_LENGTH.is_match(password)
}

/// Roles accepted at signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Customer,
    Technician,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Customer => "customer",
            AccountRole::Technician => "technician",
        }
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(AccountRole::Customer),
            "technician" => Ok(AccountRole::Technician),
            _ => Err(format!("Invalid account role: {}", s)),
        }
    }
}

/// Stored login account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

/// Pending password reset; only the token digest is kept
#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub account_id: Uuid,
    pub token_digest: String,
    pub expires_at: DateTime<Utc>,
}

/// Signup request. The role stays a plain string so an unknown role is a
/// 400 with the "Invalid role" message rather than a body rejection.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// When present, must match the account's role
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of an account
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountInfo {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
}

impl From<&Account> for AccountInfo {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
    pub account: AccountInfo,
}

/// JWT claims for authenticated accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountClaims {
    pub sub: String,
    pub account_id: Uuid,
    pub role: AccountRole,
    pub exp: i64,
    pub iat: i64,
}

impl AccountClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
