//! Authentication and authorization primitives for bookstall.
//!
//! Three concerns live here:
//! - [`token`]: stateless signed identity assertions (JWT). A token is valid
//!   until natural expiry; there is no revocation list.
//! - [`password`]: Argon2id hashing and verification of seller credentials.
//! - [`guard`]: the single ownership check gating every mutating book
//!   operation and seller self-lookup.

use thiserror::Error;

pub mod guard;
pub mod password;
pub mod token;

pub use guard::authorize_owner;
pub use token::{Claims, TokenConfig, TokenService};

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Signature, format, or expiry check failed.
    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    /// Credential mismatch at login.
    #[error("incorrect email or password")]
    Unauthorized,

    /// Authenticated, but not the owner of the target resource.
    #[error("forbidden")]
    Forbidden,

    #[error("password hashing failed")]
    HashingFailed,

    #[error("unsupported signing algorithm '{0}'")]
    UnsupportedAlgorithm(String),
}
