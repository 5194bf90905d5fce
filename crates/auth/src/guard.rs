//! Ownership authorization.
//!
//! Every handler that mutates a book, and the seller self-lookup, funnels
//! through this one comparison instead of repeating it inline.

use crate::token::Claims;
use crate::{AuthError, AuthResult};

/// Allows the operation iff the token-derived identity matches the resource
/// owner; denies with [`AuthError::Forbidden`] otherwise.
pub fn authorize_owner(claims: &Claims, resource_owner_id: i64) -> AuthResult<()> {
    if claims.seller_id == resource_owner_id {
        Ok(())
    } else {
        tracing::debug!(
            claimed = claims.seller_id,
            owner = resource_owner_id,
            "ownership check denied"
        );
        Err(AuthError::Forbidden)
    }
}
