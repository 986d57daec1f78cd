use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims of the externally issued access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (UUID) of the auth subject.
    pub sub: String,
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Extracted from the Authorization header by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}
