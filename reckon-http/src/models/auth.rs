use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of revoking the caller's API key
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RevokeResponse {
    pub revoked: bool,

    /// Seconds until the revocation expires
    pub expires_in_seconds: u64,
}
