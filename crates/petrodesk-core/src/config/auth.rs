//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Bearer-token validation configuration.
///
/// PetroDesk does not issue tokens itself; it only validates tokens minted
/// by the identity provider in front of it and extracts the caller id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT validation (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected token issuer. Empty disables the issuer check.
    #[serde(default)]
    pub issuer: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}
