use serde::{Deserialize, Serialize};

/// Claims carried by an access token. Tokens issued by this API only set
/// `email` and `iat`; `exp` is honoured when a token happens to carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub email: String,
    #[serde(default)]
    pub iat: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}
