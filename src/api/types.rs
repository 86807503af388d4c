use serde::Deserialize;

use crate::models::AdminUser;

/// Successful login payload: the identity to display and the opaque
/// token that authorizes subsequent admin calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub user: AdminUser,
    pub token: String,
}
