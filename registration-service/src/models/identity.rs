//! Auth identity owned by the external auth provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity created by the auth provider's sign-up call. Only the generated
/// id and the email are read back; credentials never leave the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
}
