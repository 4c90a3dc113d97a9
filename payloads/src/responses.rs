use crate::PersonId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The signed-in person, as returned by `/me/profile-v1`.
///
/// Only the fields the client displays are typed. Everything else the
/// backend sends is kept in `extra` so the profile round-trips unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Person {
    /// Display name if set, otherwise the username.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Credits available to the signed-in person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBalance {
    pub balance: Decimal,
}
