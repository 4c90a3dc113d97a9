//! Response bodies for the mocked backend.

use payloads::PersonId;
use serde_json::{Value, json};

pub const ALICE_ID: PersonId =
    PersonId(uuid::uuid!("6a1f4c3e-2b1d-4f7a-9c11-0d5e8b7a6f21"));

/// Profile body for alice, including a field the client does not model.
pub fn alice_profile() -> Value {
    json!({
        "id": ALICE_ID,
        "username": "alice",
        "display_name": "Alice",
        "email": "alice@example.com",
        "avatar_url": "https://example.com/alice.png",
    })
}

pub fn credits(balance: i64) -> Value {
    json!({ "balance": balance })
}
