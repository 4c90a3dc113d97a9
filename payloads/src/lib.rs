pub mod api_client;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use responses::{CreditBalance, Person};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
)]
#[serde(transparent)]
pub struct PersonId(pub Uuid);
