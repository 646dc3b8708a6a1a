use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user row as embedded into post queries. Only the columns the join
/// selects are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// The identity behind an authenticated backend session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}
