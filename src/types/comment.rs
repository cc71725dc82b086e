use serde::{Deserialize, Serialize};

use super::User;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub body: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub user: Option<User>,
}
