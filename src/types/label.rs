use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: String,
}
