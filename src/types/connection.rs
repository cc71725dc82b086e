use serde::{Deserialize, Serialize};

/// GraphQL connection wrapper (`{ nodes: [...] }`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}
